//! # Slot Views
//!
//! A slot is a window onto the shared pool at a fixed index. Views hold no
//! accounting state of their own; the only per-slot data is the cached
//! equivalence keys in [`SlotState`], owned by the pool and refreshed
//! whenever the pool resets, populates or loads.

use super::entities::ResourceDescriptor;
use super::pool::SharedPool;
use crate::ports::inbound::{StorageSlot, StorageSlotMut};
use std::collections::BTreeSet;

/// Cached per-slot state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotState {
    equivalence_keys: BTreeSet<String>,
}

impl SlotState {
    /// Rebuilds the cache for the slot's current resource.
    pub(crate) fn local_reset<D: ResourceDescriptor>(&mut self, descriptor: Option<&D>) {
        self.equivalence_keys.clear();
        if let Some(descriptor) = descriptor {
            self.equivalence_keys.extend(descriptor.equivalence_keys());
        }
    }

    /// Equivalence keys of the slot's resource.
    pub fn equivalence_keys(&self) -> &BTreeSet<String> {
        &self.equivalence_keys
    }

    /// Check if any of `keys` is cached for this slot.
    pub fn shares_equivalence(&self, keys: &[String]) -> bool {
        keys.iter().any(|key| self.equivalence_keys.contains(key))
    }
}

/// Read-only view of one slot.
#[derive(Debug)]
pub struct SlotView<'a, D: ResourceDescriptor> {
    pool: &'a SharedPool<D>,
    slot: usize,
}

impl<'a, D: ResourceDescriptor> SlotView<'a, D> {
    pub(crate) fn new(pool: &'a SharedPool<D>, slot: usize) -> Self {
        Self { pool, slot }
    }
}

impl<D: ResourceDescriptor> Clone for SlotView<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: ResourceDescriptor> Copy for SlotView<'_, D> {}

impl<D: ResourceDescriptor> StorageSlot<D> for SlotView<'_, D> {
    fn pool(&self) -> &SharedPool<D> {
        self.pool
    }

    fn slot_index(&self) -> usize {
        self.slot
    }
}

/// Mutable view of one slot.
#[derive(Debug)]
pub struct SlotMut<'a, D: ResourceDescriptor> {
    pool: &'a mut SharedPool<D>,
    slot: usize,
}

impl<'a, D: ResourceDescriptor> SlotMut<'a, D> {
    pub(crate) fn new(pool: &'a mut SharedPool<D>, slot: usize) -> Self {
        Self { pool, slot }
    }

    /// Binds a resource through this slot.
    ///
    /// Returns the view of the slot the resource ended up in, which differs
    /// from this one when population rebinds it.
    pub fn set_stored_descriptor(self, descriptor: Option<D>) -> SlotMut<'a, D> {
        let slot = self.pool.set_stored_descriptor(self.slot, descriptor);
        SlotMut {
            pool: self.pool,
            slot,
        }
    }

    /// Read-only view of the same slot.
    pub fn as_view(&self) -> SlotView<'_, D> {
        SlotView::new(self.pool, self.slot)
    }
}

impl<D: ResourceDescriptor> StorageSlot<D> for SlotMut<'_, D> {
    fn pool(&self) -> &SharedPool<D> {
        self.pool
    }

    fn slot_index(&self) -> usize {
        self.slot
    }
}

impl<D: ResourceDescriptor> StorageSlotMut<D> for SlotMut<'_, D> {
    fn pool_mut(&mut self) -> &mut SharedPool<D> {
        self.pool
    }
}
