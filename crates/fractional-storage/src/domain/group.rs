//! # Fractional Group
//!
//! Owner of one shared pool and the slot views onto it. This is the unit a
//! host embeds: it exposes the slot count, indexed slot access and the
//! persisted envelope.

use super::entities::{PoolConfig, ResourceDescriptor};
use super::envelope::PoolEnvelope;
use super::errors::StorageError;
use super::pool::SharedPool;
use super::populate::SlotPopulator;
use super::slot::{SlotMut, SlotView};
use crate::ports::outbound::{AttributeSource, PoolListener};

/// A fixed set of slots sharing one pool.
#[derive(Debug)]
pub struct FractionalGroup<D: ResourceDescriptor> {
    pool: SharedPool<D>,
}

impl<D: ResourceDescriptor> FractionalGroup<D> {
    /// Create a group with an empty pool.
    pub fn new(config: PoolConfig) -> Result<Self, StorageError> {
        Ok(Self {
            pool: SharedPool::new(config)?,
        })
    }

    /// Builder-style method to set the attribute source.
    pub fn with_attributes(self, attributes: impl AttributeSource + 'static) -> Self {
        Self {
            pool: self.pool.with_attributes(attributes),
        }
    }

    /// Builder-style method to set the population policy.
    pub fn with_populator(self, populator: impl SlotPopulator<D> + 'static) -> Self {
        Self {
            pool: self.pool.with_populator(populator),
        }
    }

    /// Builder-style method to set the change listener.
    pub fn with_listener(self, listener: impl PoolListener + 'static) -> Self {
        Self {
            pool: self.pool.with_listener(listener),
        }
    }

    /// Replaces the attribute source.
    pub fn set_attributes(&mut self, attributes: impl AttributeSource + 'static) {
        self.pool.set_attributes(attributes);
    }

    /// Replaces the change listener.
    pub fn set_listener(&mut self, listener: impl PoolListener + 'static) {
        self.pool.set_listener(listener);
    }

    /// Number of slots.
    pub fn slot_count(&self) -> usize {
        self.pool.slot_count()
    }

    /// The shared pool.
    pub fn pool(&self) -> &SharedPool<D> {
        &self.pool
    }

    /// Read-only view of `slot`.
    pub fn slot(&self, slot: usize) -> Option<SlotView<'_, D>> {
        (slot < self.slot_count()).then(|| SlotView::new(&self.pool, slot))
    }

    /// Mutable view of `slot`.
    pub fn slot_mut(&mut self, slot: usize) -> Option<SlotMut<'_, D>> {
        if slot >= self.slot_count() {
            return None;
        }
        Some(SlotMut::new(&mut self.pool, slot))
    }

    /// Views of every slot in index order.
    pub fn slots(&self) -> impl Iterator<Item = SlotView<'_, D>> + '_ {
        (0..self.slot_count()).map(move |slot| SlotView::new(&self.pool, slot))
    }

    /// Snapshot of the pool in its persisted shape.
    pub fn to_envelope(&self) -> PoolEnvelope<D> {
        self.pool.to_envelope()
    }

    /// Replace the pool's state with a persisted one.
    pub fn load_envelope(&mut self, envelope: &PoolEnvelope<D>) -> Result<(), StorageError> {
        self.pool.load_envelope(envelope)
    }
}
