//! # Inbound Ports
//!
//! The per-slot storage contract callers program against. Every method
//! forwards to the shared pool with the slot's fixed index.

use crate::domain::{LockKind, Quantity, ResourceDescriptor, SharedPool};

/// Storage slot API - read side.
pub trait StorageSlot<D: ResourceDescriptor> {
    /// Pool backing this slot.
    fn pool(&self) -> &SharedPool<D>;

    /// Index of this slot in the pool.
    fn slot_index(&self) -> usize;

    /// Resource held by this slot.
    fn stored_descriptor(&self) -> Option<&D> {
        self.pool().stored_descriptor(self.slot_index())
    }

    /// Item count; unbounded under unlimited vending.
    fn stored_count(&self) -> Quantity {
        self.pool().stored_count(self.slot_index())
    }

    /// Pool units per item.
    fn conversion_rate(&self) -> u32 {
        self.pool().conversion_rate(self.slot_index())
    }

    /// Item capacity.
    fn max_capacity(&self) -> Quantity {
        self.pool().max_capacity(self.slot_index())
    }

    /// Item capacity for a resource that may not be committed yet.
    fn max_capacity_for(&self, candidate: Option<&D>) -> Quantity {
        self.pool().max_capacity_for(self.slot_index(), candidate)
    }

    /// Items this slot can still take.
    fn remaining_capacity(&self) -> Quantity {
        self.pool().remaining_capacity(self.slot_index())
    }

    /// Check if this slot holds no resource.
    fn is_empty(&self) -> bool {
        self.pool().is_empty(self.slot_index())
    }

    /// Check if this slot takes part in storage.
    fn is_enabled(&self) -> bool {
        self.pool().is_enabled(self.slot_index())
    }

    /// Check if `candidate` is this slot's resource or shares an
    /// equivalence key with it.
    fn is_equivalent(&self, candidate: &D) -> bool {
        let Some(stored) = self.stored_descriptor() else {
            return false;
        };
        if stored.matches(candidate) {
            return true;
        }

        self.pool()
            .slot_state(self.slot_index())
            .is_some_and(|state| state.shares_equivalence(&candidate.equivalence_keys()))
    }

    /// Check if `candidate` may be inserted through this slot.
    fn can_accept(&self, candidate: &D) -> bool {
        if self.is_empty() && !self.pool().attributes().is_item_locked(LockKind::Empty) {
            return true;
        }

        self.is_equivalent(candidate)
    }

    /// Check if `candidate` may be extracted through this slot.
    fn can_release(&self, candidate: &D) -> bool {
        self.is_equivalent(candidate)
    }
}

/// Storage slot API - write side.
pub trait StorageSlotMut<D: ResourceDescriptor>: StorageSlot<D> {
    /// Pool backing this slot.
    fn pool_mut(&mut self) -> &mut SharedPool<D>;

    /// Sets the item count, keeping the pool's fractional remainder.
    fn set_stored_count(&mut self, amount: u64) {
        let slot = self.slot_index();
        self.pool_mut().set_stored_count(slot, amount);
    }

    /// Inserts (`amount > 0`) or extracts (`amount < 0`) items.
    ///
    /// Returns the unconsumed part of `amount`.
    fn adjust_stored_count(&mut self, amount: i64) -> i64 {
        let slot = self.slot_index();
        self.pool_mut().adjust_stored_count(slot, amount)
    }
}
