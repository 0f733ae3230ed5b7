//! # Shared Pool - Fractional Accounting
//!
//! One pooled count backs every slot. Each active slot converts between its
//! own item count and the pool unit through its conversion rate:
//!
//! ```text
//! stored_count(slot) = pooled_count / conv_rate[slot]
//! ```
//!
//! Slot 0 is the base slot. Its stack limit and rate define the pool's
//! capacity; the fractional remainder of a division stays in the pool and
//! remains visible through slots with smaller rates.
//!
//! ## Invariants
//!
//! - `pooled_count == 0` whenever every slot is inactive.
//! - A slot is inactive exactly when its rate is 0.
//! - An emptied pool resets every slot unless the populated-lock is asserted.
//! - Capacity products that overflow are unbounded, never wrapped.

use super::entities::{PoolConfig, ResourceDescriptor};
use super::envelope::{PoolEnvelope, SlotRecord};
use super::errors::StorageError;
use super::populate::{NoPopulation, SlotAssignment, SlotPopulator};
use super::slot::SlotState;
use super::value_objects::{LockKind, Quantity};
use crate::ports::outbound::{AttributeSource, NoopListener, PermissiveAttributes, PoolListener};
use std::fmt;
use tracing::{debug, trace, warn};

/// Pooled storage shared by a fixed set of slots.
///
/// Every operation takes a slot index. An index outside the pool behaves as
/// an inactive slot.
pub struct SharedPool<D: ResourceDescriptor> {
    /// Configuration.
    config: PoolConfig,

    /// Resource bound to each slot; slot 0 holds the base descriptor.
    descriptors: Vec<Option<D>>,

    /// Pool units per item for each slot; 0 marks an inactive slot.
    conv_rates: Vec<u32>,

    /// Shared quantity, in pool units.
    pooled_count: u64,

    /// Per-slot cached state, refreshed on every local reset.
    slot_states: Vec<SlotState>,

    attributes: Box<dyn AttributeSource>,
    populator: Box<dyn SlotPopulator<D>>,
    listener: Box<dyn PoolListener>,
}

impl<D: ResourceDescriptor> SharedPool<D> {
    /// Creates an empty pool with permissive attributes and no population
    /// policy.
    pub fn new(config: PoolConfig) -> Result<Self, StorageError> {
        config.validate()?;

        let slot_count = config.slot_count;
        Ok(Self {
            config,
            descriptors: vec![None; slot_count],
            conv_rates: vec![0; slot_count],
            pooled_count: 0,
            slot_states: vec![SlotState::default(); slot_count],
            attributes: Box::new(PermissiveAttributes),
            populator: Box::new(NoPopulation),
            listener: Box::new(NoopListener),
        })
    }

    /// Builder-style method to set the attribute source.
    pub fn with_attributes(mut self, attributes: impl AttributeSource + 'static) -> Self {
        self.attributes = Box::new(attributes);
        self
    }

    /// Builder-style method to set the population policy.
    pub fn with_populator(mut self, populator: impl SlotPopulator<D> + 'static) -> Self {
        self.populator = Box::new(populator);
        self
    }

    /// Builder-style method to set the change listener.
    pub fn with_listener(mut self, listener: impl PoolListener + 'static) -> Self {
        self.listener = Box::new(listener);
        self
    }

    /// Replaces the attribute source.
    pub fn set_attributes(&mut self, attributes: impl AttributeSource + 'static) {
        self.attributes = Box::new(attributes);
    }

    /// Replaces the change listener.
    pub fn set_listener(&mut self, listener: impl PoolListener + 'static) {
        self.listener = Box::new(listener);
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Returns the attribute source.
    pub fn attributes(&self) -> &dyn AttributeSource {
        self.attributes.as_ref()
    }

    /// Number of slots sharing the pool.
    pub fn slot_count(&self) -> usize {
        self.descriptors.len()
    }

    /// Shared quantity, in pool units.
    pub fn pooled_count(&self) -> u64 {
        self.pooled_count
    }

    /// Resource bound to `slot`, if any.
    pub fn stored_descriptor(&self, slot: usize) -> Option<&D> {
        self.descriptors.get(slot).and_then(Option::as_ref)
    }

    /// Resource bound to the base slot, if any.
    pub fn base_descriptor(&self) -> Option<&D> {
        self.stored_descriptor(0)
    }

    /// Conversion rate of `slot`; 0 when inactive.
    pub fn conversion_rate(&self, slot: usize) -> u32 {
        self.conv_rates.get(slot).copied().unwrap_or(0)
    }

    /// Conversion rate of the base slot.
    pub fn base_rate(&self) -> u32 {
        self.conversion_rate(0)
    }

    /// Check if the pool's resource identity is fixed.
    pub fn is_populated(&self) -> bool {
        self.base_rate() != 0
    }

    /// Cached state of `slot`.
    pub fn slot_state(&self, slot: usize) -> Option<&SlotState> {
        self.slot_states.get(slot)
    }

    /// Binds a resource to the pool through `slot`.
    ///
    /// Returns the slot the resource ended up in. Passing `None` resets the
    /// whole pool. Once populated, the pool's identity is fixed and this call
    /// does nothing.
    pub fn set_stored_descriptor(&mut self, slot: usize, descriptor: Option<D>) -> usize {
        let Some(prototype) = descriptor else {
            self.reset();
            return slot;
        };

        if self.is_populated() {
            return slot;
        }

        let assignments = self.populator.populate(&prototype, self.slot_count());
        self.apply_assignments(assignments);

        let mut target = slot;
        let matched = self
            .descriptors
            .iter()
            .rposition(|d| d.as_ref().is_some_and(|d| d.matches(&prototype)));

        if let Some(found) = matched {
            target = found;
            self.pooled_count = 0;
        } else if self.conv_rates.iter().all(|&rate| rate == 0) {
            // Nothing was pre-assigned: the resource becomes the base at unit rate.
            self.descriptors[0] = Some(prototype);
            self.conv_rates[0] = 1;
            target = 0;
            self.pooled_count = 0;
        }

        debug!(
            "[pool] Populated from slot {} (bound to slot {}, base rate {})",
            slot,
            target,
            self.base_rate()
        );

        self.reset_slot_states();
        self.listener.on_item_changed();
        target
    }

    fn apply_assignments(&mut self, assignments: Vec<SlotAssignment<D>>) {
        let slot_count = self.slot_count();
        for assignment in assignments {
            if assignment.slot >= slot_count || assignment.rate == 0 {
                warn!(
                    "[pool] Ignoring population of slot {} at rate {} ({} slots)",
                    assignment.slot, assignment.rate, slot_count
                );
                continue;
            }
            self.descriptors[assignment.slot] = Some(assignment.descriptor);
            self.conv_rates[assignment.slot] = assignment.rate;
        }
    }

    /// Item count of `slot`.
    ///
    /// Unbounded under unlimited vending. The fractional remainder of the
    /// division is not visible here.
    pub fn stored_count(&self, slot: usize) -> Quantity {
        let rate = self.conversion_rate(slot);
        if rate == 0 {
            return Quantity::ZERO;
        }

        if self.attributes.is_unlimited_vending() {
            return Quantity::Unbounded;
        }

        Quantity::Finite(self.pooled_count / u64::from(rate))
    }

    /// Sets the item count of `slot`, keeping the fractional remainder
    /// contributed through other slots.
    pub fn set_stored_count(&mut self, slot: usize, amount: u64) {
        let rate = u64::from(self.conversion_rate(slot));
        if rate == 0 || self.attributes.is_unlimited_vending() {
            return;
        }

        let old_count = self.pooled_count;
        let requested = (self.pooled_count % rate).saturating_add(rate.saturating_mul(amount));
        let new_count = requested.min(self.pool_ceiling());

        if new_count == old_count {
            return;
        }

        self.pooled_count = new_count;
        self.settle();
    }

    /// Inserts (`amount > 0`) or extracts (`amount < 0`) items through `slot`.
    ///
    /// Returns the part of `amount` that was not consumed: the rejected
    /// overflow of an insertion, or the shortfall of an extraction as a
    /// positive number. An inactive slot or a zero amount returns `amount`
    /// unchanged.
    pub fn adjust_stored_count(&mut self, slot: usize, amount: i64) -> i64 {
        let rate = u64::from(self.conversion_rate(slot));
        if rate == 0 || amount == 0 {
            return amount;
        }

        if amount > 0 {
            self.insert(rate, amount.unsigned_abs())
        } else {
            self.extract(rate, amount.unsigned_abs())
        }
    }

    fn insert(&mut self, rate: u64, amount: u64) -> i64 {
        if self.attributes.is_unlimited_vending() {
            return 0;
        }

        let can_add = self.pool_ceiling().saturating_sub(self.pooled_count) / rate;
        let will_add = amount.min(can_add);

        if will_add > 0 {
            self.pooled_count += rate * will_add;
            trace!("[pool] Inserted {} x{} (pooled {})", will_add, rate, self.pooled_count);
            self.listener.on_amount_changed();
        }

        if self.attributes.is_void() {
            return 0;
        }

        to_signed(amount - will_add)
    }

    // Extraction removes `will_remove` pool units, not `rate * will_remove`.
    fn extract(&mut self, rate: u64, want: u64) -> i64 {
        let can_remove = self.pooled_count / rate;
        let will_remove = want.min(can_remove);
        if will_remove == 0 {
            return to_signed(want);
        }

        self.pooled_count -= will_remove;
        trace!("[pool] Extracted {} (pooled {})", will_remove, self.pooled_count);
        self.settle();

        to_signed(want - will_remove)
    }

    /// Resets an emptied pool unless the populated-lock holds it, otherwise
    /// reports the amount change.
    fn settle(&mut self) {
        if self.pooled_count == 0 && !self.attributes.is_item_locked(LockKind::Populated) {
            self.reset();
        } else {
            self.listener.on_amount_changed();
        }
    }

    /// Largest pooled count the base slot allows.
    fn pool_ceiling(&self) -> u64 {
        self.max_capacity(0)
            .checked_mul(u64::from(self.base_rate()))
            .saturating()
    }

    fn stack_limit_of(&self, descriptor: &D) -> u64 {
        u64::from(descriptor.stack_limit())
    }

    /// Item capacity of `slot`.
    ///
    /// Scales inversely with the slot's rate relative to the base rate.
    pub fn max_capacity(&self, slot: usize) -> Quantity {
        let rate = self.conversion_rate(slot);
        let Some(base) = self.base_descriptor() else {
            return Quantity::ZERO;
        };
        if rate == 0 {
            return Quantity::ZERO;
        }

        if self.attributes.is_unlimited_storage() || self.attributes.is_unlimited_vending() {
            return Quantity::Unbounded;
        }

        Quantity::product(&[
            self.stack_limit_of(base),
            u64::from(self.config.stack_capacity),
            u64::from(self.base_rate() / rate),
        ])
    }

    /// Item capacity of `slot` for a resource not yet committed.
    ///
    /// An unpopulated pool returns a provisional estimate from the
    /// candidate's stack limit. A populated pool returns the real capacity
    /// only when the candidate matches the slot's resource.
    pub fn max_capacity_for(&self, slot: usize, candidate: Option<&D>) -> Quantity {
        if self.attributes.is_unlimited_storage() || self.attributes.is_unlimited_vending() {
            return Quantity::Unbounded;
        }

        if self.base_descriptor().is_none() {
            let stack_limit = candidate
                .map(|d| self.stack_limit_of(d))
                .unwrap_or(u64::from(self.config.default_stack_limit));
            return Quantity::product(&[stack_limit, u64::from(self.config.stack_capacity)]);
        }

        match (self.stored_descriptor(slot), candidate) {
            (Some(stored), Some(candidate)) if stored.matches(candidate) => {
                self.max_capacity(slot)
            }
            _ => Quantity::ZERO,
        }
    }

    /// Items `slot` can still take.
    pub fn remaining_capacity(&self, slot: usize) -> Quantity {
        let rate = self.conversion_rate(slot);
        let Some(base) = self.base_descriptor() else {
            return Quantity::ZERO;
        };
        if rate == 0 {
            return Quantity::ZERO;
        }

        if self.attributes.is_unlimited_vending() {
            return Quantity::Unbounded;
        }

        match Quantity::product(&[
            self.stack_limit_of(base),
            u64::from(self.config.stack_capacity),
            u64::from(self.base_rate()),
        ]) {
            Quantity::Finite(raw) => {
                Quantity::Finite(raw.saturating_sub(self.pooled_count) / u64::from(rate))
            }
            Quantity::Unbounded => Quantity::Unbounded,
        }
    }

    /// Check if `slot` holds no resource.
    pub fn is_empty(&self, slot: usize) -> bool {
        self.stored_descriptor(slot).is_none()
    }

    /// Check if `slot` can take part in storage.
    ///
    /// Every slot is enabled while the pool is unpopulated; afterwards only
    /// slots holding a resource are.
    pub fn is_enabled(&self, slot: usize) -> bool {
        self.base_descriptor().is_none() || !self.is_empty(slot)
    }

    /// Clears every slot and zeroes the pool.
    pub fn reset(&mut self) {
        debug!("[pool] Reset (pooled count was {})", self.pooled_count);

        self.pooled_count = 0;
        self.clear_slots();
        self.reset_slot_states();
        self.listener.on_item_changed();
    }

    fn clear_slots(&mut self) {
        self.descriptors.iter_mut().for_each(|d| *d = None);
        self.conv_rates.iter_mut().for_each(|r| *r = 0);
    }

    fn reset_slot_states(&mut self) {
        for (state, descriptor) in self.slot_states.iter_mut().zip(&self.descriptors) {
            state.local_reset(descriptor.as_ref());
        }
    }

    /// Snapshot of the pool in its persisted shape.
    pub fn to_envelope(&self) -> PoolEnvelope<D> {
        let items = self
            .descriptors
            .iter()
            .zip(&self.conv_rates)
            .enumerate()
            .filter_map(|(slot, (descriptor, &conv))| {
                descriptor.as_ref().map(|d| SlotRecord {
                    slot,
                    conv,
                    descriptor: d.clone(),
                })
            })
            .collect();

        PoolEnvelope {
            count: self.pooled_count,
            items,
        }
    }

    /// Replaces the pool's state with a persisted one.
    ///
    /// The record is validated first; a rejected record leaves the pool
    /// untouched.
    ///
    /// # Errors
    /// - `SlotOutOfRange` if a record names a slot past the slot count
    /// - `DuplicateSlot` if a record names a slot twice
    pub fn load_envelope(&mut self, envelope: &PoolEnvelope<D>) -> Result<(), StorageError> {
        if let Err(err) = envelope.validate(self.slot_count()) {
            warn!("[pool] Rejected persisted record: {}", err);
            return Err(err);
        }

        self.clear_slots();
        self.pooled_count = envelope.count;

        for record in &envelope.items {
            self.descriptors[record.slot] = Some(record.descriptor.clone());
            self.conv_rates[record.slot] = record.conv;
        }

        if self.pooled_count > 0 && self.conv_rates.iter().all(|&rate| rate == 0) {
            warn!(
                "[pool] Record holds {} unit(s) but no active slot; count dropped",
                self.pooled_count
            );
            self.pooled_count = 0;
        }

        debug!(
            "[pool] Loaded {} slot(s), pooled count {}",
            envelope.items.len(),
            self.pooled_count
        );

        self.reset_slot_states();
        self.listener.on_item_changed();
        Ok(())
    }
}

impl<D: ResourceDescriptor> fmt::Debug for SharedPool<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedPool")
            .field("config", &self.config)
            .field("descriptors", &self.descriptors)
            .field("conv_rates", &self.conv_rates)
            .field("pooled_count", &self.pooled_count)
            .finish_non_exhaustive()
    }
}

fn to_signed(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
