//! # Outbound Ports
//!
//! Traits for the host collaborators a pool depends on: the attribute
//! source (storage/vending/void flags and item locks) and the change
//! listener notified after mutations.

use crate::domain::LockKind;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

/// Attribute source - outbound port.
///
/// Supplies the boolean attributes of the storage block hosting the pool.
/// Consumed read-only on every accounting operation.
pub trait AttributeSource {
    /// Capacity is unbounded.
    fn is_unlimited_storage(&self) -> bool;

    /// Slots report an unbounded count and absorb insertions.
    fn is_unlimited_vending(&self) -> bool;

    /// Overflowing insertions are destroyed instead of rejected.
    fn is_void(&self) -> bool;

    /// Check whether a lock of `kind` is asserted.
    fn is_item_locked(&self, kind: LockKind) -> bool;
}

/// Change listener - outbound port.
///
/// Receives the pool's change notifications. Both hooks default to no-ops.
pub trait PoolListener {
    /// The resource identity of one or more slots changed.
    fn on_item_changed(&self) {}

    /// The pooled count changed without a change of identity.
    fn on_amount_changed(&self) {}
}

// =============================================================================
// Default Implementations
// =============================================================================

/// Null attribute source used when the host provides none.
///
/// Every flag is off and nothing is locked.
#[derive(Clone, Copy, Debug, Default)]
pub struct PermissiveAttributes;

impl AttributeSource for PermissiveAttributes {
    fn is_unlimited_storage(&self) -> bool {
        false
    }

    fn is_unlimited_vending(&self) -> bool {
        false
    }

    fn is_void(&self) -> bool {
        false
    }

    fn is_item_locked(&self, _kind: LockKind) -> bool {
        false
    }
}

/// Fixed set of attribute flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeFlags {
    /// Capacity is unbounded.
    pub unlimited_storage: bool,
    /// Slots vend without limit.
    pub unlimited_vending: bool,
    /// Overflow is voided.
    pub void: bool,
    /// Populated-lock asserted.
    pub lock_populated: bool,
    /// Empty-lock asserted.
    pub lock_empty: bool,
}

impl AttributeFlags {
    /// Builder-style method to enable unlimited storage.
    pub fn with_unlimited_storage(mut self) -> Self {
        self.unlimited_storage = true;
        self
    }

    /// Builder-style method to enable unlimited vending.
    pub fn with_unlimited_vending(mut self) -> Self {
        self.unlimited_vending = true;
        self
    }

    /// Builder-style method to enable void-on-overflow.
    pub fn with_void(mut self) -> Self {
        self.void = true;
        self
    }

    /// Builder-style method to assert a lock.
    pub fn with_lock(mut self, kind: LockKind) -> Self {
        match kind {
            LockKind::Populated => self.lock_populated = true,
            LockKind::Empty => self.lock_empty = true,
        }
        self
    }
}

impl AttributeSource for AttributeFlags {
    fn is_unlimited_storage(&self) -> bool {
        self.unlimited_storage
    }

    fn is_unlimited_vending(&self) -> bool {
        self.unlimited_vending
    }

    fn is_void(&self) -> bool {
        self.void
    }

    fn is_item_locked(&self, kind: LockKind) -> bool {
        match kind {
            LockKind::Populated => self.lock_populated,
            LockKind::Empty => self.lock_empty,
        }
    }
}

/// Listener that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopListener;

impl PoolListener for NoopListener {}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Listener counting notifications.
///
/// Clones share their counters, so a test can keep one handle and give the
/// other to the pool.
#[derive(Clone, Debug, Default)]
pub struct RecordingListener {
    item_changes: Rc<Cell<usize>>,
    amount_changes: Rc<Cell<usize>>,
}

impl RecordingListener {
    /// Create a listener with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of "item changed" notifications received.
    pub fn item_changes(&self) -> usize {
        self.item_changes.get()
    }

    /// Number of "amount changed" notifications received.
    pub fn amount_changes(&self) -> usize {
        self.amount_changes.get()
    }

    /// Zero both counters.
    pub fn clear(&self) {
        self.item_changes.set(0);
        self.amount_changes.set(0);
    }
}

impl PoolListener for RecordingListener {
    fn on_item_changed(&self) {
        self.item_changes.set(self.item_changes.get() + 1);
    }

    fn on_amount_changed(&self) {
        self.amount_changes.set(self.amount_changes.get() + 1);
    }
}
