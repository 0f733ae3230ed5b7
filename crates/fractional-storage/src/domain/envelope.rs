//! # Serialization Envelope
//!
//! Persisted shape of a pool:
//!
//! ```text
//! { "Count": 162,
//!   "Items": [ { "Slot": 0, "Conv": 81, "Item": <descriptor> },
//!              { "Slot": 1, "Conv": 9,  "Item": <descriptor> } ] }
//! ```
//!
//! Empty slots are omitted. Entry order is irrelevant.

use super::errors::StorageError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One occupied slot in a persisted pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord<D> {
    /// Slot index.
    #[serde(rename = "Slot")]
    pub slot: usize,
    /// Conversion rate of the slot.
    #[serde(rename = "Conv")]
    pub conv: u32,
    /// Resource held by the slot.
    #[serde(rename = "Item")]
    pub descriptor: D,
}

/// Persisted pool state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEnvelope<D> {
    /// Pooled count, in pool units.
    #[serde(rename = "Count", default)]
    pub count: u64,
    /// Occupied slots.
    #[serde(rename = "Items", default = "Vec::new")]
    pub items: Vec<SlotRecord<D>>,
}

impl<D> Default for PoolEnvelope<D> {
    fn default() -> Self {
        Self {
            count: 0,
            items: Vec::new(),
        }
    }
}

impl<D> PoolEnvelope<D> {
    /// Check the record against a pool of `slot_count` slots.
    ///
    /// Every slot index must be in range and appear at most once.
    pub fn validate(&self, slot_count: usize) -> Result<(), StorageError> {
        let mut seen = HashSet::with_capacity(self.items.len());

        for record in &self.items {
            if record.slot >= slot_count {
                return Err(StorageError::SlotOutOfRange {
                    slot: record.slot,
                    slot_count,
                });
            }
            if !seen.insert(record.slot) {
                return Err(StorageError::DuplicateSlot(record.slot));
            }
        }

        Ok(())
    }
}
