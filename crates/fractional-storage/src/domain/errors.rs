//! # Domain Errors
//!
//! Error types for the fractional storage pool.
//!
//! Accounting operations never fail: capacity exhaustion, inactive slots and
//! locked slots are expressed through clamping and unconsumed remainders.
//! Errors only arise at the boundaries, when loading configuration or a
//! persisted pool record.

use thiserror::Error;

/// Fractional storage error types.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A persisted record names a slot the pool does not have.
    #[error("Slot {slot} out of range (slot count {slot_count})")]
    SlotOutOfRange {
        /// Slot index found in the record
        slot: usize,
        /// Number of slots in the pool
        slot_count: usize,
    },

    /// A persisted record names the same slot twice.
    #[error("Duplicate slot in record: {0}")]
    DuplicateSlot(usize),

    /// Invalid pool configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Encoding or decoding of a pool record failed.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration file could not be read.
    #[error("I/O error on {path}: {error}")]
    Io {
        /// Path of the file that failed to load
        path: String,
        /// Error message from the I/O operation
        error: String,
    },
}
