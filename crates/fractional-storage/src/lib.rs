//! # Fractional Storage
//!
//! Pooled storage where several slots share one quantity pool.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! A storage block holds a small fixed set of slots, each bound to a resource
//! type and a conversion rate. All slots draw on a single pooled count
//! expressed in the finest unit:
//! - Slot counts are derived as `pooled / rate`, never stored
//! - Inserting a coarse resource credits the pool with its finest-unit value
//! - Binding one member of a conversion chain populates the other slots
//! - The pool resets itself when it drains to zero, unless locked
//!
//! ## Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Active slots | A slot is active exactly when its rate is non-zero |
//! | Base slot | Slot 0 carries the coarsest rate; the pool unit is the rate-1 member |
//! | Auto-reset | An empty, unlocked pool forgets every binding |
//! | Clamped counts | Saturation yields `Quantity::Unbounded`, never a wrapped value |
//! | Atomic load | A rejected envelope leaves the pool untouched |
//!
//! ## Module Structure
//!
//! ```text
//! fractional-storage/
//! ├── domain/          # SharedPool, FractionalGroup, slot views, population
//! ├── ports/           # StorageSlot API + attribute/listener traits
//! └── adapters/        # Container/bincode persistence, TOML settings
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{
    decode_binary, encode_binary, read_envelope, write_envelope, StorageSettings, POOL_KEY,
};
pub use domain::{
    ConversionChains, FractionalGroup, ItemDescriptor, LockKind, NoPopulation, PoolConfig,
    PoolEnvelope, Quantity, ResourceDescriptor, SharedPool, SlotAssignment, SlotMut,
    SlotPopulator, SlotRecord, SlotState, SlotView, StorageError, DEFAULT_STACK_CAPACITY,
    DEFAULT_STACK_LIMIT, MAX_SLOT_COUNT,
};
pub use ports::{
    AttributeFlags, AttributeSource, NoopListener, PermissiveAttributes, PoolListener,
    RecordingListener, StorageSlot, StorageSlotMut,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
