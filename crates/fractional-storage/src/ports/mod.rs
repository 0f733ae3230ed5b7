//! # Ports Layer (Hexagonal Architecture)
//!
//! - `inbound`: the slot API callers drive
//! - `outbound`: host collaborators the pool depends on

pub mod inbound;
pub mod outbound;

pub use inbound::{StorageSlot, StorageSlotMut};
pub use outbound::{
    AttributeFlags, AttributeSource, NoopListener, PermissiveAttributes, PoolListener,
    RecordingListener,
};
