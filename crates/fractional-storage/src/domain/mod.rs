//! # Domain Module
//!
//! Pure accounting logic, no I/O.
//!
//! ## Components
//!
//! - `entities`: `ResourceDescriptor`, `ItemDescriptor`, `PoolConfig`
//! - `pool`: `SharedPool` with the fractional accounting algorithms
//! - `slot`: `SlotView`/`SlotMut` facades and cached `SlotState`
//! - `group`: `FractionalGroup`, owner of a pool and its slots
//! - `populate`: population policies (`NoPopulation`, `ConversionChains`)
//! - `envelope`: persisted shape (`PoolEnvelope`, `SlotRecord`)
//! - `value_objects`: `Quantity`, `LockKind`
//! - `errors`: `StorageError`

pub mod entities;
pub mod envelope;
pub mod errors;
pub mod group;
pub mod populate;
pub mod pool;
pub mod slot;
pub mod value_objects;

pub use entities::*;
pub use envelope::*;
pub use errors::*;
pub use group::*;
pub use populate::*;
pub use pool::*;
pub use slot::*;
pub use value_objects::*;
