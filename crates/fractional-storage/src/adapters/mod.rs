//! # Adapters Layer
//!
//! - `codec`: container (JSON) and bincode persistence of the pool
//! - `config`: TOML storage settings

pub mod codec;
pub mod config;

pub use codec::{decode_binary, encode_binary, read_envelope, write_envelope, POOL_KEY};
pub use config::StorageSettings;
