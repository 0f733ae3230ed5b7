//! Persistence Adapters
//!
//! Embeds a group's envelope in the host's JSON container state under
//! [`POOL_KEY`], and offers a compact bincode form for snapshots.

use crate::domain::{FractionalGroup, PoolEnvelope, ResourceDescriptor, StorageError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Key under which a group stores its pool in the container.
pub const POOL_KEY: &str = "Pool";

/// Store `envelope` in `container` under [`POOL_KEY`].
pub fn write_envelope<D: Serialize>(
    envelope: &PoolEnvelope<D>,
    container: &mut Map<String, Value>,
) -> Result<(), StorageError> {
    let value = serde_json::to_value(envelope)
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;
    container.insert(POOL_KEY.to_string(), value);
    Ok(())
}

/// Read the envelope stored in `container`, if present.
pub fn read_envelope<D: DeserializeOwned>(
    container: &Map<String, Value>,
) -> Result<Option<PoolEnvelope<D>>, StorageError> {
    let Some(value) = container.get(POOL_KEY) else {
        return Ok(None);
    };

    let envelope = serde_json::from_value(value.clone())
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;
    Ok(Some(envelope))
}

/// Encode `envelope` with bincode.
pub fn encode_binary<D: Serialize>(envelope: &PoolEnvelope<D>) -> Result<Vec<u8>, StorageError> {
    bincode::serialize(envelope).map_err(|e| StorageError::SerializationError(e.to_string()))
}

/// Decode a bincode-encoded envelope.
pub fn decode_binary<D: DeserializeOwned>(bytes: &[u8]) -> Result<PoolEnvelope<D>, StorageError> {
    bincode::deserialize(bytes).map_err(|e| StorageError::SerializationError(e.to_string()))
}

impl<D> FractionalGroup<D>
where
    D: ResourceDescriptor + Serialize + DeserializeOwned,
{
    /// Store the pool in the host's container state.
    pub fn write_to(&self, container: &mut Map<String, Value>) -> Result<(), StorageError> {
        write_envelope(&self.to_envelope(), container)
    }

    /// Restore the pool from the host's container state.
    ///
    /// A container without a pool entry leaves the group untouched.
    pub fn read_from(&mut self, container: &Map<String, Value>) -> Result<(), StorageError> {
        match read_envelope(container)? {
            Some(envelope) => self.load_envelope(&envelope),
            None => {
                debug!("[pool] Container has no '{}' entry", POOL_KEY);
                Ok(())
            }
        }
    }

    /// Encode the pool with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StorageError> {
        encode_binary(&self.to_envelope())
    }

    /// Restore the pool from bincode bytes.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), StorageError> {
        let envelope = decode_binary(bytes)?;
        self.load_envelope(&envelope)
    }
}
