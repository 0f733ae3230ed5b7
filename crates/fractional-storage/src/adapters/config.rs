//! # Storage Settings
//!
//! TOML-backed settings for a storage block: pool geometry plus the fixed
//! attribute flags the block starts with.
//!
//! ## Config File Format
//!
//! ```toml
//! [pool]
//! slot_count = 3
//! stack_capacity = 32
//! default_stack_limit = 64
//!
//! [attributes]
//! unlimited_storage = false
//! unlimited_vending = false
//! void = true
//! lock_populated = false
//! lock_empty = false
//! ```
//!
//! Both tables and every key are optional; missing values take defaults.

use crate::domain::{FractionalGroup, PoolConfig, ResourceDescriptor, StorageError};
use crate::ports::AttributeFlags;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Settings for one storage block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Pool geometry.
    pub pool: PoolConfig,
    /// Attribute flags applied to the pool.
    pub attributes: AttributeFlags,
}

impl StorageSettings {
    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| StorageError::Io {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        debug!("[pool] Loading settings from {}", path.display());
        Self::parse(&content)
    }

    /// Parse settings from a TOML string.
    pub fn parse(content: &str) -> Result<Self, StorageError> {
        let settings: Self =
            toml::from_str(content).map_err(|e| StorageError::ConfigError(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Render settings as TOML.
    pub fn to_toml(&self) -> Result<String, StorageError> {
        toml::to_string(self).map_err(|e| StorageError::SerializationError(e.to_string()))
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<(), StorageError> {
        self.pool.validate()
    }

    /// Builder-style method to set the pool configuration.
    pub fn with_pool(mut self, pool: PoolConfig) -> Self {
        self.pool = pool;
        self
    }

    /// Builder-style method to set the attribute flags.
    pub fn with_attributes(mut self, attributes: AttributeFlags) -> Self {
        self.attributes = attributes;
        self
    }

    /// Create an empty group configured by these settings.
    pub fn build_group<D: ResourceDescriptor>(&self) -> Result<FractionalGroup<D>, StorageError> {
        Ok(FractionalGroup::new(self.pool.clone())?.with_attributes(self.attributes))
    }
}
