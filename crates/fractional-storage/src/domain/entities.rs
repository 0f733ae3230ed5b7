//! # Domain Entities
//!
//! Resource descriptors and pool configuration.

use super::errors::StorageError;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Largest supported slot count. Slot indices persist as a single byte.
pub const MAX_SLOT_COUNT: usize = 256;

/// Stack limit assumed when no descriptor is available to ask.
pub const DEFAULT_STACK_LIMIT: u32 = 64;

/// Default number of stacks a slot holds.
pub const DEFAULT_STACK_CAPACITY: u32 = 32;

/// Identity and metadata of a resource type occupying a slot.
///
/// The pool treats descriptors as opaque: it only compares them and asks
/// for their per-stack limit. An empty slot holds no descriptor at all.
pub trait ResourceDescriptor: Clone + Debug + PartialEq {
    /// Units of this resource that fit in one stack.
    fn stack_limit(&self) -> u32;

    /// Strict identity check used when binding a resource to a slot.
    fn matches(&self, other: &Self) -> bool {
        self == other
    }

    /// Equivalence classes this resource belongs to.
    ///
    /// Two resources sharing a key are interchangeable for slot acceptance
    /// and release checks.
    fn equivalence_keys(&self) -> Vec<String> {
        Vec::new()
    }
}

/// A concrete item descriptor: registry id, variant and stack limit.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemDescriptor {
    /// Registry identifier, e.g. `"minecraft:iron_ingot"`.
    pub id: String,
    /// Variant or damage value distinguishing items sharing an id.
    #[serde(default)]
    pub variant: u32,
    /// Units per stack.
    pub stack_limit: u32,
    /// Equivalence tags, e.g. `"ingotIron"`.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ItemDescriptor {
    /// Create a descriptor with the default stack limit and no tags.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            variant: 0,
            stack_limit: DEFAULT_STACK_LIMIT,
            tags: Vec::new(),
        }
    }

    /// Set the variant.
    pub fn with_variant(mut self, variant: u32) -> Self {
        self.variant = variant;
        self
    }

    /// Set the stack limit.
    pub fn with_stack_limit(mut self, stack_limit: u32) -> Self {
        self.stack_limit = stack_limit;
        self
    }

    /// Add an equivalence tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

impl ResourceDescriptor for ItemDescriptor {
    fn stack_limit(&self) -> u32 {
        self.stack_limit
    }

    fn matches(&self, other: &Self) -> bool {
        self.id == other.id && self.variant == other.variant
    }

    fn equivalence_keys(&self) -> Vec<String> {
        self.tags.clone()
    }
}

/// Pool configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Number of slots sharing the pool.
    pub slot_count: usize,
    /// Stacks per slot; the per-slot capacity unit.
    pub stack_capacity: u32,
    /// Stack limit used for capacity estimates when no descriptor is known.
    pub default_stack_limit: u32,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            slot_count: 3,
            stack_capacity: DEFAULT_STACK_CAPACITY,
            default_stack_limit: DEFAULT_STACK_LIMIT,
        }
    }
}

impl PoolConfig {
    /// Create a validated configuration.
    pub fn new(slot_count: usize, stack_capacity: u32) -> Result<Self, StorageError> {
        let config = Self {
            slot_count,
            stack_capacity,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Create config for testing: three slots of one stack each.
    pub fn for_testing() -> Self {
        Self {
            slot_count: 3,
            stack_capacity: 1,
            default_stack_limit: DEFAULT_STACK_LIMIT,
        }
    }

    /// Validate configuration bounds.
    pub fn validate(&self) -> Result<(), StorageError> {
        if self.slot_count == 0 || self.slot_count > MAX_SLOT_COUNT {
            return Err(StorageError::ConfigError(format!(
                "slot_count must be between 1 and {}, got {}",
                MAX_SLOT_COUNT, self.slot_count
            )));
        }

        if self.default_stack_limit == 0 {
            return Err(StorageError::ConfigError(
                "default_stack_limit cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Builder-style method to set the slot count.
    pub fn with_slot_count(mut self, slot_count: usize) -> Self {
        self.slot_count = slot_count;
        self
    }

    /// Builder-style method to set the stack capacity.
    pub fn with_stack_capacity(mut self, stack_capacity: u32) -> Self {
        self.stack_capacity = stack_capacity;
        self
    }

    /// Builder-style method to set the default stack limit.
    pub fn with_default_stack_limit(mut self, stack_limit: u32) -> Self {
        self.default_stack_limit = stack_limit;
        self
    }
}
