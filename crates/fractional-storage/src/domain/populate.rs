//! # Slot Population Policies
//!
//! When the first resource enters an empty pool, a population policy may
//! pre-assign several value-equivalent resources to the pool's slots, each at
//! a fixed conversion rate. The pool then rebinds the incoming resource to
//! whichever slot holds it.
//!
//! ```text
//! ConversionChains: iron_block = 9 iron_ingot = 81 iron_nugget
//!
//!   slot 0: iron_block   rate 81   (base)
//!   slot 1: iron_ingot   rate 9
//!   slot 2: iron_nugget  rate 1
//! ```

use super::entities::ResourceDescriptor;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One slot pre-assigned by a population policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment<D> {
    /// Target slot index.
    pub slot: usize,
    /// Resource bound to the slot.
    pub descriptor: D,
    /// Pool units per item of this resource.
    pub rate: u32,
}

impl<D> SlotAssignment<D> {
    /// Create a new assignment.
    pub fn new(slot: usize, descriptor: D, rate: u32) -> Self {
        Self {
            slot,
            descriptor,
            rate,
        }
    }
}

/// Population policy invoked when a resource enters an unpopulated pool.
pub trait SlotPopulator<D> {
    /// Slots to pre-assign for `prototype` in a pool of `slot_count` slots.
    fn populate(&self, prototype: &D, slot_count: usize) -> Vec<SlotAssignment<D>>;
}

impl<D, F> SlotPopulator<D> for F
where
    F: Fn(&D, usize) -> Vec<SlotAssignment<D>>,
{
    fn populate(&self, prototype: &D, slot_count: usize) -> Vec<SlotAssignment<D>> {
        self(prototype, slot_count)
    }
}

/// Policy that assigns nothing.
///
/// The incoming resource is then bound to the base slot at unit rate.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPopulation;

impl<D> SlotPopulator<D> for NoPopulation {
    fn populate(&self, _prototype: &D, _slot_count: usize) -> Vec<SlotAssignment<D>> {
        Vec::new()
    }
}

/// A chain member and its rate in units of the chain's least compact member.
#[derive(Clone, Debug)]
struct ChainLink<D> {
    descriptor: D,
    rate: u32,
}

/// Registry of value-equivalent resource chains.
///
/// A chain lists resources from most to least compact. Each member is
/// assigned to consecutive slots from 0 with its rate expressed in units of
/// the least compact member.
#[derive(Clone, Debug)]
pub struct ConversionChains<D> {
    chains: Vec<Vec<ChainLink<D>>>,
}

impl<D> Default for ConversionChains<D> {
    fn default() -> Self {
        Self { chains: Vec::new() }
    }
}

impl<D: ResourceDescriptor> ConversionChains<D> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { chains: Vec::new() }
    }

    /// Register a chain.
    ///
    /// `members` runs from most to least compact; each entry carries how many
    /// of the following member one unit converts into. The last member's
    /// factor is ignored.
    ///
    /// A chain whose accumulated rate does not fit in a `u32` is not
    /// registered.
    ///
    /// ```ignore
    /// chains.with_chain(vec![(block, 9), (ingot, 9), (nugget, 1)]);
    /// ```
    pub fn with_chain(mut self, members: Vec<(D, u32)>) -> Self {
        let mut links = Vec::with_capacity(members.len());
        let mut rate: u32 = 1;

        // Walk from the least compact member up, accumulating rates.
        for (index, (descriptor, factor)) in members.into_iter().rev().enumerate() {
            if index > 0 {
                let Some(next) = rate.checked_mul(factor) else {
                    warn!(
                        "[pool] Dropping conversion chain: rate {} x {} overflows",
                        rate, factor
                    );
                    return self;
                };
                rate = next;
            }
            links.push(ChainLink { descriptor, rate });
        }
        links.reverse();

        self.chains.push(links);
        self
    }

    /// Number of registered chains.
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Check if no chain is registered.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    fn chain_for(&self, prototype: &D) -> Option<&[ChainLink<D>]> {
        self.chains
            .iter()
            .find(|chain| chain.iter().any(|link| link.descriptor.matches(prototype)))
            .map(Vec::as_slice)
    }
}

impl<D: ResourceDescriptor> SlotPopulator<D> for ConversionChains<D> {
    fn populate(&self, prototype: &D, slot_count: usize) -> Vec<SlotAssignment<D>> {
        let Some(chain) = self.chain_for(prototype) else {
            return Vec::new();
        };

        chain
            .iter()
            .take(slot_count)
            .enumerate()
            .map(|(slot, link)| SlotAssignment::new(slot, link.descriptor.clone(), link.rate))
            .collect()
    }
}
