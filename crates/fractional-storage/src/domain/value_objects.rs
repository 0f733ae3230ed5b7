//! # Domain Value Objects
//!
//! Immutable value types shared by the pool and its slots.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A count or capacity that may be unbounded.
///
/// Unlimited storage and unlimited vending make slots report counts and
/// capacities without an upper bound. `Unbounded` orders above every
/// finite value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quantity {
    /// A concrete amount.
    Finite(u64),
    /// No upper bound.
    Unbounded,
}

impl Quantity {
    /// Zero items.
    pub const ZERO: Quantity = Quantity::Finite(0);

    /// Multiply two factors, treating overflow as unbounded.
    pub fn product(factors: &[u64]) -> Self {
        factors
            .iter()
            .try_fold(1u64, |acc, &f| acc.checked_mul(f))
            .map_or(Self::Unbounded, Self::Finite)
    }

    /// Returns the finite amount, if any.
    pub fn finite(self) -> Option<u64> {
        match self {
            Self::Finite(n) => Some(n),
            Self::Unbounded => None,
        }
    }

    /// Check if this quantity has no upper bound.
    pub fn is_unbounded(self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// Check if this quantity is exactly zero.
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// Finite amount, with `Unbounded` saturating to `u64::MAX`.
    pub fn saturating(self) -> u64 {
        self.finite().unwrap_or(u64::MAX)
    }

    /// Multiply by a factor, treating overflow as unbounded.
    pub fn checked_mul(self, factor: u64) -> Self {
        match self {
            Self::Finite(n) => n.checked_mul(factor).map_or(Self::Unbounded, Self::Finite),
            Self::Unbounded => Self::Unbounded,
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<u64> for Quantity {
    fn from(n: u64) -> Self {
        Self::Finite(n)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(n) => write!(f, "{}", n),
            Self::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// Kinds of item lock a host may assert on a storage group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockKind {
    /// Keeps the pool's resource identity when its count drops to zero.
    Populated,
    /// Stops empty slots from accepting new resources.
    Empty,
}
