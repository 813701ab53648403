//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                 │
//! │                                                             │
//! │  In floating point:                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!               │
//! │                                                             │
//! │  OUR SOLUTION: Integer minor units                          │
//! │    Prices, per-shop revenue and the grand total are all     │
//! │    sums and products of integers, so the figures in the     │
//! │    JSON backup are exact.                                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! // Create from minor units (the only way in)
//! let price = Money::from_minor(500); // ¥500
//!
//! // Arithmetic operations
//! let line = price.times(3);                     // ¥1500
//! let total = line + Money::from_minor(200);     // ¥1700
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64**: Large enough for any event's takings; signed so that
///   catalog validation can detect a negative price instead of silently
///   wrapping it
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Newtype serde**: Serializes as a bare JSON number, so persisted
///   state and export snapshots carry plain `price`/`revenue` numbers
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_minor(500);
    /// assert_eq!(price.minor(), 500);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (only reachable from unvalidated
    /// catalog input; rejected by `validation::validate_catalog`).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a sold count.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let unit_price = Money::from_minor(500);
    /// assert_eq!(unit_price.times(3).minor(), 1500);
    /// assert_eq!(unit_price.times(0), Money::zero());
    /// ```
    #[inline]
    pub const fn times(&self, count: u32) -> Self {
        Money(self.0 * count as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. The embedding shell formats amounts
/// for actual display (including revenue masking) via its configuration.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "¥{}", self.0)
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Summation for revenue folds over products and shops.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
