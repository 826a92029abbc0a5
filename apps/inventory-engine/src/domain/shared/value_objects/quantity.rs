//! Quantity value object for stock unit counts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

use crate::domain::shared::DomainError;

/// A count of stock units.
///
/// Represented as a signed integer so the same type can carry movement
/// deltas; stock record fields are kept non-negative by the aggregate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(i64);

impl Quantity {
    /// Zero quantity.
    pub const ZERO: Self = Self(0);

    /// Create a new Quantity from a unit count.
    #[must_use]
    pub const fn new(units: i64) -> Self {
        Self(units)
    }

    /// Get the inner unit count.
    #[must_use]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns true if this quantity is positive.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Returns true if this quantity is negative.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns true if this quantity is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Get the absolute value.
    #[must_use]
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Saturating addition, clamped at zero on the low end.
    ///
    /// This is the clamp applied to direct stock adjustments: a negative
    /// delta can empty a record but never drive it below zero.
    #[must_use]
    pub const fn saturating_add_clamped(&self, delta: Self) -> Self {
        let sum = self.0.saturating_add(delta.0);
        if sum < 0 { Self(0) } else { Self(sum) }
    }

    /// Validate a quantity used to create or reserve stock.
    ///
    /// # Errors
    ///
    /// Returns error if the quantity is zero or negative.
    pub fn validate_positive(&self, field: &str) -> Result<(), DomainError> {
        if self.0 <= 0 {
            return Err(DomainError::InvalidValue {
                field: field.to_string(),
                message: "quantity must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Validate a quantity used as a non-negative level (reorder point,
    /// initial stock).
    ///
    /// # Errors
    ///
    /// Returns error if the quantity is negative.
    pub fn validate_non_negative(&self, field: &str) -> Result<(), DomainError> {
        if self.0 < 0 {
            return Err(DomainError::InvalidValue {
                field: field.to_string(),
                message: "quantity cannot be negative".to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Quantity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Quantity {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Quantity> for i64 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}
