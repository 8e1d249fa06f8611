//! Monetary amounts.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// Error returned when an amount cannot be represented as [`Money`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid amount: {reason}")]
pub struct InvalidAmount {
    reason: &'static str,
}

/// A non-negative amount in whole rupees.
///
/// The rupee is the smallest unit the fare engine works in. Calculations
/// that produce fractional amounts (per-km charter rates, provider
/// estimates) are rounded to the nearest rupee on conversion.
///
/// # Examples
///
/// ```
/// use fare_server::domain::Money;
///
/// let fare = Money::rupees(90);
/// assert_eq!(fare.as_rupees(), 90);
/// assert_eq!(fare.to_string(), "₹90");
///
/// assert_eq!(Money::from_f64(8499.5).unwrap(), Money::rupees(8500));
/// assert!(Money::from_f64(-1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Zero rupees.
    pub const ZERO: Money = Money(0);

    /// Create an amount from whole rupees.
    pub const fn rupees(amount: u64) -> Self {
        Money(amount)
    }

    /// Convert a fractional rupee amount, rounding to the nearest rupee.
    ///
    /// Rejects negative and non-finite values rather than clamping them.
    pub fn from_f64(amount: f64) -> Result<Self, InvalidAmount> {
        if !amount.is_finite() {
            return Err(InvalidAmount {
                reason: "must be finite",
            });
        }
        if amount < 0.0 {
            return Err(InvalidAmount {
                reason: "must not be negative",
            });
        }
        if amount >= u64::MAX as f64 {
            return Err(InvalidAmount {
                reason: "out of range",
            });
        }
        Ok(Money(amount.round() as u64))
    }

    /// Returns the amount in whole rupees.
    pub const fn as_rupees(&self) -> u64 {
        self.0
    }

    /// Returns the amount as a float, for ratio calculations.
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u64> for Money {
    type Output = Money;

    fn mul(self, rhs: u64) -> Money {
        Money(self.0.saturating_mul(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.0)
    }
}
