//! Type-safe price representation using decimal arithmetic.
//!
//! All amounts are in rupees. The storefront has a single currency and a
//! fixed tax rate, so neither is carried per value.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tax applied to the subtotal (18%).
pub const TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// Flat delivery charge added to every order.
pub const DELIVERY_FEE: Price = Price(Decimal::from_parts(40, 0, 0, false, 0));

const CURRENCY_SYMBOL: &str = "₹";

/// A rupee amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero rupees.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of rupees.
    #[must_use]
    pub fn from_rupees(rupees: i64) -> Self {
        Self(Decimal::from(rupees))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Apply a rate (e.g. [`TAX_RATE`]) to this amount.
    #[must_use]
    pub fn scaled(&self, rate: Decimal) -> Self {
        Self(self.0 * rate)
    }

    /// Format without trailing zeros (e.g., "₹299", "₹12.5").
    ///
    /// Used on menu cards and unit prices where whole rupees are the norm.
    #[must_use]
    pub fn display_compact(&self) -> String {
        format!("{CURRENCY_SYMBOL}{}", self.0.normalize())
    }
}

/// Formats with two decimal places (e.g., "₹815.26").
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CURRENCY_SYMBOL}{:.2}", self.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
