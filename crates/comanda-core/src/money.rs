//! Money type for menu prices and order totals.
//!
//! Uses a cents-based integer representation to avoid floating-point
//! drift when totals are summed. The menu is priced in a single currency.
//! On the wire (catalog JSON, cart store) a price is a plain decimal number.

use crate::error::ComandaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// Symbol printed in front of amounts.
pub const CURRENCY_SYMBOL: &str = "$";

/// A non-negative monetary amount in cents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(try_from = "f64", into = "f64")]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use comanda_core::money::Money;
    /// let price = Money::from_decimal(85.5).unwrap();
    /// assert_eq!(price.amount_cents, 8550);
    /// ```
    pub fn from_decimal(amount: f64) -> Result<Self, ComandaError> {
        if !amount.is_finite() {
            return Err(ComandaError::InvalidPrice(amount.to_string()));
        }
        if amount < 0.0 {
            return Err(ComandaError::InvalidPrice(format!("{} is negative", amount)));
        }
        let cents = (amount * 100.0).round();
        if cents > i64::MAX as f64 {
            return Err(ComandaError::InvalidPrice(format!("{} is too large", amount)));
        }
        Ok(Self::new(cents as i64))
    }

    /// Zero.
    pub fn zero() -> Self {
        Self::new(0)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Format with symbol and two decimals (e.g., "$95.00").
    pub fn display(&self) -> String {
        format!("{}{}", CURRENCY_SYMBOL, self.display_amount())
    }

    /// Format with exactly two decimals and no symbol (e.g., "95.00").
    pub fn display_amount(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }

    /// Checked addition.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.amount_cents.checked_add(other.amount_cents).map(Money::new)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_add(other.amount_cents))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_sub(other.amount_cents))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl TryFrom<f64> for Money {
    type Error = ComandaError;

    fn try_from(amount: f64) -> Result<Self, Self::Error> {
        Money::from_decimal(amount)
    }
}

impl From<Money> for f64 {
    fn from(m: Money) -> f64 {
        m.to_decimal()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
