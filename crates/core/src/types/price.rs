//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are non-negative amounts in dollars, held as [`Decimal`] so that
//! line totals and subtotals never pick up binary floating point drift.
//! Display always uses a fixed `$` prefix and exactly two decimal places,
//! independent of locale.
//!
//! The stored cart encodes prices as JSON numbers (`10.5`, not `"10.50"`),
//! which is the format carts were persisted in before this crate existed.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Currency symbol prefixed to every displayed amount.
pub const CURRENCY_SYMBOL: &str = "$";

/// Largest accepted price in whole dollars.
///
/// Keeps `price × u32::MAX` and sums of many lines far inside [`Decimal`]'s
/// range.
pub const MAX_PRICE_DOLLARS: i64 = 1_000_000_000;

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty or whitespace.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price is not a number: {0:?}")]
    Invalid(String),
    /// The input is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The input is above [`MAX_PRICE_DOLLARS`].
    #[error("price cannot exceed ${}", MAX_PRICE_DOLLARS)]
    TooLarge,
}

/// A non-negative price, rounded to cents.
///
/// ## Examples
///
/// ```
/// use weilglass_core::Price;
///
/// let price = Price::parse("10.5").unwrap();
/// assert_eq!(price.to_string(), "$10.50");
///
/// assert!(Price::parse("ten").is_err());
/// assert!(Price::parse("-1").is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Parse a price from a string attribute such as `"10.00"`.
    ///
    /// Amounts with more than two decimal places are rounded half away from
    /// zero to the nearest cent.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is not a decimal number
    /// - Is negative
    /// - Exceeds [`MAX_PRICE_DOLLARS`]
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount =
            Decimal::from_str(trimmed).map_err(|_| PriceError::Invalid(trimmed.to_owned()))?;

        Self::from_decimal(amount)
    }

    /// Create a price from a decimal amount in dollars.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero, or
    /// [`PriceError::TooLarge`] if it exceeds [`MAX_PRICE_DOLLARS`].
    pub fn from_decimal(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        if amount > Decimal::from(MAX_PRICE_DOLLARS) {
            return Err(PriceError::TooLarge);
        }
        let mut cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        cents.rescale(2);
        Ok(Self(cents))
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// The amount in dollars, always at a scale of two decimal places for
    /// parsed prices.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CURRENCY_SYMBOL}{:.2}", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Totals saturate at `Decimal::MAX` rather than panic.
impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
