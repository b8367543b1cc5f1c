//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are dollar amounts such as `9.99`. Storing them as
//! [`Decimal`] keeps line totals and subtotals exact; formatting rounds half
//! away from zero to cents.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("price {0:?} is not a number")]
    NotANumber(String),
    /// The input is a negative amount.
    #[error("price {0:?} is negative")]
    Negative(String),
}

/// A non-negative price in dollars.
///
/// # Examples
///
/// ```
/// use moodshop_core::Price;
///
/// let mug = Price::parse("9.99").unwrap();
/// assert_eq!(mug.display(), "$9.99");
/// assert_eq!(mug.times(3).display(), "$29.97");
///
/// assert!(Price::parse("free").is_err());
/// assert!(Price::parse("-1").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount.to_string()));
        }
        Ok(Self(amount))
    }

    /// Parse a price from catalog text such as `"12.50"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a decimal number or is negative.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount =
            Decimal::from_str(s.trim()).map_err(|_| PriceError::NotANumber(s.to_owned()))?;
        Self::new(amount)
    }

    /// The price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Format for display (e.g., `"$19.99"`).
    #[must_use]
    pub fn display(&self) -> String {
        let cents = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("${cents:.2}")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(Price::parse("9.99").unwrap().display(), "$9.99");
        assert_eq!(Price::parse(" 12 ").unwrap().display(), "$12.00");
        assert_eq!(Price::parse("0").unwrap(), Price::ZERO);
    }

    #[test]
    fn test_parse_not_a_number() {
        assert!(matches!(Price::parse(""), Err(PriceError::NotANumber(_))));
        assert!(matches!(
            Price::parse("twelve"),
            Err(PriceError::NotANumber(_))
        ));
    }

    #[test]
    fn test_parse_negative() {
        assert!(matches!(Price::parse("-0.01"), Err(PriceError::Negative(_))));
    }

    #[test]
    fn test_display_rounds_half_up() {
        assert_eq!(Price::parse("2.005").unwrap().display(), "$2.01");
        assert_eq!(Price::parse("2.004").unwrap().display(), "$2.00");
    }

    #[test]
    fn test_sum_is_exact() {
        let total: Price = [
            Price::parse("0.10").unwrap(),
            Price::parse("0.20").unwrap().times(2),
        ]
        .into_iter()
        .sum();
        assert_eq!(total, Price::parse("0.50").unwrap());
    }
}
