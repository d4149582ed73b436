//! Currency-agnostic price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),

    /// The amount is above [`Price::MAX`].
    #[error("price cannot exceed {max} (got {0})", max = Price::MAX)]
    TooLarge(Decimal),
}

/// A non-negative unit price.
///
/// The storefront sells in a single currency, so a price is just a decimal
/// amount in the standard unit (e.g. dollars, not cents). Arithmetic is done
/// with [`Decimal`] so totals never accumulate floating-point drift.
///
/// Prices are capped at [`Price::MAX`] so that `price * u32::MAX`, summed
/// over any cart that fits in memory, stays inside `Decimal`'s range.
///
/// # Examples
///
/// ```
/// use gemvault_core::Price;
/// use rust_decimal::Decimal;
///
/// let price = Price::new(Decimal::new(12_500, 0)).unwrap();
/// assert_eq!(price.times(2), Decimal::new(25_000, 0));
/// assert!(Price::new(Decimal::new(-1, 0)).is_err());
/// assert!(Price::new(Decimal::new(1_000_000_001, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest accepted unit price: one billion.
    pub const MAX: Self = Self(Decimal::from_parts(1_000_000_000, 0, 0, false, 0));

    /// Create a price, rejecting negative amounts and amounts above
    /// [`Price::MAX`].
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero and
    /// `PriceError::TooLarge` if it is above the cap.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        if amount > Self::MAX.0 {
            return Err(PriceError::TooLarge(amount));
        }
        Ok(Self(amount))
    }

    /// Returns the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns `self * quantity`.
    ///
    /// Cannot overflow: at most `Price::MAX * u32::MAX`, about 4.3e18.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.0
            .checked_mul(Decimal::from(quantity))
            .unwrap_or(Decimal::MAX)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_valid() {
        assert_eq!(Price::new(Decimal::ZERO).unwrap(), Price::ZERO);
    }

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            Price::new(Decimal::new(-1, 2)),
            Err(PriceError::Negative(_))
        ));
    }

    #[test]
    fn test_times() {
        let price = Price::new(Decimal::new(1999, 2)).unwrap();
        assert_eq!(price.times(3), Decimal::new(5997, 2));
        assert_eq!(price.times(0), Decimal::ZERO);
    }

    #[test]
    fn test_upper_bound() {
        assert_eq!(Price::new(Price::MAX.amount()).unwrap(), Price::MAX);
        assert!(matches!(
            Price::new(Price::MAX.amount() + Decimal::new(1, 2)),
            Err(PriceError::TooLarge(_))
        ));
        assert!(matches!(Price::new(Decimal::MAX), Err(PriceError::TooLarge(_))));
        assert!(serde_json::from_str::<Price>("\"100000000000000000000\"").is_err());
    }

    #[test]
    fn test_times_at_the_cap_is_exact() {
        assert_eq!(
            Price::MAX.times(u32::MAX),
            Decimal::from(1_000_000_000_u64) * Decimal::from(u32::MAX)
        );
    }

    #[test]
    fn test_display() {
        let price = Price::new(Decimal::new(12_500, 0)).unwrap();
        assert_eq!(price.to_string(), "$12500.00");
    }

    #[test]
    fn test_deserialize_accepts_numbers_and_strings() {
        let from_int: Price = serde_json::from_str("12500").unwrap();
        let from_str: Price = serde_json::from_str("\"12500\"").unwrap();
        assert_eq!(from_int, from_str);
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Price>("\"-5\"").is_err());
    }
}
