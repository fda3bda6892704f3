//! Down-payment ratio value object.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::shared::DomainError;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Fraction of the product price paid up front, in (0, 1].
///
/// Stored normalized so that `0.30` and `0.3` are the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Ratio(Decimal);

impl Ratio {
    /// Create a ratio from a decimal fraction.
    ///
    /// # Errors
    ///
    /// Returns error if the value is not in (0, 1].
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value <= Decimal::ZERO || value > Decimal::ONE {
            return Err(DomainError::invalid(
                "ratio",
                format!("{value} is outside (0, 1]"),
            ));
        }
        Ok(Self(value.normalize()))
    }

    /// Create a ratio from a whole percentage (1..=100).
    ///
    /// # Errors
    ///
    /// Returns error if the percentage is outside 1..=100.
    pub fn from_percent(percent: u32) -> Result<Self, DomainError> {
        if !(1..=100).contains(&percent) {
            return Err(DomainError::invalid(
                "ratio",
                format!("{percent}% is outside 1..=100"),
            ));
        }
        Self::new(Decimal::from(percent) / HUNDRED)
    }

    /// Build a ratio from a literal already known to be in (0, 1].
    pub(crate) const fn literal(value: Decimal) -> Self {
        Self(value)
    }

    /// The fraction as a decimal.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// The fraction expressed as a percentage (0.3 -> 30).
    #[must_use]
    pub fn as_percent(&self) -> Decimal {
        (self.0 * HUNDRED).normalize()
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percent().round())
    }
}

impl FromStr for Ratio {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim())
            .map_err(|e| DomainError::invalid("ratio", format!("'{s}': {e}")))?;
        Self::new(value)
    }
}

impl TryFrom<Decimal> for Ratio {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Ratio> for Decimal {
    fn from(value: Ratio) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn ratio_bounds() {
        assert!(Ratio::new(dec!(0.01)).is_ok());
        assert!(Ratio::new(dec!(1)).is_ok());
        assert!(Ratio::new(dec!(0)).is_err());
        assert!(Ratio::new(dec!(1.01)).is_err());
        assert!(Ratio::new(dec!(-0.3)).is_err());
    }

    #[test]
    fn ratio_is_normalized() {
        let a = Ratio::new(dec!(0.30)).unwrap();
        let b = Ratio::new(dec!(0.3)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.value().to_string(), "0.3");
    }

    #[test]
    fn ratio_from_percent() {
        assert_eq!(Ratio::from_percent(35).unwrap().value(), dec!(0.35));
        assert_eq!(Ratio::from_percent(100).unwrap().value(), dec!(1));
        assert!(Ratio::from_percent(0).is_err());
        assert!(Ratio::from_percent(101).is_err());
    }

    #[test]
    fn ratio_display_is_integer_percent() {
        assert_eq!(Ratio::from_percent(30).unwrap().to_string(), "30%");
        assert_eq!(Ratio::new(dec!(0.255)).unwrap().to_string(), "26%");
    }

    #[test]
    fn ratio_parse() {
        assert_eq!("0.25".parse::<Ratio>().unwrap(), Ratio::from_percent(25).unwrap());
        assert!("abc".parse::<Ratio>().is_err());
        assert!("2".parse::<Ratio>().is_err());
    }

    #[test]
    fn ratio_ordering() {
        let low = Ratio::from_percent(25).unwrap();
        let high = Ratio::from_percent(40).unwrap();
        assert!(low < high);
    }
}
