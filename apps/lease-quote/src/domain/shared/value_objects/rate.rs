//! Financing markup rate value object.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// Markup over the product price as a fraction (0.255 = 25.5%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Rate(Decimal);

impl Rate {
    /// Rate used for any period/ratio pair without a configured entry.
    pub const FALLBACK: Self = Self(Decimal::from_parts(17, 0, 0, false, 2));

    /// Create a rate from a fraction.
    ///
    /// # Errors
    ///
    /// Returns error if the rate is negative.
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::invalid("rate", format!("{value} is negative")));
        }
        Ok(Self(value.normalize()))
    }

    /// Create a rate from a percentage (25.5 -> 0.255).
    ///
    /// # Errors
    ///
    /// Returns error if the percentage is negative.
    pub fn from_percent(percent: Decimal) -> Result<Self, DomainError> {
        Self::new(percent / Decimal::ONE_HUNDRED)
    }

    /// Build a rate from a non-negative literal.
    pub(crate) const fn literal(value: Decimal) -> Self {
        Self(value)
    }

    /// The rate as a fraction.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// The rate as a percentage (0.255 -> 25.5).
    #[must_use]
    pub fn as_percent(&self) -> Decimal {
        (self.0 * Decimal::ONE_HUNDRED).normalize()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}%",
            self.as_percent()
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        )
    }
}

impl TryFrom<Decimal> for Rate {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rate> for Decimal {
    fn from(value: Rate) -> Self {
        value.0
    }
}
