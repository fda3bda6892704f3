//! Lease period value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::domain::shared::DomainError;

/// Number of installments in a lease, the down payment being installment 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Period(u32);

impl Period {
    /// Periods an operator may configure from the settings panel.
    pub const EDITABLE_RANGE: RangeInclusive<u32> = 1..=36;

    /// Create a period.
    ///
    /// # Errors
    ///
    /// Returns error if `installments` is zero.
    pub fn new(installments: u32) -> Result<Self, DomainError> {
        if installments == 0 {
            return Err(DomainError::invalid("period", "must be at least 1"));
        }
        Ok(Self(installments))
    }

    /// Create a period restricted to [`Self::EDITABLE_RANGE`].
    ///
    /// # Errors
    ///
    /// Returns error if `installments` is outside the editable range.
    pub fn editable(installments: u32) -> Result<Self, DomainError> {
        if !Self::EDITABLE_RANGE.contains(&installments) {
            return Err(DomainError::invalid(
                "period",
                format!(
                    "{installments} is outside {}..={}",
                    Self::EDITABLE_RANGE.start(),
                    Self::EDITABLE_RANGE.end()
                ),
            ));
        }
        Self::new(installments)
    }

    /// Build a period from a non-zero literal.
    pub(crate) const fn literal(installments: u32) -> Self {
        assert!(installments > 0, "period literal must be non-zero");
        Self(installments)
    }

    /// Total installments, including the down payment.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Installments billed after the down payment.
    #[must_use]
    pub const fn billed_installments(&self) -> u32 {
        self.0 - 1
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Period {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let installments = s
            .trim()
            .parse::<u32>()
            .map_err(|e| DomainError::invalid("period", format!("'{s}': {e}")))?;
        Self::new(installments)
    }
}

impl TryFrom<u32> for Period {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Period> for u32 {
    fn from(value: Period) -> Self {
        value.0
    }
}
