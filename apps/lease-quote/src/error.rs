//! Error categories for the lease calculator.
//!
//! Every failure the calculator can meet falls into one of four categories.
//! Each category has a stable reason string for logs and a message fit to
//! show the person at the counter.
//!
//! | Code | Recovery |
//! |------|----------|
//! | `VALIDATION` | Field-level message, nothing computed |
//! | `CONFIG_PARSE` | Silent, affected field uses its default |
//! | `PERSISTENCE` | Silent, in-memory settings stay live |
//! | `COMPUTATION` | Generic retry prompt, details logged |

use serde::{Deserialize, Serialize};

use crate::application::dto::ConfigParseError;
use crate::application::ports::StoreError;
use crate::domain::quoting::QuoteError;
use crate::domain::shared::DomainError;

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input rejected before computing.
    Validation,
    /// Stored settings unusable.
    ConfigParse,
    /// Settings could not be written.
    Persistence,
    /// Arithmetic failed on valid input.
    Computation,
}

impl ErrorCode {
    /// Get the error reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION",
            Self::ConfigParse => "CONFIG_PARSE",
            Self::Persistence => "PERSISTENCE",
            Self::Computation => "COMPUTATION",
        }
    }

    /// Message for the person using the calculator.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Validation => "Please enter a valid price and choose an offered plan",
            Self::ConfigParse => "Saved settings could not be read; defaults are in use",
            Self::Persistence => "Settings could not be saved; they apply until restart",
            Self::Computation => "Calculation failed, please try again",
        }
    }

    /// Returns true if the caller is expected to carry on without telling the user.
    #[must_use]
    pub const fn is_silent(&self) -> bool {
        matches!(self, Self::ConfigParse | Self::Persistence)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

impl From<&QuoteError> for ErrorCode {
    fn from(error: &QuoteError) -> Self {
        match error {
            QuoteError::Validation { .. } => Self::Validation,
            QuoteError::Computation { .. } => Self::Computation,
        }
    }
}

impl From<&DomainError> for ErrorCode {
    fn from(_: &DomainError) -> Self {
        Self::Validation
    }
}

impl From<&ConfigParseError> for ErrorCode {
    fn from(_: &ConfigParseError) -> Self {
        Self::ConfigParse
    }
}

impl From<&StoreError> for ErrorCode {
    fn from(error: &StoreError) -> Self {
        match error {
            StoreError::Corrupt(_) => Self::ConfigParse,
            StoreError::QuotaExceeded { .. } | StoreError::Io(_) => Self::Persistence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_errors_map_by_kind() {
        let validation = QuoteError::validation("price", "bad");
        let computation = QuoteError::computation("overflow");
        assert_eq!(ErrorCode::from(&validation), ErrorCode::Validation);
        assert_eq!(ErrorCode::from(&computation), ErrorCode::Computation);
    }

    #[test]
    fn test_store_errors_map_by_kind() {
        let quota = StoreError::QuotaExceeded {
            key: "interestRates".to_string(),
        };
        assert_eq!(ErrorCode::from(&quota), ErrorCode::Persistence);
        assert_eq!(
            ErrorCode::from(&StoreError::Corrupt("x".to_string())),
            ErrorCode::ConfigParse
        );
    }

    #[test]
    fn test_only_storage_categories_are_silent() {
        assert!(ErrorCode::ConfigParse.is_silent());
        assert!(ErrorCode::Persistence.is_silent());
        assert!(!ErrorCode::Validation.is_silent());
        assert!(!ErrorCode::Computation.is_silent());
    }

    #[test]
    fn test_reason_serialization() {
        let json = serde_json::to_string(&ErrorCode::ConfigParse).unwrap();
        assert_eq!(json, "\"CONFIG_PARSE\"");
        assert_eq!(ErrorCode::Computation.to_string(), "COMPUTATION");
    }
}
