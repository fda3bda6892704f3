//! Quote error types.

use thiserror::Error;

use crate::domain::shared::DomainError;

/// Errors from quote requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// Input rejected before any arithmetic ran.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Offending input field.
        field: String,
        /// Error message.
        message: String,
    },

    /// Arithmetic failed on validated input.
    #[error("Quote computation failed: {message}")]
    Computation {
        /// Error message.
        message: String,
    },
}

impl QuoteError {
    /// Build a validation error.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Build a computation error.
    pub fn computation(message: impl Into<String>) -> Self {
        Self::Computation {
            message: message.into(),
        }
    }

    /// Returns true for input validation failures.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl From<DomainError> for QuoteError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidValue { field, message } => Self::Validation { field, message },
            DomainError::BusinessRuleViolation { rule, message } => Self::Validation {
                field: rule,
                message,
            },
        }
    }
}
