//! Domain errors for the lease quote calculator.

use std::fmt;

/// Domain-level errors that can occur in business logic.
///
/// These errors are independent of infrastructure concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid value for a field.
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },

    /// Business rule violation.
    BusinessRuleViolation {
        /// Rule name or code.
        rule: String,
        /// Description of the violation.
        message: String,
    },
}

impl DomainError {
    /// Shorthand for an [`DomainError::InvalidValue`].
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`DomainError::BusinessRuleViolation`].
    pub fn rule(rule: &str, message: impl Into<String>) -> Self {
        Self::BusinessRuleViolation {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
            Self::BusinessRuleViolation { rule, message } => {
                write!(f, "Business rule '{rule}' violated: {message}")
            }
        }
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_invalid_value_display() {
        let err = DomainError::invalid("ratio", "must be in (0, 1]");
        let msg = format!("{err}");
        assert!(msg.contains("ratio"));
        assert!(msg.contains("(0, 1]"));
    }

    #[test]
    fn domain_error_business_rule_display() {
        let err = DomainError::rule("NON_EMPTY_RATIOS", "at least one ratio is required");
        let msg = format!("{err}");
        assert!(msg.contains("NON_EMPTY_RATIOS"));
        assert!(msg.contains("at least one ratio"));
    }

    #[test]
    fn domain_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(DomainError::invalid("test", "test"));
        assert!(!err.to_string().is_empty());
    }
}
