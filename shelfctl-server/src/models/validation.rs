//! Validation error types

use thiserror::Error;

/// Validation error for form input and cover selectors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Required field is missing or blank
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Field exceeds maximum length
    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Value could not be parsed into the field's type
    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Value is not one of the allowed variants
    #[error("invalid {field} value: '{value}'")]
    InvalidVariant { field: &'static str, value: String },
}
