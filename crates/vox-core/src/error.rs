//! Shared validation errors for domain-primitive newtypes.

/// Errors from constructing a domain-primitive newtype out of raw input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The input was empty where a non-empty value is required.
    #[error("{field} must not be empty")]
    Empty {
        /// Name of the field or type being constructed.
        field: &'static str,
    },

    /// The input contained characters outside the allowed set.
    #[error("invalid {field}: {reason}")]
    InvalidFormat {
        /// Name of the field or type being constructed.
        field: &'static str,
        /// Description of the format violation.
        reason: String,
    },

    /// The input length is outside the allowed range.
    #[error("invalid {field} length {actual} (expected {expected})")]
    InvalidLength {
        /// Name of the field or type being constructed.
        field: &'static str,
        /// Human-readable description of the expected length.
        expected: &'static str,
        /// The observed length.
        actual: usize,
    },
}
