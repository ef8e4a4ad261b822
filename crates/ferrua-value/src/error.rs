//! Error types for the value layer.
//!
//! Self-contained: every fallible operation in this crate returns
//! [`ValueError`] through the [`ValueResult`] alias. Nothing here panics or
//! aborts; allocation-ceiling and invalid-state conditions are ordinary
//! recoverable outcomes the caller (typically the encoder or session layer)
//! handles by failing the in-progress message.

use thiserror::Error;

/// Errors produced by value lifecycle operations.
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum ValueError {
    /// A type-erased operation was handed a value of the wrong type.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// An argument was structurally unusable for the requested operation.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// A configured size ceiling was exceeded.
    ///
    /// This is the recoverable face of allocation failure: array lengths
    /// decoded from untrusted input are bounded before anything is
    /// allocated.
    #[error("{limit} exceeded: {actual} > {max}")]
    LimitExceeded {
        limit: &'static str,
        max: usize,
        actual: usize,
    },

    /// The operation is not defined for this type or state, e.g. copying
    /// into a datasource-backed variant, or any fallible operation on the
    /// invalid-type sentinel.
    #[error("invalid value: {reason}")]
    InvalidValue { reason: String },

    /// A datasource `read` reported failure.
    #[error("datasource read failed: {reason}")]
    DatasourceFailure { reason: String },
}

impl ValueError {
    /// Create a type mismatch error.
    pub fn type_mismatch(expected: &'static str, actual: &'static str) -> Self {
        Self::TypeMismatch { expected, actual }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Create a limit exceeded error.
    pub fn limit_exceeded(limit: &'static str, max: usize, actual: usize) -> Self {
        Self::LimitExceeded { limit, max, actual }
    }

    /// Create an invalid value error.
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    /// Create a datasource failure error.
    pub fn datasource_failure(reason: impl Into<String>) -> Self {
        Self::DatasourceFailure {
            reason: reason.into(),
        }
    }

    /// Stable error code for monitoring and log correlation.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "VALUE_TYPE_MISMATCH",
            Self::InvalidArgument { .. } => "VALUE_INVALID_ARGUMENT",
            Self::LimitExceeded { .. } => "VALUE_LIMIT_EXCEEDED",
            Self::InvalidValue { .. } => "VALUE_INVALID_VALUE",
            Self::DatasourceFailure { .. } => "VALUE_DATASOURCE_FAILURE",
        }
    }

    /// Whether the error stems from malformed or oversized input rather
    /// than from the state of the destination value.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::TypeMismatch { .. } | Self::InvalidArgument { .. } | Self::LimitExceeded { .. }
        )
    }
}

/// Result type alias for value operations.
pub type ValueResult<T> = std::result::Result<T, ValueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(
            ValueError::type_mismatch("String", "Int32").code(),
            "VALUE_TYPE_MISMATCH"
        );
        assert_eq!(
            ValueError::limit_exceeded("max_array_length", 10, 20).code(),
            "VALUE_LIMIT_EXCEEDED"
        );
    }

    #[test]
    fn limit_exceeded_reports_both_sides() {
        let err = ValueError::limit_exceeded("max_array_length", 1024, 4096);
        let msg = err.to_string();
        assert!(msg.contains("1024"));
        assert!(msg.contains("4096"));
    }

    #[test]
    fn input_error_classification() {
        assert!(ValueError::type_mismatch("Guid", "Boolean").is_input_error());
        assert!(!ValueError::invalid_value("copy into datasource variant").is_input_error());
    }
}
