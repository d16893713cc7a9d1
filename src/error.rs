//! Error types for the epi-forecast engine.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while preparing series, fitting models or loading
/// configuration.
///
/// Candidate rejections during a grid search are not errors: they are reported
/// through [`crate::selection::Rejection`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Two inputs that must be aligned have different lengths.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Period tags or dates break the fixed-frequency layout.
    #[error("period error: {0}")]
    PeriodError(String),

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// Missing values detected when not allowed.
    #[error("missing values detected in data")]
    MissingValues,

    /// Computation error (e.g., numerical issues).
    #[error("computation error: {0}")]
    ComputationError(String),

    /// Configuration could not be read or failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ForecastError {
    /// Whether this error signals a caller contract violation (mismatched
    /// lengths or empty input) rather than a numerical condition.
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            ForecastError::EmptyData | ForecastError::DimensionMismatch { .. }
        )
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::InvalidConfig(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = ForecastError::EmptyData;
        assert_eq!(err.to_string(), "empty input data");

        let err = ForecastError::InsufficientData { needed: 10, got: 5 };
        assert_eq!(
            err.to_string(),
            "insufficient data: need at least 10, got 5"
        );

        let err = ForecastError::DimensionMismatch {
            expected: 3,
            got: 2,
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 3, got 2");

        let err = ForecastError::InvalidConfig("horizon must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: horizon must be positive"
        );
    }

    #[test]
    fn domain_errors_are_flagged() {
        assert!(ForecastError::EmptyData.is_domain_error());
        assert!(ForecastError::DimensionMismatch {
            expected: 1,
            got: 2
        }
        .is_domain_error());
        assert!(!ForecastError::FitRequired.is_domain_error());
        assert!(!ForecastError::ComputationError("singular".into()).is_domain_error());
    }

    #[test]
    fn json_errors_become_config_errors() {
        let err: ForecastError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, ForecastError::InvalidConfig(_)));
    }
}
