//! Error types for the startup outcome predictor

use thiserror::Error;

/// Result type alias for predictor operations
pub type Result<T> = std::result::Result<T, PredictorError>;

/// Main error type for the inference pipeline
#[derive(Error, Debug)]
pub enum PredictorError {
    /// An artifact is missing, unreadable, or inconsistent with the others.
    /// Fatal at startup.
    #[error("Failed to load artifact '{artifact}': {reason}")]
    ArtifactLoad { artifact: String, reason: String },

    #[error("Unknown category for {field}: {value}")]
    UnknownCategory { field: String, value: i64 },

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Model contract violation: classifier returned {0}, expected 0 or 1")]
    ModelContractViolation(f64),

    #[error("Error loading categories: {0}")]
    MetadataUnavailable(String),

    #[error("Documentation error: {0}")]
    Documentation(String),
}

impl PredictorError {
    pub(crate) fn artifact(artifact: impl Into<String>, reason: impl ToString) -> Self {
        PredictorError::ArtifactLoad {
            artifact: artifact.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error was caused by the caller's input rather than the
    /// service's own state.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PredictorError::UnknownCategory { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_message() {
        let err = PredictorError::UnknownCategory {
            field: "category_code".to_string(),
            value: 999,
        };
        assert_eq!(err.to_string(), "Unknown category for category_code: 999");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_operational_errors_are_not_client_errors() {
        assert!(!PredictorError::SchemaMismatch("x".into()).is_client_error());
        assert!(!PredictorError::ModelContractViolation(2.0).is_client_error());
        assert!(!PredictorError::artifact("model.json", "missing").is_client_error());
    }
}
