//! Error types for the verification layer.

use formula_core::types::FormulaError;
use thiserror::Error;

/// Verification configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    #[error("Failed to parse verification config: {0}")]
    Parse(String),

    /// A finite-difference step is zero, negative or non-finite.
    #[error("Invalid step {name} = {value}. Must be finite and strictly positive")]
    InvalidStep {
        /// Field name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// A tolerance is zero, negative or non-finite.
    #[error("Invalid tolerance {name} = {value}. Must be finite and strictly positive")]
    InvalidTolerance {
        /// Field name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}

/// Errors raised while running a finite-difference verification.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VerificationError {
    /// The configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A bumped input fell outside the valid domain.
    #[error("Bumped input rejected: {0}")]
    Bump(#[from] FormulaError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidStep {
            name: "forward_step",
            value: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid step forward_step = 0. Must be finite and strictly positive"
        );

        let err = ConfigError::Parse("expected a number".to_string());
        assert!(err.to_string().contains("expected a number"));
    }

    #[test]
    fn test_verification_error_from_conversions() {
        let config_err = ConfigError::InvalidTolerance {
            name: "first_order_tolerance",
            value: -1.0,
        };
        let err: VerificationError = config_err.clone().into();
        assert_eq!(err, VerificationError::Config(config_err));
        assert!(err.to_string().starts_with("Invalid tolerance"));

        let formula_err = FormulaError::LengthMismatch {
            expected: 3,
            actual: 2,
        };
        let err: VerificationError = formula_err.into();
        assert!(matches!(err, VerificationError::Bump(_)));
    }
}
