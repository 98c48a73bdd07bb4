//! Error taxonomy shared by the pricing engines.
//!
//! Three kinds of failure are kept apart so callers can react differently:
//! a bad input is never retried, while a numerical failure may succeed with
//! a different grid density or step count.

use thiserror::Error;
use trellis_math::MathError;

/// A specialized Result type for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;

/// Errors surfaced by the pricing engines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// An input is outside its admissible domain.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Name of the offending input.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A numerical routine could not produce a result.
    #[error("Numerical failure: {reason}")]
    NumericalFailure {
        /// Description of the failure.
        reason: String,
    },

    /// The requested combination of inputs is not handled.
    #[error("Unsupported: {what}")]
    Unsupported {
        /// Description of the unsupported combination.
        what: String,
    },
}

impl PricingError {
    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a numerical failure error.
    #[must_use]
    pub fn numerical_failure(reason: impl Into<String>) -> Self {
        Self::NumericalFailure {
            reason: reason.into(),
        }
    }

    /// Creates an unsupported combination error.
    #[must_use]
    pub fn unsupported(what: impl Into<String>) -> Self {
        Self::Unsupported { what: what.into() }
    }

    /// Returns true for [`PricingError::InvalidParameter`].
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    /// Returns true for [`PricingError::NumericalFailure`].
    pub fn is_numerical_failure(&self) -> bool {
        matches!(self, Self::NumericalFailure { .. })
    }
}

impl From<MathError> for PricingError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InvalidInput { reason } => Self::invalid_parameter("input", reason),
            other => Self::numerical_failure(other.to_string()),
        }
    }
}

/// Fails with [`PricingError::InvalidParameter`] unless `value > 0`.
pub fn ensure_positive(name: &str, value: f64) -> PricingResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid_parameter(
            name,
            format!("must be positive, got {value}"),
        ))
    }
}

/// Fails with [`PricingError::InvalidParameter`] unless `value >= 0`.
pub fn ensure_non_negative(name: &str, value: f64) -> PricingResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid_parameter(
            name,
            format!("must be non-negative, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PricingError::invalid_parameter("strike", "must be positive, got -1");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'strike': must be positive, got -1"
        );
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_math_error_conversion() {
        let err: PricingError = MathError::convergence_failed(50, 1e-3).into();
        assert!(err.is_numerical_failure());

        let err: PricingError = MathError::invalid_input("bad").into();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_ensure_helpers() {
        assert!(ensure_positive("spot", 100.0).is_ok());
        assert!(ensure_positive("spot", 0.0).is_err());
        assert!(ensure_positive("spot", f64::NAN).is_err());
        assert!(ensure_non_negative("volatility", 0.0).is_ok());
        assert!(ensure_non_negative("volatility", -0.1).is_err());
    }
}
