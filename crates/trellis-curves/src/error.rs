//! Error types for curve operations.

use thiserror::Error;
use trellis_core::PricingError;
use trellis_math::MathError;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// No curve is registered for the issuer.
    #[error("Curve not found for issuer: {issuer}")]
    CurveNotFound {
        /// The issuer that was looked up.
        issuer: String,
    },

    /// Curve input data is invalid.
    #[error("Invalid curve data: {reason}")]
    InvalidData {
        /// Description of the problem.
        reason: String,
    },

    /// Interpolation failed.
    #[error("Interpolation error: {reason}")]
    InterpolationError {
        /// Description of the interpolation error.
        reason: String,
    },
}

impl CurveError {
    /// Creates an invalid data error.
    #[must_use]
    pub fn invalid_data(reason: impl Into<String>) -> Self {
        Self::InvalidData {
            reason: reason.into(),
        }
    }
}

impl From<MathError> for CurveError {
    fn from(err: MathError) -> Self {
        Self::InterpolationError {
            reason: err.to_string(),
        }
    }
}

impl From<CurveError> for PricingError {
    fn from(err: CurveError) -> Self {
        match err {
            CurveError::CurveNotFound { issuer } => {
                PricingError::invalid_parameter("issuer", format!("no curve for '{issuer}'"))
            }
            CurveError::InvalidData { reason } => PricingError::invalid_parameter("curve", reason),
            CurveError::InterpolationError { reason } => PricingError::numerical_failure(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_mapping() {
        let err: PricingError = CurveError::CurveNotFound {
            issuer: "UST".into(),
        }
        .into();
        assert!(err.is_invalid_parameter());
        assert!(err.to_string().contains("UST"));
    }
}
