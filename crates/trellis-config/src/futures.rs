//! Bond futures engine settings.

use serde::{Deserialize, Serialize};
use trellis_futures::method::MIN_NB_POINTS;
use trellis_futures::BondFuturesHullWhiteMethod;

use crate::error::{Validate, ValidationError};

/// Numerical settings of the Hull-White bond futures method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuturesConfig {
    /// Number of integration points.
    #[serde(default = "default_nb_points")]
    pub nb_points: usize,

    /// Absolute accuracy of the crossing points.
    #[serde(default = "default_root_accuracy")]
    pub root_accuracy: f64,

    /// Growth ratio when widening a crossing bracket.
    #[serde(default = "default_bracket_ratio")]
    pub bracket_ratio: f64,

    /// Maximum number of bracket expansions.
    #[serde(default = "default_bracket_max_tries")]
    pub bracket_max_tries: u32,

    /// Half width of the first bracket around a grid crossing.
    #[serde(default = "default_bracket_half_width")]
    pub bracket_half_width: f64,
}

fn default_nb_points() -> usize {
    81
}

fn default_root_accuracy() -> f64 {
    1e-8
}

fn default_bracket_ratio() -> f64 {
    1.6
}

fn default_bracket_max_tries() -> u32 {
    50
}

fn default_bracket_half_width() -> f64 {
    0.01
}

impl Default for FuturesConfig {
    fn default() -> Self {
        Self {
            nb_points: default_nb_points(),
            root_accuracy: default_root_accuracy(),
            bracket_ratio: default_bracket_ratio(),
            bracket_max_tries: default_bracket_max_tries(),
            bracket_half_width: default_bracket_half_width(),
        }
    }
}

impl FuturesConfig {
    /// Sets the number of integration points.
    #[must_use]
    pub fn with_nb_points(mut self, nb_points: usize) -> Self {
        self.nb_points = nb_points;
        self
    }

    /// Sets the crossing accuracy.
    #[must_use]
    pub fn with_root_accuracy(mut self, accuracy: f64) -> Self {
        self.root_accuracy = accuracy;
        self
    }

    /// The method these settings describe.
    pub fn method(&self) -> BondFuturesHullWhiteMethod {
        BondFuturesHullWhiteMethod::new()
            .with_nb_points(self.nb_points)
            .with_root_accuracy(self.root_accuracy)
            .with_bracket(self.bracket_ratio, self.bracket_max_tries)
            .with_bracket_half_width(self.bracket_half_width)
    }
}

impl Validate for FuturesConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.nb_points < MIN_NB_POINTS {
            errors.push(ValidationError::with_rule(
                "nb_points",
                format!(
                    "At least {MIN_NB_POINTS} integration points are required, got {}",
                    self.nb_points
                ),
                "min_points",
            ));
        }

        if self.root_accuracy.is_nan() || self.root_accuracy <= 0.0 || self.root_accuracy > 1e-2 {
            errors.push(ValidationError::with_rule(
                "root_accuracy",
                "Root accuracy must be between 0 and 1e-2",
                "valid_tolerance",
            ));
        }

        if self.bracket_ratio.is_nan() || self.bracket_ratio <= 1.0 {
            errors.push(ValidationError::with_rule(
                "bracket_ratio",
                "Bracket ratio must exceed 1",
                "expanding_bracket",
            ));
        }

        if self.bracket_max_tries == 0 {
            errors.push(ValidationError::new(
                "bracket_max_tries",
                "At least one bracket expansion is required",
            ));
        }

        if self.bracket_half_width.is_nan() || self.bracket_half_width <= 0.0 {
            errors.push(ValidationError::new(
                "bracket_half_width",
                "Bracket half width must be positive",
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_method() {
        let config = FuturesConfig::default();
        assert!(config.is_valid());
        assert_eq!(config.method().nb_points(), 81);
    }

    #[test]
    fn test_validation_collects_every_problem() {
        let config = FuturesConfig {
            nb_points: 1,
            root_accuracy: 0.0,
            bracket_ratio: 1.0,
            bracket_max_tries: 0,
            bracket_half_width: -0.01,
        };
        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "nb_points",
                "root_accuracy",
                "bracket_ratio",
                "bracket_max_tries",
                "bracket_half_width"
            ]
        );
    }

    #[test]
    fn test_nan_accuracy_rejected() {
        assert!(!FuturesConfig::default().with_root_accuracy(f64::NAN).is_valid());
    }
}
