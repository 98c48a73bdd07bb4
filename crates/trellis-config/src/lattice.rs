//! Lattice engine settings.

use serde::{Deserialize, Serialize};
use trellis_lattice::LatticeSpecification;

use crate::error::{Validate, ValidationError};

/// Which lattice to build and how finely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatticeConfig {
    /// Parameterisation scheme, e.g. `"LEISEN_REIMER"`.
    #[serde(default = "default_specification")]
    pub specification: LatticeSpecification,

    /// Number of time steps.
    #[serde(default = "default_steps")]
    pub steps: usize,
}

fn default_specification() -> LatticeSpecification {
    LatticeSpecification::LeisenReimer
}

fn default_steps() -> usize {
    301
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            specification: default_specification(),
            steps: default_steps(),
        }
    }
}

impl LatticeConfig {
    /// Settings for `specification` with `steps` steps.
    pub fn new(specification: LatticeSpecification, steps: usize) -> Self {
        Self {
            specification,
            steps,
        }
    }

    /// Sets the specification.
    #[must_use]
    pub fn with_specification(mut self, specification: LatticeSpecification) -> Self {
        self.specification = specification;
        self
    }

    /// Sets the number of steps.
    #[must_use]
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }
}

impl Validate for LatticeConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.steps == 0 {
            errors.push(ValidationError::with_rule(
                "steps",
                "At least one step is required",
                "min_steps",
            ));
        }

        if self.specification == LatticeSpecification::LeisenReimer && self.steps % 2 == 0 {
            errors.push(ValidationError::with_rule(
                "steps",
                format!("Leisen-Reimer needs an odd number of steps, got {}", self.steps),
                "odd_steps",
            ));
        }

        errors
    }
}
