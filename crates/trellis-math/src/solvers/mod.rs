//! Root-finding algorithms.
//!
//! - [`ridder`]: Ridder's method, quadratically convergent on a valid bracket
//! - [`bracket_root`]: outward expansion of an interval until it brackets a root
//!
//! The bond-futures engine locates cheapest-to-deliver switch points with
//! `bracket_root` followed by `ridder`.
//!
//! # Example
//!
//! ```rust
//! use trellis_math::solvers::{bracket_root, ridder, BracketConfig, SolverConfig};
//!
//! let f = |x: f64| x * x * x - 2.0;
//! let (lower, upper) = bracket_root(f, 0.0, 0.1, &BracketConfig::default()).unwrap();
//! let result = ridder(f, lower, upper, &SolverConfig::new(1e-12, 100)).unwrap();
//! assert!((result.root - 2f64.cbrt()).abs() < 1e-10);
//! ```

mod bracket;
mod ridder;

pub use bracket::{bracket_root, BracketConfig};
pub use ridder::ridder;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Absolute tolerance on the root.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding operation.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Function value at the root.
    pub residual: f64,
}
