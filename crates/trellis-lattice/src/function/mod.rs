//! Option function providers.
//!
//! A provider decides what an option is worth at a node: the payoff at
//! expiry and, at earlier nodes, how the continuation value combines with
//! early exercise or path conditions. The engine only talks to the
//! [`OptionFunctionProvider`] trait, so new payoffs plug in without
//! touching backward induction. Options on two underlyings implement
//! [`OptionFunctionProvider2D`] instead.

mod barrier;
mod digital;
mod spread;
mod vanilla;

pub use barrier::{knock_in_price, BarrierOptionFunctionProvider, BarrierType};
pub use digital::DigitalOptionFunctionProvider;
pub use spread::EuropeanSpreadOptionFunctionProvider;
pub use vanilla::VanillaOptionFunctionProvider;

use trellis_core::error::ensure_positive;
use trellis_core::{OptionType, PricingError, PricingResult};

/// When the holder may exercise.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExerciseStyle {
    /// Only at expiry.
    #[default]
    European,
    /// At every node.
    American,
    /// At expiry and on the listed time steps.
    Bermudan(Vec<usize>),
}

impl ExerciseStyle {
    /// True when exercise is allowed on `step` before expiry.
    pub fn can_exercise(&self, step: usize) -> bool {
        match self {
            ExerciseStyle::European => false,
            ExerciseStyle::American => true,
            ExerciseStyle::Bermudan(steps) => steps.contains(&step),
        }
    }

    /// True for [`ExerciseStyle::European`].
    pub fn is_european(&self) -> bool {
        matches!(self, ExerciseStyle::European)
    }
}

/// Payoff and exercise policy applied by the lattice engine.
///
/// Implementations are immutable and shared freely between threads.
pub trait OptionFunctionProvider: Send + Sync {
    /// Option strike.
    fn strike(&self) -> f64;

    /// Number of lattice steps to expiry.
    fn steps(&self) -> usize;

    /// Call or put.
    fn option_type(&self) -> OptionType;

    /// Exercise policy.
    fn exercise(&self) -> &ExerciseStyle;

    /// Value of exercising at an underlying price.
    fn payoff(&self, price: f64) -> f64;

    /// Value at an expiry node.
    fn payoff_at_expiry(&self, price: f64) -> f64 {
        self.payoff(price)
    }

    /// Value at an interior node given the discounted continuation value.
    fn node_value(&self, step: usize, price: f64, continuation: f64) -> f64 {
        if self.exercise().can_exercise(step) {
            continuation.max(self.payoff(price))
        } else {
            continuation
        }
    }

    /// Checks the provider's own parameters.
    fn validate(&self) -> PricingResult<()> {
        validate_common(self.strike(), self.steps(), self.exercise())
    }
}

/// Payoff applied by the two-asset lattice.
pub trait OptionFunctionProvider2D: Send + Sync {
    /// Option strike.
    fn strike(&self) -> f64;

    /// Number of lattice steps to expiry.
    fn steps(&self) -> usize;

    /// Call or put.
    fn option_type(&self) -> OptionType;

    /// Value at an expiry node with underlying prices `first` and `second`.
    fn payoff(&self, first: f64, second: f64) -> f64;

    /// Value at an interior node given the discounted continuation value.
    fn node_value(&self, _step: usize, _first: f64, _second: f64, continuation: f64) -> f64 {
        continuation
    }

    /// Checks the provider's own parameters.
    fn validate(&self) -> PricingResult<()>;
}

pub(crate) fn validate_common(
    strike: f64,
    steps: usize,
    exercise: &ExerciseStyle,
) -> PricingResult<()> {
    ensure_positive("strike", strike)?;
    if steps < 1 {
        return Err(PricingError::invalid_parameter(
            "steps",
            "at least one step is required",
        ));
    }
    if let ExerciseStyle::Bermudan(dates) = exercise {
        if let Some(&bad) = dates.iter().find(|&&s| s > steps) {
            return Err(PricingError::invalid_parameter(
                "exercise",
                format!("Bermudan exercise step {bad} beyond expiry step {steps}"),
            ));
        }
    }
    Ok(())
}
