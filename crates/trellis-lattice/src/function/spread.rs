//! Spread options on two underlyings.

use trellis_core::{OptionType, PricingError, PricingResult};

use super::OptionFunctionProvider2D;

/// European option on the spread `S1 - S2` with payoff
/// `max(ω (S1 - S2 - K), 0)`.
///
/// A zero strike gives the option to exchange the second asset for the
/// first. Negative strikes are allowed.
///
/// # Example
///
/// ```rust
/// use trellis_core::OptionType;
/// use trellis_lattice::function::{EuropeanSpreadOptionFunctionProvider, OptionFunctionProvider2D};
///
/// let call = EuropeanSpreadOptionFunctionProvider::new(5.0, 100, OptionType::Call).unwrap();
/// assert_eq!(call.payoff(110.0, 100.0), 5.0);
/// assert_eq!(call.payoff(100.0, 110.0), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EuropeanSpreadOptionFunctionProvider {
    strike: f64,
    steps: usize,
    option_type: OptionType,
}

impl EuropeanSpreadOptionFunctionProvider {
    /// Creates a spread option provider.
    ///
    /// # Errors
    ///
    /// Fails for a non-finite strike or zero steps.
    pub fn new(strike: f64, steps: usize, option_type: OptionType) -> PricingResult<Self> {
        let provider = Self {
            strike,
            steps,
            option_type,
        };
        provider.validate()?;
        Ok(provider)
    }
}

impl OptionFunctionProvider2D for EuropeanSpreadOptionFunctionProvider {
    fn strike(&self) -> f64 {
        self.strike
    }

    fn steps(&self) -> usize {
        self.steps
    }

    fn option_type(&self) -> OptionType {
        self.option_type
    }

    fn payoff(&self, first: f64, second: f64) -> f64 {
        self.option_type.intrinsic(first - second, self.strike)
    }

    fn validate(&self) -> PricingResult<()> {
        if !self.strike.is_finite() {
            return Err(PricingError::invalid_parameter(
                "strike",
                format!("spread strike must be finite, got {}", self.strike),
            ));
        }
        if self.steps < 1 {
            return Err(PricingError::invalid_parameter(
                "steps",
                "at least one step is required",
            ));
        }
        Ok(())
    }
}
