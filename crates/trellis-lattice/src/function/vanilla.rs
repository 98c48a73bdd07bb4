//! Vanilla calls and puts.

use trellis_core::{OptionType, PricingResult};

use super::{validate_common, ExerciseStyle, OptionFunctionProvider};

/// Vanilla option with European, American or Bermudan exercise.
///
/// # Example
///
/// ```rust
/// use trellis_core::OptionType;
/// use trellis_lattice::function::{OptionFunctionProvider, VanillaOptionFunctionProvider};
///
/// let put = VanillaOptionFunctionProvider::american(100.0, 301, OptionType::Put).unwrap();
/// assert_eq!(put.payoff(90.0), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VanillaOptionFunctionProvider {
    strike: f64,
    steps: usize,
    option_type: OptionType,
    exercise: ExerciseStyle,
}

impl VanillaOptionFunctionProvider {
    /// Creates a vanilla provider.
    ///
    /// # Errors
    ///
    /// Fails for a non-positive strike, zero steps or Bermudan steps past expiry.
    pub fn new(
        strike: f64,
        steps: usize,
        option_type: OptionType,
        exercise: ExerciseStyle,
    ) -> PricingResult<Self> {
        validate_common(strike, steps, &exercise)?;
        Ok(Self {
            strike,
            steps,
            option_type,
            exercise,
        })
    }

    /// European exercise.
    pub fn european(strike: f64, steps: usize, option_type: OptionType) -> PricingResult<Self> {
        Self::new(strike, steps, option_type, ExerciseStyle::European)
    }

    /// American exercise.
    pub fn american(strike: f64, steps: usize, option_type: OptionType) -> PricingResult<Self> {
        Self::new(strike, steps, option_type, ExerciseStyle::American)
    }

    /// The same option with a different exercise policy.
    #[must_use]
    pub fn with_exercise(&self, exercise: ExerciseStyle) -> Self {
        Self {
            exercise,
            ..self.clone()
        }
    }
}

impl OptionFunctionProvider for VanillaOptionFunctionProvider {
    fn strike(&self) -> f64 {
        self.strike
    }

    fn steps(&self) -> usize {
        self.steps
    }

    fn option_type(&self) -> OptionType {
        self.option_type
    }

    fn exercise(&self) -> &ExerciseStyle {
        &self.exercise
    }

    fn payoff(&self, price: f64) -> f64 {
        self.option_type.intrinsic(price, self.strike)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_value_american() {
        let put = VanillaOptionFunctionProvider::american(100.0, 10, OptionType::Put).unwrap();
        assert_eq!(put.node_value(3, 80.0, 15.0), 20.0);
        assert_eq!(put.node_value(3, 80.0, 25.0), 25.0);
    }

    #[test]
    fn test_node_value_european_ignores_exercise() {
        let put = VanillaOptionFunctionProvider::european(100.0, 10, OptionType::Put).unwrap();
        assert_eq!(put.node_value(3, 80.0, 15.0), 15.0);
        assert_eq!(put.payoff_at_expiry(80.0), 20.0);
    }

    #[test]
    fn test_rejects_bad_strike() {
        assert!(VanillaOptionFunctionProvider::european(0.0, 10, OptionType::Call).is_err());
        assert!(VanillaOptionFunctionProvider::european(100.0, 0, OptionType::Call).is_err());
    }
}
