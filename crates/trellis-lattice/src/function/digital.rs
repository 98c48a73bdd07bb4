//! Cash-or-nothing digital options.

use trellis_core::error::ensure_non_negative;
use trellis_core::{OptionType, PricingResult};

use super::{validate_common, ExerciseStyle, OptionFunctionProvider};

/// Pays a fixed cash amount when the option finishes in the money.
#[derive(Debug, Clone, PartialEq)]
pub struct DigitalOptionFunctionProvider {
    strike: f64,
    steps: usize,
    option_type: OptionType,
    exercise: ExerciseStyle,
    cash: f64,
}

impl DigitalOptionFunctionProvider {
    /// Creates a cash-or-nothing provider.
    pub fn new(
        strike: f64,
        steps: usize,
        option_type: OptionType,
        exercise: ExerciseStyle,
        cash: f64,
    ) -> PricingResult<Self> {
        validate_common(strike, steps, &exercise)?;
        ensure_non_negative("cash", cash)?;
        Ok(Self {
            strike,
            steps,
            option_type,
            exercise,
            cash,
        })
    }

    /// Cash paid in the money.
    pub fn cash(&self) -> f64 {
        self.cash
    }
}

impl OptionFunctionProvider for DigitalOptionFunctionProvider {
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
        if self.option_type.sign() * (price - self.strike) > 0.0 {
            self.cash
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digital_payoff() {
        let call =
            DigitalOptionFunctionProvider::new(100.0, 5, OptionType::Call, ExerciseStyle::European, 10.0)
                .unwrap();
        assert_eq!(call.payoff(100.0), 0.0);
        assert_eq!(call.payoff(100.01), 10.0);
        assert!(
            DigitalOptionFunctionProvider::new(100.0, 5, OptionType::Put, ExerciseStyle::European, -1.0)
                .is_err()
        );
    }
}
