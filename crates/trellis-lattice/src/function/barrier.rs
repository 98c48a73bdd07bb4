//! Single-barrier knock-out options monitored at lattice nodes.

use trellis_core::error::{ensure_non_negative, ensure_positive};
use trellis_core::{OptionType, PricingError, PricingResult};

use super::{validate_common, ExerciseStyle, OptionFunctionProvider, VanillaOptionFunctionProvider};
use crate::dividend::DividendFunctionProvider;
use crate::engine::{self, LatticeMarket};
use crate::specification::LatticeSpecification;

/// Side of the barrier that extinguishes the option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierType {
    /// Dies when the underlying falls to or below the barrier.
    DownAndOut,
    /// Dies when the underlying rises to or above the barrier.
    UpAndOut,
}

/// Knock-out option: vanilla payoff unless a node touches the barrier,
/// in which case the rebate is paid.
#[derive(Debug, Clone, PartialEq)]
pub struct BarrierOptionFunctionProvider {
    vanilla: VanillaOptionFunctionProvider,
    barrier: f64,
    barrier_type: BarrierType,
    rebate: f64,
}

impl BarrierOptionFunctionProvider {
    /// Creates a knock-out provider with zero rebate.
    ///
    /// # Errors
    ///
    /// Fails for a non-positive strike or barrier and for zero steps.
    pub fn new(
        strike: f64,
        steps: usize,
        option_type: OptionType,
        exercise: ExerciseStyle,
        barrier: f64,
        barrier_type: BarrierType,
    ) -> PricingResult<Self> {
        ensure_positive("barrier", barrier)?;
        Ok(Self {
            vanilla: VanillaOptionFunctionProvider::new(strike, steps, option_type, exercise)?,
            barrier,
            barrier_type,
            rebate: 0.0,
        })
    }

    /// Sets the rebate paid when the barrier is touched.
    pub fn with_rebate(mut self, rebate: f64) -> PricingResult<Self> {
        ensure_non_negative("rebate", rebate)?;
        self.rebate = rebate;
        Ok(self)
    }

    /// Barrier level.
    pub fn barrier(&self) -> f64 {
        self.barrier
    }

    /// Barrier side.
    pub fn barrier_type(&self) -> BarrierType {
        self.barrier_type
    }

    /// The option without the barrier.
    pub fn vanilla(&self) -> &VanillaOptionFunctionProvider {
        &self.vanilla
    }

    fn is_knocked_out(&self, price: f64) -> bool {
        match self.barrier_type {
            BarrierType::DownAndOut => price <= self.barrier,
            BarrierType::UpAndOut => price >= self.barrier,
        }
    }
}

impl OptionFunctionProvider for BarrierOptionFunctionProvider {
    fn strike(&self) -> f64 {
        self.vanilla.strike()
    }

    fn steps(&self) -> usize {
        self.vanilla.steps()
    }

    fn option_type(&self) -> OptionType {
        self.vanilla.option_type()
    }

    fn exercise(&self) -> &ExerciseStyle {
        self.vanilla.exercise()
    }

    fn payoff(&self, price: f64) -> f64 {
        self.vanilla.payoff(price)
    }

    fn payoff_at_expiry(&self, price: f64) -> f64 {
        if self.is_knocked_out(price) {
            self.rebate
        } else {
            self.payoff(price)
        }
    }

    fn node_value(&self, step: usize, price: f64, continuation: f64) -> f64 {
        if self.is_knocked_out(price) {
            self.rebate
        } else {
            self.vanilla.node_value(step, price, continuation)
        }
    }

    fn validate(&self) -> PricingResult<()> {
        validate_common(self.strike(), self.steps(), self.exercise())?;
        ensure_positive("barrier", self.barrier)
    }
}

/// Price of the knock-in twin of a European knock-out with zero rebate,
/// from in/out parity: `knock-in = vanilla - knock-out`.
///
/// # Errors
///
/// Returns [`PricingError::Unsupported`] for non-European exercise or a
/// non-zero rebate, where parity does not hold.
pub fn knock_in_price(
    specification: &LatticeSpecification,
    knock_out: &BarrierOptionFunctionProvider,
    market: &LatticeMarket,
    dividends: Option<&DividendFunctionProvider>,
) -> PricingResult<f64> {
    if !knock_out.exercise().is_european() || knock_out.rebate != 0.0 {
        return Err(PricingError::unsupported(
            "knock-in parity needs a European knock-out without rebate",
        ));
    }
    let vanilla = engine::price_with_dividends(specification, knock_out.vanilla(), market, dividends)?;
    let out = engine::price_with_dividends(specification, knock_out, market, dividends)?;
    Ok(vanilla - out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knocked_out_nodes_pay_rebate() {
        let provider = BarrierOptionFunctionProvider::new(
            100.0,
            10,
            OptionType::Call,
            ExerciseStyle::American,
            90.0,
            BarrierType::DownAndOut,
        )
        .unwrap()
        .with_rebate(1.5)
        .unwrap();

        assert_eq!(provider.payoff_at_expiry(85.0), 1.5);
        assert_eq!(provider.node_value(4, 89.0, 7.0), 1.5);
        assert_eq!(provider.node_value(4, 120.0, 7.0), 20.0);
    }

    #[test]
    fn test_up_and_out() {
        let provider = BarrierOptionFunctionProvider::new(
            100.0,
            10,
            OptionType::Call,
            ExerciseStyle::European,
            130.0,
            BarrierType::UpAndOut,
        )
        .unwrap();
        assert_eq!(provider.payoff_at_expiry(129.0), 29.0);
        assert_eq!(provider.payoff_at_expiry(130.0), 0.0);
    }

    #[test]
    fn test_invalid_barrier() {
        assert!(BarrierOptionFunctionProvider::new(
            100.0,
            10,
            OptionType::Put,
            ExerciseStyle::European,
            0.0,
            BarrierType::DownAndOut,
        )
        .is_err());
    }
}
