//! Piecewise-constant Hull-White parameters.

use serde::{Deserialize, Serialize};
use trellis_core::error::ensure_positive;
use trellis_core::{PricingError, PricingResult};

/// Upper cap on the volatility buckets, in years.
pub const VOLATILITY_TIME_MAX: f64 = 1000.0;

/// One-factor Hull-White parameters with piecewise-constant volatility.
///
/// Bucket `i` applies `volatility[i]` on `[volatility_time[i], volatility_time[i + 1])`.
/// The stored times start at 0 and end at [`VOLATILITY_TIME_MAX`], so there is
/// always one more time than there are volatilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HullWhiteOneFactorPiecewiseConstantParameters {
    mean_reversion: f64,
    volatility: Vec<f64>,
    volatility_time: Vec<f64>,
}

impl HullWhiteOneFactorPiecewiseConstantParameters {
    /// Creates parameters from the interior bucket boundaries.
    ///
    /// `breakpoints` holds the `volatility.len() - 1` times between buckets,
    /// strictly increasing inside `(0, VOLATILITY_TIME_MAX)`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trellis_futures::hull_white::HullWhiteOneFactorPiecewiseConstantParameters;
    ///
    /// let params = HullWhiteOneFactorPiecewiseConstantParameters::new(
    ///     0.05,
    ///     vec![0.01, 0.011, 0.012],
    ///     vec![0.5, 1.0],
    /// )
    /// .unwrap();
    /// assert_eq!(params.volatility_time(), &[0.0, 0.5, 1.0, 1000.0]);
    /// ```
    pub fn new(
        mean_reversion: f64,
        volatility: Vec<f64>,
        breakpoints: Vec<f64>,
    ) -> PricingResult<Self> {
        ensure_positive("mean_reversion", mean_reversion)?;
        if volatility.is_empty() {
            return Err(PricingError::invalid_parameter(
                "volatility",
                "at least one volatility bucket is required",
            ));
        }
        if volatility.iter().any(|v| !(v.is_finite() && *v >= 0.0)) {
            return Err(PricingError::invalid_parameter(
                "volatility",
                "volatilities must be non-negative",
            ));
        }
        if breakpoints.len() + 1 != volatility.len() {
            return Err(PricingError::invalid_parameter(
                "volatility_time",
                format!(
                    "{} volatilities need {} breakpoints, got {}",
                    volatility.len(),
                    volatility.len() - 1,
                    breakpoints.len()
                ),
            ));
        }

        let mut volatility_time = Vec::with_capacity(breakpoints.len() + 2);
        volatility_time.push(0.0);
        volatility_time.extend(breakpoints);
        volatility_time.push(VOLATILITY_TIME_MAX);
        if !volatility_time.windows(2).all(|w| w[0] < w[1]) {
            return Err(PricingError::invalid_parameter(
                "volatility_time",
                format!("breakpoints must increase strictly inside (0, {VOLATILITY_TIME_MAX})"),
            ));
        }

        Ok(Self {
            mean_reversion,
            volatility,
            volatility_time,
        })
    }

    /// A single volatility for all times.
    pub fn constant(mean_reversion: f64, volatility: f64) -> PricingResult<Self> {
        Self::new(mean_reversion, vec![volatility], Vec::new())
    }

    /// Mean reversion speed.
    pub fn mean_reversion(&self) -> f64 {
        self.mean_reversion
    }

    /// Bucket volatilities.
    pub fn volatility(&self) -> &[f64] {
        &self.volatility
    }

    /// Bucket boundaries, from 0 to [`VOLATILITY_TIME_MAX`].
    pub fn volatility_time(&self) -> &[f64] {
        &self.volatility_time
    }

    /// Splits the last bucket at `time`, using `volatility` after it.
    ///
    /// # Errors
    ///
    /// Fails unless `time` lies after the last breakpoint and before the cap.
    pub fn add_volatility(&mut self, volatility: f64, time: f64) -> PricingResult<()> {
        let last_breakpoint = self.volatility_time[self.volatility_time.len() - 2];
        if !(time > last_breakpoint && time < VOLATILITY_TIME_MAX) {
            return Err(PricingError::invalid_parameter(
                "volatility_time",
                format!("new breakpoint {time} must lie in ({last_breakpoint}, {VOLATILITY_TIME_MAX})"),
            ));
        }
        if !(volatility.is_finite() && volatility >= 0.0) {
            return Err(PricingError::invalid_parameter(
                "volatility",
                "volatilities must be non-negative",
            ));
        }
        let cap = self.volatility_time.len() - 1;
        self.volatility_time.insert(cap, time);
        self.volatility.push(volatility);
        Ok(())
    }

    /// Index of the first stored time at or after `t`, never below 1.
    pub(crate) fn bucket_end(&self, t: f64) -> usize {
        1 + self.volatility_time[1..].partition_point(|&s| s < t)
    }
}
