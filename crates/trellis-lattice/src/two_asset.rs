//! Two-asset binomial lattice.
//!
//! Each underlying moves up or down by `exp(±σ√Δt)` per step. The four
//! joint moves carry probabilities that match both drifts and the
//! correlation to first order in `Δt`:
//!
//! ```text
//! p_uu = (1 + ρ + √Δt (ν1/σ1 + ν2/σ2)) / 4
//! p_ud = (1 - ρ + √Δt (ν1/σ1 - ν2/σ2)) / 4
//! p_du = (1 - ρ - √Δt (ν1/σ1 - ν2/σ2)) / 4
//! p_dd = (1 + ρ - √Δt (ν1/σ1 + ν2/σ2)) / 4
//! ```
//!
//! with `ν = r - q - σ²/2`. Step `i` holds an `(i + 1) × (i + 1)` grid of
//! nodes, so the cost grows with the cube of the step count.

use log::debug;
use serde::{Deserialize, Serialize};
use trellis_core::error::ensure_positive;
use trellis_core::{PricingError, PricingResult};

use crate::function::OptionFunctionProvider2D;
use crate::specification::check_probability;

/// Market data for two correlated underlyings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoAssetMarket {
    /// Spot prices of the first and second underlying.
    pub spots: [f64; 2],
    /// Black volatilities.
    pub volatilities: [f64; 2],
    /// Correlation of the log returns.
    pub correlation: f64,
    /// Time to expiry in years.
    pub maturity: f64,
    /// Continuously compounded interest rate.
    pub rate: f64,
    /// Continuous dividend yields.
    pub dividend_yields: [f64; 2],
}

impl TwoAssetMarket {
    /// Market data without dividend yields.
    pub fn new(
        spots: [f64; 2],
        volatilities: [f64; 2],
        correlation: f64,
        maturity: f64,
        rate: f64,
    ) -> Self {
        Self {
            spots,
            volatilities,
            correlation,
            maturity,
            rate,
            dividend_yields: [0.0; 2],
        }
    }

    /// Sets the continuous dividend yields.
    #[must_use]
    pub fn with_dividend_yields(mut self, dividend_yields: [f64; 2]) -> Self {
        self.dividend_yields = dividend_yields;
        self
    }

    /// The same market with the underlyings swapped.
    #[must_use]
    pub fn swapped(self) -> Self {
        let [s1, s2] = self.spots;
        let [v1, v2] = self.volatilities;
        let [q1, q2] = self.dividend_yields;
        Self {
            spots: [s2, s1],
            volatilities: [v2, v1],
            dividend_yields: [q2, q1],
            ..self
        }
    }

    /// Checks spots, volatilities, maturity and correlation.
    pub fn validate(&self) -> PricingResult<()> {
        ensure_positive("spot1", self.spots[0])?;
        ensure_positive("spot2", self.spots[1])?;
        ensure_positive("volatility1", self.volatilities[0])?;
        ensure_positive("volatility2", self.volatilities[1])?;
        ensure_positive("maturity", self.maturity)?;
        if !(-1.0..=1.0).contains(&self.correlation) {
            return Err(PricingError::invalid_parameter(
                "correlation",
                format!("correlation {} outside [-1, 1]", self.correlation),
            ));
        }
        Ok(())
    }

    /// Joint move probabilities for a lattice of `steps` steps.
    ///
    /// # Errors
    ///
    /// Fails when any of the four probabilities leaves `[0, 1]`, which
    /// happens for large drifts relative to the volatilities or too few
    /// steps.
    pub fn joint_probabilities(&self, steps: usize) -> PricingResult<JointProbabilities> {
        self.validate()?;
        if steps < 1 {
            return Err(PricingError::invalid_parameter(
                "steps",
                "at least one step is required",
            ));
        }
        let root_dt = (self.maturity / steps as f64).sqrt();
        let [a, b] = [0, 1].map(|i| {
            let vol = self.volatilities[i];
            root_dt * (self.rate - self.dividend_yields[i] - 0.5 * vol * vol) / vol
        });
        let rho = self.correlation;

        let probabilities = JointProbabilities {
            up_up: 0.25 * (1.0 + rho + a + b),
            up_down: 0.25 * (1.0 - rho + a - b),
            down_up: 0.25 * (1.0 - rho - a + b),
            down_down: 0.25 * (1.0 + rho - a - b),
        };
        check_probability("up_up", probabilities.up_up)?;
        check_probability("up_down", probabilities.up_down)?;
        check_probability("down_up", probabilities.down_up)?;
        check_probability("down_down", probabilities.down_down)?;
        Ok(probabilities)
    }
}

/// Probabilities of the four joint moves out of a node, first asset first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointProbabilities {
    /// Both assets up.
    pub up_up: f64,
    /// First up, second down.
    pub up_down: f64,
    /// First down, second up.
    pub down_up: f64,
    /// Both assets down.
    pub down_down: f64,
}

/// Price and sensitivities from the two-asset lattice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TwoAssetGreeks {
    /// Option value at the root.
    pub price: f64,
    /// Sensitivity to the first spot.
    pub delta1: f64,
    /// Sensitivity to the second spot.
    pub delta2: f64,
    /// Second-order sensitivity to the first spot.
    pub gamma1: f64,
    /// Second-order sensitivity to the second spot.
    pub gamma2: f64,
    /// Mixed second-order sensitivity to both spots.
    pub cross_gamma: f64,
    /// Sensitivity to the passage of time, per year.
    pub theta: f64,
}

/// Price of an option on two underlyings.
///
/// # Errors
///
/// Returns [`PricingError::InvalidParameter`] for non-positive spots,
/// volatilities or maturity, a correlation outside `[-1, 1]`, or joint
/// probabilities outside `[0, 1]`.
pub fn price_two_asset<F>(function: &F, market: &TwoAssetMarket) -> PricingResult<f64>
where
    F: OptionFunctionProvider2D + ?Sized,
{
    let lattice = TwoAssetLattice::new(function, market)?;
    let (price, _) = lattice.roll_back(function, market.spots, None);
    debug!(
        "two-asset lattice priced {} over {} steps: {}",
        function.option_type(),
        lattice.steps,
        price
    );
    Ok(price)
}

/// Price and greeks of an option on two underlyings.
///
/// Deltas and gammas are read off the second step, along the row where the
/// other asset is back at its spot. Theta compares the root with the node
/// two steps later where both assets are back at their spots.
///
/// # Errors
///
/// As [`price_two_asset`], and fails for fewer than two steps.
pub fn greeks_two_asset<F>(function: &F, market: &TwoAssetMarket) -> PricingResult<TwoAssetGreeks>
where
    F: OptionFunctionProvider2D + ?Sized,
{
    let lattice = TwoAssetLattice::new(function, market)?;
    if lattice.steps < 2 {
        return Err(PricingError::invalid_parameter(
            "steps",
            "two-asset greeks need at least two steps",
        ));
    }
    let (price, layer) = lattice.roll_back(function, market.spots, Some(2));
    let v = |j: usize, k: usize| layer[3 * j + k];

    let [s1, s2] = market.spots;
    let [up1, up2] = lattice.prices(market.spots, 2).map(|p| p[2]);
    let [down1, down2] = lattice.prices(market.spots, 2).map(|p| p[0]);

    let delta1 = (v(2, 1) - v(0, 1)) / (up1 - down1);
    let delta2 = (v(1, 2) - v(1, 0)) / (up2 - down2);
    let gamma1 = 2.0
        * ((v(2, 1) - v(1, 1)) / (up1 - s1) - (v(1, 1) - v(0, 1)) / (s1 - down1))
        / (up1 - down1);
    let gamma2 = 2.0
        * ((v(1, 2) - v(1, 1)) / (up2 - s2) - (v(1, 1) - v(1, 0)) / (s2 - down2))
        / (up2 - down2);
    let cross_gamma =
        (v(2, 2) - v(2, 0) - v(0, 2) + v(0, 0)) / ((up1 - down1) * (up2 - down2));
    let theta = (v(1, 1) - price) / (2.0 * lattice.dt);

    Ok(TwoAssetGreeks {
        price,
        delta1,
        delta2,
        gamma1,
        gamma2,
        cross_gamma,
        theta,
    })
}

struct TwoAssetLattice {
    steps: usize,
    dt: f64,
    log_moves: [f64; 2],
    probabilities: JointProbabilities,
    discount: f64,
}

impl TwoAssetLattice {
    fn new<F>(function: &F, market: &TwoAssetMarket) -> PricingResult<Self>
    where
        F: OptionFunctionProvider2D + ?Sized,
    {
        function.validate()?;
        let steps = function.steps();
        let probabilities = market.joint_probabilities(steps)?;
        let dt = market.maturity / steps as f64;
        Ok(Self {
            steps,
            dt,
            log_moves: market.volatilities.map(|vol| vol * dt.sqrt()),
            probabilities,
            discount: (-market.rate * dt).exp(),
        })
    }

    /// Underlying prices of each asset at `step`, lowest first.
    fn prices(&self, spots: [f64; 2], step: usize) -> [Vec<f64>; 2] {
        [0, 1].map(|asset| {
            (0..=step)
                .map(|j| {
                    let moves = 2.0 * j as f64 - step as f64;
                    spots[asset] * (moves * self.log_moves[asset]).exp()
                })
                .collect()
        })
    }

    /// Root value, plus the value layer of `keep` when asked for. Layers are
    /// stored row by row: first-asset index `j`, second-asset index `k` at
    /// `j * (step + 1) + k`.
    fn roll_back<F>(&self, function: &F, spots: [f64; 2], keep: Option<usize>) -> (f64, Vec<f64>)
    where
        F: OptionFunctionProvider2D + ?Sized,
    {
        let p = self.probabilities;
        let [first, second] = self.prices(spots, self.steps);
        let mut values: Vec<f64> = first
            .iter()
            .flat_map(|&s1| second.iter().map(move |&s2| function.payoff(s1, s2)))
            .collect();
        let mut kept = if keep == Some(self.steps) {
            values.clone()
        } else {
            Vec::new()
        };

        for step in (0..self.steps).rev() {
            let next_width = step + 2;
            let [first, second] = self.prices(spots, step);
            let mut layer = Vec::with_capacity((step + 1) * (step + 1));
            for (j, &s1) in first.iter().enumerate() {
                let down = j * next_width;
                let up = down + next_width;
                for (k, &s2) in second.iter().enumerate() {
                    let expected = p.up_up * values[up + k + 1]
                        + p.up_down * values[up + k]
                        + p.down_up * values[down + k + 1]
                        + p.down_down * values[down + k];
                    layer.push(function.node_value(step, s1, s2, self.discount * expected));
                }
            }
            values = layer;
            if keep == Some(step) {
                kept = values.clone();
            }
        }
        (values[0], kept)
    }
}
