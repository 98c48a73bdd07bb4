//! Lattice pricing engine.
//!
//! Every entry point builds a fresh [`LatticeTree`], fills underlying
//! prices forward, seeds the expiry layer from the option function and
//! rolls values back to the root:
//!
//! ```text
//! V[i][j] = f.node_value(i, S[i][j], disc_i * Σ_k p_k V[i+1][j+k])
//! ```
//!
//! All functions are pure and can be called concurrently.

use log::debug;
use trellis_core::error::{ensure_non_negative, ensure_positive};
use trellis_core::PricingResult;

use crate::dividend::{DividendFunctionProvider, NodeAdjustment};
use crate::function::OptionFunctionProvider;
use crate::greeks::{self, LatticeGreeks};
use crate::specification::{
    LatticeParameters, LatticeSpecification, SpecificationInputs, TimeVaryingInputs,
};
use crate::tree::{Branching, LatticeTree};

/// Market data for a lattice pricing call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeMarket {
    /// Spot price of the underlying.
    pub spot: f64,
    /// Time to expiry in years.
    pub maturity: f64,
    /// Black volatility.
    pub volatility: f64,
    /// Continuously compounded interest rate.
    pub rate: f64,
    /// Continuous dividend yield.
    pub dividend_yield: f64,
}

impl LatticeMarket {
    /// Market data without a dividend yield.
    pub fn new(spot: f64, maturity: f64, volatility: f64, rate: f64) -> Self {
        Self {
            spot,
            maturity,
            volatility,
            rate,
            dividend_yield: 0.0,
        }
    }

    /// Sets the continuous dividend yield.
    #[must_use]
    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    /// The same market with another spot.
    #[must_use]
    pub fn with_spot(mut self, spot: f64) -> Self {
        self.spot = spot;
        self
    }

    /// Checks spot, maturity and volatility.
    pub fn validate(&self) -> PricingResult<()> {
        ensure_positive("spot", self.spot)?;
        ensure_positive("maturity", self.maturity)?;
        ensure_non_negative("volatility", self.volatility)
    }

    fn specification_inputs(&self, strike: f64, steps: usize) -> SpecificationInputs {
        SpecificationInputs {
            spot: self.spot,
            strike,
            maturity: self.maturity,
            volatility: self.volatility,
            rate: self.rate,
            dividend_yield: self.dividend_yield,
            steps,
        }
    }
}

/// Transition out of every node of one step.
#[derive(Debug, Clone, Copy)]
struct StepTransition {
    prob_up: f64,
    prob_middle: f64,
    prob_down: f64,
    discount: f64,
}

/// Price of an option.
///
/// # Errors
///
/// Returns [`trellis_core::PricingError::InvalidParameter`] for non-positive strike,
/// spot or maturity, zero steps, negative volatility, or lattice
/// probabilities outside `[0, 1]`.
///
/// # Example
///
/// ```rust
/// use trellis_core::OptionType;
/// use trellis_lattice::engine::{price, LatticeMarket};
/// use trellis_lattice::function::VanillaOptionFunctionProvider;
/// use trellis_lattice::specification::LatticeSpecification;
///
/// let put = VanillaOptionFunctionProvider::american(105.0, 301, OptionType::Put).unwrap();
/// let market = LatticeMarket::new(105.0, 4.2, 0.5, 0.005);
/// let value = price(&LatticeSpecification::LeisenReimer, &put, &market).unwrap();
/// assert!((value - 39.850075948866980).abs() < 39.85 / 301.0);
/// ```
pub fn price<F>(
    specification: &LatticeSpecification,
    function: &F,
    market: &LatticeMarket,
) -> PricingResult<f64>
where
    F: OptionFunctionProvider + ?Sized,
{
    price_with_dividends(specification, function, market, None)
}

/// Price of an option on an underlying paying discrete dividends.
pub fn price_with_dividends<F>(
    specification: &LatticeSpecification,
    function: &F,
    market: &LatticeMarket,
    dividends: Option<&DividendFunctionProvider>,
) -> PricingResult<f64>
where
    F: OptionFunctionProvider + ?Sized,
{
    Ok(build_tree(specification, function, market, dividends)?.root_value())
}

/// Price, delta, gamma and theta of an option.
///
/// Binomial lattices need at least two steps, trinomial lattices one.
pub fn greeks<F>(
    specification: &LatticeSpecification,
    function: &F,
    market: &LatticeMarket,
) -> PricingResult<LatticeGreeks>
where
    F: OptionFunctionProvider + ?Sized,
{
    greeks_with_dividends(specification, function, market, None)
}

/// Greeks of an option on an underlying paying discrete dividends.
pub fn greeks_with_dividends<F>(
    specification: &LatticeSpecification,
    function: &F,
    market: &LatticeMarket,
    dividends: Option<&DividendFunctionProvider>,
) -> PricingResult<LatticeGreeks>
where
    F: OptionFunctionProvider + ?Sized,
{
    greeks::from_tree(&build_tree(specification, function, market, dividends)?)
}

/// Price with per-step volatility, rate and dividend yield.
///
/// Each input array must hold one value per step of `function`.
pub fn price_time_varying<F>(
    specification: &LatticeSpecification,
    function: &F,
    spot: f64,
    maturity: f64,
    inputs: &TimeVaryingInputs,
) -> PricingResult<f64>
where
    F: OptionFunctionProvider + ?Sized,
{
    Ok(build_time_varying_tree(specification, function, spot, maturity, inputs)?.root_value())
}

/// Greeks with per-step volatility, rate and dividend yield.
pub fn greeks_time_varying<F>(
    specification: &LatticeSpecification,
    function: &F,
    spot: f64,
    maturity: f64,
    inputs: &TimeVaryingInputs,
) -> PricingResult<LatticeGreeks>
where
    F: OptionFunctionProvider + ?Sized,
{
    greeks::from_tree(&build_time_varying_tree(
        specification,
        function,
        spot,
        maturity,
        inputs,
    )?)
}

/// Builds and rolls back the full lattice for constant inputs.
pub fn build_tree<F>(
    specification: &LatticeSpecification,
    function: &F,
    market: &LatticeMarket,
    dividends: Option<&DividendFunctionProvider>,
) -> PricingResult<LatticeTree>
where
    F: OptionFunctionProvider + ?Sized,
{
    market.validate()?;
    function.validate()?;
    let steps = function.steps();
    let adjustment = match dividends {
        Some(dividends) => dividends.adjustment(market.spot, market.rate, market.maturity, steps)?,
        None => NodeAdjustment::identity(market.spot, steps),
    };

    // Strike-centred geometries need the ex-dividend spot.
    let inputs = market
        .with_spot(adjustment.effective_spot())
        .specification_inputs(function.strike(), steps);
    let parameters = specification.parameters(&inputs)?;

    let (branching, ln_up, ln_down, dt, transition) = match parameters {
        LatticeParameters::Binomial(p) => (
            Branching::Binomial,
            p.up.ln(),
            p.down.ln(),
            p.dt,
            StepTransition {
                prob_up: p.prob_up,
                prob_middle: 0.0,
                prob_down: p.prob_down(),
                discount: (-market.rate * p.dt).exp(),
            },
        ),
        LatticeParameters::Trinomial(p) => (
            Branching::Trinomial,
            p.up.ln(),
            p.down.ln(),
            p.dt,
            StepTransition {
                prob_up: p.prob_up,
                prob_middle: p.prob_middle,
                prob_down: p.prob_down,
                discount: (-market.rate * p.dt).exp(),
            },
        ),
    };

    let times = (0..=steps).map(|i| i as f64 * dt).collect();
    let mut tree = LatticeTree::new(branching, times);
    fill_prices(&mut tree, ln_up, ln_down, &adjustment);
    roll_back(&mut tree, function, &vec![transition; steps]);
    debug!(
        "{} lattice priced {} over {} steps: {}",
        specification.name(),
        function.option_type(),
        steps,
        tree.root_value()
    );
    Ok(tree)
}

/// Builds and rolls back the full lattice for per-step inputs.
pub fn build_time_varying_tree<F>(
    specification: &LatticeSpecification,
    function: &F,
    spot: f64,
    maturity: f64,
    inputs: &TimeVaryingInputs,
) -> PricingResult<LatticeTree>
where
    F: OptionFunctionProvider + ?Sized,
{
    ensure_positive("spot", spot)?;
    function.validate()?;
    let steps = function.steps();
    let parameters = specification.time_varying_parameters(inputs, maturity, steps)?;

    let mut times = Vec::with_capacity(steps + 1);
    let mut elapsed = 0.0;
    times.push(elapsed);
    for step in &parameters.steps {
        elapsed += step.dt;
        times.push(elapsed);
    }
    let transitions: Vec<StepTransition> = parameters
        .steps
        .iter()
        .map(|s| StepTransition {
            prob_up: s.prob_up,
            prob_middle: 0.0,
            prob_down: 1.0 - s.prob_up,
            discount: s.discount,
        })
        .collect();

    let mut tree = LatticeTree::new(Branching::Binomial, times);
    fill_prices(
        &mut tree,
        parameters.dx,
        -parameters.dx,
        &NodeAdjustment::identity(spot, steps),
    );
    roll_back(&mut tree, function, &transitions);
    debug!(
        "time-varying lattice dx={} spans {} years over {} steps",
        parameters.dx,
        parameters.total_time(),
        steps
    );
    Ok(tree)
}

fn fill_prices(tree: &mut LatticeTree, ln_up: f64, ln_down: f64, adjustment: &NodeAdjustment) {
    let branching = tree.branching();
    for step in 0..=tree.steps() {
        let i = step as f64;
        for (j, price) in tree.prices_mut(step).iter_mut().enumerate() {
            let j = j as f64;
            let log_moves = match branching {
                Branching::Binomial => j * ln_up + (i - j) * ln_down,
                Branching::Trinomial if j >= i => (j - i) * ln_up,
                Branching::Trinomial => (i - j) * ln_down,
            };
            *price = adjustment.price(step, log_moves.exp());
        }
    }
}

fn roll_back<F>(tree: &mut LatticeTree, function: &F, transitions: &[StepTransition])
where
    F: OptionFunctionProvider + ?Sized,
{
    let steps = tree.steps();
    let branching = tree.branching();

    let expiry_prices = tree.prices(steps).to_vec();
    for (value, price) in tree.values_mut(steps).iter_mut().zip(expiry_prices) {
        *value = function.payoff_at_expiry(price);
    }

    for step in (0..steps).rev() {
        let t = transitions[step];
        let prices = tree.prices(step).to_vec();
        let (current, next) = tree.value_layers_mut(step);
        for (j, (value, price)) in current.iter_mut().zip(prices).enumerate() {
            let expected = match branching {
                Branching::Binomial => t.prob_down * next[j] + t.prob_up * next[j + 1],
                Branching::Trinomial => {
                    t.prob_down * next[j] + t.prob_middle * next[j + 1] + t.prob_up * next[j + 2]
                }
            };
            *value = function.node_value(step, price, t.discount * expected);
        }
    }
}
