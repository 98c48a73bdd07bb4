//! Discrete dividends.
//!
//! Cash dividends use the escrowed model: the tree is built on the spot
//! less the present value of all dividends, and the present value of the
//! dividends still to be paid is added back at every node. Proportional
//! dividends scale every node after the payment by `1 - q`.

use log::debug;
use trellis_core::{PricingError, PricingResult};

/// A discrete dividend schedule of one kind.
#[derive(Debug, Clone, PartialEq)]
pub enum DividendFunctionProvider {
    /// Absolute cash amounts.
    Cash(DividendSchedule),
    /// Fractions of the underlying price.
    Proportional(DividendSchedule),
}

/// Dividend payment times and amounts, strictly increasing in time.
#[derive(Debug, Clone, PartialEq)]
pub struct DividendSchedule {
    times: Vec<f64>,
    amounts: Vec<f64>,
}

impl DividendSchedule {
    /// Creates a schedule.
    ///
    /// # Errors
    ///
    /// Fails when lengths differ, the schedule is empty, times are not
    /// strictly increasing and positive, or an amount is negative.
    pub fn new(times: Vec<f64>, amounts: Vec<f64>) -> PricingResult<Self> {
        if times.is_empty() {
            return Err(PricingError::invalid_parameter(
                "dividends",
                "schedule is empty",
            ));
        }
        if times.len() != amounts.len() {
            return Err(PricingError::invalid_parameter(
                "dividends",
                format!("{} times but {} amounts", times.len(), amounts.len()),
            ));
        }
        if times[0] <= 0.0 || times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(PricingError::invalid_parameter(
                "dividends",
                "payment times must be positive and strictly increasing",
            ));
        }
        if amounts.iter().any(|a| !(a.is_finite() && *a >= 0.0)) {
            return Err(PricingError::invalid_parameter(
                "dividends",
                "amounts must be non-negative",
            ));
        }
        Ok(Self { times, amounts })
    }

    /// Payment times.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Payment amounts.
    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }
}

impl DividendFunctionProvider {
    /// Cash dividends.
    pub fn cash(times: Vec<f64>, amounts: Vec<f64>) -> PricingResult<Self> {
        Ok(Self::Cash(DividendSchedule::new(times, amounts)?))
    }

    /// Proportional dividends.
    ///
    /// # Errors
    ///
    /// Also fails for a proportion of one or more.
    pub fn proportional(times: Vec<f64>, proportions: Vec<f64>) -> PricingResult<Self> {
        if proportions.iter().any(|&q| q >= 1.0) {
            return Err(PricingError::invalid_parameter(
                "dividends",
                "proportional dividends must be below one",
            ));
        }
        Ok(Self::Proportional(DividendSchedule::new(times, proportions)?))
    }

    /// The underlying schedule.
    pub fn schedule(&self) -> &DividendSchedule {
        match self {
            Self::Cash(s) | Self::Proportional(s) => s,
        }
    }

    /// Maps each dividend to the step after which it is paid.
    ///
    /// A dividend at time `t` falls in step `floor(t / dt)`: nodes at that
    /// step and earlier are cum-dividend, later nodes are ex-dividend.
    ///
    /// # Errors
    ///
    /// Fails when a payment time is not strictly inside `(0, maturity)`.
    pub fn dividend_steps(&self, maturity: f64, steps: usize) -> PricingResult<Vec<usize>> {
        let schedule = self.schedule();
        let dt = maturity / steps as f64;
        schedule
            .times
            .iter()
            .map(|&t| {
                if t <= 0.0 || t >= maturity {
                    return Err(PricingError::invalid_parameter(
                        "dividends",
                        format!("payment time {t} outside (0, {maturity})"),
                    ));
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let step = ((t / dt).floor() as usize).min(steps - 1);
                Ok(step)
            })
            .collect()
    }

    /// Node price adjustment for a lattice of `steps` steps.
    pub(crate) fn adjustment(
        &self,
        spot: f64,
        rate: f64,
        maturity: f64,
        steps: usize,
    ) -> PricingResult<NodeAdjustment> {
        let dividend_steps = self.dividend_steps(maturity, steps)?;
        let dt = maturity / steps as f64;
        let schedule = self.schedule();
        let mut adjustment = NodeAdjustment::identity(spot, steps);

        match self {
            Self::Cash(_) => {
                let present_value: f64 = schedule
                    .times
                    .iter()
                    .zip(&schedule.amounts)
                    .map(|(t, d)| d * (-rate * t).exp())
                    .sum();
                adjustment.base = spot - present_value;
                if adjustment.base <= 0.0 {
                    return Err(PricingError::invalid_parameter(
                        "dividends",
                        format!("present value {present_value} exceeds spot {spot}"),
                    ));
                }
                for (i, shift) in adjustment.shift.iter_mut().enumerate() {
                    let node_time = i as f64 * dt;
                    *shift = schedule
                        .times
                        .iter()
                        .zip(&schedule.amounts)
                        .zip(&dividend_steps)
                        .filter(|(_, &step)| step >= i)
                        .map(|((t, d), _)| d * (-rate * (t - node_time)).exp())
                        .sum();
                }
            }
            Self::Proportional(_) => {
                for (i, scale) in adjustment.scale.iter_mut().enumerate() {
                    *scale = schedule
                        .amounts
                        .iter()
                        .zip(&dividend_steps)
                        .filter(|(_, &step)| step < i)
                        .map(|(q, _)| 1.0 - q)
                        .product();
                }
            }
        }

        debug!(
            "dividends mapped to steps {:?}, tree base {}",
            dividend_steps, adjustment.base
        );
        Ok(adjustment)
    }
}

/// Node price at step `i` is `base * scale[i] * moves + shift[i]`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NodeAdjustment {
    pub base: f64,
    pub scale: Vec<f64>,
    pub shift: Vec<f64>,
}

impl NodeAdjustment {
    pub(crate) fn identity(spot: f64, steps: usize) -> Self {
        Self {
            base: spot,
            scale: vec![1.0; steps + 1],
            shift: vec![0.0; steps + 1],
        }
    }

    pub(crate) fn price(&self, step: usize, moves: f64) -> f64 {
        self.base * self.scale[step] * moves + self.shift[step]
    }

    /// Ex-dividend spot the lattice geometry is built around: the escrowed
    /// spot for cash dividends, the spot net of every proportional payment
    /// otherwise.
    pub(crate) fn effective_spot(&self) -> f64 {
        self.base * self.scale.last().copied().unwrap_or(1.0)
    }
}
