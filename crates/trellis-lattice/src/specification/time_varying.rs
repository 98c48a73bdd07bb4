//! Clewlow-Strickland lattice with per-step inputs.
//!
//! The log step `dx` is common to every step so the tree still recombines;
//! each step gets its own length, probability and discount factor so that
//! the local mean and variance of the log price match that step's inputs.

use trellis_core::error::{ensure_non_negative, ensure_positive};
use trellis_core::{PricingError, PricingResult};

use super::check_probability;

/// Per-step volatility, rate and dividend yield.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeVaryingInputs {
    /// Volatility for each step.
    pub volatility: Vec<f64>,
    /// Interest rate for each step.
    pub rate: Vec<f64>,
    /// Dividend yield for each step.
    pub dividend: Vec<f64>,
}

impl TimeVaryingInputs {
    /// Creates per-step inputs.
    pub fn new(volatility: Vec<f64>, rate: Vec<f64>, dividend: Vec<f64>) -> Self {
        Self {
            volatility,
            rate,
            dividend,
        }
    }

    /// The same inputs repeated over `steps` steps.
    pub fn constant(volatility: f64, rate: f64, dividend: f64, steps: usize) -> Self {
        Self::new(
            vec![volatility; steps],
            vec![rate; steps],
            vec![dividend; steps],
        )
    }

    fn validate(&self, steps: usize) -> PricingResult<()> {
        for (name, values) in [
            ("volatility", &self.volatility),
            ("rate", &self.rate),
            ("dividend", &self.dividend),
        ] {
            if values.len() != steps {
                return Err(PricingError::invalid_parameter(
                    name,
                    format!("expected {steps} per-step values, got {}", values.len()),
                ));
            }
            if values.iter().any(|v| !v.is_finite()) {
                return Err(PricingError::invalid_parameter(name, "values must be finite"));
            }
        }
        for &sigma in &self.volatility {
            ensure_non_negative("volatility", sigma)?;
        }
        Ok(())
    }
}

/// One step of a time-varying lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeVaryingStep {
    /// Probability of the up move.
    pub prob_up: f64,
    /// Step length in years.
    pub dt: f64,
    /// One-step discount factor.
    pub discount: f64,
}

/// Parameters of a time-varying lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeVaryingParameters {
    /// Common log step.
    pub dx: f64,
    /// Per-step transition data.
    pub steps: Vec<TimeVaryingStep>,
}

impl TimeVaryingParameters {
    /// Up move factor.
    pub fn up(&self) -> f64 {
        self.dx.exp()
    }

    /// Down move factor.
    pub fn down(&self) -> f64 {
        (-self.dx).exp()
    }

    /// Sum of the step lengths.
    pub fn total_time(&self) -> f64 {
        self.steps.iter().map(|s| s.dt).sum()
    }
}

pub(super) fn parameters(
    inputs: &TimeVaryingInputs,
    maturity: f64,
    steps: usize,
) -> PricingResult<TimeVaryingParameters> {
    if steps < 1 {
        return Err(PricingError::invalid_parameter(
            "steps",
            "at least one step is required",
        ));
    }
    ensure_positive("maturity", maturity)?;
    inputs.validate(steps)?;

    let n = steps as f64;
    let dt = maturity / n;
    let nus: Vec<f64> = inputs
        .volatility
        .iter()
        .zip(&inputs.rate)
        .zip(&inputs.dividend)
        .map(|((sigma, r), q)| r - q - 0.5 * sigma * sigma)
        .collect();
    let mean_variance = inputs.volatility.iter().map(|s| s * s).sum::<f64>() / n;
    let mean_nu_squared = nus.iter().map(|nu| nu * nu).sum::<f64>() / n;
    let dx = (mean_variance * dt + mean_nu_squared * dt * dt).sqrt();
    if dx <= 0.0 {
        return Err(PricingError::invalid_parameter(
            "volatility",
            "time-varying lattice needs non-zero volatility or drift",
        ));
    }

    let mut lattice_steps = Vec::with_capacity(steps);
    for ((sigma, nu), r) in inputs.volatility.iter().zip(&nus).zip(&inputs.rate) {
        let variance = sigma * sigma;
        // Positive root of nu² t² + sigma² t - dx² = 0, written without cancellation.
        let step_dt =
            2.0 * dx * dx / (variance + (variance * variance + 4.0 * nu * nu * dx * dx).sqrt());
        let prob_up = 0.5 + 0.5 * nu * step_dt / dx;
        check_probability("prob_up", prob_up)?;
        lattice_steps.push(TimeVaryingStep {
            prob_up,
            dt: step_dt,
            discount: (-r * step_dt).exp(),
        });
    }

    Ok(TimeVaryingParameters {
        dx,
        steps: lattice_steps,
    })
}
