//! Moment-matching binomial schemes.

use super::{BinomialParameters, SpecificationInputs};

pub(super) fn cox_ross_rubinstein(inputs: &SpecificationInputs) -> BinomialParameters {
    let dt = inputs.dt();
    let up = (inputs.volatility * dt.sqrt()).exp();
    let down = 1.0 / up;
    BinomialParameters {
        up,
        down,
        prob_up: risk_neutral_probability(inputs.cost_of_carry(), dt, up, down),
        dt,
    }
}

pub(super) fn jarrow_rudd(inputs: &SpecificationInputs) -> BinomialParameters {
    let dt = inputs.dt();
    let drift = (inputs.cost_of_carry() - 0.5 * inputs.volatility * inputs.volatility) * dt;
    let spread = inputs.volatility * dt.sqrt();
    let up = (drift + spread).exp();
    let down = (drift - spread).exp();
    BinomialParameters {
        up,
        down,
        prob_up: risk_neutral_probability(inputs.cost_of_carry(), dt, up, down),
        dt,
    }
}

pub(super) fn trigeorgis(inputs: &SpecificationInputs) -> BinomialParameters {
    let dt = inputs.dt();
    let variance = inputs.volatility * inputs.volatility;
    let nu = inputs.cost_of_carry() - 0.5 * variance;
    let dx = (variance * dt + nu * nu * dt * dt).sqrt();
    BinomialParameters {
        up: dx.exp(),
        down: (-dx).exp(),
        prob_up: 0.5 + 0.5 * nu * dt / dx,
        dt,
    }
}

pub(super) fn tian(inputs: &SpecificationInputs) -> BinomialParameters {
    let dt = inputs.dt();
    let v = (inputs.volatility * inputs.volatility * dt).exp();
    let m = (inputs.cost_of_carry() * dt).exp();
    let root = (v * v + 2.0 * v - 3.0).sqrt();
    let up = 0.5 * m * v * (v + 1.0 + root);
    let down = 0.5 * m * v * (v + 1.0 - root);
    BinomialParameters {
        up,
        down,
        prob_up: (m - down) / (up - down),
        dt,
    }
}

/// Up probability making the one-step expectation grow at the carry rate.
pub(super) fn risk_neutral_probability(carry: f64, dt: f64, up: f64, down: f64) -> f64 {
    ((carry * dt).exp() - down) / (up - down)
}
