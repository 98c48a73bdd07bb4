//! Three-branch schemes. Both are symmetric in log space (`up * down = 1`,
//! `middle = 1`), which the trinomial engine relies on.

use super::{SpecificationInputs, TrinomialParameters};

/// Two half-step CRR moves glued into one trinomial step.
pub(super) fn crr_trinomial(inputs: &SpecificationInputs) -> TrinomialParameters {
    let dt = inputs.dt();
    let half = inputs.volatility * (0.5 * dt).sqrt();
    let (x_up, x_down) = (half.exp(), (-half).exp());
    let drift = (0.5 * inputs.cost_of_carry() * dt).exp();
    let width = x_up - x_down;

    let prob_up = ((drift - x_down) / width).powi(2);
    let prob_down = ((x_up - drift) / width).powi(2);
    let up = (2.0 * half).exp();
    TrinomialParameters {
        up,
        middle: 1.0,
        down: 1.0 / up,
        prob_up,
        prob_middle: 1.0 - prob_up - prob_down,
        prob_down,
        dt,
    }
}

pub(super) fn trigeorgis_trinomial(inputs: &SpecificationInputs) -> TrinomialParameters {
    let dt = inputs.dt();
    let variance = inputs.volatility * inputs.volatility;
    let nu = inputs.cost_of_carry() - 0.5 * variance;
    let dx = inputs.volatility * (3.0 * dt).sqrt();
    let spread = (variance * dt + nu * nu * dt * dt) / (dx * dx);
    let drift = nu * dt / dx;

    TrinomialParameters {
        up: dx.exp(),
        middle: 1.0,
        down: (-dx).exp(),
        prob_up: 0.5 * (spread + drift),
        prob_middle: 1.0 - spread,
        prob_down: 0.5 * (spread - drift),
        dt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn inputs() -> SpecificationInputs {
        SpecificationInputs {
            spot: 100.0,
            strike: 95.0,
            maturity: 0.75,
            volatility: 0.25,
            rate: 0.04,
            dividend_yield: 0.01,
            steps: 30,
        }
    }

    #[test]
    fn test_crr_trinomial_risk_neutral() {
        let p = crr_trinomial(&inputs());
        assert_relative_eq!(p.prob_up + p.prob_middle + p.prob_down, 1.0, epsilon = 1e-15);
        assert_relative_eq!(p.expected_growth(), (0.03 * p.dt).exp(), epsilon = 1e-13);
        assert_relative_eq!(p.up * p.down, 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_trigeorgis_trinomial_log_moments() {
        let p = trigeorgis_trinomial(&inputs());
        let dx = p.up.ln();
        let nu = 0.03 - 0.5 * 0.0625;
        let mean = (p.prob_up - p.prob_down) * dx;
        let second = (p.prob_up + p.prob_down) * dx * dx;
        assert_relative_eq!(mean, nu * p.dt, epsilon = 1e-14);
        assert_relative_eq!(
            second,
            0.0625 * p.dt + nu * nu * p.dt * p.dt,
            epsilon = 1e-14
        );
    }
}
