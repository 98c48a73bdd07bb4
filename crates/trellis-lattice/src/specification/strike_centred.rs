//! Schemes that invert the terminal binomial distribution at the strike.
//!
//! Both build the tree so that the probability of finishing above the
//! strike matches the Black-Scholes `N(d2)` (and the share-measure
//! counterpart `N(d1)`), which removes the odd-even oscillation of CRR.
//! They differ only in the inversion formula.

use trellis_core::{PricingError, PricingResult};

use super::{BinomialParameters, SpecificationInputs};

pub(super) fn leisen_reimer(inputs: &SpecificationInputs) -> PricingResult<BinomialParameters> {
    strike_centred(inputs, peizer_pratt_inversion)
}

pub(super) fn jabbour_kramin_young(
    inputs: &SpecificationInputs,
) -> PricingResult<BinomialParameters> {
    strike_centred(inputs, normal_approximation_inversion)
}

fn strike_centred(
    inputs: &SpecificationInputs,
    inversion: fn(f64, f64) -> f64,
) -> PricingResult<BinomialParameters> {
    if inputs.volatility <= 0.0 {
        return Err(PricingError::invalid_parameter(
            "volatility",
            "strike-centred lattices need a positive volatility",
        ));
    }
    let dt = inputs.dt();
    let n = inputs.steps as f64;
    let carry = inputs.cost_of_carry();
    let sigma_root_t = inputs.volatility * inputs.maturity.sqrt();
    let d1 = ((inputs.spot / inputs.strike).ln() + carry * inputs.maturity) / sigma_root_t
        + 0.5 * sigma_root_t;
    let d2 = d1 - sigma_root_t;

    let p1 = inversion(d1, n);
    let p2 = inversion(d2, n);
    let growth = (carry * dt).exp();
    let up = growth * p1 / p2;
    let down = (growth - p2 * up) / (1.0 - p2);

    Ok(BinomialParameters {
        up,
        down,
        prob_up: p2,
        dt,
    })
}

/// Peizer-Pratt method 2 inversion.
pub(super) fn peizer_pratt_inversion(z: f64, n: f64) -> f64 {
    let scaled = z / (n + 1.0 / 3.0 + 0.1 / (n + 1.0));
    0.5 + 0.5_f64.copysign(z) * (1.0 - (-scaled * scaled * (n + 1.0 / 6.0)).exp()).sqrt()
}

/// Inversion through the normal approximation of the binomial,
/// `h = 1/2 + 1/2 sign(z) sqrt(w² / (1 + w²))` with `w = z / √n`.
pub(super) fn normal_approximation_inversion(z: f64, n: f64) -> f64 {
    let w = z / n.sqrt();
    0.5 + 0.5_f64.copysign(w) * (w * w / (1.0 + w * w)).sqrt()
}
