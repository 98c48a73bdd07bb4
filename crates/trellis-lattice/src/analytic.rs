//! Closed-form Black-Scholes-Merton prices used as a convergence target.

use trellis_core::error::{ensure_non_negative, ensure_positive};
use trellis_core::{OptionType, PricingResult};
use trellis_math::distributions::normal_cdf;

/// European option value under Black-Scholes-Merton with a continuous
/// dividend yield.
///
/// Zero volatility returns the discounted intrinsic value of the forward.
pub fn black_scholes_price(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    maturity: f64,
    volatility: f64,
    rate: f64,
    dividend_yield: f64,
) -> PricingResult<f64> {
    ensure_positive("spot", spot)?;
    ensure_positive("strike", strike)?;
    ensure_positive("maturity", maturity)?;
    ensure_non_negative("volatility", volatility)?;

    let discounted_forward = spot * (-dividend_yield * maturity).exp();
    let discounted_strike = strike * (-rate * maturity).exp();
    let sign = option_type.sign();

    if volatility == 0.0 {
        return Ok((sign * (discounted_forward - discounted_strike)).max(0.0));
    }

    let std_dev = volatility * maturity.sqrt();
    let d1 = ((spot / strike).ln() + (rate - dividend_yield + 0.5 * volatility * volatility) * maturity)
        / std_dev;
    let d2 = d1 - std_dev;
    Ok(sign * (discounted_forward * normal_cdf(sign * d1) - discounted_strike * normal_cdf(sign * d2)))
}
