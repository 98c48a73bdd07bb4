//! One-factor Hull-White model with piecewise-constant volatility.
//!
//! Only the two functions needed for futures convexity are provided:
//!
//! ```text
//! alpha(t0, t1, u, v)  = (e^{-a u} - e^{-a v}) * sqrt( Σ σ_k² (e^{2a s_{k+1}} - e^{2a s_k}) / 2a³ )
//! fcf(t0, t1, t2)      = exp( (e^{-a t1} - e^{-a t2}) / 2a³
//!                             * Σ σ_k² (e^{a s_{k+1}} - e^{a s_k}) (2 - e^{-a (t2 - s_{k+1})} - e^{-a (t2 - s_k)}) )
//! ```
//!
//! where the `s_k` are the volatility breakpoints clipped to the
//! integration interval.

mod parameters;

pub use parameters::{HullWhiteOneFactorPiecewiseConstantParameters, VOLATILITY_TIME_MAX};

/// Standard deviation of the log bond price ratio `P(., v) / P(., u)` from
/// the Gaussian factor integrated over `[t0, t1]`.
pub fn alpha(
    parameters: &HullWhiteOneFactorPiecewiseConstantParameters,
    t0: f64,
    t1: f64,
    numeraire_time: f64,
    bond_maturity: f64,
) -> f64 {
    let a = parameters.mean_reversion();
    let volatility = parameters.volatility();
    let times = parameters.volatility_time();

    let factor = (-a * numeraire_time).exp() - (-a * bond_maturity).exp();
    let start = parameters.bucket_end(t0);
    let end = parameters.bucket_end(t1);

    let mut knots = Vec::with_capacity(end - start + 2);
    knots.push(t0);
    knots.extend_from_slice(&times[start..end]);
    knots.push(t1);

    let variance: f64 = knots
        .windows(2)
        .enumerate()
        .map(|(k, s)| {
            let sigma = volatility[start - 1 + k];
            sigma * sigma * ((2.0 * a * s[1]).exp() - (2.0 * a * s[0]).exp())
        })
        .sum();
    factor * (variance / (2.0 * a * a * a)).sqrt()
}

/// Ratio between the futures and forward price of a zero-coupon bond.
///
/// `t0` is the futures last marking time, `t1` the bond maturity and `t2`
/// the delivery time.
pub fn futures_convexity_factor(
    parameters: &HullWhiteOneFactorPiecewiseConstantParameters,
    t0: f64,
    t1: f64,
    t2: f64,
) -> f64 {
    let a = parameters.mean_reversion();
    let volatility = parameters.volatility();
    let times = parameters.volatility_time();

    let factor = (-a * t1).exp() - (-a * t2).exp();
    let end = parameters.bucket_end(t0);

    let mut knots = Vec::with_capacity(end + 1);
    knots.extend_from_slice(&times[..end]);
    knots.push(t0);

    let integral: f64 = knots
        .windows(2)
        .enumerate()
        .map(|(k, s)| {
            let sigma = volatility[k];
            sigma
                * sigma
                * ((a * s[1]).exp() - (a * s[0]).exp())
                * (2.0 - (-a * (t2 - s[1])).exp() - (-a * (t2 - s[0])).exp())
        })
        .sum();
    (factor / (2.0 * a * a * a) * integral).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn parameters() -> HullWhiteOneFactorPiecewiseConstantParameters {
        HullWhiteOneFactorPiecewiseConstantParameters::new(
            0.05,
            vec![0.01, 0.011, 0.012, 0.013, 0.014],
            vec![0.5, 1.0, 2.0, 5.0],
        )
        .unwrap()
    }

    #[test]
    fn test_alpha_reference_values() {
        let p = parameters();
        assert_relative_eq!(alpha(&p, 0.0, 0.25, 0.26, 0.5), 0.001184819660237677, epsilon = 1e-15);
        assert_relative_eq!(alpha(&p, 0.0, 0.25, 0.26, 5.0), 0.020959192845069877, epsilon = 1e-14);
        // Crosses the 0.5 and 1.0 breakpoints.
        assert_relative_eq!(alpha(&p, 0.1, 1.5, 1.6, 3.0), 0.01711559762697873, epsilon = 1e-14);
    }

    #[test]
    fn test_alpha_constant_volatility_closed_form() {
        let p = HullWhiteOneFactorPiecewiseConstantParameters::constant(0.05, 0.01).unwrap();
        assert_relative_eq!(alpha(&p, 0.0, 2.0, 2.1, 6.0), 0.04746782748225805, epsilon = 1e-14);
        assert_eq!(alpha(&p, 0.0, 2.0, 3.0, 3.0), 0.0);
    }

    #[test]
    fn test_futures_convexity_factor() {
        let p = parameters();
        assert_relative_eq!(
            futures_convexity_factor(&p, 0.25, 5.0, 0.26),
            0.9999859410362665,
            epsilon = 1e-14
        );
        assert_relative_eq!(
            futures_convexity_factor(&p, 1.5, 7.0, 1.6),
            0.9993681788132388,
            epsilon = 1e-14
        );
        assert_eq!(futures_convexity_factor(&p, 0.25, 0.26, 0.26), 1.0);
    }
}
