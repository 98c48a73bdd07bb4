//! Standard normal distribution helpers.
//!
//! Thin wrappers over the `statrs` error functions. The lattice crate uses
//! `normal_cdf` for its Black-Scholes reference prices; the bond-futures
//! engine uses the inverse for its integration grid and the cdf for region
//! weights.

use std::f64::consts::{PI, SQRT_2};

use statrs::function::erf::{erfc, erfc_inv};

/// Standard normal density.
#[must_use]
pub fn normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Standard normal cumulative distribution function.
#[must_use]
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Inverse of the standard normal CDF.
///
/// Returns `-inf` for `p <= 0` and `+inf` for `p >= 1`.
#[must_use]
pub fn normal_inverse_cdf(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }
    -SQRT_2 * erfc_inv(2.0 * p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_normal_cdf_values() {
        assert_relative_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-15);
        assert_relative_eq!(normal_cdf(1.0), 0.841344746068543, epsilon = 1e-12);
        assert_relative_eq!(normal_cdf(-1.959963984540054), 0.025, epsilon = 1e-12);
    }

    #[test]
    fn test_normal_pdf_peak() {
        assert_relative_eq!(normal_pdf(0.0), 0.398942280401433, epsilon = 1e-14);
        assert_relative_eq!(normal_pdf(1.5), normal_pdf(-1.5), epsilon = 1e-16);
    }

    #[test]
    fn test_inverse_cdf_tails() {
        assert_relative_eq!(normal_inverse_cdf(0.5), 0.0, epsilon = 1e-14);
        assert_relative_eq!(
            normal_inverse_cdf(1.0 / 122.0),
            -2.400036377127389,
            epsilon = 1e-9
        );
        assert!(normal_inverse_cdf(0.0).is_infinite());
    }

    proptest! {
        #[test]
        fn prop_inverse_round_trips(p in 1e-6f64..(1.0 - 1e-6)) {
            let x = normal_inverse_cdf(p);
            prop_assert!((normal_cdf(x) - p).abs() < 1e-10);
        }
    }
}
