//! Zero-rate curve.

use trellis_math::interpolation::{Extrapolation, Interpolator, LinearInterpolator};

use crate::error::{CurveError, CurveResult};
use crate::traits::DiscountCurve;

/// Continuously compounded zero-rate curve.
///
/// Rates are interpolated linearly in time and held flat outside the
/// node range, so `df(t) = exp(-r(t) * t)`.
///
/// # Example
///
/// ```rust
/// use trellis_curves::{DiscountCurve, ZeroCurve};
///
/// let curve = ZeroCurve::new("EUR-GOVT", vec![1.0, 5.0], vec![0.01, 0.02]).unwrap();
/// let df = curve.discount_factor(3.0).unwrap();
/// assert!((df - (-0.015f64 * 3.0).exp()).abs() < 1e-14);
/// ```
#[derive(Debug, Clone)]
pub struct ZeroCurve {
    name: String,
    rates: LinearInterpolator,
}

impl ZeroCurve {
    /// Builds a curve from node times and zero rates.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidData`] when the nodes are fewer than two,
    /// unsorted, non-positive in time or of mismatched length.
    pub fn new(name: impl Into<String>, times: Vec<f64>, rates: Vec<f64>) -> CurveResult<Self> {
        if times.first().is_some_and(|&t| t <= 0.0) {
            return Err(CurveError::invalid_data("node times must be positive"));
        }
        let rates = LinearInterpolator::new(times, rates)
            .map_err(|e| CurveError::invalid_data(e.to_string()))?
            .with_extrapolation(Extrapolation::Flat);
        Ok(Self {
            name: name.into(),
            rates,
        })
    }

    /// A curve with the same zero rate at every time.
    ///
    /// # Errors
    ///
    /// Fails only for a non-finite rate.
    pub fn flat(name: impl Into<String>, rate: f64) -> CurveResult<Self> {
        if !rate.is_finite() {
            return Err(CurveError::invalid_data("rate must be finite"));
        }
        Self::new(name, vec![1.0, 2.0], vec![rate, rate])
    }

    /// Node times.
    pub fn times(&self) -> &[f64] {
        self.rates.xs()
    }

    /// Node zero rates.
    pub fn rates(&self) -> &[f64] {
        self.rates.ys()
    }
}

impl DiscountCurve for ZeroCurve {
    fn name(&self) -> &str {
        &self.name
    }

    fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        if t <= 0.0 {
            return Ok(1.0);
        }
        let r = self.rates.interpolate(t)?;
        Ok((-r * t).exp())
    }

    fn zero_rate(&self, t: f64) -> CurveResult<f64> {
        Ok(self.rates.interpolate(t.max(self.rates.min_x()))?)
    }
}
