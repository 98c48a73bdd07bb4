//! Linear interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::Interpolator;

/// Behaviour outside the node range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extrapolation {
    /// Queries outside the nodes fail.
    #[default]
    None,
    /// The first or last node value is held constant.
    Flat,
}

/// Piecewise-linear interpolation between data points.
///
/// # Example
///
/// ```rust
/// use trellis_math::interpolation::{Extrapolation, Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(vec![1.0, 2.0], vec![0.01, 0.03])
///     .unwrap()
///     .with_extrapolation(Extrapolation::Flat);
/// assert!((interp.interpolate(1.5).unwrap() - 0.02).abs() < 1e-15);
/// assert!((interp.interpolate(10.0).unwrap() - 0.03).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    extrapolation: Extrapolation,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, if the lengths
    /// differ, or if `xs` is not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.len() < 2 {
            return Err(MathError::insufficient_data(2, xs.len()));
        }
        if xs.len() != ys.len() {
            return Err(MathError::invalid_input(format!(
                "xs and ys must have same length: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(MathError::invalid_input(
                "x values must be strictly increasing",
            ));
        }

        Ok(Self {
            xs,
            ys,
            extrapolation: Extrapolation::None,
        })
    }

    /// Sets the extrapolation behaviour.
    #[must_use]
    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// Node abscissas.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Node values.
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    fn check_range(&self, x: f64) -> MathResult<()> {
        if self.extrapolation == Extrapolation::None && !self.in_range(x) {
            return Err(MathError::ExtrapolationNotAllowed {
                x,
                min: self.min_x(),
                max: self.max_x(),
            });
        }
        Ok(())
    }

    /// Index i with xs[i] <= x < xs[i+1], clamped to the last segment.
    fn find_segment(&self, x: f64) -> usize {
        let upper = self.xs.partition_point(|&probe| probe <= x);
        upper.saturating_sub(1).min(self.xs.len() - 2)
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        let last = self.xs.len() - 1;
        if x <= self.xs[0] {
            return Ok(self.ys[0]);
        }
        if x >= self.xs[last] {
            return Ok(self.ys[last]);
        }

        let i = self.find_segment(x);
        let t = (x - self.xs[i]) / (self.xs[i + 1] - self.xs[i]);
        Ok(self.ys[i] + t * (self.ys[i + 1] - self.ys[i]))
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        if !self.in_range(x) {
            return Ok(0.0);
        }
        let i = self.find_segment(x);
        Ok((self.ys[i + 1] - self.ys[i]) / (self.xs[i + 1] - self.xs[i]))
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}
