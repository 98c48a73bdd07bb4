//! Parallel curve bumping.
//!
//! A parallel bump shifts every continuously compounded zero rate by the
//! same amount, which is the scenario a sum of zero-rate sensitivities
//! predicts to first order.

use std::sync::Arc;

use crate::error::CurveResult;
use crate::traits::DiscountCurve;

/// A parallel shift of zero rates, in basis points.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use trellis_curves::{DiscountCurve, ParallelBump, ZeroCurve};
///
/// let curve = Arc::new(ZeroCurve::flat("OIS", 0.02).unwrap());
/// let bumped = ParallelBump::one_bp_up().apply(curve);
/// assert!((bumped.zero_rate(5.0).unwrap() - 0.0201).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParallelBump {
    shift_bps: f64,
}

impl ParallelBump {
    /// Creates a new parallel bump of `shift_bps` basis points.
    #[must_use]
    pub fn new(shift_bps: f64) -> Self {
        Self { shift_bps }
    }

    /// Creates a 1bp upward shift.
    #[must_use]
    pub fn one_bp_up() -> Self {
        Self::new(1.0)
    }

    /// Creates a 1bp downward shift.
    #[must_use]
    pub fn one_bp_down() -> Self {
        Self::new(-1.0)
    }

    /// Returns (up, down) bumps for a central difference.
    #[must_use]
    pub fn symmetric(half_shift_bps: f64) -> (Self, Self) {
        (Self::new(half_shift_bps), Self::new(-half_shift_bps))
    }

    /// Returns the shift in basis points.
    #[must_use]
    pub fn shift_bps(&self) -> f64 {
        self.shift_bps
    }

    /// Returns the shift as a decimal (0.0001 = 1bp).
    #[must_use]
    pub fn shift_decimal(&self) -> f64 {
        self.shift_bps / 10_000.0
    }

    /// Wraps `curve` with this shift applied on the fly.
    #[must_use]
    pub fn apply(&self, curve: Arc<dyn DiscountCurve>) -> BumpedCurve {
        BumpedCurve {
            base: curve,
            shift_decimal: self.shift_decimal(),
        }
    }
}

impl Default for ParallelBump {
    fn default() -> Self {
        Self::one_bp_up()
    }
}

/// A curve with a parallel zero-rate shift applied.
///
/// Keeps the base curve's name so sensitivities from bumped and unbumped
/// runs line up.
#[derive(Clone)]
pub struct BumpedCurve {
    base: Arc<dyn DiscountCurve>,
    shift_decimal: f64,
}

impl BumpedCurve {
    /// Returns the applied shift in decimal form.
    #[must_use]
    pub fn shift_decimal(&self) -> f64 {
        self.shift_decimal
    }
}

impl std::fmt::Debug for BumpedCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BumpedCurve")
            .field("base", &self.base.name())
            .field("shift_decimal", &self.shift_decimal)
            .finish()
    }
}

impl DiscountCurve for BumpedCurve {
    fn name(&self) -> &str {
        self.base.name()
    }

    // df' = exp(-(r + s) t) = df * exp(-s t)
    fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        if t <= 0.0 {
            return Ok(1.0);
        }
        Ok(self.base.discount_factor(t)? * (-self.shift_decimal * t).exp())
    }
}
