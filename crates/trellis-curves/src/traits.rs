//! Core curve trait.

use crate::error::CurveResult;

/// A discount curve indexed by time in years.
///
/// Implementations must be cheap to query and safe to share across threads;
/// the pricing engines hold them behind `Arc` and call them concurrently.
pub trait DiscountCurve: Send + Sync {
    /// Curve identifier, used to key sensitivities.
    fn name(&self) -> &str;

    /// Discount factor from time 0 to `t`. Returns 1.0 for `t <= 0`.
    fn discount_factor(&self, t: f64) -> CurveResult<f64>;

    /// Continuously compounded zero rate to `t`.
    fn zero_rate(&self, t: f64) -> CurveResult<f64> {
        if t <= 0.0 {
            return Ok(0.0);
        }
        Ok(-self.discount_factor(t)?.ln() / t)
    }
}
