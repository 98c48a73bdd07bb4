//! Ridder's root-finding method.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Ridder's method on a bracketing interval.
///
/// Each iteration evaluates the midpoint and fits an exponential through the
/// three points, giving quadratic convergence while never leaving the bracket.
/// Convergence is declared when successive estimates differ by less than
/// `config.tolerance` (an absolute accuracy on the root).
///
/// Requires: `f(a) * f(b) <= 0`.
///
/// # Example
///
/// ```rust
/// use trellis_math::solvers::{ridder, SolverConfig};
///
/// let f = |x: f64| x.exp() - 2.0;
/// let result = ridder(f, 0.0, 1.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - 2f64.ln()).abs() < 1e-10);
/// ```
pub fn ridder<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let (mut x_lo, mut x_hi) = (a, b);
    let mut f_lo = f(x_lo);
    let mut f_hi = f(x_hi);

    if f_lo == 0.0 {
        return Ok(SolverResult {
            root: x_lo,
            iterations: 0,
            residual: 0.0,
        });
    }
    if f_hi == 0.0 {
        return Ok(SolverResult {
            root: x_hi,
            iterations: 0,
            residual: 0.0,
        });
    }
    if f_lo * f_hi > 0.0 {
        return Err(MathError::InvalidBracket {
            a,
            b,
            fa: f_lo,
            fb: f_hi,
        });
    }

    let mut previous: Option<f64> = None;
    let mut residual = f_lo.abs().min(f_hi.abs());

    for iteration in 1..=config.max_iterations {
        let x_mid = 0.5 * (x_lo + x_hi);
        let f_mid = f(x_mid);
        let s = (f_mid * f_mid - f_lo * f_hi).sqrt();
        if s == 0.0 {
            return Ok(SolverResult {
                root: x_mid,
                iterations: iteration,
                residual: f_mid,
            });
        }

        let direction = if f_lo >= f_hi { 1.0 } else { -1.0 };
        let x_new = x_mid + (x_mid - x_lo) * direction * f_mid / s;
        if let Some(last) = previous {
            if (x_new - last).abs() <= config.tolerance {
                return Ok(SolverResult {
                    root: x_new,
                    iterations: iteration,
                    residual,
                });
            }
        }
        previous = Some(x_new);

        let f_new = f(x_new);
        residual = f_new;
        if f_new == 0.0 {
            return Ok(SolverResult {
                root: x_new,
                iterations: iteration,
                residual: 0.0,
            });
        }

        // Keep the tightest interval with a sign change.
        if f_mid.signum() != f_new.signum() {
            x_lo = x_mid;
            f_lo = f_mid;
            x_hi = x_new;
            f_hi = f_new;
        } else if f_lo.signum() != f_new.signum() {
            x_hi = x_new;
            f_hi = f_new;
        } else {
            x_lo = x_new;
            f_lo = f_new;
        }

        if (x_hi - x_lo).abs() <= config.tolerance {
            return Ok(SolverResult {
                root: x_new,
                iterations: iteration,
                residual,
            });
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        residual.abs(),
    ))
}
