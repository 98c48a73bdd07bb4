//! Outward bracket expansion.

use log::trace;

use crate::error::{MathError, MathResult};

/// Settings for [`bracket_root`].
#[derive(Debug, Clone, Copy)]
pub struct BracketConfig {
    /// Growth ratio applied to the interval width at each expansion.
    pub ratio: f64,
    /// Maximum number of expansions.
    pub max_tries: u32,
}

impl Default for BracketConfig {
    fn default() -> Self {
        Self {
            ratio: 1.6,
            max_tries: 50,
        }
    }
}

/// Expands `[lower, upper]` until `f` changes sign across it.
///
/// The endpoint with the smaller absolute function value is pushed outward
/// by `ratio` times the current width, so the search walks toward the root.
///
/// # Errors
///
/// Returns [`MathError::InvalidInput`] for an empty interval and
/// [`MathError::BracketNotFound`] when no sign change appears within
/// `config.max_tries` expansions.
pub fn bracket_root<F>(
    f: F,
    lower: f64,
    upper: f64,
    config: &BracketConfig,
) -> MathResult<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    if lower == upper {
        return Err(MathError::invalid_input(
            "bracket endpoints must be distinct",
        ));
    }
    let (mut x1, mut x2) = if lower < upper {
        (lower, upper)
    } else {
        (upper, lower)
    };
    let mut f1 = f(x1);
    let mut f2 = f(x2);

    for tries in 0..config.max_tries {
        if f1 * f2 <= 0.0 {
            trace!("bracket [{x1}, {x2}] found after {tries} expansions");
            return Ok((x1, x2));
        }
        if f1.abs() < f2.abs() {
            x1 += config.ratio * (x1 - x2);
            f1 = f(x1);
        } else {
            x2 += config.ratio * (x2 - x1);
            f2 = f(x2);
        }
    }
    if f1 * f2 <= 0.0 {
        return Ok((x1, x2));
    }

    Err(MathError::BracketNotFound {
        lower: x1,
        upper: x2,
        tries: config.max_tries,
    })
}
