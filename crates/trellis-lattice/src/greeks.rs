//! Sensitivities read off the lattice.

use serde::{Deserialize, Serialize};
use trellis_core::{PricingError, PricingResult};

use crate::tree::{Branching, LatticeTree};

/// Price and first-order sensitivities from a single lattice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeGreeks {
    /// Option value at the root.
    pub price: f64,
    /// Sensitivity to spot.
    pub delta: f64,
    /// Second-order sensitivity to spot.
    pub gamma: f64,
    /// Sensitivity to the passage of time, per year.
    pub theta: f64,
}

/// Extracts greeks from a rolled-back tree.
///
/// Theta compares the root with the centre node two binomial steps (one
/// trinomial step) later. When that node sits at a different spot, the
/// spot move is removed with a second-order expansion.
pub(crate) fn from_tree(tree: &LatticeTree) -> PricingResult<LatticeGreeks> {
    let price = tree.root_value();
    let spot = tree.prices(0)[0];
    match tree.branching() {
        Branching::Binomial => {
            if tree.steps() < 2 {
                return Err(PricingError::invalid_parameter(
                    "steps",
                    "binomial greeks need at least two steps",
                ));
            }
            let (p1, v1) = (tree.prices(1), tree.values(1));
            let (p2, v2) = (tree.prices(2), tree.values(2));

            let delta = (v1[1] - v1[0]) / (p1[1] - p1[0]);
            let upper = (v2[2] - v2[1]) / (p2[2] - p2[1]);
            let lower = (v2[1] - v2[0]) / (p2[1] - p2[0]);
            let gamma = 2.0 * (upper - lower) / (p2[2] - p2[0]);
            let theta = corrected_theta(price, spot, v2[1], p2[1], delta, gamma, tree.time_at(2));
            Ok(LatticeGreeks {
                price,
                delta,
                gamma,
                theta,
            })
        }
        Branching::Trinomial => {
            if tree.steps() < 1 {
                return Err(PricingError::invalid_parameter(
                    "steps",
                    "trinomial greeks need at least one step",
                ));
            }
            let (p1, v1) = (tree.prices(1), tree.values(1));

            let delta = (v1[2] - v1[0]) / (p1[2] - p1[0]);
            let upper = (v1[2] - v1[1]) / (p1[2] - p1[1]);
            let lower = (v1[1] - v1[0]) / (p1[1] - p1[0]);
            let gamma = (upper - lower) / (0.5 * (p1[2] - p1[0]));
            let theta = corrected_theta(price, spot, v1[1], p1[1], delta, gamma, tree.time_at(1));
            Ok(LatticeGreeks {
                price,
                delta,
                gamma,
                theta,
            })
        }
    }
}

fn corrected_theta(
    root_value: f64,
    spot: f64,
    later_value: f64,
    later_spot: f64,
    delta: f64,
    gamma: f64,
    elapsed: f64,
) -> f64 {
    let ds = later_spot - spot;
    (later_value - root_value - delta * ds - 0.5 * gamma * ds * ds) / elapsed
}
