//! Bond futures price under Hull-White by numerical integration.
//!
//! Under the model the forward value of every deliverable at delivery is
//! a function of one standard normal variable `x`:
//!
//! ```text
//! pv_b(x) = Σ_j cfa_bj exp(-α_bj² / 2 - α_bj x) - e_b
//! cfa_bj  = P(t_bj) / P(delivery) * β_bj * c_bj / CF_b
//! e_b     = accrued_b / CF_b
//! ```
//!
//! The short delivers the cheapest bond at each `x`. The `x` axis is split
//! into regions owned by one bond, bounded by the crossing points `κ`, and
//! the price is the sum of the Gaussian expectations over each region:
//!
//! ```text
//! price = Σ_regions Σ_j cfa_bj (Φ(κ_hi + α_bj) - Φ(κ_lo + α_bj)) - e_b (Φ(κ_hi) - Φ(κ_lo))
//! ```
//!
//! Curve sensitivities come from a reverse sweep over the same quantities.

use log::{debug, trace, warn};
use trellis_core::{PricingError, PricingResult};
use trellis_curves::IssuerProvider;
use trellis_math::distributions::{normal_cdf, normal_inverse_cdf};
use trellis_math::solvers::{bracket_root, ridder, BracketConfig, SolverConfig};

use crate::bond::CashFlowEquivalent;
use crate::hull_white::{alpha, futures_convexity_factor};
use crate::provider::HullWhiteIssuerProvider;
use crate::security::BondFuturesSecurity;
use crate::sensitivity::MulticurveSensitivity;

/// Number of integration points used when none is given.
pub const DEFAULT_NB_POINTS: usize = 81;

/// Smallest supported number of integration points. The equally spaced
/// centre of the grid needs two points; wings are added from 20 points on.
pub const MIN_NB_POINTS: usize = 2;

/// One deliverable's forward value along the integration variable.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustedBond {
    /// Convexity-adjusted cash flows per unit of futures price.
    pub cfa: Vec<f64>,
    /// Hull-White volatility of each cash flow.
    pub alpha: Vec<f64>,
    /// Accrued interest divided by the conversion factor.
    pub accrued: f64,
}

impl AdjustedBond {
    /// Forward value net of accrued interest at `x`.
    pub fn value(&self, x: f64) -> f64 {
        self.cfa
            .iter()
            .zip(&self.alpha)
            .map(|(c, a)| c * (-a * a / 2.0 - a * x).exp())
            .sum::<f64>()
            - self.accrued
    }
}

/// `first.value(x) - second.value(x)`.
pub fn bond_difference(first: &AdjustedBond, second: &AdjustedBond, x: f64) -> f64 {
    first.value(x) - second.value(x)
}

/// Locates where two bonds cost the same, starting from a grid point
/// where the cheapest bond changes.
///
/// # Errors
///
/// Returns [`PricingError::NumericalFailure`] when no sign change is found
/// around `reference` or Ridder's method does not converge.
pub fn crossing_point(
    first: &AdjustedBond,
    second: &AdjustedBond,
    reference: f64,
    half_width: f64,
    bracket: &BracketConfig,
    solver: &SolverConfig,
) -> PricingResult<f64> {
    let difference = |x: f64| bond_difference(first, second, x);
    let (lower, upper) =
        bracket_root(difference, reference - half_width, reference + half_width, bracket)?;
    let result = ridder(difference, lower, upper, solver)?;
    trace!(
        "crossing at {} after {} Ridder iterations",
        result.root,
        result.iterations
    );
    Ok(result.root)
}

/// Integration points for `nb_points` points: equal probability spacing in
/// the centre and `nb_points / 20` sparser points on each wing.
///
/// # Errors
///
/// Fails when fewer than [`MIN_NB_POINTS`] points are left for the centre.
pub fn integration_grid(nb_points: usize) -> PricingResult<Vec<f64>> {
    let wing = nb_points / 20;
    let centre = nb_points - 2 * wing;
    if centre < MIN_NB_POINTS {
        return Err(PricingError::invalid_parameter(
            "nb_points",
            format!("at least {MIN_NB_POINTS} integration points are required, got {nb_points}"),
        ));
    }
    let start = normal_inverse_cdf(1.0 / (2.0 * centre as f64));

    let mut x = vec![0.0; nb_points];
    for i in 0..wing {
        let spread = 1.0 + (wing - i) as f64 / 2.0;
        x[i] = start * spread;
        x[nb_points - 1 - i] = -start * spread;
    }
    let step = -2.0 * start / (centre - 1) as f64;
    for i in 0..centre {
        x[wing + i] = start + i as f64 * step;
    }
    Ok(x)
}

/// Which bond is cheapest to deliver where.
///
/// `ctd[k]` owns the region between `crossings[k - 1]` and `crossings[k]`,
/// with open ends at minus and plus infinity.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationPartition {
    /// Basket index of the cheapest bond in each region, left to right.
    pub ctd: Vec<usize>,
    /// Crossing points between consecutive regions.
    pub crossings: Vec<f64>,
}

impl IntegrationPartition {
    /// True when one bond is cheapest over the whole grid.
    pub fn is_single(&self) -> bool {
        self.ctd.len() == 1
    }

    /// Bounds of region `k`; `None` stands for an infinite end.
    fn bounds(&self, k: usize) -> (Option<f64>, Option<f64>) {
        let lower = k.checked_sub(1).map(|i| self.crossings[i]);
        let upper = self.crossings.get(k).copied();
        (lower, upper)
    }
}

/// Gaussian mass of `(lower, upper)` shifted by `shift`.
fn region_mass(lower: Option<f64>, upper: Option<f64>, shift: f64) -> f64 {
    let upper = upper.map_or(1.0, |u| normal_cdf(u + shift));
    let lower = lower.map_or(0.0, |l| normal_cdf(l + shift));
    upper - lower
}

/// Forward quantities of one deliverable kept for the reverse sweep.
#[derive(Debug, Clone)]
struct DeliverableData {
    times: Vec<f64>,
    amounts: Vec<f64>,
    discount_factors: Vec<f64>,
    beta: Vec<f64>,
    conversion_factor: f64,
    adjusted: AdjustedBond,
}

#[derive(Debug, Clone)]
struct BasketData {
    curve_name: String,
    delivery: f64,
    delivery_discount_factor: f64,
    deliverables: Vec<DeliverableData>,
}

/// Hull-White numerical method for bond futures.
///
/// The method holds only numerical settings; market data is passed on each
/// call, so one instance serves any number of threads.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use trellis_core::Currency;
/// use trellis_curves::{IssuerCurves, ZeroCurve};
/// use trellis_futures::prelude::*;
///
/// let bond = FixedCouponBond::regular("UST", Currency::USD, 0.05, 2, 0.0, 5.0).unwrap();
/// let futures = BondFuturesSecurity::new(
///     0.24, 0.25, 0.25, 0.25, 0.26, 100_000.0, Currency::USD,
///     vec![BondFuturesDeliverable::new(bond, 1.0).unwrap()],
/// )
/// .unwrap();
/// let curves = IssuerCurves::new()
///     .with_curve("UST", Arc::new(ZeroCurve::flat("USD-GOVT", 0.02).unwrap()));
/// let data = HullWhiteIssuerProviderDiscount::new(
///     curves,
///     HullWhiteOneFactorPiecewiseConstantParameters::constant(0.05, 0.01).unwrap(),
/// );
///
/// let price = BondFuturesHullWhiteMethod::new().price(&futures, &data).unwrap();
/// assert!(price > 1.0 && price < 1.2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BondFuturesHullWhiteMethod {
    nb_points: usize,
    solver: SolverConfig,
    bracket: BracketConfig,
    bracket_half_width: f64,
}

impl Default for BondFuturesHullWhiteMethod {
    fn default() -> Self {
        Self {
            nb_points: DEFAULT_NB_POINTS,
            solver: SolverConfig::new(1e-8, 100),
            bracket: BracketConfig::default(),
            bracket_half_width: 0.01,
        }
    }
}

impl BondFuturesHullWhiteMethod {
    /// Method with 81 points, root accuracy 1e-8 and the default bracketing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default number of integration points.
    #[must_use]
    pub fn with_nb_points(mut self, nb_points: usize) -> Self {
        self.nb_points = nb_points;
        self
    }

    /// Sets the absolute accuracy of the crossing points.
    #[must_use]
    pub fn with_root_accuracy(mut self, accuracy: f64) -> Self {
        self.solver = self.solver.with_tolerance(accuracy);
        self
    }

    /// Sets the bracket expansion ratio and number of tries.
    #[must_use]
    pub fn with_bracket(mut self, ratio: f64, max_tries: u32) -> Self {
        self.bracket = BracketConfig { ratio, max_tries };
        self
    }

    /// Sets the half width of the initial bracket around a grid crossing.
    #[must_use]
    pub fn with_bracket_half_width(mut self, half_width: f64) -> Self {
        self.bracket_half_width = half_width;
        self
    }

    /// Default number of integration points.
    pub fn nb_points(&self) -> usize {
        self.nb_points
    }

    /// Futures price with the default number of points.
    pub fn price(
        &self,
        futures: &BondFuturesSecurity,
        data: &dyn HullWhiteIssuerProvider,
    ) -> PricingResult<f64> {
        self.price_with_points(futures, data, self.nb_points)
    }

    /// Futures price with `nb_points` integration points.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::NumericalFailure`] for an empty basket or a
    /// crossing that cannot be located, and
    /// [`PricingError::InvalidParameter`] for a missing issuer curve.
    pub fn price_with_points(
        &self,
        futures: &BondFuturesSecurity,
        data: &dyn HullWhiteIssuerProvider,
        nb_points: usize,
    ) -> PricingResult<f64> {
        let basket = basket_data(futures, data)?;
        let partition = self.partition(&basket, nb_points)?;

        if partition.is_single() {
            let bond = &basket.deliverables[partition.ctd[0]].adjusted;
            return Ok(bond.cfa.iter().sum::<f64>() - bond.accrued);
        }

        let mut price = 0.0;
        for (k, &index) in partition.ctd.iter().enumerate() {
            let (lower, upper) = partition.bounds(k);
            let bond = &basket.deliverables[index].adjusted;
            for (c, a) in bond.cfa.iter().zip(&bond.alpha) {
                price += c * region_mass(lower, upper, *a);
            }
            price -= bond.accrued * region_mass(lower, upper, 0.0);
        }
        Ok(price)
    }

    /// Price sensitivity to the issuer curve's zero rates, default points.
    pub fn price_curve_sensitivity(
        &self,
        futures: &BondFuturesSecurity,
        data: &dyn HullWhiteIssuerProvider,
    ) -> PricingResult<MulticurveSensitivity> {
        self.price_curve_sensitivity_with_points(futures, data, self.nb_points)
    }

    /// Price sensitivity to the issuer curve's zero rates.
    ///
    /// Returns one `(time, ∂price/∂r(time))` pair per cash flow of every
    /// bond that is cheapest somewhere on the grid (only the cheapest bond
    /// when it wins everywhere) and a final pair for the delivery time,
    /// under the issuer curve's name. The crossing points need no adjoint: the two bonds
    /// are worth the same there, so moving them does not move the price.
    pub fn price_curve_sensitivity_with_points(
        &self,
        futures: &BondFuturesSecurity,
        data: &dyn HullWhiteIssuerProvider,
        nb_points: usize,
    ) -> PricingResult<MulticurveSensitivity> {
        let basket = basket_data(futures, data)?;
        let partition = self.partition(&basket, nb_points)?;

        let price_bar = 1.0;
        let mut cfa_bar: Vec<Vec<f64>> = basket
            .deliverables
            .iter()
            .map(|d| vec![0.0; d.times.len()])
            .collect();

        if partition.is_single() {
            let index = partition.ctd[0];
            for bar in &mut cfa_bar[index] {
                *bar = price_bar;
            }
        } else {
            for (k, &index) in partition.ctd.iter().enumerate() {
                let (lower, upper) = partition.bounds(k);
                let alphas = &basket.deliverables[index].adjusted.alpha;
                for (bar, a) in cfa_bar[index].iter_mut().zip(alphas) {
                    *bar += region_mass(lower, upper, *a) * price_bar;
                }
            }
        }

        let dfd = basket.delivery_discount_factor;
        let mut dfd_bar = 0.0;
        let mut points = Vec::new();
        for (b, (deliverable, bars)) in basket.deliverables.iter().zip(&cfa_bar).enumerate() {
            if partition.is_single() && b != partition.ctd[0] {
                continue;
            }
            for j in 0..deliverable.times.len() {
                let df_bar = deliverable.beta[j] / dfd * deliverable.amounts[j]
                    / deliverable.conversion_factor
                    * bars[j];
                let t = deliverable.times[j];
                points.push((t, -t * deliverable.discount_factors[j] * df_bar));
                dfd_bar += -deliverable.adjusted.cfa[j] / dfd * bars[j];
            }
        }
        points.push((basket.delivery, -basket.delivery * dfd * dfd_bar));

        Ok(MulticurveSensitivity::of_curve(basket.curve_name, points))
    }

    /// Cheapest-to-deliver regions with the default number of points.
    pub fn ctd_partition(
        &self,
        futures: &BondFuturesSecurity,
        data: &dyn HullWhiteIssuerProvider,
    ) -> PricingResult<IntegrationPartition> {
        let basket = basket_data(futures, data)?;
        self.partition(&basket, self.nb_points)
    }

    fn partition(&self, basket: &BasketData, nb_points: usize) -> PricingResult<IntegrationPartition> {
        let x = integration_grid(nb_points)?;

        let mut ctd = Vec::new();
        let mut references = Vec::new();
        for (i, &xi) in x.iter().enumerate() {
            let mut cheapest = 0;
            let mut minimum = f64::INFINITY;
            for (b, deliverable) in basket.deliverables.iter().enumerate() {
                let pv = deliverable.adjusted.value(xi);
                if pv < minimum {
                    minimum = pv;
                    cheapest = b;
                }
            }
            if i == 0 {
                ctd.push(cheapest);
            } else if ctd.last() != Some(&cheapest) {
                ctd.push(cheapest);
                references.push(xi);
            }
        }

        let mut crossings = Vec::with_capacity(references.len());
        for (pair, &reference) in ctd.windows(2).zip(&references) {
            let kappa = crossing_point(
                &basket.deliverables[pair[0]].adjusted,
                &basket.deliverables[pair[1]].adjusted,
                reference,
                self.bracket_half_width,
                &self.bracket,
                &self.solver,
            )?;
            crossings.push(kappa);
        }

        let mut owners = ctd.clone();
        owners.sort_unstable();
        owners.dedup();
        if owners.len() < ctd.len() {
            warn!("a deliverable is cheapest on non-adjacent regions: {ctd:?}");
        }
        debug!(
            "{} integration points, cheapest to deliver {:?}, crossings {:?}",
            nb_points, ctd, crossings
        );
        Ok(IntegrationPartition { ctd, crossings })
    }
}

fn basket_data(
    futures: &BondFuturesSecurity,
    data: &dyn HullWhiteIssuerProvider,
) -> PricingResult<BasketData> {
    let basket = futures.basket();
    let first = basket
        .first()
        .ok_or_else(|| PricingError::numerical_failure("bond futures delivery basket is empty"))?;
    let issuer = first.bond.issuer();
    let parameters = data.hull_white_parameters();
    let curves: &dyn IssuerProvider = data.issuer_provider();

    let expiry = futures.last_notice_time();
    let delivery = futures.last_delivery_time();
    let delivery_discount_factor = curves.issuer_discount_factor(issuer, delivery)?;

    let mut deliverables = Vec::with_capacity(basket.len());
    for deliverable in basket {
        let cf = deliverable.conversion_factor;
        let flows = deliverable.bond.cash_flow_equivalent(delivery);
        let mut entry = DeliverableData {
            times: Vec::with_capacity(flows.len()),
            amounts: Vec::with_capacity(flows.len()),
            discount_factors: Vec::with_capacity(flows.len()),
            beta: Vec::with_capacity(flows.len()),
            conversion_factor: cf,
            adjusted: AdjustedBond {
                cfa: Vec::with_capacity(flows.len()),
                alpha: Vec::with_capacity(flows.len()),
                accrued: deliverable.bond.accrued_interest(delivery) / cf,
            },
        };
        for flow in &flows {
            let df = curves.issuer_discount_factor(issuer, flow.time)?;
            let beta = futures_convexity_factor(parameters, expiry, flow.time, delivery);
            entry.times.push(flow.time);
            entry.amounts.push(flow.amount);
            entry.discount_factors.push(df);
            entry.beta.push(beta);
            entry
                .adjusted
                .alpha
                .push(alpha(parameters, 0.0, expiry, delivery, flow.time));
            entry
                .adjusted
                .cfa
                .push(df / delivery_discount_factor * beta * flow.amount / cf);
        }
        deliverables.push(entry);
    }

    Ok(BasketData {
        curve_name: curves.issuer_curve_name(issuer)?,
        delivery,
        delivery_discount_factor,
        deliverables,
    })
}
