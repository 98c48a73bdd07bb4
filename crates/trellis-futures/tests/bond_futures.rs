//! Bond futures prices and curve sensitivities under Hull-White.

use std::sync::Arc;

use approx::assert_relative_eq;
use proptest::prelude::*;
use trellis_core::Currency;
use trellis_curves::{IssuerCurves, ParallelBump, ZeroCurve};
use trellis_futures::method::{crossing_point, integration_grid, AdjustedBond};
use trellis_futures::prelude::*;
use trellis_math::solvers::{BracketConfig, SolverConfig};

const ISSUER: &str = "UST";
const CURVE: &str = "USD-GOVT";

fn market() -> HullWhiteIssuerProviderDiscount {
    let curve = ZeroCurve::new(
        CURVE,
        vec![0.25, 1.0, 2.0, 5.0, 10.0, 30.0],
        vec![0.01, 0.012, 0.015, 0.02, 0.025, 0.03],
    )
    .unwrap();
    let parameters = HullWhiteOneFactorPiecewiseConstantParameters::new(
        0.05,
        vec![0.01, 0.011, 0.012, 0.013, 0.014],
        vec![0.5, 1.0, 2.0, 5.0],
    )
    .unwrap();
    HullWhiteIssuerProviderDiscount::new(
        IssuerCurves::new().with_curve(ISSUER, Arc::new(curve)),
        parameters,
    )
}

fn deliverable(coupon: f64, maturity: f64, conversion_factor: f64) -> BondFuturesDeliverable {
    let bond = FixedCouponBond::regular(ISSUER, Currency::USD, coupon, 2, 0.0, maturity).unwrap();
    BondFuturesDeliverable::new(bond, conversion_factor).unwrap()
}

fn futures(basket: Vec<BondFuturesDeliverable>) -> BondFuturesSecurity {
    BondFuturesSecurity::new(0.24, 0.25, 0.25, 0.25, 0.26, 100_000.0, Currency::USD, basket)
        .unwrap()
}

fn four_bond_futures() -> BondFuturesSecurity {
    futures(vec![
        deliverable(0.05, 5.0, 1.0),
        deliverable(0.02, 7.5, 0.82),
        deliverable(0.065, 10.0, 1.05),
        deliverable(0.03, 6.0, 0.9),
    ])
}

fn three_bond_futures() -> BondFuturesSecurity {
    futures(vec![
        deliverable(0.05, 5.0, 1.0),
        deliverable(0.03, 6.0, 0.92),
        deliverable(0.02, 7.5, 0.85),
    ])
}

/// Central difference of the price under a 1bp parallel shift of the
/// issuer curve, per basis point.
fn finite_difference(futures: &BondFuturesSecurity, data: &HullWhiteIssuerProviderDiscount) -> f64 {
    let method = BondFuturesHullWhiteMethod::new();
    let up = method.price(futures, &data.bumped(ParallelBump::one_bp_up())).unwrap();
    let down = method.price(futures, &data.bumped(ParallelBump::one_bp_down())).unwrap();
    (up - down) / 2.0
}

// =============================================================================
// Price
// =============================================================================

#[test]
fn test_single_bond_is_adjusted_forward() {
    let data = market();
    let futures = futures(vec![deliverable(0.05, 5.0, 1.0)]);
    let method = BondFuturesHullWhiteMethod::new();

    let partition = method.ctd_partition(&futures, &data).unwrap();
    assert!(partition.is_single());
    assert!(partition.crossings.is_empty());

    let price = method.price(&futures, &data).unwrap();
    assert_relative_eq!(price, 1.1332485156183392, epsilon = 1e-12);
}

#[test]
fn test_two_bond_basket() {
    let data = market();
    let futures = futures(vec![deliverable(0.05, 5.0, 1.0), deliverable(0.02, 7.5, 0.86)]);
    let method = BondFuturesHullWhiteMethod::new();

    let partition = method.ctd_partition(&futures, &data).unwrap();
    assert_eq!(partition.ctd, vec![0, 1]);
    assert_relative_eq!(partition.crossings[0], 0.6801785147066074, epsilon = 1e-7);
    assert_relative_eq!(method.price(&futures, &data).unwrap(), 1.1317702413854793, epsilon = 1e-10);
}

#[test]
fn test_four_bond_basket() {
    let data = market();
    let futures = four_bond_futures();
    let method = BondFuturesHullWhiteMethod::new();

    let partition = method.ctd_partition(&futures, &data).unwrap();
    assert_eq!(partition.ctd, vec![0, 1]);
    assert_relative_eq!(partition.crossings[0], 5.894317741548538, epsilon = 1e-7);
    assert_relative_eq!(method.price(&futures, &data).unwrap(), 1.1332485156155687, epsilon = 1e-10);
}

#[test]
fn test_three_regions() {
    let data = market();
    let futures = three_bond_futures();
    let method = BondFuturesHullWhiteMethod::new();

    let partition = method.ctd_partition(&futures, &data).unwrap();
    assert_eq!(partition.ctd, vec![0, 1, 2]);
    assert_relative_eq!(partition.crossings[0], 0.8647496643871144, epsilon = 1e-7);
    assert_relative_eq!(partition.crossings[1], 2.7809968523368664, epsilon = 1e-7);
    assert_relative_eq!(method.price(&futures, &data).unwrap(), 1.1327838326183048, epsilon = 1e-10);
}

#[test]
fn test_price_stable_in_grid_size() {
    let data = market();
    let futures = three_bond_futures();
    let method = BondFuturesHullWhiteMethod::new();

    let coarse = method.price_with_points(&futures, &data, 81).unwrap();
    let fine = method.price_with_points(&futures, &data, 161).unwrap();
    assert_relative_eq!(coarse, fine, epsilon = 1e-10);
    assert!(method.price_with_points(&futures, &data, 1).is_err());
}

#[test]
fn test_repeated_pricing_is_deterministic() {
    let data = market();
    let futures = four_bond_futures();
    let method = BondFuturesHullWhiteMethod::new();

    let first = method.ctd_partition(&futures, &data).unwrap();
    let second = method.ctd_partition(&futures, &data).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        method.price(&futures, &data).unwrap().to_bits(),
        method.price(&futures, &data).unwrap().to_bits()
    );
}

#[test]
fn test_crossings_lie_between_grid_neighbours() {
    let data = market();
    let futures = three_bond_futures();
    let method = BondFuturesHullWhiteMethod::new();
    let grid = integration_grid(method.nb_points()).unwrap();
    let partition = method.ctd_partition(&futures, &data).unwrap();

    for kappa in partition.crossings {
        assert!(kappa > grid[0] && kappa < grid[grid.len() - 1]);
    }
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_empty_basket() {
    let err = BondFuturesHullWhiteMethod::new()
        .price(&futures(vec![]), &market())
        .unwrap_err();
    assert!(err.is_numerical_failure());
}

#[test]
fn test_missing_issuer_curve() {
    let bond = FixedCouponBond::regular("BUND", Currency::USD, 0.05, 2, 0.0, 5.0).unwrap();
    let futures = futures(vec![BondFuturesDeliverable::new(bond, 1.0).unwrap()]);
    let method = BondFuturesHullWhiteMethod::new();

    assert!(method.price(&futures, &market()).unwrap_err().is_invalid_parameter());
    assert!(method
        .price_curve_sensitivity(&futures, &market())
        .unwrap_err()
        .is_invalid_parameter());
}

// =============================================================================
// Curve sensitivity
// =============================================================================

#[test]
fn test_sensitivity_single_bond_matches_bump() {
    let data = market();
    let futures = futures(vec![deliverable(0.05, 5.0, 1.0)]);
    let sensitivity = BondFuturesHullWhiteMethod::new()
        .price_curve_sensitivity(&futures, &data)
        .unwrap();

    let points = sensitivity.curve(CURVE).unwrap();
    // Ten coupons after delivery plus the delivery point.
    assert_eq!(points.len(), 11);
    assert_relative_eq!(points[10].0, 0.26);
    assert_relative_eq!(
        sensitivity.total(CURVE) * 1e-4,
        finite_difference(&futures, &data),
        epsilon = 1e-10
    );
}

#[test]
fn test_sensitivity_dominated_bond_has_no_points() {
    let data = market();
    let cheapest = deliverable(0.05, 5.0, 1.0);
    // Same bond at half the conversion factor costs twice as much everywhere.
    let dear = deliverable(0.05, 5.0, 0.5);
    let method = BondFuturesHullWhiteMethod::new();

    let basket = futures(vec![dear, cheapest.clone()]);
    let alone = futures(vec![cheapest]);
    let partition = method.ctd_partition(&basket, &data).unwrap();
    assert_eq!(partition.ctd, vec![1]);

    let from_basket = method.price_curve_sensitivity(&basket, &data).unwrap();
    let from_alone = method.price_curve_sensitivity(&alone, &data).unwrap();
    let points = from_basket.curve(CURVE).unwrap();
    let expected = from_alone.curve(CURVE).unwrap();
    assert_eq!(points.len(), 11);
    for (point, reference) in points.iter().zip(expected) {
        assert_relative_eq!(point.0, reference.0);
        assert_relative_eq!(point.1, reference.1, epsilon = 1e-15);
    }
}

#[test]
fn test_sensitivity_four_bond_basket() {
    let data = market();
    let futures = four_bond_futures();
    let sensitivity = BondFuturesHullWhiteMethod::new()
        .price_curve_sensitivity(&futures, &data)
        .unwrap();

    // One point per cash flow of every basket bond, plus delivery.
    assert_eq!(sensitivity.curve(CURVE).unwrap().len(), 10 + 15 + 20 + 12 + 1);
    assert_relative_eq!(sensitivity.parallel_sum() * 1e-4, -0.0004884947839561, epsilon = 1e-12);
    assert_relative_eq!(
        sensitivity.total(CURVE) * 1e-4,
        finite_difference(&futures, &data),
        epsilon = 1e-10
    );
}

#[test]
fn test_sensitivity_three_regions() {
    let data = market();
    let futures = three_bond_futures();
    let sensitivity = BondFuturesHullWhiteMethod::new()
        .price_curve_sensitivity(&futures, &data)
        .unwrap();

    assert_relative_eq!(sensitivity.total(CURVE) * 1e-4, -0.000510282796769349, epsilon = 1e-12);
    assert_relative_eq!(
        sensitivity.total(CURVE) * 1e-4,
        finite_difference(&futures, &data),
        epsilon = 1e-8
    );
}

#[test]
fn test_sensitivity_cleaned_keeps_total() {
    let data = market();
    let futures = four_bond_futures();
    let sensitivity = BondFuturesHullWhiteMethod::new()
        .price_curve_sensitivity(&futures, &data)
        .unwrap();
    let cleaned = sensitivity.cleaned();

    let points = cleaned.curve(CURVE).unwrap();
    assert!(points.windows(2).all(|w| w[0].0 < w[1].0));
    assert_relative_eq!(cleaned.total(CURVE), sensitivity.total(CURVE), epsilon = 1e-12);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    // Delivering the cheapest bond is worth no more than any single bond.
    #[test]
    fn prop_price_below_each_deliverable(second_cf in 0.80f64..0.92, third_cf in 0.78f64..0.90) {
        let data = market();
        let method = BondFuturesHullWhiteMethod::new();
        let basket = vec![
            deliverable(0.05, 5.0, 1.0),
            deliverable(0.03, 6.0, second_cf),
            deliverable(0.02, 7.5, third_cf),
        ];
        let price = method.price(&futures(basket.clone()), &data).unwrap();
        for bond in basket {
            let alone = method.price(&futures(vec![bond]), &data).unwrap();
            prop_assert!(price <= alone + 1e-12);
        }
    }

    #[test]
    fn prop_sensitivity_matches_bump(second_cf in 0.82f64..0.90) {
        let data = market();
        let futures = futures(vec![deliverable(0.05, 5.0, 1.0), deliverable(0.02, 7.5, second_cf)]);
        let sensitivity = BondFuturesHullWhiteMethod::new()
            .price_curve_sensitivity(&futures, &data)
            .unwrap();
        let fd = finite_difference(&futures, &data);
        prop_assert!((sensitivity.total(CURVE) * 1e-4 - fd).abs() < 3e-8);
    }

    // Swapping the bonds only flips the sign of the difference, so the
    // root does not depend on the order they are given in.
    #[test]
    fn prop_crossing_independent_of_order(
        kappa in -2.5f64..2.5,
        offset in -0.05f64..0.05,
        first_alpha in 0.01f64..0.15,
        second_alpha in 0.16f64..0.4,
        first_cfa in 0.8f64..1.2,
    ) {
        let first = AdjustedBond { cfa: vec![first_cfa], alpha: vec![first_alpha], accrued: 0.0 };
        // Forward values meet at kappa.
        let log_ratio = (second_alpha * second_alpha - first_alpha * first_alpha) / 2.0
            + (second_alpha - first_alpha) * kappa;
        let second = AdjustedBond {
            cfa: vec![first_cfa * log_ratio.exp()],
            alpha: vec![second_alpha],
            accrued: 0.0,
        };
        let bracket = BracketConfig::default();
        let solver = SolverConfig::new(1e-12, 100);

        let forward = crossing_point(&first, &second, kappa + offset, 0.01, &bracket, &solver).unwrap();
        let backward = crossing_point(&second, &first, kappa + offset, 0.01, &bracket, &solver).unwrap();
        prop_assert!((forward - backward).abs() < 1e-8, "{forward} vs {backward}");
        prop_assert!((forward - kappa).abs() < 1e-8, "{forward} vs {kappa}");
    }
}
