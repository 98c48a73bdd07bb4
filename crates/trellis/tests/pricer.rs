//! The configured pricer against direct engine calls.

use std::sync::Arc;

use approx::assert_relative_eq;
use trellis::prelude::*;

#[test]
fn test_pricer_matches_engine() {
    let pricer = Pricer::from_toml_str(
        r#"
        name = "EQUITY"

        [lattice]
        specification = "TRIGEORGIS_TRINOMIAL"
        steps = 150
        "#,
    )
    .unwrap();
    let market = LatticeMarket::new(100.0, 1.0, 0.3, 0.02).with_dividend_yield(0.01);

    let put = VanillaOptionFunctionProvider::american(110.0, 150, OptionType::Put).unwrap();
    let direct = price(&LatticeSpecification::TrigeorgisTrinomial, &put, &market).unwrap();
    let configured = pricer
        .price_vanilla(110.0, OptionType::Put, ExerciseStyle::American, &market)
        .unwrap();

    assert_eq!(direct.to_bits(), configured.to_bits());
}

#[test]
fn test_pricer_prices_barrier_through_trait_object() {
    let pricer = Pricer::new(EngineConfig::default()).unwrap();
    let market = LatticeMarket::new(100.0, 1.0, 0.2, 0.03);
    let steps = pricer.config().lattice.steps;
    let vanilla = pricer
        .vanilla(100.0, OptionType::Call, ExerciseStyle::European)
        .unwrap();
    let barrier = BarrierOptionFunctionProvider::new(
        100.0,
        steps,
        OptionType::Call,
        ExerciseStyle::European,
        130.0,
        BarrierType::UpAndOut,
    )
    .unwrap();

    let functions: Vec<Box<dyn OptionFunctionProvider>> = vec![Box::new(vanilla), Box::new(barrier)];
    let prices: Vec<f64> = functions
        .iter()
        .map(|f| pricer.price_option(f.as_ref(), &market, None).unwrap())
        .collect();
    assert!(prices[1] < prices[0]);
}

#[test]
fn test_pricer_futures() {
    let pricer = Pricer::from_json_str(r#"{ "futures": { "nb_points": 161 } }"#).unwrap();
    let bond = FixedCouponBond::regular("UST", Currency::USD, 0.05, 2, 0.0, 5.0).unwrap();
    let futures = BondFuturesSecurity::new(
        0.24,
        0.25,
        0.25,
        0.25,
        0.26,
        100_000.0,
        Currency::USD,
        vec![BondFuturesDeliverable::new(bond, 1.0).unwrap()],
    )
    .unwrap();
    let data = HullWhiteIssuerProviderDiscount::new(
        IssuerCurves::new().with_curve("UST", Arc::new(ZeroCurve::flat("USD-GOVT", 0.02).unwrap())),
        HullWhiteOneFactorPiecewiseConstantParameters::constant(0.05, 0.01).unwrap(),
    );

    let configured = pricer.price_futures(&futures, &data).unwrap();
    let direct = BondFuturesHullWhiteMethod::new().price(&futures, &data).unwrap();
    assert_relative_eq!(configured, direct, epsilon = 1e-14);

    let sensitivity = pricer.futures_curve_sensitivity(&futures, &data).unwrap();
    assert!(sensitivity.curve("USD-GOVT").is_some());
}

#[test]
fn test_pricer_rejects_invalid_document() {
    assert!(Pricer::from_json_str(r#"{ "futures": { "nb_points": 1 } }"#).is_err());
    assert!(Pricer::from_json_str("not json").is_err());
}
