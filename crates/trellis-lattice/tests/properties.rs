//! Structural properties that hold for any reasonable market.

use std::sync::Arc;

use approx::assert_relative_eq;
use proptest::prelude::*;
use trellis_core::OptionType;
use trellis_lattice::prelude::*;
use trellis_lattice::specification::SpecificationInputs;

const STEPS: usize = 51;

fn vanilla(strike: f64, steps: usize, option_type: OptionType, exercise: ExerciseStyle) -> VanillaOptionFunctionProvider {
    VanillaOptionFunctionProvider::new(strike, steps, option_type, exercise).unwrap()
}

proptest! {
    #[test]
    fn prop_american_put_dominates_european(
        spot in 60.0..140.0_f64,
        volatility in 0.1..0.5_f64,
        rate in 0.0..0.08_f64,
        maturity in 0.25..2.0_f64,
    ) {
        let market = LatticeMarket::new(spot, maturity, volatility, rate);
        for spec in [
            LatticeSpecification::CoxRossRubinstein,
            LatticeSpecification::Tian,
            LatticeSpecification::LeisenReimer,
            LatticeSpecification::CrrTrinomial,
        ] {
            let european = price(&spec, &vanilla(100.0, STEPS, OptionType::Put, ExerciseStyle::European), &market).unwrap();
            let american = price(&spec, &vanilla(100.0, STEPS, OptionType::Put, ExerciseStyle::American), &market).unwrap();
            prop_assert!(american >= european - 1e-12);
            prop_assert!(american >= (100.0 - spot).max(0.0) - 1e-12);
        }
    }

    #[test]
    fn prop_american_call_without_dividends_is_european(
        spot in 60.0..140.0_f64,
        volatility in 0.1..0.5_f64,
        rate in 0.01..0.08_f64,
    ) {
        let market = LatticeMarket::new(spot, 1.0, volatility, rate);
        for spec in [
            LatticeSpecification::CoxRossRubinstein,
            LatticeSpecification::JabbourKraminYoung,
        ] {
            let european = price(&spec, &vanilla(100.0, STEPS, OptionType::Call, ExerciseStyle::European), &market).unwrap();
            let american = price(&spec, &vanilla(100.0, STEPS, OptionType::Call, ExerciseStyle::American), &market).unwrap();
            prop_assert!((american - european).abs() < 1e-10);
        }
    }

    #[test]
    fn prop_risk_neutral_specifications_grow_at_carry(
        volatility in 0.1..0.6_f64,
        rate in -0.02..0.08_f64,
        dividend_yield in 0.0..0.04_f64,
    ) {
        let inputs = SpecificationInputs {
            spot: 100.0,
            strike: 105.0,
            maturity: 1.5,
            volatility,
            rate,
            dividend_yield,
            steps: STEPS,
        };
        let growth = ((rate - dividend_yield) * inputs.dt()).exp();
        for spec in LatticeSpecification::ALL {
            if !spec.is_exactly_risk_neutral() || spec == LatticeSpecification::TimeVarying {
                continue;
            }
            match spec.parameters(&inputs).unwrap() {
                trellis_lattice::specification::LatticeParameters::Binomial(p) => {
                    prop_assert!((0.0..=1.0).contains(&p.prob_up));
                    prop_assert!((p.expected_growth() - growth).abs() < 1e-12);
                }
                trellis_lattice::specification::LatticeParameters::Trinomial(p) => {
                    prop_assert!((0.0..=1.0).contains(&p.prob_up));
                    prop_assert!((0.0..=1.0).contains(&p.prob_middle));
                    prop_assert!((0.0..=1.0).contains(&p.prob_down));
                    prop_assert!((p.expected_growth() - growth).abs() < 1e-12);
                }
            }
        }
    }
}

#[test]
fn test_european_converges_to_black_scholes() {
    let market = LatticeMarket::new(100.0, 1.0, 0.25, 0.03).with_dividend_yield(0.01);
    for option_type in [OptionType::Call, OptionType::Put] {
        let expected = black_scholes_price(option_type, 100.0, 95.0, 1.0, 0.25, 0.03, 0.01).unwrap();
        let option = vanilla(95.0, 301, option_type, ExerciseStyle::European);

        let lr = price(&LatticeSpecification::LeisenReimer, &option, &market).unwrap();
        assert_relative_eq!(lr, expected, epsilon = 1e-3);

        for spec in [
            LatticeSpecification::CoxRossRubinstein,
            LatticeSpecification::JarrowRudd,
            LatticeSpecification::Trigeorgis,
            LatticeSpecification::Tian,
            LatticeSpecification::JabbourKraminYoung,
            LatticeSpecification::CrrTrinomial,
            LatticeSpecification::TrigeorgisTrinomial,
        ] {
            let value = price(&spec, &option, &market).unwrap();
            assert!((value - expected).abs() < 0.05, "{spec} {option_type}: {value} vs {expected}");
        }
    }
}

#[test]
fn test_constant_time_varying_matches_trigeorgis() {
    let steps = 40;
    let put = vanilla(100.0, steps, OptionType::Put, ExerciseStyle::American);
    let market = LatticeMarket::new(100.0, 1.0, 0.2, 0.05);
    let inputs = TimeVaryingInputs::constant(0.2, 0.05, 0.0, steps);

    let expected = greeks(&LatticeSpecification::Trigeorgis, &put, &market).unwrap();
    let value = greeks_time_varying(&LatticeSpecification::TimeVarying, &put, 100.0, 1.0, &inputs)
        .unwrap();
    assert_relative_eq!(value.price, expected.price, epsilon = 1e-10);
    assert_relative_eq!(value.delta, expected.delta, epsilon = 1e-10);
    assert_relative_eq!(value.gamma, expected.gamma, epsilon = 1e-10);
    assert_relative_eq!(value.theta, expected.theta, epsilon = 1e-8);
}

#[test]
fn test_time_varying_volatility_term_structure() {
    let steps = 60;
    let put = vanilla(100.0, steps, OptionType::Put, ExerciseStyle::European);
    let low = TimeVaryingInputs::constant(0.15, 0.02, 0.0, steps);
    let rising = TimeVaryingInputs::new(
        (0..steps).map(|i| 0.15 + 0.1 * i as f64 / steps as f64).collect(),
        vec![0.02; steps],
        vec![0.0; steps],
    );
    let spec = LatticeSpecification::TimeVarying;
    let base = price_time_varying(&spec, &put, 100.0, 1.0, &low).unwrap();
    let bumped = price_time_varying(&spec, &put, 100.0, 1.0, &rising).unwrap();
    assert!(bumped > base);

    let err = price_time_varying(&LatticeSpecification::Tian, &put, 100.0, 1.0, &low).unwrap_err();
    assert!(matches!(err, trellis_core::PricingError::Unsupported { .. }));
}

#[test]
fn test_barrier_parity() {
    let spec = LatticeSpecification::CoxRossRubinstein;
    let market = LatticeMarket::new(100.0, 1.0, 0.3, 0.03);
    let knock_out = BarrierOptionFunctionProvider::new(
        100.0,
        200,
        OptionType::Call,
        ExerciseStyle::European,
        85.0,
        BarrierType::DownAndOut,
    )
    .unwrap();

    let vanilla_value = price(&spec, knock_out.vanilla(), &market).unwrap();
    let out = price(&spec, &knock_out, &market).unwrap();
    let knock_in = knock_in_price(&spec, &knock_out, &market, None).unwrap();

    assert!(out < vanilla_value);
    assert!(knock_in > 0.0);
    assert_relative_eq!(knock_in + out, vanilla_value, epsilon = 1e-12);

    let with_rebate = knock_out.clone().with_rebate(2.0).unwrap();
    assert!(price(&spec, &with_rebate, &market).unwrap() > out);
    assert!(knock_in_price(&spec, &with_rebate, &market, None).is_err());
}

#[test]
fn test_up_and_out_american_put() {
    let spec = LatticeSpecification::Trigeorgis;
    let market = LatticeMarket::new(100.0, 1.0, 0.3, 0.03);
    let barrier = BarrierOptionFunctionProvider::new(
        100.0,
        200,
        OptionType::Put,
        ExerciseStyle::American,
        120.0,
        BarrierType::UpAndOut,
    )
    .unwrap();
    let value = price(&spec, &barrier, &market).unwrap();
    let unrestricted = price(&spec, barrier.vanilla(), &market).unwrap();
    assert!(value > 0.0 && value < unrestricted);
}

#[test]
fn test_digital_call_and_put_pay_cash() {
    let spec = LatticeSpecification::Tian;
    let market = LatticeMarket::new(100.0, 2.0, 0.25, 0.04);
    let call = DigitalOptionFunctionProvider::new(103.7, 100, OptionType::Call, ExerciseStyle::European, 5.0)
        .unwrap();
    let put = DigitalOptionFunctionProvider::new(103.7, 100, OptionType::Put, ExerciseStyle::European, 5.0)
        .unwrap();

    let total = price(&spec, &call, &market).unwrap() + price(&spec, &put, &market).unwrap();
    assert_relative_eq!(total, 5.0 * (-0.04_f64 * 2.0).exp(), epsilon = 1e-10);

    let american = DigitalOptionFunctionProvider::new(103.7, 100, OptionType::Call, ExerciseStyle::American, 5.0)
        .unwrap();
    assert!(price(&spec, &american, &market).unwrap() > price(&spec, &call, &market).unwrap());
}

#[test]
fn test_trait_objects_price_like_concrete_types() {
    let market = LatticeMarket::new(100.0, 1.0, 0.2, 0.01);
    let put = vanilla(100.0, 75, OptionType::Put, ExerciseStyle::American);
    let shared: Arc<dyn OptionFunctionProvider> = Arc::new(put.clone());
    let spec = LatticeSpecification::JarrowRudd;
    assert_eq!(
        price(&spec, &put, &market).unwrap(),
        price(&spec, shared.as_ref(), &market).unwrap()
    );
}

#[test]
fn test_invalid_parameters() {
    let market = LatticeMarket::new(100.0, 1.0, 0.2, 0.01);
    let put = vanilla(100.0, 100, OptionType::Put, ExerciseStyle::American);

    let even_lr = price(&LatticeSpecification::LeisenReimer, &put, &market).unwrap_err();
    assert!(even_lr.is_invalid_parameter());

    assert!(VanillaOptionFunctionProvider::american(-1.0, 100, OptionType::Put).is_err());
    assert!(VanillaOptionFunctionProvider::american(100.0, 0, OptionType::Put).is_err());

    // Drift far beyond the volatility pushes CRR probabilities out of range.
    let extreme = LatticeMarket::new(100.0, 1.0, 0.01, 0.5);
    let crr = price(&LatticeSpecification::CoxRossRubinstein, &put, &extreme).unwrap_err();
    assert!(crr.is_invalid_parameter());
}
