//! Discrete dividends on the lattice.

use approx::assert_relative_eq;
use trellis_core::OptionType;
use trellis_lattice::prelude::*;

const STEPS: usize = 200;

#[test]
fn test_european_cash_dividend_escrowed_spot() {
    let spec = LatticeSpecification::CoxRossRubinstein;
    let rate = 0.05;
    let dividends = DividendFunctionProvider::cash(vec![0.6], vec![3.0]).unwrap();
    let call = VanillaOptionFunctionProvider::european(100.0, STEPS, OptionType::Call).unwrap();

    let with_dividend =
        price_with_dividends(&spec, &call, &LatticeMarket::new(100.0, 1.0, 0.25, rate), Some(&dividends))
            .unwrap();
    let escrowed_spot = 100.0 - 3.0 * (-rate * 0.6_f64).exp();
    let escrowed = price(&spec, &call, &LatticeMarket::new(escrowed_spot, 1.0, 0.25, rate)).unwrap();

    assert_relative_eq!(with_dividend, escrowed, epsilon = 1e-10);
}

#[test]
fn test_european_proportional_dividend_scales_spot() {
    let spec = LatticeSpecification::CoxRossRubinstein;
    let dividends = DividendFunctionProvider::proportional(vec![0.4], vec![0.03]).unwrap();
    let put = VanillaOptionFunctionProvider::european(100.0, STEPS, OptionType::Put).unwrap();

    let with_dividend =
        price_with_dividends(&spec, &put, &LatticeMarket::new(100.0, 1.0, 0.2, 0.02), Some(&dividends))
            .unwrap();
    let scaled = price(&spec, &put, &LatticeMarket::new(100.0 * (1.0 - 0.03), 1.0, 0.2, 0.02)).unwrap();

    assert_relative_eq!(with_dividend, scaled, epsilon = 1e-10);
}

#[test]
fn test_dividends_raise_put_and_lower_call() {
    let spec = LatticeSpecification::Tian;
    let market = LatticeMarket::new(100.0, 1.0, 0.25, 0.03);
    let dividends = DividendFunctionProvider::cash(vec![0.25, 0.75], vec![1.5, 1.5]).unwrap();
    let put = VanillaOptionFunctionProvider::american(100.0, STEPS, OptionType::Put).unwrap();
    let call = VanillaOptionFunctionProvider::american(100.0, STEPS, OptionType::Call).unwrap();

    assert!(
        price_with_dividends(&spec, &put, &market, Some(&dividends)).unwrap()
            > price(&spec, &put, &market).unwrap()
    );
    assert!(
        price_with_dividends(&spec, &call, &market, Some(&dividends)).unwrap()
            < price(&spec, &call, &market).unwrap()
    );
}

#[test]
fn test_early_exercise_before_large_dividend() {
    let spec = LatticeSpecification::CoxRossRubinstein;
    let market = LatticeMarket::new(100.0, 1.0, 0.2, 0.05);
    let dividends = DividendFunctionProvider::cash(vec![0.9], vec![5.0]).unwrap();
    let european = VanillaOptionFunctionProvider::european(90.0, STEPS, OptionType::Call).unwrap();
    let american = european.with_exercise(ExerciseStyle::American);

    let e = price_with_dividends(&spec, &european, &market, Some(&dividends)).unwrap();
    let a = price_with_dividends(&spec, &american, &market, Some(&dividends)).unwrap();
    assert!(a > e, "american {a} european {e}");
}

#[test]
fn test_greeks_with_dividends() {
    let market = LatticeMarket::new(100.0, 1.0, 0.3, 0.02);
    let dividends = DividendFunctionProvider::proportional(vec![0.5], vec![0.02]).unwrap();
    let put = VanillaOptionFunctionProvider::american(100.0, 151, OptionType::Put).unwrap();
    let g = greeks_with_dividends(&LatticeSpecification::LeisenReimer, &put, &market, Some(&dividends))
        .unwrap();
    assert!(g.price > 0.0);
    assert!(g.delta < 0.0 && g.delta > -1.0);
    assert!(g.gamma > 0.0);
}

#[test]
fn test_dividend_outside_option_life() {
    let market = LatticeMarket::new(100.0, 1.0, 0.3, 0.02);
    let dividends = DividendFunctionProvider::cash(vec![1.5], vec![1.0]).unwrap();
    let put = VanillaOptionFunctionProvider::american(100.0, 50, OptionType::Put).unwrap();
    let err = price_with_dividends(&LatticeSpecification::Tian, &put, &market, Some(&dividends))
        .unwrap_err();
    assert!(err.is_invalid_parameter());
}

#[test]
fn test_leisen_reimer_centres_on_escrowed_spot() {
    let spec = LatticeSpecification::LeisenReimer;
    let rate = 0.05;
    let dividends = DividendFunctionProvider::cash(vec![0.5], vec![10.0]).unwrap();
    let call = VanillaOptionFunctionProvider::european(100.0, 101, OptionType::Call).unwrap();

    let with_dividend =
        price_with_dividends(&spec, &call, &LatticeMarket::new(100.0, 1.0, 0.2, rate), Some(&dividends))
            .unwrap();
    let escrowed_spot = 100.0 - 10.0 * (-rate * 0.5_f64).exp();
    let escrowed = price(&spec, &call, &LatticeMarket::new(escrowed_spot, 1.0, 0.2, rate)).unwrap();
    let exact =
        black_scholes_price(OptionType::Call, escrowed_spot, 100.0, 1.0, 0.2, rate, 0.0).unwrap();

    assert_relative_eq!(with_dividend, escrowed, epsilon = 1e-10);
    assert!((with_dividend - exact).abs() < 1e-3, "{with_dividend} vs {exact}");
}

#[test]
fn test_leisen_reimer_proportional_dividend_scales_spot() {
    let spec = LatticeSpecification::LeisenReimer;
    let dividends = DividendFunctionProvider::proportional(vec![0.3, 0.8], vec![0.02, 0.03]).unwrap();
    let put = VanillaOptionFunctionProvider::european(95.0, 101, OptionType::Put).unwrap();
    let market = LatticeMarket::new(100.0, 1.0, 0.25, 0.03);

    let with_dividend = price_with_dividends(&spec, &put, &market, Some(&dividends)).unwrap();
    let net_spot = 100.0 * 0.98 * 0.97;
    let scaled = price(&spec, &put, &market.with_spot(net_spot)).unwrap();

    assert_relative_eq!(with_dividend, scaled, epsilon = 1e-10);
}
