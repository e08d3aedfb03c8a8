//! Property-based tests across the pricing models and fixed income analytics.

use approx::assert_relative_eq;
use pricer_models::analytical::{implied_volatility, BlackScholes};
use pricer_models::fixed_income::{future_value, present_value, BondSpec, CashFlowSeries, PaymentTiming};
use pricer_models::instruments::{ExerciseStyle, OptionContract, OptionType};
use pricer_models::lattice::BinomialTree;
use pricer_models::models::{JumpDiffusionParams, ModelParameters, SabrParams};
use proptest::prelude::*;

fn contract(option_type: OptionType, s: f64, k: f64, t: f64, r: f64, q: f64, vol: f64) -> OptionContract {
    OptionContract::new(option_type, s, k, t, r, vol)
        .unwrap()
        .with_dividend_yield(q)
        .unwrap()
}

proptest! {
    #[test]
    fn put_call_parity(
        s in 20.0_f64..300.0,
        k in 20.0_f64..300.0,
        t in 0.01_f64..5.0,
        r in -0.02_f64..0.15,
        q in 0.0_f64..0.08,
        vol in 0.01_f64..1.5,
    ) {
        let call = BlackScholes::price_contract(&contract(OptionType::Call, s, k, t, r, q, vol)).unwrap();
        let put = BlackScholes::price_contract(&contract(OptionType::Put, s, k, t, r, q, vol)).unwrap();
        let forward_value = s * (-q * t).exp() - k * (-r * t).exp();
        prop_assert!((call - put - forward_value).abs() < 1e-8 * (s + k));
    }

    #[test]
    fn greeks_are_bounded(
        s in 20.0_f64..300.0,
        k in 20.0_f64..300.0,
        t in 0.01_f64..3.0,
        vol in 0.05_f64..1.0,
    ) {
        let c = contract(OptionType::Call, s, k, t, 0.03, 0.01, vol);
        let greeks = BlackScholes::greeks_contract(&c).unwrap();
        prop_assert!(greeks.delta >= 0.0 && greeks.delta <= 1.0);
        prop_assert!(greeks.gamma >= 0.0);
        prop_assert!(greeks.vega >= 0.0);
    }

    #[test]
    fn implied_vol_round_trip(k in 70.0_f64..140.0, vol in 0.08_f64..0.9, t in 0.25_f64..3.0) {
        let c = contract(OptionType::Call, 100.0, k, t, 0.02, 0.0, vol);
        let price = BlackScholes::price_contract(&c).unwrap();
        let lower = (100.0 - k * (-0.02 * t).exp()).max(0.0);
        prop_assume!(price - lower > 1e-3);
        let implied = implied_volatility(&c, price).unwrap();
        let repriced = BlackScholes::price_contract(&c.with_volatility(implied).unwrap()).unwrap();
        prop_assert!((repriced - price).abs() < 1e-8);
    }

    #[test]
    fn american_put_dominates_european(k in 80.0_f64..120.0, vol in 0.1_f64..0.6) {
        let euro = contract(OptionType::Put, 100.0, k, 1.0, 0.05, 0.0, vol);
        let amer = euro.clone().with_exercise(ExerciseStyle::American);
        let tree = BinomialTree::new(200).unwrap();
        let e = tree.price(&euro).unwrap();
        let a = tree.price(&amer).unwrap();
        prop_assert!(a >= e - 1e-12);
        prop_assert!(a >= euro.intrinsic_value() - 1e-12);
    }

    #[test]
    fn bond_yield_round_trip(
        rate in 0.001_f64..0.5,
        coupon in 0.0_f64..0.15,
        years in 1u32..30,
        freq_index in 0usize..4,
    ) {
        let freq = [1, 2, 4, 12][freq_index];
        let bond = BondSpec::new(1000.0, coupon, rate, f64::from(years), freq).unwrap();
        let ytm = bond.yield_to_maturity(bond.price()).unwrap();
        prop_assert!((ytm - rate).abs() < 1e-7);
    }

    #[test]
    fn tvm_round_trip(
        pv in -1e5_f64..1e5,
        pmt in -1e3_f64..1e3,
        rate in 0.0_f64..0.2,
        n in 1.0_f64..60.0,
        due in any::<bool>(),
    ) {
        let timing = if due { PaymentTiming::Beginning } else { PaymentTiming::End };
        let fv = future_value(pv, pmt, rate, n, timing);
        let back = present_value(fv, pmt, rate, n, timing);
        prop_assert!((back - pv).abs() <= 1e-8 * (1.0 + pv.abs() + fv.abs()));
    }

    #[test]
    fn irr_zeroes_npv(
        outlay in 100.0_f64..5000.0,
        flows in prop::collection::vec(1.0_f64..500.0, 1..8),
    ) {
        let total: f64 = flows.iter().sum();
        prop_assume!(total > outlay * 0.2);
        let mut amounts = vec![-outlay];
        amounts.extend(flows);
        let series = CashFlowSeries::new(amounts).unwrap();
        let irr = series.irr().unwrap();
        prop_assert!(series.npv(irr).unwrap().abs() < 1e-6 * outlay);
    }

    #[test]
    fn jump_diffusion_parity(lambda in 0.0_f64..2.0, mu in -0.3_f64..0.1, delta in 0.0_f64..0.4) {
        let params = ModelParameters::JumpDiffusion(JumpDiffusionParams::new(lambda, mu, delta));
        let call = params.price(&contract(OptionType::Call, 100.0, 105.0, 0.5, 0.04, 0.0, 0.25)).unwrap();
        let put = params.price(&contract(OptionType::Put, 100.0, 105.0, 0.5, 0.04, 0.0, 0.25)).unwrap();
        let forward_value = 100.0 - 105.0 * (-0.02_f64).exp();
        prop_assert!((call - put - forward_value).abs() < 1e-6);
    }
}

#[test]
fn binomial_converges_to_black_scholes() {
    for option_type in [OptionType::Call, OptionType::Put] {
        let c = contract(option_type, 100.0, 95.0, 0.7, 0.04, 0.02, 0.25);
        let bs = BlackScholes::price_contract(&c).unwrap();
        let errors: Vec<f64> = [25, 100, 400, 1600]
            .iter()
            .map(|&n| (BinomialTree::new(n).unwrap().price(&c).unwrap() - bs).abs())
            .collect();
        assert!(errors[3] < errors[0]);
        assert!(errors[3] < 5e-3);
    }
}

#[test]
fn concrete_scenarios() {
    let call = contract(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.0, 0.2);
    assert_relative_eq!(BlackScholes::price_contract(&call).unwrap(), 10.450_583_572, epsilon = 1e-5);

    let bond = BondSpec::new(1000.0, 0.05, 0.06, 5.0, 1).unwrap();
    assert_relative_eq!(bond.price(), 957.88, epsilon = 0.005);

    assert_relative_eq!(future_value(1000.0, 0.0, 0.05, 10.0, PaymentTiming::End), 1628.89, epsilon = 0.005);

    let project = CashFlowSeries::new(vec![-1000.0, 200.0, 300.0, 400.0, 500.0, 600.0]).unwrap();
    let irr = project.irr().unwrap();
    assert!(project.npv(irr).unwrap().abs() < 1e-6);
    assert!(irr > 0.2 && irr < 0.25);

    assert!(bond.yield_to_maturity(1300.0).is_err());
}

#[test]
fn sabr_flat_case_matches_black_scholes() {
    let c = contract(OptionType::Put, 100.0, 90.0, 1.5, 0.03, 0.0, 0.3);
    let sabr = ModelParameters::Sabr(SabrParams::new(0.3, 1.0, 0.2, 0.0));
    assert_relative_eq!(
        sabr.price(&c).unwrap(),
        BlackScholes::price_contract(&c).unwrap(),
        epsilon = 1e-12
    );
}
