//! Criterion benchmarks for the pricing models and fixed income analytics.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_models::analytical::{implied_volatility, BlackScholes};
use pricer_models::fixed_income::{BondSpec, CashFlowSeries};
use pricer_models::instruments::{ExerciseStyle, OptionContract, OptionType};
use pricer_models::lattice::BinomialTree;
use pricer_models::models::{JumpDiffusionParams, ModelParameters, SabrParams};

fn atm_call() -> OptionContract {
    OptionContract::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2).unwrap()
}

fn bench_analytical(c: &mut Criterion) {
    let mut group = c.benchmark_group("analytical");
    let contract = atm_call();
    let price = BlackScholes::price_contract(&contract).unwrap();

    group.bench_function("bs_price", |b| b.iter(|| BlackScholes::price_contract(black_box(&contract))));
    group.bench_function("bs_greeks", |b| b.iter(|| BlackScholes::greeks_contract(black_box(&contract))));
    group.bench_function("implied_vol", |b| b.iter(|| implied_volatility(&contract, black_box(price))));

    group.finish();
}

fn bench_lattice(c: &mut Criterion) {
    let mut group = c.benchmark_group("binomial_american_put");
    let put = OptionContract::new(OptionType::Put, 100.0, 100.0, 1.0, 0.05, 0.2)
        .unwrap()
        .with_exercise(ExerciseStyle::American);

    for steps in [100, 500, 1000] {
        let tree = BinomialTree::new(steps).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(steps), &tree, |b, tree| {
            b.iter(|| tree.price(black_box(&put)))
        });
    }
    group.finish();
}

fn bench_models(c: &mut Criterion) {
    let mut group = c.benchmark_group("stochastic_extensions");
    let contract = atm_call();
    let sabr = ModelParameters::Sabr(SabrParams::new(0.3, 0.7, -0.4, 0.5));
    let jumps = ModelParameters::JumpDiffusion(JumpDiffusionParams::new(1.0, -0.05, 0.2));

    group.bench_function("sabr", |b| b.iter(|| sabr.price(black_box(&contract))));
    group.bench_function("jump_diffusion", |b| b.iter(|| jumps.price(black_box(&contract))));
    group.finish();
}

fn bench_fixed_income(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_income");
    let bond = BondSpec::new(1000.0, 0.05, 0.06, 30.0, 12).unwrap();
    let target = bond.price();
    let project = CashFlowSeries::new(vec![-1000.0, 200.0, 300.0, 400.0, 500.0, 600.0]).unwrap();

    group.bench_function("bond_analytics", |b| b.iter(|| black_box(&bond).analytics()));
    group.bench_function("ytm", |b| b.iter(|| bond.yield_to_maturity(black_box(target))));
    group.bench_function("irr", |b| b.iter(|| black_box(&project).irr()));
    group.finish();
}

criterion_group!(benches, bench_analytical, bench_lattice, bench_models, bench_fixed_income);
criterion_main!(benches);
