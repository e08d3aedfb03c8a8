//! Criterion benchmarks for the pricing orchestrator.
//!
//! Benchmarks cover:
//! - Full `price_option` for European and American contracts
//! - Scenario ladder revaluation
//! - Strategy aggregation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::{ExerciseStyle, OptionContract, OptionType};
use pricer_risk::orchestrator::{price_option, OrchestratorConfig, PricingRequest};
use pricer_risk::scenarios::{ScenarioGrid, ScenarioSpec};
use pricer_risk::strategy::{Strategy, StrategyLeg};

fn contract(option_type: OptionType) -> OptionContract {
    OptionContract::new(option_type, 100.0, 100.0, 1.0, 0.05, 0.2).unwrap()
}

fn bench_price_option(c: &mut Criterion) {
    let mut group = c.benchmark_group("price_option");
    group.sample_size(20);

    let config = OrchestratorConfig::default();
    let european = PricingRequest::new(contract(OptionType::Put));
    let american = PricingRequest::new(contract(OptionType::Put).with_exercise(ExerciseStyle::American));

    for (label, request) in [("european", european), ("american", american)] {
        group.bench_with_input(BenchmarkId::from_parameter(label), &request, |b, request| {
            b.iter(|| price_option(black_box(request), &config))
        });
    }
    group.finish();
}

fn bench_scenarios(c: &mut Criterion) {
    let call = contract(OptionType::Call);
    let spec = ScenarioSpec {
        spot_steps: 41,
        volatility_steps: 41,
        theta_points: 91,
        ..Default::default()
    };
    c.bench_function("scenario_grid_bs", |b| {
        b.iter(|| ScenarioGrid::evaluate(black_box(&call), &spec, |c| Ok(BlackScholes::price_contract(c)?)))
    });
}

fn bench_strategy(c: &mut Criterion) {
    let mut strategy = Strategy::new().with_underlying(100.0);
    for strike in [80.0, 90.0, 100.0, 110.0, 120.0] {
        let call = OptionContract::new(OptionType::Call, 100.0, strike, 0.5, 0.03, 0.25).unwrap();
        let put = OptionContract::new(OptionType::Put, 100.0, strike, 0.5, 0.03, 0.25).unwrap();
        strategy = strategy
            .with_leg(StrategyLeg::new(call, -1.0, 2.0).unwrap())
            .with_leg(StrategyLeg::new(put, 1.0, 2.0).unwrap());
    }
    c.bench_function("strategy_analyse_10_legs", |b| b.iter(|| black_box(&strategy).analyse(401)));
}

criterion_group!(benches, bench_price_option, bench_scenarios, bench_strategy);
criterion_main!(benches);
