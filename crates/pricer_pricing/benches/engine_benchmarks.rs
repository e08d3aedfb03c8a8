//! Criterion benchmarks for the Monte Carlo engine.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pricer_models::instruments::{OptionContract, OptionType};
use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
use pricer_pricing::rng::PricerRng;

fn bench_rng(c: &mut Criterion) {
    let mut group = c.benchmark_group("rng");
    let mut buffer = vec![0.0; 65_536];
    group.throughput(Throughput::Elements(buffer.len() as u64));

    let mut rng = PricerRng::from_seed(42);
    group.bench_function("fill_uniform", |b| b.iter(|| rng.fill_uniform(black_box(&mut buffer))));
    group.bench_function("fill_normal", |b| b.iter(|| rng.fill_normal(black_box(&mut buffer))));
    group.finish();
}

fn bench_european(c: &mut Criterion) {
    let mut group = c.benchmark_group("mc_european");
    group.sample_size(20);
    let contract = OptionContract::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2).unwrap();

    for parallel in [false, true] {
        let config = MonteCarloConfig::builder()
            .n_paths(100_000)
            .seed(42)
            .parallel(parallel)
            .build()
            .unwrap();
        let pricer = MonteCarloPricer::new(config).unwrap();
        let label = if parallel { "parallel" } else { "sequential" };
        group.bench_with_input(BenchmarkId::from_parameter(label), &pricer, |b, pricer| {
            b.iter(|| pricer.price_european(black_box(&contract)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rng, bench_european);
criterion_main!(benches);
