//! Criterion benchmarks for the pricer_core numerical kernel.
//!
//! Measures the special functions and both root finders on the kinds of
//! equations the pricing layers solve.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::math::distributions::{norm_cdf, norm_inv_cdf};
use pricer_core::math::solvers::{BisectionSolver, NewtonRaphsonSolver, SolverConfig};
use pricer_core::math::special::{binomial, erf, gamma};

fn bench_special_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("special_functions");

    group.bench_function("erf", |b| b.iter(|| erf(black_box(0.7_f64))));
    group.bench_function("norm_cdf", |b| b.iter(|| norm_cdf(black_box(-1.3_f64))));
    group.bench_function("norm_inv_cdf", |b| b.iter(|| norm_inv_cdf(black_box(0.99))));
    group.bench_function("gamma_reflected", |b| b.iter(|| gamma(black_box(-2.5))));

    for n in [10.0, 50.0, 150.0] {
        group.bench_with_input(BenchmarkId::new("binomial", n as u32), &n, |b, &n| {
            b.iter(|| binomial(black_box(n), black_box(n / 2.0)))
        });
    }

    group.finish();
}

fn bench_root_finders(c: &mut Criterion) {
    let mut group = c.benchmark_group("root_finders");

    // Annuity rate equation: 1000 = 150 * (1 - (1+r)^-10) / r
    let f = |r: f64| 150.0 * (1.0 - (1.0 + r).powi(-10)) / r - 1000.0;

    group.bench_function("newton_numerical", |b| {
        let solver = NewtonRaphsonSolver::new(SolverConfig::default()).with_lower_bound(0.0, 1e-4);
        b.iter(|| solver.find_root_numerical(f, black_box(0.1), 1e-8))
    });

    group.bench_function("bisection", |b| {
        let solver = BisectionSolver::new(SolverConfig::default());
        b.iter(|| solver.find_root(f, black_box(1e-6), 1.0))
    });

    group.finish();
}

criterion_group!(benches, bench_special_functions, bench_root_finders);
criterion_main!(benches);
