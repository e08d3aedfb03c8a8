//! Property-based tests for the special functions and root finders.

use approx::assert_relative_eq;
use pricer_core::math::distributions::{norm_cdf, norm_inv_cdf};
use pricer_core::math::solvers::{BisectionSolver, NewtonRaphsonSolver, SolverConfig};
use pricer_core::math::special::{binomial, factorial, gamma, permutation};
use proptest::prelude::*;

proptest! {
    #[test]
    fn gamma_recurrence(x in 0.1_f64..50.0) {
        // Γ(x + 1) = x Γ(x)
        let lhs = gamma(x + 1.0);
        let rhs = x * gamma(x);
        prop_assert!((lhs - rhs).abs() <= 1e-10 * rhs.abs());
    }

    #[test]
    fn binomial_symmetry(n in 0u32..60, k in 0u32..60) {
        prop_assume!(k <= n);
        let n = n as f64;
        let k = k as f64;
        prop_assert_eq!(binomial(n, k), binomial(n, n - k));
    }

    #[test]
    fn pascal_rule(n in 1u32..50, k in 1u32..50) {
        prop_assume!(k < n);
        let (n, k) = (n as f64, k as f64);
        let lhs = binomial(n, k);
        let rhs = binomial(n - 1.0, k - 1.0) + binomial(n - 1.0, k);
        prop_assert!((lhs - rhs).abs() <= 1e-9 * lhs);
    }

    #[test]
    fn permutation_is_binomial_times_factorial(n in 0u32..25, r in 0u32..25) {
        prop_assume!(r <= n);
        let (n, r) = (n as f64, r as f64);
        let expected = binomial(n, r) * factorial(r);
        prop_assert!((permutation(n, r) - expected).abs() <= 1e-9 * expected);
    }

    #[test]
    fn norm_cdf_is_monotone(a in -6.0_f64..6.0, b in -6.0_f64..6.0) {
        prop_assume!(a < b);
        prop_assert!(norm_cdf(a) <= norm_cdf(b));
    }

    #[test]
    fn quantile_round_trip(p in 0.0005_f64..0.9995) {
        let z = norm_inv_cdf(p);
        prop_assert!((norm_cdf(z) - p).abs() < 1e-8);
    }

    #[test]
    fn solvers_agree_on_monotone_equation(target in 0.5_f64..20.0) {
        let f = |x: f64| x.exp() - target;
        let newton = NewtonRaphsonSolver::new(SolverConfig::default())
            .find_root(f, |x| x.exp(), 1.0)
            .unwrap();
        let bisection = BisectionSolver::new(SolverConfig::default())
            .find_root(f, -5.0, 5.0)
            .unwrap();
        prop_assert!((newton - bisection).abs() < 1e-8);
    }
}

#[test]
fn factorial_boundary() {
    assert!(factorial(170.0).is_finite());
    assert_eq!(factorial(171.0), f64::INFINITY);
    assert_relative_eq!(gamma(171.0), factorial(170.0), max_relative = 1e-10);
}
