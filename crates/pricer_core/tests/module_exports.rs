//! Integration tests for module exports.
//!
//! Verify that all public modules and types are reachable via absolute paths.

#[test]
fn test_special_module_exports() {
    use pricer_core::math::special::{
        acosh, binomial, checked_factorial, checked_gamma, checked_ln, checked_sqrt, erf, erfc,
        factorial, gamma, ln_gamma, nth_root, permutation, MAX_FACTORIAL_ARG,
    };

    let _ = erf(0.5_f64) + erfc(0.5_f64);
    let _ = gamma(3.5) + ln_gamma(3.5);
    let _ = factorial(5.0) + binomial(6.0, 2.0) + permutation(6.0, 2.0);
    assert!(checked_ln(1.0).is_ok());
    assert!(checked_sqrt(4.0).is_ok());
    assert!(nth_root(8.0, 3).is_ok());
    assert!(acosh(1.5).is_ok());
    assert!(checked_factorial(MAX_FACTORIAL_ARG).is_ok());
    assert!(checked_gamma(4.0).is_ok());
}

#[test]
fn test_distribution_module_exports() {
    use pricer_core::math::distributions::{norm_cdf, norm_inv_cdf, norm_pdf};

    let _ = norm_cdf(0.1_f64) + norm_pdf(0.1_f64) + norm_inv_cdf(0.4);
}

#[test]
fn test_solver_module_exports() {
    use pricer_core::math::solvers::{BisectionSolver, NewtonRaphsonSolver, SolverConfig};

    let config: SolverConfig<f64> = SolverConfig::fast();
    let _ = NewtonRaphsonSolver::new(config);
    let _ = BisectionSolver::new(config);
}

#[test]
fn test_types_module_exports() {
    use pricer_core::types::error::{DateError, MathError, PricingError, SolverError};
    use pricer_core::types::time::{days_to_years, parse_date, year_fraction, DAYS_PER_YEAR};

    let start = parse_date("2024-03-01").unwrap();
    let end = parse_date("2024-03-31").unwrap();
    assert!((year_fraction(start, end).unwrap() - days_to_years(30.0)).abs() < 1e-15);
    assert_eq!(DAYS_PER_YEAR, 365.0);

    let _: PricingError = MathError::Domain {
        function: "ln",
        argument: 0.0,
    }
    .into();
    let _: PricingError = SolverError::NumericalInstability("nan".to_string()).into();
    let _: PricingError = DateError::ParseError("x".to_string()).into();
}

#[test]
fn test_types_reexports() {
    use pricer_core::types::{PricingError, SolverError};

    let err: PricingError = SolverError::MaxIterationsExceeded {
        iterations: 100,
        best_estimate: 0.07,
    }
    .into();
    assert_eq!(err.best_estimate(), Some(0.07));
}
