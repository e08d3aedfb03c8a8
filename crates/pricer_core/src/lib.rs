//! # pricer_core: Numerical Foundation for the Pricing Library
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Special functions: erf/erfc, gamma, factorial, binomial, permutation (`math::special`)
//! - Standard normal CDF/PDF/quantile (`math::distributions`)
//! - Newton-Raphson and bisection root finders (`math::solvers`)
//! - Error types: `PricingError`, `MathError`, `SolverError`, `DateError` (`types::error`)
//! - Act/365 time helpers (`types::time`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date parsing for expiries
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::distributions::norm_cdf;
//! use pricer_core::math::solvers::{BisectionSolver, SolverConfig};
//! use pricer_core::math::special::{checked_sqrt, factorial};
//!
//! // Sentinel-returning kernel
//! assert_eq!(factorial(4.0), 24.0);
//! assert!(factorial(-1.0).is_nan());
//!
//! // Checked variant at an API boundary
//! assert!(checked_sqrt(-1.0).is_err());
//!
//! // Root finding
//! let solver = BisectionSolver::new(SolverConfig::default());
//! let median = solver.find_root(|x: f64| norm_cdf(x) - 0.5, -1.0, 1.0).unwrap();
//! assert!(median.abs() < 1e-6);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for error and configuration types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
