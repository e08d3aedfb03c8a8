//! Root-finding solvers.
//!
//! ## Available Solvers
//!
//! - [`NewtonRaphsonSolver`]: Quadratic convergence from a starting point,
//!   with an explicit or central-difference derivative
//! - [`BisectionSolver`]: Guaranteed convergence inside a sign-changing bracket
//!
//! Both are configured through [`SolverConfig`] and report failures as
//! [`SolverError`](crate::types::SolverError), carrying the best estimate
//! reached where iteration got under way.
//!
//! ## Examples
//!
//! ```
//! use pricer_core::math::solvers::{BisectionSolver, NewtonRaphsonSolver, SolverConfig};
//!
//! let f = |x: f64| x * x - 2.0;
//!
//! let newton = NewtonRaphsonSolver::new(SolverConfig::default());
//! let a = newton.find_root_numerical(f, 1.0, 1e-8).unwrap();
//!
//! let bisection = BisectionSolver::new(SolverConfig::default());
//! let b = bisection.find_root(f, 0.0, 2.0).unwrap();
//!
//! assert!((a - b).abs() < 1e-8);
//! ```

mod bisection;
mod config;
mod newton_raphson;

pub use bisection::BisectionSolver;
pub use config::SolverConfig;
pub use newton_raphson::NewtonRaphsonSolver;
