//! Bisection root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Bisection root finder for monotone, bracketable equations.
///
/// Halves the bracket `[lo, hi]` each iteration, keeping the half on which
/// `f` changes sign. Slower than Newton-Raphson but cannot diverge once a
/// valid bracket is given, which makes it the method of choice for yields
/// and internal rates of return.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{BisectionSolver, SolverConfig};
///
/// let solver = BisectionSolver::new(SolverConfig::default());
/// let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct BisectionSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BisectionSolver<T> {
    /// Create a new bisection solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Find a root of `f` in `[lo, hi]`.
    ///
    /// Returns the midpoint once `|f(mid)| < tolerance` or the bracket
    /// half-width drops below tolerance. Endpoints given in reverse order are
    /// swapped.
    ///
    /// # Errors
    ///
    /// * `SolverError::NoBracket` - `f(lo)` and `f(hi)` share a sign (or are NaN)
    /// * `SolverError::MaxIterationsExceeded` - carries the last midpoint
    pub fn find_root<F>(&self, f: F, lo: T, hi: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let (mut a, mut b) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        let mut fa = f(a);
        let fb = f(b);

        if fa == T::zero() {
            return Ok(a);
        }
        if fb == T::zero() {
            return Ok(b);
        }
        // NaN endpoints fail this test too
        if !(fa * fb < T::zero()) {
            return Err(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            });
        }

        let two = T::from(2.0).unwrap();
        let mut mid = (a + b) / two;

        for _iteration in 0..self.config.max_iterations {
            mid = (a + b) / two;
            let f_mid = f(mid);

            if f_mid.abs() < self.config.tolerance || (b - a) / two < self.config.tolerance {
                return Ok(mid);
            }

            if fa * f_mid < T::zero() {
                b = mid;
            } else {
                a = mid;
                fa = f_mid;
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
            best_estimate: mid.to_f64().unwrap_or(f64::NAN),
        })
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
