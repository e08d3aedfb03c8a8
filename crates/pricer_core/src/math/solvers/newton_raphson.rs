//! Newton-Raphson root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Newton-Raphson root finder.
///
/// Uses Newton's method: `x_{n+1} = x_n - f(x_n) / f'(x_n)` for fast
/// quadratic convergence on smooth functions. The derivative is either
/// supplied by the caller ([`find_root`](Self::find_root)) or estimated by
/// central differences ([`find_root_numerical`](Self::find_root_numerical)).
///
/// For quantities with a hard domain edge, such as an interest rate that
/// must stay above -100%, [`with_lower_bound`](Self::with_lower_bound) resets
/// any iterate that falls through the bound to a fixed restart value.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
///
/// // Solve x² - 2 = 0 (find √2)
/// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
///
/// let f = |x: f64| x * x - 2.0;
/// let f_prime = |x: f64| 2.0 * x;
///
/// let root = solver.find_root(f, f_prime, 1.0).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver<T: Float> {
    config: SolverConfig<T>,
    /// `(bound, restart)`: iterates at or below `bound` are reset to `restart`
    lower_bound: Option<(T, T)>,
}

impl<T: Float> NewtonRaphsonSolver<T> {
    /// Create a new Newton-Raphson solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self {
            config,
            lower_bound: None,
        }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Keep iterates above `bound` by resetting offenders to `restart`.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::NewtonRaphsonSolver;
    ///
    /// // ln(x) = 0 from x0 = 3 overshoots to a negative x without the clamp
    /// let solver = NewtonRaphsonSolver::with_defaults().with_lower_bound(0.0, 1e-4);
    /// let root = solver.find_root(|x: f64| x.ln(), |x| 1.0 / x, 3.0).unwrap();
    /// assert!((root - 1.0).abs() < 1e-8);
    /// ```
    pub fn with_lower_bound(mut self, bound: T, restart: T) -> Self {
        self.lower_bound = Some((bound, restart));
        self
    }

    /// Find a root of `f` using explicit derivative `f_prime`.
    ///
    /// # Errors
    ///
    /// * `SolverError::DerivativeNearZero` - `f'(x)` vanished; carries the iterate
    /// * `SolverError::MaxIterationsExceeded` - carries the last iterate
    /// * `SolverError::NumericalInstability` - an iterate became non-finite
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
    ///
    /// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
    ///
    /// // Solve x³ - x - 2 = 0
    /// let f = |x: f64| x * x * x - x - 2.0;
    /// let f_prime = |x: f64| 3.0 * x * x - 1.0;
    ///
    /// let root = solver.find_root(f, f_prime, 1.5).unwrap();
    /// assert!((f(root)).abs() < 1e-10);
    /// ```
    pub fn find_root<F, G>(&self, f: F, f_prime: G, x0: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        let mut x = self.clamp(x0);
        let epsilon = T::from(1e-30).unwrap();

        for _iteration in 0..self.config.max_iterations {
            let f_val = f(x);

            if f_val.abs() < self.config.tolerance {
                return Ok(x);
            }

            let f_prime_val = f_prime(x);

            if !(f_prime_val.abs() >= epsilon) {
                return Err(SolverError::DerivativeNearZero {
                    x: x.to_f64().unwrap_or(f64::NAN),
                });
            }

            #[allow(clippy::assign_op_pattern)]
            {
                x = x - f_val / f_prime_val;
            }

            if !x.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "Newton iteration produced non-finite value".to_string(),
                ));
            }

            x = self.clamp(x);
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
            best_estimate: x.to_f64().unwrap_or(f64::NAN),
        })
    }

    /// Find a root of `f` with a central-difference derivative.
    ///
    /// `f'(x) ≈ (f(x + h) - f(x - h)) / 2h`
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::NewtonRaphsonSolver;
    ///
    /// let solver = NewtonRaphsonSolver::with_defaults();
    /// let root = solver.find_root_numerical(|x: f64| x.exp() - 2.0, 0.0, 1e-8).unwrap();
    /// assert!((root - 2.0_f64.ln()).abs() < 1e-9);
    /// ```
    pub fn find_root_numerical<F>(&self, f: F, x0: T, h: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let two_h = h + h;
        self.find_root(&f, |x| (f(x + h) - f(x - h)) / two_h, x0)
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    #[inline]
    fn clamp(&self, x: T) -> T {
        match self.lower_bound {
            Some((bound, restart)) if x <= bound => restart,
            _ => x,
        }
    }
}
