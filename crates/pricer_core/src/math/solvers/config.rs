//! Solver configuration types.

use num_traits::Float;

/// Stopping rules shared by the root finders.
///
/// Newton-Raphson stops when `|f(x)| < tolerance`. Bisection stops when
/// `|f(mid)| < tolerance` or the half-width of the bracket falls below it.
/// Both give up after `max_iterations` and report the last iterate.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert_eq!(config.max_iterations, 100);
///
/// let tight = SolverConfig::default().with_tolerance(1e-13);
/// assert_eq!(tight.tolerance, 1e-13);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance.
    pub tolerance: T,

    /// Iteration cap; reaching it is a convergence failure.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// `tolerance = 1e-10`, `max_iterations = 100`.
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap(),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Replace the tolerance, keeping the iteration cap.
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        self.tolerance = tolerance;
        self
    }

    /// Replace the iteration cap, keeping the tolerance.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        assert!(max_iterations > 0, "max_iterations must be > 0");
        self.max_iterations = max_iterations;
        self
    }

    /// Tight tolerance (1e-14) with 500 iterations.
    pub fn high_precision() -> Self {
        Self {
            tolerance: T::from(1e-14).unwrap(),
            max_iterations: 500,
        }
    }

    /// Relaxed tolerance (1e-6) with 50 iterations.
    pub fn fast() -> Self {
        Self {
            tolerance: T::from(1e-6).unwrap(),
            max_iterations: 50,
        }
    }
}
