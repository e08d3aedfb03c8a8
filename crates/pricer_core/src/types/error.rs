//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Top-level error surfaced by every pricing and analytics entry point
//! - `MathError`: Domain and overflow failures from the special-function kernel
//! - `SolverError`: Convergence failures from root-finding solvers
//! - `DateError`: Errors from date construction and parsing

use thiserror::Error;

/// Categorised pricing errors.
///
/// Provides structured error handling for pricing operations with
/// descriptive context for each failure mode.
///
/// # Variants
/// - `InvalidInput`: Invalid market data, contract terms or model parameters
/// - `NumericalDomain`: A function was evaluated outside its mathematical domain
/// - `ConvergenceFailure`: A root finder did not meet its tolerance
/// - `ArithmeticOverflow`: An intermediate result overflowed `f64`
/// - `ModelFailure`: Model assumptions violated during evaluation
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative spot price".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Invalid input data or parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Evaluation outside a function's domain (log of non-positive, even root of negative, ...)
    #[error("Numerical domain error: {0}")]
    NumericalDomain(String),

    /// Root finder failed to converge
    #[error("Convergence failure: {0}")]
    ConvergenceFailure(#[from] SolverError),

    /// Intermediate result overflowed
    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    /// Model failed to produce valid result
    #[error("Model failure: {0}")]
    ModelFailure(String),
}

impl PricingError {
    /// Returns the best estimate carried by a convergence failure, if any.
    ///
    /// Callers may accept the estimate, retry with other starting
    /// conditions, or surface the failure.
    pub fn best_estimate(&self) -> Option<f64> {
        match self {
            PricingError::ConvergenceFailure(err) => err.best_estimate(),
            _ => None,
        }
    }
}

impl From<MathError> for PricingError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::Domain { .. } => PricingError::NumericalDomain(err.to_string()),
            MathError::Overflow { .. } => PricingError::ArithmeticOverflow(err.to_string()),
        }
    }
}

impl From<DateError> for PricingError {
    fn from(err: DateError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

/// Special-function errors.
///
/// Raised by the checked variants in [`crate::math::special`]. The unchecked
/// variants return `NaN`/`∞` sentinels instead.
///
/// # Examples
/// ```
/// use pricer_core::types::MathError;
///
/// let err = MathError::Domain { function: "ln", argument: -1.0 };
/// assert_eq!(format!("{}", err), "ln is undefined at -1");
/// ```
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MathError {
    /// Argument outside the function's domain.
    #[error("{function} is undefined at {argument}")]
    Domain {
        /// Function name
        function: &'static str,
        /// Offending argument
        argument: f64,
    },

    /// Result too large to represent.
    #[error("{function} overflows at {argument}")]
    Overflow {
        /// Function name
        function: &'static str,
        /// Offending argument
        argument: f64,
    },
}

/// Root-finding solver errors.
///
/// Every variant is a convergence failure in the sense that the solver could
/// not certify a root. Where iteration got under way, the last iterate is
/// kept as `best_estimate`.
///
/// # Variants
/// - `MaxIterationsExceeded`: Solver failed to converge within iteration limit
/// - `DerivativeNearZero`: Derivative vanished during Newton-Raphson
/// - `NoBracket`: Function values at bracket endpoints have same sign
/// - `NumericalInstability`: Iteration produced a non-finite value
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100, best_estimate: 0.05 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// assert_eq!(err.best_estimate(), Some(0.05));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations (best estimate {best_estimate})")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
        /// Last iterate reached
        best_estimate: f64,
    },

    /// Derivative zero (division by zero in Newton-Raphson).
    #[error("Derivative near zero at x = {x}")]
    DerivativeNearZero {
        /// The x value where derivative vanished
        x: f64,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl SolverError {
    /// Returns the best available estimate of the root, if the solver got far
    /// enough to produce one.
    pub fn best_estimate(&self) -> Option<f64> {
        match self {
            SolverError::MaxIterationsExceeded { best_estimate, .. } => Some(*best_estimate),
            SolverError::DerivativeNearZero { x } => Some(*x),
            SolverError::NoBracket { .. } | SolverError::NumericalInstability(_) => None,
        }
    }
}

/// Date-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::ParseError("2024-13-01".to_string());
/// assert!(format!("{}", err).contains("2024-13-01"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),

    /// End date precedes start date.
    #[error("End date {end} precedes start date {start}")]
    Reversed {
        /// Start date (ISO 8601)
        start: String,
        /// End date (ISO 8601)
        end: String,
    },
}
