//! Fixed income error types.

use pricer_core::types::{MathError, PricingError, SolverError};
use thiserror::Error;

/// Errors from bond, TVM and cash-flow analytics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FixedIncomeError {
    /// Non-positive face value, rate out of range, empty series, ...
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Payment frequency outside {1, 2, 4, 12}.
    #[error("Invalid payment frequency {0}: expected 1, 2, 4 or 12")]
    InvalidFrequency(u32),

    /// A TVM problem must leave exactly one variable unknown.
    #[error("TVM problem has {unknowns} unknowns, expected exactly one")]
    Underdetermined {
        /// Number of unset variables
        unknowns: usize,
    },

    /// Root finder failed (bracket without a sign change, iteration limit, ...).
    #[error(transparent)]
    Convergence(#[from] SolverError),

    /// A closed form left its domain.
    #[error(transparent)]
    Domain(#[from] MathError),
}

impl FixedIncomeError {
    /// Best estimate reached by a failed root search.
    pub fn best_estimate(&self) -> Option<f64> {
        match self {
            FixedIncomeError::Convergence(err) => err.best_estimate(),
            _ => None,
        }
    }
}

impl From<FixedIncomeError> for PricingError {
    fn from(err: FixedIncomeError) -> Self {
        match err {
            FixedIncomeError::Convergence(e) => PricingError::ConvergenceFailure(e),
            FixedIncomeError::Domain(e) => e.into(),
            other => PricingError::InvalidInput(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_message() {
        let msg = format!("{}", FixedIncomeError::InvalidFrequency(3));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_conversion() {
        let err: PricingError = FixedIncomeError::Convergence(SolverError::NoBracket { a: 0.0, b: 1.0 }).into();
        assert!(matches!(err, PricingError::ConvergenceFailure(SolverError::NoBracket { .. })));

        let err: PricingError = FixedIncomeError::Underdetermined { unknowns: 2 }.into();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }
}
