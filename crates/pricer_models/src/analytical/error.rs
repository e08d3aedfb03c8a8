//! Error types for analytical pricing operations.

use pricer_core::types::{PricingError, SolverError};
use thiserror::Error;

use crate::instruments::InstrumentError;

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidVolatility`: Negative or non-finite volatility
/// - `InvalidSpot`: Non-positive spot price
/// - `InvalidExpiry`: Expiry unusable for the requested calculation
/// - `ArbitrageBound`: Market price outside the no-arbitrage band
/// - `Instrument`: Contract failed validation
/// - `NoConvergence`: Implied volatility search failed
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid volatility (negative or non-finite).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid spot price (non-positive).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Expiry out of range for the calculation.
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Price violates the no-arbitrage bounds, so no volatility reproduces it.
    #[error("Price {price} outside no-arbitrage bounds ({lower}, {upper})")]
    ArbitrageBound {
        /// Quoted price
        price: f64,
        /// Lower bound (discounted intrinsic value)
        lower: f64,
        /// Upper bound
        upper: f64,
    },

    /// Contract terms rejected.
    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    /// Root finder failed.
    #[error("Implied volatility did not converge: {0}")]
    NoConvergence(#[from] SolverError),
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::NoConvergence(solver) => PricingError::ConvergenceFailure(solver),
            AnalyticalError::Instrument(inner) => inner.into(),
            other => PricingError::InvalidInput(other.to_string()),
        }
    }
}
