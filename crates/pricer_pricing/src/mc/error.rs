//! Error types for the Monte Carlo engine.

use pricer_core::types::PricingError;
use pricer_models::instruments::InstrumentError;
use thiserror::Error;

use super::config::MAX_PATHS;

/// Configuration error for the Monte Carlo pricer.
///
/// Raised when the configuration is built, before any path is drawn.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Path count outside [2, MAX_PATHS].
    #[error("Invalid path count {0}: must be in range [2, {max}]", max = MAX_PATHS)]
    InvalidPathCount(usize),

    /// Parallel chunk size of zero.
    #[error("Invalid chunk size {0}: must be positive")]
    InvalidChunkSize(usize),

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

/// Failure of a Monte Carlo pricing call.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum McError {
    /// Engine configuration rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Contract rejected before simulation.
    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    /// The estimator came out non-finite (overflowing drift or payoff).
    #[error("Monte Carlo estimate is not finite: price {price}, std error {std_error}")]
    NonFinite {
        /// Price estimate
        price: f64,
        /// Standard error estimate
        std_error: f64,
    },
}

impl From<ConfigError> for PricingError {
    fn from(err: ConfigError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

impl From<McError> for PricingError {
    fn from(err: McError) -> Self {
        match err {
            McError::Config(e) => e.into(),
            McError::Instrument(e) => e.into(),
            McError::NonFinite { .. } => PricingError::ModelFailure(err.to_string()),
        }
    }
}
