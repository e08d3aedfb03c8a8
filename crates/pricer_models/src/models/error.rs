//! Model error types.

use pricer_core::types::PricingError;
use thiserror::Error;

use crate::analytical::AnalyticalError;
use crate::instruments::InstrumentError;

/// Errors from the stochastic extension pricers and the binomial lattice.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A model parameter is outside its admissible range.
    #[error("Invalid {model} parameter {name} = {value}")]
    InvalidParameter {
        /// Model label
        model: &'static str,
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// Lattice step count is zero.
    #[error("Invalid step count: {steps}")]
    InvalidSteps {
        /// Requested steps
        steps: usize,
    },

    /// The lattice needs σ > 0 to spread its nodes.
    #[error("Lattice requires positive volatility, got {volatility}")]
    NonPositiveVolatility {
        /// Contract volatility
        volatility: f64,
    },

    /// Risk-neutral up probability outside [0, 1].
    #[error("Risk-neutral probability {probability} outside [0, 1]; increase the step count")]
    ArbitrageProbability {
        /// Computed probability
        probability: f64,
    },

    /// A model produced a non-finite value.
    #[error("{model} produced a non-finite value: {message}")]
    NonFinite {
        /// Model label
        model: &'static str,
        /// Context
        message: String,
    },

    /// Contract validation failed.
    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    /// The Black-Scholes evaluation failed.
    #[error(transparent)]
    Analytical(#[from] AnalyticalError),
}

impl From<ModelError> for PricingError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Instrument(e) => e.into(),
            ModelError::Analytical(e) => e.into(),
            ModelError::ArbitrageProbability { .. } | ModelError::NonFinite { .. } => {
                PricingError::ModelFailure(err.to_string())
            }
            other => PricingError::InvalidInput(other.to_string()),
        }
    }
}
