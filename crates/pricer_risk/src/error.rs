//! Risk layer error types.

use pricer_core::types::PricingError;
use pricer_models::analytical::AnalyticalError;
use pricer_models::instruments::InstrumentError;
use pricer_models::models::ModelError;
use pricer_pricing::mc::McError;
use thiserror::Error;

/// Errors raised while orchestrating a pricing request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    /// Orchestrator or scenario configuration out of range.
    #[error("Invalid configuration {name}: {message}")]
    InvalidConfig {
        /// Field name
        name: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// Request-level input rejected before pricing.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A strategy with neither legs nor shares.
    #[error("Strategy has no legs and no underlying position")]
    EmptyStrategy,

    /// Strategy legs quote different underlying spots.
    #[error("Strategy legs reference different spots: {expected} and {found}")]
    MismatchedUnderlying {
        /// Spot of the first leg
        expected: f64,
        /// Conflicting spot
        found: f64,
    },

    /// Contract validation failed.
    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    /// Closed-form evaluation failed.
    #[error(transparent)]
    Analytical(#[from] AnalyticalError),

    /// Lattice or stochastic extension failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Monte Carlo configuration or run failed.
    #[error(transparent)]
    Simulation(#[from] McError),
}

impl RiskError {
    pub(crate) fn config(name: &'static str, message: impl Into<String>) -> Self {
        RiskError::InvalidConfig {
            name,
            message: message.into(),
        }
    }
}

impl From<RiskError> for PricingError {
    fn from(err: RiskError) -> Self {
        match err {
            RiskError::Instrument(e) => e.into(),
            RiskError::Analytical(e) => e.into(),
            RiskError::Model(e) => e.into(),
            RiskError::Simulation(e) => e.into(),
            other => PricingError::InvalidInput(other.to_string()),
        }
    }
}
