//! CLI error types

use pricer_core::types::DateError;
use pricer_models::fixed_income::FixedIncomeError;
use pricer_models::instruments::InstrumentError;
use pricer_risk::RiskError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `fincalc` commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Date(#[from] DateError),

    #[error("Option terms rejected: {0}")]
    Instrument(#[from] InstrumentError),

    #[error("Pricing failed: {0}")]
    Pricing(#[from] RiskError),

    #[error("Calculation failed: {0}")]
    FixedIncome(#[from] FixedIncomeError),

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result alias for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;
