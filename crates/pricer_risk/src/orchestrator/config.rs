//! Orchestrator tunables.

use crate::error::RiskError;
use crate::scenarios::ScenarioSpec;

/// Default CRR step count for early-exercise contracts.
pub const DEFAULT_BINOMIAL_STEPS: usize = 500;

/// Largest step count the lattice is refined to when the configured Δt
/// leaves the risk-neutral probability outside [0, 1].
pub const MAX_LATTICE_STEPS: usize = 10_000;

/// Resolution and risk settings shared by every request.
///
/// # Examples
/// ```
/// use pricer_risk::orchestrator::OrchestratorConfig;
///
/// let config = OrchestratorConfig {
///     binomial_steps: 1000,
///     var_confidence: 0.99,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OrchestratorConfig {
    /// Lattice steps for American and Bermudan contracts
    pub binomial_steps: usize,
    /// Spot, volatility and theta ladders
    pub scenarios: ScenarioSpec,
    /// Samples of the terminal density
    pub density_points: usize,
    /// Half-width of the density range in log standard deviations
    pub density_width: f64,
    /// VaR and ES confidence, in (0.5, 1)
    pub var_confidence: f64,
    /// VaR and ES horizon in calendar days
    pub var_horizon_days: f64,
    /// Spots on a strategy's expiry profile
    pub profile_points: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            binomial_steps: DEFAULT_BINOMIAL_STEPS,
            scenarios: ScenarioSpec::default(),
            density_points: 101,
            density_width: 4.0,
            var_confidence: 0.95,
            var_horizon_days: 1.0,
            profile_points: 101,
        }
    }
}

impl OrchestratorConfig {
    /// Checks every field before any pricing starts.
    pub fn validate(&self) -> Result<(), RiskError> {
        if self.binomial_steps == 0 {
            return Err(RiskError::config("binomial_steps", "must be positive"));
        }
        self.scenarios.validate()?;
        if self.density_points < 2 {
            return Err(RiskError::config("density_points", "must be at least 2"));
        }
        if !(self.density_width > 0.0 && self.density_width.is_finite()) {
            return Err(RiskError::config(
                "density_width",
                format!("must be positive, got {}", self.density_width),
            ));
        }
        if !(self.var_confidence > 0.5 && self.var_confidence < 1.0) {
            return Err(RiskError::config(
                "var_confidence",
                format!("must lie in (0.5, 1), got {}", self.var_confidence),
            ));
        }
        if !(self.var_horizon_days > 0.0 && self.var_horizon_days.is_finite()) {
            return Err(RiskError::config(
                "var_horizon_days",
                format!("must be positive, got {}", self.var_horizon_days),
            ));
        }
        if self.profile_points < 2 {
            return Err(RiskError::config("profile_points", "must be at least 2"));
        }
        Ok(())
    }
}
