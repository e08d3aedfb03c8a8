//! Pricing request inputs.

use pricer_models::instruments::{OptionCategory, OptionContract};
use pricer_models::models::ModelParameters;
use pricer_pricing::mc::{ConfigError, MonteCarloConfig, DEFAULT_PATHS};

use crate::error::RiskError;

/// Monte Carlo settings attached to a request.
///
/// Supplying these is what switches the simulation on.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationParams {
    /// Number of draws
    pub n_paths: usize,
    /// Fixed seed; `None` draws one from the OS
    pub seed: Option<u64>,
    /// Antithetic pairing
    pub antithetic: bool,
    /// Run chunks on the rayon pool
    pub parallel: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            n_paths: DEFAULT_PATHS,
            seed: None,
            antithetic: true,
            parallel: false,
        }
    }
}

impl SimulationParams {
    /// Seeded settings with the other fields at their defaults.
    pub fn seeded(n_paths: usize, seed: u64) -> Self {
        Self {
            n_paths,
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Builds the engine configuration.
    pub fn to_config(&self) -> Result<MonteCarloConfig, ConfigError> {
        MonteCarloConfig::builder()
            .n_paths(self.n_paths)
            .maybe_seed(self.seed)
            .antithetic(self.antithetic)
            .parallel(self.parallel)
            .build()
    }
}

/// Everything `price_option` needs for one contract.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionContract, OptionType};
/// use pricer_models::models::{HestonParams, ModelParameters};
/// use pricer_risk::orchestrator::{PricingRequest, SimulationParams};
///
/// let call = OptionContract::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let request = PricingRequest::new(call)
///     .with_model(ModelParameters::Heston(HestonParams::new(0.04, 2.0, 0.3, -0.7, 0.04)))
///     .with_simulation(SimulationParams::seeded(20_000, 7))
///     .with_quantity(-10.0);
/// assert!(request.validate().is_ok());
/// assert!(request.clone().with_quantity(0.0).validate().is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingRequest {
    /// Option terms
    pub contract: OptionContract,
    /// Alternative models to price alongside Black-Scholes
    pub models: Vec<ModelParameters>,
    /// Monte Carlo settings, if a simulation is wanted
    pub simulation: Option<SimulationParams>,
    /// Vanilla or exotic payoff family
    pub category: OptionCategory,
    /// Signed position size: positive long, negative short
    pub quantity: f64,
    /// Premium paid per unit; defaults to the fair value
    pub premium: Option<f64>,
}

impl PricingRequest {
    /// Long one unit of a vanilla contract.
    pub fn new(contract: OptionContract) -> Self {
        Self {
            contract,
            models: Vec::new(),
            simulation: None,
            category: OptionCategory::Vanilla,
            quantity: 1.0,
            premium: None,
        }
    }

    /// Adds a model to price alongside Black-Scholes.
    pub fn with_model(mut self, model: ModelParameters) -> Self {
        self.models.push(model);
        self
    }

    /// Enables Monte Carlo.
    pub fn with_simulation(mut self, params: SimulationParams) -> Self {
        self.simulation = Some(params);
        self
    }

    /// Sets the payoff family.
    pub fn with_category(mut self, category: OptionCategory) -> Self {
        self.category = category;
        self
    }

    /// Sets the signed position size.
    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the premium paid per unit.
    pub fn with_premium(mut self, premium: f64) -> Self {
        self.premium = Some(premium);
        self
    }

    /// Checks the contract and position terms.
    ///
    /// Model parameter sets are not checked here; invalid ones are skipped
    /// during pricing.
    pub fn validate(&self) -> Result<(), RiskError> {
        self.contract.validate()?;
        if !(self.quantity.is_finite() && self.quantity != 0.0) {
            return Err(RiskError::InvalidRequest(format!(
                "quantity must be finite and non-zero, got {}",
                self.quantity
            )));
        }
        if let Some(premium) = self.premium {
            if !(premium.is_finite() && premium >= 0.0) {
                return Err(RiskError::InvalidRequest(format!(
                    "premium must be non-negative, got {}",
                    premium
                )));
            }
        }
        Ok(())
    }
}
