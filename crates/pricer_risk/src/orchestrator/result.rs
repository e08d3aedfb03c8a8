//! Pricing result record.

use pricer_models::analytical::Greeks;
use pricer_models::lattice::LatticeResult;
use pricer_pricing::mc::McResult;

use crate::metrics::RiskMetrics;
use crate::probability::DensityPoint;
use crate::scenarios::ScenarioGrid;

/// Price of the contract under one alternative model.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelPrice {
    /// Model label
    pub model: String,
    /// European price under the model
    pub price: f64,
    /// Black-Scholes volatility the model reduces to, if a single one
    pub effective_volatility: Option<f64>,
}

/// Full output of [`price_option`](super::price_option).
///
/// Per-unit figures unless the field says otherwise.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Black-Scholes European price
    pub price: f64,
    /// Best available value: exotic, then lattice, then Black-Scholes
    pub fair_value: f64,
    /// Exercise value today
    pub intrinsic_value: f64,
    /// `fair_value − intrinsic_value`
    pub time_value: f64,
    /// Black-Scholes Greeks of one unit
    pub greeks: Greeks<f64>,
    /// Greeks scaled by the signed quantity
    pub position_greeks: Greeks<f64>,
    /// Lattice result for early-exercise contracts
    pub binomial: Option<LatticeResult>,
    /// Simulation estimate, when requested
    pub monte_carlo: Option<McResult>,
    /// Prices under the requested alternative models that validated
    pub model_prices: Vec<ModelPrice>,
    /// Exotic payoff price, for non-vanilla categories
    pub exotic_price: Option<f64>,
    /// Premium per unit used for breakeven and profit figures
    pub premium: f64,
    /// Terminal spot at which the position breaks even
    pub breakeven: f64,
    /// Risk-neutral probability the position profits at expiry
    pub probability_of_profit: f64,
    /// Risk-neutral probability of finishing in the money
    pub probability_itm: f64,
    /// Terminal spot density samples
    pub density: Vec<DensityPoint>,
    /// Spot, volatility and theta ladders per unit
    pub scenarios: ScenarioGrid,
    /// Position VaR, expected shortfall and drawdown
    pub risk: RiskMetrics,
}

impl PricingResult {
    /// Fair value of the whole position.
    #[inline]
    pub fn position_value(&self, quantity: f64) -> f64 {
        quantity * self.fair_value
    }

    /// Early-exercise premium over the European price, when a lattice ran.
    pub fn early_exercise_premium(&self) -> Option<f64> {
        self.binomial.map(|lattice| lattice.price - self.price)
    }
}
