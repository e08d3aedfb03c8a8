//! # Pricer Risk (L4: Application)
//!
//! Option pricing orchestration on top of the model and simulation layers.
//!
//! This crate provides:
//! - A single pricing entry point combining Black-Scholes, lattice, Monte
//!   Carlo, alternative-model and exotic prices
//! - Spot, volatility and theta scenario ladders
//! - Delta-gamma VaR, expected shortfall and scenario drawdown
//! - Risk-neutral probability of profit and terminal density
//! - Multi-leg strategy aggregation with expiry payoff profiles
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  orchestrator/ - request, config,       │
//! │                  price_option           │
//! │  scenarios/    - shock ladders          │
//! │  metrics       - VaR, ES, drawdown      │
//! │  probability   - breakeven, PoP         │
//! │  strategy      - multi-leg aggregation  │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_pricing (L3)           │
//! │  Monte Carlo with injectable RNG        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Scenario ladders are revalued on the rayon pool.
//!
//! ## Example
//!
//! ```
//! use pricer_models::instruments::{OptionContract, OptionType};
//! use pricer_risk::orchestrator::{price_option, OrchestratorConfig, PricingRequest, SimulationParams};
//!
//! let call = OptionContract::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
//! let request = PricingRequest::new(call).with_simulation(SimulationParams::seeded(50_000, 42));
//!
//! let result = price_option(&request, &OrchestratorConfig::default()).unwrap();
//! assert!((result.price - 10.4506).abs() < 1e-3);
//!
//! let mc = result.monte_carlo.unwrap();
//! assert!((mc.price - result.price).abs() < 5.0 * mc.std_error);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod metrics;
pub mod orchestrator;
pub mod probability;
pub mod scenarios;
pub mod strategy;

pub use error::RiskError;
pub use orchestrator::{price_option, price_strategy, OrchestratorConfig, PricingRequest, PricingResult};
