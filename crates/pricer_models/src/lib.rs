//! # Pricer Models (L2: Business Logic)
//!
//! Option contracts, pricing models and fixed income analytics.
//!
//! This crate provides:
//! - Option contract terms and exotic descriptors ([`instruments`])
//! - Black-Scholes prices, full Greeks and implied volatility ([`analytical`])
//! - Cox-Ross-Rubinstein lattice for early exercise ([`lattice`])
//! - Heston, SABR and Merton jump-diffusion approximations ([`models`])
//! - Barrier, Asian and lookback approximations ([`exotic`])
//! - Bond analytics, TVM solving and cash-flow measures ([`fixed_income`])
//!
//! ## Design Principles
//!
//! - **Validated value types**: constructors and `validate()` reject bad
//!   inputs before any computation
//! - **Enum dispatch** for model selection and option categories
//! - **Typed errors** per module, all convertible into
//!   [`pricer_core::types::PricingError`]
//!
//! ## Example
//!
//! ```
//! use pricer_models::analytical::BlackScholes;
//! use pricer_models::fixed_income::BondSpec;
//! use pricer_models::instruments::{OptionContract, OptionType};
//!
//! let call = OptionContract::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
//! let price = BlackScholes::price_contract(&call).unwrap();
//! assert!((price - 10.4506).abs() < 1e-3);
//!
//! let bond = BondSpec::new(1000.0, 0.05, 0.06, 5.0, 1).unwrap();
//! assert!((bond.price() - 957.876).abs() < 1e-3);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod exotic;
pub mod fixed_income;
pub mod instruments;
pub mod lattice;
pub mod models;
