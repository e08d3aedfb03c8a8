//! # pricer_pricing: Monte Carlo Engine (Layer 3)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing simulates what the closed forms in `pricer_models` price
//! analytically:
//! - Injectable random sources with a seeded Box-Muller generator (`rng`)
//! - European Monte Carlo pricing with antithetic variates and optional
//!   rayon parallelism (`mc`)
//!
//! The engine holds no global state. A run is fully determined by its
//! configuration and seed, or by the [`rng::RandomSource`] the caller passes.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_models::instruments::{OptionContract, OptionType};
//! use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
//!
//! let contract = OptionContract::new(OptionType::Put, 100.0, 105.0, 0.5, 0.03, 0.25).unwrap();
//! let config = MonteCarloConfig::builder()
//!     .n_paths(20_000)
//!     .seed(7)
//!     .parallel(true)
//!     .build()
//!     .unwrap();
//!
//! let result = MonteCarloPricer::new(config)
//!     .unwrap()
//!     .price_european(&contract)
//!     .unwrap();
//! println!("{:.4} ± {:.4}", result.price, result.confidence_95());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialise `MonteCarloConfig` and `McResult`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod mc;
pub mod rng;
