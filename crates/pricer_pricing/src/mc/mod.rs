//! Monte Carlo pricing of European payoffs under geometric Brownian motion.
//!
//! Each path draws one standard normal `Z` and jumps straight to expiry:
//!
//! ```text
//! S_T = S · exp((r − q − σ²/2)·T + σ·√T·Z)
//! ```
//!
//! The discounted sample mean is the price and `stdev / √N` its standard
//! error. With antithetic variates every `Z` is paired with `−Z` and the
//! pair average counts as one sample.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloPricer
//! ├── MonteCarloConfig  (paths, seed, antithetic, parallel, chunk size)
//! ├── RandomSource      (injected, or PricerRng per chunk)
//! └── McResult          (price, std error, confidence intervals)
//! ```
//!
//! # Reproducibility
//!
//! Engine-owned runs split the paths into fixed-size chunks, each with its
//! own generator seeded by `derive_seed(seed, chunk)`. Rayon may run the
//! chunks in any order; their statistics always merge in chunk order.

mod config;
mod error;
mod pricer;

pub use config::{
    MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_CHUNK_SIZE, DEFAULT_PATHS, MAX_PATHS,
};
pub use error::{ConfigError, McError};
pub use pricer::{McResult, MonteCarloPricer};
