//! Stochastic extension pricers and their parameter sets.
//!
//! Each model reduces to Black-Scholes evaluations with an adjusted
//! volatility or drift:
//! - [`heston`]: flat volatility √θ
//! - [`sabr`]: Hagan implied volatility
//! - [`jump_diffusion`]: Poisson series of Black-Scholes prices
//!
//! [`ModelParameters`] selects between them.

pub mod error;
pub mod heston;
pub mod jump_diffusion;
pub mod model_enum;
pub mod sabr;

pub use error::ModelError;
pub use model_enum::{HestonParams, JumpDiffusionParams, ModelParameters, SabrParams};
