//! Analytical pricing formulas for European options.
//!
//! - [`BlackScholes`]: Black-Scholes-Merton prices and the full [`Greeks`] set
//! - [`implied_volatility`]: Volatility implied by a quoted price
//!
//! All pricing functions are generic over `T: Float`; the contract-level
//! helpers work in `f64`.

pub mod black_scholes;
pub mod error;
pub mod implied_vol;

pub use black_scholes::{BlackScholes, Greeks};
pub use error::AnalyticalError;
pub use implied_vol::implied_volatility;
