//! Option contract definitions.
//!
//! - [`OptionContract`]: Call/put terms with spot, strike, expiry, rate,
//!   dividend yield and volatility
//! - [`ExerciseStyle`]: European, American or Bermudan
//! - [`OptionCategory`]: Vanilla, barrier, Asian or lookback descriptor
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{
//!     BarrierSpec, BarrierType, OptionCategory, OptionContract, OptionType,
//! };
//!
//! let contract = OptionContract::new(OptionType::Call, 100.0, 105.0, 0.5, 0.03, 0.25).unwrap();
//! let category = OptionCategory::Barrier(BarrierSpec::new(BarrierType::UpAndOut, 130.0).unwrap());
//!
//! assert_eq!(contract.payoff(110.0), 5.0);
//! assert!(category.is_exotic());
//! ```

mod category;
mod error;
mod exercise;
mod option;

pub use category::{AsianAveraging, BarrierSpec, BarrierType, LookbackStrike, OptionCategory};
pub use error::InstrumentError;
pub use exercise::ExerciseStyle;
pub use option::{OptionContract, OptionType};
