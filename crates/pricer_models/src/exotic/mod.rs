//! Exotic option approximations.
//!
//! Every pricer here scales or re-parameterises a Black-Scholes vanilla:
//! - [`barrier`]: knock probability heuristic, `in + out = vanilla`
//! - [`asian`]: Kemna-Vorst geometric closed form, arithmetic via a fixed premium
//! - [`lookback`]: expected running extreme `S·e^{±0.5826σ√T}` times a fixed premium
//!
//! Exercise style is ignored; all payoffs are European.

pub mod asian;
pub mod barrier;
pub mod lookback;

pub use asian::{price_asian, ARITHMETIC_CALL_PREMIUM, ARITHMETIC_PUT_DISCOUNT};
pub use barrier::{knock_probability, price_barrier};
pub use lookback::{price_lookback, LOOKBACK_EXTREME_FACTOR, LOOKBACK_PREMIUM};

use crate::analytical::{AnalyticalError, BlackScholes};
use crate::instruments::{OptionCategory, OptionContract};

/// Prices `contract` under `category`; `Vanilla` is plain Black-Scholes.
///
/// # Examples
/// ```
/// use pricer_models::exotic::price_exotic;
/// use pricer_models::instruments::{
///     BarrierSpec, BarrierType, OptionCategory, OptionContract, OptionType,
/// };
///
/// let contract = OptionContract::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let vanilla = price_exotic(&contract, &OptionCategory::Vanilla).unwrap();
/// let barrier = BarrierSpec::new(BarrierType::UpAndOut, 130.0).unwrap();
/// let knock_out = price_exotic(&contract, &OptionCategory::Barrier(barrier)).unwrap();
/// assert!(knock_out < vanilla);
/// ```
pub fn price_exotic(contract: &OptionContract, category: &OptionCategory) -> Result<f64, AnalyticalError> {
    match category {
        OptionCategory::Vanilla => BlackScholes::price_contract(contract),
        OptionCategory::Barrier(spec) => price_barrier(contract, spec),
        OptionCategory::Asian(averaging) => price_asian(contract, *averaging),
        OptionCategory::Lookback(strike) => price_lookback(contract, *strike),
    }
}
