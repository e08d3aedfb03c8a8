//! Barrier options by knock probability.
//!
//! The probability of touching H before expiry is taken from the
//! reflection-principle estimate for driftless log-prices,
//!
//! ```text
//! p = min(1, 2·N(-|ln(H/S)| / (σ√T)))
//! ```
//!
//! and the vanilla price is split between the two legs: knock-out is
//! `vanilla·(1 - p)`, knock-in is `vanilla·p`. A spot already at or through
//! the barrier has p = 1.

use pricer_core::math::distributions::norm_cdf;

use crate::analytical::{AnalyticalError, BlackScholes};
use crate::instruments::{BarrierSpec, OptionContract};

/// Estimated probability that the barrier is touched by expiry.
///
/// # Examples
/// ```
/// use pricer_models::exotic::knock_probability;
/// use pricer_models::instruments::{BarrierSpec, BarrierType};
///
/// let up = BarrierSpec::new(BarrierType::UpAndOut, 120.0).unwrap();
/// let p = knock_probability(100.0, &up, 0.2, 1.0);
/// assert!(p > 0.0 && p < 1.0);
/// assert_eq!(knock_probability(125.0, &up, 0.2, 1.0), 1.0);
/// ```
pub fn knock_probability(spot: f64, barrier: &BarrierSpec, volatility: f64, expiry: f64) -> f64 {
    if barrier.is_breached(spot) {
        return 1.0;
    }
    let diffusion = volatility * expiry.max(0.0).sqrt();
    if diffusion <= 0.0 {
        return 0.0;
    }
    let distance = (barrier.level / spot).ln().abs();
    (2.0 * norm_cdf(-distance / diffusion)).min(1.0)
}

/// Barrier price as a knock-probability share of the vanilla price.
pub fn price_barrier(contract: &OptionContract, barrier: &BarrierSpec) -> Result<f64, AnalyticalError> {
    let vanilla = BlackScholes::price_contract(contract)?;
    let p = knock_probability(contract.spot, barrier, contract.volatility, contract.expiry);
    Ok(if barrier.barrier_type.is_knock_in() {
        vanilla * p
    } else {
        vanilla * (1.0 - p)
    })
}
