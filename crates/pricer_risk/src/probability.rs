//! Risk-neutral terminal distribution analytics.
//!
//! Under Black-Scholes the terminal spot is log-normal:
//! `ln(S_T/S) ~ N((r − q − σ²/2)·T, σ²·T)`. Probabilities here are
//! risk-neutral, not real-world.

use pricer_core::math::distributions::{norm_cdf, norm_pdf};
use pricer_models::instruments::{OptionContract, OptionType};

/// Below this, σ√T is treated as zero and S_T as the forward.
const DEGENERATE_EPS: f64 = 1e-10;

/// One sample of the terminal spot density.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DensityPoint {
    /// Terminal spot
    pub spot: f64,
    /// Probability density at `spot`
    pub density: f64,
}

/// Log drift and log standard deviation of `S_T / S`.
#[inline]
fn log_moments(contract: &OptionContract) -> (f64, f64) {
    let sigma = contract.volatility;
    let t = contract.expiry;
    (
        (contract.rate - contract.dividend_yield - 0.5 * sigma * sigma) * t,
        sigma * t.sqrt(),
    )
}

/// Risk-neutral probability that `S_T > level`.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionContract, OptionType};
/// use pricer_risk::probability::probability_above;
///
/// let c = OptionContract::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// // N(d2) for the at-the-money call
/// assert!((probability_above(&c, 100.0) - 0.5596).abs() < 1e-4);
/// assert_eq!(probability_above(&c, 0.0), 1.0);
/// ```
pub fn probability_above(contract: &OptionContract, level: f64) -> f64 {
    if level <= 0.0 {
        return 1.0;
    }
    let (mu, s) = log_moments(contract);
    if s < DEGENERATE_EPS {
        return if contract.spot * mu.exp() > level { 1.0 } else { 0.0 };
    }
    norm_cdf(((contract.spot / level).ln() + mu) / s)
}

/// Risk-neutral probability of finishing in the money.
pub fn probability_itm(contract: &OptionContract) -> f64 {
    let above = probability_above(contract, contract.strike);
    match contract.option_type {
        OptionType::Call => above,
        OptionType::Put => 1.0 - above,
    }
}

/// Breakeven spot at expiry for a premium of `premium` per unit.
///
/// Calls break even at `K + premium`, puts at `K − premium` (floored at 0).
pub fn breakeven(contract: &OptionContract, premium: f64) -> f64 {
    match contract.option_type {
        OptionType::Call => contract.strike + premium,
        OptionType::Put => (contract.strike - premium).max(0.0),
    }
}

/// Risk-neutral probability that a position of signed `quantity` is in
/// profit at expiry after paying (long) or receiving (short) `premium`.
///
/// A zero quantity has no profit and returns 0.
pub fn probability_of_profit(contract: &OptionContract, premium: f64, quantity: f64) -> f64 {
    if quantity == 0.0 {
        return 0.0;
    }
    let level = breakeven(contract, premium);
    let long = match contract.option_type {
        OptionType::Call => probability_above(contract, level),
        OptionType::Put if level <= 0.0 => 0.0,
        OptionType::Put => 1.0 - probability_above(contract, level),
    };
    if quantity > 0.0 {
        long
    } else {
        1.0 - long
    }
}

/// Log-normal density of `S_T` on `points` evenly spaced spots spanning
/// `width` log standard deviations either side of the median.
///
/// Empty when σ√T is zero (the distribution is a point mass) or fewer
/// than two points are requested.
pub fn terminal_density(contract: &OptionContract, points: usize, width: f64) -> Vec<DensityPoint> {
    let (mu, s) = log_moments(contract);
    if s < DEGENERATE_EPS || points < 2 {
        return Vec::new();
    }
    let low = contract.spot * (mu - width * s).exp();
    let high = contract.spot * (mu + width * s).exp();
    let step = (high - low) / (points - 1) as f64;

    (0..points)
        .map(|i| {
            let spot = low + step * i as f64;
            let z = ((spot / contract.spot).ln() - mu) / s;
            DensityPoint {
                spot,
                density: norm_pdf(z) / (spot * s),
            }
        })
        .collect()
}
