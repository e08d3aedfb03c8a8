//! Lookback options via the expected running extreme.
//!
//! The expected maximum and minimum over [0, T] are approximated as
//! `S·e^{+cσ√T}` and `S·e^{-cσ√T}` with c = 0.5826. The extreme stands in
//! for the strike (floating) or the spot (fixed) of a vanilla, and the
//! result carries a fixed path-dependence premium.
//!
//! | Strike   | Call                     | Put                      |
//! |----------|--------------------------|--------------------------|
//! | Floating | vanilla call, K = min    | vanilla put, K = max     |
//! | Fixed    | vanilla call, S = max    | vanilla put, S = min     |

use crate::analytical::{AnalyticalError, BlackScholes};
use crate::instruments::{LookbackStrike, OptionContract, OptionType};

/// c in the expected-extreme approximation `S·e^{±cσ√T}`.
pub const LOOKBACK_EXTREME_FACTOR: f64 = 0.5826;

/// Multiplier applied to the adjusted vanilla price.
pub const LOOKBACK_PREMIUM: f64 = 1.1;

/// Lookback price.
///
/// At expiry the running extreme equals the spot, so a floating lookback is
/// worth 0 and a fixed one its intrinsic value.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
/// use pricer_models::exotic::price_lookback;
/// use pricer_models::instruments::{LookbackStrike, OptionContract, OptionType};
///
/// let call = OptionContract::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let vanilla = BlackScholes::price_contract(&call).unwrap();
/// assert!(price_lookback(&call, LookbackStrike::Fixed).unwrap() > vanilla);
/// ```
pub fn price_lookback(contract: &OptionContract, strike: LookbackStrike) -> Result<f64, AnalyticalError> {
    contract.validate()?;
    let t = contract.expiry;
    if t <= 0.0 {
        return Ok(match strike {
            LookbackStrike::Floating => 0.0,
            LookbackStrike::Fixed => contract.intrinsic_value(),
        });
    }

    let spread = (LOOKBACK_EXTREME_FACTOR * contract.volatility * t.sqrt()).exp();
    let expected_max = contract.spot * spread;
    let expected_min = contract.spot / spread;

    let mut adjusted = contract.clone();
    match (strike, contract.option_type) {
        (LookbackStrike::Floating, OptionType::Call) => adjusted.strike = expected_min,
        (LookbackStrike::Floating, OptionType::Put) => adjusted.strike = expected_max,
        (LookbackStrike::Fixed, OptionType::Call) => adjusted.spot = expected_max,
        (LookbackStrike::Fixed, OptionType::Put) => adjusted.spot = expected_min,
    }
    Ok(BlackScholes::price_contract(&adjusted)? * LOOKBACK_PREMIUM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn contract(option_type: OptionType) -> OptionContract {
        OptionContract::new(option_type, 100.0, 100.0, 1.0, 0.05, 0.2).unwrap()
    }

    #[test]
    fn test_floating_call_uses_expected_minimum() {
        let c = contract(OptionType::Call);
        let mut expected = c.clone();
        expected.strike = 100.0 * (-0.5826 * 0.2_f64).exp();
        let reference = BlackScholes::price_contract(&expected).unwrap() * 1.1;
        assert_relative_eq!(price_lookback(&c, LookbackStrike::Floating).unwrap(), reference, epsilon = 1e-12);
    }

    #[test]
    fn test_lookbacks_exceed_vanillas() {
        for option_type in [OptionType::Call, OptionType::Put] {
            let c = contract(option_type);
            let vanilla = BlackScholes::price_contract(&c).unwrap();
            assert!(price_lookback(&c, LookbackStrike::Floating).unwrap() > vanilla);
            assert!(price_lookback(&c, LookbackStrike::Fixed).unwrap() > vanilla);
        }
    }

    #[test]
    fn test_expiry_values() {
        let c = OptionContract::new(OptionType::Put, 90.0, 100.0, 0.0, 0.05, 0.2).unwrap();
        assert_eq!(price_lookback(&c, LookbackStrike::Floating).unwrap(), 0.0);
        assert_eq!(price_lookback(&c, LookbackStrike::Fixed).unwrap(), 10.0);
    }
}
