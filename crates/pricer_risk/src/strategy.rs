//! Multi-leg option strategies on a single underlying.
//!
//! Legs are aggregated by signed quantity. Shares of the underlying add
//! their value and a delta of one each. Current values and Greeks come from
//! Black-Scholes for every leg, so early exercise rights are not valued
//! here; price an American leg on its own through the orchestrator. The payoff profile is taken at
//! expiry, net of premiums, and is exact between grid points because every
//! leg's payoff is piecewise linear with kinks only at its strike.

use pricer_models::analytical::{BlackScholes, Greeks};
use pricer_models::instruments::{OptionContract, OptionType};
use tracing::debug;

use crate::error::RiskError;

/// Relative tolerance for legs quoting the same spot.
const SPOT_TOLERANCE: f64 = 1e-9;

/// One option position inside a strategy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrategyLeg {
    /// Option terms
    pub contract: OptionContract,
    /// Signed quantity: positive long, negative short
    pub quantity: f64,
    /// Premium per unit, paid when long and received when short
    pub premium: f64,
}

impl StrategyLeg {
    /// Creates a leg.
    ///
    /// # Errors
    /// `InvalidRequest` for a zero or non-finite quantity, or a negative
    /// premium. Contract errors pass through.
    pub fn new(contract: OptionContract, quantity: f64, premium: f64) -> Result<Self, RiskError> {
        contract.validate()?;
        if !(quantity.is_finite() && quantity != 0.0) {
            return Err(RiskError::InvalidRequest(format!(
                "leg quantity must be finite and non-zero, got {}",
                quantity
            )));
        }
        if !(premium.is_finite() && premium >= 0.0) {
            return Err(RiskError::InvalidRequest(format!(
                "leg premium must be non-negative, got {}",
                premium
            )));
        }
        Ok(Self {
            contract,
            quantity,
            premium,
        })
    }

    /// Net P&L of the leg at expiry for a terminal spot.
    #[inline]
    pub fn expiry_pnl(&self, terminal_spot: f64) -> f64 {
        self.quantity * (self.contract.payoff(terminal_spot) - self.premium)
    }
}

/// P&L at one terminal spot.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PayoffPoint {
    /// Terminal spot
    pub spot: f64,
    /// Net P&L of the whole strategy
    pub pnl: f64,
}

/// Aggregated view of a strategy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrategyAnalysis {
    /// Σ quantity·premium: positive for a net debit
    pub net_premium: f64,
    /// Current Black-Scholes (European) value of the legs plus the shares
    pub market_value: f64,
    /// Net Greeks; shares contribute delta only
    pub greeks: Greeks<f64>,
    /// Expiry P&L over `[0, 2·max(spot, strikes)]`, strikes included
    pub payoff_profile: Vec<PayoffPoint>,
    /// Terminal spots where the expiry P&L crosses zero
    pub breakevens: Vec<f64>,
    /// Largest expiry profit, `None` if unbounded as the spot rises
    pub max_profit: Option<f64>,
    /// Largest expiry loss as a positive number, `None` if unbounded
    pub max_loss: Option<f64>,
}

/// A set of option legs plus an optional stock position.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionContract, OptionType};
/// use pricer_risk::strategy::{Strategy, StrategyLeg};
///
/// // Bull call spread: long the 100 call, short the 110 call
/// let long = OptionContract::new(OptionType::Call, 100.0, 100.0, 0.5, 0.03, 0.25).unwrap();
/// let short = OptionContract::new(OptionType::Call, 100.0, 110.0, 0.5, 0.03, 0.25).unwrap();
/// let spread = Strategy::new()
///     .with_leg(StrategyLeg::new(long, 1.0, 7.5).unwrap())
///     .with_leg(StrategyLeg::new(short, -1.0, 3.5).unwrap());
///
/// let analysis = spread.analyse(101).unwrap();
/// assert_eq!(analysis.net_premium, 4.0);
/// assert!((analysis.breakevens[0] - 104.0).abs() < 1e-9);
/// assert!((analysis.max_profit.unwrap() - 6.0).abs() < 1e-9);
/// assert!((analysis.max_loss.unwrap() - 4.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Strategy {
    /// Option legs
    pub legs: Vec<StrategyLeg>,
    /// Signed shares of the underlying, bought at the current spot
    pub underlying_shares: f64,
    /// Current spot, required only when there are no legs to quote it
    #[cfg_attr(feature = "serde", serde(default))]
    pub spot: Option<f64>,
}

impl Strategy {
    /// Empty strategy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a leg.
    pub fn with_leg(mut self, leg: StrategyLeg) -> Self {
        self.legs.push(leg);
        self
    }

    /// Sets the stock position.
    pub fn with_underlying(mut self, shares: f64) -> Self {
        self.underlying_shares = shares;
        self
    }

    /// Sets the current spot of the underlying.
    pub fn with_spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Current spot shared by every leg and the explicit spot, if set.
    ///
    /// # Errors
    /// - `EmptyStrategy` with neither legs nor shares, or with shares but no
    ///   spot to value them at
    /// - `InvalidRequest` for a non-positive explicit spot
    /// - `MismatchedUnderlying` if two quotes disagree
    pub fn reference_spot(&self) -> Result<f64, RiskError> {
        if self.legs.is_empty() && self.underlying_shares == 0.0 {
            return Err(RiskError::EmptyStrategy);
        }
        if let Some(spot) = self.spot {
            if !(spot.is_finite() && spot > 0.0) {
                return Err(RiskError::InvalidRequest(format!("spot must be positive, got {}", spot)));
            }
        }
        let mut quotes = self.spot.into_iter().chain(self.legs.iter().map(|leg| leg.contract.spot));
        let first = quotes.next().ok_or(RiskError::EmptyStrategy)?;
        for spot in quotes {
            if (spot - first).abs() > SPOT_TOLERANCE * first {
                return Err(RiskError::MismatchedUnderlying {
                    expected: first,
                    found: spot,
                });
            }
        }
        Ok(first)
    }

    /// Net P&L at expiry for a terminal spot.
    pub fn expiry_pnl(&self, terminal_spot: f64, reference_spot: f64) -> f64 {
        let options: f64 = self.legs.iter().map(|leg| leg.expiry_pnl(terminal_spot)).sum();
        options + self.underlying_shares * (terminal_spot - reference_spot)
    }

    /// Values the strategy and builds its expiry profile with
    /// `profile_points` evenly spaced spots plus every strike.
    pub fn analyse(&self, profile_points: usize) -> Result<StrategyAnalysis, RiskError> {
        if !self.underlying_shares.is_finite() {
            return Err(RiskError::InvalidRequest(format!(
                "underlying shares must be finite, got {}",
                self.underlying_shares
            )));
        }
        if profile_points < 2 {
            return Err(RiskError::config("profile_points", "must be at least 2"));
        }
        for leg in &self.legs {
            leg.contract.validate()?;
        }
        let spot = self.reference_spot()?;

        let mut market_value = self.underlying_shares * spot;
        let mut greeks = Greeks {
            delta: self.underlying_shares,
            ..Greeks::zero()
        };
        for leg in &self.legs {
            market_value += leg.quantity * BlackScholes::price_contract(&leg.contract)?;
            greeks = greeks.add(&BlackScholes::greeks_contract(&leg.contract)?.scale(leg.quantity));
        }
        let net_premium = self.legs.iter().map(|leg| leg.quantity * leg.premium).sum();

        let payoff_profile: Vec<PayoffPoint> = self
            .profile_spots(spot, profile_points)
            .into_iter()
            .map(|s| PayoffPoint {
                spot: s,
                pnl: self.expiry_pnl(s, spot),
            })
            .collect();
        let breakevens = find_breakevens(&payoff_profile);

        // Slope of the P&L beyond the last strike: calls and shares only
        let upside_slope: f64 = self
            .legs
            .iter()
            .filter(|leg| leg.contract.option_type == OptionType::Call)
            .map(|leg| leg.quantity)
            .sum::<f64>()
            + self.underlying_shares;
        let best = payoff_profile.iter().map(|p| p.pnl).fold(f64::NEG_INFINITY, f64::max);
        let worst = payoff_profile.iter().map(|p| p.pnl).fold(f64::INFINITY, f64::min);
        let max_profit = (upside_slope <= 0.0).then_some(best);
        let max_loss = (upside_slope >= 0.0).then_some((-worst).max(0.0));

        debug!(
            legs = self.legs.len(),
            shares = self.underlying_shares,
            net_premium,
            market_value,
            breakevens = breakevens.len(),
            "strategy analysed"
        );

        Ok(StrategyAnalysis {
            net_premium,
            market_value,
            greeks,
            payoff_profile,
            breakevens,
            max_profit,
            max_loss,
        })
    }

    fn profile_spots(&self, spot: f64, points: usize) -> Vec<f64> {
        let top_strike = self
            .legs
            .iter()
            .map(|leg| leg.contract.strike)
            .fold(spot, f64::max);
        let upper = 2.0 * top_strike;
        let step = upper / (points - 1) as f64;

        let mut spots: Vec<f64> = (0..points).map(|i| step * i as f64).collect();
        spots.extend(self.legs.iter().map(|leg| leg.contract.strike));
        spots.push(spot);
        spots.sort_by(f64::total_cmp);
        spots.dedup();
        spots
    }
}

/// Zero crossings of a piecewise-linear profile, by linear interpolation.
fn find_breakevens(profile: &[PayoffPoint]) -> Vec<f64> {
    let mut out: Vec<f64> = Vec::new();
    let mut push = |x: f64| {
        if out.last().map_or(true, |&last| (x - last).abs() > 1e-9) {
            out.push(x);
        }
    };
    for pair in profile.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a.pnl == 0.0 && b.pnl != 0.0 {
            push(a.spot);
        } else if a.pnl * b.pnl < 0.0 {
            push(a.spot + (b.spot - a.spot) * (-a.pnl) / (b.pnl - a.pnl));
        }
    }
    if let Some(last) = profile.last() {
        if last.pnl == 0.0 && profile.len() > 1 && profile[profile.len() - 2].pnl != 0.0 {
            push(last.spot);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn option(option_type: OptionType, strike: f64) -> OptionContract {
        OptionContract::new(option_type, 100.0, strike, 0.5, 0.03, 0.25).unwrap()
    }

    #[test]
    fn test_long_straddle_two_breakevens() {
        let straddle = Strategy::new()
            .with_leg(StrategyLeg::new(option(OptionType::Call, 100.0), 1.0, 6.0).unwrap())
            .with_leg(StrategyLeg::new(option(OptionType::Put, 100.0), 1.0, 5.0).unwrap());
        let analysis = straddle.analyse(101).unwrap();

        assert_eq!(analysis.breakevens.len(), 2);
        assert_relative_eq!(analysis.breakevens[0], 89.0, epsilon = 1e-9);
        assert_relative_eq!(analysis.breakevens[1], 111.0, epsilon = 1e-9);
        assert_eq!(analysis.max_profit, None);
        assert_eq!(analysis.max_loss, Some(11.0));
        // Call and put gammas add; deltas nearly offset
        assert!(analysis.greeks.gamma > 0.0);
        assert!(analysis.greeks.delta.abs() < 0.2);
    }

    #[test]
    fn test_covered_call() {
        let covered = Strategy::new()
            .with_underlying(1.0)
            .with_leg(StrategyLeg::new(option(OptionType::Call, 110.0), -1.0, 4.0).unwrap());
        let analysis = covered.analyse(201).unwrap();

        // Capped at strike - spot + premium
        assert_relative_eq!(analysis.max_profit.unwrap(), 14.0, epsilon = 1e-9);
        // Worst case at S_T = 0: lose the spot, keep the premium
        assert_relative_eq!(analysis.max_loss.unwrap(), 96.0, epsilon = 1e-9);
        assert_eq!(analysis.breakevens.len(), 1);
        assert_relative_eq!(analysis.breakevens[0], 96.0, epsilon = 1e-9);

        let call_delta = BlackScholes::greeks_contract(&option(OptionType::Call, 110.0))
            .unwrap()
            .delta;
        assert_relative_eq!(analysis.greeks.delta, 1.0 - call_delta, epsilon = 1e-12);
        assert_eq!(analysis.net_premium, -4.0);
    }

    #[test]
    fn test_naked_short_call_unbounded_loss() {
        let naked = Strategy::new().with_leg(StrategyLeg::new(option(OptionType::Call, 105.0), -2.0, 3.0).unwrap());
        let analysis = naked.analyse(51).unwrap();
        assert_eq!(analysis.max_loss, None);
        assert_relative_eq!(analysis.max_profit.unwrap(), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_market_value_sums_legs() {
        let call = option(OptionType::Call, 100.0);
        let put = option(OptionType::Put, 95.0);
        let strategy = Strategy::new()
            .with_leg(StrategyLeg::new(call.clone(), 2.0, 0.0).unwrap())
            .with_leg(StrategyLeg::new(put.clone(), -1.0, 0.0).unwrap())
            .with_underlying(-0.5);
        let analysis = strategy.analyse(11).unwrap();

        let expected = 2.0 * BlackScholes::price_contract(&call).unwrap()
            - BlackScholes::price_contract(&put).unwrap()
            - 50.0;
        assert_relative_eq!(analysis.market_value, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_profile_includes_strikes() {
        let strategy =
            Strategy::new().with_leg(StrategyLeg::new(option(OptionType::Put, 97.3), 1.0, 2.0).unwrap());
        let analysis = strategy.analyse(11).unwrap();
        assert!(analysis.payoff_profile.iter().any(|p| p.spot == 97.3));
        assert_eq!(analysis.payoff_profile.first().unwrap().spot, 0.0);
        assert_relative_eq!(analysis.breakevens[0], 95.3, epsilon = 1e-9);
    }

    #[test]
    fn test_shares_only() {
        let stock = Strategy::new().with_underlying(50.0).with_spot(100.0);
        let analysis = stock.analyse(11).unwrap();

        assert_eq!(analysis.net_premium, 0.0);
        assert_relative_eq!(analysis.market_value, 5000.0);
        assert_relative_eq!(analysis.greeks.delta, 50.0);
        assert_eq!(analysis.greeks.gamma, 0.0);
        assert_eq!(analysis.breakevens, vec![100.0]);
        assert_eq!(analysis.max_profit, None);
        assert_relative_eq!(analysis.max_loss.unwrap(), 5000.0);

        // No legs and no spot: nothing to value the shares at
        assert!(matches!(
            Strategy::new().with_underlying(50.0).analyse(11),
            Err(RiskError::EmptyStrategy)
        ));
        assert!(matches!(
            Strategy::new().with_underlying(50.0).with_spot(-1.0).analyse(11),
            Err(RiskError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_explicit_spot_must_match_legs() {
        let covered = Strategy::new()
            .with_leg(StrategyLeg::new(option(OptionType::Call, 110.0), -1.0, 2.0).unwrap())
            .with_underlying(1.0);
        assert!(covered.clone().with_spot(100.0).analyse(11).is_ok());
        assert!(matches!(
            covered.with_spot(95.0).analyse(11),
            Err(RiskError::MismatchedUnderlying { .. })
        ));
    }

    #[test]
    fn test_empty_and_mismatched() {
        assert!(matches!(Strategy::new().analyse(11), Err(RiskError::EmptyStrategy)));
        assert!(matches!(Strategy::new().with_spot(100.0).analyse(11), Err(RiskError::EmptyStrategy)));

        let other = OptionContract::new(OptionType::Call, 120.0, 100.0, 0.5, 0.03, 0.25).unwrap();
        let strategy = Strategy::new()
            .with_leg(StrategyLeg::new(option(OptionType::Call, 100.0), 1.0, 1.0).unwrap())
            .with_leg(StrategyLeg::new(other, 1.0, 1.0).unwrap());
        assert!(matches!(
            strategy.analyse(11),
            Err(RiskError::MismatchedUnderlying { .. })
        ));
    }

    #[test]
    fn test_leg_validation() {
        assert!(StrategyLeg::new(option(OptionType::Call, 100.0), 0.0, 1.0).is_err());
        assert!(StrategyLeg::new(option(OptionType::Call, 100.0), 1.0, -1.0).is_err());
    }
}
