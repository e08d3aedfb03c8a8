//! Scenario revaluation.

use pricer_core::types::{days_to_years, years_to_days};
use pricer_models::instruments::OptionContract;
use rayon::prelude::*;

use super::shifts::ScenarioSpec;
use crate::error::RiskError;

/// Value and P&L of one unit at a single shock.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioPoint {
    /// Relative shock applied
    pub shock: f64,
    /// Value after the shock
    pub value: f64,
    /// Value minus base value
    pub pnl: f64,
    /// P&L relative to the base value (0 when the base is 0)
    pub pnl_pct: f64,
}

impl ScenarioPoint {
    /// Builds a point from the base and shocked values.
    pub fn new(shock: f64, base_value: f64, value: f64) -> Self {
        let pnl = value - base_value;
        let pnl_pct = if base_value != 0.0 {
            pnl / base_value.abs()
        } else {
            0.0
        };
        Self {
            shock,
            value,
            pnl,
            pnl_pct,
        }
    }

    /// Check if P&L is a loss (negative).
    pub fn is_loss(&self) -> bool {
        self.pnl < 0.0
    }
}

/// Value with a given number of calendar days left.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThetaPoint {
    /// Calendar days to expiry
    pub days_remaining: f64,
    /// Value with everything else unchanged
    pub value: f64,
    /// Value minus today's value
    pub decay: f64,
}

/// Spot ladder, volatility ladder and theta curve of one contract.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioGrid {
    /// Base value the P&L is measured from
    pub base_value: f64,
    /// Spot shocks in ascending order
    pub spot: Vec<ScenarioPoint>,
    /// Volatility shocks in ascending order
    pub volatility: Vec<ScenarioPoint>,
    /// Days remaining, from today down to expiry
    pub theta_curve: Vec<ThetaPoint>,
}

impl ScenarioGrid {
    /// Revalues `contract` across the ladders of `spec`.
    ///
    /// `valuation` prices a shocked copy of the contract; ladders run on the
    /// rayon pool and keep ascending shock order.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::{OptionContract, OptionType};
    /// use pricer_risk::scenarios::{ScenarioGrid, ScenarioSpec};
    ///
    /// let call = OptionContract::new(OptionType::Call, 100.0, 100.0, 0.5, 0.05, 0.2).unwrap();
    /// let grid = ScenarioGrid::evaluate(&call, &ScenarioSpec::default(), |c| {
    ///     Ok(BlackScholes::price_contract(c)?)
    /// })
    /// .unwrap();
    ///
    /// assert!(grid.spot.first().unwrap().is_loss());
    /// assert!(grid.theta_curve.last().unwrap().value < grid.base_value);
    /// ```
    pub fn evaluate<F>(contract: &OptionContract, spec: &ScenarioSpec, valuation: F) -> Result<Self, RiskError>
    where
        F: Fn(&OptionContract) -> Result<f64, RiskError> + Sync,
    {
        spec.validate()?;
        let base_value = valuation(contract)?;

        let spot = spec
            .spot_shocks()
            .into_par_iter()
            .map(|shock| {
                let shocked = contract.with_spot(contract.spot * (1.0 + shock))?;
                Ok(ScenarioPoint::new(shock, base_value, valuation(&shocked)?))
            })
            .collect::<Result<Vec<_>, RiskError>>()?;

        let volatility = spec
            .volatility_shocks()
            .into_par_iter()
            .map(|shock| {
                let shocked = contract.with_volatility(contract.volatility * (1.0 + shock))?;
                Ok(ScenarioPoint::new(shock, base_value, valuation(&shocked)?))
            })
            .collect::<Result<Vec<_>, RiskError>>()?;

        let theta_curve = theta_days(contract.expiry, spec.theta_points)
            .into_par_iter()
            .map(|days| {
                let value = valuation(&contract.with_expiry(days_to_years(days))?)?;
                Ok(ThetaPoint {
                    days_remaining: days,
                    value,
                    decay: value - base_value,
                })
            })
            .collect::<Result<Vec<_>, RiskError>>()?;

        Ok(Self {
            base_value,
            spot,
            volatility,
            theta_curve,
        })
    }

    /// Most negative per-unit P&L across the spot and volatility ladders,
    /// or 0 if no scenario loses.
    pub fn worst_pnl(&self) -> f64 {
        self.spot
            .iter()
            .chain(&self.volatility)
            .map(|p| p.pnl)
            .fold(0.0, f64::min)
    }

    /// Most negative P&L for a signed position of `quantity` units.
    pub fn worst_position_pnl(&self, quantity: f64) -> f64 {
        self.spot
            .iter()
            .chain(&self.volatility)
            .map(|p| quantity * p.pnl)
            .fold(0.0, f64::min)
    }
}

/// Days remaining from today down to 0, `points` values evenly spaced.
fn theta_days(expiry: f64, points: usize) -> Vec<f64> {
    let total = years_to_days(expiry);
    if total <= 0.0 || points < 2 {
        return vec![total.max(0.0)];
    }
    let step = total / (points - 1) as f64;
    (0..points)
        .map(|i| if i + 1 == points { 0.0 } else { total - step * i as f64 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::analytical::BlackScholes;
    use pricer_models::instruments::OptionType;

    fn bs(c: &OptionContract) -> Result<f64, RiskError> {
        Ok(BlackScholes::price_contract(c)?)
    }

    fn grid(option_type: OptionType) -> ScenarioGrid {
        let contract = OptionContract::new(option_type, 100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
        ScenarioGrid::evaluate(&contract, &ScenarioSpec::default(), bs).unwrap()
    }

    #[test]
    fn test_spot_ladder_monotone_for_call() {
        let g = grid(OptionType::Call);
        assert_eq!(g.spot.len(), 9);
        for pair in g.spot.windows(2) {
            assert!(pair[1].value > pair[0].value);
        }
        let unshocked = &g.spot[4];
        assert_eq!(unshocked.shock, 0.0);
        assert_relative_eq!(unshocked.pnl, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_put_loses_on_rally() {
        let g = grid(OptionType::Put);
        assert!(g.spot.last().unwrap().is_loss());
        assert!(!g.spot.first().unwrap().is_loss());
    }

    #[test]
    fn test_vol_ladder_increasing() {
        let g = grid(OptionType::Put);
        assert_eq!(g.volatility.len(), 11);
        for pair in g.volatility.windows(2) {
            assert!(pair[1].value > pair[0].value);
        }
    }

    #[test]
    fn test_theta_curve_ends_at_intrinsic() {
        let g = grid(OptionType::Call);
        assert_eq!(g.theta_curve.len(), 31);
        assert_relative_eq!(g.theta_curve[0].days_remaining, 365.0);
        assert_relative_eq!(g.theta_curve[0].decay, 0.0, epsilon = 1e-12);
        let last = g.theta_curve.last().unwrap();
        assert_eq!(last.days_remaining, 0.0);
        assert_eq!(last.value, 0.0);
    }

    #[test]
    fn test_worst_pnl() {
        let g = grid(OptionType::Call);
        let worst = g.worst_pnl();
        assert_eq!(worst, g.spot[0].pnl.min(g.volatility[0].pnl));
        assert!(g.worst_position_pnl(-1.0) < 0.0);
        assert_eq!(g.worst_position_pnl(0.0), 0.0);
    }

    #[test]
    fn test_expired_contract_single_theta_point() {
        let contract = OptionContract::new(OptionType::Call, 110.0, 100.0, 0.0, 0.05, 0.2).unwrap();
        let g = ScenarioGrid::evaluate(&contract, &ScenarioSpec::default(), bs).unwrap();
        assert_eq!(g.theta_curve.len(), 1);
        assert_eq!(g.base_value, 10.0);
    }

    #[test]
    fn test_valuation_error_propagates() {
        let contract = OptionContract::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
        let result = ScenarioGrid::evaluate(&contract, &ScenarioSpec::default(), |_| {
            Err(RiskError::InvalidRequest("boom".into()))
        });
        assert!(matches!(result, Err(RiskError::InvalidRequest(_))));
    }
}
