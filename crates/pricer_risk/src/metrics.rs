//! Parametric risk measures of an option position.
//!
//! Value at risk and expected shortfall use the delta-gamma-theta expansion
//! of the position value over the horizon,
//!
//! ```text
//! ΔV ≈ Δ·dS + ½·Γ·dS² + Θ·h,    dS ~ N(0, (S·σ·√(h/365))²)
//! ```
//!
//! with the loss evaluated at the confidence quantile of the spot move in
//! either direction. The scenario-implied drawdown is the worst P&L across
//! the spot and volatility ladders.

use pricer_core::math::distributions::{norm_inv_cdf, norm_pdf};
use pricer_core::types::days_to_years;
use pricer_models::analytical::Greeks;

use crate::error::RiskError;
use crate::scenarios::ScenarioGrid;

/// Position risk measures, all reported as non-negative losses.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskMetrics {
    /// Confidence level of VaR and ES
    pub confidence: f64,
    /// Horizon in calendar days
    pub horizon_days: f64,
    /// Value at risk
    pub value_at_risk: f64,
    /// Expected shortfall beyond the VaR quantile
    pub expected_shortfall: f64,
    /// Worst scenario-grid loss
    pub max_drawdown: f64,
}

impl RiskMetrics {
    /// Computes all measures for a position.
    ///
    /// `position_greeks` are already scaled by the signed quantity, which is
    /// passed again to size the scenario-grid P&L.
    pub fn compute(
        position_greeks: &Greeks<f64>,
        spot: f64,
        volatility: f64,
        grid: &ScenarioGrid,
        quantity: f64,
        confidence: f64,
        horizon_days: f64,
    ) -> Result<Self, RiskError> {
        Ok(Self {
            confidence,
            horizon_days,
            value_at_risk: value_at_risk(position_greeks, spot, volatility, confidence, horizon_days)?,
            expected_shortfall: expected_shortfall(
                position_greeks,
                spot,
                volatility,
                confidence,
                horizon_days,
            )?,
            max_drawdown: max_drawdown(grid, quantity),
        })
    }
}

fn check_inputs(confidence: f64, horizon_days: f64) -> Result<(), RiskError> {
    if !(confidence > 0.5 && confidence < 1.0) {
        return Err(RiskError::config(
            "var_confidence",
            format!("must lie in (0.5, 1), got {}", confidence),
        ));
    }
    if !(horizon_days > 0.0 && horizon_days.is_finite()) {
        return Err(RiskError::config(
            "var_horizon_days",
            format!("must be positive, got {}", horizon_days),
        ));
    }
    Ok(())
}

/// Standard deviation of the spot move over the horizon.
#[inline]
fn spot_move_stdev(spot: f64, volatility: f64, horizon_days: f64) -> f64 {
    spot * volatility * days_to_years(horizon_days).sqrt()
}

/// Position P&L for a spot move under the delta-gamma-theta expansion.
#[inline]
fn expansion_pnl(greeks: &Greeks<f64>, ds: f64, horizon_days: f64) -> f64 {
    greeks.delta * ds + 0.5 * greeks.gamma * ds * ds + greeks.theta * horizon_days
}

/// Delta-gamma value at risk at `confidence` over `horizon_days`.
///
/// The larger loss of an up or down move of `z·σ_S` is reported, floored at
/// zero.
///
/// # Examples
/// ```
/// use pricer_models::analytical::Greeks;
/// use pricer_risk::metrics::value_at_risk;
///
/// // One share: loss at 95% over a day is 1.645·S·σ/√365
/// let share = Greeks { delta: 1.0, ..Greeks::zero() };
/// let var = value_at_risk(&share, 100.0, 0.2, 0.95, 1.0).unwrap();
/// assert!((var - 1.7219).abs() < 1e-3);
/// ```
pub fn value_at_risk(
    greeks: &Greeks<f64>,
    spot: f64,
    volatility: f64,
    confidence: f64,
    horizon_days: f64,
) -> Result<f64, RiskError> {
    check_inputs(confidence, horizon_days)?;
    let ds = norm_inv_cdf(confidence) * spot_move_stdev(spot, volatility, horizon_days);
    let loss_up = -expansion_pnl(greeks, ds, horizon_days);
    let loss_down = -expansion_pnl(greeks, -ds, horizon_days);
    Ok(loss_up.max(loss_down).max(0.0))
}

/// Delta-gamma expected shortfall at `confidence` over `horizon_days`.
///
/// Uses the normal tail moments `E[X | X > z] = φ(z)/(1−c)` and
/// `E[X² | X > z] = 1 + z·φ(z)/(1−c)` for the linear and quadratic terms,
/// and is never below the VaR.
pub fn expected_shortfall(
    greeks: &Greeks<f64>,
    spot: f64,
    volatility: f64,
    confidence: f64,
    horizon_days: f64,
) -> Result<f64, RiskError> {
    let var = value_at_risk(greeks, spot, volatility, confidence, horizon_days)?;
    let z = norm_inv_cdf(confidence);
    let tail = norm_pdf(z) / (1.0 - confidence);
    let stdev = spot_move_stdev(spot, volatility, horizon_days);

    let linear = greeks.delta.abs() * stdev * tail;
    let quadratic = -0.5 * greeks.gamma * stdev * stdev * (1.0 + z * tail);
    let carry = -greeks.theta * horizon_days;
    Ok((linear + quadratic + carry).max(var))
}

/// Worst loss of a `quantity`-unit position across the scenario ladders.
pub fn max_drawdown(grid: &ScenarioGrid, quantity: f64) -> f64 {
    -grid.worst_position_pnl(quantity)
}
