//! Implied volatility from a quoted European price.

use pricer_core::math::solvers::{BisectionSolver, NewtonRaphsonSolver, SolverConfig};
use std::f64::consts::PI;

use super::black_scholes::BlackScholes;
use super::error::AnalyticalError;
use crate::instruments::{OptionContract, OptionType};

/// Bisection bracket for the fallback search.
const VOL_BRACKET: (f64, f64) = (1e-4, 5.0);

/// Solves for the volatility that reproduces `market_price`.
///
/// Newton-Raphson on vega starts from the Brenner-Subrahmanyam estimate
/// `σ₀ = √(2π/T)·C/S`; if it fails, bisection on σ ∈ [1e-4, 5] takes over.
/// The contract's own volatility is ignored.
///
/// # Errors
/// - `AnalyticalError::InvalidExpiry` if T = 0
/// - `AnalyticalError::ArbitrageBound` if the price is outside
///   (discounted intrinsic, upper bound)
/// - `AnalyticalError::NoConvergence` if both searches fail
///
/// # Examples
/// ```
/// use pricer_models::analytical::{implied_volatility, BlackScholes};
/// use pricer_models::instruments::{OptionContract, OptionType};
///
/// let contract = OptionContract::new(OptionType::Call, 100.0, 110.0, 0.5, 0.03, 0.32).unwrap();
/// let price = BlackScholes::price_contract(&contract).unwrap();
/// let vol = implied_volatility(&contract, price).unwrap();
/// assert!((vol - 0.32).abs() < 1e-6);
/// ```
pub fn implied_volatility(contract: &OptionContract, market_price: f64) -> Result<f64, AnalyticalError> {
    contract.validate()?;
    let (s, k, t, r, q) = (
        contract.spot,
        contract.strike,
        contract.expiry,
        contract.rate,
        contract.dividend_yield,
    );
    if t <= 0.0 {
        return Err(AnalyticalError::InvalidExpiry { expiry: t });
    }

    let spot_carry = s * (-q * t).exp();
    let strike_disc = k * (-r * t).exp();
    let (lower, upper) = match contract.option_type {
        OptionType::Call => ((spot_carry - strike_disc).max(0.0), spot_carry),
        OptionType::Put => ((strike_disc - spot_carry).max(0.0), strike_disc),
    };
    if !(market_price > lower && market_price < upper) {
        return Err(AnalyticalError::ArbitrageBound {
            price: market_price,
            lower,
            upper,
        });
    }

    let objective = |vol: f64| -> f64 {
        match BlackScholes::new(s, r, q, vol) {
            Ok(bs) => bs.price(k, t, contract.option_type) - market_price,
            Err(_) => f64::NAN,
        }
    };
    // Raw vega (per unit of σ)
    let vega = |vol: f64| -> f64 {
        match BlackScholes::new(s, r, q, vol) {
            Ok(bs) => bs.vega(k, t) * 100.0,
            Err(_) => f64::NAN,
        }
    };

    let guess = ((2.0 * PI / t).sqrt() * market_price / s).clamp(0.05, 2.0);
    let config = SolverConfig::default().with_tolerance(1e-10);

    let newton = NewtonRaphsonSolver::new(config).with_lower_bound(0.0, VOL_BRACKET.0);
    match newton.find_root(objective, vega, guess) {
        Ok(vol) if vol > 0.0 => return Ok(vol),
        _ => {}
    }

    let bisection = BisectionSolver::new(config.with_max_iterations(200));
    Ok(bisection.find_root(objective, VOL_BRACKET.0, VOL_BRACKET.1)?)
}
