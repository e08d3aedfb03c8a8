//! Heston approximation.
//!
//! The variance process is replaced by its long-run level, so the price is a
//! Black-Scholes evaluation at σ = √θ. κ, σᵥ, ρ and v₀ do not move the price.

use crate::analytical::BlackScholes;
use crate::instruments::OptionContract;

use super::error::ModelError;
use super::model_enum::HestonParams;

/// Flat volatility √θ.
#[inline]
pub fn effective_volatility(params: &HestonParams) -> f64 {
    params.theta.sqrt()
}

/// European price at the long-run volatility.
pub fn price(contract: &OptionContract, params: &HestonParams) -> Result<f64, ModelError> {
    params.validate()?;
    let flat = contract.with_volatility(effective_volatility(params))?;
    Ok(BlackScholes::price_contract(&flat)?)
}
