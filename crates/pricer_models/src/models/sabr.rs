//! SABR approximation.
//!
//! ```text
//! dF = α F^β dW_F
//! dα = ν α dW_α
//! E[dW_F dW_α] = ρ dt
//! ```
//!
//! Hagan et al. (2002) asymptotic implied volatility, fed into Black-Scholes
//! with the contract's forward `F = S·e^{(r-q)T}`:
//!
//! ```text
//! σ_B(K, F) = α / [(FK)^((1-β)/2) · D] · z/x(z) · [1 + (A + B + C)·T]
//! D    = 1 + (1-β)²/24 · ln²(F/K) + (1-β)⁴/1920 · ln⁴(F/K)
//! z    = ν/α · (FK)^((1-β)/2) · ln(F/K)
//! x(z) = ln[(√(1 - 2ρz + z²) + z - ρ) / (1 - ρ)]
//! A    = (1-β)²/24 · α² / (FK)^(1-β)
//! B    = ρβνα / (4 (FK)^((1-β)/2))
//! C    = (2 - 3ρ²)/24 · ν²
//! ```

use num_traits::Float;

use crate::analytical::BlackScholes;
use crate::instruments::OptionContract;

use super::error::ModelError;
use super::model_enum::SabrParams;

/// Below this |ln(F/K)| the at-the-money expansion is used.
const ATM_THRESHOLD: f64 = 1e-7;

/// Hagan implied volatility for `strike` given the forward and expiry.
///
/// # Errors
/// - `ModelError::InvalidParameter` if F, K or T is not positive
/// - `ModelError::NonFinite` if the expansion breaks down
///
/// # Examples
/// ```
/// use pricer_models::models::{sabr, SabrParams};
///
/// // β = 1 and ν = 0 collapse to a flat lognormal volatility α
/// let params = SabrParams::new(0.25, 1.0, 0.0, 0.0);
/// let vol: f64 = sabr::implied_volatility(100.0, 120.0, 2.0, &params).unwrap();
/// assert!((vol - 0.25).abs() < 1e-12);
/// ```
pub fn implied_volatility<T: Float>(
    forward: T,
    strike: T,
    expiry: T,
    params: &SabrParams,
) -> Result<T, ModelError> {
    for (name, value) in [("forward", forward), ("strike", strike), ("expiry", expiry)] {
        if !(value > T::zero() && value.is_finite()) {
            return Err(ModelError::InvalidParameter {
                model: "SABR",
                name,
                value: value.to_f64().unwrap_or(f64::NAN),
            });
        }
    }

    let c = |x: f64| T::from(x).unwrap();
    let one = T::one();
    let alpha = c(params.alpha);
    let beta = c(params.beta);
    let rho = c(params.rho);
    let nu = c(params.nu);
    let one_minus_beta = one - beta;
    let omb_2 = one_minus_beta * one_minus_beta;

    let log_fk = (forward / strike).ln();
    let fk = forward * strike;
    let fk_pow_half = fk.powf(one_minus_beta / c(2.0));
    let fk_pow_full = fk.powf(one_minus_beta);

    let a = omb_2 / c(24.0) * alpha * alpha / fk_pow_full;
    let b = rho * beta * nu * alpha / (c(4.0) * fk_pow_half);
    let cc = (c(2.0) - c(3.0) * rho * rho) / c(24.0) * nu * nu;
    let expansion = one + (a + b + cc) * expiry;

    let vol = if log_fk.abs() < c(ATM_THRESHOLD) {
        alpha / fk_pow_half * expansion
    } else {
        let log_fk_2 = log_fk * log_fk;
        let d = one + omb_2 / c(24.0) * log_fk_2 + omb_2 * omb_2 / c(1920.0) * log_fk_2 * log_fk_2;
        let z = nu / alpha * fk_pow_half * log_fk;
        let z_over_x = if z.abs() < c(ATM_THRESHOLD) {
            one
        } else {
            z / x_of_z(z, rho)
        };
        alpha / (fk_pow_half * d) * z_over_x * expansion
    };

    if vol.is_finite() && vol > T::zero() {
        Ok(vol)
    } else {
        Err(ModelError::NonFinite {
            model: "SABR",
            message: format!(
                "implied volatility {} at strike {}",
                vol.to_f64().unwrap_or(f64::NAN),
                strike.to_f64().unwrap_or(f64::NAN)
            ),
        })
    }
}

/// x(z) = ln[(√(1 - 2ρz + z²) + z - ρ) / (1 - ρ)]
fn x_of_z<T: Float>(z: T, rho: T) -> T {
    let two = T::from(2.0).unwrap();
    let disc = (T::one() - two * rho * z + z * z).max(T::zero());
    ((disc.sqrt() + z - rho) / (T::one() - rho)).ln()
}

/// European price at the SABR implied volatility.
///
/// At T = 0 the price is the intrinsic value.
pub fn price(contract: &OptionContract, params: &SabrParams) -> Result<f64, ModelError> {
    params.validate()?;
    contract.validate()?;
    if contract.expiry <= 0.0 {
        return Ok(contract.intrinsic_value());
    }
    let vol = implied_volatility(contract.forward(), contract.strike, contract.expiry, params)?;
    Ok(BlackScholes::price_contract(&contract.with_volatility(vol)?)?)
}
