//! Merton jump-diffusion approximation.
//!
//! With k = e^(μ_J + δ²/2) - 1 and λ' = λ(1 + k), the price is the
//! Poisson-weighted series
//!
//! ```text
//! V = Σ_{n=0}^{N} e^{-λ'T} (λ'T)^n / n! · BS(S, K, T, r_n, q, σ_n)
//! σ_n² = σ² + n δ² / T
//! r_n  = r - λk + n ln(1 + k) / T
//! ```
//!
//! truncated at [`MAX_JUMP_TERMS`].

use pricer_core::math::special::factorial;

use crate::analytical::BlackScholes;
use crate::instruments::OptionContract;

use super::error::ModelError;
use super::model_enum::JumpDiffusionParams;

/// Highest jump count in the series.
pub const MAX_JUMP_TERMS: u32 = 20;

/// Poisson-weighted Black-Scholes series.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionContract, OptionType};
/// use pricer_models::models::{jump_diffusion, JumpDiffusionParams};
///
/// let contract = OptionContract::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let no_jumps = JumpDiffusionParams::new(0.0, -0.1, 0.2);
/// let price = jump_diffusion::price(&contract, &no_jumps).unwrap();
/// assert!((price - 10.4506).abs() < 1e-3);
/// ```
pub fn price(contract: &OptionContract, params: &JumpDiffusionParams) -> Result<f64, ModelError> {
    params.validate()?;
    contract.validate()?;
    let t = contract.expiry;
    if t <= 0.0 {
        return Ok(contract.intrinsic_value());
    }

    let (lambda, mu, delta) = (params.lambda, params.mean_jump, params.jump_vol);
    let k = (mu + 0.5 * delta * delta).exp() - 1.0;
    let lambda_t = lambda * (1.0 + k) * t;
    let sigma_sq = contract.volatility * contract.volatility;
    let log_jump = (1.0 + k).ln();

    let mut total = 0.0;
    for n in 0..=MAX_JUMP_TERMS {
        let nf = f64::from(n);
        let weight = (-lambda_t).exp() * lambda_t.powi(n as i32) / factorial(nf);
        if weight == 0.0 && n > 0 {
            break;
        }
        let sigma_n = (sigma_sq + nf * delta * delta / t).sqrt();
        let rate_n = contract.rate - lambda * k + nf * log_jump / t;
        let bs = BlackScholes::new(contract.spot, rate_n, contract.dividend_yield, sigma_n)?;
        total += weight * bs.price(contract.strike, t, contract.option_type);
    }

    if total.is_finite() {
        Ok(total)
    } else {
        Err(ModelError::NonFinite {
            model: "JumpDiffusion",
            message: format!("series sum {}", total),
        })
    }
}
