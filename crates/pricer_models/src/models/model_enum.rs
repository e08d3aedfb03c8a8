//! Tagged model parameter sets.
//!
//! [`ModelParameters`] is dispatched once per pricing request: every variant
//! validates itself, then reduces to one or more Black-Scholes evaluations.
//!
//! ## Example
//!
//! ```
//! use pricer_models::instruments::{OptionContract, OptionType};
//! use pricer_models::models::{HestonParams, ModelParameters};
//!
//! let contract = OptionContract::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
//! let heston = ModelParameters::Heston(HestonParams::new(0.04, 2.0, 0.3, -0.7, 0.04));
//!
//! assert!(heston.is_valid());
//! assert_eq!(heston.name(), "Heston");
//! let price = heston.price(&contract).unwrap();
//! assert!((price - 10.45).abs() < 0.01);
//! ```

use crate::analytical::BlackScholes;
use crate::instruments::OptionContract;

use super::error::ModelError;
use super::{heston, jump_diffusion, sabr};

/// Heston parameters.
///
/// Only the long-run variance θ enters the flat-volatility approximation;
/// the rest are validated and carried for reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HestonParams {
    /// Long-run variance (θ > 0)
    pub theta: f64,
    /// Mean-reversion speed (κ > 0)
    pub kappa: f64,
    /// Volatility of variance (σᵥ > 0)
    pub sigma_v: f64,
    /// Spot/variance correlation (ρ ∈ [-1, 1])
    pub rho: f64,
    /// Initial variance (v₀ > 0)
    pub v0: f64,
}

impl HestonParams {
    /// Creates a parameter set; call [`validate`](Self::validate) before use.
    pub fn new(theta: f64, kappa: f64, sigma_v: f64, rho: f64, v0: f64) -> Self {
        Self {
            theta,
            kappa,
            sigma_v,
            rho,
            v0,
        }
    }

    /// Checks every parameter.
    pub fn validate(&self) -> Result<(), ModelError> {
        positive("Heston", "theta", self.theta)?;
        positive("Heston", "kappa", self.kappa)?;
        positive("Heston", "sigma_v", self.sigma_v)?;
        within("Heston", "rho", self.rho, -1.0, 1.0)?;
        positive("Heston", "v0", self.v0)
    }
}

/// SABR parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SabrParams {
    /// Initial volatility (α > 0)
    pub alpha: f64,
    /// CEV exponent (β ∈ [0, 1]): 0 normal, 1 lognormal
    pub beta: f64,
    /// Forward/volatility correlation (ρ ∈ (-1, 1))
    pub rho: f64,
    /// Volatility of volatility (ν ≥ 0)
    pub nu: f64,
}

impl SabrParams {
    /// Creates a parameter set; call [`validate`](Self::validate) before use.
    pub fn new(alpha: f64, beta: f64, rho: f64, nu: f64) -> Self {
        Self {
            alpha,
            beta,
            rho,
            nu,
        }
    }

    /// Checks every parameter.
    pub fn validate(&self) -> Result<(), ModelError> {
        positive("SABR", "alpha", self.alpha)?;
        within("SABR", "beta", self.beta, 0.0, 1.0)?;
        if !(self.rho.is_finite() && self.rho > -1.0 && self.rho < 1.0) {
            return Err(invalid("SABR", "rho", self.rho));
        }
        non_negative("SABR", "nu", self.nu)
    }
}

/// Merton jump-diffusion parameters.
///
/// Jump sizes are log-normal: ln(1 + J) ~ N(mean_jump, jump_vol²).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JumpDiffusionParams {
    /// Jump intensity per year (λ ≥ 0)
    pub lambda: f64,
    /// Mean of the log jump size
    pub mean_jump: f64,
    /// Standard deviation of the log jump size (≥ 0)
    pub jump_vol: f64,
}

impl JumpDiffusionParams {
    /// Creates a parameter set; call [`validate`](Self::validate) before use.
    pub fn new(lambda: f64, mean_jump: f64, jump_vol: f64) -> Self {
        Self {
            lambda,
            mean_jump,
            jump_vol,
        }
    }

    /// Checks every parameter.
    pub fn validate(&self) -> Result<(), ModelError> {
        non_negative("JumpDiffusion", "lambda", self.lambda)?;
        if !self.mean_jump.is_finite() {
            return Err(invalid("JumpDiffusion", "mean_jump", self.mean_jump));
        }
        non_negative("JumpDiffusion", "jump_vol", self.jump_vol)
    }
}

/// Pricing model selector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "model", rename_all = "snake_case"))]
pub enum ModelParameters {
    /// Plain Black-Scholes with the contract's volatility.
    #[default]
    BlackScholes,
    /// Heston, flat volatility √θ.
    Heston(HestonParams),
    /// SABR implied volatility fed into Black-Scholes.
    Sabr(SabrParams),
    /// Merton Poisson-weighted Black-Scholes series.
    JumpDiffusion(JumpDiffusionParams),
}

impl ModelParameters {
    /// Model label.
    pub fn name(&self) -> &'static str {
        match self {
            ModelParameters::BlackScholes => "BlackScholes",
            ModelParameters::Heston(_) => "Heston",
            ModelParameters::Sabr(_) => "SABR",
            ModelParameters::JumpDiffusion(_) => "JumpDiffusion",
        }
    }

    /// Validates the variant's parameters.
    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            ModelParameters::BlackScholes => Ok(()),
            ModelParameters::Heston(p) => p.validate(),
            ModelParameters::Sabr(p) => p.validate(),
            ModelParameters::JumpDiffusion(p) => p.validate(),
        }
    }

    /// Returns whether [`validate`](Self::validate) passes.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Prices `contract` as a European option under this model.
    ///
    /// # Errors
    /// The variant's validation error, or a contract/evaluation error.
    pub fn price(&self, contract: &OptionContract) -> Result<f64, ModelError> {
        self.validate()?;
        match self {
            ModelParameters::BlackScholes => Ok(BlackScholes::price_contract(contract)?),
            ModelParameters::Heston(p) => heston::price(contract, p),
            ModelParameters::Sabr(p) => sabr::price(contract, p),
            ModelParameters::JumpDiffusion(p) => jump_diffusion::price(contract, p),
        }
    }

    /// The single Black-Scholes volatility the model reduces to, where there
    /// is one. Jump diffusion mixes several and returns `None`.
    pub fn effective_volatility(&self, contract: &OptionContract) -> Result<Option<f64>, ModelError> {
        self.validate()?;
        contract.validate()?;
        Ok(match self {
            ModelParameters::BlackScholes => Some(contract.volatility),
            ModelParameters::Heston(p) => Some(heston::effective_volatility(p)),
            ModelParameters::Sabr(p) => {
                if contract.expiry <= 0.0 {
                    None
                } else {
                    Some(sabr::implied_volatility(
                        contract.forward(),
                        contract.strike,
                        contract.expiry,
                        p,
                    )?)
                }
            }
            ModelParameters::JumpDiffusion(_) => None,
        })
    }
}

fn invalid(model: &'static str, name: &'static str, value: f64) -> ModelError {
    ModelError::InvalidParameter { model, name, value }
}

fn positive(model: &'static str, name: &'static str, value: f64) -> Result<(), ModelError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(model, name, value))
    }
}

fn non_negative(model: &'static str, name: &'static str, value: f64) -> Result<(), ModelError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(model, name, value))
    }
}

fn within(model: &'static str, name: &'static str, value: f64, lo: f64, hi: f64) -> Result<(), ModelError> {
    if value >= lo && value <= hi {
        Ok(())
    } else {
        Err(invalid(model, name, value))
    }
}
