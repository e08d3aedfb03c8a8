//! Option command implementation
//!
//! Prices a single option position through the pricer_risk orchestrator.

use clap::{Args, ValueEnum};
use pricer_core::types::time::{parse_date, year_fraction};
use pricer_models::instruments::{
    AsianAveraging, BarrierSpec, BarrierType, ExerciseStyle, LookbackStrike, OptionCategory,
    OptionContract, OptionType,
};
use pricer_models::models::{HestonParams, JumpDiffusionParams, ModelParameters, SabrParams};
use pricer_risk::orchestrator::{price_option, PricingRequest, PricingResult, SimulationParams};
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::output::{num, opt, pct, render, Tabular};
use crate::{CliError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Call,
    Put,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Exercise {
    European,
    American,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Barrier {
    UpAndOut,
    UpAndIn,
    DownAndOut,
    DownAndIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Averaging {
    Geometric,
    Arithmetic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Lookback {
    Fixed,
    Floating,
}

/// Arguments of `fincalc option`
#[derive(Debug, Clone, Args)]
pub struct OptionArgs {
    /// Call or put
    #[arg(long = "type", value_enum, default_value_t = Kind::Call)]
    pub kind: Kind,

    /// Spot price of the underlying
    #[arg(long)]
    pub spot: f64,

    /// Strike price
    #[arg(long)]
    pub strike: f64,

    /// Time to expiry in years
    #[arg(long, required_unless_present = "expiry_date")]
    pub expiry: Option<f64>,

    /// Expiry date (YYYY-MM-DD), counted Act/365 from the valuation date
    #[arg(long, conflicts_with = "expiry", requires = "valuation_date")]
    pub expiry_date: Option<String>,

    /// Valuation date (YYYY-MM-DD)
    #[arg(long, requires = "expiry_date")]
    pub valuation_date: Option<String>,

    /// Continuously compounded risk-free rate
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub rate: f64,

    /// Continuous dividend yield
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub dividend: f64,

    /// Annualised volatility
    #[arg(long)]
    pub vol: f64,

    /// Exercise style
    #[arg(long, value_enum, default_value_t = Exercise::European)]
    pub exercise: Exercise,

    /// Signed position size; negative for short
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub quantity: f64,

    /// Premium paid per unit (defaults to the fair value)
    #[arg(long)]
    pub premium: Option<f64>,

    /// Run a Monte Carlo simulation alongside the closed form
    #[arg(long)]
    pub simulate: bool,

    /// Spread the simulation over all cores
    #[arg(long, requires = "simulate")]
    pub parallel: bool,

    /// Heston parameters: theta,kappa,sigma_v,rho,v0
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub heston: Option<Vec<f64>>,

    /// SABR parameters: alpha,beta,rho,nu
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub sabr: Option<Vec<f64>>,

    /// Jump-diffusion parameters: lambda,mean_jump,jump_vol
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub jump: Option<Vec<f64>>,

    /// Barrier type
    #[arg(long, value_enum, requires = "barrier_level")]
    pub barrier: Option<Barrier>,

    /// Barrier level
    #[arg(long, requires = "barrier")]
    pub barrier_level: Option<f64>,

    /// Asian averaging
    #[arg(long, value_enum, conflicts_with_all = ["barrier", "lookback"])]
    pub asian: Option<Averaging>,

    /// Lookback strike type
    #[arg(long, value_enum, conflicts_with = "barrier")]
    pub lookback: Option<Lookback>,
}

impl OptionArgs {
    fn time_to_expiry(&self) -> Result<f64> {
        match (self.expiry, &self.expiry_date, &self.valuation_date) {
            (Some(years), _, _) => Ok(years),
            (None, Some(expiry), Some(valuation)) => {
                Ok(year_fraction(parse_date(valuation)?, parse_date(expiry)?)?)
            }
            _ => Err(CliError::InvalidArgument(
                "either --expiry or --expiry-date with --valuation-date is required".to_string(),
            )),
        }
    }

    fn contract(&self) -> Result<OptionContract> {
        let option_type = match self.kind {
            Kind::Call => OptionType::Call,
            Kind::Put => OptionType::Put,
        };
        let exercise = match self.exercise {
            Exercise::European => ExerciseStyle::European,
            Exercise::American => ExerciseStyle::American,
        };
        Ok(
            OptionContract::new(
                option_type,
                self.spot,
                self.strike,
                self.time_to_expiry()?,
                self.rate,
                self.vol,
            )?
                .with_dividend_yield(self.dividend)?
                .with_exercise(exercise),
        )
    }

    fn category(&self) -> Result<OptionCategory> {
        if let (Some(kind), Some(level)) = (self.barrier, self.barrier_level) {
            let barrier_type = match kind {
                Barrier::UpAndOut => BarrierType::UpAndOut,
                Barrier::UpAndIn => BarrierType::UpAndIn,
                Barrier::DownAndOut => BarrierType::DownAndOut,
                Barrier::DownAndIn => BarrierType::DownAndIn,
            };
            return Ok(OptionCategory::Barrier(BarrierSpec::new(barrier_type, level)?));
        }
        if let Some(averaging) = self.asian {
            return Ok(OptionCategory::Asian(match averaging {
                Averaging::Geometric => AsianAveraging::Geometric,
                Averaging::Arithmetic => AsianAveraging::Arithmetic,
            }));
        }
        if let Some(strike) = self.lookback {
            return Ok(OptionCategory::Lookback(match strike {
                Lookback::Fixed => LookbackStrike::Fixed,
                Lookback::Floating => LookbackStrike::Floating,
            }));
        }
        Ok(OptionCategory::Vanilla)
    }

    fn models(&self) -> Result<Vec<ModelParameters>> {
        let mut models = Vec::new();
        if let Some(values) = &self.heston {
            let [theta, kappa, sigma_v, rho, v0] = fixed_arity::<5>("heston", values)?;
            models.push(ModelParameters::Heston(HestonParams::new(theta, kappa, sigma_v, rho, v0)));
        }
        if let Some(values) = &self.sabr {
            let [alpha, beta, rho, nu] = fixed_arity::<4>("sabr", values)?;
            models.push(ModelParameters::Sabr(SabrParams::new(alpha, beta, rho, nu)));
        }
        if let Some(values) = &self.jump {
            let [lambda, mean_jump, jump_vol] = fixed_arity::<3>("jump", values)?;
            models.push(ModelParameters::JumpDiffusion(JumpDiffusionParams::new(
                lambda, mean_jump, jump_vol,
            )));
        }
        Ok(models)
    }

    /// Builds the orchestrator request, taking simulation settings from `config`.
    pub fn request(&self, config: &CliConfig) -> Result<PricingRequest> {
        let mut request = PricingRequest::new(self.contract()?)
            .with_category(self.category()?)
            .with_quantity(self.quantity);
        for model in self.models()? {
            request = request.with_model(model);
        }
        if let Some(premium) = self.premium {
            request = request.with_premium(premium);
        }
        if self.simulate {
            request = request.with_simulation(SimulationParams {
                n_paths: config.mc_paths,
                seed: config.mc_seed,
                parallel: self.parallel,
                ..Default::default()
            });
        }
        Ok(request)
    }
}

fn fixed_arity<const N: usize>(name: &str, values: &[f64]) -> Result<[f64; N]> {
    <[f64; N]>::try_from(values).map_err(|_| {
        CliError::InvalidArgument(format!(
            "--{} expects {} comma-separated values, got {}",
            name,
            N,
            values.len()
        ))
    })
}

/// Priced position as printed by the CLI
#[derive(Debug, Serialize)]
pub struct OptionReport {
    pub quantity: f64,
    #[serde(flatten)]
    pub result: PricingResult,
}

impl Tabular for OptionReport {
    fn title(&self) -> String {
        "Option".to_string()
    }

    fn rows(&self) -> Vec<(String, String)> {
        let r = &self.result;
        let g = &r.greeks;
        let mut rows = vec![
            ("Black-Scholes price".to_string(), num(r.price, 4)),
            ("Fair value".to_string(), num(r.fair_value, 4)),
            ("Intrinsic value".to_string(), num(r.intrinsic_value, 4)),
            ("Time value".to_string(), num(r.time_value, 4)),
        ];
        if let Some(lattice) = &r.binomial {
            rows.push(("Binomial price".to_string(), num(lattice.price, 4)));
        }
        if let Some(mc) = &r.monte_carlo {
            rows.push(("Monte Carlo price".to_string(), num(mc.price, 4)));
            rows.push(("Monte Carlo std error".to_string(), num(mc.std_error, 4)));
            rows.push(("Monte Carlo seed".to_string(), mc.seed.map_or("-".to_string(), |s| s.to_string())));
        }
        for model in &r.model_prices {
            rows.push((format!("{} price", model.model), num(model.price, 4)));
        }
        if let Some(exotic) = r.exotic_price {
            rows.push(("Exotic price".to_string(), num(exotic, 4)));
        }
        rows.extend([
            ("Delta".to_string(), num(g.delta, 4)),
            ("Gamma".to_string(), num(g.gamma, 4)),
            ("Vega (per vol pt)".to_string(), num(g.vega, 4)),
            ("Theta (per day)".to_string(), num(g.theta, 4)),
            ("Rho (per rate pt)".to_string(), num(g.rho, 4)),
            ("Vanna".to_string(), num(g.vanna, 6)),
            ("Volga".to_string(), num(g.volga, 6)),
            ("Charm".to_string(), num(g.charm, 6)),
            ("Position value".to_string(), num(r.position_value(self.quantity), 2)),
            ("Position delta".to_string(), num(r.position_greeks.delta, 4)),
            ("Premium".to_string(), num(r.premium, 4)),
            ("Breakeven".to_string(), num(r.breakeven, 4)),
            ("Probability of profit".to_string(), pct(r.probability_of_profit)),
            ("Probability ITM".to_string(), pct(r.probability_itm)),
            (
                format!("VaR {:.0}% / {}d", r.risk.confidence * 100.0, r.risk.horizon_days),
                num(r.risk.value_at_risk, 4),
            ),
            ("Expected shortfall".to_string(), num(r.risk.expected_shortfall, 4)),
            ("Scenario max drawdown".to_string(), num(r.risk.max_drawdown, 4)),
            (
                "Early exercise premium".to_string(),
                opt(r.early_exercise_premium(), 4),
            ),
        ]);
        rows
    }
}

/// Run the option command
pub fn run(args: &OptionArgs, config: &CliConfig) -> Result<String> {
    let request = args.request(config)?;
    info!(
        category = request.category.name(),
        models = request.models.len(),
        simulate = request.simulation.is_some(),
        "pricing option"
    );
    let result = price_option(&request, &config.orchestrator())?;
    render(
        &OptionReport {
            quantity: request.quantity,
            result,
        },
        config.output,
    )
}
