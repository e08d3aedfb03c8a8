//! Single-request option pricing.
//!
//! [`price_option`] always runs the Black-Scholes baseline with the full
//! Greek set, then adds whatever the request asks for:
//!
//! | Condition | Pricer |
//! |-----------|--------|
//! | American or Bermudan exercise, σ > 0 | CRR lattice |
//! | `simulation` supplied | Monte Carlo |
//! | each valid entry of `models` | Heston / SABR / jump diffusion |
//! | barrier, Asian or lookback category | exotic approximation |
//!
//! A lattice whose Δt is too coarse for the carry is refined up to
//! [`MAX_LATTICE_STEPS`]; past that the contract is valued as European.
//!
//! The fair value prefers the exotic price, then the lattice, then the
//! baseline. Scenario ladders revalue with the same pricer as the fair
//! value. Everything is recomputed per call; nothing is cached.

mod config;
mod request;
mod result;

pub use config::{OrchestratorConfig, DEFAULT_BINOMIAL_STEPS, MAX_LATTICE_STEPS};
pub use request::{PricingRequest, SimulationParams};
pub use result::{ModelPrice, PricingResult};

use pricer_models::analytical::BlackScholes;
use pricer_models::exotic::price_exotic;
use pricer_models::instruments::{OptionCategory, OptionContract};
use pricer_models::lattice::{BinomialTree, LatticeResult};
use pricer_models::models::ModelError;
use pricer_pricing::mc::{McError, McResult, MonteCarloPricer};
use pricer_pricing::rng::{PricerRng, RandomSource};
use tracing::{debug, info, instrument, warn};

use crate::error::RiskError;
use crate::metrics::RiskMetrics;
use crate::probability::{breakeven, probability_itm, probability_of_profit, terminal_density};
use crate::scenarios::ScenarioGrid;
use crate::strategy::{Strategy, StrategyAnalysis};

/// Prices one option position.
///
/// Monte Carlo, when requested, seeds its own generators from the request
/// (or the OS when no seed is given). Use [`price_option_with_rng`] to drive
/// it from a caller-owned source instead.
///
/// # Errors
/// Configuration and request validation errors are reported before any
/// pricing starts. Invalid alternative-model parameters are skipped with a
/// warning rather than failing the request.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{ExerciseStyle, OptionContract, OptionType};
/// use pricer_risk::orchestrator::{price_option, OrchestratorConfig, PricingRequest};
///
/// let put = OptionContract::new(OptionType::Put, 100.0, 100.0, 1.0, 0.05, 0.2)
///     .unwrap()
///     .with_exercise(ExerciseStyle::American);
/// let result = price_option(&PricingRequest::new(put), &OrchestratorConfig::default()).unwrap();
///
/// assert!((result.price - 5.5735).abs() < 1e-3);
/// assert!(result.early_exercise_premium().unwrap() > 0.0);
/// assert_eq!(result.fair_value, result.binomial.unwrap().price);
/// ```
pub fn price_option(request: &PricingRequest, config: &OrchestratorConfig) -> Result<PricingResult, RiskError> {
    run(request, config, None::<PricerRng>)
}

/// As [`price_option`], with Monte Carlo draws taken from `rng`.
///
/// The simulation runs sequentially on the single stream, so the result is
/// a pure function of the request and the state of `rng`.
pub fn price_option_with_rng<R: RandomSource>(
    request: &PricingRequest,
    config: &OrchestratorConfig,
    rng: &mut R,
) -> Result<PricingResult, RiskError> {
    run(request, config, Some(rng))
}

#[instrument(
    name = "price_option",
    skip_all,
    fields(
        option_type = ?request.contract.option_type,
        exercise = request.contract.exercise.name(),
        category = request.category.name(),
    )
)]
fn run<R: RandomSource>(
    request: &PricingRequest,
    config: &OrchestratorConfig,
    rng: Option<R>,
) -> Result<PricingResult, RiskError> {
    config.validate()?;
    request.validate()?;
    let contract = &request.contract;

    let price = BlackScholes::price_contract(contract)?;
    let greeks = BlackScholes::greeks_contract(contract)?;

    let tree = BinomialTree::new(config.binomial_steps)?;
    let binomial = if !contract.exercise.allows_early_exercise() {
        None
    } else if contract.volatility > 0.0 {
        lattice(&tree, contract)?
    } else {
        warn!("zero volatility: early exercise not valued, using the European price");
        None
    };
    let use_lattice = binomial.is_some();

    let monte_carlo = match &request.simulation {
        Some(params) => Some(simulate(contract, params, rng)?),
        None => None,
    };

    let model_prices = price_models(request);

    let exotic_price = if request.category.is_exotic() {
        Some(price_exotic(contract, &request.category)?)
    } else {
        None
    };

    let fair_value = exotic_price
        .or(binomial.map(|lattice| lattice.price))
        .unwrap_or(price);
    let intrinsic_value = contract.intrinsic_value();
    let premium = request.premium.unwrap_or(fair_value);

    let category = request.category;
    let scenarios = ScenarioGrid::evaluate(contract, &config.scenarios, |shocked| {
        revalue(shocked, &category, use_lattice.then_some(&tree))
    })?;

    let position_greeks = greeks.scale(request.quantity);
    let risk = RiskMetrics::compute(
        &position_greeks,
        contract.spot,
        contract.volatility,
        &scenarios,
        request.quantity,
        config.var_confidence,
        config.var_horizon_days,
    )?;

    let result = PricingResult {
        price,
        fair_value,
        intrinsic_value,
        time_value: fair_value - intrinsic_value,
        greeks,
        position_greeks,
        binomial,
        monte_carlo,
        model_prices,
        exotic_price,
        premium,
        breakeven: breakeven(contract, premium),
        probability_of_profit: probability_of_profit(contract, premium, request.quantity),
        probability_itm: probability_itm(contract),
        density: terminal_density(contract, config.density_points, config.density_width),
        scenarios,
        risk,
    };

    info!(
        price = result.price,
        fair_value = result.fair_value,
        models = result.model_prices.len(),
        value_at_risk = result.risk.value_at_risk,
        "option priced"
    );
    Ok(result)
}

fn simulate<R: RandomSource>(
    contract: &OptionContract,
    params: &SimulationParams,
    rng: Option<R>,
) -> Result<McResult, RiskError> {
    let pricer = MonteCarloPricer::new(params.to_config().map_err(McError::from)?).map_err(McError::from)?;
    let result = match rng {
        Some(mut rng) => pricer.price_with_rng(contract, &mut rng)?,
        None => pricer.price_european(contract)?,
    };
    Ok(result)
}

/// Prices every valid alternative model, dropping the rest.
fn price_models(request: &PricingRequest) -> Vec<ModelPrice> {
    request
        .models
        .iter()
        .filter_map(|model| {
            if let Err(err) = model.validate() {
                warn!(model = model.name(), error = %err, "skipping invalid model parameters");
                return None;
            }
            let priced = model.price(&request.contract).and_then(|price| {
                Ok(ModelPrice {
                    model: model.name().to_string(),
                    price,
                    effective_volatility: model.effective_volatility(&request.contract)?,
                })
            });
            match priced {
                Ok(price) => {
                    debug!(model = %price.model, price = price.price, "model priced");
                    Some(price)
                }
                Err(err) => {
                    warn!(model = model.name(), error = %err, "model pricing failed");
                    None
                }
            }
        })
        .collect()
}

/// Lattice valuation, refining the step count when the carry is too
/// large for the volatility at the configured Δt.
///
/// Returns `None`, with a warning, when no tree up to
/// [`MAX_LATTICE_STEPS`] keeps the risk-neutral probability in [0, 1].
fn lattice(tree: &BinomialTree, contract: &OptionContract) -> Result<Option<LatticeResult>, RiskError> {
    match tree.evaluate(contract) {
        Ok(result) => Ok(Some(result)),
        Err(ModelError::ArbitrageProbability { probability }) => {
            // p stays in [0, 1] while Δt ≤ (σ / (r - q))²
            let carry = contract.rate - contract.dividend_yield;
            let needed = 2.0 * (contract.expiry * (carry / contract.volatility).powi(2)).ceil();
            if needed <= MAX_LATTICE_STEPS as f64 {
                let refined = BinomialTree::new((needed as usize).max(tree.steps() + 1))?;
                debug!(probability, steps = refined.steps(), "refining lattice");
                return Ok(Some(refined.evaluate(contract)?));
            }
            warn!(
                probability,
                needed_steps = needed,
                "lattice cannot resolve the carry: early exercise not valued, using the European price"
            );
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// Value of a shocked contract under the pricer chosen for the fair value.
fn revalue(contract: &OptionContract, category: &OptionCategory, tree: Option<&BinomialTree>) -> Result<f64, RiskError> {
    if category.is_exotic() {
        return Ok(price_exotic(contract, category)?);
    }
    let lattice_price = match tree {
        Some(tree) if contract.volatility > 0.0 => lattice(tree, contract)?.map(|result| result.price),
        _ => None,
    };
    match lattice_price {
        Some(price) => Ok(price),
        None => Ok(BlackScholes::price_contract(contract)?),
    }
}

/// Aggregates a multi-leg strategy.
///
/// Thin wrapper over [`Strategy::analyse`] that validates `config` and
/// uses its profile resolution.
pub fn price_strategy(strategy: &Strategy, config: &OrchestratorConfig) -> Result<StrategyAnalysis, RiskError> {
    config.validate()?;
    let analysis = strategy.analyse(config.profile_points)?;
    info!(
        legs = strategy.legs.len(),
        net_premium = analysis.net_premium,
        market_value = analysis.market_value,
        "strategy priced"
    );
    Ok(analysis)
}
