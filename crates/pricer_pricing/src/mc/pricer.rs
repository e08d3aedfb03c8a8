//! European option pricing by terminal-price simulation under GBM.

use pricer_models::instruments::OptionContract;
use rayon::prelude::*;
use tracing::debug;

use super::config::MonteCarloConfig;
use super::error::{ConfigError, McError};
use crate::rng::{derive_seed, PricerRng, RandomSource};

/// Monte Carlo price estimate.
///
/// `price` and `std_error` are both discounted to today.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct McResult {
    /// Discounted sample mean of the payoff.
    pub price: f64,
    /// Standard error of the price estimate (`stdev / √N`).
    pub std_error: f64,
    /// Number of independent draws.
    pub n_paths: usize,
    /// Whether antithetic pairs were used.
    pub antithetic: bool,
    /// Base seed of the run, when the engine seeded its own generators.
    pub seed: Option<u64>,
}

impl McResult {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }

    /// Lower and upper bounds of the 95% interval.
    pub fn interval_95(&self) -> (f64, f64) {
        let half = self.confidence_95();
        (self.price - half, self.price + half)
    }
}

/// Running mean and sum of squared deviations (Welford), mergeable across
/// chunks with Chan's update.
#[derive(Clone, Copy, Debug, Default)]
struct SampleStats {
    count: usize,
    mean: f64,
    m2: f64,
}

impl SampleStats {
    #[inline]
    fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    fn merge(self, other: Self) -> Self {
        if self.count == 0 {
            return other;
        }
        if other.count == 0 {
            return self;
        }
        let (na, nb) = (self.count as f64, other.count as f64);
        let n = na + nb;
        let delta = other.mean - self.mean;
        Self {
            count: self.count + other.count,
            mean: self.mean + delta * nb / n,
            m2: self.m2 + other.m2 + delta * delta * na * nb / n,
        }
    }

    fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }
}

/// Per-contract constants of `S_T = S·exp(drift + diffusion·Z)`.
#[derive(Clone, Copy)]
struct TerminalSampler<'a> {
    contract: &'a OptionContract,
    drift: f64,
    diffusion: f64,
    antithetic: bool,
}

impl<'a> TerminalSampler<'a> {
    fn new(contract: &'a OptionContract, antithetic: bool) -> Self {
        let sigma = contract.volatility;
        let t = contract.expiry;
        Self {
            contract,
            drift: (contract.rate - contract.dividend_yield - 0.5 * sigma * sigma) * t,
            diffusion: sigma * t.sqrt(),
            antithetic,
        }
    }

    /// Undiscounted payoff sample for one normal draw.
    #[inline]
    fn sample(&self, z: f64) -> f64 {
        let spot = self.contract.spot;
        let up = self.contract.payoff(spot * (self.drift + self.diffusion * z).exp());
        if self.antithetic {
            let down = self.contract.payoff(spot * (self.drift - self.diffusion * z).exp());
            0.5 * (up + down)
        } else {
            up
        }
    }

    fn run<R: RandomSource>(&self, rng: &mut R, n_paths: usize) -> SampleStats {
        let mut stats = SampleStats::default();
        for _ in 0..n_paths {
            stats.push(self.sample(rng.next_normal()));
        }
        stats
    }
}

/// Monte Carlo engine for European payoffs.
///
/// Stateless apart from its configuration: every call builds fresh
/// generators, so the same configuration and seed always reproduce the same
/// estimate. Exercise style is ignored; the payoff is taken at expiry.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{OptionContract, OptionType};
/// use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(50_000)
///     .seed(42)
///     .build()
///     .unwrap();
/// let pricer = MonteCarloPricer::new(config).unwrap();
///
/// let contract = OptionContract::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let result = pricer.price_european(&contract).unwrap();
/// assert!((result.price - 10.4506).abs() < 4.0 * result.std_error + 1e-3);
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloPricer {
    config: MonteCarloConfig,
}

impl MonteCarloPricer {
    /// Creates a pricer with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration is invalid.
    pub fn new(config: MonteCarloConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns a reference to the configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Prices a European payoff with engine-owned generators.
    ///
    /// The run is split into chunks of `chunk_size` paths, chunk `i` seeded
    /// with `derive_seed(seed, i)`. Chunk statistics merge in chunk order,
    /// so parallel and sequential runs give identical results. Without a
    /// configured seed one is drawn from the OS and reported in the result.
    ///
    /// # Errors
    ///
    /// - `McError::Instrument` if the contract fails validation
    /// - `McError::NonFinite` if the estimate overflows
    pub fn price_european(&self, contract: &OptionContract) -> Result<McResult, McError> {
        contract.validate()?;
        let seed = self
            .config
            .seed()
            .unwrap_or_else(|| PricerRng::from_entropy().seed());

        if let Some(result) = self.degenerate(contract, Some(seed)) {
            return Ok(result);
        }

        let sampler = TerminalSampler::new(contract, self.config.antithetic());
        let n_paths = self.config.n_paths();
        let chunk_size = self.config.chunk_size();
        let run_chunk = |chunk: usize| {
            let start = chunk * chunk_size;
            let len = chunk_size.min(n_paths - start);
            let mut rng = PricerRng::from_seed(derive_seed(seed, chunk as u64));
            sampler.run(&mut rng, len)
        };

        let chunks = 0..self.config.n_chunks();
        let stats = if self.config.parallel() {
            let partials: Vec<SampleStats> = chunks.into_par_iter().map(run_chunk).collect();
            partials.into_iter().fold(SampleStats::default(), SampleStats::merge)
        } else {
            chunks.map(run_chunk).fold(SampleStats::default(), SampleStats::merge)
        };

        self.finish(contract, stats, Some(seed))
    }

    /// Prices a European payoff drawing every normal from `rng`.
    ///
    /// Runs sequentially on the caller's source; the configured seed and
    /// parallel flag are not used.
    ///
    /// # Errors
    ///
    /// Same as [`price_european`](Self::price_european).
    pub fn price_with_rng<R: RandomSource>(
        &self,
        contract: &OptionContract,
        rng: &mut R,
    ) -> Result<McResult, McError> {
        contract.validate()?;
        if let Some(result) = self.degenerate(contract, None) {
            return Ok(result);
        }
        let sampler = TerminalSampler::new(contract, self.config.antithetic());
        let stats = sampler.run(rng, self.config.n_paths());
        self.finish(contract, stats, None)
    }

    /// At expiry the payoff is known and nothing is simulated.
    fn degenerate(&self, contract: &OptionContract, seed: Option<u64>) -> Option<McResult> {
        if contract.expiry > 0.0 {
            return None;
        }
        Some(McResult {
            price: contract.intrinsic_value(),
            std_error: 0.0,
            n_paths: 0,
            antithetic: self.config.antithetic(),
            seed,
        })
    }

    fn finish(
        &self,
        contract: &OptionContract,
        stats: SampleStats,
        seed: Option<u64>,
    ) -> Result<McResult, McError> {
        let discount = contract.discount_factor();
        let price = stats.mean * discount;
        let std_error = (stats.variance() / stats.count as f64).sqrt() * discount;
        if !(price.is_finite() && std_error.is_finite()) {
            return Err(McError::NonFinite { price, std_error });
        }

        debug!(
            n_paths = stats.count,
            antithetic = self.config.antithetic(),
            parallel = self.config.parallel(),
            seed = ?seed,
            price,
            std_error,
            "Monte Carlo run complete"
        );

        Ok(McResult {
            price,
            std_error,
            n_paths: stats.count,
            antithetic: self.config.antithetic(),
            seed,
        })
    }
}
