//! Monte Carlo simulation configuration.

use super::error::ConfigError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Path count used when the builder is not given one.
pub const DEFAULT_PATHS: usize = 100_000;

/// Paths per independently seeded chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 16_384;

/// Monte Carlo simulation configuration.
///
/// Immutable once built; use [`MonteCarloConfig::builder`].
///
/// `n_paths` counts independent normal draws. With antithetic variates each
/// draw also prices its mirror `-Z`, so twice as many terminal prices are
/// simulated while the standard error is taken over the `n_paths` pair means.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(10_000)
///     .seed(42)
///     .antithetic(true)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 10_000);
/// assert_eq!(config.seed(), Some(42));
/// assert!(!config.parallel());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonteCarloConfig {
    n_paths: usize,
    seed: Option<u64>,
    antithetic: bool,
    parallel: bool,
    chunk_size: usize,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            n_paths: DEFAULT_PATHS,
            seed: None,
            antithetic: true,
            parallel: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Number of independent draws.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Seed for reproducibility; `None` draws one from the OS.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Whether each draw is paired with its antithetic mirror.
    #[inline]
    pub fn antithetic(&self) -> bool {
        self.antithetic
    }

    /// Whether chunks run on the rayon pool.
    #[inline]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Paths per seeded chunk.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of chunks the run is split into.
    #[inline]
    pub fn n_chunks(&self) -> usize {
        self.n_paths.div_ceil(self.chunk_size)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidPathCount` if `n_paths` is below 2 (no standard error) or above [`MAX_PATHS`]
    /// - `InvalidChunkSize` if `chunk_size` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_paths < 2 || self.n_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.n_paths));
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(self.chunk_size));
        }
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// Unset fields take the [`Default`] values: 100,000 paths, antithetic on,
/// sequential, no fixed seed.
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_paths: Option<usize>,
    seed: Option<u64>,
    antithetic: Option<bool>,
    parallel: Option<bool>,
    chunk_size: Option<usize>,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of independent draws.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets an optional seed, leaving entropy seeding on `None`.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables antithetic variates.
    #[inline]
    pub fn antithetic(mut self, antithetic: bool) -> Self {
        self.antithetic = Some(antithetic);
        self
    }

    /// Enables or disables rayon parallelism.
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Sets the number of paths per seeded chunk.
    #[inline]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if [`MonteCarloConfig::validate`] fails.
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let defaults = MonteCarloConfig::default();
        let config = MonteCarloConfig {
            n_paths: self.n_paths.unwrap_or(defaults.n_paths),
            seed: self.seed,
            antithetic: self.antithetic.unwrap_or(defaults.antithetic),
            parallel: self.parallel.unwrap_or(defaults.parallel),
            chunk_size: self.chunk_size.unwrap_or(defaults.chunk_size),
        };

        config.validate()?;
        Ok(config)
    }
}
