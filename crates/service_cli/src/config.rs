//! CLI configuration management
//!
//! Settings come from a TOML file, then `FINCALC_*` environment variables,
//! then command-line flags. Later sources win.

use pricer_risk::orchestrator::{OrchestratorConfig, SimulationParams, DEFAULT_BINOMIAL_STEPS};
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json")]
    InvalidOutputFormat(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels accepted by `--log-level` and `FINCALC_LOG_LEVEL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidOutputFormat(s.to_string())),
        }
    }
}

/// Resolved CLI settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level when `RUST_LOG` is unset
    pub log_level: LogLevel,
    /// Output format
    pub output: OutputFormat,
    /// Lattice steps for American options
    pub binomial_steps: usize,
    /// Monte Carlo paths when a simulation is requested
    pub mc_paths: usize,
    /// Monte Carlo seed; unset draws one per run
    pub mc_seed: Option<u64>,
    /// VaR and expected shortfall confidence
    pub var_confidence: f64,
    /// VaR horizon in days
    pub var_horizon_days: f64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            output: OutputFormat::Table,
            binomial_steps: DEFAULT_BINOMIAL_STEPS,
            mc_paths: SimulationParams::default().n_paths,
            mc_seed: None,
            var_confidence: 0.95,
            var_horizon_days: 1.0,
        }
    }
}

/// Values given on the command line; `None` leaves the lower layers alone
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Config file path
    pub config_file: Option<PathBuf>,
    pub log_level: Option<String>,
    pub output: Option<String>,
    pub binomial_steps: Option<usize>,
    pub mc_paths: Option<usize>,
    pub mc_seed: Option<u64>,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Override fields from `FINCALC_*` variables found by `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("FINCALC_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(steps) = lookup("FINCALC_BINOMIAL_STEPS") {
            self.binomial_steps = parse_value("FINCALC_BINOMIAL_STEPS", &steps)?;
        }
        if let Some(paths) = lookup("FINCALC_MC_PATHS") {
            self.mc_paths = parse_value("FINCALC_MC_PATHS", &paths)?;
        }
        if let Some(seed) = lookup("FINCALC_MC_SEED") {
            self.mc_seed = Some(parse_value("FINCALC_MC_SEED", &seed)?);
        }
        if let Some(output) = lookup("FINCALC_OUTPUT") {
            self.output = OutputFormat::from_str(&output)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        if let Some(output) = &cli.output {
            self.output = OutputFormat::from_str(output)?;
        }
        if let Some(steps) = cli.binomial_steps {
            self.binomial_steps = steps;
        }
        if let Some(paths) = cli.mc_paths {
            self.mc_paths = paths;
        }
        if let Some(seed) = cli.mc_seed {
            self.mc_seed = Some(seed);
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.binomial_steps == 0 {
            return Err(ConfigError::InvalidValue {
                name: "binomial_steps",
                value: self.binomial_steps.to_string(),
            });
        }
        if self.mc_paths < 2 {
            return Err(ConfigError::InvalidValue {
                name: "mc_paths",
                value: self.mc_paths.to_string(),
            });
        }
        if !(self.var_confidence > 0.5 && self.var_confidence < 1.0) {
            return Err(ConfigError::InvalidValue {
                name: "var_confidence",
                value: self.var_confidence.to_string(),
            });
        }
        if !(self.var_horizon_days > 0.0 && self.var_horizon_days.is_finite()) {
            return Err(ConfigError::InvalidValue {
                name: "var_horizon_days",
                value: self.var_horizon_days.to_string(),
            });
        }
        Ok(())
    }

    /// Orchestrator settings derived from this configuration
    pub fn orchestrator(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            binomial_steps: self.binomial_steps,
            var_confidence: self.var_confidence,
            var_horizon_days: self.var_horizon_days,
            ..Default::default()
        }
    }
}

fn parse_value<T: FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: raw.to_string(),
    })
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config<F>(cli: &CliOverrides, env: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };
    config.apply_env(env)?;
    config.merge_with_cli(cli)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.output, OutputFormat::Table);
        assert_eq!(config.binomial_steps, 500);
        assert_eq!(config.mc_paths, 100_000);
        assert_eq!(config.mc_seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("TRACE").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert!(LogLevel::from_str("loud").is_err());
        assert_eq!(LogLevel::Debug.as_filter_str(), "debug");
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config = CliConfig::from_toml(
            r#"
            output = "json"
            mc_seed = 42
        "#,
        )
        .unwrap();
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.mc_seed, Some(42));
        assert_eq!(config.binomial_steps, 500);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = CliConfig::from_toml("binomial_steps = 200\nmc_paths = 1000").unwrap();
        config
            .apply_env(env(&[("FINCALC_BINOMIAL_STEPS", "800"), ("FINCALC_LOG_LEVEL", "debug")]))
            .unwrap();
        assert_eq!(config.binomial_steps, 800);
        assert_eq!(config.mc_paths, 1000);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_cli_overrides_env() {
        let cli = CliOverrides {
            mc_paths: Some(5_000),
            output: Some("json".to_string()),
            ..Default::default()
        };
        let config = build_config(&cli, env(&[("FINCALC_MC_PATHS", "20000"), ("FINCALC_MC_SEED", "7")])).unwrap();
        assert_eq!(config.mc_paths, 5_000);
        assert_eq!(config.mc_seed, Some(7));
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            build_config(&CliOverrides::default(), env(&[("FINCALC_MC_PATHS", "many")])),
            Err(ConfigError::InvalidValue { name: "FINCALC_MC_PATHS", .. })
        ));
        assert!(matches!(
            build_config(&CliOverrides::default(), env(&[("FINCALC_OUTPUT", "xml")])),
            Err(ConfigError::InvalidOutputFormat(_))
        ));
        let cli = CliOverrides {
            binomial_steps: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            build_config(&cli, env(&[])),
            Err(ConfigError::InvalidValue { name: "binomial_steps", .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let cli = CliOverrides {
            config_file: Some(PathBuf::from("/nonexistent/fincalc.toml")),
            ..Default::default()
        };
        assert!(matches!(build_config(&cli, env(&[])), Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_orchestrator_settings() {
        let config = CliConfig {
            binomial_steps: 1000,
            var_confidence: 0.99,
            ..Default::default()
        };
        let orchestrator = config.orchestrator();
        assert_eq!(orchestrator.binomial_steps, 1000);
        assert_eq!(orchestrator.var_confidence, 0.99);
        assert!(orchestrator.validate().is_ok());
    }
}
