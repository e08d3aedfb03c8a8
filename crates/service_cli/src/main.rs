//! fincalc - Command Line Financial Calculator
//!
//! # Commands
//!
//! - `fincalc option` - Price an option, with Greeks, lattice, simulation and risk metrics
//! - `fincalc bond` - Bond price, duration and convexity at a market rate
//! - `fincalc ytm` - Yield to maturity from a bond price
//! - `fincalc tvm` - Solve the time-value-of-money equation for one unknown
//! - `fincalc cashflow` - NPV, IRR, profitability index and discounted payback
//!
//! Settings are resolved CLI > `FINCALC_*` environment > config file > defaults.
//! Logs go to stderr so that stdout carries only the report.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use commands::{bond, cashflow, option, tvm};
use config::{build_config, CliOverrides};

/// Option, bond and cash-flow analytics
#[derive(Parser)]
#[command(name = "fincalc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Binomial lattice steps
    #[arg(long, global = true)]
    binomial_steps: Option<usize>,

    /// Monte Carlo paths
    #[arg(long, global = true)]
    paths: Option<usize>,

    /// Monte Carlo seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price an option and report its risk
    Option(option::OptionArgs),

    /// Price a bond from its market rate
    Bond(bond::BondArgs),

    /// Solve a bond's yield to maturity from its price
    Ytm(bond::YtmArgs),

    /// Solve the time-value-of-money equation
    Tvm(tvm::TvmArgs),

    /// Evaluate a series of cash flows
    Cashflow(cashflow::CashFlowArgs),
}

impl From<&Cli> for CliOverrides {
    fn from(cli: &Cli) -> Self {
        Self {
            config_file: cli.config.clone(),
            log_level: cli.log_level.clone(),
            output: cli.output.clone(),
            binomial_steps: cli.binomial_steps,
            mc_paths: cli.paths,
            mc_seed: cli.seed,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&CliOverrides::from(&cli), |key| std::env::var(key).ok())?;

    init_tracing(config.log_level.as_filter_str());
    info!(
        output = ?config.output,
        binomial_steps = config.binomial_steps,
        mc_paths = config.mc_paths,
        "Configuration loaded"
    );

    let report = match &cli.command {
        Commands::Option(args) => option::run(args, &config),
        Commands::Bond(args) => bond::run(args, &config),
        Commands::Ytm(args) => bond::run_ytm(args, &config),
        Commands::Tvm(args) => tvm::run(args, &config),
        Commands::Cashflow(args) => cashflow::run(args, &config),
    }?;
    println!("{}", report);
    Ok(())
}
