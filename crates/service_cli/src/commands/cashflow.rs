//! Cash-flow (NPV/IRR) command implementation

use clap::Args;
use pricer_models::fixed_income::CashFlowSeries;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::CliConfig;
use crate::output::{num, opt, pct, render, Tabular};
use crate::Result;

/// Arguments of `fincalc cashflow`
#[derive(Debug, Clone, Args)]
pub struct CashFlowArgs {
    /// Discount rate per period
    #[arg(long, allow_negative_numbers = true)]
    pub rate: f64,

    /// Flows at periods 0, 1, 2, ... (outflows negative)
    #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
    pub flows: Vec<f64>,
}

/// Cash-flow measures as printed by the CLI
#[derive(Debug, Serialize)]
pub struct CashFlowReport {
    pub rate: f64,
    pub flows: Vec<f64>,
    pub npv: f64,
    pub irr: Option<f64>,
    pub profitability_index: Option<f64>,
    pub discounted_payback_period: Option<f64>,
}

impl Tabular for CashFlowReport {
    fn title(&self) -> String {
        format!("Cash flows ({} periods)", self.flows.len().saturating_sub(1))
    }

    fn rows(&self) -> Vec<(String, String)> {
        vec![
            ("Discount rate".to_string(), pct(self.rate)),
            ("NPV".to_string(), num(self.npv, 4)),
            ("IRR".to_string(), self.irr.map_or_else(|| "-".to_string(), pct)),
            ("Profitability index".to_string(), opt(self.profitability_index, 4)),
            ("Discounted payback".to_string(), opt(self.discounted_payback_period, 4)),
        ]
    }
}

/// Run the cashflow command
///
/// A failed IRR search is reported as a missing value rather than an error.
pub fn run(args: &CashFlowArgs, config: &CliConfig) -> Result<String> {
    let series = CashFlowSeries::new(args.flows.clone())?;
    let npv = series.npv(args.rate)?;
    let irr = match series.irr() {
        Ok(irr) => Some(irr),
        Err(err) => {
            warn!(error = %err, best_estimate = ?err.best_estimate(), "IRR not found");
            None
        }
    };
    info!(npv, ?irr, "cash flows evaluated");

    render(
        &CashFlowReport {
            rate: args.rate,
            flows: args.flows.clone(),
            npv,
            irr,
            profitability_index: series.profitability_index(args.rate)?,
            discounted_payback_period: series.discounted_payback_period(args.rate)?,
        },
        config.output,
    )
}
