//! Time-value-of-money command implementation

use clap::Args;
use pricer_models::fixed_income::{
    effective_annual_rate, PaymentTiming, TvmProblem, TvmSolution, TvmVariable,
};
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::output::{num, pct, render, Tabular};
use crate::Result;

/// Arguments of `fincalc tvm`; leave exactly one of the five values out
#[derive(Debug, Clone, Args)]
pub struct TvmArgs {
    /// Present value (outflows negative)
    #[arg(long, allow_negative_numbers = true)]
    pub pv: Option<f64>,

    /// Future value
    #[arg(long, allow_negative_numbers = true)]
    pub fv: Option<f64>,

    /// Payment per period
    #[arg(long, allow_negative_numbers = true)]
    pub pmt: Option<f64>,

    /// Rate per period, e.g. 0.05
    #[arg(long, allow_negative_numbers = true)]
    pub rate: Option<f64>,

    /// Number of periods
    #[arg(long)]
    pub periods: Option<f64>,

    /// Payments at the start of each period (annuity due)
    #[arg(long)]
    pub due: bool,

    /// Periods per year, to report the effective annual rate
    #[arg(long)]
    pub periods_per_year: Option<u32>,
}

impl TvmArgs {
    /// The problem as handed to the solver.
    pub fn problem(&self) -> TvmProblem {
        let mut problem = TvmProblem::new().timing(if self.due {
            PaymentTiming::Beginning
        } else {
            PaymentTiming::End
        });
        problem.present_value = self.pv;
        problem.future_value = self.fv;
        problem.payment = self.pmt;
        problem.rate = self.rate;
        problem.periods = self.periods;
        problem
    }
}

/// Solved TVM problem as printed by the CLI
#[derive(Debug, Serialize)]
pub struct TvmReport {
    pub problem: TvmProblem,
    pub solution: TvmSolution,
    pub effective_annual_rate: Option<f64>,
}

fn variable_label(variable: TvmVariable) -> &'static str {
    match variable {
        TvmVariable::PresentValue => "Present value",
        TvmVariable::FutureValue => "Future value",
        TvmVariable::Payment => "Payment",
        TvmVariable::Rate => "Rate per period",
        TvmVariable::Periods => "Periods",
    }
}

impl Tabular for TvmReport {
    fn title(&self) -> String {
        format!("Solve for {}", variable_label(self.solution.variable).to_lowercase())
    }

    fn rows(&self) -> Vec<(String, String)> {
        let value = match self.solution.variable {
            TvmVariable::Rate => pct(self.solution.value),
            _ => num(self.solution.value, 4),
        };
        let mut rows = vec![(variable_label(self.solution.variable).to_string(), value)];
        if let Some(ear) = self.effective_annual_rate {
            rows.push(("Effective annual rate".to_string(), pct(ear)));
        }
        rows
    }
}

/// Run the tvm command
pub fn run(args: &TvmArgs, config: &CliConfig) -> Result<String> {
    let problem = args.problem();
    let solution = problem.solve()?;
    info!(variable = ?solution.variable, value = solution.value, "tvm solved");

    let rate = problem.rate.unwrap_or(solution.value);
    let effective_annual_rate = args
        .periods_per_year
        .map(|m| effective_annual_rate(rate * f64::from(m), m))
        .transpose()?;

    render(
        &TvmReport {
            problem,
            solution,
            effective_annual_rate,
        },
        config.output,
    )
}
