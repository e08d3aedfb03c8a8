//! Bond and yield-to-maturity command implementations

use clap::Args;
use pricer_models::fixed_income::{BondAnalytics, BondSpec, PriceClassification};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::CliConfig;
use crate::output::{num, pct, render, Tabular};
use crate::Result;

/// Bond terms shared by `bond` and `ytm`
#[derive(Debug, Clone, Args)]
pub struct BondTerms {
    /// Face (redemption) value
    #[arg(long, default_value_t = 1000.0)]
    pub face: f64,

    /// Annual coupon rate, e.g. 0.05
    #[arg(long)]
    pub coupon: f64,

    /// Years to maturity
    #[arg(long)]
    pub years: f64,

    /// Coupons per year (1, 2, 4 or 12)
    #[arg(long, default_value_t = 1)]
    pub frequency: u32,
}

/// Arguments of `fincalc bond`
#[derive(Debug, Clone, Args)]
pub struct BondArgs {
    #[command(flatten)]
    pub terms: BondTerms,

    /// Annual market rate (yield)
    #[arg(long)]
    pub rate: f64,

    /// Yield shift in basis points for the price change estimate
    #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
    pub shift_bp: f64,
}

/// Arguments of `fincalc ytm`
#[derive(Debug, Clone, Args)]
pub struct YtmArgs {
    #[command(flatten)]
    pub terms: BondTerms,

    /// Observed bond price
    #[arg(long)]
    pub price: f64,
}

/// Bond analytics as printed by the CLI
#[derive(Debug, Serialize)]
pub struct BondReport {
    pub bond: BondSpec,
    #[serde(flatten)]
    pub analytics: BondAnalytics,
    pub yield_shift_bp: f64,
    pub estimated_price_change: f64,
}

impl BondReport {
    fn new(bond: BondSpec, shift_bp: f64) -> Self {
        let analytics = bond.analytics();
        Self {
            bond,
            analytics,
            yield_shift_bp: shift_bp,
            estimated_price_change: analytics.price_change_estimate(shift_bp / 10_000.0),
        }
    }
}

fn classification_label(classification: PriceClassification) -> &'static str {
    match classification {
        PriceClassification::Discount => "discount",
        PriceClassification::Par => "par",
        PriceClassification::Premium => "premium",
    }
}

impl Tabular for BondReport {
    fn title(&self) -> String {
        "Bond".to_string()
    }

    fn rows(&self) -> Vec<(String, String)> {
        let a = &self.analytics;
        vec![
            ("Market rate".to_string(), pct(self.bond.market_rate)),
            ("Price".to_string(), num(a.price, 4)),
            ("Trades at".to_string(), classification_label(a.classification).to_string()),
            ("Macaulay duration".to_string(), num(a.macaulay_duration, 4)),
            ("Modified duration".to_string(), num(a.modified_duration, 4)),
            ("Convexity".to_string(), num(a.convexity, 4)),
            ("Current yield".to_string(), pct(a.current_yield)),
            (
                format!("Price change ({:+} bp)", self.yield_shift_bp),
                num(self.estimated_price_change, 4),
            ),
        ]
    }
}

/// Yield solved from a price
#[derive(Debug, Serialize)]
pub struct YtmReport {
    pub target_price: f64,
    pub yield_to_maturity: f64,
    #[serde(flatten)]
    pub analytics: BondAnalytics,
}

impl Tabular for YtmReport {
    fn title(&self) -> String {
        "Yield to maturity".to_string()
    }

    fn rows(&self) -> Vec<(String, String)> {
        vec![
            ("Price".to_string(), num(self.target_price, 4)),
            ("Yield to maturity".to_string(), pct(self.yield_to_maturity)),
            ("Trades at".to_string(), classification_label(self.analytics.classification).to_string()),
            ("Modified duration".to_string(), num(self.analytics.modified_duration, 4)),
            ("Convexity".to_string(), num(self.analytics.convexity, 4)),
        ]
    }
}

/// Run the bond command
pub fn run(args: &BondArgs, config: &CliConfig) -> Result<String> {
    let t = &args.terms;
    let bond = BondSpec::new(t.face, t.coupon, args.rate, t.years, t.frequency)?;
    info!(periods = bond.periods(), "pricing bond");
    render(&BondReport::new(bond, args.shift_bp), config.output)
}

/// Run the ytm command
pub fn run_ytm(args: &YtmArgs, config: &CliConfig) -> Result<String> {
    let t = &args.terms;
    // Placeholder market rate; the yield search reprices the cash flows only
    let bond = BondSpec::new(t.face, t.coupon, t.coupon.max(0.01), t.years, t.frequency)?;
    let ytm = bond.yield_to_maturity(args.price).map_err(|err| {
        warn!(best_estimate = ?err.best_estimate(), "yield to maturity did not converge");
        err
    })?;
    let analytics = bond.with_market_rate(ytm)?.analytics();
    render(
        &YtmReport {
            target_price: args.price,
            yield_to_maturity: ytm,
            analytics,
        },
        config.output,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::CliError;
    use approx::assert_relative_eq;
    use pricer_models::fixed_income::FixedIncomeError;

    fn terms() -> BondTerms {
        BondTerms {
            face: 1000.0,
            coupon: 0.05,
            years: 5.0,
            frequency: 1,
        }
    }

    fn json() -> CliConfig {
        CliConfig {
            output: OutputFormat::Json,
            ..Default::default()
        }
    }

    #[test]
    fn test_reference_bond() {
        let args = BondArgs {
            terms: terms(),
            rate: 0.06,
            shift_bp: 100.0,
        };
        let value: serde_json::Value = serde_json::from_str(&run(&args, &json()).unwrap()).unwrap();
        assert_relative_eq!(value["price"].as_f64().unwrap(), 957.88, epsilon = 0.01);
        assert_eq!(value["classification"], "Discount");
        assert!(value["estimated_price_change"].as_f64().unwrap() < 0.0);
    }

    #[test]
    fn test_ytm_round_trip() {
        let args = YtmArgs {
            terms: terms(),
            price: 957.876_362_144,
        };
        let value: serde_json::Value = serde_json::from_str(&run_ytm(&args, &json()).unwrap()).unwrap();
        assert_relative_eq!(value["yield_to_maturity"].as_f64().unwrap(), 0.06, epsilon = 1e-8);
    }

    #[test]
    fn test_ytm_above_max_price_fails() {
        // Undiscounted cash flows sum to 1250
        let args = YtmArgs {
            terms: terms(),
            price: 1300.0,
        };
        assert!(matches!(
            run_ytm(&args, &CliConfig::default()),
            Err(CliError::FixedIncome(FixedIncomeError::Convergence(_)))
        ));
    }

    #[test]
    fn test_bad_frequency() {
        let args = BondArgs {
            terms: BondTerms {
                frequency: 3,
                ..terms()
            },
            rate: 0.06,
            shift_bp: 100.0,
        };
        assert!(matches!(
            run(&args, &CliConfig::default()),
            Err(CliError::FixedIncome(FixedIncomeError::InvalidFrequency(3)))
        ));
    }
}
