//! Fixed income and time-value-of-money analytics.
//!
//! - [`bond`]: bullet bond price, durations, convexity and yield to maturity
//! - [`tvm`]: five-variable TVM equation solver
//! - [`cash_flows`]: NPV, IRR, profitability index, discounted payback

pub mod bond;
pub mod cash_flows;
pub mod error;
pub mod tvm;

pub use bond::{BondAnalytics, BondSpec, PriceClassification};
pub use cash_flows::{CashFlow, CashFlowSeries};
pub use error::FixedIncomeError;
pub use tvm::{
    effective_annual_rate, future_value, payment, present_value, PaymentTiming, TvmProblem,
    TvmSolution, TvmVariable,
};
