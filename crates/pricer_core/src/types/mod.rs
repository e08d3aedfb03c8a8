//! Core error and time types.
//!
//! This module provides:
//! - `error`: Structured error types for pricing, special functions, solvers and dates
//! - `time`: Act/365 day and year conversions
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`PricingError`], [`MathError`], [`SolverError`], [`DateError`] from `error`
//! - [`days_to_years`], [`year_fraction`], [`DAYS_PER_YEAR`] from `time`

pub mod error;
pub mod time;

// Re-export commonly used types at module level
pub use error::{DateError, MathError, PricingError, SolverError};
pub use time::{days_to_years, year_fraction, years_to_days, DAYS_PER_YEAR};
