//! Time helpers for option expiries and scenario grids.
//!
//! All year fractions use Act/365 with a 365-day calendar year, which is also
//! the basis for per-day theta and the theta decay curve.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::{parse_date, year_fraction};
//!
//! let start = parse_date("2024-01-01").unwrap();
//! let end = parse_date("2024-07-01").unwrap();
//! let yf = year_fraction(start, end).unwrap();
//! assert!((yf - 182.0 / 365.0).abs() < 1e-12);
//! ```

use chrono::NaiveDate;

use super::error::DateError;

/// Calendar days per year used for all day/year conversions.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Converts a number of calendar days to a year fraction.
#[inline]
pub fn days_to_years(days: f64) -> f64 {
    days / DAYS_PER_YEAR
}

/// Converts a year fraction to calendar days.
#[inline]
pub fn years_to_days(years: f64) -> f64 {
    years * DAYS_PER_YEAR
}

/// Parses an ISO 8601 (`YYYY-MM-DD`) date.
pub fn parse_date(s: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| DateError::ParseError(format!("{}: {}", s, e)))
}

/// Act/365 year fraction between two dates.
///
/// # Errors
/// `DateError::Reversed` if `end` precedes `start`; expiries in the past are
/// rejected rather than producing a negative time to expiration.
pub fn year_fraction(start: NaiveDate, end: NaiveDate) -> Result<f64, DateError> {
    if end < start {
        return Err(DateError::Reversed {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    let days = (end - start).num_days() as f64;
    Ok(days_to_years(days))
}
