//! Instrument error types.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Contract validation errors.
///
/// Raised when an option contract or exotic descriptor is constructed with
/// terms no pricer can accept.
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Non-positive or non-finite spot price.
    #[error("Invalid spot: S = {spot}")]
    InvalidSpot {
        /// The invalid spot value
        spot: f64,
    },

    /// Non-positive or non-finite strike.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Negative or non-finite time to expiration.
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Negative or non-finite volatility.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Any other contract term out of range.
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of the parameter error
        message: String,
    },
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = InstrumentError::InvalidExpiry { expiry: -0.5 };
        assert_eq!(format!("{}", err), "Invalid expiry: T = -0.5");

        let err = InstrumentError::InvalidVolatility { volatility: -0.2 };
        assert_eq!(format!("{}", err), "Invalid volatility: σ = -0.2");
    }

    #[test]
    fn test_converts_to_invalid_input() {
        let err: PricingError = InstrumentError::InvalidSpot { spot: 0.0 }.into();
        assert!(matches!(err, PricingError::InvalidInput(msg) if msg.contains("spot")));
    }
}
