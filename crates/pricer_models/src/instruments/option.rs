//! Option contract terms.

use super::error::InstrumentError;
use super::exercise::ExerciseStyle;

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionType {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionType {
    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// +1 for calls, -1 for puts.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Exercise value `max(±(S - K), 0)`.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::instruments::OptionType;
    ///
    /// assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
    /// assert_eq!(OptionType::Put.intrinsic(110.0, 100.0), 0.0);
    /// ```
    #[inline]
    pub fn intrinsic(self, spot: f64, strike: f64) -> f64 {
        (self.sign() * (spot - strike)).max(0.0)
    }

    /// The other side of the same strike.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            OptionType::Call => OptionType::Put,
            OptionType::Put => OptionType::Call,
        }
    }
}

/// Terms and market inputs of a single option, immutable per pricing call.
///
/// Rates and yields are continuously compounded and annualised; the expiry
/// is in years. Construct through [`OptionContract::new`] and adjust with the
/// `with_*` methods, each of which revalidates.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{ExerciseStyle, OptionContract, OptionType};
///
/// let contract = OptionContract::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2)
///     .unwrap()
///     .with_dividend_yield(0.02)
///     .unwrap()
///     .with_exercise(ExerciseStyle::American);
/// assert_eq!(contract.dividend_yield, 0.02);
///
/// assert!(OptionContract::new(OptionType::Put, 100.0, -1.0, 1.0, 0.05, 0.2).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionContract {
    /// Call or put
    pub option_type: OptionType,
    /// Exercise style
    pub exercise: ExerciseStyle,
    /// Spot price of the underlying (S > 0)
    pub spot: f64,
    /// Strike (K > 0)
    pub strike: f64,
    /// Time to expiration in years (T ≥ 0)
    pub expiry: f64,
    /// Risk-free rate (r)
    pub rate: f64,
    /// Continuous dividend yield (q)
    pub dividend_yield: f64,
    /// Volatility (σ ≥ 0; σ = 0 prices the discounted forward intrinsic value)
    pub volatility: f64,
}

impl OptionContract {
    /// Creates a European contract without dividends.
    ///
    /// # Errors
    /// `InstrumentError` if any term fails [`validate`](Self::validate).
    pub fn new(
        option_type: OptionType,
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        volatility: f64,
    ) -> Result<Self, InstrumentError> {
        let contract = Self {
            option_type,
            exercise: ExerciseStyle::European,
            spot,
            strike,
            expiry,
            rate,
            dividend_yield: 0.0,
            volatility,
        };
        contract.validate()?;
        Ok(contract)
    }

    /// Sets the continuous dividend yield.
    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Result<Self, InstrumentError> {
        self.dividend_yield = dividend_yield;
        self.validate()?;
        Ok(self)
    }

    /// Sets the exercise style.
    pub fn with_exercise(mut self, exercise: ExerciseStyle) -> Self {
        self.exercise = exercise;
        self
    }

    /// Copy with a different spot, for scenario shocks.
    pub fn with_spot(&self, spot: f64) -> Result<Self, InstrumentError> {
        let mut shocked = self.clone();
        shocked.spot = spot;
        shocked.validate()?;
        Ok(shocked)
    }

    /// Copy with a different volatility, for scenario shocks.
    pub fn with_volatility(&self, volatility: f64) -> Result<Self, InstrumentError> {
        let mut shocked = self.clone();
        shocked.volatility = volatility;
        shocked.validate()?;
        Ok(shocked)
    }

    /// Copy with a different time to expiration.
    pub fn with_expiry(&self, expiry: f64) -> Result<Self, InstrumentError> {
        let mut shocked = self.clone();
        shocked.expiry = expiry;
        shocked.validate()?;
        Ok(shocked)
    }

    /// Copy with the opposite option type.
    pub fn flipped(&self) -> Self {
        let mut other = self.clone();
        other.option_type = self.option_type.opposite();
        other
    }

    /// Checks every term.
    ///
    /// Fields are public, so pricers call this again on entry.
    pub fn validate(&self) -> Result<(), InstrumentError> {
        if !(self.spot.is_finite() && self.spot > 0.0) {
            return Err(InstrumentError::InvalidSpot { spot: self.spot });
        }
        if !(self.strike.is_finite() && self.strike > 0.0) {
            return Err(InstrumentError::InvalidStrike {
                strike: self.strike,
            });
        }
        if !(self.expiry.is_finite() && self.expiry >= 0.0) {
            return Err(InstrumentError::InvalidExpiry {
                expiry: self.expiry,
            });
        }
        if !(self.volatility.is_finite() && self.volatility >= 0.0) {
            return Err(InstrumentError::InvalidVolatility {
                volatility: self.volatility,
            });
        }
        if !self.rate.is_finite() {
            return Err(InstrumentError::InvalidParameter {
                message: format!("rate must be finite, got {}", self.rate),
            });
        }
        if !self.dividend_yield.is_finite() {
            return Err(InstrumentError::InvalidParameter {
                message: format!("dividend yield must be finite, got {}", self.dividend_yield),
            });
        }
        if let ExerciseStyle::Bermudan { exercise_dates } = &self.exercise {
            if let Some(&bad) = exercise_dates.iter().find(|t| !(t.is_finite() && **t >= 0.0)) {
                return Err(InstrumentError::InvalidParameter {
                    message: format!("Bermudan exercise date must be non-negative, got {}", bad),
                });
            }
        }
        Ok(())
    }

    /// Intrinsic value at the current spot.
    #[inline]
    pub fn intrinsic_value(&self) -> f64 {
        self.option_type.intrinsic(self.spot, self.strike)
    }

    /// Payoff at expiry for a terminal spot.
    #[inline]
    pub fn payoff(&self, terminal_spot: f64) -> f64 {
        self.option_type.intrinsic(terminal_spot, self.strike)
    }

    /// Forward price `S·e^{(r-q)T}`.
    #[inline]
    pub fn forward(&self) -> f64 {
        self.spot * ((self.rate - self.dividend_yield) * self.expiry).exp()
    }

    /// Discount factor `e^{-rT}`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.expiry).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atm_call() -> OptionContract {
        OptionContract::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2).unwrap()
    }

    #[test]
    fn test_option_type_helpers() {
        assert!(OptionType::Call.is_call());
        assert_eq!(OptionType::Put.sign(), -1.0);
        assert_eq!(OptionType::Call.opposite(), OptionType::Put);
        assert_eq!(OptionType::Put.intrinsic(90.0, 100.0), 10.0);
    }

    #[test]
    fn test_new_defaults() {
        let c = atm_call();
        assert!(c.exercise.is_european());
        assert_eq!(c.dividend_yield, 0.0);
    }

    #[test]
    fn test_validation_rejects_bad_terms() {
        let new = |s, k, t, v| OptionContract::new(OptionType::Call, s, k, t, 0.05, v);
        assert!(matches!(new(0.0, 100.0, 1.0, 0.2), Err(InstrumentError::InvalidSpot { .. })));
        assert!(matches!(new(100.0, 0.0, 1.0, 0.2), Err(InstrumentError::InvalidStrike { .. })));
        assert!(matches!(new(100.0, 100.0, -1.0, 0.2), Err(InstrumentError::InvalidExpiry { .. })));
        assert!(matches!(
            new(100.0, 100.0, 1.0, -0.1),
            Err(InstrumentError::InvalidVolatility { .. })
        ));
        assert!(matches!(
            new(100.0, 100.0, f64::NAN, 0.2),
            Err(InstrumentError::InvalidExpiry { .. })
        ));
    }

    #[test]
    fn test_zero_expiry_and_zero_vol_are_valid() {
        assert!(OptionContract::new(OptionType::Put, 100.0, 100.0, 0.0, 0.05, 0.2).is_ok());
        assert!(OptionContract::new(OptionType::Put, 100.0, 100.0, 1.0, 0.05, 0.0).is_ok());
    }

    #[test]
    fn test_bermudan_dates_validated() {
        let mut c = atm_call().with_exercise(ExerciseStyle::bermudan(vec![0.5, -0.1]));
        assert!(c.validate().is_err());
        c.exercise = ExerciseStyle::bermudan(vec![0.5]);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_shocked_copies() {
        let c = atm_call();
        assert_eq!(c.with_spot(120.0).unwrap().spot, 120.0);
        assert!(c.with_volatility(-0.1).is_err());
        assert_eq!(c.flipped().option_type, OptionType::Put);
        assert_eq!(c.spot, 100.0);
    }

    #[test]
    fn test_forward_and_discount() {
        let c = atm_call().with_dividend_yield(0.02).unwrap();
        assert!((c.forward() - 100.0 * 0.03_f64.exp()).abs() < 1e-12);
        assert!((c.discount_factor() - (-0.05_f64).exp()).abs() < 1e-15);
    }
}
