//! Black-Scholes-Merton pricing and Greeks.
//!
//! Closed-form European prices with a continuous dividend yield q:
//!
//! d₁ = (ln(S/K) + (r − q + σ²/2)T) / (σ√T), d₂ = d₁ − σ√T
//!
//! C = S·e^(−qT)·N(d₁) − K·e^(−rT)·N(d₂), P = K·e^(−rT)·N(−d₂) − S·e^(−qT)·N(−d₁)
//!
//! # Greek conventions
//!
//! | Greek  | Definition        | Scaling                  |
//! |--------|-------------------|--------------------------|
//! | delta  | ∂V/∂S             | raw                      |
//! | gamma  | ∂²V/∂S²           | raw                      |
//! | vega   | ∂V/∂σ             | ÷100 (per vol point)     |
//! | theta  | −∂V/∂T            | ÷365 (per calendar day)  |
//! | rho    | ∂V/∂r             | ÷100 (per rate point)    |
//! | vanna  | ∂²V/∂S∂σ          | ÷100                     |
//! | volga  | ∂²V/∂σ²           | ÷10⁴                     |
//! | charm  | −∂Δ/∂T            | ÷365                     |
//! | color  | −∂Γ/∂T            | ÷365                     |
//! | speed  | ∂³V/∂S³           | raw                      |
//! | zomma  | ∂Γ/∂σ             | ÷100                     |
//! | ultima | ∂³V/∂σ³           | ÷10⁶                     |
//!
//! When σ = 0 or T = 0 the price is the intrinsic value (on the discounted
//! forward when only σ = 0), delta is 0 or ±e^(−qT) by moneyness, and every
//! other Greek is 0.

use num_traits::Float;
use pricer_core::math::distributions::{norm_cdf, norm_pdf};

use super::error::AnalyticalError;
use crate::instruments::{OptionContract, OptionType};

/// Below this, T or σ is treated as zero.
const DEGENERATE_EPS: f64 = 1e-10;

/// Full Greek set, scaled per the module conventions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks<T> {
    /// ∂V/∂S
    pub delta: T,
    /// ∂²V/∂S²
    pub gamma: T,
    /// ∂V/∂σ per vol point
    pub vega: T,
    /// Value change per calendar day
    pub theta: T,
    /// ∂V/∂r per rate point
    pub rho: T,
    /// ∂Δ/∂σ per vol point
    pub vanna: T,
    /// ∂²V/∂σ² per vol point squared
    pub volga: T,
    /// Delta change per calendar day
    pub charm: T,
    /// Gamma change per calendar day
    pub color: T,
    /// ∂Γ/∂S
    pub speed: T,
    /// ∂Γ/∂σ per vol point
    pub zomma: T,
    /// ∂³V/∂σ³ per vol point cubed
    pub ultima: T,
}

impl<T: Float> Greeks<T> {
    /// All-zero Greek set.
    pub fn zero() -> Self {
        let z = T::zero();
        Self {
            delta: z,
            gamma: z,
            vega: z,
            theta: z,
            rho: z,
            vanna: z,
            volga: z,
            charm: z,
            color: z,
            speed: z,
            zomma: z,
            ultima: z,
        }
    }

    /// Multiplies every Greek by `factor` (position sizing).
    pub fn scale(&self, factor: T) -> Self {
        Self {
            delta: self.delta * factor,
            gamma: self.gamma * factor,
            vega: self.vega * factor,
            theta: self.theta * factor,
            rho: self.rho * factor,
            vanna: self.vanna * factor,
            volga: self.volga * factor,
            charm: self.charm * factor,
            color: self.color * factor,
            speed: self.speed * factor,
            zomma: self.zomma * factor,
            ultima: self.ultima * factor,
        }
    }

    /// Element-wise sum (strategy aggregation).
    pub fn add(&self, other: &Self) -> Self {
        Self {
            delta: self.delta + other.delta,
            gamma: self.gamma + other.gamma,
            vega: self.vega + other.vega,
            theta: self.theta + other.theta,
            rho: self.rho + other.rho,
            vanna: self.vanna + other.vanna,
            volga: self.volga + other.volga,
            charm: self.charm + other.charm,
            color: self.color + other.color,
            speed: self.speed + other.speed,
            zomma: self.zomma + other.zomma,
            ultima: self.ultima + other.ultima,
        }
    }
}

/// Black-Scholes-Merton model for European options.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
/// use pricer_models::instruments::OptionType;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).unwrap();
/// let call = bs.price(100.0, 1.0, OptionType::Call);
/// let put = bs.price(100.0, 1.0, OptionType::Put);
///
/// assert!((call - 10.4506).abs() < 1e-3);
/// // Put-call parity: C - P = S - K·e^(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes<T: Float> {
    spot: T,
    rate: T,
    dividend_yield: T,
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility < 0 or not finite
    pub fn new(spot: T, rate: T, dividend_yield: T, volatility: T) -> Result<Self, AnalyticalError> {
        if !(spot > T::zero() && spot.is_finite()) {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !(volatility >= T::zero() && volatility.is_finite()) {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self {
            spot,
            rate,
            dividend_yield,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the continuous dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> T {
        self.dividend_yield
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    #[inline]
    fn is_degenerate(&self, expiry: T) -> bool {
        let eps = T::from(DEGENERATE_EPS).unwrap();
        expiry <= eps || self.volatility <= eps
    }

    /// Computes d₁ and d₂. Only meaningful when σ > 0 and T > 0.
    #[inline]
    pub fn d1_d2(&self, strike: T, expiry: T) -> (T, T) {
        let half = T::from(0.5).unwrap();
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let drift =
            (self.rate - self.dividend_yield + half * self.volatility * self.volatility) * expiry;
        let d1 = ((self.spot / strike).ln() + drift) / vol_sqrt_t;
        (d1, d1 - vol_sqrt_t)
    }

    /// Price in the σ = 0 or T = 0 limit.
    fn degenerate_price(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        let eps = T::from(DEGENERATE_EPS).unwrap();
        let (s, k) = if expiry <= eps {
            (self.spot, strike)
        } else {
            (
                self.spot * (-self.dividend_yield * expiry).exp(),
                strike * (-self.rate * expiry).exp(),
            )
        };
        let value = if option_type.is_call() { s - k } else { k - s };
        value.max(T::zero())
    }

    /// Delta in the σ = 0 or T = 0 limit.
    fn degenerate_delta(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        let eps = T::from(DEGENERATE_EPS).unwrap();
        let carry = (-self.dividend_yield * expiry).exp();
        let (s, k) = if expiry <= eps {
            (self.spot, strike)
        } else {
            (self.spot * carry, strike * (-self.rate * expiry).exp())
        };
        match option_type {
            OptionType::Call if s > k => carry,
            OptionType::Put if s < k => -carry,
            _ => T::zero(),
        }
    }

    /// European option price.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::OptionType;
    ///
    /// // σ = 0 collapses to the discounted forward intrinsic value
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.0).unwrap();
    /// let expected = 100.0 - 90.0 * (-0.05_f64).exp();
    /// assert!((bs.price(90.0, 1.0, OptionType::Call) - expected).abs() < 1e-12);
    /// ```
    pub fn price(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        if self.is_degenerate(expiry) {
            return self.degenerate_price(strike, expiry, option_type);
        }

        let (d1, d2) = self.d1_d2(strike, expiry);
        let spot_carry = self.spot * (-self.dividend_yield * expiry).exp();
        let strike_disc = strike * (-self.rate * expiry).exp();

        match option_type {
            OptionType::Call => spot_carry * norm_cdf(d1) - strike_disc * norm_cdf(d2),
            OptionType::Put => strike_disc * norm_cdf(-d2) - spot_carry * norm_cdf(-d1),
        }
    }

    /// European call price.
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        self.price(strike, expiry, OptionType::Call)
    }

    /// European put price.
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        self.price(strike, expiry, OptionType::Put)
    }

    /// Delta: e^(−qT)·N(d₁) for calls, e^(−qT)·(N(d₁) − 1) for puts.
    pub fn delta(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        if self.is_degenerate(expiry) {
            return self.degenerate_delta(strike, expiry, option_type);
        }
        let (d1, _) = self.d1_d2(strike, expiry);
        let carry = (-self.dividend_yield * expiry).exp();
        match option_type {
            OptionType::Call => carry * norm_cdf(d1),
            OptionType::Put => carry * (norm_cdf(d1) - T::one()),
        }
    }

    /// Gamma: e^(−qT)·φ(d₁) / (S·σ·√T), identical for calls and puts.
    pub fn gamma(&self, strike: T, expiry: T) -> T {
        if self.is_degenerate(expiry) {
            return T::zero();
        }
        let (d1, _) = self.d1_d2(strike, expiry);
        let carry = (-self.dividend_yield * expiry).exp();
        carry * norm_pdf(d1) / (self.spot * self.volatility * expiry.sqrt())
    }

    /// Vega per vol point: S·e^(−qT)·φ(d₁)·√T / 100.
    pub fn vega(&self, strike: T, expiry: T) -> T {
        if self.is_degenerate(expiry) {
            return T::zero();
        }
        let (d1, _) = self.d1_d2(strike, expiry);
        self.raw_vega(d1, expiry) / T::from(100.0).unwrap()
    }

    /// Theta per calendar day.
    pub fn theta(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        self.greeks(strike, expiry, option_type).theta
    }

    /// Rho per rate point: ±K·T·e^(−rT)·N(±d₂) / 100.
    pub fn rho(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        self.greeks(strike, expiry, option_type).rho
    }

    #[inline]
    fn raw_vega(&self, d1: T, expiry: T) -> T {
        self.spot * (-self.dividend_yield * expiry).exp() * norm_pdf(d1) * expiry.sqrt()
    }

    /// Computes every Greek from one evaluation of d₁ and d₂.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::OptionType;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).unwrap();
    /// let g = bs.greeks(100.0, 1.0, OptionType::Call);
    /// assert!((g.delta - 0.6368).abs() < 1e-4);
    /// assert!(g.theta < 0.0);
    /// ```
    pub fn greeks(&self, strike: T, expiry: T, option_type: OptionType) -> Greeks<T> {
        if self.is_degenerate(expiry) {
            return Greeks {
                delta: self.degenerate_delta(strike, expiry, option_type),
                ..Greeks::zero()
            };
        }

        let one = T::one();
        let two = T::from(2.0).unwrap();
        let hundred = T::from(100.0).unwrap();
        let days = T::from(365.0).unwrap();

        let (s, k, t, r, q, v) = (
            self.spot,
            strike,
            expiry,
            self.rate,
            self.dividend_yield,
            self.volatility,
        );
        let (d1, d2) = self.d1_d2(k, t);
        let sqrt_t = t.sqrt();
        let vol_sqrt_t = v * sqrt_t;
        let carry = (-q * t).exp();
        let disc = (-r * t).exp();
        let pdf_d1 = norm_pdf(d1);
        let is_call = option_type.is_call();

        let (n_d1, n_d2) = if is_call {
            (norm_cdf(d1), norm_cdf(d2))
        } else {
            (norm_cdf(-d1), norm_cdf(-d2))
        };
        let sign = if is_call { one } else { -one };

        let delta = sign * carry * n_d1;
        let gamma = carry * pdf_d1 / (s * vol_sqrt_t);
        let vega = self.raw_vega(d1, t);

        // −∂V/∂T
        let theta = -s * carry * pdf_d1 * v / (two * sqrt_t) - sign * r * k * disc * n_d2
            + sign * q * s * carry * n_d1;
        let rho = sign * k * t * disc * n_d2;

        let vanna = -carry * pdf_d1 * d2 / v;
        let volga = vega * d1 * d2 / v;

        // Shared by charm and color: (2(r−q)T − d₂σ√T) / (2Tσ√T)
        let carry_term = (two * (r - q) * t - d2 * vol_sqrt_t) / (two * t * vol_sqrt_t);
        let charm = sign * q * carry * n_d1 - carry * pdf_d1 * carry_term;
        let color = carry * pdf_d1 / (two * s * t * vol_sqrt_t)
            * (two * q * t + one + two * t * carry_term * d1);

        let speed = -gamma / s * (d1 / vol_sqrt_t + one);
        let zomma = gamma * (d1 * d2 - one) / v;
        let d1d2 = d1 * d2;
        let ultima = -vega / (v * v) * (d1d2 * (one - d1d2) + d1 * d1 + d2 * d2);

        Greeks {
            delta,
            gamma,
            vega: vega / hundred,
            theta: theta / days,
            rho: rho / hundred,
            vanna: vanna / hundred,
            volga: volga / (hundred * hundred),
            charm: charm / days,
            color: color / days,
            speed,
            zomma: zomma / hundred,
            ultima: ultima / (hundred * hundred * hundred),
        }
    }
}

impl BlackScholes<f64> {
    /// Builds the model from a contract's market inputs.
    pub fn from_contract(contract: &OptionContract) -> Result<Self, AnalyticalError> {
        contract.validate()?;
        Self::new(
            contract.spot,
            contract.rate,
            contract.dividend_yield,
            contract.volatility,
        )
    }

    /// European price of `contract`, ignoring its exercise style.
    pub fn price_contract(contract: &OptionContract) -> Result<f64, AnalyticalError> {
        let bs = Self::from_contract(contract)?;
        Ok(bs.price(contract.strike, contract.expiry, contract.option_type))
    }

    /// European Greeks of `contract`, ignoring its exercise style.
    pub fn greeks_contract(contract: &OptionContract) -> Result<Greeks<f64>, AnalyticalError> {
        let bs = Self::from_contract(contract)?;
        Ok(bs.greeks(contract.strike, contract.expiry, contract.option_type))
    }
}
