//! Fixed-coupon bond analytics.
//!
//! All quantities are computed per coupon period with the periodic rate
//! `i = market_rate / m` and the periodic coupon `C = F·c / m`, then
//! annualised where a time unit appears (durations in years).

use pricer_core::math::solvers::{BisectionSolver, SolverConfig};

use super::error::FixedIncomeError;

/// Admissible coupon frequencies.
pub const PAYMENT_FREQUENCIES: [u32; 4] = [1, 2, 4, 12];

/// Yield bracket searched by [`BondSpec::yield_to_maturity`]: (0.001%, 100%).
pub const YTM_BRACKET: (f64, f64) = (0.00001, 1.0);

/// Relative distance from face value treated as trading at par.
const PAR_TOLERANCE: f64 = 1e-6;

/// Price relative to face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PriceClassification {
    /// Below face value (market rate above coupon).
    Discount,
    /// At face value.
    Par,
    /// Above face value (market rate below coupon).
    Premium,
}

/// Terms of a bullet bond and the market rate it is valued at.
///
/// # Examples
/// ```
/// use pricer_models::fixed_income::BondSpec;
///
/// let bond = BondSpec::new(1000.0, 0.05, 0.06, 5.0, 1).unwrap();
/// assert!((bond.price() - 957.88).abs() < 0.01);
///
/// let ytm = bond.yield_to_maturity(bond.price()).unwrap();
/// assert!((ytm - 0.06).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BondSpec {
    /// Face (redemption) value, > 0
    pub face_value: f64,
    /// Annual coupon rate, ≥ 0 (zero for zero-coupon bonds)
    pub coupon_rate: f64,
    /// Annual market rate (yield), > 0
    pub market_rate: f64,
    /// Years to maturity, > 0
    pub years_to_maturity: f64,
    /// Coupons per year, one of 1, 2, 4, 12
    pub payments_per_year: u32,
}

impl BondSpec {
    /// Creates a validated bond.
    pub fn new(
        face_value: f64,
        coupon_rate: f64,
        market_rate: f64,
        years_to_maturity: f64,
        payments_per_year: u32,
    ) -> Result<Self, FixedIncomeError> {
        let bond = Self {
            face_value,
            coupon_rate,
            market_rate,
            years_to_maturity,
            payments_per_year,
        };
        bond.validate()?;
        Ok(bond)
    }

    /// Checks every term.
    pub fn validate(&self) -> Result<(), FixedIncomeError> {
        if !(self.face_value.is_finite() && self.face_value > 0.0) {
            return Err(FixedIncomeError::InvalidInput(format!(
                "face value must be positive, got {}",
                self.face_value
            )));
        }
        if !(self.coupon_rate.is_finite() && self.coupon_rate >= 0.0) {
            return Err(FixedIncomeError::InvalidInput(format!(
                "coupon rate must be non-negative, got {}",
                self.coupon_rate
            )));
        }
        if !(self.market_rate.is_finite() && self.market_rate > 0.0) {
            return Err(FixedIncomeError::InvalidInput(format!(
                "market rate must be positive, got {}",
                self.market_rate
            )));
        }
        if !(self.years_to_maturity.is_finite() && self.years_to_maturity > 0.0) {
            return Err(FixedIncomeError::InvalidInput(format!(
                "years to maturity must be positive, got {}",
                self.years_to_maturity
            )));
        }
        if !PAYMENT_FREQUENCIES.contains(&self.payments_per_year) {
            return Err(FixedIncomeError::InvalidFrequency(self.payments_per_year));
        }
        if self.periods() == 0 {
            return Err(FixedIncomeError::InvalidInput(format!(
                "maturity {} is shorter than one coupon period",
                self.years_to_maturity
            )));
        }
        Ok(())
    }

    /// Copy valued at a different market rate.
    pub fn with_market_rate(&self, market_rate: f64) -> Result<Self, FixedIncomeError> {
        let mut bond = *self;
        bond.market_rate = market_rate;
        bond.validate()?;
        Ok(bond)
    }

    /// Number of coupon periods, `round(years · m)`.
    #[inline]
    pub fn periods(&self) -> u32 {
        (self.years_to_maturity * f64::from(self.payments_per_year)).round() as u32
    }

    /// Coupon paid each period.
    #[inline]
    pub fn periodic_coupon(&self) -> f64 {
        self.face_value * self.coupon_rate / f64::from(self.payments_per_year)
    }

    /// (period index, amount) pairs; the last carries the redemption.
    pub fn cash_flows(&self) -> Vec<(u32, f64)> {
        let n = self.periods();
        let coupon = self.periodic_coupon();
        (1..=n)
            .map(|t| {
                let redemption = if t == n { self.face_value } else { 0.0 };
                (t, coupon + redemption)
            })
            .collect()
    }

    /// Price at the bond's market rate.
    #[inline]
    pub fn price(&self) -> f64 {
        self.price_at_yield(self.market_rate)
    }

    /// Price at an arbitrary annual yield: coupon annuity plus discounted face.
    pub fn price_at_yield(&self, annual_yield: f64) -> f64 {
        let i = annual_yield / f64::from(self.payments_per_year);
        let n = self.periods() as i32;
        let coupon = self.periodic_coupon();
        if i == 0.0 {
            return coupon * f64::from(n) + self.face_value;
        }
        let discount = (1.0 + i).powi(-n);
        coupon * (1.0 - discount) / i + self.face_value * discount
    }

    /// Full analytics record at the market rate.
    pub fn analytics(&self) -> BondAnalytics {
        let m = f64::from(self.payments_per_year);
        let i = self.market_rate / m;
        let price = self.price();

        let (weighted, convex) = self
            .cash_flows()
            .into_iter()
            .fold((0.0, 0.0), |(weighted, convex), (t, cf)| {
                let t = f64::from(t);
                let pv = cf * (1.0 + i).powf(-t);
                (weighted + t * pv, convex + t * (t + 1.0) * pv)
            });

        let macaulay_duration = weighted / price / m;
        let growth = 1.0 + i;

        BondAnalytics {
            price,
            macaulay_duration,
            modified_duration: macaulay_duration / growth,
            convexity: convex / (price * growth * growth * m * m),
            current_yield: self.face_value * self.coupon_rate / price,
            classification: classify(price, self.face_value),
        }
    }

    /// Annual yield that reprices the bond to `target_price`.
    ///
    /// Bisection over [`YTM_BRACKET`] with at most 100 iterations.
    ///
    /// # Errors
    /// - `FixedIncomeError::InvalidInput` for a non-positive target
    /// - `FixedIncomeError::Convergence` with `SolverError::NoBracket` when
    ///   the target lies outside the prices attainable in the bracket, e.g.
    ///   above the undiscounted sum of cash flows
    pub fn yield_to_maturity(&self, target_price: f64) -> Result<f64, FixedIncomeError> {
        if !(target_price.is_finite() && target_price > 0.0) {
            return Err(FixedIncomeError::InvalidInput(format!(
                "target price must be positive, got {}",
                target_price
            )));
        }
        let solver = BisectionSolver::new(SolverConfig::new(1e-10, 100));
        let ytm = solver.find_root(
            |y| self.price_at_yield(y) - target_price,
            YTM_BRACKET.0,
            YTM_BRACKET.1,
        )?;
        Ok(ytm)
    }
}

fn classify(price: f64, face_value: f64) -> PriceClassification {
    if (price - face_value).abs() < PAR_TOLERANCE * face_value {
        PriceClassification::Par
    } else if price < face_value {
        PriceClassification::Discount
    } else {
        PriceClassification::Premium
    }
}

/// Price, durations and convexity of a [`BondSpec`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BondAnalytics {
    /// Price at the market rate
    pub price: f64,
    /// PV-weighted average time to cash flow, in years
    pub macaulay_duration: f64,
    /// Macaulay duration / (1 + periodic rate)
    pub modified_duration: f64,
    /// Σ t(t+1)·PV(CF_t) / (P·(1+i)²·m²)
    pub convexity: f64,
    /// Annual coupon / price
    pub current_yield: f64,
    /// Discount / par / premium
    pub classification: PriceClassification,
}

impl BondAnalytics {
    /// Duration-convexity estimate of the price change for a yield move `dy`.
    ///
    /// ΔP ≈ P·(-D_mod·Δy + ½·C·Δy²)
    pub fn price_change_estimate(&self, dy: f64) -> f64 {
        self.price * (-self.modified_duration * dy + 0.5 * self.convexity * dy * dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::SolverError;

    fn five_year() -> BondSpec {
        BondSpec::new(1000.0, 0.05, 0.06, 5.0, 1).unwrap()
    }

    #[test]
    fn test_reference_price() {
        assert_relative_eq!(five_year().price(), 957.876_362_144, epsilon = 1e-8);
    }

    #[test]
    fn test_reference_analytics() {
        let a = five_year().analytics();
        assert_relative_eq!(a.macaulay_duration, 4.534_652_55, epsilon = 1e-7);
        assert_relative_eq!(a.modified_duration, 4.277_974_10, epsilon = 1e-7);
        assert_relative_eq!(a.convexity, 23.410_332_94, epsilon = 1e-6);
        assert_relative_eq!(a.current_yield, 0.052_198_803, epsilon = 1e-8);
        assert_eq!(a.classification, PriceClassification::Discount);
    }

    #[test]
    fn test_semiannual_price() {
        let bond = BondSpec::new(1000.0, 0.05, 0.06, 5.0, 2).unwrap();
        assert_eq!(bond.periods(), 10);
        assert_relative_eq!(bond.price(), 957.348_985_816, epsilon = 1e-8);
    }

    #[test]
    fn test_classification() {
        let premium = BondSpec::new(1000.0, 0.08, 0.06, 10.0, 2).unwrap();
        assert_eq!(premium.analytics().classification, PriceClassification::Premium);
        let par = BondSpec::new(1000.0, 0.06, 0.06, 10.0, 2).unwrap();
        assert_eq!(par.analytics().classification, PriceClassification::Par);
        assert_relative_eq!(par.price(), 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_coupon_duration_is_maturity() {
        let zero = BondSpec::new(100.0, 0.0, 0.04, 7.0, 1).unwrap();
        let a = zero.analytics();
        assert_relative_eq!(a.macaulay_duration, 7.0, epsilon = 1e-12);
        assert_eq!(a.current_yield, 0.0);
    }

    #[test]
    fn test_price_change_estimate_tracks_repricing() {
        let bond = five_year();
        let a = bond.analytics();
        let dy = 0.01;
        let actual = bond.price_at_yield(0.07) - a.price;
        let estimate = a.price_change_estimate(dy);
        assert!((actual - estimate).abs() < 0.05);
        assert!(estimate < 0.0);
    }

    #[test]
    fn test_ytm_round_trip() {
        let bond = BondSpec::new(1000.0, 0.07, 0.045, 12.0, 4).unwrap();
        let ytm = bond.yield_to_maturity(bond.price()).unwrap();
        assert_relative_eq!(ytm, 0.045, epsilon = 1e-8);
    }

    #[test]
    fn test_ytm_target_above_zero_yield_price_fails() {
        // Undiscounted cash flows sum to 1250; nothing in the bracket reaches 1300
        let result = five_year().yield_to_maturity(1300.0);
        assert!(matches!(
            result,
            Err(FixedIncomeError::Convergence(SolverError::NoBracket { .. }))
        ));
    }

    #[test]
    fn test_validation() {
        assert!(BondSpec::new(0.0, 0.05, 0.06, 5.0, 1).is_err());
        assert!(BondSpec::new(1000.0, 0.05, 0.0, 5.0, 1).is_err());
        assert!(BondSpec::new(1000.0, 0.05, 0.06, -1.0, 1).is_err());
        assert!(matches!(
            BondSpec::new(1000.0, 0.05, 0.06, 5.0, 3),
            Err(FixedIncomeError::InvalidFrequency(3))
        ));
        assert!(BondSpec::new(1000.0, 0.05, 0.06, 0.2, 1).is_err());
        assert!(five_year().with_market_rate(-0.01).is_err());
    }
}
