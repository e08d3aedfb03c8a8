//! Time value of money.
//!
//! The five variables are tied by a single equation per period rate `r`:
//!
//! ```text
//! FV = PV·(1+r)^n + PMT·k·((1+r)^n - 1)/r        k = 1 + r for annuities due, else 1
//! ```
//!
//! with the annuity factor falling back to `n` at r = 0. Money paid out is
//! negative: a loan received today (PV > 0) is retired by negative payments.

use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
use pricer_core::math::special::checked_ln;

use super::error::FixedIncomeError;

/// Central-difference step for the rate search.
const RATE_DERIVATIVE_STEP: f64 = 1e-8;

/// Starting rate for the rate search.
const RATE_GUESS: f64 = 0.1;

/// Where the Newton iterate is pushed back to after crossing zero.
const RATE_FLOOR_RESTART: f64 = 1e-6;

/// Payment timing within each period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaymentTiming {
    /// Ordinary annuity.
    #[default]
    End,
    /// Annuity due.
    Beginning,
}

impl PaymentTiming {
    #[inline]
    fn factor(self, rate: f64) -> f64 {
        match self {
            PaymentTiming::End => 1.0,
            PaymentTiming::Beginning => 1.0 + rate,
        }
    }
}

/// The variable a [`TvmProblem`] solves for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TvmVariable {
    /// Present value
    PresentValue,
    /// Future value
    FutureValue,
    /// Payment per period
    Payment,
    /// Rate per period
    Rate,
    /// Number of periods
    Periods,
}

/// Solved unknown.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TvmSolution {
    /// Which variable was solved
    pub variable: TvmVariable,
    /// Its value
    pub value: f64,
}

/// Four known TVM variables and one unknown (`None`).
///
/// # Examples
/// ```
/// use pricer_models::fixed_income::{TvmProblem, TvmVariable};
///
/// let fv = TvmProblem::new()
///     .present_value(1000.0)
///     .payment(0.0)
///     .rate(0.05)
///     .periods(10.0)
///     .solve()
///     .unwrap();
/// assert_eq!(fv.variable, TvmVariable::FutureValue);
/// assert!((fv.value - 1628.89).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TvmProblem {
    /// Present value
    pub present_value: Option<f64>,
    /// Future value
    pub future_value: Option<f64>,
    /// Payment per period
    pub payment: Option<f64>,
    /// Rate per period (> -1)
    pub rate: Option<f64>,
    /// Number of periods (> 0)
    pub periods: Option<f64>,
    /// Payment timing
    pub timing: PaymentTiming,
}

impl TvmProblem {
    /// Empty problem; set four variables before solving.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the present value.
    pub fn present_value(mut self, value: f64) -> Self {
        self.present_value = Some(value);
        self
    }

    /// Sets the future value.
    pub fn future_value(mut self, value: f64) -> Self {
        self.future_value = Some(value);
        self
    }

    /// Sets the payment per period.
    pub fn payment(mut self, value: f64) -> Self {
        self.payment = Some(value);
        self
    }

    /// Sets the rate per period.
    pub fn rate(mut self, value: f64) -> Self {
        self.rate = Some(value);
        self
    }

    /// Sets the number of periods.
    pub fn periods(mut self, value: f64) -> Self {
        self.periods = Some(value);
        self
    }

    /// Sets the payment timing.
    pub fn timing(mut self, timing: PaymentTiming) -> Self {
        self.timing = timing;
        self
    }

    /// The single unset variable.
    ///
    /// # Errors
    /// `FixedIncomeError::Underdetermined` unless exactly one is unset.
    pub fn unknown(&self) -> Result<TvmVariable, FixedIncomeError> {
        let slots = [
            (self.present_value, TvmVariable::PresentValue),
            (self.future_value, TvmVariable::FutureValue),
            (self.payment, TvmVariable::Payment),
            (self.rate, TvmVariable::Rate),
            (self.periods, TvmVariable::Periods),
        ];
        let missing: Vec<TvmVariable> = slots
            .iter()
            .filter(|(value, _)| value.is_none())
            .map(|(_, variable)| *variable)
            .collect();
        match missing.as_slice() {
            [variable] => Ok(*variable),
            _ => Err(FixedIncomeError::Underdetermined {
                unknowns: missing.len(),
            }),
        }
    }

    /// Solves for the unknown variable.
    ///
    /// PV, FV and PMT come from the explicit formula, periods from its
    /// logarithm, and the rate from Newton-Raphson with a numerical
    /// derivative.
    ///
    /// # Errors
    /// - `FixedIncomeError::Underdetermined` if not exactly one unknown
    /// - `FixedIncomeError::InvalidInput` for non-finite values, rate ≤ -1,
    ///   periods ≤ 0, or an unsolvable combination (zero payment with zero
    ///   rate when solving periods)
    /// - `FixedIncomeError::Domain` if the periods logarithm has no solution
    /// - `FixedIncomeError::Convergence` if the rate search fails
    pub fn solve(&self) -> Result<TvmSolution, FixedIncomeError> {
        let variable = self.unknown()?;
        self.validate_known()?;

        let pv = self.present_value.unwrap_or_default();
        let fv = self.future_value.unwrap_or_default();
        let pmt = self.payment.unwrap_or_default();
        let rate = self.rate.unwrap_or_default();
        let n = self.periods.unwrap_or_default();
        let timing = self.timing;

        let value = match variable {
            TvmVariable::FutureValue => future_value(pv, pmt, rate, n, timing),
            TvmVariable::PresentValue => present_value(fv, pmt, rate, n, timing),
            TvmVariable::Payment => payment(pv, fv, rate, n, timing)?,
            TvmVariable::Periods => solve_periods(pv, fv, pmt, rate, timing)?,
            TvmVariable::Rate => solve_rate(pv, fv, pmt, n, timing)?,
        };
        Ok(TvmSolution { variable, value })
    }

    fn validate_known(&self) -> Result<(), FixedIncomeError> {
        let known = [
            ("present value", self.present_value),
            ("future value", self.future_value),
            ("payment", self.payment),
            ("rate", self.rate),
            ("periods", self.periods),
        ];
        for (name, value) in known {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(FixedIncomeError::InvalidInput(format!("{} must be finite, got {}", name, v)));
                }
            }
        }
        if let Some(r) = self.rate {
            if r <= -1.0 {
                return Err(FixedIncomeError::InvalidInput(format!("rate must exceed -1, got {}", r)));
            }
        }
        if let Some(n) = self.periods {
            if n <= 0.0 {
                return Err(FixedIncomeError::InvalidInput(format!("periods must be positive, got {}", n)));
            }
        }
        Ok(())
    }
}

/// Growth factor `(1+r)^n`.
#[inline]
fn growth(rate: f64, n: f64) -> f64 {
    (1.0 + rate).powf(n)
}

/// Annuity accumulation factor `k·((1+r)^n - 1)/r`, `n` at r = 0.
fn annuity_factor(rate: f64, n: f64, timing: PaymentTiming) -> f64 {
    if rate.abs() < 1e-12 {
        n
    } else {
        timing.factor(rate) * (growth(rate, n) - 1.0) / rate
    }
}

/// Future value of a lump sum plus an annuity.
pub fn future_value(pv: f64, pmt: f64, rate: f64, n: f64, timing: PaymentTiming) -> f64 {
    pv * growth(rate, n) + pmt * annuity_factor(rate, n, timing)
}

/// Present value that accumulates, with the payments, to `fv`.
pub fn present_value(fv: f64, pmt: f64, rate: f64, n: f64, timing: PaymentTiming) -> f64 {
    (fv - pmt * annuity_factor(rate, n, timing)) / growth(rate, n)
}

/// Payment that carries `pv` to `fv`.
///
/// # Examples
/// ```
/// use pricer_models::fixed_income::{payment, PaymentTiming};
///
/// // 1000 borrowed at 5% for 10 periods, repaid in full
/// let pmt = payment(1000.0, 0.0, 0.05, 10.0, PaymentTiming::End).unwrap();
/// assert!((pmt + 129.5046).abs() < 1e-4);
/// ```
pub fn payment(pv: f64, fv: f64, rate: f64, n: f64, timing: PaymentTiming) -> Result<f64, FixedIncomeError> {
    let factor = annuity_factor(rate, n, timing);
    if factor == 0.0 {
        return Err(FixedIncomeError::InvalidInput("annuity factor is zero".to_string()));
    }
    Ok((fv - pv * growth(rate, n)) / factor)
}

fn solve_periods(pv: f64, fv: f64, pmt: f64, rate: f64, timing: PaymentTiming) -> Result<f64, FixedIncomeError> {
    if rate.abs() < 1e-12 {
        if pmt == 0.0 {
            return Err(FixedIncomeError::InvalidInput(
                "periods are undetermined with zero rate and zero payment".to_string(),
            ));
        }
        return Ok((fv - pv) / pmt);
    }
    // (1+r)^n = (FV + PMT·k/r) / (PV + PMT·k/r)
    let annuity = pmt * timing.factor(rate) / rate;
    let denominator = pv + annuity;
    if denominator == 0.0 {
        return Err(FixedIncomeError::InvalidInput(
            "present value exactly offsets the payment stream".to_string(),
        ));
    }
    let ratio = (fv + annuity) / denominator;
    let n = checked_ln(ratio)? / (1.0 + rate).ln();
    if !(n.is_finite() && n > 0.0) {
        return Err(FixedIncomeError::InvalidInput(format!(
            "no positive period count reaches the future value (n = {})",
            n
        )));
    }
    Ok(n)
}

fn solve_rate(pv: f64, fv: f64, pmt: f64, n: f64, timing: PaymentTiming) -> Result<f64, FixedIncomeError> {
    // Residual in units of the largest cash amount
    let scale = pv.abs().max(fv.abs()).max(pmt.abs() * n).max(1.0);
    let residual = |r: f64| (future_value(pv, pmt, r, n, timing) - fv) / scale;
    let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-10, 100)).with_lower_bound(0.0, RATE_FLOOR_RESTART);
    Ok(solver.find_root_numerical(residual, RATE_GUESS, RATE_DERIVATIVE_STEP)?)
}

/// Effective annual rate of a nominal rate compounded `periods_per_year` times.
///
/// # Examples
/// ```
/// use pricer_models::fixed_income::effective_annual_rate;
///
/// let ear = effective_annual_rate(0.12, 12).unwrap();
/// assert!((ear - 0.126825).abs() < 1e-6);
/// ```
pub fn effective_annual_rate(nominal: f64, periods_per_year: u32) -> Result<f64, FixedIncomeError> {
    if periods_per_year == 0 {
        return Err(FixedIncomeError::InvalidInput("compounding frequency must be positive".to_string()));
    }
    let m = f64::from(periods_per_year);
    if !(nominal.is_finite() && nominal / m > -1.0) {
        return Err(FixedIncomeError::InvalidInput(format!("invalid nominal rate {}", nominal)));
    }
    Ok((1.0 + nominal / m).powf(m) - 1.0)
}
