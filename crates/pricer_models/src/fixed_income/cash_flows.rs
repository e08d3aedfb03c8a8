//! Cash-flow series: NPV, IRR and derived measures.

use pricer_core::math::solvers::{BisectionSolver, SolverConfig};

use super::error::FixedIncomeError;

/// IRR search interval.
pub const IRR_BRACKET: (f64, f64) = (-0.99, 10.0);

/// A single flow at `time` periods from today.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CashFlow {
    /// Time in periods (≥ 0)
    pub time: f64,
    /// Signed amount: outflows negative
    pub amount: f64,
}

/// Ordered cash flows; the first is usually the initial outlay at t = 0.
///
/// # Examples
/// ```
/// use pricer_models::fixed_income::CashFlowSeries;
///
/// let project = CashFlowSeries::new(vec![-1000.0, 200.0, 300.0, 400.0, 500.0, 600.0]).unwrap();
/// let irr = project.irr().unwrap();
/// assert!(project.npv(irr).unwrap().abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CashFlowSeries {
    flows: Vec<CashFlow>,
}

impl CashFlowSeries {
    /// Indexed flows: `amounts[t]` occurs at period t.
    pub fn new(amounts: Vec<f64>) -> Result<Self, FixedIncomeError> {
        let flows = amounts
            .into_iter()
            .enumerate()
            .map(|(t, amount)| CashFlow {
                time: t as f64,
                amount,
            })
            .collect();
        Self::dated(flows)
    }

    /// Flows at arbitrary non-negative, non-decreasing times.
    pub fn dated(flows: Vec<CashFlow>) -> Result<Self, FixedIncomeError> {
        if flows.is_empty() {
            return Err(FixedIncomeError::InvalidInput("cash-flow series is empty".to_string()));
        }
        let mut previous = 0.0;
        for flow in &flows {
            if !(flow.amount.is_finite() && flow.time.is_finite() && flow.time >= previous) {
                return Err(FixedIncomeError::InvalidInput(format!(
                    "cash flow {} at t = {} is not finite or out of order",
                    flow.amount, flow.time
                )));
            }
            previous = flow.time;
        }
        Ok(Self { flows })
    }

    /// The flows in time order.
    pub fn flows(&self) -> &[CashFlow] {
        &self.flows
    }

    /// Σ CF_t / (1 + r)^t.
    ///
    /// # Errors
    /// `FixedIncomeError::InvalidInput` if `rate ≤ -1`.
    pub fn npv(&self, rate: f64) -> Result<f64, FixedIncomeError> {
        check_rate(rate)?;
        Ok(self.npv_unchecked(rate))
    }

    fn npv_unchecked(&self, rate: f64) -> f64 {
        self.flows
            .iter()
            .map(|cf| cf.amount / (1.0 + rate).powf(cf.time))
            .sum()
    }

    /// Rate with NPV = 0, by bisection over [`IRR_BRACKET`].
    ///
    /// # Errors
    /// `FixedIncomeError::Convergence` if the NPV has no sign change in the
    /// bracket (all flows of one sign, for instance).
    pub fn irr(&self) -> Result<f64, FixedIncomeError> {
        let solver = BisectionSolver::new(SolverConfig::new(1e-10, 200));
        Ok(solver.find_root(|r| self.npv_unchecked(r), IRR_BRACKET.0, IRR_BRACKET.1)?)
    }

    /// PV of flows after t = 0 divided by the magnitude of the t = 0 outlay.
    ///
    /// Returns `None` without a negative flow at t = 0.
    pub fn profitability_index(&self, rate: f64) -> Result<Option<f64>, FixedIncomeError> {
        check_rate(rate)?;
        let (initial, rest): (Vec<&CashFlow>, Vec<&CashFlow>) =
            self.flows.iter().partition(|cf| cf.time == 0.0);
        let outlay: f64 = initial.iter().map(|cf| cf.amount).sum();
        if outlay >= 0.0 {
            return Ok(None);
        }
        let pv: f64 = rest
            .iter()
            .map(|cf| cf.amount / (1.0 + rate).powf(cf.time))
            .sum();
        Ok(Some(pv / -outlay))
    }

    /// Time at which the cumulative discounted flows turn non-negative,
    /// interpolated linearly within the crossing interval.
    ///
    /// Returns `None` if they never do.
    pub fn discounted_payback_period(&self, rate: f64) -> Result<Option<f64>, FixedIncomeError> {
        check_rate(rate)?;
        let mut cumulative = 0.0;
        let mut previous_time = 0.0;
        for cf in &self.flows {
            let discounted = cf.amount / (1.0 + rate).powf(cf.time);
            let next = cumulative + discounted;
            if cumulative < 0.0 && next >= 0.0 {
                let fraction = -cumulative / discounted;
                return Ok(Some(previous_time + fraction * (cf.time - previous_time)));
            }
            cumulative = next;
            previous_time = cf.time;
        }
        Ok(None)
    }
}

fn check_rate(rate: f64) -> Result<(), FixedIncomeError> {
    if rate.is_finite() && rate > -1.0 {
        Ok(())
    } else {
        Err(FixedIncomeError::InvalidInput(format!("discount rate must exceed -1, got {}", rate)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn project() -> CashFlowSeries {
        CashFlowSeries::new(vec![-1000.0, 200.0, 300.0, 400.0, 500.0, 600.0]).unwrap()
    }

    #[test]
    fn test_npv() {
        assert_relative_eq!(project().npv(0.1).unwrap(), 444.337_508, epsilon = 1e-6);
        assert_relative_eq!(project().npv(0.0).unwrap(), 1000.0, epsilon = 1e-12);
        assert!(project().npv(-1.0).is_err());
    }

    #[test]
    fn test_irr() {
        let irr = project().irr().unwrap();
        assert_relative_eq!(irr, 0.232_919_407, epsilon = 1e-8);
        assert!(project().npv(irr).unwrap().abs() < 1e-6);
    }

    #[test]
    fn test_irr_without_sign_change() {
        let gifts = CashFlowSeries::new(vec![100.0, 100.0]).unwrap();
        assert!(matches!(gifts.irr(), Err(FixedIncomeError::Convergence(_))));
    }

    #[test]
    fn test_profitability_index() {
        assert_relative_eq!(project().profitability_index(0.1).unwrap().unwrap(), 1.444_337_508, epsilon = 1e-8);
        let no_outlay = CashFlowSeries::new(vec![0.0, 10.0]).unwrap();
        assert_eq!(no_outlay.profitability_index(0.1).unwrap(), None);
    }

    #[test]
    fn test_discounted_payback() {
        assert_relative_eq!(project().discounted_payback_period(0.1).unwrap().unwrap(), 3.7898, epsilon = 1e-9);
        let never = CashFlowSeries::new(vec![-1000.0, 100.0, 100.0]).unwrap();
        assert_eq!(never.discounted_payback_period(0.05).unwrap(), None);
    }

    #[test]
    fn test_dated_flows() {
        let dated = CashFlowSeries::dated(vec![
            CashFlow { time: 0.0, amount: -100.0 },
            CashFlow { time: 0.5, amount: 105.0 },
        ])
        .unwrap();
        // (1 + r)^0.5 = 1.05
        assert_relative_eq!(dated.irr().unwrap(), 0.1025, epsilon = 1e-8);
    }

    #[test]
    fn test_validation() {
        assert!(CashFlowSeries::new(vec![]).is_err());
        assert!(CashFlowSeries::new(vec![-1.0, f64::NAN]).is_err());
        assert!(CashFlowSeries::dated(vec![
            CashFlow { time: 1.0, amount: -1.0 },
            CashFlow { time: 0.5, amount: 2.0 },
        ])
        .is_err());
    }
}
