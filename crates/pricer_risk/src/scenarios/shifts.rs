//! Shock ladder definitions.

use crate::error::RiskError;

/// Shape of the spot, volatility and theta ladders.
///
/// # Examples
/// ```
/// use pricer_risk::scenarios::ScenarioSpec;
///
/// let spec = ScenarioSpec::default();
/// assert_eq!(spec.spot_shocks(), vec![-0.2, -0.15, -0.1, -0.05, 0.0, 0.05, 0.1, 0.15, 0.2]);
/// assert_eq!(spec.volatility_shocks().len(), 11);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScenarioSpec {
    /// Largest relative spot move, in (0, 1)
    pub spot_range: f64,
    /// Points on the spot ladder
    pub spot_steps: usize,
    /// Largest relative volatility move, in (0, 1)
    pub volatility_range: f64,
    /// Points on the volatility ladder
    pub volatility_steps: usize,
    /// Points on the theta curve, expiry included
    pub theta_points: usize,
}

impl Default for ScenarioSpec {
    fn default() -> Self {
        Self {
            spot_range: 0.20,
            spot_steps: 9,
            volatility_range: 0.50,
            volatility_steps: 11,
            theta_points: 31,
        }
    }
}

impl ScenarioSpec {
    /// Validates ranges and step counts.
    pub fn validate(&self) -> Result<(), RiskError> {
        for (name, range) in [
            ("spot_range", self.spot_range),
            ("volatility_range", self.volatility_range),
        ] {
            if !(range > 0.0 && range < 1.0) {
                return Err(RiskError::config(name, format!("must lie in (0, 1), got {}", range)));
            }
        }
        for (name, steps) in [
            ("spot_steps", self.spot_steps),
            ("volatility_steps", self.volatility_steps),
            ("theta_points", self.theta_points),
        ] {
            if steps == 0 {
                return Err(RiskError::config(name, "must be positive"));
            }
        }
        Ok(())
    }

    /// Relative spot shocks.
    pub fn spot_shocks(&self) -> Vec<f64> {
        shock_ladder(self.spot_range, self.spot_steps)
    }

    /// Relative volatility shocks.
    pub fn volatility_shocks(&self) -> Vec<f64> {
        shock_ladder(self.volatility_range, self.volatility_steps)
    }
}

/// `steps` evenly spaced shocks from `-range` to `+range`.
///
/// One step gives the unshocked point only. Odd step counts contain zero
/// exactly; values are rounded to 12 decimals so ladders print cleanly.
pub fn shock_ladder(range: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let width = 2.0 * range / (steps - 1) as f64;
            (0..steps)
                .map(|i| {
                    let shock = -range + width * i as f64;
                    (shock * 1e12).round() / 1e12
                })
                .collect()
        }
    }
}
