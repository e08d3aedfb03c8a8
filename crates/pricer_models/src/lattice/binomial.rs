//! Cox-Ross-Rubinstein binomial tree.
//!
//! u = e^(σ√Δt), d = 1/u, p = (e^((r−q)Δt) − d) / (u − d), Δt = T / steps
//!
//! Terminal payoffs over `steps + 1` nodes are rolled back with
//! `max(exercise value, discounted expectation)` wherever exercise is allowed.
//! European contracts never take the max, American contracts take it at every
//! node, and Bermudan contracts take it at the steps nearest their exercise
//! dates.

use crate::instruments::{ExerciseStyle, OptionContract};
use crate::models::ModelError;

/// Price and spot sensitivities read off the first tree levels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeResult {
    /// Root node value
    pub price: f64,
    /// Δ from the two nodes at step 1
    pub delta: f64,
    /// Γ from the three nodes at step 2
    pub gamma: f64,
}

/// CRR lattice pricer.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{ExerciseStyle, OptionContract, OptionType};
/// use pricer_models::lattice::BinomialTree;
///
/// let put = OptionContract::new(OptionType::Put, 100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let tree = BinomialTree::new(500).unwrap();
///
/// let european = tree.price(&put).unwrap();
/// let american = tree.price(&put.clone().with_exercise(ExerciseStyle::American)).unwrap();
/// assert!(american > european);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinomialTree {
    steps: usize,
}

impl Default for BinomialTree {
    fn default() -> Self {
        Self {
            steps: Self::DEFAULT_STEPS,
        }
    }
}

impl BinomialTree {
    /// Default step count.
    pub const DEFAULT_STEPS: usize = 500;

    /// Creates a tree with `steps` time steps.
    ///
    /// # Errors
    /// `ModelError::InvalidSteps` if `steps == 0`.
    pub fn new(steps: usize) -> Result<Self, ModelError> {
        if steps == 0 {
            return Err(ModelError::InvalidSteps { steps });
        }
        Ok(Self { steps })
    }

    /// Returns the number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Root value of the tree.
    pub fn price(&self, contract: &OptionContract) -> Result<f64, ModelError> {
        Ok(self.evaluate(contract)?.price)
    }

    /// Root value plus tree delta and gamma.
    ///
    /// # Errors
    /// - `ModelError::Instrument` if the contract fails validation
    /// - `ModelError::NonPositiveVolatility` if σ = 0 with T > 0
    /// - `ModelError::ArbitrageProbability` if Δt is too coarse for the
    ///   carry, pushing p outside [0, 1]
    pub fn evaluate(&self, contract: &OptionContract) -> Result<LatticeResult, ModelError> {
        contract.validate()?;
        let (s, k, t) = (contract.spot, contract.strike, contract.expiry);
        let option_type = contract.option_type;

        if t <= 0.0 {
            let delta = match option_type.intrinsic(s, k) > 0.0 {
                true => option_type.sign(),
                false => 0.0,
            };
            return Ok(LatticeResult {
                price: contract.intrinsic_value(),
                delta,
                gamma: 0.0,
            });
        }
        if contract.volatility <= 0.0 {
            return Err(ModelError::NonPositiveVolatility {
                volatility: contract.volatility,
            });
        }

        let n = self.steps;
        let dt = t / n as f64;
        let u = (contract.volatility * dt.sqrt()).exp();
        let d = 1.0 / u;
        let growth = ((contract.rate - contract.dividend_yield) * dt).exp();
        let disc = (-contract.rate * dt).exp();
        let p = (growth - d) / (u - d);
        if !(0.0..=1.0).contains(&p) {
            return Err(ModelError::ArbitrageProbability { probability: p });
        }
        let (disc_up, disc_down) = (disc * p, disc * (1.0 - p));

        let exercisable = self.exercise_schedule(&contract.exercise, dt);
        let node_spot = |step: usize, ups: usize| s * u.powi(2 * ups as i32 - step as i32);

        let mut values: Vec<f64> = (0..=n)
            .map(|j| option_type.intrinsic(node_spot(n, j), k))
            .collect();

        let mut level_two = [0.0; 3];
        let mut level_one = [0.0; 2];
        // The backward loop never visits the terminal layer
        match n {
            2 => level_two.copy_from_slice(&values[..3]),
            1 => level_one.copy_from_slice(&values[..2]),
            _ => {}
        }

        for step in (0..n).rev() {
            let exercise_here = exercisable[step];
            for j in 0..=step {
                let hold = disc_up * values[j + 1] + disc_down * values[j];
                values[j] = if exercise_here {
                    hold.max(option_type.intrinsic(node_spot(step, j), k))
                } else {
                    hold
                };
            }
            match step {
                2 => level_two.copy_from_slice(&values[..3]),
                1 => level_one.copy_from_slice(&values[..2]),
                _ => {}
            }
        }

        let delta = if n >= 1 {
            (level_one[1] - level_one[0]) / (s * u - s * d)
        } else {
            0.0
        };
        let gamma = if n >= 2 {
            let (s_uu, s_dd) = (s * u * u, s * d * d);
            let upper = (level_two[2] - level_two[1]) / (s_uu - s);
            let lower = (level_two[1] - level_two[0]) / (s - s_dd);
            (upper - lower) / (0.5 * (s_uu - s_dd))
        } else {
            0.0
        };

        Ok(LatticeResult {
            price: values[0],
            delta,
            gamma,
        })
    }

    /// Which of the steps `0..steps` allow early exercise.
    fn exercise_schedule(&self, exercise: &ExerciseStyle, dt: f64) -> Vec<bool> {
        match exercise {
            ExerciseStyle::European => vec![false; self.steps],
            ExerciseStyle::American => vec![true; self.steps],
            ExerciseStyle::Bermudan { exercise_dates } => {
                let mut schedule = vec![false; self.steps];
                for &date in exercise_dates {
                    let step = (date / dt).round() as usize;
                    if step < self.steps {
                        schedule[step] = true;
                    }
                }
                schedule
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::BlackScholes;
    use crate::instruments::OptionType;
    use approx::assert_relative_eq;

    fn contract(option_type: OptionType) -> OptionContract {
        OptionContract::new(option_type, 100.0, 100.0, 1.0, 0.05, 0.2).unwrap()
    }

    #[test]
    fn test_zero_steps_rejected() {
        assert!(matches!(
            BinomialTree::new(0),
            Err(ModelError::InvalidSteps { steps: 0 })
        ));
    }

    #[test]
    fn test_greeks_on_shallow_trees() {
        let c = contract(OptionType::Call);
        let dt: f64 = 1.0;
        let u = (0.2 * dt.sqrt()).exp();
        let d = 1.0 / u;

        let one = BinomialTree::new(1).unwrap().evaluate(&c).unwrap();
        assert_relative_eq!(one.delta, (u - 1.0) / (u - d), epsilon = 1e-12);
        assert_eq!(one.gamma, 0.0);

        // Only the top terminal node is in the money after two steps
        let dt: f64 = 0.5;
        let u = (0.2 * dt.sqrt()).exp();
        let d = 1.0 / u;
        let two = BinomialTree::new(2).unwrap().evaluate(&c).unwrap();
        assert!(two.delta > 0.0 && two.delta < 1.0);
        assert_relative_eq!(two.gamma, 1.0 / (50.0 * (u * u - d * d)), epsilon = 1e-12);

        let three = BinomialTree::new(3).unwrap().evaluate(&c).unwrap();
        assert!(three.delta > 0.0 && three.gamma > 0.0);
    }

    #[test]
    fn test_european_converges_to_black_scholes() {
        let c = contract(OptionType::Call);
        let bs = BlackScholes::price_contract(&c).unwrap();
        let coarse = (BinomialTree::new(50).unwrap().price(&c).unwrap() - bs).abs();
        let fine = (BinomialTree::new(2000).unwrap().price(&c).unwrap() - bs).abs();
        assert!(fine < coarse);
        assert!(fine < 5e-3);
    }

    #[test]
    fn test_american_put_early_exercise_premium() {
        let euro = contract(OptionType::Put);
        let amer = euro.clone().with_exercise(ExerciseStyle::American);
        let tree = BinomialTree::default();
        let premium = tree.price(&amer).unwrap() - tree.price(&euro).unwrap();
        // Reference American put ≈ 6.09 vs European ≈ 5.57
        assert!(premium > 0.4 && premium < 0.6);
        assert_relative_eq!(tree.price(&amer).unwrap(), 6.09, epsilon = 0.02);
    }

    #[test]
    fn test_american_call_without_dividends_equals_european() {
        let euro = contract(OptionType::Call);
        let amer = euro.clone().with_exercise(ExerciseStyle::American);
        let tree = BinomialTree::new(400).unwrap();
        assert_relative_eq!(
            tree.price(&amer).unwrap(),
            tree.price(&euro).unwrap(),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_bermudan_between_european_and_american() {
        let euro = contract(OptionType::Put);
        let berm = euro
            .clone()
            .with_exercise(ExerciseStyle::bermudan(vec![0.25, 0.5, 0.75]));
        let amer = euro.clone().with_exercise(ExerciseStyle::American);
        let tree = BinomialTree::new(400).unwrap();
        let (e, b, a) = (
            tree.price(&euro).unwrap(),
            tree.price(&berm).unwrap(),
            tree.price(&amer).unwrap(),
        );
        assert!(e < b && b < a);
    }

    #[test]
    fn test_tree_greeks_near_black_scholes() {
        let c = contract(OptionType::Call);
        let result = BinomialTree::new(1000).unwrap().evaluate(&c).unwrap();
        let greeks = BlackScholes::greeks_contract(&c).unwrap();
        assert_relative_eq!(result.delta, greeks.delta, epsilon = 5e-3);
        assert_relative_eq!(result.gamma, greeks.gamma, epsilon = 1e-3);
    }

    #[test]
    fn test_zero_expiry_returns_intrinsic() {
        let c = OptionContract::new(OptionType::Put, 90.0, 100.0, 0.0, 0.05, 0.2).unwrap();
        let result = BinomialTree::default().evaluate(&c).unwrap();
        assert_eq!(result.price, 10.0);
        assert_eq!(result.delta, -1.0);
    }

    #[test]
    fn test_zero_volatility_rejected() {
        let c = OptionContract::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.0).unwrap();
        assert!(matches!(
            BinomialTree::default().price(&c),
            Err(ModelError::NonPositiveVolatility { .. })
        ));
    }

    #[test]
    fn test_coarse_tree_with_extreme_carry_rejected() {
        let c = OptionContract::new(OptionType::Call, 100.0, 100.0, 5.0, 0.9, 0.01).unwrap();
        assert!(matches!(
            BinomialTree::new(2).unwrap().price(&c),
            Err(ModelError::ArbitrageProbability { .. })
        ));
    }
}
