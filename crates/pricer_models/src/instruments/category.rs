//! Exotic option descriptors.
//!
//! An [`OptionCategory`] rides alongside a vanilla [`OptionContract`](super::OptionContract)
//! and tells the pricers which payoff modification applies.

use super::error::InstrumentError;

/// Barrier direction and knock behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BarrierType {
    /// Dies if the spot rises to the barrier.
    UpAndOut,
    /// Comes alive if the spot rises to the barrier.
    UpAndIn,
    /// Dies if the spot falls to the barrier.
    DownAndOut,
    /// Comes alive if the spot falls to the barrier.
    DownAndIn,
}

impl BarrierType {
    /// Barrier above the spot.
    #[inline]
    pub fn is_up(self) -> bool {
        matches!(self, BarrierType::UpAndOut | BarrierType::UpAndIn)
    }

    /// Knock-in rather than knock-out.
    #[inline]
    pub fn is_knock_in(self) -> bool {
        matches!(self, BarrierType::UpAndIn | BarrierType::DownAndIn)
    }

    /// The knock-in/knock-out twin with the same direction.
    pub fn complement(self) -> Self {
        match self {
            BarrierType::UpAndOut => BarrierType::UpAndIn,
            BarrierType::UpAndIn => BarrierType::UpAndOut,
            BarrierType::DownAndOut => BarrierType::DownAndIn,
            BarrierType::DownAndIn => BarrierType::DownAndOut,
        }
    }
}

/// Barrier level and type.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{BarrierSpec, BarrierType};
///
/// let spec = BarrierSpec::new(BarrierType::UpAndOut, 120.0).unwrap();
/// assert!(spec.is_breached(125.0));
/// assert!(!spec.is_breached(100.0));
/// assert!(BarrierSpec::new(BarrierType::DownAndIn, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarrierSpec {
    /// Barrier type
    pub barrier_type: BarrierType,
    /// Barrier level (H > 0)
    pub level: f64,
}

impl BarrierSpec {
    /// Creates a barrier descriptor.
    pub fn new(barrier_type: BarrierType, level: f64) -> Result<Self, InstrumentError> {
        if !(level.is_finite() && level > 0.0) {
            return Err(InstrumentError::InvalidParameter {
                message: format!("barrier level must be positive, got {}", level),
            });
        }
        Ok(Self {
            barrier_type,
            level,
        })
    }

    /// Whether `spot` is at or through the barrier.
    #[inline]
    pub fn is_breached(&self, spot: f64) -> bool {
        if self.barrier_type.is_up() {
            spot >= self.level
        } else {
            spot <= self.level
        }
    }
}

/// Averaging used by an Asian option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AsianAveraging {
    /// Geometric average (closed form).
    Geometric,
    /// Arithmetic average (approximated from the geometric price).
    Arithmetic,
}

/// Strike convention of a lookback option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LookbackStrike {
    /// Payoff against the contract strike: `max(M - K, 0)` / `max(K - m, 0)`.
    Fixed,
    /// Strike is the running extreme: `S_T - m` / `M - S_T`.
    Floating,
}

/// Which pricer family applies to a contract.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionCategory {
    /// Plain vanilla option.
    #[default]
    Vanilla,
    /// Single barrier option.
    Barrier(BarrierSpec),
    /// Average-price option.
    Asian(AsianAveraging),
    /// Lookback option.
    Lookback(LookbackStrike),
}

impl OptionCategory {
    /// Returns whether this is a non-vanilla category.
    #[inline]
    pub fn is_exotic(&self) -> bool {
        !matches!(self, OptionCategory::Vanilla)
    }

    /// Short label used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            OptionCategory::Vanilla => "vanilla",
            OptionCategory::Barrier(_) => "barrier",
            OptionCategory::Asian(_) => "asian",
            OptionCategory::Lookback(_) => "lookback",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_barrier_type_flags() {
        assert!(BarrierType::UpAndIn.is_up());
        assert!(BarrierType::UpAndIn.is_knock_in());
        assert!(!BarrierType::DownAndOut.is_up());
        assert!(!BarrierType::DownAndOut.is_knock_in());
        assert_eq!(BarrierType::DownAndOut.complement(), BarrierType::DownAndIn);
    }

    #[test]
    fn test_down_barrier_breach() {
        let spec = BarrierSpec::new(BarrierType::DownAndOut, 80.0).unwrap();
        assert!(spec.is_breached(80.0));
        assert!(spec.is_breached(75.0));
        assert!(!spec.is_breached(81.0));
    }

    #[test]
    fn test_barrier_level_validation() {
        assert!(BarrierSpec::new(BarrierType::UpAndOut, -5.0).is_err());
        assert!(BarrierSpec::new(BarrierType::UpAndOut, f64::INFINITY).is_err());
    }

    #[test]
    fn test_category() {
        assert!(!OptionCategory::default().is_exotic());
        assert!(OptionCategory::Asian(AsianAveraging::Geometric).is_exotic());
        assert_eq!(OptionCategory::Lookback(LookbackStrike::Floating).name(), "lookback");
    }
}
