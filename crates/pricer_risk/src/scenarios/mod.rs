//! Scenario grids for a single option.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               Scenario Grid                   │
//! ├──────────────────────────────────────────────┤
//! │  ScenarioSpec  - ladder shape (range, steps) │
//! │  ScenarioPoint - value and P&L at one shock  │
//! │  ThetaPoint    - value at a day to expiry    │
//! │  ScenarioGrid  - spot, vol and theta ladders │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Spot and volatility shocks are relative: a shock of `-0.2` moves the spot
//! to `0.8·S`, and a shock of `0.5` moves the volatility to `1.5·σ`.

mod engine;
mod shifts;

pub use engine::{ScenarioGrid, ScenarioPoint, ThetaPoint};
pub use shifts::{shock_ladder, ScenarioSpec};
