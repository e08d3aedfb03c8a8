//! Recombining lattice pricers.
//!
//! - [`BinomialTree`]: Cox-Ross-Rubinstein tree with European, American and
//!   Bermudan exercise

pub mod binomial;

pub use binomial::{BinomialTree, LatticeResult};
