//! # Random Number Generation
//!
//! Monte Carlo pricers draw from a [`RandomSource`]: a seam that keeps the
//! generator explicit so runs are reproducible and tests can inject their
//! own sequences. [`PricerRng`] is the production implementation, a seeded
//! `StdRng` producing normals by Box-Muller.
//!
//! ```rust
//! use pricer_pricing::rng::{PricerRng, RandomSource};
//!
//! let mut rng = PricerRng::from_seed(12345);
//! let u = rng.next_uniform();
//! let z = rng.next_normal();
//! assert!(u > 0.0 && u < 1.0);
//! assert!(z.is_finite());
//! ```

mod prng;

pub use prng::{box_muller, derive_seed, PricerRng, RandomSource};
