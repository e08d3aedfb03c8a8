//! Seeded pseudo-random number generator and the [`RandomSource`] seam.
//!
//! Normal variates come from the Box-Muller transform applied to two
//! independent uniforms on the open interval (0, 1).

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use rand_distr::{Distribution, Open01};
use std::f64::consts::TAU;

/// Source of uniform and standard normal variates for Monte Carlo.
///
/// The pricers take any implementation by `&mut` so tests can inject a
/// fixed sequence. Only [`next_uniform`](Self::next_uniform) is required;
/// the normal draw defaults to Box-Muller on two uniforms.
pub trait RandomSource {
    /// Uniform variate on the open interval (0, 1).
    fn next_uniform(&mut self) -> f64;

    /// Standard normal variate (mean 0, variance 1).
    fn next_normal(&mut self) -> f64 {
        let u1 = self.next_uniform();
        let u2 = self.next_uniform();
        box_muller(u1, u2).0
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }

    #[inline]
    fn next_normal(&mut self) -> f64 {
        (**self).next_normal()
    }
}

/// Box-Muller transform of two uniforms in (0, 1) into two independent
/// standard normals.
///
/// # Examples
/// ```
/// use pricer_pricing::rng::box_muller;
///
/// let (z1, z2) = box_muller(0.5, 0.25);
/// assert!(z1.abs() < 1e-12);
/// assert!((z2 - 1.177410022515475).abs() < 1e-12);
/// ```
#[inline]
pub fn box_muller(u1: f64, u2: f64) -> (f64, f64) {
    let radius = (-2.0 * u1.ln()).sqrt();
    let (sin, cos) = (TAU * u2).sin_cos();
    (radius * cos, radius * sin)
}

/// Mixes a base seed with a stream index (SplitMix64 finaliser).
///
/// Parallel chunks draw from independent generators seeded this way, so a
/// run is reproducible from the base seed alone.
#[inline]
pub fn derive_seed(base: u64, stream: u64) -> u64 {
    let mut z = base ^ stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Monte Carlo simulation random number generator.
///
/// Wraps `StdRng` with the seed it was built from, and keeps the second
/// Box-Muller normal for the next call.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::{PricerRng, RandomSource};
///
/// let mut rng = PricerRng::from_seed(42);
///
/// let u = rng.next_uniform();
/// assert!(u > 0.0 && u < 1.0);
/// let _z = rng.next_normal();
///
/// let mut buffer = vec![0.0; 100];
/// rng.fill_normal(&mut buffer);
/// ```
#[derive(Debug, Clone)]
pub struct PricerRng {
    inner: StdRng,
    seed: u64,
    spare: Option<f64>,
}

impl PricerRng {
    /// Creates a generator from a seed.
    ///
    /// The same seed always yields the same sequence.
    ///
    /// ```rust
    /// use pricer_pricing::rng::{PricerRng, RandomSource};
    ///
    /// let mut rng1 = PricerRng::from_seed(12345);
    /// let mut rng2 = PricerRng::from_seed(12345);
    /// assert_eq!(rng1.next_normal(), rng2.next_normal());
    /// ```
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
            spare: None,
        }
    }

    /// Creates a generator seeded from the operating system.
    ///
    /// The drawn seed is kept, so [`seed`](Self::seed) can be logged to
    /// replay the run.
    pub fn from_entropy() -> Self {
        Self::from_seed(OsRng.next_u64())
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fills the buffer with uniforms in (0, 1).
    pub fn fill_uniform(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.next_uniform();
        }
    }

    /// Fills the buffer with standard normals, two per Box-Muller pair.
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.next_normal();
        }
    }
}

impl RandomSource for PricerRng {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        Open01.sample(&mut self.inner)
    }

    #[inline]
    fn next_normal(&mut self) -> f64 {
        if let Some(z) = self.spare.take() {
            return z;
        }
        let u1 = self.next_uniform();
        let u2 = self.next_uniform();
        let (z1, z2) = box_muller(u1, u2);
        self.spare = Some(z2);
        z1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Replays a fixed list of uniforms.
    struct Scripted {
        values: Vec<f64>,
        index: usize,
    }

    impl RandomSource for Scripted {
        fn next_uniform(&mut self) -> f64 {
            let u = self.values[self.index % self.values.len()];
            self.index += 1;
            u
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PricerRng::from_seed(7);
        let mut b = PricerRng::from_seed(7);
        for _ in 0..100 {
            assert_eq!(a.next_normal(), b.next_normal());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = PricerRng::from_seed(1);
        let mut b = PricerRng::from_seed(2);
        let same = (0..10).filter(|_| a.next_uniform() == b.next_uniform()).count();
        assert!(same < 10);
    }

    #[test]
    fn test_uniforms_are_open_interval() {
        let mut rng = PricerRng::from_seed(3);
        let mut buffer = vec![0.0; 10_000];
        rng.fill_uniform(&mut buffer);
        assert!(buffer.iter().all(|&u| u > 0.0 && u < 1.0));
    }

    #[test]
    fn test_normal_moments() {
        let mut rng = PricerRng::from_seed(42);
        let n = 200_000;
        let mut buffer = vec![0.0; n];
        rng.fill_normal(&mut buffer);

        let mean = buffer.iter().sum::<f64>() / n as f64;
        let var = buffer.iter().map(|z| (z - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        assert_abs_diff_eq!(mean, 0.0, epsilon = 0.01);
        assert_abs_diff_eq!(var, 1.0, epsilon = 0.02);
    }

    #[test]
    fn test_spare_normal_is_second_of_pair() {
        let mut rng = PricerRng::from_seed(11);
        let mut replay = PricerRng::from_seed(11);
        let u1 = replay.next_uniform();
        let u2 = replay.next_uniform();
        let (z1, z2) = box_muller(u1, u2);

        assert_eq!(rng.next_normal(), z1);
        assert_eq!(rng.next_normal(), z2);
    }

    #[test]
    fn test_default_normal_uses_box_muller() {
        let mut source = Scripted {
            values: vec![0.5, 0.0],
            index: 0,
        };
        let expected = (-2.0 * 0.5_f64.ln()).sqrt();
        assert_abs_diff_eq!(source.next_normal(), expected, epsilon = 1e-15);
    }

    #[test]
    fn test_derived_seeds_are_distinct() {
        let seeds: Vec<u64> = (0..64).map(|i| derive_seed(42, i)).collect();
        for (i, a) in seeds.iter().enumerate() {
            for b in &seeds[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(derive_seed(42, 3), derive_seed(42, 3));
    }

    #[test]
    fn test_entropy_seed_is_recorded() {
        let rng = PricerRng::from_entropy();
        let mut replay = PricerRng::from_seed(rng.seed());
        let mut original = rng.clone();
        assert_eq!(original.next_uniform(), replay.next_uniform());
    }
}
