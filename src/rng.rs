// src/rng.rs
//! Random Number Generation for Monte Carlo Simulations
//!
//! # Design Philosophy
//!
//! The estimators need random numbers with specific properties:
//! 1. **Reproducibility**: Same seed → same results (critical for debugging/validation)
//! 2. **Parallel safety**: Different workers must have independent streams
//! 3. **Explicit context**: No process-global generator; every sampling call
//!    receives a generator derived from an [`RngFactory`]
//!
//! # Stream Derivation
//!
//! Each unit of work — one sample path of one grid point — owns a stream id,
//! and the factory maps `(base_seed, stream_id)` to an independent `StdRng`
//! through a splitmix64 finalizer:
//! ```text
//! z = base_seed ⊕ (stream_id · 0x9e3779b97f4a7c15)
//! z = (z ⊕ (z >> 30)) * 0xbf58476d1ce4e5b9
//! z = (z ⊕ (z >> 27)) * 0x94d049bb133111eb
//! seed = z ⊕ (z >> 31)
//! ```
//! The mixing step keeps nearby stream ids from producing correlated seeds,
//! so a run is bit-identical whether the grid is mapped sequentially or over
//! a worker pool.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// RNG factory for reproducible parallel simulations
#[derive(Debug, Clone, Copy)]
pub struct RngFactory {
    base_seed: u64,
}

impl RngFactory {
    pub fn new(base_seed: u64) -> Self {
        Self { base_seed }
    }

    /// Create the generator for a specific stream (one sample of one grid point)
    pub fn stream(&self, stream_id: u64) -> StdRng {
        let mixed = splitmix64(self.base_seed ^ stream_id.wrapping_mul(0x9e3779b97f4a7c15));
        StdRng::seed_from_u64(mixed)
    }
}

/// Draw a standard normal variate
pub fn get_normal_draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_reproducibility() {
        let factory = RngFactory::new(42);

        let mut rng1 = factory.stream(7);
        let mut rng2 = factory.stream(7);

        for _ in 0..100 {
            assert_eq!(rng1.gen::<u64>(), rng2.gen::<u64>());
        }
    }

    #[test]
    fn test_distinct_streams() {
        let factory = RngFactory::new(42);

        let mut rng1 = factory.stream(0);
        let mut rng2 = factory.stream(1);

        let vals1: Vec<u64> = (0..10).map(|_| rng1.gen()).collect();
        let vals2: Vec<u64> = (0..10).map(|_| rng2.gen()).collect();

        assert_ne!(vals1, vals2);
    }

    #[test]
    fn test_normal_distribution() {
        let factory = RngFactory::new(42);
        let mut rng = factory.stream(0);

        let samples: Vec<f64> = (0..10000).map(|_| get_normal_draw(&mut rng)).collect();

        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let variance =
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;

        assert!(mean.abs() < 0.05, "Mean should be close to 0, got {}", mean);
        assert!(
            (variance - 1.0).abs() < 0.05,
            "Variance should be close to 1, got {}",
            variance
        );
    }
}
