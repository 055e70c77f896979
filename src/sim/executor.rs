// src/sim/executor.rs
//! Scheduling Strategies
//!
//! Every estimate is a map over independent units of work (grid points, and
//! sample paths within a grid point), so the scheduling strategy is pluggable:
//! a plain sequential loop or a rayon worker pool. Per-stream RNG seeding
//! makes both produce bit-identical results for the same base seed.

use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Executor {
    /// Single-threaded loop
    Sequential,
    /// Rayon worker pool over grid points
    Parallel,
}

impl Default for Executor {
    fn default() -> Self {
        Executor::Parallel
    }
}

impl Executor {
    pub fn map<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Sync + Send,
    {
        match self {
            Executor::Sequential => items.into_iter().map(f).collect(),
            Executor::Parallel => items.into_par_iter().map(f).collect(),
        }
    }

    /// Worker slots this strategy may occupy (diagnostics only)
    pub fn workers(&self) -> usize {
        match self {
            Executor::Sequential => 1,
            Executor::Parallel => num_cpus::get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategies_agree() {
        let items: Vec<u64> = (0..100).collect();
        let sequential = Executor::Sequential.map(items.clone(), |x| x * x);
        let parallel = Executor::Parallel.map(items, |x| x * x);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_workers() {
        assert_eq!(Executor::Sequential.workers(), 1);
        assert!(Executor::Parallel.workers() >= 1);
    }
}
