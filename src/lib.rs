//! # eosim: Monte Carlo Exit and Occupation Times
//!
//! A Rust library estimating, by Monte Carlo simulation of Brownian sample
//! paths, probabilistic functionals of boundary-value problems on geometric
//! domains: expected first-exit times, expected occupation times of a nested
//! sub-region, and the fixed point of a semilinear reaction problem via
//! Picard iteration.
//!
//! ## Key Features
//!
//! - **Reproducible randomness**: explicit RNG context with independent
//!   per-sample streams; identical results sequentially and in parallel
//! - **Parallel estimation**: pluggable executor, sequential loop or rayon
//!   worker pool over grid points
//! - **Geometric domains**: open balls and annuli in any dimension, with
//!   deterministic lattice grid generation
//! - **Robust validation**: degenerate configurations rejected before any
//!   sampling begins; unreachable exits surfaced, never coerced to zero
//!
//! ## Quick Start
//!
//! ```rust
//! use eosim::config::SimParams;
//! use eosim::domain::Domain;
//! use eosim::sim::{ExitPolicy, ExitTimeEstimator};
//!
//! let domain = Domain::ball(vec![0.0], 1.0).expect("valid domain");
//! let params = SimParams { max_t: 5.0, dt: 0.01, dx: 0.5, n: 200, seed: 42 };
//!
//! // Maximum expected exit time over the domain's grid. For Brownian motion
//! // leaving a ball of radius r from its center, E[exit time] = r²/d.
//! let estimate = ExitTimeEstimator::new(domain, params)
//!     .expect("valid configuration")
//!     .with_policy(ExitPolicy::Discard)
//!     .run()
//!     .expect("estimate");
//! assert!(estimate > 0.0);
//! ```

// Module declarations
pub mod config;
pub mod domain;
pub mod error;
pub mod field;
pub mod math_utils;
pub mod output;
pub mod path;
pub mod rng;
pub mod sim;

// Re-export commonly used types for convenience
pub use domain::Domain;
pub use error::{SimError, SimResult};
pub use sim::{ExitPolicy, ExitTimeEstimator, OccupationTimeEstimator, PicardSolver};
