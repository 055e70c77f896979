// src/path.rs
//! Wiener Process Sample Paths
//!
//! # Discretization
//!
//! A path is a uniform time grid `t_k = k·dt` for `k = 0..num-1` with
//! `num = round(max_t/dt)`. The first point is the starting point `b0`;
//! each subsequent point adds an independent Normal(0, dt) increment per
//! coordinate:
//! ```text
//! B_{k+1} = B_k + √dt · Z_k,   Z_k ~ N(0, I_d)
//! ```
//!
//! Paths are owned by the estimator call that created them and are
//! discarded once their statistics are extracted.

use crate::domain::Domain;
use crate::rng;
use ndarray::{Array2, ArrayView1, Axis};
use rand::Rng;

/// One discretized sample path of a d-dimensional Wiener process
pub struct BrownianPath {
    positions: Array2<f64>,
    dt: f64,
}

/// Generate one sample path started at `b0`
///
/// Dimensionality is inferred from `b0`; `max_t` and `dt` must already be
/// validated (positive, `round(max_t/dt) ≥ 2`).
pub fn sample_path<R: Rng + ?Sized>(
    b0: ArrayView1<f64>,
    max_t: f64,
    dt: f64,
    rng: &mut R,
) -> BrownianPath {
    let num = (max_t / dt).round() as usize;
    let dim = b0.len();
    let sqrt_dt = dt.sqrt();

    let mut positions = Array2::zeros((num, dim));
    positions.row_mut(0).assign(&b0);
    for k in 1..num {
        for axis in 0..dim {
            let z = rng::get_normal_draw(rng);
            positions[[k, axis]] = positions[[k - 1, axis]] + sqrt_dt * z;
        }
    }

    BrownianPath { positions, dt }
}

impl BrownianPath {
    /// Number of time steps (including the starting point)
    pub fn len(&self) -> usize {
        self.positions.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.nrows() == 0
    }

    /// Spatial dimension
    pub fn dim(&self) -> usize {
        self.positions.ncols()
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Position at step `k`
    pub fn point(&self, k: usize) -> ArrayView1<f64> {
        self.positions.row(k)
    }

    /// First index at which the path is outside `domain`
    ///
    /// `Some(0)` means the path started outside; `None` means the path never
    /// left the domain within `max_t`. Callers treat both as an unreachable
    /// exit.
    pub fn exit_index(&self, domain: &Domain) -> Option<usize> {
        self.positions
            .axis_iter(Axis(0))
            .position(|p| !domain.contains(p))
    }

    /// Exit time `k·dt` at the first excursion step, if the path exits
    pub fn exit_time(&self, domain: &Domain) -> Option<f64> {
        match self.exit_index(domain) {
            Some(k) if k > 0 => Some(k as f64 * self.dt),
            _ => None,
        }
    }

    /// Time spent inside `domain` over the steps before `stop_index`
    pub fn occupation_time(&self, domain: &Domain, stop_index: usize) -> f64 {
        let hits = self
            .positions
            .axis_iter(Axis(0))
            .take(stop_index)
            .filter(|p| domain.contains(p.view()))
            .count();
        hits as f64 * self.dt
    }
}
