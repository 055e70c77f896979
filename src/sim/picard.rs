// src/sim/picard.rs
//! Picard Iteration for a Semilinear Reaction Problem
//!
//! # Mathematical Framework
//!
//! On the grid of a domain `D`, the solver produces iterates `u_0, u_1, …`
//! of the fixed-point map
//! ```text
//! u_{i+1}(x) = E[ ∫₀^τ u_i(B_t)^p dt ],   B_0 = x, τ = first exit from D
//! ```
//! The integral is discretized along each sample path with the previous
//! iterate evaluated through a nearest-neighbor interpolant of `u_i^p` over
//! the grid. `u_0` is the domain's closed-form seed field (zero on the
//! boundary, positive inside).
//!
//! # Convergence Control
//!
//! The loop stops when `delta_i = max_x |u_{i+1}(x) − u_i(x)| ≤ epsilon`,
//! or after `max_iterations` steps. Exceeding the cap is reported through
//! `converged: false` on the returned solution; the best iterate is still
//! returned, since a partial solution is usable.

use super::{ExitPolicy, Executor};
use crate::config::SimParams;
use crate::domain::Domain;
use crate::error::{validation::*, SimResult};
use crate::field::{NearestInterpolant, ScalarField};
use crate::rng::RngFactory;

const DEFAULT_MAX_ITERATIONS: usize = 50;

pub struct PicardSolver {
    domain: Domain,
    exponent: f64,
    epsilon: f64,
    max_iterations: usize,
    params: SimParams,
    policy: ExitPolicy,
    executor: Executor,
    rng: RngFactory,
}

/// Final iterate plus the convergence trace
pub struct PicardSolution {
    pub field: ScalarField,
    /// `delta_i` per completed iteration (sup-norm steps, all non-negative)
    pub deltas: Vec<f64>,
    pub iterations: usize,
    pub converged: bool,
}

impl PicardSolution {
    /// The solution extended to the whole domain
    pub fn interpolant(&self) -> NearestInterpolant {
        self.field.interpolant()
    }
}

impl PicardSolver {
    pub fn new(domain: Domain, exponent: f64, epsilon: f64, params: SimParams) -> SimResult<Self> {
        params.validate()?;
        domain.validate()?;
        validate_finite("p", exponent)?;
        validate_positive("epsilon", epsilon)?;
        Ok(PicardSolver {
            rng: RngFactory::new(params.seed),
            domain,
            exponent,
            epsilon,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            params,
            policy: ExitPolicy::default(),
            executor: Executor::default(),
        })
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    pub fn with_policy(mut self, policy: ExitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.executor = executor;
        self
    }

    fn one_iteration(&self, field: &ScalarField, iteration: usize) -> SimResult<Vec<f64>> {
        let exponent = self.exponent;
        let interpolant = field.map_values(|v| v.powf(exponent)).into_interpolant();

        let n = self.params.n as u64;
        // distinct streams per iteration so iterates stay independent
        let base = iteration as u64 * field.len() as u64 * n;
        let dt = self.params.dt;
        super::map_grid(field.points(), self.executor, |i, point| {
            super::point_estimate(
                &self.domain,
                point.view(),
                &self.params,
                self.policy,
                &self.rng,
                base + i * n,
                |path, exit_index| {
                    let mut acc = 0.0;
                    for k in 0..exit_index {
                        acc += interpolant.eval(path.point(k));
                    }
                    acc * dt
                },
            )
        })
    }

    pub fn run(&self) -> SimResult<PicardSolution> {
        let grid = self.domain.generate_grid(self.params.dx);
        if grid.is_empty() {
            return Err(super::empty_grid_error(self.params.dx));
        }

        let seed_values: Vec<f64> = grid
            .iter()
            .map(|p| self.domain.seed_value(p.view()))
            .collect();
        let mut field = ScalarField::new(grid, seed_values)?;
        let mut deltas = Vec::new();
        let mut converged = false;
        let mut iterations = 0;

        for iteration in 0..self.max_iterations {
            let next_values = self.one_iteration(&field, iteration)?;
            let next = ScalarField::new(field.points().to_vec(), next_values)?;
            let delta = field.sup_distance(&next);
            deltas.push(delta);
            field = next;
            iterations = iteration + 1;
            if delta <= self.epsilon {
                converged = true;
                break;
            }
        }

        Ok(PicardSolution {
            field,
            deltas,
            iterations,
            converged,
        })
    }
}
