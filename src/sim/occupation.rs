// src/sim/occupation.rs
//! Expected Occupation Time Estimation
//!
//! # Mathematical Framework
//!
//! For nested domains `V ⊂ D` and Brownian motion started at `x ∈ V`, the
//! occupation time is the total time the path spends inside `V` before first
//! exiting `D`:
//! ```text
//! O = ∫₀^τ_D 1_V(B_t) dt  ≈  dt · #{k < τ_D/dt : B_{k·dt} ∈ V}
//! ```
//! Per-path values always satisfy `0 ≤ O ≤ τ_D`. The per-point mean is
//! evaluated on the grid of `V` (not `D`), and the grid aggregate is the
//! **minimum** — a lower bound for the corresponding elliptic problem
//! restricted to `V`.

use super::{ExitPolicy, Executor};
use crate::config::SimParams;
use crate::domain::Domain;
use crate::error::{SimError, SimResult};
use crate::field::ScalarField;
use crate::rng::RngFactory;
use ndarray::ArrayView1;

pub struct OccupationTimeEstimator {
    domain_d: Domain,
    domain_v: Domain,
    params: SimParams,
    policy: ExitPolicy,
    executor: Executor,
    rng: RngFactory,
}

impl OccupationTimeEstimator {
    /// `domain_d` defines the exit; `domain_v` is the observed sub-region
    /// and must be geometrically nested inside `domain_d`.
    pub fn new(domain_d: Domain, domain_v: Domain, params: SimParams) -> SimResult<Self> {
        params.validate()?;
        domain_d.validate()?;
        domain_v.validate()?;
        if !domain_d.encloses(&domain_v) {
            return Err(SimError::InvalidConfiguration {
                field: "domain_v".to_string(),
                reason: format!("{} is not contained in {}", domain_v, domain_d),
            });
        }
        Ok(OccupationTimeEstimator {
            rng: RngFactory::new(params.seed),
            domain_d,
            domain_v,
            params,
            policy: ExitPolicy::default(),
            executor: Executor::default(),
        })
    }

    pub fn with_policy(mut self, policy: ExitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.executor = executor;
        self
    }

    /// Expected occupation time of `domain_v` started from one point of `domain_v`
    pub fn expected_occupation_time(&self, b0: ArrayView1<f64>) -> SimResult<f64> {
        self.point_estimate(b0, 0)
    }

    fn point_estimate(&self, b0: ArrayView1<f64>, stream_base: u64) -> SimResult<f64> {
        let domain_v = &self.domain_v;
        super::point_estimate(
            &self.domain_d,
            b0,
            &self.params,
            self.policy,
            &self.rng,
            stream_base,
            |path, exit_index| path.occupation_time(domain_v, exit_index),
        )
    }

    /// Per-gridpoint expected occupation times over the grid of `domain_v`
    pub fn estimate_field(&self) -> SimResult<ScalarField> {
        let grid = self.domain_v.generate_grid(self.params.dx);
        let n = self.params.n as u64;
        let values = super::map_grid(&grid, self.executor, |i, p| {
            self.point_estimate(p.view(), i * n)
        })?;
        ScalarField::new(grid, values)
    }

    /// Minimum expected occupation time over the grid of `domain_v`
    pub fn run(&self) -> SimResult<f64> {
        let field = self.estimate_field()?;
        field
            .min()
            .ok_or_else(|| super::empty_grid_error(self.params.dx))
    }
}
