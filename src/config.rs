// src/config.rs
//! Run Configuration
//!
//! External collaborator for the estimators: a single structured record
//! supplying the time/space discretization, the sample count, and one or two
//! domain descriptions, loadable from JSON. Validation happens before any
//! sampling begins; degenerate parameters are fatal here.
//!
//! ```json
//! {
//!   "max_t": 5.0, "dt": 0.01, "dx": 0.5, "n": 2000,
//!   "domain": {"kind": "ball", "center": [0.0], "radius": 1.0}
//! }
//! ```

use crate::domain::Domain;
use crate::error::{validation::*, SimError, SimResult};
use crate::sim::ExitPolicy;
use serde::Deserialize;

fn default_seed() -> u64 {
    12345
}

/// Shared discretization and sampling parameters
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SimParams {
    /// Time horizon of each sample path
    pub max_t: f64,
    /// Time step
    pub dt: f64,
    /// Grid spacing
    pub dx: f64,
    /// Samples per grid point
    pub n: usize,
    /// Base seed for the per-sample RNG streams
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl SimParams {
    /// Discretized step count `round(max_t/dt)`
    pub fn num_steps(&self) -> usize {
        (self.max_t / self.dt).round() as usize
    }

    pub fn validate(&self) -> SimResult<()> {
        validate_positive("max_t", self.max_t)?;
        validate_finite("max_t", self.max_t)?;
        validate_positive("dt", self.dt)?;
        validate_finite("dt", self.dt)?;
        validate_positive("dx", self.dx)?;
        validate_finite("dx", self.dx)?;
        validate_samples(self.n)?;
        validate_step_count(self.num_steps())?;
        Ok(())
    }
}

/// Discriminated domain description as it appears in configuration files
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DomainSpec {
    Ball {
        center: Vec<f64>,
        radius: f64,
    },
    Annulus {
        center: Vec<f64>,
        inner_radius: f64,
        outer_radius: f64,
    },
}

impl DomainSpec {
    pub fn build(&self) -> SimResult<Domain> {
        match self {
            DomainSpec::Ball { center, radius } => Domain::ball(center.clone(), *radius),
            DomainSpec::Annulus {
                center,
                inner_radius,
                outer_radius,
            } => Domain::annulus(center.clone(), *inner_radius, *outer_radius),
        }
    }
}

/// Full run configuration for one estimator invocation
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    #[serde(flatten)]
    pub params: SimParams,

    /// Exit-time and Picard modes: the single domain
    pub domain: Option<DomainSpec>,

    /// Occupation-time mode: outer exit domain
    pub domain_d: Option<DomainSpec>,
    /// Occupation-time mode: inner observation domain
    pub domain_v: Option<DomainSpec>,

    /// Picard reaction exponent
    pub p: Option<f64>,
    /// Picard convergence threshold
    pub epsilon: Option<f64>,
    /// Picard iteration cap
    pub max_iterations: Option<usize>,

    #[serde(default)]
    pub exit_policy: ExitPolicy,

    /// Optional path for a CSV copy of the summary report
    pub report_csv: Option<String>,
}

impl RunConfig {
    pub fn from_json(text: &str) -> SimResult<Self> {
        serde_json::from_str(text).map_err(|e| SimError::InvalidConfiguration {
            field: "config".to_string(),
            reason: e.to_string(),
        })
    }

    fn require<'a>(&self, field: &str, spec: &'a Option<DomainSpec>) -> SimResult<&'a DomainSpec> {
        spec.as_ref().ok_or_else(|| SimError::InvalidConfiguration {
            field: field.to_string(),
            reason: "missing domain description".to_string(),
        })
    }

    /// Domain for the exit-time and Picard modes
    pub fn single_domain(&self) -> SimResult<Domain> {
        self.require("domain", &self.domain)?.build()
    }

    /// Outer/inner domain pair for the occupation-time mode
    pub fn domain_pair(&self) -> SimResult<(Domain, Domain)> {
        let d = self.require("domain_d", &self.domain_d)?.build()?;
        let v = self.require("domain_v", &self.domain_v)?.build()?;
        Ok((d, v))
    }

    fn require_value(&self, field: &str, value: Option<f64>) -> SimResult<f64> {
        value.ok_or_else(|| SimError::InvalidConfiguration {
            field: field.to_string(),
            reason: "required for the picard mode".to_string(),
        })
    }

    /// `(p, epsilon)` for the Picard mode
    pub fn picard_controls(&self) -> SimResult<(f64, f64)> {
        let p = self.require_value("p", self.p)?;
        let epsilon = self.require_value("epsilon", self.epsilon)?;
        Ok((p, epsilon))
    }
}
