// src/sim/mod.rs
//! Monte Carlo Estimators
//!
//! Three estimators share one sampling core: launch `n` independent Wiener
//! paths from a grid point, locate each path's first-excursion step out of
//! the exit domain, extract a per-path statistic, and average. They differ
//! only in the statistic (the exit time itself, the occupation time of an
//! inner domain, or the integral of a reaction term along the path) and in
//! how the per-point estimates aggregate over the grid.

pub mod executor;
pub mod exit_time;
pub mod occupation;
pub mod picard;

pub use executor::Executor;
pub use exit_time::ExitTimeEstimator;
pub use occupation::OccupationTimeEstimator;
pub use picard::{PicardSolver, PicardSolution};

use crate::config::SimParams;
use crate::domain::Domain;
use crate::error::{SimError, SimResult};
use crate::path::{self, BrownianPath};
use crate::rng::RngFactory;
use ndarray::{Array1, ArrayView1};
use serde::Deserialize;

/// Severity of the UnreachableExit condition: a sample path that never
/// leaves the exit domain within `max_t`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitPolicy {
    /// Fail the grid point's whole estimate on the first unreachable exit
    #[default]
    Strict,
    /// Exclude the sample; the point still needs at least max(1, n/2) valid
    /// samples or its estimate fails
    Discard,
}

/// Mean of a per-path statistic over `n` sample paths launched from `b0`
///
/// `stat` receives each path together with its first-excursion index out of
/// `exit_domain`. Sample `s` of this point draws from stream
/// `stream_base + s`, so estimates are independent across grid points and
/// identical under any executor.
pub(crate) fn point_estimate<F>(
    exit_domain: &Domain,
    b0: ArrayView1<f64>,
    params: &SimParams,
    policy: ExitPolicy,
    rng: &RngFactory,
    stream_base: u64,
    stat: F,
) -> SimResult<f64>
where
    F: Fn(&BrownianPath, usize) -> f64,
{
    let n = params.n;
    let mut sum = 0.0;
    let mut valid = 0usize;

    for s in 0..n {
        let mut stream = rng.stream(stream_base + s as u64);
        let sample = path::sample_path(b0, params.max_t, params.dt, &mut stream);
        match sample.exit_index(exit_domain) {
            Some(k) if k > 0 => {
                sum += stat(&sample, k);
                valid += 1;
            }
            _ => match policy {
                ExitPolicy::Strict => {
                    return Err(SimError::UnreachableExit {
                        start: b0.to_vec(),
                        max_t: params.max_t,
                    })
                }
                ExitPolicy::Discard => {}
            },
        }
    }

    let min_valid = (n / 2).max(1);
    if valid < min_valid {
        return Err(SimError::MonteCarloError {
            samples: valid,
            reason: format!(
                "fewer than {} of {} sample paths reached the exit",
                min_valid, n
            ),
        });
    }
    Ok(sum / valid as f64)
}

/// Evaluate a per-point estimate over every grid point
///
/// One grid point's failure fails the whole run, but never corrupts other
/// points' estimates (each works on its own RNG streams and state).
pub(crate) fn map_grid<F>(grid: &[Array1<f64>], executor: Executor, f: F) -> SimResult<Vec<f64>>
where
    F: Fn(u64, &Array1<f64>) -> SimResult<f64> + Sync + Send,
{
    let indexed: Vec<(u64, &Array1<f64>)> =
        grid.iter().enumerate().map(|(i, p)| (i as u64, p)).collect();
    let results = executor.map(indexed, |(i, p)| f(i, p));
    results.into_iter().collect()
}

pub(crate) fn empty_grid_error(dx: f64) -> SimError {
    SimError::InvalidConfiguration {
        field: "dx".to_string(),
        reason: format!("grid spacing {} produces no interior grid points", dx),
    }
}
