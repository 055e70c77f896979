// src/field.rs
//! Scalar Fields over Spatial Grids
//!
//! A [`ScalarField`] pairs a domain grid with one real value per grid point
//! (an exit-time or occupation-time estimate, or a Picard iterate). A
//! [`NearestInterpolant`] extends a field to arbitrary points of ℝ^d by
//! nearest-neighbor lookup, which is how the Picard solver evaluates the
//! previous iterate at the off-grid points visited by sample paths.

use crate::error::{SimError, SimResult};
use ndarray::{Array1, ArrayView1};

/// A real value per grid point
#[derive(Debug, Clone)]
pub struct ScalarField {
    points: Vec<Array1<f64>>,
    values: Vec<f64>,
}

impl ScalarField {
    pub fn new(points: Vec<Array1<f64>>, values: Vec<f64>) -> SimResult<Self> {
        if points.len() != values.len() {
            return Err(SimError::InvalidConfiguration {
                field: "values".to_string(),
                reason: format!(
                    "length {} does not match grid size {}",
                    values.len(),
                    points.len()
                ),
            });
        }
        Ok(ScalarField { points, values })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Array1<f64>] {
        &self.points
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Maximum value over the grid
    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    /// Minimum value over the grid
    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    /// Infinity norm of the value difference against a field on the same grid
    pub fn sup_distance(&self, other: &ScalarField) -> f64 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    /// Field with the same grid and transformed values
    pub fn map_values<F: Fn(f64) -> f64>(&self, f: F) -> ScalarField {
        ScalarField {
            points: self.points.clone(),
            values: self.values.iter().map(|&v| f(v)).collect(),
        }
    }

    pub fn into_interpolant(self) -> NearestInterpolant {
        NearestInterpolant {
            points: self.points,
            values: self.values,
        }
    }

    pub fn interpolant(&self) -> NearestInterpolant {
        self.clone().into_interpolant()
    }
}

/// Nearest-neighbor extension of a [`ScalarField`] to all of ℝ^d
#[derive(Debug, Clone)]
pub struct NearestInterpolant {
    points: Vec<Array1<f64>>,
    values: Vec<f64>,
}

impl NearestInterpolant {
    /// Value of the nearest grid point; NaN for an empty field
    pub fn eval(&self, x: ArrayView1<f64>) -> f64 {
        let mut best = usize::MAX;
        let mut best_dist = f64::INFINITY;
        for (i, p) in self.points.iter().enumerate() {
            let dist = p
                .iter()
                .zip(x.iter())
                .map(|(a, b)| (a - b) * (a - b))
                .sum::<f64>();
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }
        if best == usize::MAX {
            f64::NAN
        } else {
            self.values[best]
        }
    }
}
