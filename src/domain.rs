// src/domain.rs
//! Geometric Domains
//!
//! # Mathematical Definitions
//!
//! A domain is an open region of ℝ^d with a membership test and a grid
//! generator. Two shapes are supported:
//!
//! - **Open ball**: ‖x − c‖ < r
//! - **Open annulus**: r1 < ‖x − c‖ < r2
//!
//! # Grid Generation
//!
//! `generate_grid(dx)` builds the axis-aligned lattice over the domain's
//! bounding box (`[-R, R]^d` shifted by the center, where R is the outer
//! radius) with `round(2R/dx) + 1` equally spaced coordinates per axis, then
//! keeps the lattice points satisfying membership. Points are enumerated in
//! row-major order over the Cartesian product of per-axis coordinates, so
//! the output is deterministic for a given `dx`.
//!
//! Domains are immutable value objects; a closed enum keeps the membership
//! test monomorphic inside the per-sample scan loops.

use crate::error::{validation::*, SimError, SimResult};
use ndarray::{Array1, ArrayView1};
use std::fmt;

/// A geometric region of ℝ^d
#[derive(Debug, Clone)]
pub enum Domain {
    /// Open ball: ‖x − c‖ < r
    Ball { center: Array1<f64>, radius: f64 },

    /// Open annulus: r1 < ‖x − c‖ < r2
    Annulus {
        center: Array1<f64>,
        inner_radius: f64,
        outer_radius: f64,
    },
}

impl Domain {
    /// Open ball with the given center and radius
    pub fn ball(center: Vec<f64>, radius: f64) -> SimResult<Self> {
        let domain = Domain::Ball {
            center: Array1::from(center),
            radius,
        };
        domain.validate()?;
        Ok(domain)
    }

    /// Open annulus with the given center and radii
    pub fn annulus(center: Vec<f64>, inner_radius: f64, outer_radius: f64) -> SimResult<Self> {
        let domain = Domain::Annulus {
            center: Array1::from(center),
            inner_radius,
            outer_radius,
        };
        domain.validate()?;
        Ok(domain)
    }

    /// Spatial dimension d
    pub fn dim(&self) -> usize {
        self.center().len()
    }

    pub fn center(&self) -> &Array1<f64> {
        match self {
            Domain::Ball { center, .. } => center,
            Domain::Annulus { center, .. } => center,
        }
    }

    /// Half-width of the axis-aligned bounding box
    pub fn extent(&self) -> f64 {
        match self {
            Domain::Ball { radius, .. } => *radius,
            Domain::Annulus { outer_radius, .. } => *outer_radius,
        }
    }

    /// Smallest distance from the center to a point of the domain's closure
    fn min_extent(&self) -> f64 {
        match self {
            Domain::Ball { .. } => 0.0,
            Domain::Annulus { inner_radius, .. } => *inner_radius,
        }
    }

    /// Validate the domain parameters
    pub fn validate(&self) -> SimResult<()> {
        if self.dim() == 0 {
            return Err(SimError::InvalidConfiguration {
                field: "center".to_string(),
                reason: "must have at least one coordinate".to_string(),
            });
        }
        for (i, &c) in self.center().iter().enumerate() {
            validate_finite(&format!("center[{}]", i), c)?;
        }
        match self {
            Domain::Ball { radius, .. } => validate_positive("radius", *radius),
            Domain::Annulus {
                inner_radius,
                outer_radius,
                ..
            } => {
                validate_non_negative("inner_radius", *inner_radius)?;
                validate_positive("outer_radius", *outer_radius)?;
                if inner_radius >= outer_radius {
                    return Err(SimError::InvalidParameters {
                        parameter: "inner_radius".to_string(),
                        value: *inner_radius,
                        constraint: format!("must be less than outer_radius ({})", outer_radius),
                    });
                }
                Ok(())
            }
        }
    }

    fn center_distance(&self, x: ArrayView1<f64>) -> f64 {
        x.iter()
            .zip(self.center().iter())
            .map(|(a, c)| (a - c) * (a - c))
            .sum::<f64>()
            .sqrt()
    }

    /// Membership test
    pub fn contains(&self, x: ArrayView1<f64>) -> bool {
        let d = self.center_distance(x);
        match self {
            Domain::Ball { radius, .. } => d < *radius,
            Domain::Annulus {
                inner_radius,
                outer_radius,
                ..
            } => *inner_radius < d && d < *outer_radius,
        }
    }

    /// Lattice points with spacing `dx` that lie inside the domain
    ///
    /// Row-major enumeration over the per-axis coordinates (last axis varies
    /// fastest); stable and reproducible for identical `dx`.
    pub fn generate_grid(&self, dx: f64) -> Vec<Array1<f64>> {
        let r = self.extent();
        let intervals = (2.0 * r / dx).round() as usize;
        let xs: Vec<f64> = if intervals == 0 {
            vec![-r]
        } else {
            (0..=intervals)
                .map(|i| -r + 2.0 * r * i as f64 / intervals as f64)
                .collect()
        };

        let dim = self.dim();
        let center = self.center();
        let mut points = Vec::new();
        let mut index = vec![0usize; dim];
        'outer: loop {
            let point =
                Array1::from_iter((0..dim).map(|axis| xs[index[axis]] + center[axis]));
            if self.contains(point.view()) {
                points.push(point);
            }
            // odometer increment, last axis fastest
            let mut axis = dim;
            loop {
                if axis == 0 {
                    break 'outer;
                }
                axis -= 1;
                index[axis] += 1;
                if index[axis] < xs.len() {
                    break;
                }
                index[axis] = 0;
            }
        }
        points
    }

    /// Seed field for the Picard iteration: zero on the boundary, positive inside
    pub fn seed_value(&self, x: ArrayView1<f64>) -> f64 {
        let d = self.center_distance(x);
        match self {
            Domain::Ball { radius, .. } => radius - d,
            Domain::Annulus {
                inner_radius,
                outer_radius,
                ..
            } => (d - inner_radius) * (outer_radius - d),
        }
    }

    /// Whether `inner` is geometrically contained in `self`
    ///
    /// Conservative sufficient condition based on the center offset and the
    /// inner domain's outer extent; may reject exotic valid placements.
    pub fn encloses(&self, inner: &Domain) -> bool {
        if self.dim() != inner.dim() {
            return false;
        }
        let offset = self.center_distance(inner.center().view());
        let farthest = offset + inner.extent();
        let nearest = (inner.min_extent() - offset)
            .max(offset - inner.extent())
            .max(0.0);
        match self {
            Domain::Ball { radius, .. } => farthest <= *radius,
            Domain::Annulus {
                inner_radius,
                outer_radius,
                ..
            } => farthest <= *outer_radius && nearest >= *inner_radius,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Ball { center, radius } => {
                write!(f, "OpenBall ({:?}, {})", center.to_vec(), radius)
            }
            Domain::Annulus {
                center,
                inner_radius,
                outer_radius,
            } => write!(
                f,
                "OpenAnnulus ({:?}, {}, {})",
                center.to_vec(),
                inner_radius,
                outer_radius
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_ball_contains_matches_distance() {
        let ball = Domain::ball(vec![0.5, -1.0], 1.5).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let x = Array1::from(vec![rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0)]);
            let dist = ((x[0] - 0.5f64).powi(2) + (x[1] + 1.0f64).powi(2)).sqrt();
            assert_eq!(ball.contains(x.view()), dist < 1.5);
        }
    }

    #[test]
    fn test_annulus_contains_matches_distance() {
        let annulus = Domain::annulus(vec![0.0, 0.0, 0.0], 0.5, 2.0).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);

        for _ in 0..100 {
            let x = Array1::from(vec![
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
            ]);
            let dist = x.iter().map(|a| a * a).sum::<f64>().sqrt();
            assert_eq!(annulus.contains(x.view()), 0.5 < dist && dist < 2.0);
        }
    }

    #[test]
    fn test_grid_is_deterministic() {
        let ball = Domain::ball(vec![0.0, 0.0], 1.0).unwrap();
        let grid1 = ball.generate_grid(0.25);
        let grid2 = ball.generate_grid(0.25);

        assert!(!grid1.is_empty());
        assert_eq!(grid1.len(), grid2.len());
        for (a, b) in grid1.iter().zip(grid2.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_grid_points_lie_inside() {
        let annulus = Domain::annulus(vec![1.0], 0.25, 1.0).unwrap();
        let grid = annulus.generate_grid(0.1);

        assert!(!grid.is_empty());
        for p in &grid {
            assert!(annulus.contains(p.view()));
        }
    }

    #[test]
    fn test_grid_lattice_count_1d() {
        // xs spans [-1, 1] with round(2/0.5)+1 = 5 coordinates; the two
        // boundary points are filtered out
        let ball = Domain::ball(vec![0.0], 1.0).unwrap();
        let grid = ball.generate_grid(0.5);
        let coords: Vec<f64> = grid.iter().map(|p| p[0]).collect();
        assert_eq!(coords, vec![-0.5, 0.0, 0.5]);
    }

    #[test]
    fn test_seed_value_sign() {
        let ball = Domain::ball(vec![0.0], 1.0).unwrap();
        assert!(ball.seed_value(Array1::from(vec![0.0]).view()) > 0.0);
        assert!(ball.seed_value(Array1::from(vec![1.0]).view()).abs() < 1e-12);

        let annulus = Domain::annulus(vec![0.0], 0.5, 1.5).unwrap();
        assert!(annulus.seed_value(Array1::from(vec![1.0]).view()) > 0.0);
        assert!(annulus.seed_value(Array1::from(vec![0.5]).view()).abs() < 1e-12);
    }

    #[test]
    fn test_encloses() {
        let outer = Domain::ball(vec![0.0, 0.0], 2.0).unwrap();
        let inner = Domain::ball(vec![0.5, 0.0], 1.0).unwrap();
        let too_big = Domain::ball(vec![0.5, 0.0], 1.9).unwrap();

        assert!(outer.encloses(&inner));
        assert!(!outer.encloses(&too_big));
        assert!(!outer.encloses(&Domain::ball(vec![0.0], 1.0).unwrap()));

        let ring = Domain::annulus(vec![0.0, 0.0], 0.5, 2.0).unwrap();
        let band = Domain::annulus(vec![0.0, 0.0], 0.75, 1.75).unwrap();
        assert!(ring.encloses(&band));
        assert!(!ring.encloses(&Domain::ball(vec![0.0, 0.0], 1.0).unwrap()));
    }

    #[test]
    fn test_degenerate_annulus_rejected() {
        assert!(Domain::annulus(vec![0.0], 1.0, 1.0).is_err());
        assert!(Domain::annulus(vec![0.0], 2.0, 1.0).is_err());
        assert!(Domain::ball(vec![0.0], 0.0).is_err());
        assert!(Domain::ball(vec![], 1.0).is_err());
    }
}
