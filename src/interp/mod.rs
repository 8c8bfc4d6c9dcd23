//! Spatial interpolation of scan sites onto a regular mesh.
//!
//! Sites are sampled on polar coordinates but the interpolant is always fitted
//! in Cartesian space, which avoids the seam at θ = 0 / 2π. The mesh spans the
//! bounding box of the samples and can be returned either as (x, y) or
//! converted node-by-node to (r, θ).
//!
//! # Pipeline
//!
//! ```text
//! (r, θ) sites → (x, y) → cubic RBF fit → P×P mesh → evaluate → optional (r, θ)
//! ```
//!
//! # Example
//!
//! ```rust
//! use ellipsomap::interp::{interp_grid, CoordinateMode};
//!
//! let radius = [0.0, 10.0, 10.0, 10.0, 10.0];
//! let angle = [0.0, 0.0, 1.5707963, 3.1415926, 4.712389];
//! let thickness = [100.0, 101.0, 102.0, 103.0, 104.0];
//!
//! let grid = interp_grid(&radius, &angle, &thickness, CoordinateMode::Polar, 10).unwrap();
//! assert_eq!(grid.value().shape(), (10, 10));
//! ```

pub mod rbf;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use rbf::CubicRbf;

use crate::report::ScanReport;

/// Interpolation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpError {
    #[error("grid resolution must be at least 1, got {points}")]
    InvalidGridResolution { points: usize },

    #[error("cannot fit cubic RBF to {points} points (need {} non-collinear)", CubicRbf::MIN_POINTS)]
    InterpolationSingular { points: usize },

    #[error("samples have zero extent along the {axis} axis")]
    DegenerateDomain { axis: char },

    #[error("site arrays differ in length: {radius} radius, {angle} angle, {thickness} thickness")]
    LengthMismatch {
        radius: usize,
        angle: usize,
        thickness: usize,
    },
}

pub type Result<T> = std::result::Result<T, InterpError>;

/// Coordinate system of the returned mesh axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateMode {
    /// `axis1` = x, `axis2` = y.
    #[default]
    Cartesian,
    /// `axis1` = r, `axis2` = θ in (−π, π].
    Polar,
}

impl CoordinateMode {
    pub fn from_polar_flag(polar: bool) -> Self {
        if polar {
            Self::Polar
        } else {
            Self::Cartesian
        }
    }

    /// Column names for tabular output.
    pub fn axis_names(self) -> [&'static str; 2] {
        match self {
            Self::Cartesian => ["x", "y"],
            Self::Polar => ["r", "theta"],
        }
    }
}

/// Dense thickness map on a P×P mesh.
///
/// Row `i` follows the y axis and column `j` the x axis of the underlying
/// Cartesian mesh, so `value[(i, j)]` is the thickness at `(xs[j], ys[i])`.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedGrid {
    mode: CoordinateMode,
    axis1: DMatrix<f64>,
    axis2: DMatrix<f64>,
    value: DMatrix<f64>,
}

impl InterpolatedGrid {
    pub fn mode(&self) -> CoordinateMode {
        self.mode
    }

    /// x (Cartesian) or r (polar) at each node.
    pub fn axis1(&self) -> &DMatrix<f64> {
        &self.axis1
    }

    /// y (Cartesian) or θ (polar) at each node.
    pub fn axis2(&self) -> &DMatrix<f64> {
        &self.axis2
    }

    pub fn value(&self) -> &DMatrix<f64> {
        &self.value
    }

    /// Mesh points per axis.
    pub fn points(&self) -> usize {
        self.value.nrows()
    }

    /// Iterate nodes row-major as `(axis1, axis2, value)`.
    pub fn nodes(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        let p = self.points();
        (0..p).flat_map(move |i| {
            (0..p).map(move |j| (self.axis1[(i, j)], self.axis2[(i, j)], self.value[(i, j)]))
        })
    }
}

/// Polar to Cartesian.
pub fn to_cartesian(r: f64, theta: f64) -> (f64, f64) {
    (r * theta.cos(), r * theta.sin())
}

/// Cartesian to polar, θ from `atan2` in (−π, π].
pub fn to_polar(x: f64, y: f64) -> (f64, f64) {
    (x.hypot(y), y.atan2(x))
}

/// `count` evenly spaced values from `start` to `stop` inclusive.
///
/// A single value is `start`; zero values is empty.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        stop
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// Interpolate site thicknesses onto a `points`×`points` mesh.
///
/// `angle` is in radians. The mesh spans the Cartesian bounding box of the
/// sites; `mode` only changes how node coordinates are reported.
pub fn interp_grid(
    radius: &[f64],
    angle: &[f64],
    thickness: &[f64],
    mode: CoordinateMode,
    points: usize,
) -> Result<InterpolatedGrid> {
    if points < 1 {
        return Err(InterpError::InvalidGridResolution { points });
    }
    if radius.len() != angle.len() || radius.len() != thickness.len() {
        return Err(InterpError::LengthMismatch {
            radius: radius.len(),
            angle: angle.len(),
            thickness: thickness.len(),
        });
    }

    let sites: Vec<[f64; 2]> = radius
        .iter()
        .zip(angle)
        .map(|(&r, &theta)| {
            let (x, y) = to_cartesian(r, theta);
            [x, y]
        })
        .collect();

    let xs = axis_span(&sites, 0, 'x', points)?;
    let ys = axis_span(&sites, 1, 'y', points)?;
    let rbf = CubicRbf::fit(&sites, thickness)?;

    let x_mesh = DMatrix::from_fn(points, points, |_, j| xs[j]);
    let y_mesh = DMatrix::from_fn(points, points, |i, _| ys[i]);
    let value = DMatrix::from_fn(points, points, |i, j| rbf.evaluate(xs[j], ys[i]));

    let (axis1, axis2) = match mode {
        CoordinateMode::Cartesian => (x_mesh, y_mesh),
        CoordinateMode::Polar => (
            x_mesh.zip_map(&y_mesh, |x, y| to_polar(x, y).0),
            x_mesh.zip_map(&y_mesh, |x, y| to_polar(x, y).1),
        ),
    };

    debug!(sites = sites.len(), points, ?mode, "interpolated grid");

    Ok(InterpolatedGrid {
        mode,
        axis1,
        axis2,
        value,
    })
}

/// Mesh coordinates along one Cartesian axis of the sample bounding box.
fn axis_span(sites: &[[f64; 2]], axis: usize, name: char, points: usize) -> Result<Vec<f64>> {
    if sites.is_empty() {
        return Err(InterpError::InterpolationSingular { points: 0 });
    }

    let (lo, hi) = sites
        .iter()
        .map(|s| s[axis])
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if hi - lo <= f64::EPSILON * lo.abs().max(hi.abs()).max(1.0) {
        return Err(InterpError::DegenerateDomain { axis: name });
    }

    Ok(linspace(lo, hi, points))
}

impl ScanReport {
    /// Interpolate this report's sites onto a `points`×`points` mesh.
    pub fn interp_grid(&self, polar: bool, points: usize) -> Result<InterpolatedGrid> {
        interp_grid(
            self.radius(),
            self.angle(),
            self.thickness(),
            CoordinateMode::from_polar_flag(polar),
            points,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    /// Center site plus two rings, thickness rising toward the edge.
    fn wafer() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let mut radius = vec![0.0];
        let mut angle = vec![0.0];
        for (ring, count) in [(25.0, 6), (50.0, 12)] {
            for k in 0..count {
                radius.push(ring);
                angle.push(2.0 * PI * f64::from(k) / f64::from(count));
            }
        }
        let thickness = radius
            .iter()
            .zip(&angle)
            .map(|(r, a)| 1000.0 + 0.01 * r * r + 2.0 * a.sin())
            .collect();
        (radius, angle, thickness)
    }

    #[test]
    fn grid_shape_matches_resolution() {
        let (r, a, t) = wafer();
        let grid = interp_grid(&r, &a, &t, CoordinateMode::Cartesian, 10).unwrap();
        assert_eq!(grid.points(), 10);
        assert_eq!(grid.axis1().shape(), (10, 10));
        assert_eq!(grid.axis2().shape(), (10, 10));
        assert_eq!(grid.value().shape(), (10, 10));
        assert_eq!(grid.nodes().count(), 100);
    }

    #[test]
    fn mesh_spans_bounding_box() {
        let (r, a, t) = wafer();
        let grid = interp_grid(&r, &a, &t, CoordinateMode::Cartesian, 5).unwrap();
        let x = grid.axis1();
        let y = grid.axis2();
        assert!((x[(0, 0)] + 50.0).abs() < 1e-9);
        assert!((x[(0, 4)] - 50.0).abs() < 1e-9);
        assert!((y[(0, 0)] + 50.0).abs() < 1e-9);
        assert!((y[(4, 0)] - 50.0).abs() < 1e-9);
        // x varies along columns only, y along rows only
        assert_eq!(x[(0, 2)], x[(3, 2)]);
        assert_eq!(y[(2, 0)], y[(2, 3)]);
    }

    #[test]
    fn grid_passes_through_center_site() {
        let (r, a, t) = wafer();
        // Odd resolution puts a node on (0, 0), the center site.
        let grid = interp_grid(&r, &a, &t, CoordinateMode::Cartesian, 11).unwrap();
        assert!(grid.axis1()[(5, 5)].abs() < 1e-9);
        assert!(grid.axis2()[(5, 5)].abs() < 1e-9);
        assert!((grid.value()[(5, 5)] - t[0]).abs() < 1e-6);
    }

    #[test]
    fn interpolant_reproduces_every_site() {
        let (r, a, t) = wafer();
        let sites: Vec<[f64; 2]> = r
            .iter()
            .zip(&a)
            .map(|(&r, &a)| {
                let (x, y) = to_cartesian(r, a);
                [x, y]
            })
            .collect();
        let rbf = CubicRbf::fit(&sites, &t).unwrap();
        for (site, want) in sites.iter().zip(&t) {
            assert!((rbf.evaluate(site[0], site[1]) - want).abs() < 1e-6);
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let (r, a, t) = wafer();
        let first = interp_grid(&r, &a, &t, CoordinateMode::Polar, 12).unwrap();
        let second = interp_grid(&r, &a, &t, CoordinateMode::Polar, 12).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn polar_mode_converts_nodes() {
        let (r, a, t) = wafer();
        let cart = interp_grid(&r, &a, &t, CoordinateMode::Cartesian, 7).unwrap();
        let polar = interp_grid(&r, &a, &t, CoordinateMode::Polar, 7).unwrap();
        assert_eq!(polar.mode(), CoordinateMode::Polar);
        assert_eq!(cart.value(), polar.value());
        for i in 0..7 {
            for j in 0..7 {
                let (rr, th) = to_polar(cart.axis1()[(i, j)], cart.axis2()[(i, j)]);
                assert_eq!(polar.axis1()[(i, j)], rr);
                assert_eq!(polar.axis2()[(i, j)], th);
                assert!(th > -PI - 1e-12 && th <= PI);
            }
        }
    }

    #[test]
    fn polar_transform_of_unit_axes() {
        let (r, th) = to_polar(1.0, 0.0);
        assert!((r - 1.0).abs() < 1e-12 && th.abs() < 1e-12);
        let (r, th) = to_polar(0.0, 1.0);
        assert!((r - 1.0).abs() < 1e-12 && (th - FRAC_PI_2).abs() < 1e-12);
        let (x, y) = to_cartesian(2.0_f64.sqrt(), FRAC_PI_4);
        assert!((x - 1.0).abs() < 1e-12 && (y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn linspace_matches_numpy() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(-3.0, 3.0, 1), vec![-3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn zero_resolution_is_rejected() {
        let (r, a, t) = wafer();
        assert_eq!(
            interp_grid(&r, &a, &t, CoordinateMode::Cartesian, 0),
            Err(InterpError::InvalidGridResolution { points: 0 })
        );
    }

    #[test]
    fn single_node_grid_sits_at_box_corner() {
        let (r, a, t) = wafer();
        let grid = interp_grid(&r, &a, &t, CoordinateMode::Cartesian, 1).unwrap();
        assert_eq!(grid.value().shape(), (1, 1));
        assert!((grid.axis1()[(0, 0)] + 50.0).abs() < 1e-9);
    }

    #[test]
    fn too_few_sites_is_singular() {
        let r = [0.0, 10.0, 10.0];
        let a = [0.0, 0.0, FRAC_PI_2];
        let t = [1.0, 2.0, 3.0];
        assert_eq!(
            interp_grid(&r, &a, &t, CoordinateMode::Cartesian, 10),
            Err(InterpError::InterpolationSingular { points: 3 })
        );
    }

    #[test]
    fn identical_sites_are_degenerate() {
        let r = [5.0; 6];
        let a = [0.0; 6];
        let t = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(
            interp_grid(&r, &a, &t, CoordinateMode::Cartesian, 10),
            Err(InterpError::DegenerateDomain { axis: 'x' })
        );
    }

    #[test]
    fn sites_on_a_line_are_degenerate() {
        let r = [0.0, 10.0, 20.0, 30.0, 40.0];
        let a = [0.0; 5];
        let t = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(
            interp_grid(&r, &a, &t, CoordinateMode::Cartesian, 10),
            Err(InterpError::DegenerateDomain { axis: 'y' })
        );
    }

    #[test]
    fn report_convenience_uses_polar_flag() {
        let report = ScanReport::parse(
            "Mean 1.0 StdDev 0.1 \
             R= 0, Theta= 0, Thick1= 10.0, \
             R= 10, Theta= 0, Thick1= 11.0, \
             R= 10, Theta= 90, Thick1= 12.0, \
             R= 10, Theta= 180, No Solution \
             R= 10, Theta= 270, Thick1= 14.0,",
        )
        .unwrap();
        let grid = report.interp_grid(true, 8).unwrap();
        assert_eq!(grid.mode(), CoordinateMode::Polar);
        assert_eq!(grid.value().shape(), (8, 8));
        assert!(grid.value().iter().all(|v| v.is_finite()));
    }
}
