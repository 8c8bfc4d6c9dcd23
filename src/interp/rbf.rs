//! Cubic radial-basis-function interpolant over scattered 2D samples.
//!
//! The interpolant is
//!
//! ```text
//! s(p) = Σ w_i · |p - p_i|³ + c0 + c1·x̂ + c2·ŷ
//! ```
//!
//! where `x̂`, `ŷ` are the query coordinates shifted and scaled into the unit
//! box of the samples. The cubic kernel is only conditionally positive
//! definite, so the linear tail is required for a unique solution; the
//! weights satisfy `Σ w_i = Σ w_i x̂_i = Σ w_i ŷ_i = 0`.

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use super::{InterpError, Result};

/// Number of terms in the degree-1 polynomial tail (1, x, y).
pub const POLY_TERMS: usize = 3;

/// Relative tolerance on reproducing the sample values after the solve.
const FIT_TOLERANCE: f64 = 1e-6;

/// Fitted cubic RBF interpolant.
#[derive(Debug, Clone)]
pub struct CubicRbf {
    centers: Vec<[f64; 2]>,
    weights: DVector<f64>,
    poly: [f64; POLY_TERMS],
    shift: [f64; 2],
    scale: [f64; 2],
}

impl CubicRbf {
    /// Smallest sample count the fit accepts: more samples than tail terms.
    pub const MIN_POINTS: usize = POLY_TERMS + 1;

    /// Solve for the kernel weights and tail coefficients.
    ///
    /// Fails with [`InterpError::InterpolationSingular`] when there are too few
    /// samples or the samples are coincident/collinear so the system has no
    /// unique solution.
    pub fn fit(points: &[[f64; 2]], values: &[f64]) -> Result<Self> {
        let n = points.len();
        if n < Self::MIN_POINTS || values.len() != n {
            return Err(InterpError::InterpolationSingular { points: n });
        }

        let (shift, scale) = unit_box(points);
        let tail = |p: &[f64; 2]| {
            [
                1.0,
                (p[0] - shift[0]) / scale[0],
                (p[1] - shift[1]) / scale[1],
            ]
        };

        // Saddle-point system [Φ P; Pᵀ 0] [w; c] = [f; 0]
        let size = n + POLY_TERMS;
        let mut a = DMatrix::<f64>::zeros(size, size);
        for i in 0..n {
            for j in (i + 1)..n {
                let phi = kernel(distance(&points[i], &points[j]));
                a[(i, j)] = phi;
                a[(j, i)] = phi;
            }
            for (k, t) in tail(&points[i]).into_iter().enumerate() {
                a[(i, n + k)] = t;
                a[(n + k, i)] = t;
            }
        }

        let mut rhs = DVector::<f64>::zeros(size);
        rhs.rows_mut(0, n).copy_from_slice(values);

        let solution = a
            .lu()
            .solve(&rhs)
            .filter(|s| s.iter().all(|v| v.is_finite()))
            .ok_or(InterpError::InterpolationSingular { points: n })?;

        let rbf = Self {
            centers: points.to_vec(),
            weights: solution.rows(0, n).into_owned(),
            poly: [solution[n], solution[n + 1], solution[n + 2]],
            shift,
            scale,
        };

        // A nearly singular system can still produce finite weights that do
        // not interpolate; treat that the same as an exact zero pivot.
        let magnitude = values.iter().fold(1.0_f64, |m, v| m.max(v.abs()));
        let worst = points
            .iter()
            .zip(values)
            .map(|(p, v)| (rbf.evaluate(p[0], p[1]) - v).abs())
            .fold(0.0_f64, f64::max);
        if worst > FIT_TOLERANCE * magnitude {
            debug!(points = n, residual = worst, "rbf solve did not reproduce samples");
            return Err(InterpError::InterpolationSingular { points: n });
        }

        debug!(points = n, residual = worst, "fitted cubic rbf");
        Ok(rbf)
    }

    /// Evaluate the interpolant at `(x, y)`.
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        let q = [x, y];
        let radial: f64 = self
            .centers
            .iter()
            .zip(self.weights.iter())
            .map(|(c, w)| w * kernel(distance(c, &q)))
            .sum();

        radial
            + self.poly[0]
            + self.poly[1] * (x - self.shift[0]) / self.scale[0]
            + self.poly[2] * (y - self.shift[1]) / self.scale[1]
    }

    /// Number of samples the interpolant was fitted to.
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }
}

fn kernel(r: f64) -> f64 {
    r * r * r
}

fn distance(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    (a[0] - b[0]).hypot(a[1] - b[1])
}

/// Center and half-extent of the sample bounding box, per axis.
///
/// A zero-width axis keeps unit scale so the tail column degenerates to zeros
/// and the solve reports the system as singular.
fn unit_box(points: &[[f64; 2]]) -> ([f64; 2], [f64; 2]) {
    let mut shift = [0.0; 2];
    let mut scale = [1.0; 2];
    for axis in 0..2 {
        let (lo, hi) = points
            .iter()
            .map(|p| p[axis])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        shift[axis] = 0.5 * (lo + hi);
        let half = 0.5 * (hi - lo);
        if half > 0.0 {
            scale[axis] = half;
        }
    }
    (shift, scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_samples() -> (Vec<[f64; 2]>, Vec<f64>) {
        let mut points = vec![[0.0, 0.0]];
        for k in 0..8 {
            let theta = f64::from(k) * std::f64::consts::FRAC_PI_4;
            points.push([30.0 * theta.cos(), 30.0 * theta.sin()]);
        }
        let values = points
            .iter()
            .map(|p| 1000.0 + 0.05 * p[0] - 0.02 * p[1] + 0.001 * (p[0] * p[0] + p[1] * p[1]))
            .collect();
        (points, values)
    }

    #[test]
    fn reproduces_samples_exactly() {
        let (points, values) = ring_samples();
        let rbf = CubicRbf::fit(&points, &values).unwrap();
        assert_eq!(rbf.len(), points.len());
        for (p, v) in points.iter().zip(&values) {
            assert!((rbf.evaluate(p[0], p[1]) - v).abs() < 1e-6);
        }
    }

    #[test]
    fn linear_field_is_recovered_everywhere() {
        let points = vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.3, 0.6]];
        let values: Vec<f64> = points.iter().map(|p| 2.0 + 3.0 * p[0] - p[1]).collect();
        let rbf = CubicRbf::fit(&points, &values).unwrap();
        let got = rbf.evaluate(0.5, 0.25);
        assert!((got - (2.0 + 1.5 - 0.25)).abs() < 1e-6);
    }

    #[test]
    fn too_few_points_is_singular() {
        let points = vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let err = CubicRbf::fit(&points, &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, InterpError::InterpolationSingular { points: 3 }));
    }

    #[test]
    fn collinear_points_are_singular() {
        let points = vec![[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0], [4.0, 0.0]];
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!(matches!(
            CubicRbf::fit(&points, &values),
            Err(InterpError::InterpolationSingular { points: 5 })
        ));
    }

    #[test]
    fn mismatched_values_are_rejected() {
        let (points, _) = ring_samples();
        assert!(CubicRbf::fit(&points, &[1.0, 2.0]).is_err());
    }
}
