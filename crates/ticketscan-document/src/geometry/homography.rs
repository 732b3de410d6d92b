// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Four-point homography: exact solve of the 8-unknown linear system built
// from normalised point correspondences, with h33 fixed to 1.

use nalgebra::{Matrix3, SMatrix, SVector, Vector3};
use ticketscan_core::error::{Result, TicketScanError};

/// Below this magnitude a homogeneous `w` or determinant is treated as zero.
const SINGULAR_EPSILON: f64 = 1e-12;

/// Smallest acceptable LU pivot for the normalised correspondence system.
const PIVOT_EPSILON: f64 = 1e-9;

/// A 3×3 projective transform mapping source to destination coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Homography {
    matrix: Matrix3<f64>,
}

impl Homography {
    /// Wrap an existing matrix. Returns `None` if it is not invertible.
    pub fn from_matrix(matrix: Matrix3<f64>) -> Option<Self> {
        if matrix.determinant().abs() < SINGULAR_EPSILON || !matrix.iter().all(|v| v.is_finite()) {
            return None;
        }
        Some(Self { matrix })
    }

    /// Solve for the transform taking each `src[i]` to `dst[i]`.
    ///
    /// For every correspondence `(x, y) → (u, v)`:
    ///
    /// ```text
    /// u = (h11 x + h12 y + h13) / (h31 x + h32 y + 1)
    /// v = (h21 x + h22 y + h23) / (h31 x + h32 y + 1)
    /// ```
    ///
    /// which is linear in the eight unknowns once multiplied out. Both point
    /// sets are first normalised (centroid at the origin, mean distance √2)
    /// so the singularity test does not depend on image size. Three
    /// collinear points on either side make the system singular.
    pub fn from_correspondences(src: &[(f64, f64); 4], dst: &[(f64, f64); 4]) -> Result<Self> {
        let t_src = normalizing_transform(src);
        let t_dst = normalizing_transform(dst);
        let src_n = src.map(|(x, y)| transform_point(&t_src, x, y));
        let dst_n = dst.map(|(x, y)| transform_point(&t_dst, x, y));

        let mut a = SMatrix::<f64, 8, 8>::zeros();
        let mut b = SVector::<f64, 8>::zeros();

        for i in 0..4 {
            let (x, y) = src_n[i];
            let (u, v) = dst_n[i];

            a[(i, 0)] = x;
            a[(i, 1)] = y;
            a[(i, 2)] = 1.0;
            a[(i, 6)] = -x * u;
            a[(i, 7)] = -y * u;
            b[i] = u;

            a[(i + 4, 3)] = x;
            a[(i + 4, 4)] = y;
            a[(i + 4, 5)] = 1.0;
            a[(i + 4, 6)] = -x * v;
            a[(i + 4, 7)] = -y * v;
            b[i + 4] = v;
        }

        let lu = a.lu();
        if lu.u().diagonal().iter().any(|pivot| pivot.abs() < PIVOT_EPSILON) {
            return Err(TicketScanError::DegenerateGeometry(
                "point correspondences are collinear".into(),
            ));
        }
        let h = lu.solve(&b).ok_or_else(|| {
            TicketScanError::DegenerateGeometry("homography system has no solution".into())
        })?;

        let h_n = Matrix3::new(h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0);
        let t_dst_inv = t_dst.try_inverse().ok_or_else(|| {
            TicketScanError::DegenerateGeometry("destination normalisation failed".into())
        })?;
        let mut matrix = t_dst_inv * h_n * t_src;
        let scale = matrix[(2, 2)];
        if scale.abs() > SINGULAR_EPSILON {
            matrix /= scale;
        }

        Self::from_matrix(matrix).ok_or_else(|| {
            TicketScanError::DegenerateGeometry("homography is not invertible".into())
        })
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Map a point through the transform. Returns `None` for points sent to
    /// infinity.
    pub fn apply(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let p = self.matrix * Vector3::new(x, y, 1.0);
        if p.z.abs() < SINGULAR_EPSILON {
            return None;
        }
        Some((p.x / p.z, p.y / p.z))
    }

    /// The transform running the other way.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().and_then(Self::from_matrix)
    }
}

/// Similarity moving the centroid to the origin with mean distance √2.
fn normalizing_transform(points: &[(f64, f64); 4]) -> Matrix3<f64> {
    let cx = points.iter().map(|p| p.0).sum::<f64>() / 4.0;
    let cy = points.iter().map(|p| p.1).sum::<f64>() / 4.0;
    let mean_distance = points
        .iter()
        .map(|p| ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt())
        .sum::<f64>()
        / 4.0;

    let s = if mean_distance > SINGULAR_EPSILON {
        std::f64::consts::SQRT_2 / mean_distance
    } else {
        1.0
    };
    Matrix3::new(s, 0.0, -s * cx, 0.0, s, -s * cy, 0.0, 0.0, 1.0)
}

fn transform_point(t: &Matrix3<f64>, x: f64, y: f64) -> (f64, f64) {
    let p = t * Vector3::new(x, y, 1.0);
    (p.x / p.z, p.y / p.z)
}
