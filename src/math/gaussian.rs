use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::math::matrix::Matrix;

/// A 2-D Gaussian given by its mean and a 2x2 "covariance" matrix.
///
/// The matrix is stored as written and may be non-symmetric. Sampling uses
/// the PSD square root `sqrt(CᵀC)` as the effective covariance, which is what
/// a decomposition-based sampler ends up drawing from. `kernel` uses the
/// inverse of the raw matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gaussian2 {
    pub mean: [f64; 2],
    pub cov: [[f64; 2]; 2],
}

impl Gaussian2 {
    pub const fn new(mean: [f64; 2], cov: [[f64; 2]; 2]) -> Self {
        Gaussian2 { mean, cov }
    }

    /// Symmetric PSD covariance actually sampled from.
    pub fn effective_covariance(&self) -> [[f64; 2]; 2] {
        let [[a, b], [c, d]] = self.cov;
        // CᵀC
        let m00 = a * a + c * c;
        let m01 = a * b + c * d;
        let m11 = b * b + d * d;

        // sqrt of a 2x2 PSD matrix: (M + sI) / t, s = sqrt(det), t = sqrt(tr + 2s).
        let s = (m00 * m11 - m01 * m01).max(0.0).sqrt();
        let t = (m00 + m11 + 2.0 * s).sqrt();
        if t == 0.0 {
            return [[0.0, 0.0], [0.0, 0.0]];
        }
        [[(m00 + s) / t, m01 / t], [m01 / t, (m11 + s) / t]]
    }

    /// Lower Cholesky factor of the effective covariance.
    fn cholesky(&self) -> [[f64; 2]; 2] {
        let [[a, b], [_, c]] = self.effective_covariance();
        let l11 = a.max(0.0).sqrt();
        let l21 = if l11 > 0.0 { b / l11 } else { 0.0 };
        let l22 = (c - l21 * l21).max(0.0).sqrt();
        [[l11, 0.0], [l21, l22]]
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> [f64; 2] {
        let l = self.cholesky();
        let z0 = Matrix::sample_standard_normal(rng);
        let z1 = Matrix::sample_standard_normal(rng);
        [
            self.mean[0] + l[0][0] * z0,
            self.mean[1] + l[1][0] * z0 + l[1][1] * z1,
        ]
    }

    pub fn sample_n<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<[f64; 2]> {
        (0..n).map(|_| self.sample(rng)).collect()
    }

    /// Unnormalized density `exp(-0.5 (x - m) C⁻¹ (x - m)ᵀ)`.
    pub fn kernel(&self, x: [f64; 2]) -> f64 {
        let [[a, b], [c, d]] = self.cov;
        let det = a * d - b * c;
        let dx = [x[0] - self.mean[0], x[1] - self.mean[1]];
        // Row vector times inverse: [dx0, dx1] · [[d, -b], [-c, a]] / det
        let r0 = (dx[0] * d - dx[1] * c) / det;
        let r1 = (-dx[0] * b + dx[1] * a) / det;
        (-0.5 * (r0 * dx[0] + r1 * dx[1])).exp()
    }
}
