use faer::Mat;

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// Eigenvalues of a general square matrix.
///
/// No symmetry is assumed, so the spectrum may be complex; only the real
/// parts are returned. Large imaginary parts are logged since they mean the
/// input was far from symmetric.
pub fn real_eigenvalues(m: &Matrix) -> Result<Vec<f64>> {
    if m.rows != m.cols {
        return Err(Error::ShapeMismatch {
            expected: "square matrix".to_string(),
            found: format!("{}x{}", m.rows, m.cols),
        });
    }
    if m.rows == 0 {
        return Ok(Vec::new());
    }

    let a = Mat::<f64>::from_fn(m.rows, m.cols, |i, j| m[(i, j)]);
    let values = a
        .eigenvalues()
        .map_err(|e| Error::Eigen(format!("{e:?}")))?;

    let max_im = values.iter().map(|z| z.im.abs()).fold(0.0, f64::max);
    if max_im > 1e-6 {
        log::debug!("eigenvalues have imaginary parts up to {max_im:.3e}; keeping real parts");
    }

    Ok(values.into_iter().map(|z| z.re).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut v: Vec<f64>) -> Vec<f64> {
        v.sort_by(|a, b| a.total_cmp(b));
        v
    }

    #[test]
    fn diagonal_matrix_returns_its_diagonal() {
        let m = Matrix::from_rows(vec![
            vec![3.0, 0.0, 0.0],
            vec![0.0, -1.0, 0.0],
            vec![0.0, 0.0, 0.5],
        ]);
        let eig = sorted(real_eigenvalues(&m).unwrap());
        for (got, want) in eig.iter().zip([-1.0, 0.5, 3.0]) {
            assert!((got - want).abs() < 1e-10, "{got} vs {want}");
        }
    }

    #[test]
    fn symmetric_two_by_two() {
        // [[2, 1], [1, 2]] has eigenvalues 1 and 3.
        let m = Matrix::from_rows(vec![vec![2.0, 1.0], vec![1.0, 2.0]]);
        let eig = sorted(real_eigenvalues(&m).unwrap());
        assert!((eig[0] - 1.0).abs() < 1e-10);
        assert!((eig[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn rotation_keeps_real_parts() {
        // 90 degree rotation: eigenvalues ±i, real parts 0.
        let m = Matrix::from_rows(vec![vec![0.0, -1.0], vec![1.0, 0.0]]);
        let eig = real_eigenvalues(&m).unwrap();
        assert_eq!(eig.len(), 2);
        assert!(eig.iter().all(|x| x.abs() < 1e-10));
    }

    #[test]
    fn non_square_is_rejected() {
        let m = Matrix::zeros(2, 3);
        assert!(matches!(real_eigenvalues(&m), Err(Error::ShapeMismatch { .. })));
    }
}
