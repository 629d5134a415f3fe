//! Minimum-norm least squares through the normal equations.
//!
//! The normal matrix `G = XᵀX` is symmetric positive semi-definite, so it is
//! diagonalized with cyclic Jacobi rotations and inverted on its numerically
//! non-zero spectrum only. For a rank-deficient `G` this yields the solution
//! of `G w = b` with the smallest Euclidean norm, i.e. `w = G⁺ b`.

use crate::error::{Error, Result};
use ndarray::{Array1, Array2};

const MAX_SWEEPS: usize = 100;

/// Eigen-decomposition of a symmetric matrix: `a = v · diag(values) · vᵀ`.
///
/// Eigenvectors are the columns of the returned matrix.
pub(crate) fn symmetric_eigen(mut a: Array2<f64>) -> Result<(Array1<f64>, Array2<f64>)> {
    let n = a.nrows();
    if a.ncols() != n {
        return Err(Error::FeatureMismatch {
            expected: n,
            got: a.ncols(),
        });
    }
    let mut v = Array2::<f64>::eye(n);

    let total: f64 = a.iter().map(|x| x * x).sum();
    let tolerance = (n as f64 * f64::EPSILON).powi(2) * total;

    for _ in 0..MAX_SWEEPS {
        let off: f64 = a
            .indexed_iter()
            .filter(|((i, j), _)| i != j)
            .map(|(_, x)| x * x)
            .sum();
        if off <= tolerance {
            return Ok((a.diag().to_owned(), v));
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let (app, aqq, apq) = (a[[p, p]], a[[q, q]], a[[p, q]]);
                if apq == 0.0 {
                    continue;
                }
                // negligible next to both diagonal entries
                let g = 100.0 * apq.abs();
                if app.abs() + g == app.abs() && aqq.abs() + g == aqq.abs() {
                    a[[p, q]] = 0.0;
                    a[[q, p]] = 0.0;
                    continue;
                }
                let theta = (aqq - app) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let (akp, akq) = (a[[k, p]], a[[k, q]]);
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..n {
                    let (apk, aqk) = (a[[p, k]], a[[q, k]]);
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }
                for k in 0..n {
                    let (vkp, vkq) = (v[[k, p]], v[[k, q]]);
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }
    }

    Err(Error::NumericalError(format!(
        "eigen-decomposition did not converge in {MAX_SWEEPS} sweeps"
    )))
}

/// Minimum-norm solution of `gram · w = rhs` for a symmetric PSD `gram`.
///
/// Eigenvalues at or below `λ_max · n · ε` are treated as zero. An all-zero
/// `gram` yields `w = 0`.
///
/// # Errors
/// [`Error::NumericalError`] on non-finite input or if the decomposition
/// does not converge; [`Error::LengthMismatch`] if `rhs` does not match.
pub fn min_norm_solve(gram: &Array2<f64>, rhs: &Array1<f64>) -> Result<Array1<f64>> {
    let n = gram.nrows();
    if rhs.len() != n {
        return Err(Error::LengthMismatch {
            expected: n,
            got: rhs.len(),
        });
    }
    if gram.iter().chain(rhs.iter()).any(|x| !x.is_finite()) {
        return Err(Error::NumericalError(
            "normal equations contain non-finite values".to_string(),
        ));
    }

    let (values, vectors) = symmetric_eigen(gram.clone())?;
    let mut w = Array1::<f64>::zeros(n);

    let lambda_max = values.iter().copied().fold(0.0_f64, f64::max);
    if lambda_max <= 0.0 {
        return Ok(w);
    }
    let cutoff = lambda_max * n as f64 * f64::EPSILON;

    for (i, &lambda) in values.iter().enumerate() {
        if lambda > cutoff {
            let vi = vectors.column(i);
            let coef = vi.dot(rhs) / lambda;
            w.scaled_add(coef, &vi);
        }
    }
    Ok(w)
}
