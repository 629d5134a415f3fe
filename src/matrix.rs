//! Row-sparse design matrix.
//!
//! The vectorized trip features are almost entirely zeros: every row has one
//! pickup indicator, one dropoff indicator and the distance, out of hundreds
//! of columns. [`SparseMatrix`] stores rows in compressed form (CSR) and
//! provides the handful of products the least-squares fit needs.

use crate::error::{Error, Result};
use ndarray::{Array1, Array2};

/// Compressed sparse row matrix of `f64`.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseMatrix {
    n_cols: usize,
    /// `row_offsets[i]..row_offsets[i + 1]` indexes row `i` in `indices`/`values`.
    row_offsets: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseMatrix {
    /// An empty matrix with `n_cols` columns and no rows.
    pub fn new(n_cols: usize) -> Self {
        Self {
            n_cols,
            row_offsets: vec![0],
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Append a row given as `(column, value)` pairs.
    ///
    /// # Errors
    /// [`Error::FeatureMismatch`] if a column index is out of bounds. The
    /// matrix is left unchanged.
    pub fn push_row<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let entries: Vec<(usize, f64)> = entries.into_iter().collect();
        if let Some(&(col, _)) = entries.iter().find(|(col, _)| *col >= self.n_cols) {
            return Err(Error::FeatureMismatch {
                expected: self.n_cols,
                got: col + 1,
            });
        }
        for (col, value) in entries {
            self.indices.push(col);
            self.values.push(value);
        }
        self.row_offsets.push(self.indices.len());
        Ok(())
    }

    /// Build from dense rows, keeping only non-zero entries.
    pub fn from_dense(rows: &[Vec<f64>], n_cols: usize) -> Result<Self> {
        let mut matrix = Self::new(n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(Error::FeatureMismatch {
                    expected: n_cols,
                    got: row.len(),
                });
            }
            matrix.push_row(
                row.iter()
                    .enumerate()
                    .filter(|(_, v)| **v != 0.0)
                    .map(|(j, v)| (j, *v)),
            )?;
        }
        Ok(matrix)
    }

    pub fn n_rows(&self) -> usize {
        self.row_offsets.len() - 1
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols)
    }

    /// Stored `(column, value)` pairs of row `i`.
    pub fn row(&self, i: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let range = self.row_offsets[i]..self.row_offsets[i + 1];
        self.indices[range.clone()]
            .iter()
            .copied()
            .zip(self.values[range].iter().copied())
    }

    /// All stored values, row by row.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// `X @ w`.
    pub fn dot(&self, w: &Array1<f64>) -> Result<Array1<f64>> {
        self.check_cols(w.len())?;
        Ok(Array1::from_iter(
            (0..self.n_rows()).map(|i| self.row(i).map(|(j, v)| v * w[j]).sum::<f64>()),
        ))
    }

    /// `X^T @ y`.
    pub fn tdot(&self, y: &Array1<f64>) -> Result<Array1<f64>> {
        if y.len() != self.n_rows() {
            return Err(Error::LengthMismatch {
                expected: self.n_rows(),
                got: y.len(),
            });
        }
        let mut out = Array1::zeros(self.n_cols);
        for (i, &yi) in y.iter().enumerate() {
            for (j, v) in self.row(i) {
                out[j] += v * yi;
            }
        }
        Ok(out)
    }

    /// `X^T @ X`, accumulated row by row.
    pub fn gram(&self) -> Array2<f64> {
        let mut out = Array2::zeros((self.n_cols, self.n_cols));
        for i in 0..self.n_rows() {
            for (a, va) in self.row(i) {
                for (b, vb) in self.row(i) {
                    out[[a, b]] += va * vb;
                }
            }
        }
        out
    }

    /// Mean of every column (zeros count).
    pub fn column_means(&self) -> Array1<f64> {
        let mut sums = Array1::zeros(self.n_cols);
        for (&j, &v) in self.indices.iter().zip(self.values.iter()) {
            sums[j] += v;
        }
        if self.n_rows() > 0 {
            sums /= self.n_rows() as f64;
        }
        sums
    }

    pub fn to_dense(&self) -> Array2<f64> {
        let mut out = Array2::zeros((self.n_rows(), self.n_cols));
        for i in 0..self.n_rows() {
            for (j, v) in self.row(i) {
                out[[i, j]] += v;
            }
        }
        out
    }

    fn check_cols(&self, got: usize) -> Result<()> {
        if got != self.n_cols {
            return Err(Error::FeatureMismatch {
                expected: self.n_cols,
                got,
            });
        }
        Ok(())
    }
}
