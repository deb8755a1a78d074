//! Cholesky decomposition for symmetric positive-definite matrices.
//!
//! Decomposes a symmetric positive-definite matrix `A` into `A = L L^T`
//! where `L` is lower triangular with positive diagonal entries. Only the
//! lower triangle of `A` is read.

use crate::config::Config;
use crate::error::{CoreError, Result};
use crate::matrix::{ColumnVector, Matrix};

/// Result of a Cholesky decomposition.
#[derive(Debug, Clone)]
pub struct Cholesky {
    /// Lower triangular factor stored as a flat n x n array.
    l: Vec<f64>,
    n: usize,
}

#[allow(clippy::many_single_char_names)]
impl Cholesky {
    /// Compute `A = L L^T`.
    ///
    /// ```
    /// # use tessera_core::{Cholesky, Matrix};
    /// let a = Matrix::build(&[[4.0, 2.0], [2.0, 3.0]]).unwrap();
    /// let chol = Cholesky::decompose(&a).unwrap();
    /// let l = chol.l();
    /// let prod = l.matmul(&l.transpose()).unwrap();
    /// assert!((prod.as_slice()[0] - 4.0).abs() < 1e-10);
    /// ```
    pub fn decompose(a: &Matrix) -> Result<Self> {
        Self::decompose_with(a, &Config::default())
    }

    /// Compute `A = L L^T`, rejecting radicands at or below the explicit
    /// pivot tolerance of `config` (zero when none is set).
    pub fn decompose_with(a: &Matrix, config: &Config) -> Result<Self> {
        let n = a.require_square("Cholesky decomposition")?;
        let floor = config.pivot_tolerance(n, n, 0.0);
        let a = a.as_slice();
        let mut l = vec![0.0; n * n];

        for j in 0..n {
            let mut sum = a[j * n + j];
            for k in 0..j {
                sum -= l[j * n + k] * l[j * n + k];
            }
            if sum <= floor {
                log::debug!("Cholesky decomposition: radicand {sum:e} at row {j}");
                return Err(CoreError::NotPositiveDefinite { row: j });
            }
            l[j * n + j] = sum.sqrt();

            let diag = l[j * n + j];
            for i in (j + 1)..n {
                let mut sum = a[i * n + j];
                for k in 0..j {
                    sum -= l[i * n + k] * l[j * n + k];
                }
                l[i * n + j] = sum / diag;
            }
        }

        Ok(Self { l, n })
    }

    /// The lower triangular factor `L`.
    pub fn l(&self) -> Matrix {
        Matrix::from_vec_unchecked(self.l.clone(), self.n, self.n)
    }

    /// Solve `Ax = b`: `L y = b` forward, then `L^T x = y` backward.
    pub fn solve<V: AsRef<[f64]>>(&self, b: &V) -> Result<ColumnVector> {
        let b = b.as_ref();
        if b.len() != self.n {
            return Err(CoreError::DimensionMismatch {
                expected: vec![self.n],
                got: vec![b.len()],
            });
        }
        let mut x = b.to_vec();
        self.substitute(&mut x);
        Ok(ColumnVector::quick(x))
    }

    /// The inverse of `A`, one unit column at a time.
    pub fn inverse(&self) -> Matrix {
        let n = self.n;
        let mut inv = vec![0.0; n * n];
        let mut x = vec![0.0; n];

        for col in 0..n {
            x.fill(0.0);
            x[col] = 1.0;
            self.substitute(&mut x);
            for (row, &v) in x.iter().enumerate() {
                inv[row * n + col] = v;
            }
        }

        Matrix::from_vec_unchecked(inv, n, n)
    }

    /// `log(det(A)) = 2 * sum(log(diag(L)))`
    pub fn log_det(&self) -> f64 {
        let n = self.n;
        let sum: f64 = (0..n).map(|i| self.l[i * n + i].ln()).sum();
        sum + sum
    }

    #[allow(clippy::needless_range_loop)]
    fn substitute(&self, x: &mut [f64]) {
        let n = self.n;

        for i in 0..n {
            for j in 0..i {
                let l_xj = self.l[i * n + j] * x[j];
                x[i] -= l_xj;
            }
            x[i] /= self.l[i * n + i];
        }

        for i in (0..n).rev() {
            for j in (i + 1)..n {
                let lt_xj = self.l[j * n + i] * x[j];
                x[i] -= lt_xj;
            }
            x[i] /= self.l[i * n + i];
        }
    }
}
