//! LU decomposition with partial pivoting.
//!
//! Decomposes a square matrix `A` into `PA = LU` where:
//! - `P` is a permutation matrix (stored as a pivot vector)
//! - `L` is lower triangular with unit diagonal, holding the row multipliers
//! - `U` is upper triangular and equal to the row echelon form of `A`

use crate::config::Config;
use crate::error::{CoreError, Result};
use crate::matrix::{ColumnVector, Matrix};

/// Result of an LU decomposition with partial pivoting.
///
/// Stores the factorization `PA = LU` in compact form: `L` and `U` are
/// packed into a single matrix (the unit diagonal of `L` is implicit),
/// and the permutation is stored as a pivot index vector.
#[derive(Debug, Clone)]
pub struct Lu {
    /// Packed LU matrix: lower triangle holds L (without diagonal),
    /// upper triangle (including diagonal) holds U.
    lu: Vec<f64>,
    /// Row `i` of `PA` is row `pivots[i]` of `A`.
    pivots: Vec<usize>,
    n: usize,
    swaps: usize,
}

impl Lu {
    /// Perform LU decomposition with partial pivoting on a square matrix.
    ///
    /// ```
    /// # use tessera_core::{Lu, Matrix};
    /// let a = Matrix::build(&[[2.0, 1.0], [1.0, 4.0]]).unwrap();
    /// let lu = Lu::decompose(&a).unwrap();
    /// assert!((lu.det() - 7.0).abs() < 1e-10);
    /// ```
    pub fn decompose(a: &Matrix) -> Result<Self> {
        Self::decompose_with(a, &Config::default())
    }

    /// Decompose using the pivot threshold in `config`.
    pub fn decompose_with(a: &Matrix, config: &Config) -> Result<Self> {
        let n = a.require_square("LU decomposition")?;
        let tol = config.pivot_tolerance(n, n, a.max_abs());

        let mut lu = a.as_slice().to_vec();
        let mut pivots: Vec<usize> = (0..n).collect();
        let mut swaps = 0;

        for k in 0..n {
            // Find pivot: row with largest |lu[i, k]| for i >= k
            let mut max_val = lu[k * n + k].abs();
            let mut max_row = k;
            for i in (k + 1)..n {
                let val = lu[i * n + k].abs();
                if val > max_val {
                    max_val = val;
                    max_row = i;
                }
            }

            if max_val <= tol {
                log::debug!("LU decomposition: no usable pivot in column {k}");
                return Err(CoreError::SingularMatrix);
            }

            if max_row != k {
                for j in 0..n {
                    lu.swap(k * n + j, max_row * n + j);
                }
                pivots.swap(k, max_row);
                swaps += 1;
            }

            let pivot = lu[k * n + k];
            for i in (k + 1)..n {
                let factor = lu[i * n + k] / pivot;
                lu[i * n + k] = factor;

                for j in (k + 1)..n {
                    let ukj = lu[k * n + j];
                    lu[i * n + j] -= factor * ukj;
                }
            }
        }

        Ok(Self {
            lu,
            pivots,
            n,
            swaps,
        })
    }

    /// The lower triangular factor `L` (with unit diagonal).
    pub fn l(&self) -> Matrix {
        let n = self.n;
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
            data[i * n..i * n + i].copy_from_slice(&self.lu[i * n..i * n + i]);
        }
        Matrix::from_vec_unchecked(data, n, n)
    }

    /// The upper triangular factor `U`.
    pub fn u(&self) -> Matrix {
        let n = self.n;
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i..(i + 1) * n].copy_from_slice(&self.lu[i * n + i..(i + 1) * n]);
        }
        Matrix::from_vec_unchecked(data, n, n)
    }

    /// The permutation matrix `P`.
    pub fn p(&self) -> Matrix {
        let n = self.n;
        let mut data = vec![0.0; n * n];
        for (i, &pi) in self.pivots.iter().enumerate() {
            data[i * n + pi] = 1.0;
        }
        Matrix::from_vec_unchecked(data, n, n)
    }

    /// The permutation pivot vector.
    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    /// Number of row exchanges performed.
    pub fn swaps(&self) -> usize {
        self.swaps
    }

    /// `det(A) = (-1)^swaps * product(diag(U))`
    pub fn det(&self) -> f64 {
        let n = self.n;
        let product: f64 = (0..n).map(|i| self.lu[i * n + i]).product();
        if self.swaps % 2 == 0 { product } else { -product }
    }

    /// Solve `Ax = b` for any vector-like `b` of length `n`.
    pub fn solve<V: AsRef<[f64]>>(&self, b: &V) -> Result<ColumnVector> {
        let b = b.as_ref();
        if b.len() != self.n {
            return Err(CoreError::DimensionMismatch {
                expected: vec![self.n],
                got: vec![b.len()],
            });
        }

        let mut x: Vec<f64> = self.pivots.iter().map(|&pi| b[pi]).collect();
        self.substitute(&mut x);
        Ok(ColumnVector::quick(x))
    }

    /// The inverse matrix, solving `AX = I` column by column.
    pub fn inverse(&self) -> Matrix {
        let n = self.n;
        let mut inv = vec![0.0; n * n];
        let mut x = vec![0.0; n];

        for col in 0..n {
            for (xi, &pi) in x.iter_mut().zip(&self.pivots) {
                *xi = if pi == col { 1.0 } else { 0.0 };
            }
            self.substitute(&mut x);
            for (row, &v) in x.iter().enumerate() {
                inv[row * n + col] = v;
            }
        }

        Matrix::from_vec_unchecked(inv, n, n)
    }

    /// Forward then back substitution on an already permuted right-hand side.
    #[allow(clippy::needless_range_loop)]
    fn substitute(&self, x: &mut [f64]) {
        let n = self.n;

        // Ly = Pb
        for i in 1..n {
            for j in 0..i {
                let lij_xj = self.lu[i * n + j] * x[j];
                x[i] -= lij_xj;
            }
        }

        // Ux = y
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                let uij_xj = self.lu[i * n + j] * x[j];
                x[i] -= uij_xj;
            }
            x[i] /= self.lu[i * n + i];
        }
    }
}
