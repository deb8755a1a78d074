//! Dense products on row-major buffers.
//!
//! | Level | Kernel | Matrix method |
//! |-------|--------|---------------|
//! | L1 | [`dot`] | [`Vector::dot`](crate::Vector::dot) |
//! | L2 | [`gemv`] | [`Matrix::dot`] |
//! | L3 | [`gemm`] | [`Matrix::matmul`] |
//!
//! The kernels take raw slices and trust their shapes; the [`Matrix`]
//! methods validate shapes first. `matmul` goes through the active
//! [`Backend`](crate::Backend).

use crate::backend;
use crate::error::{CoreError, Result};
use crate::matrix::{ColumnVector, Matrix};

// ======================================================================
// Kernels
// ======================================================================

/// Inner product `sum(x_i * y_i)` over the shorter of the two slices.
///
/// ```
/// # use tessera_core::linalg::blas::dot;
/// assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
/// ```
#[inline]
pub fn dot(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y).fold(0.0, |acc, (&a, &b)| acc + a * b)
}

/// `y = A x` for a row-major `m x n` matrix `a`.
pub fn gemv(a: &[f64], m: usize, n: usize, x: &[f64]) -> Vec<f64> {
    (0..m).map(|i| dot(&a[i * n..(i + 1) * n], x)).collect()
}

/// `C = A B` for row-major `A (m x k)` and `B (k x n)`.
pub fn gemm(a: &[f64], b: &[f64], m: usize, k: usize, n: usize) -> Vec<f64> {
    let mut c = vec![0.0; m * n];

    // ikj loop order keeps the inner loop contiguous in B and C
    for i in 0..m {
        let c_row = &mut c[i * n..(i + 1) * n];
        for p in 0..k {
            let a_ip = a[i * k + p];
            let b_row = &b[p * n..(p + 1) * n];
            for (cij, &bpj) in c_row.iter_mut().zip(b_row) {
                *cij += a_ip * bpj;
            }
        }
    }

    c
}

/// Reference matrix product used by the default [`Backend`](crate::Backend).
pub(crate) fn matmul(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    let (m, k) = a.shape();
    let (k2, n) = b.shape();
    if k != k2 {
        return Err(CoreError::DimensionMismatch {
            expected: vec![k, n],
            got: vec![k2, n],
        });
    }
    let c = gemm(a.as_slice(), b.as_slice(), m, k, n);
    Ok(Matrix::from_vec_unchecked(c, m, n))
}

// ======================================================================
// Matrix methods
// ======================================================================

impl Matrix {
    /// Matrix product `(m x k) (k x n) -> (m x n)`.
    ///
    /// Fails with [`CoreError::DimensionMismatch`] when the inner dimensions
    /// differ.
    ///
    /// ```
    /// # use tessera_core::Matrix;
    /// let a = Matrix::build(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// let b = Matrix::build(&[[5.0], [6.0]]).unwrap();
    /// assert_eq!(a.matmul(&b).unwrap().as_slice(), &[17.0, 39.0]);
    /// ```
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        backend::active().matmul(self, other)
    }

    /// Dot every row with `v`, giving an `m`-element column.
    ///
    /// `v` must have `n` elements.
    pub fn dot<V: AsRef<[f64]>>(&self, v: &V) -> Result<ColumnVector> {
        let v = v.as_ref();
        let (m, n) = self.shape();
        if v.len() != n {
            return Err(CoreError::DimensionMismatch {
                expected: vec![n],
                got: vec![v.len()],
            });
        }
        Ok(ColumnVector::quick(gemv(self.as_slice(), m, n, v)))
    }
}
