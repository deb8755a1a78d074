//! Linear algebra on [`Matrix`].
//!
//! All routines are implemented from scratch, with no BLAS/LAPACK bindings.
//!
//! | Operation | Built on | Fails with |
//! |-----------|----------|------------|
//! | [`Matrix::matmul`], [`Matrix::dot`] | [`blas`] | `DimensionMismatch` |
//! | [`Matrix::row_echelon`], [`Matrix::reduced_row_echelon`] | [`Ref`], [`Rref`] | never |
//! | [`Matrix::lu`], [`solve`], [`inverse`] | [`Lu`] | `NotSquare`, `SingularMatrix` |
//! | [`Matrix::cholesky`] | [`Cholesky`] | `NotSquare`, `NotPositiveDefinite` |
//! | [`Matrix::eig`] | [`Eigen`] | `NotSquare` (otherwise best effort) |
//! | [`det`], [`rank`] | [`Ref`] | `NotSquare` (det only) |
//!
//! Decompositions reached through `Matrix` methods run on the active
//! [`Backend`](crate::Backend).

pub mod blas;
pub mod decomp;

pub use decomp::{Cholesky, Eigen, Lu, Ref, Rref};

use crate::backend;
use crate::error::Result;
use crate::matrix::{ColumnVector, Matrix};

/// Solve `Ax = b` for a square, non-singular `A`.
///
/// Pivots are judged against the active backend's [`Config`](crate::Config)
/// pivot tolerance, by default `eps * n * max|a_ij|`. This is numerical rank:
/// a pivot tiny relative to the largest entry counts as zero, so
/// `diag(1e8, 1e-8)` is reported singular even though its exact inverse
/// exists. Use [`Lu::decompose_with`] or [`Ref::decompose_with`] with an
/// explicit tolerance for badly scaled input.
///
/// ```
/// # use tessera_core::{linalg, Matrix, Vector};
/// let a = Matrix::build(&[[2.0, 1.0], [1.0, 4.0]]).unwrap();
/// let b = Vector::build(&[5.0, 6.0]).unwrap();
/// let x = linalg::solve(&a, &b).unwrap();
/// assert!((x.as_slice()[0] - 2.0).abs() < 1e-10);
/// assert!((x.as_slice()[1] - 1.0).abs() < 1e-10);
/// ```
pub fn solve<V: AsRef<[f64]>>(a: &Matrix, b: &V) -> Result<ColumnVector> {
    a.lu()?.solve(b)
}

/// Inverse of a square, non-singular matrix.
///
/// ```
/// # use tessera_core::{linalg, Matrix};
/// let a = Matrix::build(&[[2.0, 1.0], [1.0, 4.0]]).unwrap();
/// let inv = linalg::inverse(&a).unwrap();
/// let eye = a.matmul(&inv).unwrap();
/// assert!((eye.as_slice()[0] - 1.0).abs() < 1e-10);
/// assert!(eye.as_slice()[1].abs() < 1e-10);
/// ```
pub fn inverse(a: &Matrix) -> Result<Matrix> {
    Ok(a.lu()?.inverse())
}

/// Determinant from the row echelon form; zero for singular input.
///
/// Singular means numerically rank deficient under the pivot tolerance, as
/// for [`solve`]: `det(diag(1e8, 1e-8))` is `0.0` by default.
pub fn det(a: &Matrix) -> Result<f64> {
    a.row_echelon().det()
}

/// Numerical rank from the row echelon form.
pub fn rank(a: &Matrix) -> usize {
    a.row_echelon().rank()
}

/// `|a_ij - a_ji| <= tol` for every pair.
pub(crate) fn is_symmetric(a: &Matrix, tol: f64) -> bool {
    let (m, n) = a.shape();
    if m != n {
        return false;
    }
    let data = a.as_slice();
    (0..n).all(|i| ((i + 1)..n).all(|j| (data[i * n + j] - data[j * n + i]).abs() <= tol))
}

impl Matrix {
    // ------------------------------------------------------------------
    // Decompositions
    // ------------------------------------------------------------------

    /// Row echelon form.
    pub fn row_echelon(&self) -> Ref {
        backend::active().row_echelon(self)
    }

    /// Reduced row echelon form.
    pub fn reduced_row_echelon(&self) -> Rref {
        backend::active().reduced_row_echelon(self)
    }

    /// LU decomposition with partial pivoting.
    pub fn lu(&self) -> Result<Lu> {
        backend::active().lu(self)
    }

    /// Cholesky decomposition of a symmetric positive-definite matrix.
    pub fn cholesky(&self) -> Result<Cholesky> {
        backend::active().cholesky(self)
    }

    /// Eigenvalues and eigenvectors (best effort, see [`Eigen`]).
    pub fn eig(&self) -> Result<Eigen> {
        backend::active().eig(self)
    }

    // ------------------------------------------------------------------
    // Derived quantities
    // ------------------------------------------------------------------

    /// Solve `self * x = b`. See [`solve`] for how singularity is judged.
    pub fn solve<V: AsRef<[f64]>>(&self, b: &V) -> Result<ColumnVector> {
        solve(self, b)
    }

    /// See [`inverse`].
    pub fn inverse(&self) -> Result<Matrix> {
        inverse(self)
    }

    /// See [`det`]; a numerically rank-deficient matrix has determinant 0.
    ///
    /// ```
    /// # use tessera_core::Matrix;
    /// let a = Matrix::build(&[[22.0, -17.0, 12.0], [4.0, 11.0, -2.0], [20.0, -6.0, -9.0]]).unwrap();
    /// assert!((a.det().unwrap() + 5302.0).abs() < 1e-9);
    /// ```
    pub fn det(&self) -> Result<f64> {
        det(self)
    }

    pub fn rank(&self) -> usize {
        rank(self)
    }

    /// `rank == min(m, n)`
    pub fn full_rank(&self) -> bool {
        self.rank() == self.m().min(self.n())
    }

    // ------------------------------------------------------------------
    // Predicates
    // ------------------------------------------------------------------

    /// Square and equal to its transpose within the active backend's
    /// symmetry tolerance.
    pub fn symmetric(&self) -> bool {
        is_symmetric(self, backend::active().config().symmetry_tolerance())
    }

    /// Symmetric and Cholesky succeeds.
    pub fn positive_definite(&self) -> bool {
        self.symmetric() && self.cholesky().is_ok()
    }

    /// Symmetric and every eigenvalue is at least `-tol`, where `tol` scales
    /// the symmetry tolerance by the largest eigenvalue magnitude.
    pub fn positive_semidefinite(&self) -> bool {
        if !self.symmetric() {
            return false;
        }
        let Ok(eig) = self.eig() else {
            return false;
        };
        let largest = eig.eigenvalues().first().map_or(0.0, |v| v.abs());
        let base = backend::active().config().symmetry_tolerance();
        let tol = base.max(f64::EPSILON * self.n() as f64) * largest.max(1.0);
        eig.eigenvalues().iter().all(|&v| v >= -tol)
    }
}
