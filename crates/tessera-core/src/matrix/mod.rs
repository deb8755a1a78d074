//! Dense two-dimensional matrix with contiguous row-major storage.
//!
//! [`Matrix`] is the container every other module builds on. It owns a flat
//! `Vec<f64>` plus its `m x n` shape, and it is immutable from the outside:
//! every operation returns a freshly allocated value. [`Vector`] (a `1 x n`
//! row) and [`ColumnVector`] (an `n x 1` column) are separate types because
//! they broadcast differently against a matrix.

mod create;
mod display;
mod indexing;
mod reshape;
mod vector;

pub use create::Stack;
pub use vector::{ColumnVector, Vector};

use crate::error::{CoreError, Result};

/// An `m x n` matrix of `f64` values, `m >= 1` and `n >= 1`.
///
/// Two construction modes exist: *validated* ([`Matrix::build`],
/// [`Matrix::from_vec`]) which check shape and elements, and *unchecked*
/// ([`Matrix::quick`], [`Matrix::from_vec_unchecked`]) for producers that
/// already know their output is well-formed.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    m: usize,
    n: usize,
}

impl Matrix {
    // ------------------------------------------------------------------
    // Construction from raw parts
    // ------------------------------------------------------------------

    /// Build a matrix from nested rows, validating the literal.
    ///
    /// Fails with [`CoreError::InvalidShape`] when there are no rows, a row
    /// is empty, or rows differ in length, and with
    /// [`CoreError::InvalidElement`] when an element is NaN.
    ///
    /// ```
    /// # use tessera_core::Matrix;
    /// let a = Matrix::build(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// assert_eq!(a.shape(), (2, 2));
    /// assert!(Matrix::build(&[vec![1.0, 2.0], vec![3.0]]).is_err());
    /// ```
    pub fn build<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let m = rows.len();
        let n = rows.first().map_or(0, |row| row.as_ref().len());
        if m == 0 || n == 0 {
            return Err(CoreError::InvalidShape {
                shape: vec![m, n],
                reason: "a matrix needs at least one row and one column",
            });
        }

        let mut data = Vec::with_capacity(m * n);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(CoreError::InvalidShape {
                    shape: vec![m, row.len()],
                    reason: "all rows must have the same length",
                });
            }
            for (j, &value) in row.iter().enumerate() {
                if value.is_nan() {
                    return Err(CoreError::InvalidElement { row: i, column: j });
                }
            }
            data.extend_from_slice(row);
        }

        Ok(Self { data, m, n })
    }

    /// Build a matrix from nested rows without validation.
    ///
    /// The caller guarantees a non-empty rectangular literal.
    pub fn quick<R: AsRef<[f64]>>(rows: &[R]) -> Self {
        let m = rows.len();
        let n = rows.first().map_or(0, |row| row.as_ref().len());
        debug_assert!(rows.iter().all(|row| row.as_ref().len() == n));
        let data = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect();
        Self { data, m, n }
    }

    /// Create a matrix from a flat row-major buffer and a shape.
    ///
    /// Returns an error if `m * n` does not equal `data.len()` or a dimension
    /// is zero.
    pub fn from_vec(data: Vec<f64>, m: usize, n: usize) -> Result<Self> {
        check_dims(m, n)?;
        if m * n != data.len() {
            return Err(CoreError::InvalidShape {
                shape: vec![m, n],
                reason: "shape product does not match data length",
            });
        }
        Ok(Self { data, m, n })
    }

    /// Wrap a trusted row-major buffer without revalidating it.
    #[inline]
    pub fn from_vec_unchecked(data: Vec<f64>, m: usize, n: usize) -> Self {
        debug_assert_eq!(data.len(), m * n);
        Self { data, m, n }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The shape as `(rows, columns)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    /// The shape rendered as `"m x n"`.
    pub fn shape_string(&self) -> String {
        format!("{} x {}", self.m, self.n)
    }

    /// Number of rows.
    #[inline]
    pub fn m(&self) -> usize {
        self.m
    }

    /// Number of columns.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Total number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.m == self.n
    }

    /// A flat slice of all elements in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Consume the matrix and return the underlying buffer.
    #[inline]
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Copy the elements out as nested rows.
    pub fn as_array(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.n).map(<[f64]>::to_vec).collect()
    }

    /// Iterate over the rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.n)
    }

    // ------------------------------------------------------------------
    // Map / reduce
    // ------------------------------------------------------------------

    /// Apply a function to every element, returning a new matrix.
    pub fn map<F>(&self, f: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            data: self.data.iter().map(|&x| f(x)).collect(),
            m: self.m,
            n: self.n,
        }
    }

    /// Fold every element in row-major order into an accumulator.
    ///
    /// ```
    /// # use tessera_core::Matrix;
    /// let a = Matrix::build(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// assert_eq!(a.reduce(|value, carry| carry + value / 2.0, 0.0), 5.0);
    /// ```
    pub fn reduce<F>(&self, f: F, initial: f64) -> f64
    where
        F: Fn(f64, f64) -> f64,
    {
        self.data.iter().fold(initial, |carry, &x| f(x, carry))
    }

    /// Apply a function element-wise to two matrices of the same shape.
    pub(crate) fn zip_map<F>(&self, other: &Matrix, f: F) -> Result<Matrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.shape() != other.shape() {
            return Err(CoreError::DimensionMismatch {
                expected: vec![self.m, self.n],
                got: vec![other.m, other.n],
            });
        }
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Matrix::from_vec_unchecked(data, self.m, self.n))
    }

    /// Fail with [`CoreError::NotSquare`] unless the matrix is square.
    pub(crate) fn require_square(&self, operation: &'static str) -> Result<usize> {
        if self.is_square() {
            Ok(self.m)
        } else {
            Err(CoreError::not_square(operation, self.m, self.n))
        }
    }

    /// Largest absolute element.
    pub(crate) fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |acc, &x| acc.max(x.abs()))
    }
}

impl AsRef<[f64]> for Matrix {
    fn as_ref(&self) -> &[f64] {
        &self.data
    }
}

// ======================================================================
// Utility functions
// ======================================================================

/// Reject zero dimensions.
pub(crate) fn check_dims(m: usize, n: usize) -> Result<()> {
    if m == 0 || n == 0 {
        return Err(CoreError::InvalidShape {
            shape: vec![m, n],
            reason: "dimensions must be positive",
        });
    }
    Ok(())
}
