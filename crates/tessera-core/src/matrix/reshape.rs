//! Shape manipulation: transpose, flatten, augmentation, and tiling.

use crate::error::{CoreError, Result};

use super::{Matrix, Vector};

impl Matrix {
    /// Transpose the matrix. Returns a new matrix with copied data.
    pub fn transpose(&self) -> Matrix {
        let (rows, cols) = (self.m, self.n);
        let mut data = vec![0.0; self.size()];

        for r in 0..rows {
            for c in 0..cols {
                data[c * rows + r] = self.data[r * cols + c];
            }
        }

        Matrix::from_vec_unchecked(data, cols, rows)
    }

    /// Flatten into a single [`Vector`] in row-major order.
    pub fn flatten(&self) -> Vector {
        Vector::quick(self.data.clone())
    }

    /// Place `other` above this matrix. Column counts must match.
    pub fn augment_above(&self, other: &Matrix) -> Result<Matrix> {
        other.augment_below(self)
    }

    /// Place `other` below this matrix. Column counts must match.
    pub fn augment_below(&self, other: &Matrix) -> Result<Matrix> {
        if self.n != other.n {
            return Err(CoreError::DimensionMismatch {
                expected: vec![other.m, self.n],
                got: vec![other.m, other.n],
            });
        }
        let mut data = Vec::with_capacity(self.size() + other.size());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&other.data);
        Ok(Matrix::from_vec_unchecked(data, self.m + other.m, self.n))
    }

    /// Place `other` to the left of this matrix. Row counts must match.
    pub fn augment_left(&self, other: &Matrix) -> Result<Matrix> {
        other.augment_right(self)
    }

    /// Place `other` to the right of this matrix. Row counts must match.
    pub fn augment_right(&self, other: &Matrix) -> Result<Matrix> {
        if self.m != other.m {
            return Err(CoreError::DimensionMismatch {
                expected: vec![self.m, other.n],
                got: vec![other.m, other.n],
            });
        }
        let n = self.n + other.n;
        let mut data = Vec::with_capacity(self.m * n);
        for (left, right) in self.rows().zip(other.rows()) {
            data.extend_from_slice(left);
            data.extend_from_slice(right);
        }
        Ok(Matrix::from_vec_unchecked(data, self.m, n))
    }

    /// Tile the matrix, appending `m` extra copies vertically and `n` extra
    /// copies horizontally.
    ///
    /// ```
    /// # use tessera_core::Matrix;
    /// let b = Matrix::build(&[[13.0], [11.0], [9.0]]).unwrap();
    /// assert_eq!(b.repeat(1, 3).shape(), (6, 4));
    /// ```
    pub fn repeat(&self, m: usize, n: usize) -> Matrix {
        let (rows, cols) = (self.m * (m + 1), self.n * (n + 1));
        let mut data = Vec::with_capacity(rows * cols);
        for _ in 0..=m {
            for row in self.rows() {
                for _ in 0..=n {
                    data.extend_from_slice(row);
                }
            }
        }
        Matrix::from_vec_unchecked(data, rows, cols)
    }
}
