//! Element, row, column, and sub-region access for [`Matrix`].

use core::ops::Range;

use crate::error::{CoreError, Result};

use super::{ColumnVector, Matrix, Vector};

impl Matrix {
    /// Element at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> Result<f64> {
        if i >= self.m || j >= self.n {
            return Err(self.out_of_bounds(vec![i, j]));
        }
        Ok(self.data[i * self.n + j])
    }

    /// Row `i` as a plain slice.
    pub fn row(&self, i: usize) -> Result<&[f64]> {
        if i >= self.m {
            return Err(self.out_of_bounds(vec![i]));
        }
        Ok(&self.data[i * self.n..(i + 1) * self.n])
    }

    /// Column `j` copied into a plain `Vec`.
    pub fn column(&self, j: usize) -> Result<Vec<f64>> {
        if j >= self.n {
            return Err(self.out_of_bounds(vec![0, j]));
        }
        Ok(self.data.iter().skip(j).step_by(self.n).copied().collect())
    }

    /// Row `i` as a [`Vector`].
    pub fn row_as_vector(&self, i: usize) -> Result<Vector> {
        Ok(Vector::quick(self.row(i)?.to_vec()))
    }

    /// Column `j` as a [`Vector`].
    pub fn column_as_vector(&self, j: usize) -> Result<Vector> {
        Ok(Vector::quick(self.column(j)?))
    }

    /// The main diagonal (length `min(m, n)`) as a [`Vector`].
    pub fn diagonal_as_vector(&self) -> Vector {
        let k = self.m.min(self.n);
        Vector::quick((0..k).map(|i| self.data[i * self.n + i]).collect())
    }

    /// Every row as a [`Vector`].
    pub fn as_vectors(&self) -> Vec<Vector> {
        self.rows().map(|row| Vector::quick(row.to_vec())).collect()
    }

    /// Every column as a [`ColumnVector`].
    pub fn as_column_vectors(&self) -> Vec<ColumnVector> {
        (0..self.n)
            .map(|j| {
                ColumnVector::quick(self.data.iter().skip(j).step_by(self.n).copied().collect())
            })
            .collect()
    }

    /// Extract the region `rows x cols` given as half-open index ranges.
    ///
    /// ```
    /// # use tessera_core::Matrix;
    /// let a = Matrix::build(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]).unwrap();
    /// let s = a.sub_matrix(0..2, 1..3).unwrap();
    /// assert_eq!(s.as_slice(), &[2.0, 3.0, 5.0, 6.0]);
    /// ```
    pub fn sub_matrix(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Matrix> {
        if rows.start >= rows.end || cols.start >= cols.end {
            return Err(CoreError::InvalidArgument {
                reason: "sub-matrix ranges must be non-empty",
            });
        }
        if rows.end > self.m || cols.end > self.n {
            return Err(self.out_of_bounds(vec![rows.end, cols.end]));
        }

        let (m, n) = (rows.len(), cols.len());
        let mut data = Vec::with_capacity(m * n);
        for i in rows {
            let offset = i * self.n;
            data.extend_from_slice(&self.data[offset + cols.start..offset + cols.end]);
        }
        Ok(Matrix::from_vec_unchecked(data, m, n))
    }

    fn out_of_bounds(&self, index: Vec<usize>) -> CoreError {
        CoreError::IndexOutOfBounds {
            index,
            shape: vec![self.m, self.n],
        }
    }
}
