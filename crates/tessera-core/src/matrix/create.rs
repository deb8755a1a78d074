//! Matrix creation functions analogous to `np.eye`, `np.zeros`, etc.

use crate::error::{CoreError, Result};

use super::{ColumnVector, Matrix, Vector, check_dims};

impl Matrix {
    /// Create an identity matrix of size `n x n`.
    ///
    /// ```
    /// # use tessera_core::Matrix;
    /// let eye = Matrix::identity(3).unwrap();
    /// assert_eq!(eye.shape(), (3, 3));
    /// assert_eq!(eye.get(0, 0).unwrap(), 1.0);
    /// assert_eq!(eye.get(0, 1).unwrap(), 0.0);
    /// ```
    pub fn identity(n: usize) -> Result<Self> {
        check_dims(n, n)?;
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Ok(Self::from_vec_unchecked(data, n, n))
    }

    /// Create a matrix filled with zeros.
    pub fn zeros(m: usize, n: usize) -> Result<Self> {
        Self::fill(0.0, m, n)
    }

    /// Create a matrix filled with ones.
    pub fn ones(m: usize, n: usize) -> Result<Self> {
        Self::fill(1.0, m, n)
    }

    /// Create a matrix filled with a constant value.
    pub fn fill(value: f64, m: usize, n: usize) -> Result<Self> {
        check_dims(m, n)?;
        Ok(Self::from_vec_unchecked(vec![value; m * n], m, n))
    }

    /// Create a square matrix with `values` on the diagonal.
    ///
    /// ```
    /// # use tessera_core::Matrix;
    /// let d = Matrix::diagonal(&[0.0, 1.0, 4.0]).unwrap();
    /// assert_eq!(d.as_array()[2], vec![0.0, 0.0, 4.0]);
    /// ```
    pub fn diagonal(values: &[f64]) -> Result<Self> {
        let n = values.len();
        check_dims(n, n)?;
        let mut data = vec![0.0; n * n];
        for (i, &v) in values.iter().enumerate() {
            data[i * n + i] = v;
        }
        Ok(Self::from_vec_unchecked(data, n, n))
    }

    /// Stack equally sized vectors into a matrix.
    ///
    /// Row vectors become the rows of the result; column vectors become its
    /// columns.
    ///
    /// ```
    /// # use tessera_core::{ColumnVector, Matrix, Vector};
    /// let d = Vector::quick(vec![2.0, 10.0, -1.0]);
    /// assert_eq!(Matrix::stack(&[d.clone(), d]).unwrap().shape(), (2, 3));
    ///
    /// let e = ColumnVector::quick(vec![2.5, -1.0, 4.8]);
    /// assert_eq!(Matrix::stack(&[e.clone(), e]).unwrap().shape(), (3, 2));
    /// ```
    pub fn stack<V: Stack>(vectors: &[V]) -> Result<Self> {
        V::stack(vectors)
    }
}

/// Vectors that [`Matrix::stack`] knows how to lay out.
pub trait Stack: Sized {
    fn stack(vectors: &[Self]) -> Result<Matrix>;
}

/// Validate that every vector has the same length and return it.
fn common_length<V: AsRef<[f64]>>(vectors: &[V]) -> Result<usize> {
    let first = vectors.first().ok_or(CoreError::InvalidArgument {
        reason: "cannot stack zero vectors",
    })?;
    let len = first.as_ref().len();
    for v in &vectors[1..] {
        if v.as_ref().len() != len {
            return Err(CoreError::DimensionMismatch {
                expected: vec![len],
                got: vec![v.as_ref().len()],
            });
        }
    }
    Ok(len)
}

impl Stack for Vector {
    fn stack(vectors: &[Self]) -> Result<Matrix> {
        let n = common_length(vectors)?;
        let mut data = Vec::with_capacity(vectors.len() * n);
        for v in vectors {
            data.extend_from_slice(v.as_slice());
        }
        Ok(Matrix::from_vec_unchecked(data, vectors.len(), n))
    }
}

impl Stack for ColumnVector {
    fn stack(vectors: &[Self]) -> Result<Matrix> {
        let m = common_length(vectors)?;
        let n = vectors.len();
        let mut data = vec![0.0; m * n];
        for (j, v) in vectors.iter().enumerate() {
            for (i, &value) in v.as_slice().iter().enumerate() {
                data[i * n + j] = value;
            }
        }
        Ok(Matrix::from_vec_unchecked(data, m, n))
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let z = Matrix::identity(4).unwrap();
        assert_eq!(
            z.as_array(),
            vec![
                vec![1.0, 0.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0, 0.0],
                vec![0.0, 0.0, 1.0, 0.0],
                vec![0.0, 0.0, 0.0, 1.0],
            ]
        );
        assert!(Matrix::identity(0).is_err());
    }

    #[test]
    fn test_zeros_ones_fill() {
        let z = Matrix::zeros(2, 4).unwrap();
        assert_eq!(z.shape(), (2, 4));
        assert!(z.as_slice().iter().all(|&x| x == 0.0));

        let o = Matrix::ones(4, 2).unwrap();
        assert!(o.as_slice().iter().all(|&x| x == 1.0));

        let f = Matrix::fill(5.0, 4, 4).unwrap();
        assert_eq!(f.size(), 16);
        assert!(f.as_slice().iter().all(|&x| x == 5.0));

        assert!(Matrix::zeros(0, 3).is_err());
        assert!(Matrix::fill(1.0, 2, 0).is_err());
    }

    #[test]
    fn test_diagonal() {
        let z = Matrix::diagonal(&[0.0, 1.0, 4.0, 5.0]).unwrap();
        assert_eq!(z.shape(), (4, 4));
        assert_eq!(z.get(3, 3).unwrap(), 5.0);
        assert_eq!(z.get(3, 2).unwrap(), 0.0);
        assert!(Matrix::diagonal(&[]).is_err());
    }

    #[test]
    fn test_stack_row_vectors() {
        let d = Vector::quick(vec![2.0, 10.0, -1.0]);
        let z = Matrix::stack(&[d.clone(), d.clone(), d]).unwrap();
        assert_eq!(
            z.as_array(),
            vec![
                vec![2.0, 10.0, -1.0],
                vec![2.0, 10.0, -1.0],
                vec![2.0, 10.0, -1.0],
            ]
        );
    }

    #[test]
    fn test_stack_column_vectors() {
        let e = ColumnVector::quick(vec![2.5, -1.0, 4.8]);
        let z = Matrix::stack(&[e.clone(), e.clone(), e]).unwrap();
        assert_eq!(
            z.as_array(),
            vec![
                vec![2.5, 2.5, 2.5],
                vec![-1.0, -1.0, -1.0],
                vec![4.8, 4.8, 4.8],
            ]
        );
    }

    #[test]
    fn test_stack_mismatch() {
        let a = Vector::quick(vec![1.0, 2.0]);
        let b = Vector::quick(vec![1.0]);
        assert!(Matrix::stack(&[a, b]).is_err());
        let none: [Vector; 0] = [];
        assert!(Matrix::stack(&none).is_err());
    }
}
