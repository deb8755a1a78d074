//! One-dimensional containers: [`Vector`] (row) and [`ColumnVector`].
//!
//! Both share storage and validation rules; they differ only in orientation,
//! which decides how they broadcast against a [`Matrix`].

use core::fmt;

use crate::error::{CoreError, Result};

use super::Matrix;

macro_rules! impl_vector {
    ($ty:ident, $other:ident, $orientation:literal) => {
        #[doc = concat!("A ", $orientation, " vector of `f64` values with at least one element.")]
        #[derive(Debug, Clone, PartialEq)]
        pub struct $ty {
            data: Vec<f64>,
        }

        impl $ty {
            /// Build a vector from a slice, rejecting empty input and NaN.
            pub fn build(values: &[f64]) -> Result<Self> {
                if values.is_empty() {
                    return Err(CoreError::InvalidShape {
                        shape: vec![0],
                        reason: "a vector needs at least one element",
                    });
                }
                if let Some(i) = values.iter().position(|v| v.is_nan()) {
                    return Err(CoreError::InvalidElement { row: 0, column: i });
                }
                Ok(Self {
                    data: values.to_vec(),
                })
            }

            /// Wrap a buffer without validation.
            #[inline]
            pub fn quick(data: Vec<f64>) -> Self {
                debug_assert!(!data.is_empty());
                Self { data }
            }

            /// A vector of `n` zeros.
            pub fn zeros(n: usize) -> Result<Self> {
                super::check_dims(1, n)?;
                Ok(Self { data: vec![0.0; n] })
            }

            /// Number of elements.
            #[inline]
            pub fn size(&self) -> usize {
                self.data.len()
            }

            #[inline]
            pub fn as_slice(&self) -> &[f64] {
                &self.data
            }

            #[inline]
            pub fn into_vec(self) -> Vec<f64> {
                self.data
            }

            /// Element at `index`.
            pub fn get(&self, index: usize) -> Result<f64> {
                self.data
                    .get(index)
                    .copied()
                    .ok_or_else(|| CoreError::IndexOutOfBounds {
                        index: vec![index],
                        shape: vec![self.data.len()],
                    })
            }

            /// Apply a function to every element, returning a new vector.
            pub fn map<F>(&self, f: F) -> Self
            where
                F: Fn(f64) -> f64,
            {
                Self {
                    data: self.data.iter().map(|&x| f(x)).collect(),
                }
            }

            pub fn sum(&self) -> f64 {
                self.data.iter().sum()
            }

            /// Inner product with any vector-like operand of the same length.
            pub fn dot<V: AsRef<[f64]>>(&self, other: &V) -> Result<f64> {
                let other = other.as_ref();
                if other.len() != self.data.len() {
                    return Err(CoreError::DimensionMismatch {
                        expected: vec![self.data.len()],
                        got: vec![other.len()],
                    });
                }
                Ok(crate::linalg::blas::dot(&self.data, other))
            }

            /// Sum of absolute values.
            pub fn l1_norm(&self) -> f64 {
                self.data.iter().map(|v| v.abs()).sum()
            }

            /// Euclidean length.
            pub fn l2_norm(&self) -> f64 {
                self.data.iter().map(|v| v * v).sum::<f64>().sqrt()
            }

            /// The same values with the other orientation.
            pub fn transpose(&self) -> $other {
                $other::quick(self.data.clone())
            }
        }

        impl AsRef<[f64]> for $ty {
            fn as_ref(&self) -> &[f64] {
                &self.data
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "[")?;
                for v in &self.data {
                    write!(f, " {v}")?;
                }
                write!(f, " ]")
            }
        }
    };
}

impl_vector!(Vector, ColumnVector, "row");
impl_vector!(ColumnVector, Vector, "column");

impl Vector {
    /// View as a `1 x n` matrix.
    pub fn as_matrix(&self) -> Matrix {
        Matrix::from_vec_unchecked(self.data.clone(), 1, self.data.len())
    }
}

impl ColumnVector {
    /// View as an `n x 1` matrix.
    pub fn as_matrix(&self) -> Matrix {
        Matrix::from_vec_unchecked(self.data.clone(), self.data.len(), 1)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_build() {
        let d = Vector::build(&[2.0, 10.0, -1.0]).unwrap();
        assert_eq!(d.size(), 3);
        assert_eq!(d.as_slice(), &[2.0, 10.0, -1.0]);
        assert!(Vector::build(&[]).is_err());
        assert!(ColumnVector::build(&[1.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_get() {
        let e = ColumnVector::quick(vec![2.5, -1.0, 4.8]);
        assert_eq!(e.get(2).unwrap(), 4.8);
        assert!(e.get(3).is_err());
    }

    #[test]
    fn test_dot_and_norms() {
        let d = Vector::quick(vec![3.0, -4.0]);
        assert_eq!(d.dot(&d).unwrap(), 25.0);
        assert_eq!(d.l1_norm(), 7.0);
        assert_eq!(d.l2_norm(), 5.0);
        assert!(d.dot(&Vector::quick(vec![1.0])).is_err());
    }

    #[test]
    fn test_dot_follows_ieee() {
        let d = Vector::quick(vec![0.0, 1.0]);
        let e = ColumnVector::quick(vec![f64::INFINITY, 2.0]);
        assert!(d.dot(&e).unwrap().is_nan());
        assert_eq!(e.dot(&[1.0, -1.0]).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_transpose_and_matrix_view() {
        let d = Vector::quick(vec![2.0, 10.0, -1.0]);
        assert_eq!(d.as_matrix().shape(), (1, 3));
        let e = d.transpose();
        assert_eq!(e.as_matrix().shape(), (3, 1));
        assert_eq!(e.transpose(), d);
    }

    #[test]
    fn test_display() {
        let d = Vector::quick(vec![2.0, 10.0, -1.0]);
        assert_eq!(d.to_string(), "[ 2 10 -1 ]");
    }

    #[test]
    fn test_zeros() {
        assert_eq!(ColumnVector::zeros(2).unwrap().as_slice(), &[0.0, 0.0]);
        assert!(Vector::zeros(0).is_err());
    }
}
