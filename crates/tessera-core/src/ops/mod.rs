//! Broadcasting arithmetic engine.
//!
//! Every element-wise binary operation classifies its right-hand operand once,
//! at the call boundary, into one of the [`Operand`] kinds and then runs a
//! single tight loop for that kind:
//!
//! | Operand          | Rule                                   | Requirement  |
//! |------------------|----------------------------------------|--------------|
//! | `Scalar(b)`      | `op(a[i][j], b)`                       | none         |
//! | `Vector(v)`      | `op(a[i][j], v[j])` (row broadcast)    | `len == n`   |
//! | `ColumnVector(v)`| `op(a[i][j], v[i])` (column broadcast) | `len == m`   |
//! | `Matrix(b)`      | `op(a[i][j], b[i][j])`                 | same shape   |
//!
//! Unary operations live in [`unary`](self::unary) and are plain maps.

mod binary;
mod unary;

pub use binary::BinaryOp;

use crate::error::{CoreError, Result};
use crate::matrix::{ColumnVector, Matrix, Vector};

/// The right-hand side of a broadcasting operation.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Scalar(f64),
    Vector(&'a Vector),
    ColumnVector(&'a ColumnVector),
    Matrix(&'a Matrix),
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl From<i32> for Operand<'_> {
    fn from(value: i32) -> Self {
        Operand::Scalar(f64::from(value))
    }
}

impl<'a> From<&'a Vector> for Operand<'a> {
    fn from(value: &'a Vector) -> Self {
        Operand::Vector(value)
    }
}

impl<'a> From<&'a ColumnVector> for Operand<'a> {
    fn from(value: &'a ColumnVector) -> Self {
        Operand::ColumnVector(value)
    }
}

impl<'a> From<&'a Matrix> for Operand<'a> {
    fn from(value: &'a Matrix) -> Self {
        Operand::Matrix(value)
    }
}

impl Matrix {
    /// Apply `op` element-wise between this matrix and a broadcast operand.
    ///
    /// ```
    /// # use tessera_core::{BinaryOp, Matrix, Vector};
    /// let a = Matrix::build(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// let v = Vector::build(&[10.0, 20.0]).unwrap();
    /// let z = a.broadcast(BinaryOp::Add, &v).unwrap();
    /// assert_eq!(z.as_slice(), &[11.0, 22.0, 13.0, 24.0]);
    /// ```
    pub fn broadcast<'a>(&self, op: BinaryOp, rhs: impl Into<Operand<'a>>) -> Result<Matrix> {
        let (m, n) = self.shape();
        let lhs = self.as_slice();

        let data: Vec<f64> = match rhs.into() {
            Operand::Scalar(b) => lhs.iter().map(|&a| op.apply(a, b)).collect(),
            Operand::Vector(v) => {
                let v = v.as_slice();
                if v.len() != n {
                    return Err(CoreError::BroadcastError {
                        lhs: vec![m, n],
                        rhs: vec![1, v.len()],
                    });
                }
                lhs.chunks(n)
                    .flat_map(|row| row.iter().zip(v).map(|(&a, &b)| op.apply(a, b)))
                    .collect()
            }
            Operand::ColumnVector(v) => {
                let v = v.as_slice();
                if v.len() != m {
                    return Err(CoreError::BroadcastError {
                        lhs: vec![m, n],
                        rhs: vec![v.len(), 1],
                    });
                }
                lhs.chunks(n)
                    .zip(v)
                    .flat_map(|(row, &b)| row.iter().map(move |&a| op.apply(a, b)))
                    .collect()
            }
            Operand::Matrix(b) => return self.zip_map(b, |x, y| op.apply(x, y)),
        };

        Ok(Matrix::from_vec_unchecked(data, m, n))
    }
}
