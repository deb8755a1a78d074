//! Element-wise binary operations.
//!
//! Every method takes any right-hand side convertible into an
//! [`Operand`] and broadcasts it with [`Matrix::broadcast`]. The infallible
//! scalar cases are also available as `std::ops` operators.

use crate::error::Result;
use crate::matrix::Matrix;

use super::Operand;

/// The element-wise binary operators the engine knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// Integer remainder: both operands truncated toward zero, sign of the
    /// dividend, NaN for a zero divisor.
    Modulo,
    Pow,
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Maximum,
    Minimum,
}

impl BinaryOp {
    /// Apply the operator to one pair of elements.
    #[inline]
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => a / b,
            Self::Modulo => modulo(a, b),
            Self::Pow => a.powf(b),
            Self::Equal => indicator(a == b),
            Self::NotEqual => indicator(a != b),
            Self::Greater => indicator(a > b),
            Self::GreaterEqual => indicator(a >= b),
            Self::Less => indicator(a < b),
            Self::LessEqual => indicator(a <= b),
            Self::Maximum => a.max(b),
            Self::Minimum => a.min(b),
        }
    }
}

#[inline]
fn indicator(flag: bool) -> f64 {
    if flag { 1.0 } else { 0.0 }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn modulo(a: f64, b: f64) -> f64 {
    if !a.is_finite() || !b.is_finite() {
        return f64::NAN;
    }
    let (a, b) = (a.trunc() as i64, b.trunc() as i64);
    a.checked_rem(b).map_or(f64::NAN, |r| r as f64)
}

macro_rules! binary_methods {
    ($($(#[$doc:meta])* $name:ident => $op:ident;)*) => {
        impl Matrix {
            $(
                $(#[$doc])*
                pub fn $name<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Matrix> {
                    self.broadcast(BinaryOp::$op, rhs)
                }
            )*
        }
    };
}

binary_methods! {
    /// Element-wise sum.
    ///
    /// ```
    /// # use tessera_core::{Matrix, Vector};
    /// let a = Matrix::build(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// let d = Vector::build(&[10.0, 20.0]).unwrap();
    /// assert_eq!(a.add(&d).unwrap().as_slice(), &[11.0, 22.0, 13.0, 24.0]);
    /// assert_eq!(a.add(1).unwrap().as_slice(), &[2.0, 3.0, 4.0, 5.0]);
    /// ```
    add => Add;
    /// Element-wise difference.
    subtract => Subtract;
    /// Element-wise (Hadamard) product. See [`Matrix::matmul`] for the
    /// matrix product.
    multiply => Multiply;
    /// Element-wise quotient. Division by zero follows IEEE 754.
    divide => Divide;
    /// Integer remainder with both operands truncated toward zero.
    ///
    /// ```
    /// # use tessera_core::Matrix;
    /// let a = Matrix::build(&[[22.0, -17.0, 12.0]]).unwrap();
    /// assert_eq!(a.modulo(10).unwrap().as_slice(), &[2.0, -7.0, 2.0]);
    /// assert!(a.modulo(0).unwrap().as_slice()[0].is_nan());
    /// ```
    modulo => Modulo;
    /// Element-wise power.
    pow => Pow;
    /// 1 where the elements are equal, 0 elsewhere.
    equal => Equal;
    not_equal => NotEqual;
    greater => Greater;
    greater_equal => GreaterEqual;
    less => Less;
    less_equal => LessEqual;
}

impl Matrix {
    /// Element-wise maximum of two matrices of the same shape.
    pub fn maximum(a: &Matrix, b: &Matrix) -> Result<Matrix> {
        a.broadcast(BinaryOp::Maximum, b)
    }

    /// Element-wise minimum of two matrices of the same shape.
    pub fn minimum(a: &Matrix, b: &Matrix) -> Result<Matrix> {
        a.broadcast(BinaryOp::Minimum, b)
    }
}

// ======================================================================
// Matrix op scalar  (broadcast scalar to every element)
// ======================================================================

macro_rules! impl_scalar_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl core::ops::$trait<f64> for Matrix {
            type Output = Matrix;

            fn $method(self, rhs: f64) -> Matrix {
                let (m, n) = self.shape();
                let mut data = self.into_vec();
                for a in &mut data {
                    *a = *a $op rhs;
                }
                Matrix::from_vec_unchecked(data, m, n)
            }
        }

        impl core::ops::$trait<f64> for &Matrix {
            type Output = Matrix;

            fn $method(self, rhs: f64) -> Matrix {
                self.map(|a| a $op rhs)
            }
        }
    };
}

impl_scalar_binop!(Add, add, +);
impl_scalar_binop!(Sub, sub, -);
impl_scalar_binop!(Mul, mul, *);
impl_scalar_binop!(Div, div, /);

// ======================================================================
// Negation
// ======================================================================

impl core::ops::Neg for Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        let (m, n) = self.shape();
        let data = self.into_vec().into_iter().map(|a| -a).collect();
        Matrix::from_vec_unchecked(data, m, n)
    }
}

impl core::ops::Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        self.map(|a| -a)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::matrix::{ColumnVector, Vector};

    fn a() -> Matrix {
        Matrix::quick(&[
            [22.0, -17.0, 12.0],
            [4.0, 11.0, -2.0],
            [20.0, -6.0, -9.0],
        ])
    }

    fn c() -> Matrix {
        Matrix::quick(&[[4.0, 6.0, -12.0], [1.0, 3.0, 5.0], [-10.0, -1.0, 14.0]])
    }

    fn d() -> Vector {
        Vector::quick(vec![2.0, 10.0, -1.0])
    }

    fn e() -> ColumnVector {
        ColumnVector::quick(vec![2.5, -1.0, 4.8])
    }

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * b.abs().max(1.0)
    }

    #[test]
    fn test_add_each_operand_kind() {
        assert_eq!(
            a().add(&d()).unwrap().as_array(),
            vec![
                vec![24.0, -7.0, 11.0],
                vec![6.0, 21.0, -3.0],
                vec![22.0, 4.0, -10.0],
            ]
        );
        assert_eq!(
            a().add(&e()).unwrap().row(2).unwrap(),
            &[24.8, -1.2000000000000002, -4.2]
        );
        assert_eq!(
            a().add(&c()).unwrap().row(0).unwrap(),
            &[26.0, -11.0, 0.0]
        );
        assert_eq!(a().add(2.0).unwrap().row(1).unwrap(), &[6.0, 13.0, 0.0]);
    }

    #[test]
    fn test_multiply_column_vector() {
        assert_eq!(
            a().multiply(&e()).unwrap().as_array(),
            vec![
                vec![55.0, -42.5, 30.0],
                vec![-4.0, -11.0, 2.0],
                vec![96.0, -28.799999999999997, -43.199999999999996],
            ]
        );
    }

    #[test]
    fn test_subtract_and_divide() {
        assert_eq!(a().subtract(&a()).unwrap(), Matrix::zeros(3, 3).unwrap());
        let z = a().divide(&d()).unwrap();
        assert_eq!(z.row(0).unwrap(), &[11.0, -1.7, -12.0]);
        let z = a().divide(0.0).unwrap();
        assert_eq!(z.get(0, 0).unwrap(), f64::INFINITY);
        assert_eq!(z.get(0, 1).unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_modulo() {
        assert_eq!(
            a().modulo(&c()).unwrap().as_array(),
            vec![
                vec![2.0, -5.0, 0.0],
                vec![0.0, 2.0, -2.0],
                vec![0.0, 0.0, -9.0],
            ]
        );
        assert_eq!(
            a().modulo(&d()).unwrap().as_array(),
            vec![
                vec![0.0, -7.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, -6.0, 0.0],
            ]
        );
        assert_eq!(
            a().modulo(&e()).unwrap().as_array(),
            vec![
                vec![0.0, -1.0, 0.0],
                vec![0.0, 0.0, 0.0],
                vec![0.0, -2.0, -1.0],
            ]
        );
        assert_eq!(
            a().modulo(10).unwrap().as_array(),
            vec![
                vec![2.0, -7.0, 2.0],
                vec![4.0, 1.0, -2.0],
                vec![0.0, -6.0, -9.0],
            ]
        );
    }

    #[test]
    fn test_modulo_zero_divisor_is_nan() {
        let z = a().modulo(0.4).unwrap();
        assert!(z.as_slice().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_pow() {
        let z = a().pow(&c()).unwrap();
        assert_eq!(z.get(0, 0).unwrap(), 234_256.0);
        assert_eq!(z.get(0, 1).unwrap(), 24_137_569.0);
        assert!(approx_eq(z.get(0, 2).unwrap(), 1.121_566_547_846_150_9e-13, 1e-12));
        assert_eq!(a().pow(2).unwrap().row(1).unwrap(), &[16.0, 121.0, 4.0]);
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(
            a().greater(4).unwrap().as_array(),
            vec![
                vec![1.0, 0.0, 1.0],
                vec![0.0, 1.0, 0.0],
                vec![1.0, 0.0, 0.0],
            ]
        );
        assert_eq!(
            a().greater_equal(4).unwrap().row(1).unwrap(),
            &[1.0, 1.0, 0.0]
        );
        assert_eq!(a().less(4).unwrap().row(1).unwrap(), &[0.0, 0.0, 1.0]);
        assert_eq!(a().less_equal(4).unwrap().row(1).unwrap(), &[1.0, 0.0, 1.0]);
        assert_eq!(a().equal(&a()).unwrap(), Matrix::ones(3, 3).unwrap());
        assert_eq!(a().not_equal(&a()).unwrap(), Matrix::zeros(3, 3).unwrap());
        assert_eq!(a().equal(&d()).unwrap().row(0).unwrap(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_maximum_minimum() {
        assert_eq!(
            Matrix::maximum(&a(), &c()).unwrap().as_array(),
            vec![
                vec![22.0, 6.0, 12.0],
                vec![4.0, 11.0, 5.0],
                vec![20.0, -1.0, 14.0],
            ]
        );
        assert_eq!(
            Matrix::minimum(&a(), &c()).unwrap().as_array(),
            vec![
                vec![4.0, -17.0, -12.0],
                vec![1.0, 3.0, -2.0],
                vec![-10.0, -6.0, -9.0],
            ]
        );
        let b = Matrix::quick(&[[13.0], [11.0], [9.0]]);
        assert!(Matrix::maximum(&a(), &b).is_err());
    }

    #[test]
    fn test_scalar_operators() {
        let z = &a() + 1.0;
        assert_eq!(z.row(0).unwrap(), &[23.0, -16.0, 13.0]);
        let z = a() * 2.0;
        assert_eq!(z.row(1).unwrap(), &[8.0, 22.0, -4.0]);
        let z = &a() - 2.0;
        assert_eq!(z.row(2).unwrap(), &[18.0, -8.0, -11.0]);
        let z = &a() / 2.0;
        assert_eq!(z.row(0).unwrap(), &[11.0, -8.5, 6.0]);
        assert_eq!(-&a(), a().multiply(-1).unwrap());
        assert_eq!(-a(), a().negate());
    }

    #[test]
    fn test_operations_do_not_mutate() {
        let original = a();
        let _ = original.add(&d()).unwrap();
        let _ = &original * 3.0;
        assert_eq!(original, a());
    }
}
