//! Element-wise unary math on [`Matrix`].

use crate::error::{CoreError, Result};
use crate::matrix::Matrix;

/// `2^52`: from here on every `f64` is an integer.
const INTEGRAL_LIMIT: f64 = 4_503_599_627_370_496.0;

impl Matrix {
    // ------------------------------------------------------------------
    // Arithmetic
    // ------------------------------------------------------------------

    #[inline]
    pub fn abs(&self) -> Matrix {
        self.map(f64::abs)
    }

    #[inline]
    pub fn square(&self) -> Matrix {
        self.map(|x| x * x)
    }

    #[inline]
    pub fn sqrt(&self) -> Matrix {
        self.map(f64::sqrt)
    }

    /// Element-wise `1 / x`.
    #[inline]
    pub fn reciprocal(&self) -> Matrix {
        self.map(f64::recip)
    }

    #[inline]
    pub fn negate(&self) -> Matrix {
        self.map(|x| -x)
    }

    /// -1, 0 or 1 depending on the sign of each element.
    pub fn sign(&self) -> Matrix {
        self.map(|x| if x == 0.0 { 0.0 } else { x.signum() })
    }

    // ------------------------------------------------------------------
    // Exponentials and logarithms
    // ------------------------------------------------------------------

    #[inline]
    pub fn exp(&self) -> Matrix {
        self.map(f64::exp)
    }

    /// `exp(x) - 1`, accurate near zero.
    #[inline]
    pub fn expm1(&self) -> Matrix {
        self.map(f64::exp_m1)
    }

    /// Natural logarithm.
    #[inline]
    pub fn log(&self) -> Matrix {
        self.map(f64::ln)
    }

    /// `ln(1 + x)`, accurate near zero.
    #[inline]
    pub fn log1p(&self) -> Matrix {
        self.map(f64::ln_1p)
    }

    // ------------------------------------------------------------------
    // Trigonometry
    // ------------------------------------------------------------------

    #[inline]
    pub fn sin(&self) -> Matrix {
        self.map(f64::sin)
    }

    #[inline]
    pub fn asin(&self) -> Matrix {
        self.map(f64::asin)
    }

    #[inline]
    pub fn cos(&self) -> Matrix {
        self.map(f64::cos)
    }

    #[inline]
    pub fn acos(&self) -> Matrix {
        self.map(f64::acos)
    }

    #[inline]
    pub fn tan(&self) -> Matrix {
        self.map(f64::tan)
    }

    #[inline]
    pub fn atan(&self) -> Matrix {
        self.map(f64::atan)
    }

    /// Radians to degrees.
    #[inline]
    pub fn rad2deg(&self) -> Matrix {
        self.map(f64::to_degrees)
    }

    /// Degrees to radians.
    #[inline]
    pub fn deg2rad(&self) -> Matrix {
        self.map(f64::to_radians)
    }

    // ------------------------------------------------------------------
    // Rounding and clipping
    // ------------------------------------------------------------------

    /// Round half away from zero to `precision` decimal places.
    ///
    /// Values with no digits below `precision` come back unchanged, including
    /// any whose scaled form would overflow. A precision so negative that
    /// `10^precision` underflows rounds every finite value to a signed zero.
    ///
    /// ```
    /// # use tessera_core::Matrix;
    /// let a = Matrix::build(&[[3.14159, -2.5, 1234.5]]).unwrap();
    /// assert_eq!(a.round(2).as_slice(), &[3.14, -2.5, 1234.5]);
    /// assert_eq!(a.round(0).as_slice(), &[3.0, -3.0, 1235.0]);
    /// assert_eq!(a.round(-2).as_slice(), &[0.0, -0.0, 1200.0]);
    /// ```
    pub fn round(&self, precision: i32) -> Matrix {
        let scale = 10f64.powi(precision);
        if scale == 0.0 {
            return self.map(|x| if x.is_finite() { 0.0_f64.copysign(x) } else { x });
        }
        self.map(|x| {
            let scaled = x * scale;
            if scaled.is_finite() && scaled.abs() < INTEGRAL_LIMIT {
                scaled.round() / scale
            } else {
                x
            }
        })
    }

    #[inline]
    pub fn floor(&self) -> Matrix {
        self.map(f64::floor)
    }

    #[inline]
    pub fn ceil(&self) -> Matrix {
        self.map(f64::ceil)
    }

    /// Limit every element to `[min, max]`. Either bound may be infinite.
    ///
    /// Fails with [`CoreError::InvalidArgument`] when `min > max` or a bound
    /// is NaN.
    pub fn clip(&self, min: f64, max: f64) -> Result<Matrix> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(CoreError::InvalidArgument {
                reason: "clip bounds must satisfy min <= max",
            });
        }
        Ok(self.map(|x| x.clamp(min, max)))
    }

    /// Raise every element below `min` up to `min`.
    pub fn clip_lower(&self, min: f64) -> Matrix {
        self.map(|x| x.max(min))
    }

    /// Lower every element above `max` down to `max`.
    pub fn clip_upper(&self, max: f64) -> Matrix {
        self.map(|x| x.min(max))
    }
}
