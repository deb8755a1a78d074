//! Strided 2-D cross-correlation with zero padding.
//!
//! The kernel is anchored at its centre `(k_m / 2, k_n / 2)`, so
//!
//! ```text
//! out(i, j) = sum over (ki, kj) of input(i*s + ki - k_m/2, j*s + kj - k_n/2) * kernel(ki, kj)
//! ```
//!
//! with positions outside the input contributing 0. The output has
//! `ceil(m / s) x ceil(n / s)` elements.

use crate::backend;
use crate::error::{CoreError, Result};
use crate::matrix::Matrix;

/// Reference convolution used by the default [`Backend`](crate::Backend).
pub(crate) fn convolve(a: &Matrix, kernel: &Matrix, stride: usize) -> Result<Matrix> {
    if stride == 0 {
        return Err(CoreError::InvalidArgument {
            reason: "convolution stride must be at least 1",
        });
    }
    let (m, n) = a.shape();
    let (km, kn) = kernel.shape();
    if km > m || kn > n {
        return Err(CoreError::InvalidArgument {
            reason: "convolution kernel is larger than the input",
        });
    }

    let (cm, cn) = (km / 2, kn / 2);
    let (om, on) = (m.div_ceil(stride), n.div_ceil(stride));
    let input = a.as_slice();
    let k = kernel.as_slice();

    let mut out = vec![0.0; om * on];
    for i in 0..om {
        for j in 0..on {
            let mut acc = 0.0;
            for ki in 0..km {
                let Some(r) = (i * stride + ki).checked_sub(cm).filter(|&r| r < m) else {
                    continue;
                };
                for kj in 0..kn {
                    let Some(c) = (j * stride + kj).checked_sub(cn).filter(|&c| c < n) else {
                        continue;
                    };
                    acc += input[r * n + c] * k[ki * kn + kj];
                }
            }
            out[i * on + j] = acc;
        }
    }

    Ok(Matrix::from_vec_unchecked(out, om, on))
}

impl Matrix {
    /// Cross-correlate with `kernel` at the given `stride`.
    ///
    /// Fails with [`CoreError::InvalidArgument`] when `stride` is 0 or the
    /// kernel does not fit inside the matrix.
    ///
    /// ```
    /// # use tessera_core::Matrix;
    /// let a = Matrix::build(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
    /// let edge = Matrix::build(&[[1.0, 0.0, -1.0]]).unwrap();
    /// let out = a.convolve(&edge, 1).unwrap();
    /// assert_eq!(out.as_slice(), &[-2.0, -2.0, 2.0, -5.0, -2.0, 5.0]);
    /// ```
    pub fn convolve(&self, kernel: &Matrix, stride: usize) -> Result<Matrix> {
        backend::active().convolve(self, kernel, stride)
    }
}
