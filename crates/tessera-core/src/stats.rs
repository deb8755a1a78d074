//! Column statistics and matrix norms.
//!
//! Every reduction treats rows as observations and columns as variables, so
//! an `m x n` matrix reduces to a [`Vector`] of length `n`. Variance and
//! covariance use the population denominator `m`.

use crate::error::{CoreError, Result};
use crate::matrix::{Matrix, Vector};

impl Matrix {
    // ------------------------------------------------------------------
    // Column reductions
    // ------------------------------------------------------------------

    pub fn sum(&self) -> Vector {
        self.reduce_columns(|col| col.iter().sum())
    }

    pub fn product(&self) -> Vector {
        self.reduce_columns(|col| col.iter().product())
    }

    pub fn min(&self) -> Vector {
        self.reduce_columns(|col| col.iter().copied().fold(f64::INFINITY, f64::min))
    }

    pub fn max(&self) -> Vector {
        self.reduce_columns(|col| col.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    }

    /// Row index of the smallest value in each column (first occurrence).
    pub fn argmin(&self) -> Vector {
        self.reduce_columns(|col| arg_best(col, |x, best| x < best))
    }

    /// Row index of the largest value in each column (first occurrence).
    pub fn argmax(&self) -> Vector {
        self.reduce_columns(|col| arg_best(col, |x, best| x > best))
    }

    pub fn mean(&self) -> Vector {
        let m = self.m() as f64;
        self.reduce_columns(|col| col.iter().sum::<f64>() / m)
    }

    /// Population variance of each column.
    pub fn variance(&self) -> Vector {
        let m = self.m() as f64;
        self.reduce_columns(|col| {
            let mean = col.iter().sum::<f64>() / m;
            col.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / m
        })
    }

    /// Middle order statistic of each column; the mean of the two middle
    /// values when `m` is even.
    pub fn median(&self) -> Vector {
        self.reduce_columns(|col| {
            let sorted = sorted(col);
            let mid = sorted.len() / 2;
            if sorted.len() % 2 == 0 {
                0.5 * (sorted[mid - 1] + sorted[mid])
            } else {
                sorted[mid]
            }
        })
    }

    /// The `p`-th percentile of each column, `p` in `[0, 100]`.
    ///
    /// Interpolates linearly between the order statistics around rank
    /// `p / 100 * (m - 1)`.
    ///
    /// ```
    /// # use tessera_core::Matrix;
    /// let a = Matrix::build(&[[1.0], [2.0], [3.0], [4.0], [5.0]]).unwrap();
    /// assert_eq!(a.percentile(25.0).unwrap().as_slice(), &[2.0]);
    /// assert_eq!(a.percentile(90.0).unwrap().as_slice(), &[4.6]);
    /// assert!(a.percentile(101.0).is_err());
    /// ```
    pub fn percentile(&self, p: f64) -> Result<Vector> {
        if !(0.0..=100.0).contains(&p) {
            return Err(CoreError::InvalidArgument {
                reason: "percentile must be within [0, 100]",
            });
        }
        let rank = p / 100.0 * (self.m() - 1) as f64;
        let lo = rank.floor() as usize;
        let hi = rank.ceil() as usize;
        let frac = rank - lo as f64;

        Ok(self.reduce_columns(|col| {
            let sorted = sorted(col);
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }))
    }

    /// `n x n` population covariance of the columns.
    ///
    /// The diagonal equals [`Matrix::variance`].
    #[allow(clippy::needless_range_loop)]
    pub fn covariance(&self) -> Matrix {
        let (m, n) = self.shape();
        let data = self.as_slice();
        let means = self.mean().into_vec();

        let mut cov = vec![0.0; n * n];
        for j in 0..n {
            for k in j..n {
                let mut acc = 0.0;
                for i in 0..m {
                    acc += (data[i * n + j] - means[j]) * (data[i * n + k] - means[k]);
                }
                cov[j * n + k] = acc / m as f64;
                cov[k * n + j] = cov[j * n + k];
            }
        }

        Matrix::from_vec_unchecked(cov, n, n)
    }

    // ------------------------------------------------------------------
    // Norms
    // ------------------------------------------------------------------

    /// Maximum absolute column sum.
    pub fn l1_norm(&self) -> f64 {
        self.abs().sum().as_slice().iter().copied().fold(0.0, f64::max)
    }

    /// Frobenius norm: square root of the sum of squares.
    pub fn l2_norm(&self) -> f64 {
        self.as_slice().iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// Maximum absolute row sum.
    pub fn infinity_norm(&self) -> f64 {
        self.rows()
            .map(|row| row.iter().map(|x| x.abs()).sum::<f64>())
            .fold(0.0, f64::max)
    }

    /// Largest absolute element.
    pub fn max_norm(&self) -> f64 {
        self.max_abs()
    }

    fn reduce_columns<F>(&self, f: F) -> Vector
    where
        F: Fn(&[f64]) -> f64,
    {
        let (m, n) = self.shape();
        let data = self.as_slice();
        let mut col = vec![0.0; m];
        let out = (0..n)
            .map(|j| {
                for (i, slot) in col.iter_mut().enumerate() {
                    *slot = data[i * n + j];
                }
                f(&col)
            })
            .collect();
        Vector::quick(out)
    }
}

fn sorted(col: &[f64]) -> Vec<f64> {
    let mut v = col.to_vec();
    v.sort_unstable_by(f64::total_cmp);
    v
}

fn arg_best(col: &[f64], better: impl Fn(f64, f64) -> bool) -> f64 {
    let mut best = 0;
    for (i, &x) in col.iter().enumerate().skip(1) {
        if better(x, col[best]) {
            best = i;
        }
    }
    best as f64
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn approx_eq(a: &[f64], b: &[f64], tol: f64) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| (x - y).abs() < tol)
    }

    fn a() -> Matrix {
        Matrix::quick(&[
            [22.0, -17.0, 12.0],
            [4.0, 11.0, -2.0],
            [20.0, -6.0, -9.0],
        ])
    }

    /// Observations in rows: the columns are the rows of `a`.
    fn at() -> Matrix {
        a().transpose()
    }

    #[test]
    fn test_sum_product() {
        assert_eq!(at().sum().as_slice(), &[17.0, 13.0, 5.0]);
        assert_eq!(at().product().as_slice(), &[-4488.0, -88.0, 1080.0]);
    }

    #[test]
    fn test_min_max() {
        assert_eq!(at().min().as_slice(), &[-17.0, -2.0, -9.0]);
        assert_eq!(at().max().as_slice(), &[22.0, 11.0, 20.0]);
        assert_eq!(at().argmin().as_slice(), &[1.0, 2.0, 2.0]);
        assert_eq!(at().argmax().as_slice(), &[0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_argmax_first_occurrence() {
        let t = Matrix::quick(&[[1.0, 5.0], [3.0, 5.0], [3.0, 0.0]]);
        assert_eq!(t.argmax().as_slice(), &[1.0, 0.0]);
        assert_eq!(t.argmin().as_slice(), &[0.0, 2.0]);
    }

    #[test]
    fn test_mean_variance() {
        assert!(approx_eq(
            at().mean().as_slice(),
            &[5.666_666_666_666_667, 4.333_333_333_333_333, 1.666_666_666_666_666_7],
            1e-12
        ));
        assert!(approx_eq(
            at().variance().as_slice(),
            &[273.555_555_555_555_54, 28.222_222_222_222_225, 169.555_555_555_555_54],
            1e-10
        ));
    }

    #[test]
    fn test_median_percentile() {
        assert_eq!(at().median().as_slice(), &[12.0, 4.0, -6.0]);
        assert!(approx_eq(
            at().percentile(40.0).unwrap().as_slice(),
            &[6.2, 2.8, -6.6],
            1e-12
        ));
        assert_eq!(at().percentile(0.0).unwrap(), at().min());
        assert_eq!(at().percentile(100.0).unwrap(), at().max());
    }

    #[test]
    fn test_median_even_rows() {
        let t = Matrix::quick(&[[4.0], [1.0], [3.0], [2.0]]);
        assert_eq!(t.median().as_slice(), &[2.5]);
    }

    #[test]
    fn test_percentile_out_of_range() {
        assert!(at().percentile(-0.5).is_err());
        assert!(at().percentile(100.5).is_err());
        assert!(at().percentile(f64::NAN).is_err());
    }

    #[test]
    fn test_covariance() {
        let cov = at().covariance();
        assert_eq!(cov.shape(), (3, 3));
        assert!(approx_eq(
            cov.as_slice(),
            &[
                273.555_555_555_555_54,
                -65.555_555_555_555_56,
                135.222_222_222_222_23,
                -65.555_555_555_555_56,
                28.222_222_222_222_225,
                3.444_444_444_444_444_6,
                135.222_222_222_222_23,
                3.444_444_444_444_444_6,
                169.555_555_555_555_54,
            ],
            1e-10
        ));
        assert_eq!(cov, cov.transpose());
        assert!(approx_eq(
            cov.diagonal_as_vector().as_slice(),
            at().variance().as_slice(),
            1e-12
        ));
    }

    #[test]
    fn test_norms() {
        assert_eq!(a().l1_norm(), 46.0);
        assert!((a().l2_norm() - 39.686_269_665_968_86).abs() < 1e-12);
        assert_eq!(a().infinity_norm(), 51.0);
        assert_eq!(a().max_norm(), 22.0);
    }

    #[test]
    fn test_single_row() {
        let r = Matrix::quick(&[[3.0, -1.0]]);
        assert_eq!(r.variance().as_slice(), &[0.0, 0.0]);
        assert_eq!(r.median().as_slice(), &[3.0, -1.0]);
        assert_eq!(r.percentile(37.0).unwrap().as_slice(), &[3.0, -1.0]);
    }
}
