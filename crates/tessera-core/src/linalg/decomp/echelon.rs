//! Row echelon (REF) and reduced row echelon (RREF) forms.
//!
//! Both run the same forward pass of Gaussian elimination with partial
//! pivoting. For every column the row with the largest absolute entry at or
//! below the current pivot row is swapped into place and the entries below it
//! are eliminated. Columns without a usable pivot are zeroed and skipped, so
//! the pivot row only advances on real pivots and the number of pivots is the
//! numerical rank. RREF then normalizes every pivot to 1 and clears the rest
//! of its column.

use crate::config::Config;
use crate::error::Result;
use crate::matrix::Matrix;

/// Row echelon form of an `m x n` matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Ref {
    a: Matrix,
    swaps: usize,
    rank: usize,
}

impl Ref {
    /// Reduce `a` to row echelon form with the default [`Config`].
    ///
    /// ```
    /// # use tessera_core::{Matrix, Ref};
    /// let a = Matrix::build(&[[2.0, 1.0], [4.0, 3.0]]).unwrap();
    /// let r = Ref::decompose(&a);
    /// assert_eq!(r.a().as_slice(), &[4.0, 3.0, 0.0, -0.5]);
    /// assert_eq!(r.swaps(), 1);
    /// assert!((r.det().unwrap() - 2.0).abs() < 1e-12);
    /// ```
    pub fn decompose(a: &Matrix) -> Self {
        Self::decompose_with(a, &Config::default())
    }

    /// Reduce `a` to row echelon form using the thresholds in `config`.
    pub fn decompose_with(a: &Matrix, config: &Config) -> Self {
        let (m, n) = a.shape();
        let mut data = a.as_slice().to_vec();
        let tol = config.pivot_tolerance(m, n, a.max_abs());
        let Forward { swaps, pivots } = forward(&mut data, m, n, tol);

        Self {
            a: Matrix::from_vec_unchecked(data, m, n),
            swaps,
            rank: pivots.len(),
        }
    }

    /// The row echelon matrix.
    pub fn a(&self) -> &Matrix {
        &self.a
    }

    pub fn into_matrix(self) -> Matrix {
        self.a
    }

    /// Number of row exchanges performed.
    pub fn swaps(&self) -> usize {
        self.swaps
    }

    /// Number of usable pivots found.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// `true` if a column without a usable pivot was met before the pivots
    /// ran out, i.e. the rank is below `min(m, n)`.
    pub fn is_singular(&self) -> bool {
        self.rank < self.a.m().min(self.a.n())
    }

    /// Determinant of the original matrix: the product of the diagonal,
    /// negated for an odd number of swaps.
    pub fn det(&self) -> Result<f64> {
        let n = self.a.require_square("determinant")?;
        let product: f64 = (0..n).map(|i| self.a.as_slice()[i * n + i]).product();
        Ok(if self.swaps % 2 == 0 { product } else { -product })
    }
}

/// Reduced row echelon form of an `m x n` matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Rref {
    a: Matrix,
    pivots: Vec<usize>,
}

impl Rref {
    /// Reduce `a` to reduced row echelon form with the default [`Config`].
    ///
    /// ```
    /// # use tessera_core::{Matrix, Rref};
    /// let a = Matrix::build(&[[1.0, 2.0, 3.0], [2.0, 4.0, 7.0]]).unwrap();
    /// let r = Rref::decompose(&a);
    /// assert_eq!(r.a().as_slice(), &[1.0, 2.0, 0.0, 0.0, 0.0, 1.0]);
    /// assert_eq!(r.pivot_columns(), &[0, 2]);
    /// ```
    pub fn decompose(a: &Matrix) -> Self {
        Self::decompose_with(a, &Config::default())
    }

    /// Reduce `a` to reduced row echelon form using the thresholds in
    /// `config`.
    #[allow(clippy::needless_range_loop)]
    pub fn decompose_with(a: &Matrix, config: &Config) -> Self {
        let (m, n) = a.shape();
        let mut data = a.as_slice().to_vec();
        let tol = config.pivot_tolerance(m, n, a.max_abs());
        let Forward { pivots, .. } = forward(&mut data, m, n, tol);

        for (r, &c) in pivots.iter().enumerate().rev() {
            let pivot = data[r * n + c];
            for j in (c + 1)..n {
                data[r * n + j] /= pivot;
            }
            data[r * n + c] = 1.0;

            for i in 0..r {
                let factor = data[i * n + c];
                if factor == 0.0 {
                    continue;
                }
                for j in (c + 1)..n {
                    let rj = data[r * n + j];
                    data[i * n + j] -= factor * rj;
                }
                data[i * n + c] = 0.0;
            }
        }

        Self {
            a: Matrix::from_vec_unchecked(data, m, n),
            pivots,
        }
    }

    /// The reduced row echelon matrix.
    pub fn a(&self) -> &Matrix {
        &self.a
    }

    pub fn into_matrix(self) -> Matrix {
        self.a
    }

    /// Column index of the pivot in each non-zero row.
    pub fn pivot_columns(&self) -> &[usize] {
        &self.pivots
    }

    pub fn rank(&self) -> usize {
        self.pivots.len()
    }
}

// ======================================================================
// Forward elimination
// ======================================================================

struct Forward {
    swaps: usize,
    /// Pivot column of row `r` at index `r`.
    pivots: Vec<usize>,
}

#[allow(clippy::needless_range_loop)]
fn forward(data: &mut [f64], m: usize, n: usize, tol: f64) -> Forward {
    let mut swaps = 0;
    let mut pivots = Vec::with_capacity(m.min(n));
    let mut r = 0;

    for c in 0..n {
        if r == m {
            break;
        }

        let mut max_val = data[r * n + c].abs();
        let mut max_row = r;
        for i in (r + 1)..m {
            let val = data[i * n + c].abs();
            if val > max_val {
                max_val = val;
                max_row = i;
            }
        }

        if max_val <= tol {
            log::trace!("column {c}: no usable pivot (|max| = {max_val:e} <= {tol:e})");
            for i in r..m {
                data[i * n + c] = 0.0;
            }
            continue;
        }

        if max_row != r {
            for j in 0..n {
                data.swap(r * n + j, max_row * n + j);
            }
            swaps += 1;
        }
        log::trace!("column {c}: pivot {} from row {max_row}", data[r * n + c]);

        let pivot = data[r * n + c];
        for i in (r + 1)..m {
            let factor = data[i * n + c] / pivot;
            if factor == 0.0 {
                continue;
            }
            for j in (c + 1)..n {
                let rj = data[r * n + j];
                data[i * n + j] -= factor * rj;
            }
            data[i * n + c] = 0.0;
        }

        pivots.push(c);
        r += 1;
    }

    Forward { swaps, pivots }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn a() -> Matrix {
        Matrix::quick(&[
            [22.0, -17.0, 12.0],
            [4.0, 11.0, -2.0],
            [20.0, -6.0, -9.0],
        ])
    }

    fn approx_eq(a: &[f64], b: &[f64], tol: f64) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| (x - y).abs() < tol)
    }

    #[test]
    fn test_ref_3x3() {
        let r = Ref::decompose(&a());
        assert!(approx_eq(
            r.a().as_slice(),
            &[
                22.0,
                -17.0,
                12.0,
                0.0,
                14.090_909_090_909_09,
                -4.181_818_181_818_182,
                0.0,
                0.0,
                -17.103_225_806_451_61,
            ],
            1e-12
        ));
        assert_eq!(r.swaps(), 0);
        assert_eq!(r.rank(), 3);
        assert!(!r.is_singular());
    }

    #[test]
    fn test_ref_below_pivots_exactly_zero() {
        let r = Ref::decompose(&a());
        let z = r.a();
        assert_eq!(z.get(1, 0).unwrap(), 0.0);
        assert_eq!(z.get(2, 0).unwrap(), 0.0);
        assert_eq!(z.get(2, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_ref_counts_swaps() {
        let a = Matrix::quick(&[[0.0, 1.0], [1.0, 0.0]]);
        let r = Ref::decompose(&a);
        assert_eq!(r.swaps(), 1);
        assert_eq!(r.det().unwrap(), -1.0);
    }

    #[test]
    fn test_ref_rank_deficient() {
        let a = Matrix::quick(&[[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [7.0, 8.0, 9.0]]);
        let r = Ref::decompose(&a);
        assert_eq!(r.rank(), 2);
        assert!(r.is_singular());
        assert!(r.det().unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_ref_rectangular() {
        let b = Matrix::quick(&[[13.0], [11.0], [9.0]]);
        let r = Ref::decompose(&b);
        assert_eq!(r.a().as_slice(), &[13.0, 0.0, 0.0]);
        assert_eq!(r.rank(), 1);
        assert!(!r.is_singular());
        assert!(r.det().is_err());

        let wide = Matrix::quick(&[[0.0, 0.0, 1.0], [0.0, 2.0, 4.0]]);
        let r = Ref::decompose(&wide);
        assert_eq!(r.a().as_slice(), &[0.0, 2.0, 4.0, 0.0, 0.0, 1.0]);
        assert_eq!(r.rank(), 2);
    }

    #[test]
    fn test_ref_zero_matrix() {
        let z = Matrix::zeros(2, 3).unwrap();
        let r = Ref::decompose(&z);
        assert_eq!(r.rank(), 0);
        assert!(r.is_singular());
    }

    #[test]
    fn test_ref_explicit_tolerance() {
        let a = Matrix::quick(&[[1.0, 0.0], [0.0, 1e-9]]);
        assert_eq!(Ref::decompose(&a).rank(), 2);
        let config = Config::default().with_pivot_tolerance(1e-6);
        assert_eq!(Ref::decompose_with(&a, &config).rank(), 1);
    }

    #[test]
    fn test_rref_full_rank_is_identity() {
        let r = Rref::decompose(&a());
        assert_eq!(r.a(), &Matrix::identity(3).unwrap());
        assert_eq!(r.rank(), 3);
    }

    #[test]
    fn test_rref_rank_deficient() {
        let a = Matrix::quick(&[[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [7.0, 8.0, 9.0]]);
        let r = Rref::decompose(&a);
        assert_eq!(r.pivot_columns(), &[0, 1]);
        let z = r.a();
        assert_eq!(z.row(0).unwrap()[..2], [1.0, 0.0]);
        assert_eq!(z.row(1).unwrap()[..2], [0.0, 1.0]);
        assert!(approx_eq(z.row(0).unwrap(), &[1.0, 0.0, -1.0], 1e-12));
        assert!(approx_eq(z.row(1).unwrap(), &[0.0, 1.0, 2.0], 1e-12));
        assert_eq!(z.row(2).unwrap(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_rref_augmented_system() {
        // x + y = 3, x - y = 1  =>  x = 2, y = 1
        let a = Matrix::quick(&[[1.0, 1.0, 3.0], [1.0, -1.0, 1.0]]);
        let r = Rref::decompose(&a);
        assert!(approx_eq(r.a().as_slice(), &[1.0, 0.0, 2.0, 0.0, 1.0, 1.0], 1e-12));
    }

    #[test]
    fn test_det() {
        assert!((Ref::decompose(&a()).det().unwrap() - -5302.0).abs() < 1e-9);
        let c = Matrix::quick(&[[4.0, 6.0, -12.0], [1.0, 3.0, 5.0], [-10.0, -1.0, 14.0]]);
        let r = Ref::decompose(&c);
        assert!((r.det().unwrap() - -544.0).abs() < 1e-9);
        assert_eq!(r.rank(), 3);
        let b = Matrix::quick(&[[13.0], [11.0], [9.0]]);
        assert!(matches!(
            Ref::decompose(&b).det().unwrap_err(),
            CoreError::NotSquare { .. }
        ));
    }
}
