//! Eigendecomposition of real square matrices.
//!
//! Two solvers share one result type:
//!
//! - **Symmetric** inputs (within [`Config::symmetry_tolerance`]) use cyclic
//!   Jacobi rotations. `A = V diag(d) V^T` with `V` orthogonal.
//! - **General** inputs are reduced to upper Hessenberg form by Householder
//!   reflections and then to real Schur form `T = Z^T A Z` by Francis
//!   double-shift QR iteration with deflation. Eigenvalues are read from the
//!   diagonal of `T`; eigenvectors come from back-substitution on `T`, mapped
//!   through `Z`.
//!
//! Both solvers stop at [`Config::eigen_max_iterations`] and return their best
//! approximation instead of failing; [`Eigen::converged`] reports which case
//! occurred. Complex conjugate pairs are not represented: their eigenvalues
//! and eigenvector columns are NaN.

use core::cmp::Ordering;
use core::ops::Range;

use crate::config::Config;
use crate::error::Result;
use crate::linalg::is_symmetric;
use crate::matrix::{Matrix, Vector};

/// Iteration counts (within one deflation window) at which an exceptional
/// shift replaces the Francis shift.
const EXCEPTIONAL_SHIFTS: [usize; 2] = [10, 20];

/// Result of an eigendecomposition.
#[derive(Debug, Clone)]
pub struct Eigen {
    /// Eigenvalues in descending order of absolute value, NaN last.
    eigenvalues: Vec<f64>,
    /// Eigenvectors as columns of an n x n matrix (stored row-major).
    eigenvectors: Vec<f64>,
    n: usize,
    symmetric: bool,
    converged: bool,
    iterations: usize,
}

impl Eigen {
    /// Compute eigenvalues and eigenvectors with the default [`Config`].
    ///
    /// ```
    /// # use tessera_core::{Eigen, Matrix};
    /// let a = Matrix::build(&[[2.0, 1.0], [1.0, 3.0]]).unwrap();
    /// let eig = Eigen::decompose(&a).unwrap();
    /// // Eigenvalues of [[2,1],[1,3]] are (5 ± sqrt(5)) / 2
    /// let expected = (5.0 + 5.0_f64.sqrt()) / 2.0;
    /// assert!((eig.eigenvalues()[0] - expected).abs() < 1e-12);
    /// assert!(eig.converged());
    /// ```
    pub fn decompose(a: &Matrix) -> Result<Self> {
        Self::decompose_with(a, &Config::default())
    }

    /// Compute eigenvalues and eigenvectors using the iteration cap and
    /// tolerances in `config`.
    pub fn decompose_with(a: &Matrix, config: &Config) -> Result<Self> {
        let n = a.require_square("eigendecomposition")?;
        let symmetric = is_symmetric(a, config.symmetry_tolerance());

        let raw = if symmetric {
            jacobi(a.as_slice(), n, config)
        } else {
            general(a.as_slice(), n, config)
        };

        if !raw.converged {
            log::warn!(
                "eigendecomposition of a {n} x {n} matrix stopped at the iteration cap ({}); \
                 returning a best-effort approximation",
                raw.iterations
            );
        }

        Ok(Self::finish(raw, n, symmetric))
    }

    /// The eigenvalues, sorted by descending absolute value.
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    /// The eigenvalues as a [`Vector`].
    pub fn eigenvalues_vector(&self) -> Vector {
        Vector::quick(self.eigenvalues.clone())
    }

    /// The eigenvector matrix `V` (n x n, column `k` belongs to eigenvalue `k`).
    pub fn eigenvectors(&self) -> Matrix {
        Matrix::from_vec_unchecked(self.eigenvectors.clone(), self.n, self.n)
    }

    /// `false` if the iteration cap was reached before convergence.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Jacobi sweeps (symmetric) or QR steps (general) performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// `true` if the symmetric solver was used.
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Normalize, orient, and sort the raw solver output.
    fn finish(raw: Raw, n: usize, symmetric: bool) -> Self {
        let Raw {
            values,
            mut vectors,
            converged,
            iterations,
        } = raw;

        let negligible = f64::EPSILON * n as f64;
        for k in 0..n {
            let norm = (0..n).map(|i| vectors[i * n + k].powi(2)).sum::<f64>().sqrt();
            if !norm.is_finite() || norm == 0.0 {
                continue;
            }
            let last = (0..n)
                .rev()
                .map(|i| vectors[i * n + k] / norm)
                .find(|x| x.abs() > negligible)
                .unwrap_or(1.0);
            let scale = if last < 0.0 { -norm } else { norm };
            for i in 0..n {
                vectors[i * n + k] /= scale;
            }
        }

        let magnitude = |x: f64| if x.is_nan() { -1.0 } else { x.abs() };
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&i, &j| {
            magnitude(values[j])
                .partial_cmp(&magnitude(values[i]))
                .unwrap_or(Ordering::Equal)
        });

        let eigenvalues = order.iter().map(|&k| values[k]).collect();
        let mut eigenvectors = vec![0.0; n * n];
        for (new_k, &old_k) in order.iter().enumerate() {
            for i in 0..n {
                eigenvectors[i * n + new_k] = vectors[i * n + old_k];
            }
        }

        Self {
            eigenvalues,
            eigenvectors,
            n,
            symmetric,
            converged,
            iterations,
        }
    }
}

/// Unsorted solver output: eigenvalue `k` belongs to column `k`.
struct Raw {
    values: Vec<f64>,
    vectors: Vec<f64>,
    converged: bool,
    iterations: usize,
}

fn identity(n: usize) -> Vec<f64> {
    let mut v = vec![0.0; n * n];
    for i in 0..n {
        v[i * n + i] = 1.0;
    }
    v
}

// ======================================================================
// Symmetric: cyclic Jacobi
// ======================================================================

#[allow(clippy::many_single_char_names)]
fn jacobi(a: &[f64], n: usize, config: &Config) -> Raw {
    // Average the two triangles so the rotations see an exactly symmetric matrix.
    let mut s = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            s[i * n + j] = 0.5 * (a[i * n + j] + a[j * n + i]);
        }
    }
    let mut v = identity(n);

    let frobenius = s.iter().map(|x| x * x).sum::<f64>().sqrt();
    let threshold = config.eigen_tolerance() * frobenius;

    let mut sweeps = 0;
    let converged = loop {
        let off = (0..n)
            .flat_map(|p| ((p + 1)..n).map(move |q| (p, q)))
            .fold(0.0_f64, |acc, (p, q)| acc.max(s[p * n + q].abs()));
        if off <= threshold {
            break true;
        }
        if sweeps == config.eigen_max_iterations() {
            break false;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = s[p * n + q];
                if apq.abs() <= threshold {
                    continue;
                }

                let app = s[p * n + p];
                let aqq = s[q * n + q];

                let theta = (aqq - app) / (apq + apq);
                let t = if theta >= 0.0 {
                    1.0 / (theta + (1.0 + theta * theta).sqrt())
                } else {
                    -1.0 / (-theta + (1.0 + theta * theta).sqrt())
                };
                let cs = 1.0 / (1.0 + t * t).sqrt();
                let sn = t * cs;

                // S' = G^T S G on rows/cols p and q
                s[p * n + p] = app - t * apq;
                s[q * n + q] = aqq + t * apq;
                s[p * n + q] = 0.0;
                s[q * n + p] = 0.0;

                for r in 0..n {
                    if r == p || r == q {
                        continue;
                    }
                    let srp = s[r * n + p];
                    let srq = s[r * n + q];
                    s[r * n + p] = cs * srp - sn * srq;
                    s[p * n + r] = cs * srp - sn * srq;
                    s[r * n + q] = sn * srp + cs * srq;
                    s[q * n + r] = sn * srp + cs * srq;
                }

                // V' = V G
                for i in 0..n {
                    let vp = v[i * n + p];
                    let vq = v[i * n + q];
                    v[i * n + p] = cs * vp - sn * vq;
                    v[i * n + q] = sn * vp + cs * vq;
                }
            }
        }
        sweeps += 1;
    };

    Raw {
        values: (0..n).map(|i| s[i * n + i]).collect(),
        vectors: v,
        converged,
        iterations: sweeps,
    }
}

// ======================================================================
// General: Hessenberg reduction + Francis double-shift QR
// ======================================================================

fn general(a: &[f64], n: usize, config: &Config) -> Raw {
    let Schur {
        t,
        z,
        complex,
        converged,
        iterations,
    } = schur(a, n, config);

    let values: Vec<f64> = (0..n)
        .map(|i| if complex[i] { f64::NAN } else { t[i * n + i] })
        .collect();

    let norm = t.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
    let small = (f64::EPSILON * norm).max(f64::MIN_POSITIVE);

    let mut vectors = vec![0.0; n * n];
    let mut y = vec![0.0; n];
    for k in 0..n {
        if complex[k] {
            for i in 0..n {
                vectors[i * n + k] = f64::NAN;
            }
            continue;
        }
        back_substitute(&t, n, k, small, &mut y);
        for i in 0..n {
            vectors[i * n + k] = (0..=k).map(|j| z[i * n + j] * y[j]).sum();
        }
    }

    Raw {
        values,
        vectors,
        converged,
        iterations,
    }
}

/// Solve `(T - t_kk I) y = 0` with `y_k = 1` and `y_j = 0` for `j > k`.
///
/// Rows belonging to a 2x2 block (non-zero subdiagonal) are solved as a
/// pair.
#[allow(clippy::many_single_char_names)]
fn back_substitute(t: &[f64], n: usize, k: usize, small: f64, y: &mut [f64]) {
    let lambda = t[k * n + k];
    y.fill(0.0);
    y[k] = 1.0;

    let tail = |row: usize, from: usize, y: &[f64]| -> f64 {
        (from..=k).map(|j| t[row * n + j] * y[j]).sum()
    };

    let mut i = k;
    while i > 0 {
        let row = i - 1;
        if row > 0 && t[row * n + row - 1] != 0.0 {
            let (p, q) = (row - 1, row);
            let r1 = -tail(p, q + 1, y);
            let r2 = -tail(q, q + 1, y);
            let a = t[p * n + p] - lambda;
            let b = t[p * n + q];
            let c = t[q * n + p];
            let d = t[q * n + q] - lambda;
            let det = a * d - b * c;
            y[p] = (r1 * d - b * r2) / det;
            y[q] = (a * r2 - c * r1) / det;
            i -= 2;
            continue;
        }

        let mut den = t[row * n + row] - lambda;
        if den.abs() < small {
            den = small;
        }
        y[row] = -tail(row, row + 1, y) / den;
        i -= 1;
    }
}

struct Schur {
    t: Vec<f64>,
    z: Vec<f64>,
    /// Rows of 2x2 blocks with complex eigenvalues.
    complex: Vec<bool>,
    converged: bool,
    iterations: usize,
}

fn schur(a: &[f64], n: usize, config: &Config) -> Schur {
    let mut h = a.to_vec();
    let mut z = identity(n);
    hessenberg(&mut h, &mut z, n);

    let tol = config.eigen_tolerance();
    let norm = h.iter().map(|x| x.abs()).sum::<f64>();
    let mut complex = vec![false; n];
    let mut converged = true;
    let mut its = 0;
    let mut total = 0;
    let mut hi = n - 1;

    while hi > 0 {
        let lo = deflation_point(&mut h, n, hi, tol, norm);

        if lo == hi {
            hi -= 1;
            its = 0;
            continue;
        }

        if lo + 1 == hi {
            if !split_block(&mut h, &mut z, n, lo) {
                log::debug!("complex eigenvalue pair at rows {lo}..={hi}; reporting NaN");
                complex[lo] = true;
                complex[hi] = true;
            }
            if hi < 2 {
                break;
            }
            hi -= 2;
            its = 0;
            continue;
        }

        if total == config.eigen_max_iterations() {
            converged = false;
            // Best effort: treat the unreduced window as triangular.
            for i in (lo + 1)..=hi {
                h[i * n + i - 1] = 0.0;
            }
            break;
        }

        francis_step(&mut h, &mut z, n, lo, hi, its);
        its += 1;
        total += 1;
    }

    Schur {
        t: h,
        z,
        complex,
        converged,
        iterations: total,
    }
}

/// Reduce `h` to upper Hessenberg form, accumulating the reflections in `z`.
fn hessenberg(h: &mut [f64], z: &mut [f64], n: usize) {
    for k in 0..n.saturating_sub(2) {
        let mut v: Vec<f64> = ((k + 1)..n).map(|i| h[i * n + k]).collect();
        let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm == 0.0 {
            continue;
        }
        v[0] += if v[0] >= 0.0 { norm } else { -norm };

        reflect(h, z, n, k + 1, &v, 0..n, 0..n);
        for i in (k + 2)..n {
            h[i * n + k] = 0.0;
        }
    }
}

/// Largest `l <= hi` whose subdiagonal entry `h[l][l-1]` is negligible (or 0).
/// The negligible entry is set to exactly zero.
fn deflation_point(h: &mut [f64], n: usize, hi: usize, tol: f64, norm: f64) -> usize {
    let mut l = hi;
    while l > 0 {
        let sub = h[l * n + l - 1].abs();
        let mut scale = h[(l - 1) * n + l - 1].abs() + h[l * n + l].abs();
        if scale == 0.0 {
            scale = norm;
        }
        if sub <= tol * scale || sub < f64::MIN_POSITIVE {
            h[l * n + l - 1] = 0.0;
            break;
        }
        l -= 1;
    }
    l
}

/// Triangularize the 2x2 diagonal block at rows `p, p + 1` if its
/// eigenvalues are real. Returns `false` for a complex pair.
#[allow(clippy::many_single_char_names)]
fn split_block(h: &mut [f64], z: &mut [f64], n: usize, p: usize) -> bool {
    let q = p + 1;
    let (a, b, c, d) = (h[p * n + p], h[p * n + q], h[q * n + p], h[q * n + q]);

    let half = 0.5 * (a - d);
    let disc = half * half + b * c;
    if disc < 0.0 {
        return false;
    }

    let root = disc.sqrt();
    let mid = 0.5 * (a + d);
    let (l1, l2) = (mid + root, mid - root);
    let lambda = if (l1 - d).abs() < (l2 - d).abs() { l1 } else { l2 };

    // Eigenvector of the block for `lambda`.
    let (mut x0, mut x1) = (b, lambda - a);
    if x0 == 0.0 && x1 == 0.0 {
        (x0, x1) = (lambda - d, c);
    }
    let r = x0.hypot(x1);
    if r > 0.0 {
        let (cs, sn) = (x0 / r, x1 / r);
        rotate_rows(h, n, p, q, cs, sn, 0..n);
        rotate_cols(h, n, p, q, cs, sn, 0..n);
        rotate_cols(z, n, p, q, cs, sn, 0..n);
    }
    h[q * n + p] = 0.0;
    true
}

/// One implicit double-shift QR step on the active window `lo..=hi`.
#[allow(clippy::many_single_char_names)]
fn francis_step(h: &mut [f64], z: &mut [f64], n: usize, lo: usize, hi: usize, its: usize) {
    let p = hi - 1;
    let (s, t) = if EXCEPTIONAL_SHIFTS.contains(&its) {
        let w = h[hi * n + p].abs() + h[p * n + p - 1].abs();
        (1.5 * w, w * w)
    } else {
        (
            h[p * n + p] + h[hi * n + hi],
            h[p * n + p] * h[hi * n + hi] - h[p * n + hi] * h[hi * n + p],
        )
    };

    // First column of (H - s1 I)(H - s2 I).
    let h00 = h[lo * n + lo];
    let h10 = h[(lo + 1) * n + lo];
    let mut x = h00 * h00 + h[lo * n + lo + 1] * h10 - s * h00 + t;
    let mut y = h10 * (h00 + h[(lo + 1) * n + lo + 1] - s);
    let mut w = h10 * h[(lo + 2) * n + lo + 1];

    // Chase the bulge down the window.
    for k in lo..(hi - 1) {
        if let Some(v) = householder(&[x, y, w]) {
            let cols = k.saturating_sub(1).max(lo)..n;
            let rows = 0..(k + 4).min(hi + 1);
            reflect(h, z, n, k, &v, cols, rows);
        }
        if k > lo {
            h[(k + 1) * n + k - 1] = 0.0;
            h[(k + 2) * n + k - 1] = 0.0;
        }
        x = h[(k + 1) * n + k];
        y = h[(k + 2) * n + k];
        if k + 3 <= hi {
            w = h[(k + 3) * n + k];
        }
    }

    if let Some(v) = householder(&[x, y]) {
        reflect(h, z, n, hi - 1, &v, (hi - 2)..n, 0..(hi + 1));
    }
    h[hi * n + hi - 2] = 0.0;
}

/// Householder vector `v` with `(I - 2 v v^T / v^T v) x = -sign(x0) |x| e1`.
fn householder(x: &[f64]) -> Option<Vec<f64>> {
    let norm = x.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm == 0.0 {
        return None;
    }
    let mut v = x.to_vec();
    v[0] += if x[0] >= 0.0 { norm } else { -norm };
    Some(v)
}

/// Apply the reflection `P = I - 2 v v^T / v^T v` acting on indices
/// `k..k + v.len()`: `H <- P H` on `cols`, `H <- H P` on `rows`, `Z <- Z P`.
#[allow(clippy::needless_range_loop)]
fn reflect(
    h: &mut [f64],
    z: &mut [f64],
    n: usize,
    k: usize,
    v: &[f64],
    cols: Range<usize>,
    rows: Range<usize>,
) {
    let vv: f64 = v.iter().map(|x| x * x).sum();
    if vv == 0.0 {
        return;
    }
    let m = v.len();

    for j in cols {
        let d = 2.0 * (0..m).map(|i| v[i] * h[(k + i) * n + j]).sum::<f64>() / vv;
        for i in 0..m {
            h[(k + i) * n + j] -= d * v[i];
        }
    }

    reflect_cols(h, n, k, v, vv, rows);
    reflect_cols(z, n, k, v, vv, 0..n);
}

#[allow(clippy::needless_range_loop)]
fn reflect_cols(target: &mut [f64], n: usize, k: usize, v: &[f64], vv: f64, rows: Range<usize>) {
    let m = v.len();
    for i in rows {
        let d = 2.0 * (0..m).map(|j| target[i * n + k + j] * v[j]).sum::<f64>() / vv;
        for j in 0..m {
            target[i * n + k + j] -= d * v[j];
        }
    }
}

/// `[row_p; row_q] <- G^T [row_p; row_q]` on `cols`, `G = [[c, -s], [s, c]]`.
fn rotate_rows(h: &mut [f64], n: usize, p: usize, q: usize, c: f64, s: f64, cols: Range<usize>) {
    for j in cols {
        let t1 = h[p * n + j];
        let t2 = h[q * n + j];
        h[p * n + j] = c * t1 + s * t2;
        h[q * n + j] = -s * t1 + c * t2;
    }
}

/// `[col_p, col_q] <- [col_p, col_q] G` on `rows`.
fn rotate_cols(h: &mut [f64], n: usize, p: usize, q: usize, c: f64, s: f64, rows: Range<usize>) {
    for i in rows {
        let t1 = h[i * n + p];
        let t2 = h[i * n + q];
        h[i * n + p] = c * t1 + s * t2;
        h[i * n + q] = -s * t1 + c * t2;
    }
}
