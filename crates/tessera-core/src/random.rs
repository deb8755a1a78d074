//! Randomly filled matrices and vectors.
//!
//! Sampling is delegated to [`rand`] and [`rand_distr`]; every generator takes
//! the RNG explicitly so callers control seeding.
//!
//! ```
//! # use tessera_core::Matrix;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let a = Matrix::uniform(3, 4, &mut rng).unwrap();
//! assert_eq!(a.shape(), (3, 4));
//! assert!(a.as_slice().iter().all(|x| (-1.0..1.0).contains(x)));
//! ```

use rand::Rng;
use rand::distr::StandardUniform;
use rand_distr::{Distribution, Poisson, StandardNormal};

use crate::error::{CoreError, Result};
use crate::matrix::{Matrix, Vector, check_dims};

fn sample<D, R>(len: usize, dist: D, rng: &mut R) -> Vec<f64>
where
    D: Distribution<f64>,
    R: Rng + ?Sized,
{
    dist.sample_iter(rng).take(len).collect()
}

fn poisson(lambda: f64) -> Result<Poisson<f64>> {
    if !lambda.is_finite() {
        return Err(CoreError::InvalidArgument {
            reason: "poisson rate must be finite",
        });
    }
    Poisson::new(lambda).map_err(|_| CoreError::InvalidArgument {
        reason: "poisson rate must be positive and within the sampler's range",
    })
}

impl Matrix {
    /// Uniform on `[0, 1)`.
    pub fn rand<R: Rng + ?Sized>(m: usize, n: usize, rng: &mut R) -> Result<Matrix> {
        check_dims(m, n)?;
        Ok(Matrix::from_vec_unchecked(sample(m * n, StandardUniform, rng), m, n))
    }

    /// Uniform on `[-1, 1)`.
    pub fn uniform<R: Rng + ?Sized>(m: usize, n: usize, rng: &mut R) -> Result<Matrix> {
        Ok(Matrix::rand(m, n, rng)?.map(|x| 2.0 * x - 1.0))
    }

    /// Standard normal.
    pub fn gaussian<R: Rng + ?Sized>(m: usize, n: usize, rng: &mut R) -> Result<Matrix> {
        check_dims(m, n)?;
        Ok(Matrix::from_vec_unchecked(sample(m * n, StandardNormal, rng), m, n))
    }

    /// Poisson counts with rate `lambda`.
    pub fn poisson<R: Rng + ?Sized>(m: usize, n: usize, lambda: f64, rng: &mut R) -> Result<Matrix> {
        check_dims(m, n)?;
        let dist = poisson(lambda)?;
        Ok(Matrix::from_vec_unchecked(sample(m * n, dist, rng), m, n))
    }
}

impl Vector {
    /// Uniform on `[0, 1)`.
    pub fn rand<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Vector> {
        check_dims(1, n)?;
        Ok(Vector::quick(sample(n, StandardUniform, rng)))
    }

    /// Uniform on `[-1, 1)`.
    pub fn uniform<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Vector> {
        Ok(Vector::rand(n, rng)?.map(|x| 2.0 * x - 1.0))
    }

    /// Standard normal.
    pub fn gaussian<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Vector> {
        check_dims(1, n)?;
        Ok(Vector::quick(sample(n, StandardNormal, rng)))
    }

    /// Poisson counts with rate `lambda`.
    pub fn poisson<R: Rng + ?Sized>(n: usize, lambda: f64, rng: &mut R) -> Result<Vector> {
        check_dims(1, n)?;
        let dist = poisson(lambda)?;
        Ok(Vector::quick(sample(n, dist, rng)))
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_rand_range_and_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let a = Matrix::rand(20, 30, &mut rng).unwrap();
        assert_eq!(a.shape(), (20, 30));
        assert!(a.as_slice().iter().all(|x| (0.0..1.0).contains(x)));
    }

    #[test]
    fn test_uniform_covers_negative_half() {
        let mut rng = StdRng::seed_from_u64(1);
        let v = Vector::uniform(1000, &mut rng).unwrap();
        assert!(v.as_slice().iter().all(|x| (-1.0..1.0).contains(x)));
        assert!(v.as_slice().iter().any(|&x| x < 0.0));
        assert!(v.as_slice().iter().any(|&x| x > 0.0));
    }

    #[test]
    fn test_gaussian_moments() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = Matrix::gaussian(10_000, 1, &mut rng).unwrap();
        let mean = a.mean().as_slice()[0];
        let var = a.variance().as_slice()[0];
        assert!(mean.abs() < 0.05, "mean {mean}");
        assert!((var - 1.0).abs() < 0.1, "variance {var}");
    }

    #[test]
    fn test_poisson_counts() {
        let mut rng = StdRng::seed_from_u64(9);
        let a = Matrix::poisson(50, 40, 4.0, &mut rng).unwrap();
        assert!(a.as_slice().iter().all(|&x| x >= 0.0 && x.fract() == 0.0));
        let mean = a.as_slice().iter().sum::<f64>() / 2000.0;
        assert!((mean - 4.0).abs() < 0.3, "mean {mean}");

        assert!(Matrix::poisson(2, 2, 0.0, &mut rng).is_err());
        assert!(Matrix::poisson(2, 2, -1.0, &mut rng).is_err());
        assert!(Vector::poisson(3, f64::INFINITY, &mut rng).is_err());
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = Matrix::gaussian(4, 4, &mut StdRng::seed_from_u64(11)).unwrap();
        let b = Matrix::gaussian(4, 4, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(Matrix::rand(0, 3, &mut rng).is_err());
        assert!(Vector::gaussian(0, &mut rng).is_err());
    }
}
