//! Pluggable execution backend for the heavy operations.
//!
//! The heavy [`Matrix`] methods (products, row reduction, decompositions and
//! convolution) go through [`active()`]. Until [`install`] is called that is the
//! [`ReferenceBackend`], which runs the algorithms in [`crate::linalg`] and
//! the reference convolution with a default [`Config`].
//!
//! An accelerated backend implements [`Backend`] and overrides only the
//! methods it speeds up; everything else falls through to the reference code.
//! Results must agree with the reference within floating-point tolerance.
//!
//! ```
//! # use tessera_core::backend;
//! let name = backend::active().name();
//! assert!(!name.is_empty());
//! ```

use std::fmt;
use std::sync::{LazyLock, OnceLock};

use crate::config::Config;
use crate::conv;
use crate::error::{CoreError, Result};
use crate::linalg::blas;
use crate::linalg::decomp::{Cholesky, Eigen, Lu, Ref, Rref};
use crate::matrix::Matrix;

/// Strategy interface for the heavy operations.
pub trait Backend: Send + Sync + fmt::Debug {
    /// Short identifier used in log output.
    fn name(&self) -> &str;

    /// Tolerances and iteration limits used by the default methods.
    fn config(&self) -> &Config;

    fn matmul(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        blas::matmul(a, b)
    }

    fn row_echelon(&self, a: &Matrix) -> Ref {
        Ref::decompose_with(a, self.config())
    }

    fn reduced_row_echelon(&self, a: &Matrix) -> Rref {
        Rref::decompose_with(a, self.config())
    }

    fn lu(&self, a: &Matrix) -> Result<Lu> {
        Lu::decompose_with(a, self.config())
    }

    fn cholesky(&self, a: &Matrix) -> Result<Cholesky> {
        Cholesky::decompose_with(a, self.config())
    }

    fn eig(&self, a: &Matrix) -> Result<Eigen> {
        Eigen::decompose_with(a, self.config())
    }

    fn convolve(&self, a: &Matrix, kernel: &Matrix, stride: usize) -> Result<Matrix> {
        conv::convolve(a, kernel, stride)
    }
}

/// The pure-Rust reference implementation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceBackend {
    config: Config,
}

impl ReferenceBackend {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Backend for ReferenceBackend {
    fn name(&self) -> &str {
        "reference"
    }

    fn config(&self) -> &Config {
        &self.config
    }
}

static INSTALLED: OnceLock<Box<dyn Backend>> = OnceLock::new();
static REFERENCE: LazyLock<ReferenceBackend> = LazyLock::new(ReferenceBackend::default);

/// Select the backend for the rest of the process.
///
/// May be called once; later calls fail with
/// [`CoreError::InvalidArgument`] and leave the first backend in place.
pub fn install(backend: Box<dyn Backend>) -> Result<()> {
    let name = backend.name().to_owned();
    INSTALLED
        .set(backend)
        .map_err(|_| CoreError::InvalidArgument {
            reason: "a backend is already installed",
        })?;
    log::info!("installed linear algebra backend `{name}`");
    Ok(())
}

/// The installed backend, or the reference one.
pub fn active() -> &'static dyn Backend {
    match INSTALLED.get() {
        Some(backend) => backend.as_ref(),
        None => &*REFERENCE,
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_defaults() {
        let backend = ReferenceBackend::default();
        assert_eq!(backend.name(), "reference");
        assert_eq!(backend.config(), &Config::default());
    }

    #[test]
    fn test_reference_uses_its_config() {
        let a = Matrix::quick(&[[1.0, 1e-9], [0.0, 1e-9]]);
        let loose = ReferenceBackend::new(Config::default().with_pivot_tolerance(1e-6));
        assert_eq!(loose.row_echelon(&a).rank(), 1);
        assert_eq!(ReferenceBackend::default().row_echelon(&a).rank(), 2);
    }

    #[test]
    fn test_active_is_reference() {
        assert_eq!(active().name(), "reference");
    }
}
