//! `tessera-core` — dense linear algebra on `f64` matrices.
//!
//! Provides the [`Matrix`] container with its [`Vector`] / [`ColumnVector`]
//! companions, a broadcasting arithmetic engine, row reduction, LU, Cholesky
//! and eigen decompositions, column statistics, norms, and strided
//! convolution.
//!
//! # Design
//!
//! - **Value semantics**: every operation returns a new container; nothing
//!   is mutated in place.
//! - **Explicit failure**: fallible operations return [`Result`]; each
//!   [`CoreError`] maps onto one of the two [`ErrorKind`]s.
//! - **Pluggable execution**: the heavy operations run on the active
//!   [`Backend`], the pure-Rust [`ReferenceBackend`] unless another one is
//!   installed.
//!
//! ```
//! use tessera_core::prelude::*;
//!
//! let a = Matrix::build(&[[4.0, 2.0], [2.0, 3.0]])?;
//! let b = a.add(&Vector::build(&[1.0, -1.0])?)?;
//! assert_eq!(b.as_slice(), &[5.0, 1.0, 3.0, 2.0]);
//! assert!(a.positive_definite());
//! assert!((a.det()? - 8.0).abs() < 1e-12);
//! # Ok::<(), CoreError>(())
//! ```

pub mod backend;
pub mod config;
mod conv;
pub mod error;
pub mod linalg;
pub mod matrix;
pub mod ops;
mod random;
mod stats;

// Re-export key types at crate root for convenience.
pub use backend::{Backend, ReferenceBackend};
pub use config::Config;
pub use error::{CoreError, ErrorKind, Result};
pub use linalg::{Cholesky, Eigen, Lu, Ref, Rref};
pub use matrix::{ColumnVector, Matrix, Stack, Vector};
pub use ops::{BinaryOp, Operand};

/// Items intended for glob-import: `use tessera_core::prelude::*;`
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{CoreError, ErrorKind, Result};
    pub use crate::linalg::{Cholesky, Eigen, Lu, Ref, Rref};
    pub use crate::matrix::{ColumnVector, Matrix, Vector};
    pub use crate::ops::BinaryOp;
}
