//! # Tessera
//!
//! Dense numeric linear algebra in pure Rust.
//!
//! One `use tessera::prelude::*;` gives you matrices and vectors with
//! broadcasting arithmetic, decompositions, statistics, and convolution.
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `core` *(default)* | Matrices, decompositions, statistics, convolution |

pub use tessera_core as core;

/// Glob-import convenience: `use tessera::prelude::*;`
pub mod prelude {
    pub use tessera_core::prelude::*;
}
