//! Matrix decompositions.
//!
//! | Decomposition | Module        | Result                         |
//! |---------------|---------------|--------------------------------|
//! | REF / RREF    | [`echelon`]   | echelon form, swaps, rank      |
//! | LU            | [`lu`]        | `PA = LU`                      |
//! | Cholesky      | [`cholesky`]  | `A = L L^T`                    |
//! | Eigen         | [`eig`]       | `A V = V diag(d)`              |

pub mod cholesky;
pub mod echelon;
pub mod eig;
pub mod lu;

pub use cholesky::Cholesky;
pub use echelon::{Ref, Rref};
pub use eig::Eigen;
pub use lu::Lu;
