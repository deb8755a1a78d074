//! `Display` formatting for [`Matrix`].
//!
//! One line per row, `[ v1 v2 ... ]`, with a line break before the first row
//! and after every row.

use core::fmt;

use super::Matrix;

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for row in self.rows() {
            write!(f, "[")?;
            for v in row {
                write!(f, " {v}")?;
            }
            writeln!(f, " ]")?;
        }
        Ok(())
    }
}
