//! Numeric tolerances and iteration limits shared by the decompositions.

/// Tunable thresholds for the row-reduction, eigen, and symmetry routines.
///
/// ```
/// # use tessera_core::Config;
/// let config = Config::default()
///     .with_pivot_tolerance(1e-10)
///     .with_eigen_max_iterations(500);
/// assert_eq!(config.eigen_max_iterations(), 500);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pivot_tolerance: Option<f64>,
    eigen_max_iterations: usize,
    eigen_tolerance: f64,
    symmetry_tolerance: f64,
}

/// Default iteration cap for the eigen solvers.
pub const DEFAULT_EIGEN_MAX_ITERATIONS: usize = 1000;

/// Default absolute tolerance for symmetry checks.
pub const DEFAULT_SYMMETRY_TOLERANCE: f64 = 1e-12;

impl Default for Config {
    fn default() -> Self {
        Self {
            pivot_tolerance: None,
            eigen_max_iterations: DEFAULT_EIGEN_MAX_ITERATIONS,
            eigen_tolerance: f64::EPSILON,
            symmetry_tolerance: DEFAULT_SYMMETRY_TOLERANCE,
        }
    }
}

impl Config {
    /// Use a fixed absolute pivot threshold instead of the scaled default.
    #[must_use]
    pub fn with_pivot_tolerance(mut self, tolerance: f64) -> Self {
        self.pivot_tolerance = Some(tolerance.abs());
        self
    }

    #[must_use]
    pub fn with_eigen_max_iterations(mut self, iterations: usize) -> Self {
        self.eigen_max_iterations = iterations;
        self
    }

    #[must_use]
    pub fn with_eigen_tolerance(mut self, tolerance: f64) -> Self {
        self.eigen_tolerance = tolerance.abs();
        self
    }

    #[must_use]
    pub fn with_symmetry_tolerance(mut self, tolerance: f64) -> Self {
        self.symmetry_tolerance = tolerance.abs();
        self
    }

    pub fn eigen_max_iterations(&self) -> usize {
        self.eigen_max_iterations
    }

    pub fn eigen_tolerance(&self) -> f64 {
        self.eigen_tolerance
    }

    pub fn symmetry_tolerance(&self) -> f64 {
        self.symmetry_tolerance
    }

    /// Pivot threshold for an `m x n` matrix whose largest absolute entry is
    /// `max_abs`.
    ///
    /// Without an explicit tolerance this is `eps * max(m, n) * max_abs`, the
    /// same scaling used for numerical rank.
    pub fn pivot_tolerance(&self, m: usize, n: usize, max_abs: f64) -> f64 {
        match self.pivot_tolerance {
            Some(tol) => tol,
            None => f64::EPSILON * m.max(n) as f64 * max_abs,
        }
    }
}
