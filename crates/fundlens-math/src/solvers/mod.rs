//! Root-finding algorithms.
//!
//! - [`newton_raphson`]: Fast quadratic convergence when the derivative is available
//! - [`bisection`]: Slow, best-effort interval halving that never gives up early
//! - [`hybrid`]: Newton-Raphson with a bisection safety net over a fixed interval
//!
//! # Example
//!
//! ```rust
//! use fundlens_math::solvers::{hybrid, SolverConfig};
//!
//! let f = |x: f64| x * x - 2.0;
//! let df = |x: f64| 2.0 * x;
//!
//! let result = hybrid(f, df, 1.5, (0.0, 4.0), &SolverConfig::default()).unwrap();
//! assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-6);
//! ```

mod bisection;
mod hybrid;
mod newton;

pub use bisection::bisection;
pub use hybrid::hybrid;
pub use newton::newton_raphson;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Default smallest derivative magnitude Newton-Raphson will divide by.
pub const DEFAULT_DERIVATIVE_FLOOR: f64 = 1e-6;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Newton-Raphson is abandoned when `|f'(x)|` drops below this.
    pub derivative_floor: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            derivative_floor: DEFAULT_DERIVATIVE_FLOOR,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the derivative floor.
    #[must_use]
    pub fn with_derivative_floor(mut self, derivative_floor: f64) -> Self {
        self.derivative_floor = derivative_floor;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
    /// False when the solver ran out of iterations and returned its best estimate.
    pub converged: bool,
}
