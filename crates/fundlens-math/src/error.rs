//! Error types for numerical operations.

use thiserror::Error;

/// A specialized Result type for numerical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during root finding.
#[derive(Error, Debug, Clone)]
pub enum MathError {
    /// Root-finding algorithm failed to converge.
    #[error("Convergence failed after {iterations} iterations (residual: {residual:.2e})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Final residual value.
        residual: f64,
    },

    /// Derivative magnitude fell below the configured floor.
    #[error("Derivative too small at x = {x}: {value:.2e}")]
    DivisionByZero {
        /// Iterate at which the derivative vanished.
        x: f64,
        /// The near-zero derivative.
        value: f64,
    },

    /// An iterate left the permitted search interval.
    #[error("Iterate {x} left the search interval [{min}, {max}]")]
    OutOfBounds {
        /// The offending iterate.
        x: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// A function evaluation produced NaN or infinity.
    #[error("Non-finite value encountered at x = {x}")]
    NonFinite {
        /// Point of evaluation.
        x: f64,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Creates an out-of-bounds error.
    #[must_use]
    pub fn out_of_bounds(x: f64, (min, max): (f64, f64)) -> Self {
        Self::OutOfBounds { x, min, max }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
