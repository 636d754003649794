//! Hybrid root-finding algorithm.
//!
//! Combines Newton-Raphson with bisection for robust convergence.

use crate::error::MathResult;
use crate::solvers::{bisection, newton_raphson, SolverConfig, SolverResult};

/// Hybrid root-finding algorithm.
///
/// # Strategy
///
/// 1. Run Newton-Raphson from `initial_guess`, confined to `bounds`
/// 2. If Newton hits a flat derivative, leaves `bounds`, evaluates to a
///    non-finite value or runs out of iterations, bisect over `bounds`
///
/// Bisection is best effort, so the result may carry `converged == false`.
///
/// # Example
///
/// ```rust
/// use fundlens_math::solvers::{hybrid, SolverConfig};
///
/// // Newton from 0.0 has a zero derivative; bisection takes over.
/// let f = |x: f64| x * x - 4.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = hybrid(f, df, 0.0, (0.0, 5.0), &SolverConfig::default()).unwrap();
/// assert!((result.root - 2.0).abs() < 1e-6);
/// ```
pub fn hybrid<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bounds: (f64, f64),
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    match newton_raphson(&f, &df, initial_guess, Some(bounds), config) {
        Ok(result) => Ok(result),
        Err(_) => bisection(&f, bounds.0, bounds.1, config),
    }
}
