//! Newton-Raphson root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration `x_{n+1} = x_n - f(x_n) / f'(x_n)` and stops once the
/// step size is within `config.tolerance`.
///
/// Fails fast instead of wandering:
///
/// - `|f'(x)| < config.derivative_floor` returns [`MathError::DivisionByZero`]
/// - an iterate outside `bounds` (when given) returns [`MathError::OutOfBounds`]
/// - a NaN or infinite evaluation returns [`MathError::NonFinite`]
///
/// # Example
///
/// ```rust
/// use fundlens_math::solvers::{newton_raphson, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(f, df, 1.5, None, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-6);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;

    for iteration in 0..config.max_iterations {
        let fx = f(x);
        let dfx = df(x);

        if !fx.is_finite() || !dfx.is_finite() {
            return Err(MathError::NonFinite { x });
        }

        if dfx.abs() < config.derivative_floor {
            return Err(MathError::DivisionByZero { x, value: dfx });
        }

        let step = fx / dfx;
        x -= step;

        if let Some((lo, hi)) = bounds {
            if x < lo || x > hi {
                return Err(MathError::out_of_bounds(x, (lo, hi)));
            }
        }

        if step.abs() <= config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: f(x),
                converged: true,
            });
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f(x).abs(),
    ))
}
