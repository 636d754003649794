//! Bisection root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Best-effort bisection over `[a, b]`.
///
/// Each step keeps the half whose far endpoint has a different sign from the
/// current low endpoint. Returns as soon as `|f(mid)| <= config.tolerance`;
/// otherwise, after `config.max_iterations`, returns the last midpoint with
/// `converged == false`. The bracket is not validated up front: a
/// non-bracketing interval yields an approximate answer rather than an error.
///
/// Only a NaN or infinite evaluation is an error.
///
/// # Example
///
/// ```rust
/// use fundlens_math::solvers::{bisection, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default().with_tolerance(1e-10)).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut lo = a.min(b);
    let mut hi = a.max(b);

    let mut f_lo = f(lo);
    if !f_lo.is_finite() {
        return Err(MathError::NonFinite { x: lo });
    }

    let mut mid = (lo + hi) / 2.0;
    let mut f_mid = f_lo;

    for iteration in 0..config.max_iterations {
        mid = (lo + hi) / 2.0;
        f_mid = f(mid);

        if !f_mid.is_finite() {
            return Err(MathError::NonFinite { x: mid });
        }

        if f_mid.abs() <= config.tolerance {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration + 1,
                residual: f_mid,
                converged: true,
            });
        }

        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }

    Ok(SolverResult {
        root: mid,
        iterations: config.max_iterations,
        residual: f_mid,
        converged: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;
        let config = SolverConfig::default().with_tolerance(1e-12);

        let result = bisection(f, 1.0, 2.0, &config).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_reversed_bracket() {
        let f = |x: f64| x * x - 2.0;
        let config = SolverConfig::default().with_tolerance(1e-12);

        let result = bisection(f, 2.0, 1.0, &config).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_linear_function() {
        let f = |x: f64| 2.0 * x - 4.0;

        let result = bisection(f, 0.0, 5.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 2.0, epsilon = 1e-6);
        assert!(result.converged);
    }

    #[test]
    fn test_unbracketed_is_best_effort() {
        // No root in [0, 1]: bisection keeps moving toward the high end.
        let f = |x: f64| x * x + 1.0;
        let config = SolverConfig::new(1e-6, 30);

        let result = bisection(f, 0.0, 1.0, &config).unwrap();

        assert!(!result.converged);
        assert_eq!(result.iterations, 30);
        assert!(result.root > 0.99);
    }

    #[test]
    fn test_non_finite_is_error() {
        let f = |x: f64| 1.0 / x;

        let result = bisection(f, 0.0, 1.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::NonFinite { .. })));
    }
}
