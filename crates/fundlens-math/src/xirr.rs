//! XIRR: annualized internal rate of return for irregularly dated cashflows.
//!
//! The rate solves `NPV(r) = Σ aᵢ / (1 + r)^(dᵢ / 365) = 0`, where `dᵢ` is the
//! number of days between the earliest cashflow and cashflow `i`.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fundlens_math::xirr::{xirr, CashflowPoint};
//!
//! let flows = [
//!     CashflowPoint::new(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), -100_000.0),
//!     CashflowPoint::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 120_000.0),
//! ];
//!
//! let rate = xirr(&flows).unwrap();
//! assert!((rate - 0.20).abs() < 1e-6);
//! ```

use chrono::NaiveDate;

use crate::solvers::{hybrid, SolverConfig};

/// Day-count basis for converting day offsets into year fractions.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Newton-Raphson starting rate.
pub const DEFAULT_INITIAL_GUESS: f64 = 0.10;

/// Lowest rate searched (just above total loss).
pub const DEFAULT_LOWER_BOUND: f64 = -0.9999;

/// Highest rate searched (1000% per year).
pub const DEFAULT_UPPER_BOUND: f64 = 10.0;

/// A dated, signed cashflow. Outflows from the investor are negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashflowPoint {
    /// Cashflow date.
    pub date: NaiveDate,
    /// Signed amount.
    pub amount: f64,
}

impl CashflowPoint {
    /// Creates a cashflow point.
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }
}

/// XIRR search parameters.
#[derive(Debug, Clone, Copy)]
pub struct XirrConfig {
    /// Newton-Raphson starting rate.
    pub initial_guess: f64,
    /// Search interval for both Newton-Raphson and the bisection fallback.
    pub bounds: (f64, f64),
    /// Tolerance, iteration cap and derivative floor.
    pub solver: SolverConfig,
}

impl Default for XirrConfig {
    fn default() -> Self {
        Self {
            initial_guess: DEFAULT_INITIAL_GUESS,
            bounds: (DEFAULT_LOWER_BOUND, DEFAULT_UPPER_BOUND),
            solver: SolverConfig::default(),
        }
    }
}

/// Computes XIRR with the default configuration.
///
/// Returns `None` when the rate is undetermined: no cashflows, no sign
/// change between amounts, or a search that produced non-finite values.
pub fn xirr(points: &[CashflowPoint]) -> Option<f64> {
    xirr_with_config(points, &XirrConfig::default())
}

/// Computes XIRR with an explicit configuration.
///
/// Points may be given in any order. Newton-Raphson runs first; if it stalls
/// on a flat derivative or leaves `config.bounds`, bisection over the same
/// interval returns its best midpoint.
pub fn xirr_with_config(points: &[CashflowPoint], config: &XirrConfig) -> Option<f64> {
    if !has_sign_change(points) {
        return None;
    }

    let terms = year_fractions(points);
    let f = |rate: f64| npv_terms(&terms, rate);
    let df = |rate: f64| npv_derivative_terms(&terms, rate);

    hybrid(f, df, config.initial_guess, config.bounds, &config.solver)
        .ok()
        .map(|result| result.root)
        .filter(|rate| rate.is_finite())
}

/// Net present value at `rate`, discounting to the earliest cashflow date.
pub fn npv(points: &[CashflowPoint], rate: f64) -> f64 {
    npv_terms(&year_fractions(points), rate)
}

/// Derivative of [`npv`] with respect to `rate`.
pub fn npv_derivative(points: &[CashflowPoint], rate: f64) -> f64 {
    npv_derivative_terms(&year_fractions(points), rate)
}

/// True if at least one amount is strictly positive and one strictly negative.
fn has_sign_change(points: &[CashflowPoint]) -> bool {
    let positive = points.iter().any(|p| p.amount > 0.0);
    let negative = points.iter().any(|p| p.amount < 0.0);
    positive && negative
}

/// `(years since earliest date, amount)` pairs.
fn year_fractions(points: &[CashflowPoint]) -> Vec<(f64, f64)> {
    let Some(origin) = points.iter().map(|p| p.date).min() else {
        return Vec::new();
    };

    points
        .iter()
        .map(|p| {
            let days = (p.date - origin).num_days() as f64;
            (days / DAYS_PER_YEAR, p.amount)
        })
        .collect()
}

fn npv_terms(terms: &[(f64, f64)], rate: f64) -> f64 {
    if rate == 0.0 {
        return terms.iter().map(|(_, amount)| amount).sum();
    }
    let base = 1.0 + rate;
    terms
        .iter()
        .map(|(t, amount)| amount / base.powf(*t))
        .sum()
}

fn npv_derivative_terms(terms: &[(f64, f64)], rate: f64) -> f64 {
    let base = 1.0 + rate;
    terms
        .iter()
        .map(|(t, amount)| -t * amount / base.powf(t + 1.0))
        .sum()
}
