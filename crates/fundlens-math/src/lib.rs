//! # FundLens Math
//!
//! Numerical routines for the FundLens portfolio analytics engine.
//!
//! This crate provides:
//!
//! - **Solvers**: Root-finding algorithms (Newton-Raphson, Bisection, Hybrid)
//! - **XIRR**: Money-weighted return for irregularly dated cashflows
//!
//! ## Design Philosophy
//!
//! - **Best effort**: XIRR prefers an approximate rate over failing outright
//! - **Bounded**: every iteration is capped and every iterate is range-checked
//! - **Pure**: no I/O, no shared state, safe to call from any thread

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod solvers;
pub mod xirr;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        bisection, hybrid, newton_raphson, SolverConfig, SolverResult,
    };
    pub use crate::xirr::{xirr, xirr_with_config, CashflowPoint, XirrConfig};
}

pub use error::{MathError, MathResult};
pub use xirr::{xirr, xirr_with_config, CashflowPoint, XirrConfig};
