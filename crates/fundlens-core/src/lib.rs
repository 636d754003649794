//! # FundLens Core
//!
//! Core identifiers, date ranges and collaborator records for the FundLens
//! portfolio analytics engine.
//!
//! This crate provides the foundational building blocks used throughout FundLens:
//!
//! - **Identifiers**: Newtypes for investors, accounts and funds
//! - **Dates**: Inclusive [`DateRange`] with swap-normalization
//! - **Records**: Flat records as delivered by the upstream accounting system
//! - **Metrics**: Open financial-statement metric bags with explicit numeric coercion
//!
//! ## Design Philosophy
//!
//! - **Tolerant input**: every upstream field except identifiers and dates is optional
//! - **Type Safety**: Newtypes prevent mixing account and fund identifiers
//! - **No I/O**: records are plain data; fetching happens behind traits elsewhere

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod dates;
pub mod ids;
pub mod metrics;
pub mod records;

pub use dates::DateRange;
pub use ids::{AccountId, FundId, InvestorId};
pub use metrics::{coerce_numeric, MetricValue, MetricsBag};
pub use records::{
    AccountContact, Asset, Commitment, Contact, FinancialStatement, Fund, RawCashflow,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::dates::DateRange;
    pub use crate::ids::{AccountId, FundId, InvestorId};
    pub use crate::metrics::{MetricValue, MetricsBag};
    pub use crate::records::{
        AccountContact, Asset, Commitment, Contact, FinancialStatement, Fund, RawCashflow,
    };
    pub use chrono::NaiveDate;
    pub use rust_decimal::Decimal;
}
