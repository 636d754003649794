//! # FundLens Portfolio
//!
//! Fund-level KPIs and investor-level portfolio aggregation.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: All calculations are stateless with explicit inputs
//! - **Absorb bad data**: unknown labels become warnings, unresolvable values
//!   become `None`; aggregation itself never fails
//! - **Deterministic**: funds are visited in ascending id order and every
//!   collection in the output has a defined order
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fundlens_portfolio::prelude::*;
//!
//! let inputs = PortfolioInputs {
//!     account_contacts,
//!     commitments,
//!     cashflows,
//!     statements,
//!     funds,
//!     assets,
//! };
//! let summary = aggregate_portfolio(InvestorId::new(42), range, "USD", &inputs);
//! println!("TVPI: {:?}", summary.totals.tvpi);
//! ```
//!
//! ## Module Overview
//!
//! - [`normalize`] - Cashflow classification and sign normalization
//! - [`valuation`] - Latest-as-of statement selection and metric aliases
//! - [`kpi`] - Per-fund KPIs
//! - [`bucketing`] - Year, sector and region buckets
//! - [`insights`] - Recent activity
//! - [`summary`] - Output types
//! - [`aggregate`] - Investor-level orchestration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]

pub mod aggregate;
pub mod bucketing;
pub mod insights;
pub mod kpi;
pub mod normalize;
pub mod summary;
pub mod valuation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::aggregate::{aggregate_portfolio, PortfolioInputs};
    pub use crate::bucketing::{
        breakdown_by_region, breakdown_by_sector, bucket_by_year, BreakdownRow, YearBucket,
    };
    pub use crate::insights::{recent_activity, RecentActivity, RecentFlow};
    pub use crate::kpi::{compute_fund_kpi, multiples, FundKpi, Multiples};
    pub use crate::normalize::{
        classify_label, normalize_cashflows, FlowKind, NormalizationWarnings, NormalizedCashflows,
        NormalizedFlow,
    };
    pub use crate::summary::{PortfolioInsights, PortfolioSummary, PortfolioTotals};
    pub use crate::valuation::{latest_as_of, FieldAliases, NAV, NOI_ACTUAL, NOI_BUDGET};
    pub use fundlens_core::prelude::*;
}
