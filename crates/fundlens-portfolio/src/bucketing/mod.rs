//! Portfolio bucketing.
//!
//! - **Year bucketing**: contributions, distributions and net cash per calendar year
//! - **Sector bucketing**: fund KPIs attributed to asset (or fund) sectors
//! - **Region bucketing**: fund KPIs attributed to asset countries/regions
//!
//! All functions are pure and return rows in a defined order.

mod classification;
mod year;

pub use classification::*;
pub use year::*;
