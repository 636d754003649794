//! # FundLens Ext HTTP
//!
//! [`PortfolioDataSource`](fundlens_traits::PortfolioDataSource) backed by the
//! accounting system's paged REST API.
//!
//! Every listing endpoint accepts `offset` and `limit` and answers with a
//! [`Page`](fundlens_traits::Page); the source walks pages until the upstream
//! reports no more. Retries are left to the caller.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;

pub use client::*;
