//! # FundLens Engine
//!
//! Snapshot assembly for FundLens.
//!
//! This crate provides:
//! - [`SnapshotService`]: cache-aside snapshot retrieval over injected
//!   [`PortfolioDataSource`](fundlens_traits::PortfolioDataSource) and
//!   [`SnapshotStore`](fundlens_traits::SnapshotStore) capabilities
//! - [`SnapshotQuery`]: inbound query validation and defaulting
//! - [`SnapshotPayload`]: the reduced summary served to clients
//! - [`compute_etag`] / [`etag_matches`]: content hashes and conditional requests
//!
//! ## Architecture
//!
//! ```text
//! SnapshotQuery ─> validate ─> key ─┬─> SnapshotStore::get ─> hit ─> ETag compare
//!                                   │
//!                                   └─> miss ─> PortfolioDataSource (concurrent reads)
//!                                                 └─> aggregate_portfolio
//!                                                       └─> SnapshotPayload ─> ETag ─> set
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let service = SnapshotService::new(source, store, EngineConfig::default());
//!
//! match service.snapshot(&query, if_none_match).await? {
//!     SnapshotOutcome::NotModified { etag } => { /* 304 */ }
//!     SnapshotOutcome::Fresh { value, etag, .. } => { /* 200 */ }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod etag;
pub mod key;
pub mod payload;
pub mod query;
pub mod service;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use etag::{compute_etag, etag_matches};
pub use key::snapshot_key;
pub use payload::{FundRow, InvestorIdentity, SnapshotPayload};
pub use query::{ResolvedQuery, SnapshotQuery, DEFAULT_BASE_CURRENCY};
pub use service::{CacheStatus, SnapshotOutcome, SnapshotService};
