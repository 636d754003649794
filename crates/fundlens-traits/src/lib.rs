//! # FundLens Traits
//!
//! Capability traits for the FundLens snapshot engine.
//!
//! This crate contains ONLY trait definitions and the plain types that cross
//! them. Implementations live in separate crates.
//!
//! ## Module Structure
//!
//! - [`source`]: [`PortfolioDataSource`], the upstream accounting-system reads
//! - [`cache`]: [`SnapshotStore`], the get/set/del snapshot backing store
//! - [`error`]: [`TraitError`], shared by every implementation
//!
//! ## Dependency Injection
//!
//! The snapshot service takes both capabilities at construction:
//!
//! ```ignore
//! SnapshotService::new(
//!     Arc::new(FixtureDataSource::from_file("fixtures/demo.json")?),
//!     Arc::new(MemorySnapshotStore::new()),
//!     EngineConfig::default(),
//! )
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod error;
pub mod source;

pub use cache::{CachedSnapshot, SnapshotStore};
pub use error::TraitError;
pub use source::{ContactQuery, Page, PortfolioDataSource};
