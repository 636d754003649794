//! FundLens Storage Layer
//!
//! Backing stores for computed portfolio snapshots. Both implement
//! [`SnapshotStore`](fundlens_traits::SnapshotStore) so the snapshot service
//! does not know which one it talks to.
//!
//! # Storage Backends
//!
//! ## MemorySnapshotStore
//!
//! A concurrent in-process map. Each entry carries an absolute expiry that is
//! checked lazily on read; expired entries are dropped when touched or by
//! [`MemorySnapshotStore::purge_expired`]. Data is not shared between
//! processes and does not survive restarts.
//!
//! ## RedisSnapshotStore
//!
//! Stores entries as JSON strings with `SET key value EX ttl`, so expiry is
//! enforced by the server and shared across every process using the same
//! Redis instance.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod memory;
mod redis_store;

pub use crate::memory::MemorySnapshotStore;
pub use crate::redis_store::RedisSnapshotStore;
