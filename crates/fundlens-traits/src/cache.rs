//! Snapshot store trait.
//!
//! A snapshot store holds computed payloads and their ETags under opaque
//! string keys with a time-to-live. Stores never compute anything; the
//! caller checks the store, computes on a miss and writes back.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TraitError;

/// A stored payload and its content hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedSnapshot {
    /// The payload as JSON.
    pub value: serde_json::Value,
    /// Quoted content hash of the serialized payload.
    pub etag: String,
}

impl CachedSnapshot {
    /// Creates a snapshot entry.
    pub fn new(value: serde_json::Value, etag: impl Into<String>) -> Self {
        Self {
            value,
            etag: etag.into(),
        }
    }
}

/// Key/value snapshot backing store with per-entry expiry.
///
/// Entries are replaced wholesale, never mutated. Concurrent writers for the
/// same key are allowed; the last write wins.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Returns the entry for `key` if present and not expired.
    async fn get(&self, key: &str) -> Result<Option<CachedSnapshot>, TraitError>;

    /// Stores `snapshot` under `key` for `ttl_seconds`. A TTL of zero
    /// leaves the key absent.
    async fn set(
        &self,
        key: &str,
        snapshot: &CachedSnapshot,
        ttl_seconds: u64,
    ) -> Result<(), TraitError>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn del(&self, key: &str) -> Result<(), TraitError>;

    /// Backend name for logging.
    fn backend_name(&self) -> &'static str;
}
