//! In-process snapshot store.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use fundlens_traits::{CachedSnapshot, SnapshotStore, TraitError};
use tracing::debug;

/// In-memory snapshot store with per-entry absolute expiry.
///
/// Two concurrent misses for the same key may both write; the last write wins.
///
/// # Example
///
/// ```rust
/// use fundlens_storage::MemorySnapshotStore;
///
/// let store = MemorySnapshotStore::new();
/// assert!(store.is_empty());
/// ```
#[derive(Default)]
pub struct MemorySnapshotStore {
    entries: DashMap<String, Entry>,
}

struct Entry {
    snapshot: CachedSnapshot,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

impl MemorySnapshotStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `snapshot` for `ttl`. A zero TTL removes the key instead.
    pub fn insert_for(&self, key: &str, snapshot: CachedSnapshot, ttl: Duration) {
        if ttl.is_zero() {
            self.entries.remove(key);
            return;
        }
        self.entries.insert(
            key.to_string(),
            Entry {
                snapshot,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Returns a live entry, dropping it if it has expired.
    pub fn lookup(&self, key: &str) -> Option<CachedSnapshot> {
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => return Some(entry.snapshot.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            // Re-check under the write lock; a writer may have refreshed it.
            self.entries.remove_if(key, |_, e| e.is_expired(now));
            debug!(key, "snapshot expired");
        }
        None
    }

    /// Removes every expired entry.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.entries.retain(|_, e| !e.is_expired(now));
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes everything.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn get(&self, key: &str) -> Result<Option<CachedSnapshot>, TraitError> {
        Ok(self.lookup(key))
    }

    async fn set(
        &self,
        key: &str,
        snapshot: &CachedSnapshot,
        ttl_seconds: u64,
    ) -> Result<(), TraitError> {
        self.insert_for(key, snapshot.clone(), Duration::from_secs(ttl_seconds));
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), TraitError> {
        self.entries.remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot() -> CachedSnapshot {
        CachedSnapshot::new(json!({"investorId": 1, "totals": {"nav": 10}}), "\"abc\"")
    }

    #[tokio::test]
    async fn test_round_trip() {
        let store = MemorySnapshotStore::new();

        store.set("1:range:USD:v1", &snapshot(), 600).await.unwrap();

        assert_eq!(store.get("1:range:USD:v1").await.unwrap(), Some(snapshot()));
        assert_eq!(store.get("other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_zero_ttl_is_absent() {
        let store = MemorySnapshotStore::new();
        store.set("k", &snapshot(), 600).await.unwrap();

        store.set("k", &snapshot(), 0).await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_expiry_checked_on_read() {
        let store = MemorySnapshotStore::new();
        store.insert_for("k", snapshot(), Duration::from_millis(20));
        assert!(store.get("k").await.unwrap().is_some());

        std::thread::sleep(Duration::from_millis(40));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("k").await.unwrap(), None);
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_del_and_overwrite() {
        let store = MemorySnapshotStore::new();
        store.set("k", &snapshot(), 600).await.unwrap();

        let replacement = CachedSnapshot::new(json!({"v": 2}), "\"def\"");
        store.set("k", &replacement, 600).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(replacement));

        store.del("k").await.unwrap();
        store.del("missing").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[test]
    fn test_purge_expired() {
        let store = MemorySnapshotStore::new();
        store.insert_for("short", snapshot(), Duration::from_millis(10));
        store.insert_for("long", snapshot(), Duration::from_secs(600));

        std::thread::sleep(Duration::from_millis(30));
        store.purge_expired();

        assert_eq!(store.len(), 1);
        assert!(store.lookup("long").is_some());
    }
}
