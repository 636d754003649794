//! Redis snapshot store.

use async_trait::async_trait;
use fundlens_traits::{CachedSnapshot, SnapshotStore, TraitError};
use redis::aio::ConnectionManager;
use redis::RedisError;
use tracing::{debug, info};

/// Snapshot store backed by Redis.
///
/// Entries are JSON strings written with `SET key value EX ttl`; the server
/// evicts them. The connection manager reconnects on its own, so one store
/// is shared by every request.
#[derive(Clone)]
pub struct RedisSnapshotStore {
    conn: ConnectionManager,
    key_prefix: String,
}

impl RedisSnapshotStore {
    /// Connects to `url` (e.g. `redis://127.0.0.1:6379/0`).
    pub async fn connect(url: &str) -> Result<Self, TraitError> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        info!(url, "connected to redis snapshot store");
        Ok(Self {
            conn,
            key_prefix: "fundlens:snapshot:".to_string(),
        })
    }

    /// Replaces the namespace prepended to every key.
    #[must_use]
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl SnapshotStore for RedisSnapshotStore {
    async fn get(&self, key: &str) -> Result<Option<CachedSnapshot>, TraitError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = redis::cmd("GET")
            .arg(self.full_key(key))
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        key: &str,
        snapshot: &CachedSnapshot,
        ttl_seconds: u64,
    ) -> Result<(), TraitError> {
        if ttl_seconds == 0 {
            return self.del(key).await;
        }

        let json = serde_json::to_string(snapshot)?;
        let mut conn = self.conn.clone();
        redis::cmd("SET")
            .arg(self.full_key(key))
            .arg(json)
            .arg("EX")
            .arg(ttl_seconds)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(map_redis_error)?;

        debug!(key, ttl_seconds, "snapshot written to redis");
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), TraitError> {
        let mut conn = self.conn.clone();
        redis::cmd("DEL")
            .arg(self.full_key(key))
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(map_redis_error)
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

fn map_redis_error(e: RedisError) -> TraitError {
    if e.is_timeout() {
        TraitError::Timeout
    } else if e.is_connection_refusal() || e.is_connection_dropped() || e.is_io_error() {
        TraitError::ConnectionFailed(e.to_string())
    } else {
        TraitError::CacheError(e.to_string())
    }
}
