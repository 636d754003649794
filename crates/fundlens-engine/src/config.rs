//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Default snapshot time-to-live in seconds.
pub const DEFAULT_TTL_SECONDS: u64 = 600;

/// Default cache schema version.
pub const DEFAULT_SCHEMA_VERSION: u32 = 1;

/// Snapshot engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seconds a snapshot stays cached. Zero disables caching.
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,

    /// Cache schema version, part of every key. Bumping it invalidates all
    /// stored snapshots without touching the store.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
}

fn default_ttl_seconds() -> u64 {
    DEFAULT_TTL_SECONDS
}

fn default_schema_version() -> u32 {
    DEFAULT_SCHEMA_VERSION
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_TTL_SECONDS,
            schema_version: DEFAULT_SCHEMA_VERSION,
        }
    }
}

impl EngineConfig {
    /// Sets the TTL.
    #[must_use]
    pub fn with_ttl_seconds(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    /// Sets the schema version.
    #[must_use]
    pub fn with_schema_version(mut self, schema_version: u32) -> Self {
        self.schema_version = schema_version;
        self
    }
}
