//! Server configuration.

use fundlens_engine::EngineConfig;
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`CacheConfig::redis_url`].
pub const REDIS_URL_ENV: &str = "FUNDLENS_REDIS_URL";

/// Environment variable overriding [`DataSourceConfig::base_url`].
pub const DATA_SOURCE_URL_ENV: &str = "FUNDLENS_DATA_SOURCE_URL";

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Snapshot store settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Upstream data settings.
    #[serde(default)]
    pub data_source: DataSourceConfig,
}

/// Listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Snapshot store backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// In-process expiring map.
    #[default]
    Memory,
    /// Redis.
    Redis,
}

/// Snapshot store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Backend to use
    #[serde(default)]
    pub backend: CacheBackend,

    /// Redis connection URL, required for the redis backend
    pub redis_url: Option<String>,

    /// Snapshot time-to-live in seconds
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,

    /// Cache schema version
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
}

/// Upstream data source kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    /// JSON fixture file.
    #[default]
    Fixture,
    /// Paged REST API.
    Http,
}

/// Upstream data settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSourceConfig {
    /// Source kind
    #[serde(default)]
    pub kind: DataSourceKind,

    /// Fixture file for the fixture source
    #[serde(default = "default_fixture_path")]
    pub fixture_path: String,

    /// API root for the http source
    pub base_url: Option<String>,

    /// Bearer token for the http source
    pub api_token: Option<String>,

    /// Records per page for the http source
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Per-request timeout for the http source
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_ttl_seconds() -> u64 {
    EngineConfig::default().ttl_seconds
}

fn default_schema_version() -> u32 {
    EngineConfig::default().schema_version
}

fn default_fixture_path() -> String {
    "fixtures/demo.json".to_string()
}

fn default_page_size() -> usize {
    fundlens_ext_http::DEFAULT_PAGE_SIZE
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            redis_url: None,
            ttl_seconds: default_ttl_seconds(),
            schema_version: default_schema_version(),
        }
    }
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            kind: DataSourceKind::default(),
            fixture_path: default_fixture_path(),
            base_url: None,
            api_token: None,
            page_size: default_page_size(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl CacheConfig {
    /// Engine settings derived from the cache section.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::default()
            .with_ttl_seconds(self.ttl_seconds)
            .with_schema_version(self.schema_version)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, std::io::Error> {
        toml::from_str(content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Applies `FUNDLENS_*` environment overrides.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(REDIS_URL_ENV).filter(|v| !v.is_empty()) {
            self.cache.redis_url = Some(url);
        }
        if let Some(url) = lookup(DATA_SOURCE_URL_ENV).filter(|v| !v.is_empty()) {
            self.data_source.base_url = Some(url);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cache.backend, CacheBackend::Memory);
        assert_eq!(config.cache.ttl_seconds, 600);
        assert_eq!(config.cache.schema_version, 1);
        assert_eq!(config.data_source.kind, DataSourceKind::Fixture);
        assert_eq!(config.data_source.page_size, 200);
    }

    #[test]
    fn test_sections() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9000

            [cache]
            backend = "redis"
            redis_url = "redis://cache:6379"
            ttl_seconds = 120

            [data_source]
            kind = "http"
            base_url = "https://erp.example.com/api"
            page_size = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.cache.backend, CacheBackend::Redis);
        assert_eq!(config.cache.engine_config().ttl_seconds, 120);
        assert_eq!(config.cache.engine_config().schema_version, 1);
        assert_eq!(config.data_source.kind, DataSourceKind::Http);
        assert_eq!(config.data_source.page_size, 50);
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(AppConfig::from_toml("[cache]\nbackend = \"memcached\"").is_err());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default().with_overrides(|name| match name {
            REDIS_URL_ENV => Some("redis://override:6379".to_string()),
            DATA_SOURCE_URL_ENV => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.cache.redis_url.as_deref(), Some("redis://override:6379"));
        assert!(config.data_source.base_url.is_none());
    }
}
