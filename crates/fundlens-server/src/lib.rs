//! # FundLens Server
//!
//! REST server for FundLens investor snapshots.
//!
//! ## Features
//!
//! - `GET /api/v1/investors/{id}/snapshot` with ETag / `If-None-Match` support
//! - `DELETE` on the same path to drop a cached snapshot
//! - Health endpoint
//! - Configuration via TOML file with environment overrides
//!
//! ## Usage
//!
//! ```ignore
//! use fundlens_server::{AppConfig, Server};
//!
//! let config = AppConfig::from_file("config/fundlens.toml")?.with_env_overrides();
//! let server = Server::from_config(config).await?;
//! server.start().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod handlers;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use fundlens_engine::SnapshotService;
use fundlens_ext_file::FixtureDataSource;
use fundlens_ext_http::{HttpDataSource, HttpSourceConfig};
use fundlens_storage::{MemorySnapshotStore, RedisSnapshotStore};
use fundlens_traits::{PortfolioDataSource, SnapshotStore, TraitError};

pub use config::{AppConfig, CacheBackend, CacheConfig, DataSourceConfig, DataSourceKind};

/// Startup errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A required setting is missing or inconsistent
    #[error("configuration error: {0}")]
    Config(String),

    /// A data source or snapshot store could not be created
    #[error("backend error: {0}")]
    Backend(#[from] TraitError),

    /// Binding or serving failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Creates the configured data source.
pub fn build_data_source(
    config: &DataSourceConfig,
) -> Result<Arc<dyn PortfolioDataSource>, ServerError> {
    match config.kind {
        DataSourceKind::Fixture => {
            info!("Using fixture data source: {}", config.fixture_path);
            Ok(Arc::new(FixtureDataSource::from_file(&config.fixture_path)?))
        }
        DataSourceKind::Http => {
            let base_url = config.base_url.clone().ok_or_else(|| {
                ServerError::Config("data_source.base_url is required for kind = \"http\"".into())
            })?;
            info!("Using HTTP data source: {}", base_url);

            let mut source_config = HttpSourceConfig::new(base_url).with_page_size(config.page_size);
            source_config.timeout = Duration::from_secs(config.timeout_seconds);
            if let Some(token) = &config.api_token {
                source_config = source_config.with_token(token.clone());
            }
            Ok(Arc::new(HttpDataSource::new(source_config)?))
        }
    }
}

/// Creates the configured snapshot store.
pub async fn build_snapshot_store(
    config: &CacheConfig,
) -> Result<Arc<dyn SnapshotStore>, ServerError> {
    match config.backend {
        CacheBackend::Memory => {
            info!("Using in-memory snapshot store");
            Ok(Arc::new(MemorySnapshotStore::new()))
        }
        CacheBackend::Redis => {
            let url = config.redis_url.as_deref().ok_or_else(|| {
                ServerError::Config("cache.redis_url is required for backend = \"redis\"".into())
            })?;
            info!("Using Redis snapshot store");
            Ok(Arc::new(RedisSnapshotStore::connect(url).await?))
        }
    }
}

/// The FundLens server.
pub struct Server {
    config: AppConfig,
    service: Arc<SnapshotService>,
}

impl Server {
    /// Create a new server.
    pub fn new(config: AppConfig, service: Arc<SnapshotService>) -> Self {
        Self { config, service }
    }

    /// Create a server with the data source and store named by `config`.
    pub async fn from_config(config: AppConfig) -> Result<Self, ServerError> {
        let source = build_data_source(&config.data_source)?;
        let store = build_snapshot_store(&config.cache).await?;
        let service = SnapshotService::new(source, store, config.cache.engine_config());
        Ok(Self::new(config, Arc::new(service)))
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router(self.service.clone())
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Start the server.
    pub async fn start(&self) -> Result<(), ServerError> {
        let addr = SocketAddr::new(
            self.config
                .server
                .host
                .parse()
                .unwrap_or([0, 0, 0, 0].into()),
            self.config.server.port,
        );

        info!("Starting FundLens server on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}
