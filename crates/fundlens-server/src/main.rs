//! FundLens snapshot server entry point.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fundlens_server::{AppConfig, Server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,fundlens=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("FundLens Snapshot Server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/fundlens.toml".to_string());

    let config = if std::path::Path::new(&config_path).exists() {
        info!("Loading configuration from {}", config_path);
        AppConfig::from_file(&config_path)?
    } else {
        info!("Using default configuration");
        AppConfig::default()
    }
    .with_env_overrides();

    let server = Server::from_config(config).await?;
    server.start().await?;

    Ok(())
}
