//! Route definitions.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use fundlens_engine::SnapshotService;

use crate::handlers::{self, AppState};

/// Create the API router.
///
/// # Arguments
/// * `service` - The snapshot service
pub fn create_router(service: Arc<SnapshotService>) -> Router {
    let state = Arc::new(AppState { service });

    Router::new()
        // Health
        .route("/health", get(handlers::health))
        .route("/api/v1/health", get(handlers::health))
        // Snapshots
        .route(
            "/api/v1/investors/{investor_id}/snapshot",
            get(handlers::get_snapshot).delete(handlers::invalidate_snapshot),
        )
        .with_state(state)
}
