//! Request handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::header::{CACHE_CONTROL, ETAG, IF_NONE_MATCH};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use fundlens_engine::{
    CacheStatus, EngineError, SnapshotOutcome, SnapshotQuery, SnapshotService,
};

/// Cache policy sent with every snapshot response.
pub const SNAPSHOT_CACHE_CONTROL: &str = "public, max-age=60, stale-while-revalidate=300";

/// Reports whether the response came from the snapshot store.
pub const X_CACHE: &str = "x-cache";

/// Application state.
pub struct AppState {
    /// The snapshot service
    pub service: Arc<SnapshotService>,
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Error response.
#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

impl ErrorResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Query parameters for snapshot requests.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotParams {
    /// Range start (YYYY-MM-DD). Defaults to 2010-01-01.
    pub from: Option<String>,
    /// Range end (YYYY-MM-DD). Defaults to today.
    pub to: Option<String>,
    /// Three-letter base currency. Defaults to USD.
    pub base_currency: Option<String>,
}

fn build_query(investor_id: &str, params: SnapshotParams) -> Result<SnapshotQuery, Response> {
    let investor_id: u64 = investor_id.parse().map_err(|_| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("investorId must be a positive integer: {investor_id}"),
        )
    })?;

    Ok(SnapshotQuery {
        investor_id,
        from: params.from,
        to: params.to,
        base_currency: params.base_currency,
    })
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

fn engine_error_response(e: &EngineError) -> Response {
    let status = match e {
        EngineError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        EngineError::Source(_) => StatusCode::BAD_GATEWAY,
        EngineError::Cache(_) | EngineError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!(error = %e, "snapshot request failed");
    } else {
        warn!(error = %e, "snapshot request rejected");
    }
    error_response(status, e.to_string())
}

fn snapshot_headers(etag: &str, cache: Option<CacheStatus>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(etag) {
        headers.insert(ETAG, value);
    }
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(SNAPSHOT_CACHE_CONTROL));
    if let Some(cache) = cache {
        headers.insert(
            HeaderName::from_static(X_CACHE),
            HeaderValue::from_static(cache.as_str()),
        );
    }
    headers
}

/// Get an investor's portfolio snapshot.
///
/// Honors `If-None-Match` with a bodiless 304.
pub async fn get_snapshot(
    State(state): State<Arc<AppState>>,
    Path(investor_id): Path<String>,
    Query(params): Query<SnapshotParams>,
    headers: HeaderMap,
) -> Response {
    let query = match build_query(&investor_id, params) {
        Ok(query) => query,
        Err(response) => return response,
    };
    let if_none_match = headers
        .get(IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok());

    match state.service.snapshot(&query, if_none_match).await {
        Ok(SnapshotOutcome::NotModified { etag }) => {
            (StatusCode::NOT_MODIFIED, snapshot_headers(&etag, None)).into_response()
        }
        Ok(SnapshotOutcome::Fresh { value, etag, cache }) => (
            StatusCode::OK,
            snapshot_headers(&etag, Some(cache)),
            Json(value),
        )
            .into_response(),
        Err(e) => engine_error_response(&e),
    }
}

/// Drop an investor's cached snapshot for the given range and currency.
pub async fn invalidate_snapshot(
    State(state): State<Arc<AppState>>,
    Path(investor_id): Path<String>,
    Query(params): Query<SnapshotParams>,
) -> Response {
    let query = match build_query(&investor_id, params) {
        Ok(query) => query,
        Err(response) => return response,
    };

    match state
        .service
        .invalidate(&query, Utc::now().date_naive())
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => engine_error_response(&e),
    }
}
