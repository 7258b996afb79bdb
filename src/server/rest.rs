//! REST API endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use prometheus::{Encoder, TextEncoder};
use serde::Serialize;
use serde_json::Value;
use tracing::Instrument;

use super::metrics;
use super::observability::spans;
use crate::catalog::{Catalog, FileDescriptor, SearchHit, SearchRequest};
use crate::error::{CatalogError, Error};

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub data_dir: String,
}

/// Error returned from API handlers, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(Error);

impl ApiError {
    /// HTTP status for an error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        status_for(&self.0)
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
            "internal server error".to_string()
        } else {
            match self.0 {
                Error::Catalog(inner) => inner.to_string(),
                other => other.to_string(),
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

const fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::Catalog(CatalogError::InvalidPath(_)) => StatusCode::BAD_REQUEST,
        Error::Catalog(CatalogError::NotFound { .. }) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn record_request<T>(endpoint: &str, result: &crate::Result<T>) {
    let status = result.as_ref().map_or_else(status_for, |_| StatusCode::OK);
    metrics::REQUEST_COUNT
        .with_label_values(&[endpoint, status.as_str()])
        .inc();
}

/// Create REST API router.
pub fn create_rest_router(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(prometheus_metrics))
        .route("/api/files", get(list_files))
        .route("/api/json", get(missing_path))
        .route("/api/json/", get(missing_path))
        .route("/api/json/{*path}", get(fetch_record))
        .route("/api/search", post(search))
        .with_state(catalog)
}

/// Health check endpoint. Unhealthy when the data root is missing.
async fn health_check(State(catalog): State<Arc<Catalog>>) -> impl IntoResponse {
    let root_ok = tokio::fs::metadata(catalog.root())
        .await
        .is_ok_and(|m| m.is_dir());

    if !root_ok {
        tracing::warn!(path = %catalog.root().display(), "Data directory unavailable");
    }

    let response = HealthResponse {
        status: if root_ok { "healthy" } else { "unhealthy" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data_dir: catalog.root().display().to_string(),
    };

    let status_code = if root_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}

/// Prometheus metrics endpoint.
async fn prometheus_metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; charset=utf-8",
            )],
            buffer,
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(
                    axum::http::header::CONTENT_TYPE,
                    "text/plain; charset=utf-8",
                )],
                b"Failed to encode metrics".to_vec(),
            )
        }
    }
}

/// List every record file.
async fn list_files(
    State(catalog): State<Arc<Catalog>>,
) -> Result<Json<Vec<FileDescriptor>>, ApiError> {
    let result = catalog.list().instrument(spans::catalog_span("list")).await;
    record_request("list", &result);

    let files = result?;
    metrics::FILES_LISTED.set(i64::try_from(files.len()).unwrap_or(i64::MAX));
    Ok(Json(files))
}

/// Fetch route hit without any path segment.
async fn missing_path() -> ApiError {
    let err: Error = CatalogError::invalid_path("missing path").into();
    metrics::REQUEST_COUNT
        .with_label_values(&["fetch", status_for(&err).as_str()])
        .inc();
    ApiError(err)
}

/// Fetch one record by its path under the data root.
async fn fetch_record(
    State(catalog): State<Arc<Catalog>>,
    Path(path): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let result = catalog
        .fetch_path(&path)
        .instrument(spans::catalog_span("fetch"))
        .await;
    record_request("fetch", &result);

    Ok(Json(result?))
}

/// Search every record.
async fn search(
    State(catalog): State<Arc<Catalog>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<Vec<SearchHit>>, ApiError> {
    let mode = request.mode().as_str();
    let timer = metrics::SEARCH_DURATION
        .with_label_values(&[mode])
        .start_timer();

    let result = catalog
        .search(&request)
        .instrument(spans::catalog_span("search"))
        .await;
    timer.observe_duration();
    record_request("search", &result);

    let hits = result?;
    metrics::SEARCH_MATCHES
        .with_label_values(&[mode])
        .inc_by(u64::try_from(hits.len()).unwrap_or(u64::MAX));
    Ok(Json(hits))
}
