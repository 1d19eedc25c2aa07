// GET handlers: version, metrics, per-process metrics

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::AppState;

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

fn not_ready() -> Response {
    error(
        StatusCode::SERVICE_UNAVAILABLE,
        "metrics not available yet",
    )
}

/// GET /version — service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/metrics — latest aggregated metrics; 503 until the first refresh succeeds.
pub(super) async fn metrics_handler(State(state): State<AppState>) -> Response {
    let latest = state.latest.read().await.clone();
    match latest {
        Some(metrics) => Json(metrics.as_ref().clone()).into_response(),
        None => not_ready(),
    }
}

/// GET /api/metrics/processes/{key} — one logical process with all its versions.
pub(super) async fn process_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Response {
    let Some(metrics) = state.latest.read().await.clone() else {
        return not_ready();
    };
    match metrics.process(&key) {
        Some(process) => Json(process.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "unknown process key"),
    }
}
