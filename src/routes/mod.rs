// HTTP routes

mod http;

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};

use crate::worker::SharedMetrics;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) latest: SharedMetrics,
}

pub fn app(latest: SharedMetrics) -> Router {
    let state = AppState { latest };
    Router::new()
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/metrics", get(http::metrics_handler)) // GET /api/metrics
        .route(
            "/api/metrics/processes/{key}",
            get(http::process_handler),
        ) // GET /api/metrics/processes/{key}
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
