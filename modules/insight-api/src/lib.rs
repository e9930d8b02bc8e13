use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use insight_store::SnapshotStore;

pub mod rest;

pub struct AppState {
    pub snapshots: Arc<SnapshotStore>,
}

pub fn build_router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    let cors = if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        // Health check
        .route("/", get(rest::health))
        .route("/health", get(rest::health))
        // REST API
        .route("/api/insights", get(rest::api_insights))
        .route("/api/filters", get(rest::api_filters))
        .route("/api/map-data", get(rest::api_map_data))
        .route("/api/dashboard", get(rest::api_dashboard))
        .route("/api/reload", post(rest::api_reload))
        .with_state(state)
        .layer(cors)
        // Snapshot data changes on reload; never let clients cache it
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Logging layer: method + path only (no query params)
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
