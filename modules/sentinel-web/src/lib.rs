use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use sentinel_common::IntelSnapshot;

pub mod templates;
use templates::*;

// --- App State ---

/// Read-only view handed to every handler. The snapshot is built once before
/// the server starts and never changes.
#[derive(Clone)]
pub struct AppState {
    pub snapshot: Arc<IntelSnapshot>,
}

impl AppState {
    pub fn new(snapshot: IntelSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }
}

// --- Router ---

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/nodes/{name}", get(node_page))
        .route("/api/intel", get(api_intel))
        .route("/api/intel/{name}", get(api_intel_node))
        .route("/health", get(health))
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
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

// --- Handlers ---

async fn dashboard_page(State(state): State<AppState>) -> impl IntoResponse {
    Html(render_dashboard(&state.snapshot, None))
}

async fn node_page(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match state.snapshot.find(&name) {
        Some(record) => (
            StatusCode::OK,
            Html(render_dashboard(&state.snapshot, Some(record))),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Html(render_not_found(&name)),
        ),
    }
}

async fn api_intel(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.snapshot.as_ref().clone())
}

async fn api_intel_node(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match state.snapshot.find(&name) {
        Some(record) => Json(record.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("unknown node: {name}") })),
        )
            .into_response(),
    }
}

async fn health() -> &'static str {
    "ok"
}
