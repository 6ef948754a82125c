use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use xsd_validator_core::ReferencePolicy;

use super::handler::validation_handler;
use super::ServerArgs;

/// Read-only per-process settings. Nothing in here changes between requests.
pub struct AppState {
    pub references: ReferencePolicy,
}

impl AppState {
    pub fn from_args(args: &ServerArgs) -> Self {
        let references = match &args.reference_root {
            Some(root) => ReferencePolicy::rooted_at(root),
            None => ReferencePolicy::disabled(),
        };
        Self { references }
    }
}

#[derive(serde::Serialize)]
struct HealthDto {
    status: &'static str,
}

// API endpoints
// - POST {route} (default /)
//   Validate `data` (XML) against `schema` (XSD). Always answers with
//   {"validation": bool, "info": string}; 200 when a verdict was reached,
//   400 when the body or its fields could not be used.
//
// - GET  /health
//   Liveness check for the hosting platform.
//
pub fn build_router(args: &ServerArgs) -> Router {
    let state = Arc::new(AppState::from_args(args));
    let cors = CorsLayer::permissive();

    Router::new()
        .route(&args.route, post(validation_handler))
        .route("/health", get(health))
        .with_state(state)
        .layer(DefaultBodyLimit::max(args.max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<HealthDto> {
    Json(HealthDto { status: "ok" })
}
