//! Router configuration for the annotation server.

use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::handlers;
use crate::AppState;

/// Create the main router with all routes. When `static_dir` is given, its files are served for
/// every path that is not an API route.
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/api/health", get(handlers::health))
        // Annotation recording
        .route("/api/save_annotation", post(handlers::save_annotation))
        .route("/api/get_datasets", get(handlers::get_datasets))
        .route(
            "/api/get_annotations/:dataset",
            get(handlers::get_annotations),
        )
        // Export
        .route(
            "/api/export_hf_format/:dataset",
            get(handlers::export_hf_format),
        )
        // Statistics
        .route("/api/stats", get(handlers::stats))
        .route("/api/stats/:dataset", get(handlers::dataset_stats));
    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };
    router.layer(CorsLayer::permissive()).with_state(state)
}
