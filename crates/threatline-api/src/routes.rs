//! API route definitions

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::handlers::*;

/// Create the main API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health and status routes
        .route("/health", get(health))

        // Snapshot read routes
        .route("/groups", get(get_groups))
        .route("/campaigns", get(get_campaigns))
        .route("/timeline", get(get_timeline))

        // Refresh route
        .route("/refresh", post(force_refresh))

        // Apply middleware
        .layer(CorsLayer::permissive())
        .layer(Extension(state))
}
