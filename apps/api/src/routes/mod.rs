pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::description::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Description API
        .route(
            "/api/v1/descriptions/segment",
            post(handlers::handle_segment),
        )
        .route("/api/v1/descriptions/render", post(handlers::handle_render))
        .fallback(not_found)
        .with_state(state)
}
