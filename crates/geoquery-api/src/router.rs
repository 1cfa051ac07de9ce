use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))
        // Typed operation path
        .route("/operations/{operation}", post(handlers::handle_operation))
        // Natural-language path
        .route("/query", post(handlers::handle_query))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
