//! HTTP API module
//! 
//! Command endpoints a presentation layer uses to drive the keypad and
//! countdown, plus status and health reads.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/keypad/digit/:digit", post(digit_handler))
        .route("/keypad/delete", post(delete_handler))
        .route("/countdown/start", post(start_handler))
        .route("/countdown/stop", post(stop_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
