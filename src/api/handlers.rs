//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::AppState;
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Build a command response from the current snapshot
fn respond(state: &AppState, message: &str) -> Result<Json<ApiResponse>, StatusCode> {
    match state.snapshot() {
        Ok(snapshot) => Ok(Json(ApiResponse::new(message, snapshot))),
        Err(e) => {
            error!("Failed to read state snapshot: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /keypad/digit/:digit - Type one digit
pub async fn digit_handler(
    State(state): State<Arc<AppState>>,
    Path(digit): Path<u8>,
) -> Result<Json<ApiResponse>, StatusCode> {
    if digit > 9 {
        return Err(StatusCode::BAD_REQUEST);
    }

    match state.type_digit(digit) {
        Ok(true) => respond(&state, "Digit added"),
        Ok(false) => respond(&state, "Digit ignored"),
        Err(e) => {
            error!("Failed to type digit: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /keypad/delete - Remove the last digit
pub async fn delete_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.delete_digit() {
        Ok(true) => respond(&state, "Digit deleted"),
        Ok(false) => respond(&state, "Nothing to delete"),
        Err(e) => {
            error!("Failed to delete digit: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /countdown/start - Start counting down from the keypad value
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.start_countdown() {
        Ok(true) => {
            info!("Start endpoint called - countdown started");
            respond(&state, "Countdown started")
        }
        Ok(false) => respond(&state, "Countdown already running"),
        Err(e) => {
            error!("Failed to start countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /countdown/stop - Stop and reset
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.stop_countdown() {
        Ok(()) => {
            info!("Stop endpoint called - countdown reset");
            respond(&state, "Countdown stopped")
        }
        Err(e) => {
            error!("Failed to stop countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return current state and server metadata
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let snapshot = match state.snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to read state snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        snapshot,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
