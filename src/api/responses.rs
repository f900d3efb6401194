//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::Snapshot;

/// API response structure for command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// `"idle"` or `"running"`
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub snapshot: Snapshot,
}

impl ApiResponse {
    /// Create a new API response whose status mirrors the snapshot phase
    pub fn new(message: impl Into<String>, snapshot: Snapshot) -> Self {
        Self {
            status: snapshot.phase.as_str().to_string(),
            message: message.into(),
            timestamp: Utc::now(),
            snapshot,
        }
    }
}

/// Status response with server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub snapshot: Snapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
