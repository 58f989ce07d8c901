//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{Transition, TimerView};

/// API response structure for timer control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub view: TimerView,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, view: TimerView) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            view,
        }
    }

    /// Build a response for a transition, flagging guarded no-ops
    pub fn from_transition(transition: &Transition, message: &str) -> Self {
        let view = TimerView::render(&transition.current);
        if transition.changed() {
            Self::new("ok".to_string(), message.to_string(), view)
        } else {
            Self::new(
                "unchanged".to_string(),
                "Control is disabled in the current state".to_string(),
                view,
            )
        }
    }
}

/// Status response with timer view and server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub view: TimerView,
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
