//! API response structures

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    state::{PresentationView, TimerMode, TimerPhase, TimerSnapshot},
    utils::format_clock,
};

/// API response structure for timer command endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: TimerPhase,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
    pub display: String,
}

impl ApiResponse {
    /// Create a response describing the timer after a command
    pub fn new(message: impl Into<String>, timer: TimerSnapshot) -> Self {
        Self {
            status: timer.phase(),
            message: message.into(),
            timestamp: Utc::now(),
            timer,
            display: format_clock(timer.display_seconds()),
        }
    }
}

/// Response for presentation endpoints
#[derive(Debug, Clone, Serialize)]
pub struct PresentationResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub presentation: PresentationView,
}

impl PresentationResponse {
    pub fn new(message: impl Into<String>, presentation: PresentationView) -> Self {
        Self {
            message: message.into(),
            timestamp: Utc::now(),
            presentation,
        }
    }
}

/// Full status: timer, display, presentation and server metadata
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: TimerPhase,
    pub timer: TimerSnapshot,
    pub display: String,
    pub presentation: PresentationView,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModeInfo {
    pub mode: TimerMode,
    pub label: &'static str,
    pub seconds: u64,
    pub display: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModesResponse {
    pub modes: Vec<ModeInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
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
