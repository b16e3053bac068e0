//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    state::{AppState, PresentationView, TimerMode, TimerSnapshot},
    utils::format_clock,
};
use super::responses::{
    ApiResponse, ErrorResponse, HealthResponse, ModeInfo, ModesResponse, PresentationResponse,
    StatusResponse,
};

type HandlerResult<T> = Result<Json<T>, StatusCode>;

fn timer_response(
    action: &str,
    result: Result<TimerSnapshot, String>,
    message: impl FnOnce(&TimerSnapshot) -> String,
) -> HandlerResult<ApiResponse> {
    match result {
        Ok(timer) => {
            info!("{} endpoint called", action);
            Ok(Json(ApiResponse::new(message(&timer), timer)))
        }
        Err(e) => {
            error!("Failed to {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/toggle - Start or pause the countdown
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    timer_response("toggle", state.toggle_running(), |timer| {
        let message = if timer.is_running { "Timer started" } else { "Timer paused" };
        message.to_string()
    })
}

/// Handle POST /timer/reset - Reload the configured duration and stop
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    timer_response("reset", state.reset(), |timer| {
        format!("Timer reset to {}", format_clock(timer.duration_seconds))
    })
}

/// Handle POST /timer/add-minute - Extend the countdown by one minute
pub async fn add_minute_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    timer_response("add-minute", state.add_minute(), |timer| {
        format!("Duration extended to {}", format_clock(timer.duration_seconds))
    })
}

/// Handle POST /timer/mode/:mode - Switch preset and reset
pub async fn mode_handler(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ErrorResponse>)> {
    let mode: TimerMode = mode.parse().map_err(|e: String| {
        warn!("Rejected mode change: {}", e);
        (StatusCode::NOT_FOUND, Json(ErrorResponse::new(e)))
    })?;

    timer_response("change-mode", state.change_mode(mode), |timer| {
        format!("Switched to {} mode ({})", timer.mode.label(), format_clock(timer.duration_seconds))
    })
    .map_err(|code| (code, Json(ErrorResponse::new("Failed to change mode"))))
}

fn presentation_response(
    action: &str,
    result: Result<PresentationView, String>,
    message: &str,
) -> HandlerResult<PresentationResponse> {
    match result {
        Ok(view) => {
            info!("{} endpoint called", action);
            Ok(Json(PresentationResponse::new(message, view)))
        }
        Err(e) => {
            error!("Failed to {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /theme/toggle - Flip dark/light theme
pub async fn theme_handler(State(state): State<Arc<AppState>>) -> HandlerResult<PresentationResponse> {
    presentation_response("toggle-theme", state.toggle_theme(), "Theme toggled")
}

/// Handle POST /background/next - Cycle the background image
pub async fn background_handler(State(state): State<Arc<AppState>>) -> HandlerResult<PresentationResponse> {
    presentation_response("next-background", state.next_background(), "Background changed")
}

/// Handle POST /activity - Show the controls and restart the auto-hide wait
pub async fn activity_handler(State(state): State<Arc<AppState>>) -> HandlerResult<PresentationResponse> {
    let result = state
        .register_activity()
        .and_then(|()| state.get_presentation());
    presentation_response("activity", result, "Activity registered")
}

/// Handle GET /status - Return timer, presentation and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> HandlerResult<StatusResponse> {
    let timer = match state.get_snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let presentation = match state.get_presentation() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to get presentation state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        status: timer.phase(),
        display: format_clock(timer.display_seconds()),
        timer,
        presentation,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /modes - List modes with their presets
pub async fn modes_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ModesResponse> {
    let current = match state.get_snapshot() {
        Ok(t) => t.mode,
        Err(e) => {
            error!("Failed to get timer snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let presets = state.settings.presets;
    let modes = TimerMode::ALL
        .iter()
        .map(|&mode| ModeInfo {
            mode,
            label: mode.label(),
            seconds: presets.seconds(mode),
            display: format_clock(presets.seconds(mode)),
            active: mode == current,
        })
        .collect();

    Ok(Json(ModesResponse { modes }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
