//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

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
        .route("/timer/toggle", post(toggle_handler))
        .route("/timer/reset", post(reset_handler))
        .route("/timer/add-minute", post(add_minute_handler))
        .route("/timer/mode/:mode", post(mode_handler))
        .route("/theme/toggle", post(theme_handler))
        .route("/background/next", post(background_handler))
        .route("/activity", post(activity_handler))
        .route("/status", get(status_handler))
        .route("/modes", get(modes_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{HostSettings, ModePresets};
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> (Arc<AppState>, Router) {
        let state = Arc::new(AppState::new(
            20880,
            "127.0.0.1".to_string(),
            HostSettings {
                presets: ModePresets::new(300, 180),
                ..HostSettings::default()
            },
        ));
        (Arc::clone(&state), create_router(state))
    }

    async fn call(router: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn toggle_starts_and_pauses() {
        let (_, router) = app();

        let (status, body) = call(&router, Method::POST, "/timer/toggle").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "running");
        assert_eq!(body["timer"]["is_running"], true);
        assert_eq!(body["display"], "05:00");

        let (_, body) = call(&router, Method::POST, "/timer/toggle").await;
        assert_eq!(body["status"], "paused");
        assert_eq!(body["message"], "Timer paused");
    }

    #[tokio::test]
    async fn add_minute_and_reset() {
        let (state, router) = app();

        let (_, body) = call(&router, Method::POST, "/timer/add-minute").await;
        assert_eq!(body["timer"]["duration_seconds"], 360);
        assert_eq!(body["timer"]["time_left_seconds"], 360);

        state.toggle_running().unwrap();
        state.tick().unwrap();

        let (_, body) = call(&router, Method::POST, "/timer/reset").await;
        assert_eq!(body["timer"]["time_left_seconds"], 360);
        assert_eq!(body["timer"]["is_running"], false);
        assert_eq!(body["message"], "Timer reset to 06:00");
    }

    #[tokio::test]
    async fn mode_change_and_unknown_mode() {
        let (_, router) = app();

        let (status, body) = call(&router, Method::POST, "/timer/mode/supplementary").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["mode"], "supplementary");
        assert_eq!(body["timer"]["time_left_seconds"], 180);

        let (status, body) = call(&router, Method::POST, "/timer/mode/lunch").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "error");

        let (_, body) = call(&router, Method::GET, "/modes").await;
        assert_eq!(body["modes"][1]["active"], true);
        assert_eq!(body["modes"][0]["display"], "05:00");
    }

    #[tokio::test]
    async fn status_reflects_overtime_and_presentation() {
        let (state, router) = app();
        call(&router, Method::POST, "/timer/mode/supplementary").await;
        state.toggle_running().unwrap();
        for _ in 0..(180 + 65) {
            state.tick().unwrap();
        }
        call(&router, Method::POST, "/theme/toggle").await;

        let (status, body) = call(&router, Method::GET, "/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "overtime");
        assert_eq!(body["display"], "01:05");
        assert_eq!(body["presentation"]["theme"], "light");
        assert_eq!(body["presentation"]["palette"], "overtime");
        assert_eq!(body["last_action"], "theme");
        assert_eq!(body["port"], 20880);
    }

    #[tokio::test]
    async fn background_cycles_and_activity_shows_controls() {
        let (state, router) = app();

        let (_, body) = call(&router, Method::POST, "/background/next").await;
        assert_eq!(body["presentation"]["background_index"], 0);
        assert_eq!(body["presentation"]["background"]["name"], "Valley Mist");

        state.toggle_running().unwrap();
        state.hide_controls().unwrap();
        let (_, body) = call(&router, Method::POST, "/activity").await;
        assert_eq!(body["presentation"]["controls_visible"], true);
    }

    #[tokio::test]
    async fn health_reports_version() {
        let (_, router) = app();
        let (status, body) = call(&router, Method::GET, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
