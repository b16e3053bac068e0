//! Zen Timer - A meditation countdown timer with overtime tracking
//!
//! This is the main entry point for the zen-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use zen_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    services::check_player_available,
    tasks::{bell_cue_task, countdown_driver_task, ui_visibility_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("zen_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting zen-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, main={}s, supplementary={}s",
          config.host, config.port, config.main_seconds, config.supplementary_seconds);

    // A missing bell player is not fatal; the timer still runs silently
    let player = config.cue_player();
    if let Err(e) = check_player_available(&player).await {
        warn!("{}", e);
    }

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.host_settings()));

    // Start the background tasks
    tokio::spawn(countdown_driver_task(Arc::clone(&state)));
    tokio::spawn(bell_cue_task(Arc::clone(&state), player));
    tokio::spawn(ui_visibility_task(Arc::clone(&state)));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/toggle       - Start or pause");
    info!("  POST /timer/reset        - Reset to the configured duration");
    info!("  POST /timer/add-minute   - Add one minute");
    info!("  POST /timer/mode/:mode   - Switch to main or supplementary");
    info!("  POST /theme/toggle       - Toggle dark/light theme");
    info!("  POST /background/next    - Cycle background");
    info!("  POST /activity           - Register user activity");
    info!("  GET  /status             - Timer and presentation status");
    info!("  GET  /modes              - Mode presets");
    info!("  GET  /health             - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
