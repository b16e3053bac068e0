//! Control auto-hide background task

use std::sync::Arc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error, info};

use crate::state::AppState;

/// Background task that hides the controls after a quiet period while the
/// timer runs. Any activity shows them again and restarts the wait.
pub async fn ui_visibility_task(state: Arc<AppState>) {
    info!("Starting control visibility task");

    let hide_after = state.settings.hide_controls_after;
    let mut activity_rx = state.activity_tx.subscribe();
    let mut snapshot_rx = state.snapshot_tx.subscribe();

    loop {
        let running = snapshot_rx.borrow_and_update().is_running;
        let last_activity = *activity_rx.borrow_and_update();
        let visible = state
            .get_presentation()
            .map(|view| view.controls_visible)
            .unwrap_or(true);
        let deadline = (running && visible).then(|| last_activity + hide_after);

        tokio::select! {
            changed = activity_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }

            changed = snapshot_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }

            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                match state.hide_controls() {
                    Ok(true) => debug!("No activity for {:?}, controls hidden", hide_after),
                    Ok(false) => {}
                    Err(e) => {
                        error!("Failed to hide controls: {}", e);
                        break;
                    }
                }
            }
        }
    }

    info!("Control visibility task stopped");
}
