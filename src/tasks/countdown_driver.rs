//! One-second countdown driver background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::{AppState, TickOutcome};

/// Period of one engine tick
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that advances the timer engine once per second while it runs.
///
/// There is exactly one interval, local to this task. Any change of the running
/// flag drops it and the outer loop re-arms a fresh one if the timer is still
/// running, so a pause/start pair can never leave two drivers behind.
pub async fn countdown_driver_task(state: Arc<AppState>) {
    info!("Starting countdown driver task");

    let mut running_rx = state.running_tx.subscribe();

    loop {
        let running = *running_rx.borrow_and_update();
        if !running {
            // Wait for the timer to start
            if running_rx.changed().await.is_err() {
                break;
            }
            continue;
        }

        let _guard = state.driver_guard();
        debug!("Arming one-second driver");

        // First tick one full second after start, like a freshly set interval
        let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match state.tick() {
                        Ok(TickOutcome::Completed) => {
                            info!("Countdown reached zero");
                        }
                        Ok(outcome) => {
                            debug!("Tick: {:?}", outcome);
                        }
                        Err(e) => {
                            error!("Failed to advance timer: {}", e);
                        }
                    }
                }

                changed = running_rx.changed() => {
                    if changed.is_err() {
                        info!("Running flag channel closed, stopping countdown driver");
                        return;
                    }
                    debug!("Running flag changed, tearing down driver");
                    break;
                }
            }
        }
    }

    info!("Countdown driver task stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{HostSettings, ModePresets, TimerMode};
    use tokio::time::sleep;

    fn spawn_driver(presets: ModePresets) -> Arc<AppState> {
        let state = Arc::new(AppState::new(
            0,
            "127.0.0.1".to_string(),
            HostSettings {
                presets,
                ..HostSettings::default()
            },
        ));
        tokio::spawn(countdown_driver_task(Arc::clone(&state)));
        state
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_second_while_running() {
        let state = spawn_driver(ModePresets::default());
        state.toggle_running().unwrap();

        sleep(Duration::from_millis(3500)).await;
        assert_eq!(state.get_snapshot().unwrap().time_left_seconds, 297);
        assert_eq!(state.active_driver_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_stops_ticks_and_disarms() {
        let state = spawn_driver(ModePresets::default());
        state.toggle_running().unwrap();
        sleep(Duration::from_millis(2500)).await;

        state.toggle_running().unwrap();
        sleep(Duration::from_secs(10)).await;

        let snap = state.get_snapshot().unwrap();
        assert_eq!(snap.time_left_seconds, 298);
        assert!(!snap.is_running);
        assert_eq!(state.active_driver_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_toggling_keeps_a_single_driver() {
        let state = spawn_driver(ModePresets::default());

        for _ in 0..20 {
            state.toggle_running().unwrap();
            sleep(Duration::from_millis(100)).await;
            assert!(state.active_driver_count() <= 1);
        }

        // Even number of toggles leaves the timer paused
        sleep(Duration::from_secs(5)).await;
        assert_eq!(state.active_driver_count(), 0);
        assert_eq!(state.get_snapshot().unwrap().time_left_seconds, 300);
    }

    #[tokio::test(start_paused = true)]
    async fn counts_into_overtime_and_signals_once() {
        let state = spawn_driver(ModePresets::new(3, 180));
        let mut completion_rx = state.completion_tx.subscribe();
        state.toggle_running().unwrap();

        sleep(Duration::from_millis(8500)).await;
        let snap = state.get_snapshot().unwrap();
        assert!(snap.is_overtime);
        assert_eq!(snap.overtime_seconds, 5);

        assert!(completion_rx.try_recv().is_ok());
        assert!(completion_rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn mode_change_stops_the_driver() {
        let state = spawn_driver(ModePresets::default());
        state.toggle_running().unwrap();
        sleep(Duration::from_millis(1500)).await;

        state.change_mode(TimerMode::Supplementary).unwrap();
        sleep(Duration::from_secs(5)).await;

        let snap = state.get_snapshot().unwrap();
        assert_eq!(snap.time_left_seconds, 180);
        assert_eq!(state.active_driver_count(), 0);
    }
}
