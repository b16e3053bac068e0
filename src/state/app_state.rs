//! Main application state management

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::{
    sync::{broadcast, watch},
    time::Instant,
};
use tracing::{debug, info, warn};

use super::{
    bell::{DEFAULT_BELL_COUNT, DEFAULT_BELL_INTERVAL},
    ModePresets, PresentationState, PresentationView, TickOutcome, TimerEngine, TimerMode,
    TimerSnapshot,
};

/// Default delay before controls hide while the timer runs
pub const DEFAULT_HIDE_CONTROLS_AFTER: Duration = Duration::from_millis(4000);

/// Host-side settings that do not belong to the engine itself
#[derive(Debug, Clone)]
pub struct HostSettings {
    pub presets: ModePresets,
    pub bell_count: u32,
    pub bell_interval: Duration,
    pub hide_controls_after: Duration,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            presets: ModePresets::default(),
            bell_count: DEFAULT_BELL_COUNT,
            bell_interval: DEFAULT_BELL_INTERVAL,
            hide_controls_after: DEFAULT_HIDE_CONTROLS_AFTER,
        }
    }
}

/// Signal emitted once per countdown-to-overtime crossing
#[derive(Debug, Clone, Serialize)]
pub struct CountdownComplete {
    pub mode: TimerMode,
    pub duration_seconds: u64,
    pub at: DateTime<Utc>,
    /// Cue generation current when the countdown completed
    pub generation: u64,
}

/// One ring of the bell, published for listeners
#[derive(Debug, Clone, Serialize)]
pub struct BellStrike {
    pub number: u32,
    pub of: u32,
    pub generation: u64,
}

/// Main application state owning the single timer engine
#[derive(Debug)]
pub struct AppState {
    /// The one engine of this session; all mutation goes through `AppState`
    pub engine: Arc<Mutex<TimerEngine>>,
    pub presentation: Arc<Mutex<PresentationState>>,
    pub settings: HostSettings,
    /// Server metadata
    pub start_time: std::time::Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Latest engine snapshot, followed by the control visibility task
    pub snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Running flag; the countdown driver arms and tears down on changes
    pub running_tx: watch::Sender<bool>,
    /// Completion signals for the bell task
    pub completion_tx: broadcast::Sender<CountdownComplete>,
    /// Bumped by reset and mode change to cancel a bell sequence in flight
    pub cue_generation_tx: watch::Sender<u64>,
    /// Instant of the last user activity
    pub activity_tx: watch::Sender<Instant>,
    /// Each bell strike, for listeners outside the service
    pub bell_tx: broadcast::Sender<BellStrike>,
    /// Number of armed one-second drivers; never more than one
    pub active_drivers: AtomicUsize,
}

impl AppState {
    /// Create a new AppState with the engine loaded with the MAIN preset
    pub fn new(port: u16, host: String, settings: HostSettings) -> Self {
        let engine = TimerEngine::new(settings.presets);
        let snapshot = engine.snapshot();
        let presentation = PresentationState::new(&mut rand::thread_rng());

        let (snapshot_tx, _) = watch::channel(snapshot);
        let (running_tx, _) = watch::channel(false);
        let (completion_tx, _) = broadcast::channel(16);
        let (cue_generation_tx, _) = watch::channel(0);
        let (activity_tx, _) = watch::channel(Instant::now());
        let (bell_tx, _) = broadcast::channel(16);

        Self {
            engine: Arc::new(Mutex::new(engine)),
            presentation: Arc::new(Mutex::new(presentation)),
            settings,
            start_time: std::time::Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            snapshot_tx,
            running_tx,
            completion_tx,
            cue_generation_tx,
            activity_tx,
            bell_tx,
            active_drivers: AtomicUsize::new(0),
        }
    }

    /// Apply a user command to the engine and publish the result
    pub fn update_engine<F>(&self, action: &str, updater: F) -> Result<TimerSnapshot, String>
    where
        F: FnOnce(&mut TimerEngine),
    {
        let mut engine = self.engine.lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;

        updater(&mut *engine);
        let snapshot = engine.snapshot();
        // Publish under the lock so channel order matches engine order
        self.publish(snapshot);
        drop(engine);

        self.record_action(action);
        self.register_activity()?;

        Ok(snapshot)
    }

    /// Start or pause the countdown
    pub fn toggle_running(&self) -> Result<TimerSnapshot, String> {
        let snapshot = self.update_engine("toggle", |engine| {
            engine.toggle_running();
        })?;
        info!(
            "Timer {} ({}s left, overtime={})",
            if snapshot.is_running { "started" } else { "paused" },
            snapshot.time_left_seconds,
            snapshot.is_overtime
        );
        Ok(snapshot)
    }

    /// Reset to the configured duration
    pub fn reset(&self) -> Result<TimerSnapshot, String> {
        let snapshot = self.update_engine("reset", |engine| {
            engine.reset();
            self.cancel_cues();
        })?;
        info!("Timer reset to {}s", snapshot.duration_seconds);
        Ok(snapshot)
    }

    /// Add one minute to both duration and time left
    pub fn add_minute(&self) -> Result<TimerSnapshot, String> {
        let snapshot = self.update_engine("add-minute", TimerEngine::add_minute)?;
        info!(
            "Added one minute: duration={}s, left={}s",
            snapshot.duration_seconds, snapshot.time_left_seconds
        );
        Ok(snapshot)
    }

    /// Switch to another preset, fully resetting the engine
    pub fn change_mode(&self, mode: TimerMode) -> Result<TimerSnapshot, String> {
        let action = format!("mode-{}", mode);
        let snapshot = self.update_engine(&action, |engine| {
            engine.change_mode(mode);
            self.cancel_cues();
        })?;
        info!("Mode changed to {} ({}s)", mode, snapshot.duration_seconds);
        Ok(snapshot)
    }

    /// Advance the engine by one second. Called only by the countdown driver.
    pub fn tick(&self) -> Result<TickOutcome, String> {
        let mut engine = self.engine.lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;

        let outcome = engine.tick();
        if outcome == TickOutcome::Idle {
            return Ok(outcome);
        }

        let snapshot = engine.snapshot();
        self.publish(snapshot);
        // Read under the engine lock so a reset cannot slip in between
        let generation = *self.cue_generation_tx.borrow();
        drop(engine);

        if outcome.is_completion() {
            info!("Countdown complete, entering overtime");
            let signal = CountdownComplete {
                mode: snapshot.mode,
                duration_seconds: snapshot.duration_seconds,
                at: Utc::now(),
                generation,
            };
            if let Err(e) = self.completion_tx.send(signal) {
                warn!("No listener for countdown completion: {}", e);
            }
        }

        Ok(outcome)
    }

    /// Get current engine snapshot
    pub fn get_snapshot(&self) -> Result<TimerSnapshot, String> {
        self.engine.lock()
            .map(|engine| engine.snapshot())
            .map_err(|e| format!("Failed to lock timer engine: {}", e))
    }

    /// Get the presentation view for the current engine state
    pub fn get_presentation(&self) -> Result<PresentationView, String> {
        let snapshot = self.get_snapshot()?;
        self.presentation.lock()
            .map(|presentation| presentation.view(&snapshot))
            .map_err(|e| format!("Failed to lock presentation state: {}", e))
    }

    /// Flip between dark and light theme
    pub fn toggle_theme(&self) -> Result<PresentationView, String> {
        self.update_presentation("theme", |presentation| {
            let theme = presentation.toggle_theme();
            info!("Theme set to {:?}", theme);
        })
    }

    /// Cycle to the next background, drawing a new quote
    pub fn next_background(&self) -> Result<PresentationView, String> {
        self.update_presentation("background", |presentation| {
            let index = presentation.next_background(&mut rand::thread_rng());
            info!("Background changed to {}", presentation.background().name);
            debug!("Background index {}, quote: {}", index, presentation.quote());
        })
    }

    fn update_presentation<F>(&self, action: &str, updater: F) -> Result<PresentationView, String>
    where
        F: FnOnce(&mut PresentationState),
    {
        {
            let mut presentation = self.presentation.lock()
                .map_err(|e| format!("Failed to lock presentation state: {}", e))?;
            updater(&mut *presentation);
        }
        self.record_action(action);
        self.register_activity()?;
        self.get_presentation()
    }

    /// Show the controls and restart the auto-hide countdown
    pub fn register_activity(&self) -> Result<(), String> {
        let mut presentation = self.presentation.lock()
            .map_err(|e| format!("Failed to lock presentation state: {}", e))?;
        presentation.show_controls();
        drop(presentation);

        self.activity_tx.send_replace(Instant::now());
        Ok(())
    }

    /// Hide the controls if the timer is running. Returns whether they were
    /// visible and are now hidden.
    pub fn hide_controls(&self) -> Result<bool, String> {
        let running = self.get_snapshot()?.is_running;
        if !running {
            return Ok(false);
        }

        let mut presentation = self.presentation.lock()
            .map_err(|e| format!("Failed to lock presentation state: {}", e))?;
        let was_visible = presentation.controls_visible();
        if was_visible {
            presentation.hide_controls();
            debug!("Controls hidden after inactivity");
        }
        Ok(was_visible)
    }

    /// Called with the engine lock held
    fn publish(&self, snapshot: TimerSnapshot) {
        self.snapshot_tx.send_replace(snapshot);
        let running = snapshot.is_running;
        self.running_tx.send_if_modified(|current| {
            if *current != running {
                *current = running;
                true
            } else {
                false
            }
        });
    }

    /// Called with the engine lock held
    fn cancel_cues(&self) {
        self.cue_generation_tx.send_modify(|generation| *generation += 1);
        debug!("Cue generation bumped to {}", *self.cue_generation_tx.borrow());
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Mark a countdown driver as armed; the guard disarms it on drop
    pub fn driver_guard(&self) -> DriverGuard<'_> {
        let active = self.active_drivers.fetch_add(1, Ordering::SeqCst) + 1;
        if active > 1 {
            warn!("{} countdown drivers armed at once", active);
        }
        DriverGuard { state: self }
    }

    pub fn active_driver_count(&self) -> usize {
        self.active_drivers.load(Ordering::SeqCst)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        let seconds = secs % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

/// Keeps [`AppState::active_drivers`] accurate across every exit path of the driver
#[derive(Debug)]
pub struct DriverGuard<'a> {
    state: &'a AppState,
}

impl Drop for DriverGuard<'_> {
    fn drop(&mut self) {
        self.state.active_drivers.fetch_sub(1, Ordering::SeqCst);
    }
}
