//! Countdown/overtime timer engine
//!
//! The engine is a plain state machine with no clock of its own. The host
//! advances it by calling [`TimerEngine::tick`] once per elapsed second while
//! it is running, and forwards user intents through the command methods.
//!
//! ```text
//! Paused <-> Counting --(1 -> 0)--> Overtime
//!    ^           |                     |
//!    +--- reset / change_mode ---------+
//! ```

use serde::{Deserialize, Serialize};

use super::mode::{ModePresets, TimerMode};

/// Seconds added by [`TimerEngine::add_minute`]
pub const ADD_TIME_SECONDS: u64 = 60;

/// Phase derived from the engine flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Paused,
    #[serde(rename = "running")]
    Counting,
    Overtime,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The engine is paused; nothing changed
    Idle,
    /// Countdown advanced, carrying the seconds left
    Counting(u64),
    /// Countdown just reached zero and overtime began
    Completed,
    /// Overtime advanced, carrying the overtime seconds
    Overtime(u64),
}

impl TickOutcome {
    /// Whether this tick is the countdown-to-overtime crossing
    pub fn is_completion(&self) -> bool {
        matches!(self, TickOutcome::Completed)
    }
}

/// Read-only view of the engine handed to the host UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub mode: TimerMode,
    pub duration_seconds: u64,
    pub time_left_seconds: u64,
    pub is_running: bool,
    pub is_overtime: bool,
    pub overtime_seconds: u64,
}

impl TimerSnapshot {
    pub fn phase(&self) -> TimerPhase {
        if self.is_overtime && self.is_running {
            TimerPhase::Overtime
        } else if self.is_running {
            TimerPhase::Counting
        } else {
            TimerPhase::Paused
        }
    }

    /// Seconds the display should show: overtime elapsed, or time left
    pub fn display_seconds(&self) -> u64 {
        if self.is_overtime {
            self.overtime_seconds
        } else {
            self.time_left_seconds
        }
    }
}

/// Countdown timer with an open-ended overtime phase
#[derive(Debug, Clone)]
pub struct TimerEngine {
    presets: ModePresets,
    mode: TimerMode,
    duration_seconds: u64,
    time_left_seconds: u64,
    is_running: bool,
    is_overtime: bool,
    overtime_seconds: u64,
}

impl TimerEngine {
    /// Create a paused engine loaded with the MAIN preset
    pub fn new(presets: ModePresets) -> Self {
        let seconds = presets.seconds(TimerMode::Main);
        Self {
            presets,
            mode: TimerMode::Main,
            duration_seconds: seconds,
            time_left_seconds: seconds,
            is_running: false,
            is_overtime: false,
            overtime_seconds: 0,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn presets(&self) -> ModePresets {
        self.presets
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn is_overtime(&self) -> bool {
        self.is_overtime
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.mode,
            duration_seconds: self.duration_seconds,
            time_left_seconds: self.time_left_seconds,
            is_running: self.is_running,
            is_overtime: self.is_overtime,
            overtime_seconds: self.overtime_seconds,
        }
    }

    /// Advance the clock by one second.
    ///
    /// The crossing into overtime happens on the tick that takes the countdown
    /// to zero, and only on that tick: later ticks count overtime up, so the
    /// completion outcome cannot repeat until a reset or mode change. A
    /// zero-length countdown that has been started crosses on its first tick.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running {
            return TickOutcome::Idle;
        }

        if self.is_overtime {
            self.overtime_seconds = self.overtime_seconds.saturating_add(1);
            return TickOutcome::Overtime(self.overtime_seconds);
        }

        self.time_left_seconds = self.time_left_seconds.saturating_sub(1);
        if self.time_left_seconds == 0 {
            self.is_overtime = true;
            self.overtime_seconds = 0;
            return TickOutcome::Completed;
        }

        TickOutcome::Counting(self.time_left_seconds)
    }

    /// Start or pause. Returns the new running flag.
    pub fn toggle_running(&mut self) -> bool {
        self.is_running = !self.is_running;
        self.is_running
    }

    /// Reload the configured duration and stop
    pub fn reset(&mut self) {
        self.time_left_seconds = self.duration_seconds;
        self.is_running = false;
        self.is_overtime = false;
        self.overtime_seconds = 0;
    }

    /// Extend both the remaining time and the configured duration by a minute.
    ///
    /// In overtime this only updates the counters; the engine stays in overtime.
    pub fn add_minute(&mut self) {
        self.time_left_seconds = self.time_left_seconds.saturating_add(ADD_TIME_SECONDS);
        self.duration_seconds = self.duration_seconds.saturating_add(ADD_TIME_SECONDS);
    }

    /// Switch presets, fully resetting the engine
    pub fn change_mode(&mut self, mode: TimerMode) {
        let seconds = self.presets.seconds(mode);
        self.mode = mode;
        self.duration_seconds = seconds;
        self.time_left_seconds = seconds;
        self.is_running = false;
        self.is_overtime = false;
        self.overtime_seconds = 0;
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(ModePresets::default())
    }
}
