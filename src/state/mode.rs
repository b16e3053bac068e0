//! Timer modes and their preset durations

use std::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

/// Default MAIN preset in seconds (five minutes)
pub const DEFAULT_MAIN_SECONDS: u64 = 300;
/// Default SUPPLEMENTARY preset in seconds (three minutes)
pub const DEFAULT_SUPPLEMENTARY_SECONDS: u64 = 180;

/// Named timer preset selecting a default duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Main,
    Supplementary,
}

impl TimerMode {
    pub const ALL: [TimerMode; 2] = [TimerMode::Main, TimerMode::Supplementary];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Main => "main",
            TimerMode::Supplementary => "supplementary",
        }
    }

    /// Label shown on the mode switcher
    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Main => "主分享",
            TimerMode::Supplementary => "补充分享",
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" => Ok(TimerMode::Main),
            "supplementary" => Ok(TimerMode::Supplementary),
            other => Err(format!("Unknown timer mode: {}", other)),
        }
    }
}

/// Preset durations for every mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModePresets {
    pub main_seconds: u64,
    pub supplementary_seconds: u64,
}

impl ModePresets {
    pub fn new(main_seconds: u64, supplementary_seconds: u64) -> Self {
        Self {
            main_seconds,
            supplementary_seconds,
        }
    }

    /// Preset duration for a mode in seconds
    pub fn seconds(&self, mode: TimerMode) -> u64 {
        match mode {
            TimerMode::Main => self.main_seconds,
            TimerMode::Supplementary => self.supplementary_seconds,
        }
    }
}

impl Default for ModePresets {
    fn default() -> Self {
        Self::new(DEFAULT_MAIN_SECONDS, DEFAULT_SUPPLEMENTARY_SECONDS)
    }
}
