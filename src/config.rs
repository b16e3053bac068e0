//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

use crate::{
    services::CuePlayer,
    state::{HostSettings, ModePresets},
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "zen-timer")]
#[command(about = "A meditation countdown timer with overtime tracking and a bell cue")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20880")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// MAIN mode duration in seconds
    #[arg(long, default_value = "300")]
    pub main_seconds: u64,

    /// SUPPLEMENTARY mode duration in seconds
    #[arg(long, default_value = "180")]
    pub supplementary_seconds: u64,

    /// Number of bell strikes when the countdown completes
    #[arg(long, default_value = "3")]
    pub bell_count: u32,

    /// Milliseconds between bell strikes
    #[arg(long, default_value = "1500")]
    pub bell_interval_ms: u64,

    /// Command that plays the bell once, e.g. "paplay /usr/share/sounds/bell.oga"
    #[arg(long)]
    pub bell_command: Option<String>,

    /// Milliseconds of inactivity before the controls hide while running
    #[arg(long, default_value = "4000")]
    pub hide_controls_after_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn host_settings(&self) -> HostSettings {
        HostSettings {
            presets: ModePresets::new(self.main_seconds, self.supplementary_seconds),
            bell_count: self.bell_count,
            bell_interval: Duration::from_millis(self.bell_interval_ms),
            hide_controls_after: Duration::from_millis(self.hide_controls_after_ms),
        }
    }

    pub fn cue_player(&self) -> CuePlayer {
        CuePlayer::from_command(self.bell_command.as_deref())
    }
}
