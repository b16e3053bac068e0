//! Zen Timer - A meditation countdown timer with overtime tracking
//!
//! This library provides the countdown/overtime timer engine and the small
//! service around it: a one-second driver, a repeating bell cue, presentation
//! state for the UI and an HTTP API to drive it all.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, TimerEngine, TimerMode, TimerSnapshot};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
