//! State management module
//!
//! This module contains the timer engine and the host-side state around it.

pub mod app_state;
pub mod bell;
pub mod mode;
pub mod presentation;
pub mod timer_engine;

// Re-export main types
pub use app_state::{AppState, BellStrike, CountdownComplete, HostSettings};
pub use bell::BellSequence;
pub use mode::{ModePresets, TimerMode};
pub use presentation::{Palette, PresentationState, PresentationView, Theme};
pub use timer_engine::{TickOutcome, TimerEngine, TimerPhase, TimerSnapshot};
