//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod bell_cue;
pub mod countdown_driver;
pub mod ui_visibility;

// Re-export main functions
pub use bell_cue::bell_cue_task;
pub use countdown_driver::countdown_driver_task;
pub use ui_visibility::ui_visibility_task;
