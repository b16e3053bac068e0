//! External service module
//!
//! Playback of the bell cue through an external audio player.

pub mod audio;

// Re-export main types
pub use audio::{check_player_available, CuePlayer};
