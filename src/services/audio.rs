//! Bell cue playback through an external audio player

use tokio::process::Command;
use tracing::{debug, info, warn};

/// External command used to ring the bell, e.g. `paplay /usr/share/sounds/bell.oga`
#[derive(Debug, Clone, Default)]
pub struct CuePlayer {
    program: Option<String>,
    args: Vec<String>,
}

impl CuePlayer {
    /// Build a player from a whitespace-separated command line.
    /// An empty or missing command yields a silent player.
    pub fn from_command(command: Option<&str>) -> Self {
        let mut parts = command
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string);

        Self {
            program: parts.next(),
            args: parts.collect(),
        }
    }

    /// A player that only logs
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn is_silent(&self) -> bool {
        self.program.is_none()
    }

    pub fn program(&self) -> Option<&str> {
        self.program.as_deref()
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Start one bell play without waiting for it to finish.
    ///
    /// The child is reaped by a detached task that only logs its exit status.
    pub fn play(&self) -> Result<(), String> {
        let Some(program) = &self.program else {
            debug!("No bell command configured, skipping playback");
            return Ok(());
        };

        let mut child = Command::new(program)
            .args(&self.args)
            .spawn()
            .map_err(|e| format!("Failed to start bell command {}: {}", program, e))?;

        let program = program.clone();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => debug!("{} finished", program),
                Ok(status) => warn!("{} exited with {}", program, status),
                Err(e) => warn!("Failed to wait for {}: {}", program, e),
            }
        });

        Ok(())
    }
}

/// Check that the configured bell command can be found on PATH
pub async fn check_player_available(player: &CuePlayer) -> Result<(), String> {
    let Some(program) = player.program() else {
        info!("No bell command configured, bell will be silent");
        return Ok(());
    };

    Command::new("which")
        .arg(program)
        .output()
        .await
        .map_err(|e| format!("Failed to look up {}: {}", program, e))
        .and_then(|output| {
            if output.status.success() {
                info!("Bell command {} is available", program);
                Ok(())
            } else {
                Err(format!("Bell command {} was not found on PATH", program))
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_program_and_arguments() {
        let player = CuePlayer::from_command(Some("paplay  --volume 45000 bell.oga"));
        assert_eq!(player.program(), Some("paplay"));
        assert_eq!(player.args(), ["--volume", "45000", "bell.oga"]);
        assert!(!player.is_silent());
    }

    #[test]
    fn blank_command_is_silent() {
        assert!(CuePlayer::from_command(None).is_silent());
        assert!(CuePlayer::from_command(Some("   ")).is_silent());
    }

    #[tokio::test]
    async fn silent_player_plays_without_error() {
        assert!(CuePlayer::silent().play().is_ok());
    }

    #[tokio::test]
    async fn missing_program_reports_error() {
        let player = CuePlayer::from_command(Some("zen-timer-no-such-player-binary"));
        let err = player.play().unwrap_err();
        assert!(err.contains("zen-timer-no-such-player-binary"));
    }
}
