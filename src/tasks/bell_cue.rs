//! Bell cue background task

use std::sync::Arc;
use tokio::{
    sync::broadcast::error::RecvError,
    time::{sleep_until, Instant},
};
use tracing::{debug, info, warn};

use crate::{
    services::CuePlayer,
    state::{AppState, BellSequence, BellStrike},
};

/// Background task that rings the bell after each countdown completion.
///
/// The pending strikes live in a [`BellSequence`]; a reset or mode change
/// bumps the cue generation, which cancels whatever is left of it.
pub async fn bell_cue_task(state: Arc<AppState>, player: CuePlayer) {
    info!("Starting bell cue task");

    let count = state.settings.bell_count;
    let mut sequence = BellSequence::new(state.settings.bell_interval);
    let mut completion_rx = state.completion_tx.subscribe();
    let mut generation_rx = state.cue_generation_tx.subscribe();
    let mut generation = *generation_rx.borrow_and_update();

    loop {
        let next_play_at = sequence.next_play_at();

        tokio::select! {
            signal = completion_rx.recv() => {
                match signal {
                    Ok(signal) if signal.generation == generation => {
                        info!("Countdown complete in {} mode, ringing bell {} times", signal.mode, count);
                        sequence.arm(count, Instant::now());
                    }
                    Ok(signal) => {
                        debug!("Ignoring completion from cue generation {}", signal.generation);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Bell task lagged behind {} completion signals", skipped);
                    }
                    Err(RecvError::Closed) => {
                        info!("Completion channel closed, stopping bell cue task");
                        break;
                    }
                }
            }

            changed = generation_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                generation = *generation_rx.borrow_and_update();
                if sequence.is_active() {
                    info!("Timer reset, cancelling {} pending bell strikes", sequence.plays_remaining());
                }
                sequence.cancel();
            }

            _ = sleep_until(next_play_at.unwrap_or_else(Instant::now)), if next_play_at.is_some() => {
                if sequence.poll(Instant::now()) {
                    let strike = BellStrike {
                        number: count - sequence.plays_remaining(),
                        of: count,
                        generation,
                    };
                    debug!("Bell strike {}/{}", strike.number, strike.of);

                    if let Err(e) = player.play() {
                        warn!("Bell playback failed: {}", e);
                    }
                    if state.bell_tx.send(strike).is_err() {
                        debug!("No bell listeners");
                    }
                }
            }
        }
    }
}
