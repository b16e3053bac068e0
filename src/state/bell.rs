//! Bell cue repeat state
//!
//! When the countdown completes the bell rings a fixed number of times with a
//! fixed spacing. The schedule lives here as two fields so that a reset can
//! drop it in one call instead of chasing timers.

use std::time::Duration;
use tokio::time::Instant;

/// Default number of bell strikes per completion
pub const DEFAULT_BELL_COUNT: u32 = 3;
/// Default spacing between strikes
pub const DEFAULT_BELL_INTERVAL: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone)]
pub struct BellSequence {
    interval: Duration,
    plays_remaining: u32,
    next_play_at: Option<Instant>,
}

impl BellSequence {
    /// Create an idle sequence with the given spacing
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            plays_remaining: 0,
            next_play_at: None,
        }
    }

    /// Schedule `count` strikes, the first one interval after `now`.
    /// Re-arming replaces any sequence already in progress.
    pub fn arm(&mut self, count: u32, now: Instant) {
        self.plays_remaining = count;
        self.next_play_at = if count > 0 {
            Some(now + self.interval)
        } else {
            None
        };
    }

    /// Drop every pending strike
    pub fn cancel(&mut self) {
        self.plays_remaining = 0;
        self.next_play_at = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_play_at.is_some()
    }

    pub fn plays_remaining(&self) -> u32 {
        self.plays_remaining
    }

    pub fn next_play_at(&self) -> Option<Instant> {
        self.next_play_at
    }

    /// Consume the strike due at `now`, if any. Returns true when the bell
    /// should ring.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_play_at {
            Some(at) if now >= at => {
                self.plays_remaining = self.plays_remaining.saturating_sub(1);
                self.next_play_at = if self.plays_remaining > 0 {
                    Some(at + self.interval)
                } else {
                    None
                };
                true
            }
            _ => false,
        }
    }
}

impl Default for BellSequence {
    fn default() -> Self {
        Self::new(DEFAULT_BELL_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rings_count_times_at_fixed_spacing() {
        let start = Instant::now();
        let mut bell = BellSequence::default();
        bell.arm(DEFAULT_BELL_COUNT, start);

        assert!(!bell.poll(start));
        assert!(!bell.poll(start + Duration::from_millis(1499)));

        let mut rung = Vec::new();
        for step in 1..=10u32 {
            let now = start + Duration::from_millis(1500) * step;
            if bell.poll(now) {
                rung.push(step);
            }
        }
        assert_eq!(rung, vec![1, 2, 3]);
        assert!(!bell.is_active());
        assert_eq!(bell.plays_remaining(), 0);
    }

    #[test]
    fn cancel_drops_pending_strikes() {
        let start = Instant::now();
        let mut bell = BellSequence::default();
        bell.arm(3, start);
        assert!(bell.poll(start + Duration::from_millis(1500)));

        bell.cancel();
        assert!(!bell.is_active());
        assert!(!bell.poll(start + Duration::from_secs(60)));
    }

    #[test]
    fn zero_count_stays_idle() {
        let mut bell = BellSequence::new(Duration::from_secs(1));
        bell.arm(0, Instant::now());
        assert!(!bell.is_active());
        assert_eq!(bell.next_play_at(), None);
    }

    #[test]
    fn rearm_restarts_the_schedule() {
        let start = Instant::now();
        let mut bell = BellSequence::new(Duration::from_secs(1));
        bell.arm(3, start);
        assert!(bell.poll(start + Duration::from_secs(1)));

        let later = start + Duration::from_secs(10);
        bell.arm(3, later);
        assert_eq!(bell.plays_remaining(), 3);
        assert_eq!(bell.next_play_at(), Some(later + Duration::from_secs(1)));
    }
}
