//! Playback state and the commands understood by the audio thread.

use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crate::error::PlaybackError;

/// What the vinyl player is doing, as the UI sees it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaybackState {
    pub current_track_index: usize,
    pub is_playing: bool,
    /// Set by the first successful start, never cleared.
    pub has_ever_played: bool,
}

/// Result of the single automatic playback attempt.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AutoplayOutcome {
    /// Already attempted, or the page is not revealed yet.
    Skipped,
    Started,
    /// Playback was refused; the player stays paused until the user acts.
    Blocked,
}

pub(super) type Reply = Sender<Result<(), PlaybackError>>;

#[derive(Debug)]
pub(super) enum AudioCmd {
    /// Silence and rewind everything, then play `index` from the start.
    Select { index: usize, reply: Reply },
    Pause,
    /// Continue the current track where it was paused.
    Resume { reply: Reply },
    /// Quit the audio thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Wall-clock time accumulated only while running.
#[derive(Debug, Clone, Default)]
pub(super) struct PlayClock {
    accumulated: Duration,
    since: Option<Instant>,
}

impl PlayClock {
    pub(super) fn run(&mut self, now: Instant) {
        if self.since.is_none() {
            self.since = Some(now);
        }
    }

    pub(super) fn stop(&mut self, now: Instant) {
        if let Some(since) = self.since.take() {
            self.accumulated += now.saturating_duration_since(since);
        }
    }

    pub(super) fn elapsed(&self, now: Instant) -> Duration {
        self.accumulated
            + self
                .since
                .map_or(Duration::ZERO, |s| now.saturating_duration_since(s))
    }
}
