use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::AudioSettings;
use crate::error::PlaybackError;

use super::backend::AudioBackend;
use super::types::{AutoplayOutcome, PlaybackState, PlayClock};

/// The record player on the page: one disc per song, one audible at a time.
pub struct VinylPlayer {
    backend: Box<dyn AudioBackend>,
    track_count: usize,
    state: PlaybackState,
    start: Rc<Cell<bool>>,
    autoplay_attempted: bool,
    allow_autoplay: bool,
    quit_fade_out: Duration,
    spin_rpm: f32,
    /// Position within the current track. Reset on every selection.
    position: PlayClock,
    /// Total play time, drives the disc rotation.
    spin: PlayClock,
}

impl VinylPlayer {
    pub fn new(backend: Box<dyn AudioBackend>, track_count: usize, settings: &AudioSettings) -> Self {
        Self {
            backend,
            track_count,
            state: PlaybackState::default(),
            start: Rc::new(Cell::new(false)),
            autoplay_attempted: false,
            allow_autoplay: settings.allow_autoplay,
            quit_fade_out: Duration::from_millis(settings.quit_fade_out_ms),
            spin_rpm: settings.spin_rpm,
            position: PlayClock::default(),
            spin: PlayClock::default(),
        }
    }

    /// The flag raised when the page is revealed. Autoplay waits for it.
    pub fn start_flag(&self) -> Rc<Cell<bool>> {
        self.start.clone()
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn track_count(&self) -> usize {
        self.track_count
    }

    /// Make `index` the only playing track, from its beginning.
    pub fn select_track(&mut self, index: usize, now: Instant) -> Result<(), PlaybackError> {
        if index >= self.track_count {
            debug!(index, tracks = self.track_count, "ignoring selection of a missing track");
            return Err(PlaybackError::MissingTrack(index));
        }

        if let Err(e) = self.backend.select(index) {
            warn!(index, error = %e, "could not start track");
            self.state.current_track_index = index;
            self.pause_clocks(now);
            self.position = PlayClock::default();
            self.state.is_playing = false;
            return Err(e);
        }

        self.state.current_track_index = index;
        self.state.is_playing = true;
        self.state.has_ever_played = true;
        self.position = PlayClock::default();
        self.position.run(now);
        self.spin.run(now);
        info!(index, "track selected");
        Ok(())
    }

    /// Pause, or resume the current track where it stopped.
    pub fn toggle_play(&mut self, now: Instant) -> Result<(), PlaybackError> {
        if self.track_count == 0 {
            return Err(PlaybackError::MissingTrack(0));
        }
        if self.state.is_playing {
            self.backend.pause();
            self.state.is_playing = false;
            self.pause_clocks(now);
            return Ok(());
        }
        if !self.state.has_ever_played {
            // Nothing loaded yet; start from the top of the current track.
            return self.select_track(self.state.current_track_index, now);
        }
        match self.backend.resume() {
            Ok(()) => {
                self.state.is_playing = true;
                self.position.run(now);
                self.spin.run(now);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "could not resume playback");
                Err(e)
            }
        }
    }

    pub fn next_track(&mut self, now: Instant) -> Result<(), PlaybackError> {
        if self.track_count == 0 {
            return Err(PlaybackError::MissingTrack(0));
        }
        self.select_track((self.state.current_track_index + 1) % self.track_count, now)
    }

    pub fn prev_track(&mut self, now: Instant) -> Result<(), PlaybackError> {
        if self.track_count == 0 {
            return Err(PlaybackError::MissingTrack(0));
        }
        let n = self.track_count;
        self.select_track((self.state.current_track_index + n - 1) % n, now)
    }

    /// The one automatic attempt to start the first track. Does nothing
    /// until the start flag is raised, and nothing after the first attempt.
    pub fn autoplay(&mut self, now: Instant) -> AutoplayOutcome {
        if self.autoplay_attempted || !self.start.get() || self.track_count == 0 {
            return AutoplayOutcome::Skipped;
        }
        self.autoplay_attempted = true;

        if !self.allow_autoplay {
            warn!(error = %PlaybackError::AutoplayBlocked, "autoplay refused, waiting for the user");
            return AutoplayOutcome::Blocked;
        }
        let first = self.state.current_track_index;
        match self.backend.select(first) {
            Ok(()) => {
                self.state.is_playing = true;
                self.state.has_ever_played = true;
                self.position = PlayClock::default();
                self.position.run(now);
                self.spin.run(now);
                info!(index = first, "autoplay started");
                AutoplayOutcome::Started
            }
            Err(e) => {
                warn!(error = %e, "autoplay refused, waiting for the user");
                AutoplayOutcome::Blocked
            }
        }
    }

    /// Time into the current track (it loops, so this keeps growing).
    pub fn position(&self, now: Instant) -> Duration {
        self.position.elapsed(now)
    }

    /// Disc rotation in degrees, `0.0..360.0`. Only advances while playing.
    pub fn spin_angle(&self, now: Instant) -> f32 {
        let turns = self.spin.elapsed(now).as_secs_f32() * self.spin_rpm / 60.0;
        (turns.fract() * 360.0).rem_euclid(360.0)
    }

    /// Fade out and release the output device.
    pub fn quit(&mut self) {
        let fade = if self.state.is_playing {
            self.quit_fade_out
        } else {
            Duration::ZERO
        };
        self.backend.quit(fade);
        self.state.is_playing = false;
    }

    fn pause_clocks(&mut self, now: Instant) {
        self.position.stop(now);
        self.spin.stop(now);
    }
}
