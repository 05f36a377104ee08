use std::time::Duration;

use crate::error::PlaybackError;

/// The seam between `VinylPlayer` and whatever actually makes sound.
pub trait AudioBackend {
    /// Silence and rewind every track, then play `index` from its start.
    fn select(&mut self, index: usize) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    /// Continue the selected track from where it was paused.
    fn resume(&mut self) -> Result<(), PlaybackError>;
    /// Stop for good, fading out first.
    fn quit(&mut self, fade_out: Duration);
}

/// Stands in when no output device could be opened. Refuses every start.
#[derive(Debug, Clone)]
pub struct SilentBackend {
    pub reason: String,
}

impl AudioBackend for SilentBackend {
    fn select(&mut self, _index: usize) -> Result<(), PlaybackError> {
        Err(PlaybackError::NoOutputDevice(self.reason.clone()))
    }

    fn pause(&mut self) {}

    fn resume(&mut self) -> Result<(), PlaybackError> {
        Err(PlaybackError::NoOutputDevice(self.reason.clone()))
    }

    fn quit(&mut self, _fade_out: Duration) {}
}
