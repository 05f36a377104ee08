//! Fakes shared by the unit tests of several modules.

use std::thread;
use std::time::{Duration, Instant};

use crate::app::App;
use crate::audio::AudioBackend;
use crate::error::{AssetError, PlaybackError};
use crate::loader::{AssetFetcher, AudioInfo, LoadedAsset};
use crate::manifest::AssetRef;

/// Loads every asset at once as a silent audio file.
pub struct InstantFetcher;

impl AssetFetcher for InstantFetcher {
    fn fetch(&self, _asset: &AssetRef) -> Result<LoadedAsset, AssetError> {
        Ok(LoadedAsset::Audio(AudioInfo {
            duration: None,
            title: None,
        }))
    }
}

/// Accepts every command and plays nothing.
pub struct MuteBackend;

impl AudioBackend for MuteBackend {
    fn select(&mut self, _index: usize) -> Result<(), PlaybackError> {
        Ok(())
    }
    fn pause(&mut self) {}
    fn resume(&mut self) -> Result<(), PlaybackError> {
        Ok(())
    }
    fn quit(&mut self, _fade_out: Duration) {}
}

/// Tick `app` at `t0` until the preload workers have all reported back.
pub fn wait_settled(app: &mut App, t0: Instant, now_utc: chrono::DateTime<chrono::Utc>) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while app.loader.settled_count() < app.loader.total() {
        assert!(Instant::now() < deadline, "assets did not settle");
        app.tick(t0, now_utc);
        thread::sleep(Duration::from_millis(2));
    }
}
