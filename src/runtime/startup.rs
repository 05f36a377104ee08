use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::layout::Size;
use tracing::{info, warn};

use crate::app::{App, Content};
use crate::audio::{AudioBackend, RodioBackend, SilentBackend, VinylPlayer};
use crate::config;
use crate::countdown::Countdown;
use crate::grain::Grain;
use crate::loader::{FsFetcher, Loader};
use crate::manifest::{PageAssets, Song};

/// Collect the page's assets under `root` and wire up every controller.
/// Fails on an empty manifest or an unreadable songs file.
pub fn build_app(
    settings: &config::Settings,
    root: &Path,
    viewport: Size,
    now: Instant,
    now_utc: DateTime<Utc>,
) -> Result<App, Box<dyn Error>> {
    let content = &settings.content;
    let assets = PageAssets::collect(root, content)?;
    let manifest = assets.manifest(&content.audio_extensions)?;
    info!(
        root = %root.display(),
        photos = assets.gallery.len(),
        songs = assets.songs.len(),
        "collected page assets"
    );

    let fetcher = Arc::new(FsFetcher {
        thumbnail_width: settings.loader.thumbnail_width,
        thumbnail_height: settings.loader.thumbnail_height,
    });
    let loader = Loader::start(
        &manifest,
        assets.gallery.clone(),
        fetcher,
        &settings.loader,
        &settings.transition,
        now,
    );

    let player = VinylPlayer::new(
        open_audio(&assets.songs),
        assets.songs.len(),
        &settings.audio,
    );
    let countdown = Countdown::start(
        settings.countdown_target()?,
        Duration::from_millis(settings.countdown.tick_ms),
        now_utc,
    );
    let grain = Grain::start(&settings.grain);
    info!(
        countdown = countdown.is_ticking(),
        grain = grain.is_enabled(),
        "page controllers ready"
    );

    let content = Content {
        text: content.clone(),
        songs: assets.songs,
        hero: assets.hero,
    };
    Ok(App::new(
        content,
        loader,
        player,
        countdown,
        grain,
        viewport,
        StdRng::from_entropy(),
    ))
}

/// The real output device, or a backend that refuses to play when there is none.
fn open_audio(songs: &[Song]) -> Box<dyn AudioBackend> {
    let tracks = songs.iter().map(|s| s.audio.clone()).collect();
    match RodioBackend::spawn(tracks) {
        Ok(backend) => Box::new(backend),
        Err(e) => {
            warn!(error = %e, "no audio output, the vinyl stays silent");
            Box::new(SilentBackend {
                reason: e.to_string(),
            })
        }
    }
}
