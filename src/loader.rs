//! The intro loader: preloads every manifest asset, shows a smoothed
//! percentage over a cycling photo, waits for a key, then plays the exit
//! transition before the page is revealed.
//!
//! `Loader` is driven from the UI thread through `tick`. Worker threads
//! only ever talk to it through the preload channel.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::{LoaderSettings, TransitionSettings};
use crate::manifest::{AssetKind, AssetRef, Manifest};

mod assets;
mod choreographer;
mod gate;
mod preloader;
mod progress;

pub use assets::{AssetStore, AudioInfo, FsFetcher, LoadedAsset, Thumbnail};
pub use choreographer::{Choreographer, Ease, Effect, Step, Timeline, TransitionFrame};
pub use gate::{RevealGate, RevealPhase};
pub use preloader::{AssetFetcher, PreloadHandle, Settled};
pub use progress::ProgressAggregator;

/// An asset whose single fetch attempt failed. The page goes on without it.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub asset: AssetRef,
    pub reason: String,
}

pub struct Loader {
    progress: ProgressAggregator,
    gate: RevealGate,
    preload: Option<PreloadHandle>,
    settled: Vec<bool>,
    store: AssetStore,
    failures: Vec<Failure>,
    timeline: Timeline,
    choreographer: Option<Choreographer>,
    photos: Vec<PathBuf>,
    photo_cycle: Duration,
    photo_index: usize,
    started_at: Instant,
    displayed: u8,
    frame: TransitionFrame,
    effect: Option<Effect>,
}

impl Loader {
    /// Start preloading every asset of `manifest`. `photos` are the images
    /// the loader cycles through while waiting.
    pub fn start(
        manifest: &Manifest,
        photos: Vec<PathBuf>,
        fetcher: Arc<dyn AssetFetcher>,
        loader: &LoaderSettings,
        transition: &TransitionSettings,
        now: Instant,
    ) -> Self {
        info!(
            assets = manifest.len(),
            images = manifest.count(AssetKind::Image),
            audio = manifest.count(AssetKind::Audio),
            "preloading"
        );
        let preload = PreloadHandle::spawn(manifest.assets(), fetcher);

        Self {
            progress: ProgressAggregator::new(
                manifest.len(),
                Duration::from_millis(loader.smoothing_ms),
            ),
            gate: RevealGate::new(),
            preload: Some(preload),
            settled: vec![false; manifest.len()],
            store: AssetStore::default(),
            failures: Vec::new(),
            timeline: Timeline::from_settings(transition),
            choreographer: None,
            photos,
            photo_cycle: Duration::from_millis(loader.photo_cycle_ms.max(1)),
            photo_index: 0,
            started_at: now,
            displayed: 0,
            frame: TransitionFrame::IDLE,
            effect: None,
        }
    }

    /// Advance the loader to `now`: absorb settled assets, ease the counter,
    /// move the phase machine and the photo cycle along.
    pub fn tick(&mut self, now: Instant) {
        let batch = self
            .preload
            .as_ref()
            .map(PreloadHandle::drain)
            .unwrap_or_default();
        for settled in batch {
            self.settle(settled, now);
        }
        let settled = self.settled_count();
        if self.preload.as_ref().is_some_and(|p| p.total() == settled) {
            debug!(total = settled, "every asset settled, closing preload channel");
            self.preload = None;
        }

        if self.progress.poll_complete(now) {
            self.gate.assets_ready();
        }
        self.displayed = self.progress.displayed_percent(now);

        // The last frame sticks once the transition is over.
        if let Some(choreographer) = self.choreographer.as_mut().filter(|c| !c.is_finished()) {
            self.frame = choreographer.frame(now);
            let effect = choreographer.active(now);
            if effect != self.effect {
                debug!(?effect, "transition step");
                self.effect = effect;
            }
            if choreographer.poll_finished(now) {
                self.gate.finish();
            }
        }

        // The photo freezes once the exit transition starts.
        if self.gate.phase() < RevealPhase::Transitioning && !self.photos.is_empty() {
            let steps = now.saturating_duration_since(self.started_at).as_millis()
                / self.photo_cycle.as_millis();
            self.photo_index = (steps % self.photos.len() as u128) as usize;
        }
    }

    fn settle(&mut self, settled: Settled, now: Instant) {
        let Settled {
            index,
            asset,
            outcome,
        } = settled;

        match self.settled.get_mut(index) {
            Some(done) if !*done => *done = true,
            _ => {
                debug!(index, path = %asset.path.display(), "ignoring duplicate settlement");
                return;
            }
        }
        self.progress.report_settled(now);
        debug!(
            settled = self.progress.completed(),
            total = self.progress.total(),
            raw = self.progress.raw_percent(),
            "progress"
        );

        match outcome {
            Ok(loaded) => {
                debug!(path = %asset.path.display(), "asset loaded");
                self.store.insert(asset.path.clone(), loaded);
            }
            Err(e) => {
                warn!(path = %asset.path.display(), error = %e, "asset failed to load, continuing without it");
                self.failures.push(Failure {
                    asset,
                    reason: e.to_string(),
                });
            }
        }
    }

    /// The user's "continue" input. Starts the exit transition when the
    /// loader is waiting for it and is ignored otherwise.
    pub fn trigger(&mut self, now: Instant) -> bool {
        if !self.gate.trigger() {
            return false;
        }
        debug!(
            steps = self.timeline.steps().len(),
            total_ms = self.timeline.total().as_millis() as u64,
            "exit transition started"
        );
        self.choreographer = Some(Choreographer::start(self.timeline.clone(), now));
        self.frame = TransitionFrame::IDLE;
        true
    }

    /// Run `callback` once the page is revealed (immediately if it already is).
    pub fn on_ready(&mut self, callback: impl FnOnce() + 'static) {
        self.gate.on_ready(callback);
    }

    pub fn phase(&self) -> RevealPhase {
        self.gate.phase()
    }

    pub fn is_revealed(&self) -> bool {
        self.gate.phase() == RevealPhase::Revealed
    }

    /// Counter value as of the last `tick`.
    pub fn displayed_percent(&self) -> u8 {
        self.displayed
    }

    pub fn settled_count(&self) -> usize {
        self.settled.iter().filter(|s| **s).count()
    }

    pub fn total(&self) -> usize {
        self.settled.len()
    }

    /// Transition state as of the last `tick`.
    pub fn frame(&self) -> TransitionFrame {
        self.frame
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn assets(&self) -> &AssetStore {
        &self.store
    }

    /// The photo the loader currently shows. Skips photos that have not
    /// loaded (or failed) in favour of the next one that has.
    pub fn current_photo(&self) -> Option<&Thumbnail> {
        let n = self.photos.len();
        (0..n)
            .map(|offset| &self.photos[(self.photo_index() + offset) % n])
            .find_map(|p| self.store.thumbnail(p))
    }

    pub fn photo_index(&self) -> usize {
        self.photo_index
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }
}
