use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use ratatui::layout::Size;

use crate::audio::VinylPlayer;
use crate::config::ContentSettings;
use crate::countdown::{BUTTON_SIZE, Countdown, ValentinePrompt};
use crate::grain::Grain;
use crate::loader::Loader;
use crate::manifest::Song;
use crate::page::Page;

/// What the page shows; paths already resolved against the asset root.
#[derive(Debug, Clone)]
pub struct Content {
    pub text: ContentSettings,
    pub songs: Vec<Song>,
    pub hero: Option<PathBuf>,
}

/// The main application model.
pub struct App {
    pub content: Content,
    pub loader: Loader,
    pub player: VinylPlayer,
    pub countdown: Countdown,
    pub prompt: ValentinePrompt,
    pub grain: Grain,
    pub page: Page,
    viewport: Size,
    rng: StdRng,
}

impl App {
    /// Wire the pieces together. The player's start flag is raised by the
    /// loader's one-shot "ready" notification.
    pub fn new(
        content: Content,
        mut loader: Loader,
        player: VinylPlayer,
        countdown: Countdown,
        grain: Grain,
        viewport: Size,
        rng: StdRng,
    ) -> Self {
        let start = player.start_flag();
        loader.on_ready(move || start.set(true));

        Self {
            content,
            loader,
            player,
            countdown,
            prompt: ValentinePrompt::new(),
            grain,
            page: Page::new(viewport.height),
            viewport,
            rng,
        }
    }

    /// Advance everything that moves on its own.
    pub fn tick(&mut self, now: Instant, now_utc: DateTime<Utc>) {
        self.loader.tick(now);
        if self.loader.is_revealed() {
            self.page.update_triggers(now);
            self.player.autoplay(now);
        }
        self.countdown.tick(now_utc);
        self.prompt.prune_hearts(now);
        self.grain.tick();
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.page.resize(viewport.height);
    }

    pub fn is_revealed(&self) -> bool {
        self.loader.is_revealed()
    }

    /// The "continue" input on the loader screen.
    pub fn continue_intro(&mut self, now: Instant) -> bool {
        self.loader.trigger(now)
    }

    pub fn say_yes(&mut self, now: Instant) {
        if self.prompt.say_yes(&mut self.rng, now) {
            self.countdown.stop();
        }
    }

    pub fn dodge_no(&mut self) {
        self.prompt
            .try_focus_no(self.viewport, BUTTON_SIZE, &mut self.rng);
    }

    /// Whether the countdown digits are on screen.
    pub fn shows_countdown(&self) -> bool {
        !self.countdown.is_expired() && !self.prompt.is_answered()
    }

    // Playback failures are logged by the player and leave it paused.

    pub fn select_track(&mut self, index: usize, now: Instant) {
        let _ = self.player.select_track(index, now);
    }

    pub fn toggle_play(&mut self, now: Instant) {
        let _ = self.player.toggle_play(now);
    }

    pub fn next_track(&mut self, now: Instant) {
        let _ = self.player.next_track(now);
    }

    pub fn prev_track(&mut self, now: Instant) {
        let _ = self.player.prev_track(now);
    }

    pub fn quit(&mut self) {
        self.player.quit();
    }
}
