use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/valentine/config.toml` or `~/.config/valentine/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `VALENTINE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub loader: LoaderSettings,
    pub transition: TransitionSettings,
    pub audio: AudioSettings,
    pub countdown: CountdownSettings,
    pub grain: GrainSettings,
    pub content: ContentSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoaderSettings {
    /// How long the displayed percentage takes to catch up with a new value (milliseconds).
    /// Set to 0 to snap.
    pub smoothing_ms: u64,
    /// How often the loader advances to the next gallery photo (milliseconds).
    pub photo_cycle_ms: u64,
    /// Maximum thumbnail size (pixels) kept for each decoded image.
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            smoothing_ms: 500,
            photo_cycle_ms: 300,
            thumbnail_width: 96,
            thumbnail_height: 64,
        }
    }
}

/// Durations of the loader's exit sequence (milliseconds).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransitionSettings {
    pub counter_fade_ms: u64,
    pub wipe_delay_ms: u64,
    pub wipe_ms: u64,
    pub container_delay_ms: u64,
    pub container_fade_ms: u64,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            counter_fade_ms: 400,
            wipe_delay_ms: 100,
            wipe_ms: 1000,
            container_delay_ms: 200,
            container_fade_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Whether the first track may start on its own once the page is revealed.
    /// `false` behaves like a platform that blocks unsolicited playback.
    pub allow_autoplay: bool,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
    /// Disc rotation speed while playing.
    pub spin_rpm: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            allow_autoplay: true,
            quit_fade_out_ms: 500,
            spin_rpm: 20.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CountdownSettings {
    /// RFC 3339 timestamp the countdown runs towards.
    pub target: String,
    /// Redraw period of the countdown (milliseconds).
    pub tick_ms: u64,
}

impl Default for CountdownSettings {
    fn default() -> Self {
        Self {
            target: "2026-02-14T20:00:00+06:00".to_string(),
            tick_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GrainSettings {
    pub enabled: bool,
    /// Redraw period of the grain pattern (milliseconds).
    pub interval_ms: u64,
    /// Fraction of blank cells that carry a grain speck (0.0 - 1.0).
    pub density: f64,
}

impl Default for GrainSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 120,
            density: 0.02,
        }
    }
}

/// Everything the page says and shows.
///
/// Paths are resolved against the asset root given on the command line.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentSettings {
    /// Directory with the photos cycled by the loader.
    pub gallery_dir: String,
    /// Whether to look into subdirectories of `gallery_dir`.
    pub gallery_recursive: bool,
    /// Background of the hero section.
    pub hero_image: Option<String>,
    /// TOML file with `[[songs]]` entries.
    pub songs_file: String,
    /// Extensions treated as audio when building the manifest (case-insensitive, without dot).
    pub audio_extensions: Vec<String>,
    /// Extensions picked up from the gallery directory.
    pub image_extensions: Vec<String>,

    pub date_label: String,
    pub heading_top: String,
    pub heading_bottom: String,
    pub intro: String,
    pub valentine_note: String,
    pub letter_title: String,
    pub letter: Vec<String>,
    pub letter_closing: String,
    pub signature: String,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            gallery_dir: "loaderimage".to_string(),
            gallery_recursive: false,
            hero_image: Some("photos/hero.jpg".to_string()),
            songs_file: "songs.toml".to_string(),
            audio_extensions: vec![
                "mp3".into(),
                "wav".into(),
                "ogg".into(),
                "flac".into(),
                "m4a".into(),
            ],
            image_extensions: vec![
                "jpg".into(),
                "jpeg".into(),
                "png".into(),
                "webp".into(),
                "gif".into(),
                "bmp".into(),
            ],
            date_label: "14 . 02 . 2026".to_string(),
            heading_top: "the 14th of".to_string(),
            heading_bottom: "FEBRUARY".to_string(),
            intro: "A single date on the calendar was never the point. \
                    The small things, done every day, are."
                .to_string(),
            valentine_note: "Hi love, glad you made it here. Keep scrolling.".to_string(),
            letter_title: "a letter for you".to_string(),
            letter: vec![
                "Hi love,".to_string(),
                "I wanted this year to feel a little different, so I made you something \
                 instead of buying it."
                    .to_string(),
                "Every line on this screen is here because of you.".to_string(),
            ],
            letter_closing: "With all my love".to_string(),
            signature: "yours".to_string(),
        }
    }
}
