//! Error types shared across the crate.
//!
//! None of these are fatal once the page is running: asset and playback
//! errors are logged and the experience degrades to a consistent state.
//! Only manifest and settings errors can stop startup.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to fetch or decode a single manifest asset.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {path}: {reason}")]
    ImageDecode { path: PathBuf, reason: String },

    #[error("failed to decode audio {path}: {reason}")]
    AudioDecode { path: PathBuf, reason: String },

    #[error("unsupported asset location {path} (only local files can be preloaded)")]
    Unsupported { path: PathBuf },
}

/// Failure to start or continue playback.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no audio output device: {0}")]
    NoOutputDevice(String),

    #[error("autoplay is not allowed")]
    AutoplayBlocked,

    #[error("no track at index {0}")]
    MissingTrack(usize),

    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

/// Failure to assemble the asset manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("the asset manifest is empty; configure a gallery, a hero image or songs")]
    Empty,

    #[error("failed to read songs file {path}: {source}")]
    SongsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse songs file: {0}")]
    SongsParse(#[from] toml::de::Error),
}

/// Settings that loaded but do not make sense.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("countdown.target is not an RFC 3339 timestamp: {0}")]
    InvalidTarget(#[from] chrono::ParseError),

    #[error("{field} must be {expected}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
    },
}
