use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ManifestError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Image,
    Audio,
}

impl AssetKind {
    /// Classify `path` by extension: audio when it matches one of
    /// `audio_extensions` (case-insensitive, dot optional), image otherwise.
    pub fn from_path(path: &Path, audio_extensions: &[String]) -> Self {
        let is_audio = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| {
                audio_extensions
                    .iter()
                    .map(|e| e.trim().trim_start_matches('.'))
                    .any(|e| e.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false);

        if is_audio { Self::Audio } else { Self::Image }
    }
}

/// One resource the loader has to settle before the page can be revealed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetRef {
    pub path: PathBuf,
    pub kind: AssetKind,
}

impl AssetRef {
    pub fn new(path: impl Into<PathBuf>, kind: AssetKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn image(path: impl Into<PathBuf>) -> Self {
        Self::new(path, AssetKind::Image)
    }

    pub fn audio(path: impl Into<PathBuf>) -> Self {
        Self::new(path, AssetKind::Audio)
    }

    /// Whether this points at a remote location rather than a local file.
    pub fn is_remote(&self) -> bool {
        self.path
            .to_str()
            .map(|s| s.starts_with("http://") || s.starts_with("https://"))
            .unwrap_or(false)
    }
}

/// A playable record: what the vinyl player lists.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Song {
    pub title: String,
    #[serde(default)]
    pub artist: String,
    pub cover: PathBuf,
    pub audio: PathBuf,
}

impl Song {
    /// "Artist - Title", or just the title when the artist is blank.
    pub fn display(&self) -> String {
        self.display_or(None)
    }

    /// Like `display`, with `tagged` standing in for a blank title.
    pub fn display_or(&self, tagged: Option<&str>) -> String {
        let title = match self.title.trim() {
            "" => tagged.unwrap_or_default(),
            own => own,
        };
        let artist = self.artist.trim();
        if artist.is_empty() {
            title.to_string()
        } else {
            format!("{artist} - {title}")
        }
    }
}

/// The fixed, ordered, non-empty list of assets preloaded before the reveal.
#[derive(Debug, Clone)]
pub struct Manifest {
    assets: Vec<AssetRef>,
}

impl Manifest {
    /// Build a manifest, keeping the first occurrence of every path.
    pub fn new(assets: Vec<AssetRef>) -> Result<Self, ManifestError> {
        let mut seen: HashSet<PathBuf> = HashSet::new();
        let assets: Vec<AssetRef> = assets
            .into_iter()
            .filter(|a| seen.insert(a.path.clone()))
            .collect();

        if assets.is_empty() {
            return Err(ManifestError::Empty);
        }
        Ok(Self { assets })
    }

    pub fn assets(&self) -> &[AssetRef] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn count(&self, kind: AssetKind) -> usize {
        self.assets.iter().filter(|a| a.kind == kind).count()
    }
}
