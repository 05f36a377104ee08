//! Decoded forms of manifest assets and the real filesystem fetcher.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::ImageReader;
use lofty::prelude::*;
use rodio::Decoder;

use crate::error::AssetError;
use crate::manifest::{AssetKind, AssetRef};

use super::preloader::AssetFetcher;

/// A small RGB copy of an image, sized for drawing with terminal cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl Thumbnail {
    /// Build from row-major pixels. Returns `None` when the sizes disagree.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> Option<Self> {
        if width == 0 || height == 0 || pixels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Nearest pixel at normalized coordinates (`0.0..=1.0` on both axes, clamped).
    pub fn sample(&self, u: f32, v: f32) -> [u8; 3] {
        let x = ((u.clamp(0.0, 1.0) * self.width as f32) as u32).min(self.width - 1);
        let y = ((v.clamp(0.0, 1.0) * self.height as f32) as u32).min(self.height - 1);
        self.pixels[(y * self.width + x) as usize]
    }
}

/// What the file's own metadata says, when it could be read.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioInfo {
    pub duration: Option<Duration>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadedAsset {
    Image(Thumbnail),
    Audio(AudioInfo),
}

/// Successfully loaded assets, keyed by manifest path.
#[derive(Debug, Default)]
pub struct AssetStore {
    loaded: HashMap<PathBuf, LoadedAsset>,
}

impl AssetStore {
    pub fn insert(&mut self, path: PathBuf, asset: LoadedAsset) {
        self.loaded.insert(path, asset);
    }

    pub fn get(&self, path: &Path) -> Option<&LoadedAsset> {
        self.loaded.get(path)
    }

    pub fn thumbnail(&self, path: &Path) -> Option<&Thumbnail> {
        match self.loaded.get(path) {
            Some(LoadedAsset::Image(t)) => Some(t),
            _ => None,
        }
    }

    pub fn audio_info(&self, path: &Path) -> Option<&AudioInfo> {
        match self.loaded.get(path) {
            Some(LoadedAsset::Audio(info)) => Some(info),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.loaded.len()
    }
}

/// Reads assets from the local filesystem and decodes them.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
}

impl FsFetcher {
    fn fetch_image(&self, path: &Path) -> Result<LoadedAsset, AssetError> {
        let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let decode_err = |reason: String| AssetError::ImageDecode {
            path: path.to_path_buf(),
            reason,
        };
        let image = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| decode_err(e.to_string()))?
            .decode()
            .map_err(|e| decode_err(e.to_string()))?;

        let rgb = image
            .thumbnail(self.thumbnail_width.max(1), self.thumbnail_height.max(1))
            .to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels = rgb.pixels().map(|p| p.0).collect();

        Thumbnail::from_pixels(width, height, pixels)
            .map(LoadedAsset::Image)
            .ok_or_else(|| decode_err("image has no pixels".to_string()))
    }

    fn fetch_audio(&self, path: &Path) -> Result<LoadedAsset, AssetError> {
        let file = File::open(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        // Only decodability matters here; playback opens its own decoder.
        Decoder::new(BufReader::new(file)).map_err(|e| AssetError::AudioDecode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut info = AudioInfo {
            duration: None,
            title: None,
        };
        if let Ok(tagged) = lofty::read_from_path(path) {
            info.duration = Some(tagged.properties().duration());
            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                info.title = tag
                    .title()
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty());
            }
        }
        Ok(LoadedAsset::Audio(info))
    }
}

impl AssetFetcher for FsFetcher {
    fn fetch(&self, asset: &AssetRef) -> Result<LoadedAsset, AssetError> {
        if asset.is_remote() {
            return Err(AssetError::Unsupported {
                path: asset.path.clone(),
            });
        }
        match asset.kind {
            AssetKind::Image => self.fetch_image(&asset.path),
            AssetKind::Audio => self.fetch_audio(&asset.path),
        }
    }
}
