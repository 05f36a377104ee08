//! The asset manifest: which images and songs the page needs.
//!
//! `PageAssets` gathers the configured gallery, hero image and songs with
//! their paths resolved against the asset root; `PageAssets::manifest`
//! flattens them into the ordered list the loader preloads.

use std::path::{Path, PathBuf};

use crate::config::ContentSettings;
use crate::error::ManifestError;

mod model;
mod scan;
mod songs;

pub use model::{AssetKind, AssetRef, Manifest, Song};
pub use scan::{natural_cmp, scan_gallery};
pub use songs::{load_songs, parse_songs};

/// Resolve a configured path against the asset root. Absolute paths and
/// URLs are kept as they are.
pub fn resolve(root: &Path, p: &Path) -> PathBuf {
    let is_url = p
        .to_str()
        .map(|s| s.starts_with("http://") || s.starts_with("https://"))
        .unwrap_or(false);
    if p.is_absolute() || is_url {
        p.to_path_buf()
    } else {
        root.join(p)
    }
}

/// Everything the page shows, with resolved paths.
#[derive(Debug, Clone, Default)]
pub struct PageAssets {
    pub gallery: Vec<PathBuf>,
    pub hero: Option<PathBuf>,
    pub songs: Vec<Song>,
}

impl PageAssets {
    /// Scan the gallery and read the songs file configured in `content`.
    pub fn collect(root: &Path, content: &ContentSettings) -> Result<Self, ManifestError> {
        let gallery = scan_gallery(
            &resolve(root, Path::new(&content.gallery_dir)),
            &content.image_extensions,
            content.gallery_recursive,
        );
        let hero = content
            .hero_image
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|h| resolve(root, Path::new(h)));

        let songs = load_songs(&resolve(root, Path::new(&content.songs_file)))?
            .into_iter()
            .map(|s| Song {
                cover: resolve(root, &s.cover),
                audio: resolve(root, &s.audio),
                ..s
            })
            .collect();

        Ok(Self {
            gallery,
            hero,
            songs,
        })
    }

    /// Flatten into the preload order: gallery, hero, song audio, song covers.
    pub fn manifest(&self, audio_extensions: &[String]) -> Result<Manifest, ManifestError> {
        let mut assets: Vec<AssetRef> = Vec::new();

        assets.extend(self.gallery.iter().map(AssetRef::image));
        if let Some(hero) = &self.hero {
            assets.push(AssetRef::new(
                hero.clone(),
                AssetKind::from_path(hero, audio_extensions),
            ));
        }
        // Song audio is declared, whatever its extension (or lack of one) says.
        assets.extend(self.songs.iter().map(|s| AssetRef::audio(s.audio.clone())));
        assets.extend(self.songs.iter().map(|s| {
            AssetRef::new(
                s.cover.clone(),
                AssetKind::from_path(&s.cover, audio_extensions),
            )
        }));

        Manifest::new(assets)
    }
}
