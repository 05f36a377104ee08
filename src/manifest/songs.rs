use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::ManifestError;

use super::model::Song;

#[derive(Debug, Default, Deserialize)]
struct SongsFile {
    #[serde(default)]
    songs: Vec<Song>,
}

/// Parse a songs file:
///
/// ```toml
/// [[songs]]
/// title = "Blue"
/// cover = "vinyl/blue.jpg"
/// audio = "music/blue.mp3"
/// ```
pub fn parse_songs(text: &str) -> Result<Vec<Song>, ManifestError> {
    let file: SongsFile = toml::from_str(text)?;
    Ok(file.songs)
}

/// Load the songs file at `path`. A missing file means "no songs".
pub fn load_songs(path: &Path) -> Result<Vec<Song>, ManifestError> {
    match std::fs::read_to_string(path) {
        Ok(text) => parse_songs(&text),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "no songs file, the player will be empty");
            Ok(Vec::new())
        }
        Err(source) => Err(ManifestError::SongsFile {
            path: path.to_path_buf(),
            source,
        }),
    }
}
