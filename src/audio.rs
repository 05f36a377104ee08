//! Audio playback for the vinyl player.
//!
//! `VinylPlayer` holds the playback state the UI shows and talks to an
//! `AudioBackend`. The real backend (`RodioBackend`) runs a dedicated thread
//! that owns the output stream; `SilentBackend` stands in when there is no
//! output device.

mod backend;
mod player;
mod sink;
mod thread;
mod types;

pub use backend::{AudioBackend, SilentBackend};
pub use player::VinylPlayer;
pub use thread::RodioBackend;
pub use types::{AutoplayOutcome, PlaybackState};

#[cfg(test)]
mod tests;
