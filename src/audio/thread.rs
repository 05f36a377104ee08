use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{OutputStreamBuilder, Sink};
use tracing::{debug, info, warn};

use crate::error::PlaybackError;

use super::backend::AudioBackend;
use super::sink::{create_looped_sink, fade_out_sink};
use super::types::{AudioCmd, Reply};

/// Plays songs on the default output device from a dedicated thread.
///
/// The thread owns the output stream and at most one sink: the track that
/// is currently selected. Selecting drops the old sink, which silences and
/// rewinds it in one go.
pub struct RodioBackend {
    tx: Sender<AudioCmd>,
    join: Option<JoinHandle<()>>,
}

impl RodioBackend {
    /// Open the default output device. Fails when there is none.
    pub fn spawn(tracks: Vec<PathBuf>) -> Result<Self, PlaybackError> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), String>>();

        let join = thread::Builder::new()
            .name("audio".into())
            .spawn(move || run_audio_thread(tracks, rx, ready_tx))
            .map_err(|e| PlaybackError::NoOutputDevice(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                tx,
                join: Some(join),
            }),
            Ok(Err(reason)) => {
                let _ = join.join();
                Err(PlaybackError::NoOutputDevice(reason))
            }
            Err(_) => {
                let _ = join.join();
                Err(PlaybackError::NoOutputDevice(
                    "audio thread exited during startup".into(),
                ))
            }
        }
    }

    fn request(&self, make: impl FnOnce(Reply) -> AudioCmd) -> Result<(), PlaybackError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        if self.tx.send(make(reply_tx)).is_err() {
            return Err(PlaybackError::NoOutputDevice("audio thread is gone".into()));
        }
        reply_rx
            .recv()
            .unwrap_or_else(|_| Err(PlaybackError::NoOutputDevice("audio thread is gone".into())))
    }
}

impl AudioBackend for RodioBackend {
    fn select(&mut self, index: usize) -> Result<(), PlaybackError> {
        self.request(|reply| AudioCmd::Select { index, reply })
    }

    fn pause(&mut self) {
        let _ = self.tx.send(AudioCmd::Pause);
    }

    fn resume(&mut self) -> Result<(), PlaybackError> {
        self.request(|reply| AudioCmd::Resume { reply })
    }

    fn quit(&mut self, fade_out: Duration) {
        let _ = self.tx.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        if self.join.is_some() {
            self.quit(Duration::ZERO);
        }
    }
}

fn run_audio_thread(tracks: Vec<PathBuf>, rx: Receiver<AudioCmd>, ready: Sender<Result<(), String>>) {
    let mut stream = match OutputStreamBuilder::open_default_stream() {
        Ok(s) => s,
        Err(e) => {
            let _ = ready.send(Err(e.to_string()));
            return;
        }
    };
    // rodio logs to stderr when OutputStream is dropped, which would land
    // on top of the TUI.
    stream.log_on_drop(false);
    let _ = ready.send(Ok(()));
    info!(tracks = tracks.len(), "audio output opened");

    let mut sink: Option<Sink> = None;

    loop {
        match rx.recv_timeout(Duration::from_millis(200)) {
            Ok(AudioCmd::Select { index, reply }) => {
                if let Some(old) = sink.take() {
                    old.stop();
                }
                let result = match tracks.get(index) {
                    None => Err(PlaybackError::MissingTrack(index)),
                    Some(path) => create_looped_sink(&stream, path).map(|s| {
                        s.play();
                        debug!(index, path = %path.display(), "track started");
                        sink = Some(s);
                    }),
                };
                let _ = reply.send(result);
            }
            Ok(AudioCmd::Pause) => {
                if let Some(s) = sink.as_ref() {
                    s.pause();
                }
            }
            Ok(AudioCmd::Resume { reply }) => {
                let result = match sink.as_ref() {
                    Some(s) => {
                        s.play();
                        Ok(())
                    }
                    None => Err(PlaybackError::MissingTrack(0)),
                };
                let _ = reply.send(result);
            }
            Ok(AudioCmd::Quit { fade_out_ms }) => {
                if let Some(s) = sink.as_ref() {
                    if !s.is_paused() {
                        fade_out_sink(s, fade_out_ms);
                    }
                    s.stop();
                }
                break;
            }
            Err(RecvTimeoutError::Timeout) => {
                // Looped sources never run dry; an empty sink means decoding broke down.
                if sink.as_ref().is_some_and(|s| s.empty()) {
                    warn!("current track stopped producing audio");
                    sink = None;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    debug!("audio thread exiting");
}
