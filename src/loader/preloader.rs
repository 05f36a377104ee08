//! Concurrent, fire-once asset fetching with a channel fan-in.
//!
//! Every asset gets its own worker thread which calls the fetcher exactly
//! once and reports exactly one `Settled` message, success or failure.
//! Nothing is retried and nothing is cancelled. Dropping the handle drops
//! the receiving end; workers that finish afterwards discard their result.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::debug;

use crate::error::AssetError;
use crate::manifest::AssetRef;

use super::assets::LoadedAsset;

/// Fetches and decodes one asset. Called from worker threads.
pub trait AssetFetcher: Send + Sync {
    fn fetch(&self, asset: &AssetRef) -> Result<LoadedAsset, AssetError>;
}

/// The outcome of one asset's single fetch attempt.
#[derive(Debug)]
pub struct Settled {
    /// Position of the asset in the manifest.
    pub index: usize,
    pub asset: AssetRef,
    pub outcome: Result<LoadedAsset, AssetError>,
}

pub struct PreloadHandle {
    rx: Receiver<Settled>,
    total: usize,
}

impl PreloadHandle {
    /// Start fetching every asset at once.
    pub fn spawn(assets: &[AssetRef], fetcher: Arc<dyn AssetFetcher>) -> Self {
        let (tx, rx) = mpsc::channel::<Settled>();

        for (index, asset) in assets.iter().enumerate() {
            let worker_tx: Sender<Settled> = tx.clone();
            let worker_fetcher = fetcher.clone();
            let worker_asset = asset.clone();

            let spawned = thread::Builder::new()
                .name(format!("preload-{index}"))
                .spawn(move || {
                    let outcome = worker_fetcher.fetch(&worker_asset);
                    // The receiver is gone when the loader was torn down; nothing to do then.
                    let _ = worker_tx.send(Settled {
                        index,
                        asset: worker_asset,
                        outcome,
                    });
                });

            // Without a worker the asset still has to settle, as a failure.
            if let Err(source) = spawned {
                let _ = tx.send(Settled {
                    index,
                    asset: asset.clone(),
                    outcome: Err(AssetError::Io {
                        path: asset.path.clone(),
                        source,
                    }),
                });
            }
        }
        debug!(total = assets.len(), "preload started");

        Self {
            rx,
            total: assets.len(),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Everything that settled since the last call, without blocking.
    pub fn drain(&self) -> Vec<Settled> {
        self.rx.try_iter().collect()
    }
}
