//! A cancellable periodic ticker running on its own thread.
//!
//! The owner receives ticks through `try_ticks` and tears the worker down
//! by dropping the `PeriodicTask` (or calling `cancel`): the cancel channel
//! closes, the worker wakes from `recv_timeout` and exits, and the owner
//! joins it. No tick is delivered after `cancel` returns.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

pub struct PeriodicTask {
    name: String,
    cancel: Option<Sender<()>>,
    ticks: Receiver<Instant>,
    join: Option<JoinHandle<()>>,
}

impl PeriodicTask {
    /// Start ticking every `period` (at least 1 ms).
    pub fn spawn(name: &str, period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let (tick_tx, tick_rx) = mpsc::channel::<Instant>();

        let join = thread::Builder::new()
            .name(format!("timer-{name}"))
            .spawn(move || {
                loop {
                    match cancel_rx.recv_timeout(period) {
                        Err(RecvTimeoutError::Timeout) => {
                            if tick_tx.send(Instant::now()).is_err() {
                                break;
                            }
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            });

        let join = match join {
            Ok(j) => Some(j),
            Err(e) => {
                warn!(timer = name, error = %e, "failed to start timer thread");
                None
            }
        };
        debug!(timer = name, period_ms = period.as_millis() as u64, "timer started");

        Self {
            name: name.to_string(),
            cancel: Some(cancel_tx),
            ticks: tick_rx,
            join,
        }
    }

    /// Number of ticks since the last call. Never blocks.
    pub fn try_ticks(&self) -> usize {
        self.ticks.try_iter().count()
    }

    pub fn is_running(&self) -> bool {
        self.join.as_ref().is_some_and(|j| !j.is_finished())
    }

    /// Stop the worker and wait for it. Idempotent.
    pub fn cancel(&mut self) {
        drop(self.cancel.take());
        if let Some(j) = self.join.take() {
            let _ = j.join();
            debug!(timer = %self.name, "timer stopped");
        }
        // Ticks sent before the worker saw the cancellation are stale.
        while self.ticks.try_recv().is_ok() {}
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
