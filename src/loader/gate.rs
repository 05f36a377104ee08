//! The one-way phase machine between "loading" and "revealed".

use tracing::{debug, info};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum RevealPhase {
    #[default]
    Loading,
    ReadyWaitingForInput,
    Transitioning,
    Revealed,
}

type ReadyCallback = Box<dyn FnOnce()>;

/// Owns the current `RevealPhase`. Each transition fires at most once.
#[derive(Default)]
pub struct RevealGate {
    phase: RevealPhase,
    ready: Vec<ReadyCallback>,
}

impl RevealGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// Loading -> ReadyWaitingForInput.
    pub fn assets_ready(&mut self) -> bool {
        self.advance(RevealPhase::Loading, RevealPhase::ReadyWaitingForInput)
    }

    /// ReadyWaitingForInput -> Transitioning. A no-op in any other phase.
    pub fn trigger(&mut self) -> bool {
        self.advance(RevealPhase::ReadyWaitingForInput, RevealPhase::Transitioning)
    }

    /// Transitioning -> Revealed, then runs every ready subscriber once.
    pub fn finish(&mut self) -> bool {
        if !self.advance(RevealPhase::Transitioning, RevealPhase::Revealed) {
            return false;
        }
        for callback in self.ready.drain(..) {
            callback();
        }
        true
    }

    /// Subscribe to the one-shot "revealed" notification. Runs immediately
    /// when the page is already revealed.
    pub fn on_ready(&mut self, callback: impl FnOnce() + 'static) {
        if self.phase == RevealPhase::Revealed {
            callback();
        } else {
            self.ready.push(Box::new(callback));
        }
    }

    fn advance(&mut self, from: RevealPhase, to: RevealPhase) -> bool {
        if self.phase != from {
            debug!(phase = ?self.phase, wanted = ?to, "ignoring out-of-order phase change");
            return false;
        }
        info!(from = ?from, to = ?to, "reveal phase changed");
        self.phase = to;
        true
    }
}
