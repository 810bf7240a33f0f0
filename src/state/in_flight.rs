use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Allows at most one auto-correct cycle at a time.
///
/// Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct InFlightGuard {
    started: Arc<Mutex<Option<Instant>>>,
}

/// Proof that a cycle is running. Dropping it frees the guard.
#[derive(Debug)]
pub struct InFlightToken {
    started: Arc<Mutex<Option<Instant>>>,
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` while another token is alive.
    pub fn try_acquire(&self) -> Option<InFlightToken> {
        let mut started = self.started.lock();
        if started.is_some() {
            return None;
        }
        *started = Some(Instant::now());
        Some(InFlightToken {
            started: Arc::clone(&self.started),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.started.lock().is_some()
    }

    /// How long the current cycle has been running
    pub fn elapsed(&self) -> Option<Duration> {
        let started = *self.started.lock();
        started.map(|started| started.elapsed())
    }
}

impl Drop for InFlightToken {
    fn drop(&mut self) {
        *self.started.lock() = None;
    }
}
