//! Cooperative cancellation shared between a search and whoever drives it.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Polled by long-running searches at frontier pops and solver iterations.
///
/// A flush request asks every driver sharing the token to publish its best
/// answer so far and keep going; a stop request asks every loop to return
/// what it has. Flushes are counted, so each driver sees each request once
/// no matter how many drivers share the token.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    stop: Arc<AtomicBool>,
    flushes: Arc<AtomicU64>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_flush(&self) {
        self.flushes.fetch_add(1, Ordering::SeqCst);
    }

    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Flush requests made so far.
    pub fn flush_count(&self) -> u64 {
        self.flushes.load(Ordering::SeqCst)
    }

    /// True when a flush was requested since `seen`, which is then brought
    /// up to date. Start each driver with `seen = 0`.
    pub fn take_flush(&self, seen: &mut u64) -> bool {
        let count = self.flush_count();
        if count == *seen {
            return false;
        }
        *seen = count;
        true
    }
}
