//! Search-box debounce.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Default quiet period before a search is sent
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Lets a value through only once input has been quiet for `delay`
///
/// Clones share the same counter, so a keystroke handled by any clone
/// supersedes the pending wait of every other.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    latest: Arc<AtomicU64>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the delay; `None` when a newer call arrived meanwhile
    pub async fn debounce<T>(&self, value: T) -> Option<T> {
        let token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;

        if self.latest.load(Ordering::SeqCst) == token {
            Some(value)
        } else {
            tracing::trace!("Debounced input superseded (token {})", token);
            None
        }
    }

    /// Supersede whatever is pending without starting a new wait
    pub fn cancel(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Tests
// ============================================================================
