//! Progress monitoring and cancellation

use crate::{MetaCacheError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Long-lived cancellation token threaded through every cache call.
///
/// Cloning is cheap and all clones share the same cancellation flag, so a
/// UI thread can hold one clone and cancel a population running elsewhere.
/// Cancellation is idempotent; once signaled the monitor stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct ProgressMonitor {
    cancelled: Arc<AtomicBool>,
}

impl ProgressMonitor {
    /// Create a new monitor in the not-cancelled state
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation. Safe to call from any thread, any number of
    /// times.
    pub fn cancel(&self) {
        tracing::debug!("progress monitor cancelled");
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation has been signaled
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Return `Err(Cancelled)` if cancellation has been signaled
    pub fn check_cancelled(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(MetaCacheError::Cancelled)
        } else {
            Ok(())
        }
    }
}
