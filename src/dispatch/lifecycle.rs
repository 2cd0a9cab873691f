use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Cooperative stop signal shared between the owner of a dispatcher and its loop
///
/// Stopping is best-effort: the loop finishes its current iteration and exits, anything
/// still queued at that point is abandoned.
#[derive(Debug, Default)]
pub struct Lifecycle {
    stopped: AtomicBool,
}

impl Lifecycle {
    /// Sets the stop flag and returns whether this call was the one to set it
    pub fn stop(&self) -> bool {
        let first = !self.stopped.swap(true, Ordering::AcqRel);

        if first {
            info!("Dispatcher stop requested");
        }

        first
    }

    /// Whether [`stop`](Self::stop) has been called
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}
