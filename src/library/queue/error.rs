use thiserror::Error;

/// Reasons why an operation on a [`BlockingDeque`](super::BlockingDeque) did not complete
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum QueueError {
    /// A waiting consumer was woken up by [`interrupt`](super::BlockingDeque::interrupt)
    #[error("wait on queue was interrupted")]
    Interrupted,
    /// The bounded wait for access to the queue elapsed
    #[error("timed out while waiting for access to the queue")]
    TimedOut,
    /// A thread panicked while holding the queue lock, its contents can no longer be trusted
    #[error("queue lock is poisoned")]
    Poisoned,
}
