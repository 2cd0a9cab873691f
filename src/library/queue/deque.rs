use super::QueueError;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, TryLockError};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::yield_now;
use tokio::time::timeout;

/// Unbounded double-ended queue with an asynchronous, interruptible `take`
///
/// Producers append at the tail from any thread, retried items are put back at the head and
/// a single consumer awaits items from the head. The lock is only held for the duration of
/// the `VecDeque` operation and never across an await point.
///
/// Poisoning is terminal. Once a thread has panicked while holding the lock, every operation
/// except [`len`](Self::len) fails with [`QueueError::Poisoned`] and keeps doing so. Only the
/// length, which is purely informational, is still read from the poisoned contents.
pub struct BlockingDeque<T> {
    items: Mutex<VecDeque<T>>,
    available: Notify,
    interrupted: AtomicBool,
}

impl<T> Default for BlockingDeque<T> {
    fn default() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            available: Notify::new(),
            interrupted: AtomicBool::new(false),
        }
    }
}

impl<T> BlockingDeque<T> {
    /// Creates a new, empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items currently in the queue
    ///
    /// The value may be outdated by the time it is returned when other threads operate on the queue.
    pub fn len(&self) -> usize {
        match self.items.lock() {
            Ok(items) => items.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    /// Whether the queue currently holds no items
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends an item at the tail
    pub fn push_back(&self, item: T) -> Result<(), QueueError> {
        self.items()?.push_back(item);
        self.available.notify_one();
        Ok(())
    }

    /// Appends an item at the tail, waiting at most `max_wait` for access to the queue
    ///
    /// While the queue is contended the calling task yields to the runtime instead of
    /// blocking its thread.
    pub async fn push_back_timeout(&self, item: T, max_wait: Duration) -> Result<(), QueueError> {
        let mut pending = Some(item);

        let attempt = async {
            loop {
                if let Some(outcome) = self.try_push_back(&mut pending) {
                    return outcome;
                }

                yield_now().await;
            }
        };

        match timeout(max_wait, attempt).await {
            Ok(outcome) => outcome,
            Err(_) => Err(QueueError::TimedOut),
        }
    }

    /// Puts an item at the head so that it is the next one to be taken
    pub fn push_front(&self, item: T) -> Result<(), QueueError> {
        self.items()?.push_front(item);
        self.available.notify_one();
        Ok(())
    }

    /// Removes and returns the item at the head, waiting indefinitely until one becomes available
    ///
    /// Returns [`QueueError::Interrupted`] when [`interrupt`](Self::interrupt) has been called
    /// since the last call to this method returned.
    pub async fn take(&self) -> Result<T, QueueError> {
        loop {
            let notified = self.available.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.interrupted.swap(false, Ordering::AcqRel) {
                return Err(QueueError::Interrupted);
            }

            let next = self.items()?.pop_front();
            if let Some(item) = next {
                return Ok(item);
            }

            notified.await;
        }
    }

    /// Wakes up the consumer currently waiting in [`take`](Self::take), or the next one to call it
    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::Release);
        self.available.notify_waiters();
    }

    /// Poisons the lock by panicking while holding it
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _items = self.items.lock();
            panic!("poisoning the queue lock");
        }));

        assert!(result.is_err());
    }

    fn items(&self) -> Result<MutexGuard<'_, VecDeque<T>>, QueueError> {
        self.items.lock().map_err(|_| QueueError::Poisoned)
    }

    fn try_push_back(&self, pending: &mut Option<T>) -> Option<Result<(), QueueError>> {
        match self.items.try_lock() {
            Ok(mut items) => {
                if let Some(item) = pending.take() {
                    items.push_back(item);
                }
                drop(items);
                self.available.notify_one();
                Some(Ok(()))
            }
            Err(TryLockError::WouldBlock) => None,
            Err(TryLockError::Poisoned(_)) => Some(Err(QueueError::Poisoned)),
        }
    }
}
