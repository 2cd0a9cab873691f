use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Observable event of the dispatch engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchEvent {
    /// Message was accepted into the admission queue
    Admitted,
    /// Message was refused by the capacity gate or a failed timed wait
    Rejected,
    /// Wait for the next message was interrupted
    Interrupted,
    /// Message was handed to its executor
    HandedOff,
    /// Handoff failed and the message was put back at the head of the queue
    Reinserted,
    /// Handoff failed and the message could not be put back, it is lost
    Dropped,
    /// Message bypassed the queue through the immediate send path
    SentImmediately,
}

/// Counters for every [`DispatchEvent`]
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    admitted: AtomicU64,
    rejected: AtomicU64,
    interrupted: AtomicU64,
    handed_off: AtomicU64,
    reinserted: AtomicU64,
    dropped: AtomicU64,
    sent_immediately: AtomicU64,
}

/// Point-in-time copy of the [`DispatchMetrics`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DispatchStatistics {
    /// Messages accepted into the queue
    pub admitted: u64,
    /// Messages refused at admission
    pub rejected: u64,
    /// Interrupted waits of the dispatcher
    pub interrupted: u64,
    /// Successful handoffs
    pub handed_off: u64,
    /// Failed handoffs which have been retried
    pub reinserted: u64,
    /// Messages lost because they could not be put back
    pub dropped: u64,
    /// Messages sent through the immediate path
    pub sent_immediately: u64,
}

impl DispatchMetrics {
    /// Counts an occurrence of the given event
    pub fn record(&self, event: DispatchEvent) {
        let counter = match event {
            DispatchEvent::Admitted => &self.admitted,
            DispatchEvent::Rejected => &self.rejected,
            DispatchEvent::Interrupted => &self.interrupted,
            DispatchEvent::HandedOff => &self.handed_off,
            DispatchEvent::Reinserted => &self.reinserted,
            DispatchEvent::Dropped => &self.dropped,
            DispatchEvent::SentImmediately => &self.sent_immediately,
        };

        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Reads all counters
    pub fn snapshot(&self) -> DispatchStatistics {
        DispatchStatistics {
            admitted: self.admitted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            interrupted: self.interrupted.load(Ordering::Relaxed),
            handed_off: self.handed_off.load(Ordering::Relaxed),
            reinserted: self.reinserted.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            sent_immediately: self.sent_immediately.load(Ordering::Relaxed),
        }
    }
}
