//! Exponential backoff implementations

use std::{iter::Iterator, time::Duration};

/// Exponential backoff iterator
///
/// This struct implements the iterator trait and returns monotonically increasing values until the `ceiling` is reached.
/// Each element in the Iterator is the previous element multiplied by the `multiplier` property.
/// Unlike a retry budget, it never runs dry: once the ceiling is hit it keeps on returning it.
/// Calling [`reset`](Backoff::reset) starts over from the initial delay.
#[derive(Debug, Clone)]
pub struct Backoff {
    initial: Duration,
    multiplier: u32,
    ceiling: Duration,
    current: Option<Duration>,
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(Duration::from_millis(25), Duration::from_secs(5))
    }
}

impl Backoff {
    /// Creates a new instance which doubles `initial` on every step up to `ceiling`
    pub fn new(initial: Duration, ceiling: Duration) -> Self {
        Self {
            initial,
            multiplier: 2,
            ceiling: ceiling.max(initial),
            current: None,
        }
    }

    /// Restarts the sequence at the initial delay
    pub fn reset(&mut self) {
        self.current = None;
    }
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Self::Item> {
        let next = match self.current {
            None => self.initial,
            Some(current) => (current * self.multiplier).min(self.ceiling),
        };

        self.current = Some(next);
        Some(next)
    }
}
