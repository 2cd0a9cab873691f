use super::DispatchError;
use crate::domain::ProduceMessage;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Producer facing entry point for outgoing messages
///
/// Backpressure is signalled through boolean return values, admission never fails with an error.
#[async_trait]
pub trait QueueSender: Send + Sync {
    /// Queues a message for dispatch without waiting
    fn offer(&self, message: Arc<ProduceMessage>) -> bool;

    /// Queues a message for dispatch, waiting at most `max_wait` for access to the queue
    async fn offer_with_timeout(&self, message: Arc<ProduceMessage>, max_wait: Duration) -> bool;

    /// Sends a message right away, bypassing the queue and any ordering guarantees
    async fn send(&self, message: Arc<ProduceMessage>) -> Result<(), DispatchError>;

    /// Stops dispatching, messages which are still queued are abandoned
    fn destroy(&self);
}
