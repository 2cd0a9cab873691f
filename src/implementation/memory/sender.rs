use crate::dispatch::{ExecutorDirectory, MessageSender, SendMessageExecutor};
use crate::domain::ProduceMessage;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

/// Message sender which logs every batch instead of transmitting it
///
/// Stands in for a broker connection in demonstrations. An artificial latency can be added to
/// make the behavior of executors under load observable.
#[derive(Debug, Default)]
pub struct LoggingMessageSender {
    latency: Option<Duration>,
    delivered: AtomicU64,
}

impl LoggingMessageSender {
    /// Creates a sender which waits for the given duration before "delivering" each batch
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Default::default()
        }
    }

    /// Number of messages delivered so far
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Acquire)
    }
}

#[async_trait]
impl MessageSender for LoggingMessageSender {
    async fn send(
        &self,
        messages: Vec<Arc<ProduceMessage>>,
        executor: &dyn SendMessageExecutor,
        _directory: &dyn ExecutorDirectory,
    ) {
        if let Some(latency) = self.latency {
            sleep(latency).await;
        }

        let group = executor.message_group();
        for message in messages.iter() {
            info!(
                subject = %message.subject,
                message_id = %message.message_id,
                partition = %group.partition_name,
                broker_group = %group.broker_group,
                "Message delivered"
            );
        }

        self.delivered
            .fetch_add(messages.len() as u64, Ordering::AcqRel);
    }
}
