use super::{ExecutorManager, MemoryError};
use crate::dispatch::{MessageSender, SendMessageExecutor};
use crate::domain::{MessageGroup, ProduceMessage};
use crate::library::EmptyResult;
use std::sync::{Arc, Weak};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info_span, warn, Instrument};

/// Per-destination executor which transmits messages strictly in the order they have been added
///
/// Each executor owns a worker task that drains its buffer in batches and waits for every
/// batch to be sent before starting the next one.
pub struct OrderedSendMessageExecutor {
    group: MessageGroup,
    tx: UnboundedSender<Arc<ProduceMessage>>,
}

impl OrderedSendMessageExecutor {
    pub(super) fn spawn(
        group: MessageGroup,
        sender: Arc<dyn MessageSender>,
        directory: Weak<ExecutorManager>,
        batch_size: usize,
    ) -> Arc<Self> {
        let (tx, rx) = unbounded_channel();
        let span = info_span!("executor", group = %group);
        let executor = Arc::new(Self { group, tx });

        let worker = Worker {
            executor: Arc::downgrade(&executor),
            directory,
            sender,
            rx,
            batch_size: batch_size.max(1),
        };

        tokio::spawn(worker.run().instrument(span));

        executor
    }
}

impl SendMessageExecutor for OrderedSendMessageExecutor {
    fn message_group(&self) -> &MessageGroup {
        &self.group
    }

    fn add_message(&self, message: Arc<ProduceMessage>) -> EmptyResult {
        self.tx
            .send(message)
            .map_err(|_| MemoryError::ExecutorStopped(self.group.clone()))?;

        Ok(())
    }
}

struct Worker {
    executor: Weak<OrderedSendMessageExecutor>,
    directory: Weak<ExecutorManager>,
    sender: Arc<dyn MessageSender>,
    rx: UnboundedReceiver<Arc<ProduceMessage>>,
    batch_size: usize,
}

impl Worker {
    async fn run(mut self) {
        while let Some(first) = self.rx.recv().await {
            let mut batch = vec![first];

            while batch.len() < self.batch_size {
                match self.rx.try_recv() {
                    Ok(message) => batch.push(message),
                    Err(_) => break,
                }
            }

            let (executor, directory) = match (self.executor.upgrade(), self.directory.upgrade()) {
                (Some(executor), Some(directory)) => (executor, directory),
                _ => {
                    warn!(
                        dropped = batch.len(),
                        "Executor has been discarded, dropping buffered messages"
                    );
                    break;
                }
            };

            debug!(size = batch.len(), "Sending batch");
            self.sender
                .send(batch, &*executor, &*directory)
                .await;
        }

        debug!("Executor worker exited");
    }
}
