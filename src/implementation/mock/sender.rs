use crate::dispatch::{ExecutorDirectory, MessageSender, SendMessageExecutor};
use crate::domain::{MessageGroup, MessageIdentifier, ProduceMessage};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Batch observed by the [`RecordingMessageSender`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentBatch {
    pub group: MessageGroup,
    pub message_ids: Vec<MessageIdentifier>,
}

/// Message sender which only records what it has been asked to send
#[derive(Default)]
pub struct RecordingMessageSender {
    batches: Mutex<Vec<SentBatch>>,
}

impl RecordingMessageSender {
    pub fn batches(&self) -> Vec<SentBatch> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSender for RecordingMessageSender {
    async fn send(
        &self,
        messages: Vec<Arc<ProduceMessage>>,
        executor: &dyn SendMessageExecutor,
        _directory: &dyn ExecutorDirectory,
    ) {
        let batch = SentBatch {
            group: executor.message_group().clone(),
            message_ids: messages
                .iter()
                .map(|message| message.message_id.clone())
                .collect(),
        };

        self.batches.lock().unwrap().push(batch);
    }
}
