use crate::domain::{MessageGroup, ProduceMessage};
use crate::library::{BoxedError, EmptyResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Stateful executor responsible for transmitting the messages of one [`MessageGroup`]
///
/// An executor buffers the messages it is given and transmits them in the order in
/// which they have been added. Executors of different groups progress independently.
pub trait SendMessageExecutor: Send + Sync {
    /// Destination served by this executor
    fn message_group(&self) -> &MessageGroup;

    /// Hands a message to the executor for asynchronous transmission
    ///
    /// Implementations must not block and must preserve the order of successive calls.
    fn add_message(&self, message: Arc<ProduceMessage>) -> EmptyResult;
}

/// Directory that resolves, creates and reuses the executor for a message
#[async_trait]
pub trait ExecutorDirectory: Send + Sync {
    /// Returns the executor serving the destination of the given message
    ///
    /// The result is expected to remain valid for at least one dispatch attempt.
    async fn executor(
        &self,
        message: &ProduceMessage,
    ) -> Result<Arc<dyn SendMessageExecutor>, BoxedError>;
}

/// Transmits batches of messages to a broker
///
/// Error handling, including re-routing through the `directory`, is the concern of the implementation.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Sends a batch of messages to the destination of the given executor
    async fn send(
        &self,
        messages: Vec<Arc<ProduceMessage>>,
        executor: &dyn SendMessageExecutor,
        directory: &dyn ExecutorDirectory,
    );
}
