use super::{
    DispatchError, DispatchEvent, DispatchMetrics, DispatchOptions, DispatchStatistics,
    ExecutorDirectory, Lifecycle, MessageSender, QueueSender,
};
use crate::domain::{MessageGroup, ProduceMessage};
use crate::library::helpers::Backoff;
use crate::library::queue::{BlockingDeque, QueueError};
use async_trait::async_trait;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::{yield_now, JoinHandle};
use tokio::time::sleep;
use tracing::{debug, error, info, info_span, instrument, warn, Instrument};

type MessageQueue = BlockingDeque<Arc<ProduceMessage>>;

/// Queue based sender which hands messages to their executors in admission order
///
/// Producers add messages through [`offer`](QueueSender::offer) or
/// [`offer_with_timeout`](QueueSender::offer_with_timeout). A single background task takes
/// them off the queue one by one, resolves their executor through the [`ExecutorDirectory`]
/// and hands them over. When that fails, the message is put back at the head of the queue
/// and retried before anything that has been admitted after it. Thus messages for the same
/// destination reach their executor in the order in which they have been admitted.
///
/// Stopping is cooperative and does not flush the queue. Anything still queued when
/// [`destroy`](QueueSender::destroy) is called is abandoned.
pub struct OrderedQueueSender {
    queue: Arc<MessageQueue>,
    directory: Arc<dyn ExecutorDirectory>,
    sender: Arc<dyn MessageSender>,
    max_queue_size: usize,
    lifecycle: Arc<Lifecycle>,
    metrics: Arc<DispatchMetrics>,
    dispatcher: Mutex<Option<JoinHandle<()>>>,
}

impl OrderedQueueSender {
    /// Creates a new instance and spawns its dispatch loop onto the current tokio runtime
    ///
    /// # Panics
    ///
    /// Panics when called outside the context of a tokio runtime.
    pub fn new(
        directory: Arc<dyn ExecutorDirectory>,
        sender: Arc<dyn MessageSender>,
        options: DispatchOptions,
    ) -> Self {
        let queue = Arc::new(MessageQueue::new());
        let lifecycle = Arc::new(Lifecycle::default());
        let metrics = Arc::new(DispatchMetrics::default());

        let dispatcher = Dispatcher {
            queue: queue.clone(),
            directory: directory.clone(),
            lifecycle: lifecycle.clone(),
            metrics: metrics.clone(),
            backoff: options
                .retry_backoff
                .map(|initial| Backoff::new(initial, options.retry_backoff_ceiling)),
        };

        let handle = tokio::spawn(dispatcher.run().instrument(info_span!("dispatcher")));

        Self {
            queue,
            directory,
            sender,
            max_queue_size: options.max_queue_size,
            lifecycle,
            metrics,
            dispatcher: Mutex::new(Some(handle)),
        }
    }

    /// Number of messages waiting for dispatch
    pub fn queue_length(&self) -> usize {
        self.queue.len()
    }

    /// Current values of the dispatch counters
    pub fn statistics(&self) -> DispatchStatistics {
        self.metrics.snapshot()
    }

    /// Requests the dispatch loop to stop after its current iteration
    ///
    /// A dispatcher waiting on an empty queue is woken up. Calling it repeatedly has no further effect.
    pub fn stop(&self) {
        if self.lifecycle.stop() {
            self.queue.interrupt();
        }
    }

    /// Whether [`stop`](Self::stop) has been called
    pub fn is_stopped(&self) -> bool {
        self.lifecycle.is_stopped()
    }

    /// Whether the dispatch loop is still running
    pub fn is_dispatching(&self) -> bool {
        match self.dispatcher.lock() {
            Ok(handle) => handle.as_ref().map_or(false, |h| !h.is_finished()),
            Err(_) => false,
        }
    }

    /// Waits for the dispatch loop to exit
    ///
    /// Only the first caller actually waits, later calls return immediately.
    pub async fn join(&self) {
        let handle = match self.dispatcher.lock() {
            Ok(mut handle) => handle.take(),
            Err(_) => None,
        };

        if let Some(handle) = handle {
            if let Err(error) = handle.await {
                error!(%error, "Dispatch loop terminated abnormally");
            }
        }
    }

    fn has_capacity(&self, message: &ProduceMessage) -> bool {
        let length = self.queue.len();

        if length >= self.max_queue_size {
            warn!(
                subject = %message.subject,
                message_id = %message.message_id,
                length,
                limit = self.max_queue_size,
                "Admission queue is full, rejecting message"
            );
            self.metrics.record(DispatchEvent::Rejected);
            return false;
        }

        true
    }

    fn admitted(&self, message: &ProduceMessage, result: Result<(), QueueError>) -> bool {
        match result {
            Ok(()) => {
                self.metrics.record(DispatchEvent::Admitted);
                true
            }
            Err(error) => {
                error!(
                    %error,
                    subject = %message.subject,
                    message_id = %message.message_id,
                    "Failed to enqueue message"
                );
                self.metrics.record(DispatchEvent::Rejected);
                false
            }
        }
    }
}

#[async_trait]
impl QueueSender for OrderedQueueSender {
    fn offer(&self, message: Arc<ProduceMessage>) -> bool {
        if !self.has_capacity(&message) {
            return false;
        }

        let result = self.queue.push_back(message.clone());
        self.admitted(&message, result)
    }

    async fn offer_with_timeout(&self, message: Arc<ProduceMessage>, max_wait: Duration) -> bool {
        if !self.has_capacity(&message) {
            return false;
        }

        let result = self
            .queue
            .push_back_timeout(message.clone(), max_wait)
            .await;
        self.admitted(&message, result)
    }

    #[instrument(skip(self, message), fields(subject = %message.subject, message_id = %message.message_id))]
    async fn send(&self, message: Arc<ProduceMessage>) -> Result<(), DispatchError> {
        let executor = self
            .directory
            .executor(&message)
            .await
            .map_err(|source| DispatchError::Resolution {
                message: message.to_string(),
                source,
            })?;

        debug!(group = %executor.message_group(), "Sending message immediately");
        self.metrics.record(DispatchEvent::SentImmediately);

        self.sender
            .send(vec![message], executor.as_ref(), self.directory.as_ref())
            .await;

        Ok(())
    }

    fn destroy(&self) {
        self.stop();
    }
}

struct Dispatcher {
    queue: Arc<MessageQueue>,
    directory: Arc<dyn ExecutorDirectory>,
    lifecycle: Arc<Lifecycle>,
    metrics: Arc<DispatchMetrics>,
    backoff: Option<Backoff>,
}

impl Dispatcher {
    async fn run(mut self) {
        debug!("Dispatch loop started");

        while !self.lifecycle.is_stopped() {
            let message = match self.queue.take().await {
                Ok(message) => message,
                Err(QueueError::Poisoned) => {
                    error!("Admission queue is poisoned, abandoning dispatch");
                    break;
                }
                Err(error) => {
                    warn!(%error, "Waiting for the next message failed");
                    self.metrics.record(DispatchEvent::Interrupted);
                    continue;
                }
            };

            match self.hand_off(&message).await {
                Ok(group) => {
                    info!(
                        subject = %message.subject,
                        partition = %group.partition_name,
                        broker_group = %group.broker_group,
                        "Message entered its partition"
                    );
                    self.metrics.record(DispatchEvent::HandedOff);

                    if let Some(backoff) = self.backoff.as_mut() {
                        backoff.reset();
                    }
                }
                Err(error) => {
                    self.reinsert(message, error);
                    self.pause().await;
                }
            }
        }

        info!(abandoned = self.queue.len(), "Dispatch loop stopped");
    }

    async fn hand_off(&self, message: &Arc<ProduceMessage>) -> Result<MessageGroup, DispatchError> {
        let attempt = async {
            let executor = self.directory.executor(message).await.map_err(|source| {
                DispatchError::Resolution {
                    message: message.to_string(),
                    source,
                }
            })?;

            executor
                .add_message(message.clone())
                .map_err(|source| DispatchError::Rejected {
                    message: message.to_string(),
                    destination: executor.message_group().to_string(),
                    source,
                })?;

            Ok(executor.message_group().clone())
        };

        match AssertUnwindSafe(attempt).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(panic) => Err(DispatchError::Panicked {
                message: message.to_string(),
                reason: panic_reason(panic.as_ref()),
            }),
        }
    }

    fn reinsert(&self, message: Arc<ProduceMessage>, cause: DispatchError) {
        error!(
            error = %cause,
            subject = %message.subject,
            message_id = %message.message_id,
            "Dispatching message failed, putting it back at the head of the queue"
        );

        match self.queue.push_front(message.clone()) {
            Ok(()) => self.metrics.record(DispatchEvent::Reinserted),
            Err(error) => {
                error!(
                    %error,
                    subject = %message.subject,
                    message_id = %message.message_id,
                    "Failed to put message back into the queue, it is lost"
                );
                self.metrics.record(DispatchEvent::Dropped);
            }
        }
    }

    async fn pause(&mut self) {
        match self.backoff.as_mut().and_then(Iterator::next) {
            Some(delay) => {
                debug!(?delay, "Backing off before the next attempt");
                sleep(delay).await;
            }
            None => yield_now().await,
        }
    }
}

fn panic_reason(panic: &(dyn Any + Send)) -> String {
    if let Some(reason) = panic.downcast_ref::<&str>() {
        reason.to_string()
    } else if let Some(reason) = panic.downcast_ref::<String>() {
        reason.clone()
    } else {
        "unknown".to_owned()
    }
}
