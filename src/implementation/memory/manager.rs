use super::{MemoryError, MemoryOptions, OrderedSendMessageExecutor, PartitionRouter};
use crate::dispatch::{ExecutorDirectory, MessageSender, SendMessageExecutor};
use crate::domain::{MessageGroup, ProduceMessage};
use crate::library::BoxedError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tracing::{debug, info};

/// In-memory [`ExecutorDirectory`] with one [`OrderedSendMessageExecutor`] per [`MessageGroup`]
///
/// Executors are created on first use and reused afterwards. Closing the directory discards
/// all executors; messages they have not yet sent are lost.
pub struct ExecutorManager {
    router: PartitionRouter,
    sender: Arc<dyn MessageSender>,
    batch_size: usize,
    executors: Mutex<HashMap<MessageGroup, Arc<OrderedSendMessageExecutor>>>,
    closed: AtomicBool,
    me: Weak<ExecutorManager>,
}

impl ExecutorManager {
    /// Creates a new directory whose executors transmit through the given sender
    pub fn new(router: PartitionRouter, sender: Arc<dyn MessageSender>, batch_size: usize) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            router,
            sender,
            batch_size,
            executors: Mutex::new(HashMap::new()),
            closed: AtomicBool::new(false),
            me: me.clone(),
        })
    }

    /// Creates a new directory from command line options
    pub fn from_options(options: &MemoryOptions, sender: Arc<dyn MessageSender>) -> Arc<Self> {
        let router = PartitionRouter::new(options.partitions, options.broker_groups.clone());
        Self::new(router, sender, options.send_batch_size)
    }

    /// Number of executors currently alive
    pub fn executor_count(&self) -> usize {
        self.executors.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Refuses further resolutions and discards all executors
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            if let Ok(mut executors) = self.executors.lock() {
                info!(executors = executors.len(), "Closing executor directory");
                executors.clear();
            }
        }
    }

    fn resolve(&self, group: MessageGroup) -> Result<Arc<OrderedSendMessageExecutor>, BoxedError> {
        let mut executors = self
            .executors
            .lock()
            .map_err(|_| "executor registry lock is poisoned")?;

        let executor = executors.entry(group).or_insert_with_key(|group| {
            debug!(%group, "Creating executor");
            OrderedSendMessageExecutor::spawn(
                group.clone(),
                self.sender.clone(),
                self.me.clone(),
                self.batch_size,
            )
        });

        Ok(executor.clone())
    }
}

#[async_trait]
impl ExecutorDirectory for ExecutorManager {
    async fn executor(
        &self,
        message: &ProduceMessage,
    ) -> Result<Arc<dyn SendMessageExecutor>, BoxedError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(MemoryError::DirectoryClosed.into());
        }

        let executor = self.resolve(self.router.route(message))?;
        Ok(executor)
    }
}
