use crate::domain::MessageGroup;
use thiserror::Error;

/// Errors of the in-memory collaborators
#[derive(Error, Debug)]
pub enum MemoryError {
    /// Directory has been closed and no longer hands out executors
    #[error("executor directory is closed")]
    DirectoryClosed,
    /// Worker of the executor has exited and no longer accepts messages
    #[error("executor for {0} is no longer running")]
    ExecutorStopped(MessageGroup),
}
