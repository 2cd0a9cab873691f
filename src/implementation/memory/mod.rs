//! Collaborators of the dispatch engine which keep all state in process memory
//!
//! They make the engine usable without a broker connection: the [`ExecutorManager`] creates an
//! [`OrderedSendMessageExecutor`] for every destination chosen by the [`PartitionRouter`] and
//! executors hand their batches to any [`MessageSender`](crate::dispatch::MessageSender), for
//! example the [`LoggingMessageSender`].

mod error;
mod executor;
mod manager;
mod options;
mod router;
mod sender;

pub use error::*;
pub use executor::*;
pub use manager::*;
pub use options::*;
pub use router::*;
pub use sender::*;
