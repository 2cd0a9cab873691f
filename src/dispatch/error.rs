use crate::library::BoxedError;
use thiserror::Error;

/// Reasons why a message could not be handed to its executor
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Executor directory failed to provide an executor
    #[error("unable to resolve executor for {message}")]
    Resolution {
        /// Display representation of the affected message
        message: String,
        /// Underlying cause reported by the directory
        #[source]
        source: BoxedError,
    },
    /// Executor refused to accept the message
    #[error("executor for {destination} rejected {message}")]
    Rejected {
        /// Display representation of the affected message
        message: String,
        /// Destination served by the rejecting executor
        destination: String,
        /// Underlying cause reported by the executor
        #[source]
        source: BoxedError,
    },
    /// A collaborator panicked while the message was being handed off
    #[error("handoff of {message} panicked: {reason}")]
    Panicked {
        /// Display representation of the affected message
        message: String,
        /// Panic payload, if it was a string
        reason: String,
    },
}
