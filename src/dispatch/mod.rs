//! Ordered dispatch of produced messages to their per-destination executors
//!
//! The [`OrderedQueueSender`] is the heart of this module. It accepts messages from any
//! number of producers, keeps them in arrival order and hands them, one after another, to
//! the executor responsible for their destination. Executors are looked up through an
//! [`ExecutorDirectory`] and transmit their messages using a [`MessageSender`], both of
//! which are provided by the surrounding client (see [`implementation`](crate::implementation)
//! for in-memory variants).
//!
//! The order in which messages are handed off is the order in which they have been admitted.
//! A message whose handoff fails is put back at the head of the queue, so it will be handed
//! off before anything that was admitted after it. Keeping the order from there on is the
//! responsibility of the executor.

mod error;
mod executor;
mod lifecycle;
mod metrics;
mod options;
mod ordered;
mod sender;

pub use error::*;
pub use executor::*;
pub use lifecycle::*;
pub use metrics::*;
pub use options::*;
pub use ordered::*;
pub use sender::*;
