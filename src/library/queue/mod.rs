//! Concurrency-safe queue structures
//!
//! The [`BlockingDeque`] is the only shared mutable structure between producers and the
//! dispatcher. It is deliberately unbounded: items which have to be retried are put back
//! at its head and that must never fail because some capacity has been reached. Anybody who
//! wants to limit its growth has to do so before inserting (see the capacity gate of the
//! [`OrderedQueueSender`](crate::dispatch::OrderedQueueSender)).

mod deque;
mod error;

pub use deque::*;
pub use error::*;
