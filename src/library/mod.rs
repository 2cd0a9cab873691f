//! Independent and project agnostic libraries
//!
//! Nothing in here knows about messages, subjects or brokers. Everything that is specific
//! to producing messages lives in the [`domain`](super::domain) and [`dispatch`](super::dispatch) modules.

pub mod helpers;
pub mod queue;

/// Generic error type
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result with no value and a [`BoxedError`]
pub type EmptyResult = Result<(), BoxedError>;
