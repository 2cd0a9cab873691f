//! Domain specific structures describing produced messages and their destinations

mod group;
mod message;

pub use group::*;
pub use message::*;
