//! Implementations of the collaborator traits from the [`dispatch`](crate::dispatch) module

pub mod memory;

#[cfg(test)]
pub(crate) mod mock;
