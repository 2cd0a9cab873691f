//! This library crate contains the ordered dispatch engine of a message-queue producer.
//!
//! Submodules have been introduced to split responsibilities. They form a chain of dependencies
//! from the project agnostic [`library`], over the message related [`domain`], up to the
//! [`dispatch`] engine itself and the in-memory [`implementation`]s of its collaborators.

#![deny(missing_docs)]

pub mod dispatch;
pub mod domain;
pub mod implementation;
pub mod library;
