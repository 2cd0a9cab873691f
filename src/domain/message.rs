use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Opaque identifier of a message, unique per producer
pub type MessageIdentifier = String;

/// Message submitted by an application for delivery to a broker
///
/// The dispatch engine only ever routes references to a message and never alters it.
/// Messages which share a subject and an ordering key are expected to arrive at the broker
/// in the order in which they were produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProduceMessage {
    /// Logical destination (topic) of the message
    pub subject: String,

    /// Unique identifier of the message
    pub message_id: MessageIdentifier,

    /// Key which groups related messages onto the same partition
    #[serde(default)]
    pub ordering_key: Option<String>,

    /// Whether the message requires strict per-destination ordering
    #[serde(default)]
    pub ordered: bool,

    /// Point in time at which the message was produced
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Application payload, passed through untouched
    #[serde(default)]
    pub payload: Value,
}

impl ProduceMessage {
    /// Creates a new, unordered message with an empty payload
    pub fn new(subject: impl Into<String>, message_id: impl Into<MessageIdentifier>) -> Self {
        Self {
            subject: subject.into(),
            message_id: message_id.into(),
            ordering_key: None,
            ordered: false,
            created_at: Utc::now(),
            payload: Value::Null,
        }
    }

    /// Marks the message as strictly ordered within the given ordering key
    pub fn ordered_by(mut self, ordering_key: impl Into<String>) -> Self {
        self.ordering_key = Some(ordering_key.into());
        self.ordered = true;
        self
    }

    /// Replaces the payload
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    /// Key used to select a partition, falls back to the subject if no ordering key is set
    pub fn partition_key(&self) -> &str {
        self.ordering_key.as_deref().unwrap_or(&self.subject)
    }
}

impl fmt::Display for ProduceMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.subject, self.message_id)
    }
}
