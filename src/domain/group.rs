use serde::{Deserialize, Serialize};
use std::fmt;

/// Destination of a message on the broker side
///
/// Every message group is served by exactly one order-preserving executor at a time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageGroup {
    /// Subject the messages have been produced for
    pub subject: String,
    /// Name of the partition within the subject
    pub partition_name: String,
    /// Broker group hosting the partition
    pub broker_group: String,
}

impl MessageGroup {
    /// Creates a new instance from raw parts
    pub fn new(
        subject: impl Into<String>,
        partition_name: impl Into<String>,
        broker_group: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            partition_name: partition_name.into(),
            broker_group: broker_group.into(),
        }
    }
}

impl fmt::Display for MessageGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.partition_name, self.broker_group)
    }
}
