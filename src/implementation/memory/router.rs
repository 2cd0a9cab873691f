use crate::domain::{MessageGroup, ProduceMessage};
use crate::library::helpers::bucket_of;

const DEFAULT_BROKER_GROUP: &str = "default";

/// Assigns messages to partitions and partitions to broker groups
///
/// Messages with the same subject and [partition key](ProduceMessage::partition_key) always
/// end up in the same [`MessageGroup`].
#[derive(Debug, Clone)]
pub struct PartitionRouter {
    partitions: usize,
    broker_groups: Vec<String>,
}

impl PartitionRouter {
    /// Creates a new router, zero partitions are treated as one
    pub fn new(partitions: usize, broker_groups: Vec<String>) -> Self {
        let broker_groups = if broker_groups.is_empty() {
            vec![DEFAULT_BROKER_GROUP.to_owned()]
        } else {
            broker_groups
        };

        Self {
            partitions: partitions.max(1),
            broker_groups,
        }
    }

    /// Message group the given message belongs to
    pub fn route(&self, message: &ProduceMessage) -> MessageGroup {
        let index = bucket_of(message.partition_key(), self.partitions);
        let broker_group = &self.broker_groups[index % self.broker_groups.len()];

        MessageGroup::new(
            &message.subject,
            format!("{}#{}", message.subject, index),
            broker_group,
        )
    }
}
