mod directory;
mod sender;

pub use directory::*;
pub use sender::*;

use crate::domain::ProduceMessage;
use std::sync::Arc;

/// Shorthand for an ordered message of the given subject
pub fn message(subject: &str, message_id: &str) -> Arc<ProduceMessage> {
    Arc::new(ProduceMessage::new(subject, message_id).ordered_by(subject))
}
