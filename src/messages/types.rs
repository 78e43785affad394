use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageMetadata {
    pub is_voice: bool,
}

impl Default for MessageMetadata {
    fn default() -> Self {
        Self { is_voice: false }
    }
}

/// A single conversation entry. Immutable once appended; ordering is
/// insertion order and ids are unique within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub metadata: MessageMetadata,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
            metadata: MessageMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: MessageMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn voice(sender: Sender, text: impl Into<String>) -> Self {
        Self::new(sender, text).with_metadata(MessageMetadata { is_voice: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::new(Sender::User, "hello");
        let b = Message::new(Sender::User, "hello");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_voice_message_metadata() {
        let msg = Message::voice(Sender::User, "spoken");
        assert!(msg.metadata.is_voice);

        let typed = Message::new(Sender::User, "typed");
        assert!(!typed.metadata.is_voice);
    }
}
