//! Per-session conversation state
//!
//! Created once per session, discarded on exit. Only the
//! `SessionController` mutates it, and only from the frame loop.

use super::prompts::GREETING;
use crate::messages::{Message, MessageStorage, Sender};

/// Ordered message log plus the single in-flight flag and the cosmetic
/// selected-file name.
///
/// Invariant: at most one outstanding request is represented by
/// `pending`; no new request may start while it is set.
pub struct ConversationState {
    messages: MessageStorage,
    pending: bool,
    selected_file: Option<String>,
}

impl ConversationState {
    /// Create a fresh conversation, seeded with the assistant greeting.
    pub fn new() -> Self {
        let messages = MessageStorage::new();
        messages.add(Message::new(Sender::Assistant, GREETING));

        Self {
            messages,
            pending: false,
            selected_file: None,
        }
    }

    pub fn messages(&self) -> &MessageStorage {
        &self.messages
    }

    /// Append a message to the end of the log. Prior entries are never
    /// mutated.
    pub fn append(&self, message: Message) {
        self.messages.add(message);
    }

    pub fn pending(&self) -> bool {
        self.pending
    }

    pub(crate) fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    /// Display-only; the gateway never reads this.
    pub fn selected_file(&self) -> Option<&str> {
        self.selected_file.as_deref()
    }

    pub(crate) fn set_selected_file(&mut self, name: String) {
        self.selected_file = Some(name);
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}
