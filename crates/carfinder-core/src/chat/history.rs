//! Append-only chat transcript.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::message::{ChatMessage, MessageRole};

/// Ordered, append-only sequence of chat messages.
///
/// Message ids are assigned here and strictly increase in append order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message stamped with the current time and returns it.
    pub fn append(&mut self, role: MessageRole, text: impl Into<String>) -> &ChatMessage {
        self.next_id += 1;
        let index = self.messages.len();
        self.messages.push(ChatMessage {
            id: self.next_id,
            role,
            text: text.into(),
            timestamp: Utc::now(),
        });
        &self.messages[index]
    }

    pub fn append_user(&mut self, text: impl Into<String>) -> &ChatMessage {
        self.append(MessageRole::User, text)
    }

    pub fn append_assistant(&mut self, text: impl Into<String>) -> &ChatMessage {
        self.append(MessageRole::Assistant, text)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
