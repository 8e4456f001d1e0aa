use uuid::Uuid;

use crate::models::chat::{ChatMessage, Role};

pub const GREETING: &str =
    "Hi! I can help you schedule a meeting with the engineer. Would you like to check availability?";

/// Append-only, oldest-first record of the visible conversation
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn with_greeting(text: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage {
                id: "init".to_string(),
                role: Role::Model,
                text: text.into(),
            }],
        }
    }

    pub fn append(&mut self, role: Role, text: impl Into<String>) -> ChatMessage {
        let message = ChatMessage {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
        };
        self.messages.push(message.clone());
        message
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
