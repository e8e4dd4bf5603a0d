//! Conversation: the append-only message history sent to the relay.

use thiserror::Error;

use crate::models::message::{Message, Role};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversationError {
    #[error("messages cannot be empty")]
    Empty,

    #[error("the last message must come from the user")]
    LastMessageNotUser,
}

/// Ordered message history. Appending returns a new conversation; existing
/// messages are never touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(&self, content: impl Into<String>) -> Self {
        self.with(Message::user(content))
    }

    #[cfg(test)]
    pub fn with_assistant(&self, content: impl Into<String>) -> Self {
        self.with(Message::assistant(content))
    }

    fn with(&self, message: Message) -> Self {
        let mut messages = self.messages.clone();
        messages.push(message);
        Self { messages }
    }

    #[cfg(test)]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Messages ready for a generation request: non-empty and ending with a user turn.
    pub fn for_generation(&self) -> Result<&[Message], ConversationError> {
        match self.messages.last() {
            None => Err(ConversationError::Empty),
            Some(last) if last.role != Role::User => Err(ConversationError::LastMessageNotUser),
            Some(_) => Ok(&self.messages),
        }
    }
}

impl TryFrom<Vec<Message>> for Conversation {
    type Error = ConversationError;

    /// Accepts only sequences that can be sent for generation.
    fn try_from(messages: Vec<Message>) -> Result<Self, Self::Error> {
        let conversation = Self { messages };
        conversation.for_generation()?;
        Ok(conversation)
    }
}
