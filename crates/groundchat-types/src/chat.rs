//! Chat message and conversation types for Groundchat.
//!
//! A [`Conversation`] is the ordered message list of a single turn. It is
//! built from the inbound request body, mutated by the orchestrator (system
//! prompt injection, context injection) and discarded when the turn ends.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered sequence of chat messages. Earlier entries are earlier in the dialogue.
///
/// Serializes as a plain JSON array so it can be embedded directly in
/// request and payload bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation(Vec<ChatMessage>);

impl Conversation {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self(messages)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<ChatMessage> {
        self.0
    }

    /// Insert `prompt` as the first message unless a system message is already present.
    ///
    /// Returns `true` when a message was injected.
    pub fn ensure_system_prompt(&mut self, prompt: &str) -> bool {
        if self.0.iter().any(|m| m.role == MessageRole::System) {
            return false;
        }
        self.0.insert(0, ChatMessage::system(prompt));
        true
    }

    /// The leading system message: the persona prompt, not any appended context.
    pub fn system_prompt(&self) -> Option<&str> {
        self.0
            .iter()
            .find(|m| m.role == MessageRole::System)
            .map(|m| m.content.as_str())
    }

    /// The most recent user message, if any.
    pub fn latest_user_message(&self) -> Option<&ChatMessage> {
        self.0.iter().rev().find(|m| m.role == MessageRole::User)
    }

    /// Append a trailing system message carrying situational context.
    pub fn push_context(&mut self, content: impl Into<String>) {
        self.0.push(ChatMessage::system(content));
    }

    /// Contents of every user/assistant message, in order.
    pub fn dialogue(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .map(|m| m.content.as_str())
    }
}

impl From<Vec<ChatMessage>> for Conversation {
    fn from(messages: Vec<ChatMessage>) -> Self {
        Self(messages)
    }
}

/// Inbound chat request body.
///
/// `stream` is accepted for compatibility with chat frontends but does not
/// select the response mode; the orchestrator decides that from the
/// content of the latest user message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Conversation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}
