//! Inference request/response types for Groundchat.
//!
//! These types model the data shapes exchanged with the inference
//! capability: the two payload families, the structured and raw reply
//! forms, and inference errors.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::chat::Conversation;

/// Request-shape family of an inference model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFamily {
    /// Chat-style `{messages, max_tokens, temperature?}` payloads.
    Conversational,
    /// Responses-style `{instructions, input, max_tokens}` payloads.
    Instruction,
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelFamily::Conversational => write!(f, "conversational"),
            ModelFamily::Instruction => write!(f, "instruction"),
        }
    }
}

/// Body sent to the inference capability.
///
/// Serialized untagged: the model endpoint only sees the fields of the
/// selected shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InferencePayload {
    Conversational {
        messages: Conversation,
        max_tokens: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        temperature: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        stream: Option<bool>,
    },
    Instruction {
        instructions: String,
        input: String,
        max_tokens: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        stream: Option<bool>,
    },
}

impl InferencePayload {
    pub fn family(&self) -> ModelFamily {
        match self {
            InferencePayload::Conversational { .. } => ModelFamily::Conversational,
            InferencePayload::Instruction { .. } => ModelFamily::Instruction,
        }
    }

    pub fn max_tokens(&self) -> u32 {
        match self {
            InferencePayload::Conversational { max_tokens, .. }
            | InferencePayload::Instruction { max_tokens, .. } => *max_tokens,
        }
    }

    /// Whether the payload asks the capability for its incremental mode.
    pub fn wants_stream(&self) -> bool {
        match self {
            InferencePayload::Conversational { stream, .. }
            | InferencePayload::Instruction { stream, .. } => stream.unwrap_or(false),
        }
    }
}

/// Structured inference result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceOutput {
    pub response: String,
}

/// Upstream HTTP-shaped reply, forwarded verbatim on the direct path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInferenceResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Errors from inference capability calls.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("inference capability not configured: {0}")]
    NotConfigured(String),

    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("stream error: {0}")]
    Stream(String),
}
