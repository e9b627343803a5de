//! Inference payload construction.
//!
//! The payload shape depends only on the model identifier, so the direct and
//! streaming paths always agree on shape and differ only in their options.

use groundchat_types::chat::Conversation;
use groundchat_types::config::TurnConfig;
use groundchat_types::llm::{InferencePayload, ModelFamily};

/// Model identifier prefixes served by instruction-style endpoints.
const INSTRUCTION_MODEL_PREFIXES: &[&str] = &["@cf/openai/"];

/// Family of the model identified by `model`.
pub fn model_family(model: &str) -> ModelFamily {
    if INSTRUCTION_MODEL_PREFIXES
        .iter()
        .any(|prefix| model.starts_with(prefix))
    {
        ModelFamily::Instruction
    } else {
        ModelFamily::Conversational
    }
}

/// Branch-specific payload knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadOptions {
    pub max_tokens: u32,
    pub temperature: Option<f64>,
    pub stream: Option<bool>,
}

impl PayloadOptions {
    /// Options for the non-streaming path.
    pub fn direct(config: &TurnConfig) -> Self {
        Self {
            max_tokens: config.direct_max_tokens,
            temperature: None,
            stream: None,
        }
    }

    /// Options for the streaming path.
    pub fn streaming(config: &TurnConfig) -> Self {
        Self {
            max_tokens: config.stream_max_tokens,
            temperature: Some(config.stream_temperature),
            stream: Some(true),
        }
    }
}

/// Build the request body for `model` from `conversation`.
///
/// Instruction-style payloads carry the leading system message as
/// `instructions` and every non-system message, newline-joined, as `input`.
/// Temperature is not part of that shape and is dropped.
pub fn build_payload(
    conversation: &Conversation,
    model: &str,
    options: &PayloadOptions,
) -> InferencePayload {
    match model_family(model) {
        ModelFamily::Conversational => InferencePayload::Conversational {
            messages: conversation.clone(),
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            stream: options.stream,
        },
        ModelFamily::Instruction => InferencePayload::Instruction {
            instructions: conversation.system_prompt().unwrap_or_default().to_string(),
            input: conversation.dialogue().collect::<Vec<_>>().join("\n"),
            max_tokens: options.max_tokens,
            stream: options.stream,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundchat_types::chat::ChatMessage;

    fn conversation() -> Conversation {
        Conversation::new(vec![
            ChatMessage::system("be brief"),
            ChatMessage::user("hello"),
            ChatMessage::assistant("hi!"),
            ChatMessage::user("what now?"),
            ChatMessage::system("[Web search: now]"),
        ])
    }

    #[test]
    fn test_model_family() {
        assert_eq!(model_family("@cf/openai/gpt-oss-120b"), ModelFamily::Instruction);
        assert_eq!(
            model_family("@cf/meta/llama-3.3-70b-instruct-fp8-fast"),
            ModelFamily::Conversational
        );
        assert_eq!(model_family(""), ModelFamily::Conversational);
    }

    #[test]
    fn test_instruction_shape() {
        let config = TurnConfig::default();
        let payload = build_payload(
            &conversation(),
            "@cf/openai/gpt-oss-120b",
            &PayloadOptions::direct(&config),
        );
        match payload {
            InferencePayload::Instruction {
                instructions,
                input,
                max_tokens,
                stream,
            } => {
                assert_eq!(instructions, "be brief");
                assert_eq!(input, "hello\nhi!\nwhat now?");
                assert_eq!(max_tokens, 1024);
                assert_eq!(stream, None);
            }
            other => panic!("expected instruction payload, got {other:?}"),
        }
    }

    #[test]
    fn test_conversational_shape_keeps_all_messages() {
        let config = TurnConfig::default();
        let payload = build_payload(
            &conversation(),
            "@cf/meta/llama-3.2-3b-instruct",
            &PayloadOptions::streaming(&config),
        );
        match payload {
            InferencePayload::Conversational {
                messages,
                max_tokens,
                temperature,
                stream,
            } => {
                assert_eq!(messages, conversation());
                assert_eq!(max_tokens, config.stream_max_tokens);
                assert_eq!(temperature, Some(config.stream_temperature));
                assert_eq!(stream, Some(true));
            }
            other => panic!("expected conversational payload, got {other:?}"),
        }
    }

    #[test]
    fn test_same_family_on_both_branches() {
        let config = TurnConfig::default();
        for model in ["@cf/openai/gpt-oss-120b", "@cf/meta/llama-3.2-3b-instruct"] {
            let direct = build_payload(&conversation(), model, &PayloadOptions::direct(&config));
            let streaming =
                build_payload(&conversation(), model, &PayloadOptions::streaming(&config));
            assert_eq!(direct.family(), streaming.family());
            assert_ne!(direct.max_tokens(), streaming.max_tokens());
        }
    }

    #[test]
    fn test_instruction_without_system_prompt() {
        let conv = Conversation::new(vec![ChatMessage::user("hi")]);
        let payload = build_payload(
            &conv,
            "@cf/openai/gpt-oss-120b",
            &PayloadOptions::direct(&TurnConfig::default()),
        );
        assert!(matches!(
            payload,
            InferencePayload::Instruction { ref instructions, .. } if instructions.is_empty()
        ));
    }
}
