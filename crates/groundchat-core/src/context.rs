//! Folding gathered web data into the conversation.

use groundchat_types::chat::Conversation;
use groundchat_types::locale::Locale;

use crate::prompt;

/// Append gathered `blocks` to `conversation` as one trailing system message.
///
/// Blank blocks are ignored. Returns `false` and leaves the conversation
/// untouched when nothing remains.
pub fn assemble_context(conversation: &mut Conversation, blocks: &[String], locale: Locale) -> bool {
    let blocks: Vec<&str> = blocks
        .iter()
        .map(|b| b.trim())
        .filter(|b| !b.is_empty())
        .collect();
    if blocks.is_empty() {
        return false;
    }

    let mut content = blocks.join("\n\n");
    content.push_str("\n\n");
    content.push_str(prompt::context_instruction(locale));
    conversation.push_context(content);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundchat_types::chat::{ChatMessage, MessageRole};

    fn conversation() -> Conversation {
        Conversation::new(vec![ChatMessage::system("persona"), ChatMessage::user("hi")])
    }

    #[test]
    fn test_empty_blocks_leave_conversation_unchanged() {
        let mut conv = conversation();
        assert!(!assemble_context(&mut conv, &[], Locale::En));
        assert!(!assemble_context(&mut conv, &["  ".to_string()], Locale::En));
        assert_eq!(conv, conversation());
    }

    #[test]
    fn test_appends_trailing_system_message() {
        let mut conv = conversation();
        let blocks = vec!["[Web page: A]".to_string(), "[Web search: q]".to_string()];
        assert!(assemble_context(&mut conv, &blocks, Locale::Ko));

        assert_eq!(conv.len(), 3);
        let last = &conv.messages()[2];
        assert_eq!(last.role, MessageRole::System);
        assert!(last.content.starts_with("[Web page: A]\n\n[Web search: q]"));
        assert!(last.content.ends_with(prompt::context_instruction(Locale::Ko)));
        // The leading persona remains the system prompt.
        assert_eq!(conv.system_prompt(), Some("persona"));
    }
}
