//! Per-turn classification, captured once at `INIT`.

use groundchat_types::chat::Conversation;
use groundchat_types::locale::Locale;
use groundchat_types::web::truncate_chars;

use crate::classify::{detect_locale, extract_urls, needs_live_search};

/// Response mode of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPath {
    /// One synchronous inference call, raw result returned as-is.
    Direct,
    /// Gathering plus progress events over an event stream.
    Streaming,
}

/// Everything the orchestrator needs to know about the triggering utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnPlan {
    pub locale: Locale,
    pub urls: Vec<String>,
    pub needs_search: bool,
    /// Leading characters of the utterance, used verbatim as the search query.
    pub search_query: String,
}

impl TurnPlan {
    /// Classify the latest user message of `conversation`.
    ///
    /// A conversation without a user message yields an English plan with
    /// nothing to gather.
    pub fn analyze(conversation: &Conversation, search_query_chars: usize) -> Self {
        let utterance = conversation
            .latest_user_message()
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        Self {
            locale: detect_locale(utterance),
            urls: extract_urls(utterance),
            needs_search: needs_live_search(utterance),
            search_query: truncate_chars(utterance, search_query_chars),
        }
    }

    pub fn needs_gathering(&self) -> bool {
        !self.urls.is_empty() || self.needs_search
    }

    pub fn path(&self) -> TurnPath {
        if self.needs_gathering() {
            TurnPath::Streaming
        } else {
            TurnPath::Direct
        }
    }
}
