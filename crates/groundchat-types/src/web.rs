//! Page-scrape and web-search result types.
//!
//! Both results are bounded at construction so that no page or search
//! provider can blow up the context handed to the model.

use serde::{Deserialize, Serialize};

/// Maximum characters of page body text kept per scrape.
pub const MAX_CONTENT_CHARS: usize = 5000;

/// Maximum number of headings kept per scrape.
pub const MAX_HEADINGS: usize = 10;

/// Maximum number of search result entries kept per search.
pub const MAX_SEARCH_RESULTS: usize = 3;

/// Maximum characters of a search result snippet.
pub const MAX_SNIPPET_CHARS: usize = 300;

/// Collapse every whitespace run to a single space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max` characters (not bytes).
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Structured summary of one visited page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub source_url: String,
    pub title: String,
    pub description: Option<String>,
    pub headings: Vec<String>,
    pub content: String,
}

impl ScrapeResult {
    /// Build a result, normalizing and capping every field.
    pub fn new(
        source_url: impl Into<String>,
        title: &str,
        description: Option<&str>,
        headings: &[String],
        content: &str,
    ) -> Self {
        let headings = headings
            .iter()
            .map(|h| collapse_whitespace(h))
            .filter(|h| !h.is_empty())
            .take(MAX_HEADINGS)
            .collect();

        let description = description
            .map(collapse_whitespace)
            .filter(|d| !d.is_empty());

        Self {
            source_url: source_url.into(),
            title: collapse_whitespace(title),
            description,
            headings,
            content: truncate_chars(&collapse_whitespace(content), MAX_CONTENT_CHARS),
        }
    }

    /// Render as a text block for context injection.
    pub fn render(&self) -> String {
        let title = if self.title.is_empty() {
            "(untitled)"
        } else {
            self.title.as_str()
        };
        let mut out = format!("[Web page: {title}]\nURL: {}\n", self.source_url);
        if let Some(description) = &self.description {
            out.push_str(&format!("Description: {description}\n"));
        }
        if !self.headings.is_empty() {
            out.push_str(&format!("Headings: {}\n", self.headings.join(" | ")));
        }
        out.push_str("Content:\n");
        out.push_str(&self.content);
        out
    }
}

/// One entry of a search results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

/// Top entries of one web search, in provider order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub query: String,
    pub hits: Vec<SearchHit>,
}

impl SearchResult {
    /// Build a result, keeping only the first usable entries.
    ///
    /// Entries without a title or link are dropped before the cap is applied.
    pub fn new(query: impl Into<String>, hits: Vec<SearchHit>) -> Self {
        let hits = hits
            .into_iter()
            .map(|hit| SearchHit {
                title: collapse_whitespace(&hit.title),
                snippet: truncate_chars(&collapse_whitespace(&hit.snippet), MAX_SNIPPET_CHARS),
                link: hit.link.trim().to_string(),
            })
            .filter(|hit| !hit.title.is_empty() && !hit.link.is_empty())
            .take(MAX_SEARCH_RESULTS)
            .collect();

        Self {
            query: query.into(),
            hits,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Render as a numbered text block for context injection.
    pub fn render(&self) -> String {
        let mut out = format!("[Web search: {}]", self.query);
        for (i, hit) in self.hits.iter().enumerate() {
            out.push_str(&format!("\n{}. {}\n", i + 1, hit.title));
            if !hit.snippet.is_empty() {
                out.push_str(&format!("   {}\n", hit.snippet));
            }
            out.push_str(&format!("   Source: {}", hit.link));
        }
        out
    }
}
