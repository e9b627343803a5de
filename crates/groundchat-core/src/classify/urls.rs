//! Explicit URL extraction.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://\S+").expect("URL pattern is a valid regex")
});

/// Extract `http(s)://` URLs, each running up to the next whitespace.
///
/// Returns distinct URLs in first-seen order; duplicates are removed by
/// exact string match.
pub fn extract_urls(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    URL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|url| seen.insert(*url))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_preserves_order() {
        assert_eq!(
            extract_urls("check https://a.com and https://a.com again"),
            vec!["https://a.com"]
        );
        assert_eq!(
            extract_urls("http://b.org then https://a.com then http://b.org"),
            vec!["http://b.org", "https://a.com"]
        );
    }

    #[test]
    fn test_empty_and_no_urls() {
        assert!(extract_urls("").is_empty());
        assert!(extract_urls("no links here, just www.example.com").is_empty());
    }

    #[test]
    fn test_other_schemes_ignored() {
        assert!(extract_urls("ftp://files.example.com mailto:a@b.c").is_empty());
    }

    #[test]
    fn test_url_runs_to_whitespace() {
        assert_eq!(
            extract_urls("see https://example.com/a?b=c&d=e#frag,\tthanks"),
            vec!["https://example.com/a?b=c&d=e#frag,"]
        );
    }

    #[test]
    fn test_exact_match_dedup_is_case_sensitive() {
        assert_eq!(
            extract_urls("https://a.com/X https://a.com/x"),
            vec!["https://a.com/X", "https://a.com/x"]
        );
    }
}
