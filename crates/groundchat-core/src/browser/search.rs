//! Live web search through the browser-automation capability.

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use groundchat_types::error::BrowserError;
use groundchat_types::locale::Locale;
use groundchat_types::web::{SearchHit, SearchResult};

use super::{BrowserAutomation, NavigateOptions, visit_and_extract};
use crate::prompt;

/// In-page extraction of organic results, in document order.
pub const SEARCH_RESULTS_SCRIPT: &str = r#"(() => {
  const results = [];
  for (const item of document.querySelectorAll('div.g')) {
    const title = item.querySelector('h3');
    const link = item.querySelector('a[href^="http"]');
    if (!title || !link) continue;
    const snippet = item.querySelector('.VwiC3b, [data-sncf], .st');
    results.push({
      title: title.innerText || '',
      snippet: snippet ? (snippet.innerText || '') : '',
      link: link.href,
    });
    if (results.length >= 3) break;
  }
  return results;
})()"#;

/// Search endpoint and language hint per locale.
fn search_endpoint(locale: Locale) -> (&'static str, &'static str) {
    match locale {
        Locale::Ko => ("https://www.google.co.kr/search", "ko"),
        Locale::Ja => ("https://www.google.co.jp/search", "ja"),
        Locale::Zh => ("https://www.google.com.hk/search", "zh-CN"),
        Locale::En => ("https://www.google.com/search", "en"),
    }
}

/// Build the locale-specific search URL with `query` encoded.
pub fn search_url(locale: Locale, query: &str) -> Result<Url, url::ParseError> {
    let (endpoint, hl) = search_endpoint(locale);
    Url::parse_with_params(endpoint, &[("q", query), ("hl", hl)])
}

/// Produces a bounded text summary of the top results for a query.
pub struct WebSearchClient<B> {
    browser: Option<Arc<B>>,
    timeout: Duration,
}

impl<B> Clone for WebSearchClient<B> {
    fn clone(&self) -> Self {
        Self {
            browser: self.browser.clone(),
            timeout: self.timeout,
        }
    }
}

impl<B: BrowserAutomation> WebSearchClient<B> {
    pub fn new(browser: Option<Arc<B>>, timeout: Duration) -> Self {
        Self { browser, timeout }
    }

    /// Search and render the result as a context block. Never fails.
    pub async fn search(&self, query: &str, locale: Locale) -> String {
        match self.try_search(query, locale).await {
            Ok(result) if result.is_empty() => prompt::no_results(locale, query),
            Ok(result) => result.render(),
            Err(BrowserError::NotConfigured(_)) => {
                format!("[Web search: {query}]\n{}", prompt::BROWSER_UNAVAILABLE)
            }
            Err(e) => {
                tracing::warn!(query, %locale, error = %e, "web search failed");
                prompt::search_failed(query, &e.to_string())
            }
        }
    }

    pub async fn try_search(&self, query: &str, locale: Locale) -> Result<SearchResult, BrowserError> {
        let browser = self
            .browser
            .as_deref()
            .ok_or_else(|| BrowserError::NotConfigured("no browser capability".into()))?;

        let url = search_url(locale, query).map_err(|e| BrowserError::Navigation {
            url: query.to_string(),
            details: e.to_string(),
        })?;

        let value = visit_and_extract(
            browser,
            url.as_str(),
            NavigateOptions::network_idle(self.timeout),
            SEARCH_RESULTS_SCRIPT,
        )
        .await?;

        let hits: Vec<SearchHit> = serde_json::from_value(value)
            .map_err(|e| BrowserError::Extraction(format!("unexpected search data: {e}")))?;

        let result = SearchResult::new(query, hits);
        tracing::debug!(query, hits = result.hits.len(), "search completed");
        Ok(result)
    }
}
