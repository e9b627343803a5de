//! Page scraping through the browser-automation capability.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use groundchat_types::error::BrowserError;
use groundchat_types::web::ScrapeResult;

use super::{BrowserAutomation, NavigateOptions, visit_and_extract};
use crate::prompt;

/// In-page extraction. Returns `{title, description, headings, content}`.
///
/// Content containers are tried in priority order; the first one with
/// non-blank text wins, otherwise the whole body is used.
pub const EXTRACT_PAGE_SCRIPT: &str = r#"(() => {
  const selectors = [
    'article', 'main', '[role="main"]', '.content', '#content',
    '.post-content', '.entry-content', '.article-body', '#main'
  ];
  let content = '';
  for (const selector of selectors) {
    const el = document.querySelector(selector);
    if (el && el.innerText && el.innerText.trim().length > 0) {
      content = el.innerText;
      break;
    }
  }
  if (!content && document.body) {
    content = document.body.innerText || '';
  }
  const headings = Array.from(document.querySelectorAll('h1, h2, h3'))
    .map((h) => (h.innerText || '').trim())
    .filter((t) => t.length > 0)
    .slice(0, 10);
  const meta = document.querySelector('meta[name="description"]');
  return {
    title: document.title || '',
    description: meta ? meta.getAttribute('content') : null,
    headings,
    content,
  };
})()"#;

#[derive(Debug, Deserialize)]
struct ExtractedPage {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    headings: Vec<String>,
    #[serde(default)]
    content: String,
}

/// Produces a bounded text summary of a web page.
///
/// `scrape` never fails: an absent browser, a navigation timeout, or an
/// extraction error all collapse into descriptive text for the model.
pub struct PageScraperClient<B> {
    browser: Option<Arc<B>>,
    timeout: Duration,
}

impl<B> Clone for PageScraperClient<B> {
    fn clone(&self) -> Self {
        Self {
            browser: self.browser.clone(),
            timeout: self.timeout,
        }
    }
}

impl<B: BrowserAutomation> PageScraperClient<B> {
    pub fn new(browser: Option<Arc<B>>, timeout: Duration) -> Self {
        Self { browser, timeout }
    }

    /// Scrape `url` and render the result as a context block.
    pub async fn scrape(&self, url: &str) -> String {
        match self.try_scrape(url).await {
            Ok(result) => result.render(),
            Err(BrowserError::NotConfigured(_)) => {
                format!("[Web page: {url}]\n{}", prompt::BROWSER_UNAVAILABLE)
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "page scrape failed");
                prompt::scrape_failed(url, &e.to_string())
            }
        }
    }

    /// Scrape `url` into a structured result.
    pub async fn try_scrape(&self, url: &str) -> Result<ScrapeResult, BrowserError> {
        let browser = self
            .browser
            .as_deref()
            .ok_or_else(|| BrowserError::NotConfigured("no browser capability".into()))?;

        let value = visit_and_extract(
            browser,
            url,
            NavigateOptions::network_idle(self.timeout),
            EXTRACT_PAGE_SCRIPT,
        )
        .await?;

        let page: ExtractedPage = serde_json::from_value(value)
            .map_err(|e| BrowserError::Extraction(format!("unexpected page data: {e}")))?;

        tracing::debug!(url, title = %page.title, "page scraped");

        Ok(ScrapeResult::new(
            url,
            &page.title,
            page.description.as_deref(),
            &page.headings,
            &page.content,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::fake::{PageScript, ScriptedBrowser};
    use groundchat_types::web::{MAX_CONTENT_CHARS, MAX_HEADINGS};

    fn client(browser: ScriptedBrowser) -> PageScraperClient<ScriptedBrowser> {
        PageScraperClient::new(Some(Arc::new(browser)), Duration::from_secs(15))
    }

    #[tokio::test]
    async fn test_scrape_renders_page() {
        let browser = ScriptedBrowser::new().route(
            "https://example.com",
            PageScript::respond(serde_json::json!({
                "title": "Example Domain",
                "description": "An example",
                "headings": ["Example Domain"],
                "content": "This domain is for\n\n use in examples."
            })),
        );
        let text = client(browser).scrape("https://example.com").await;
        assert!(text.starts_with("[Web page: Example Domain]"));
        assert!(text.contains("Description: An example"));
        assert!(text.contains("This domain is for use in examples."));
    }

    #[tokio::test]
    async fn test_scrape_caps_large_pages() {
        let headings: Vec<String> = (0..40).map(|i| format!("H{i}")).collect();
        let browser = ScriptedBrowser::new().route(
            "https://big.com",
            PageScript::respond(serde_json::json!({
                "title": "Big",
                "headings": headings,
                "content": "x ".repeat(20_000),
            })),
        );
        let result = client(browser).try_scrape("https://big.com").await.unwrap();
        assert!(result.content.chars().count() <= MAX_CONTENT_CHARS);
        assert!(result.headings.len() <= MAX_HEADINGS);
    }

    #[tokio::test]
    async fn test_scrape_without_browser_is_text() {
        let scraper: PageScraperClient<ScriptedBrowser> =
            PageScraperClient::new(None, Duration::from_secs(15));
        let text = scraper.scrape("https://example.com").await;
        assert!(text.contains(prompt::BROWSER_UNAVAILABLE));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scrape_timeout_is_text_and_releases_session() {
        let browser = ScriptedBrowser::new().route("https://slow.com", PageScript::Hang);
        let scraper = client(browser.clone());
        let text = scraper.scrape("https://slow.com").await;
        assert!(text.contains("timed out after 15000ms"));
        assert_eq!(browser.closes(), 1);
    }

    #[tokio::test]
    async fn test_scrape_rejects_malformed_extraction() {
        let browser = ScriptedBrowser::new()
            .route("https://odd.com", PageScript::respond(serde_json::json!("not an object")));
        let err = client(browser).try_scrape("https://odd.com").await.unwrap_err();
        assert!(matches!(err, BrowserError::Extraction(_)));
    }
}
