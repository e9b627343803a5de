//! Browser-automation capability traits and the scoped visit helper.
//!
//! Implementations live in groundchat-infra (e.g., `ChromiumAutomation`).
//! Every trait uses RPITIT with explicit `Send` bounds so that turn tasks
//! driving a browser can be spawned onto the multi-threaded runtime.

pub mod scraper;
pub mod search;

#[cfg(test)]
pub(crate) mod fake;

use std::future::Future;
use std::time::Duration;

use groundchat_types::error::BrowserError;

pub use scraper::PageScraperClient;
pub use search::WebSearchClient;

/// Readiness condition a navigation waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUntil {
    /// The `load` event fired.
    Load,
    /// No outstanding network requests for a short quiet period.
    NetworkIdle,
}

/// Per-navigation settings.
#[derive(Debug, Clone, Copy)]
pub struct NavigateOptions {
    pub wait_until: WaitUntil,
    pub timeout: Duration,
}

impl NavigateOptions {
    pub fn network_idle(timeout: Duration) -> Self {
        Self {
            wait_until: WaitUntil::NetworkIdle,
            timeout,
        }
    }
}

/// Factory for browser sessions.
pub trait BrowserAutomation: Send + Sync + 'static {
    type Session: BrowserSession;

    /// Acquire a fresh, isolated browser session.
    fn launch(&self) -> impl Future<Output = Result<Self::Session, BrowserError>> + Send;
}

/// One acquired browser session. Must be released with [`BrowserSession::close`].
pub trait BrowserSession: Send + Sync {
    type Page: BrowserPage;

    fn new_page(&self) -> impl Future<Output = Result<Self::Page, BrowserError>> + Send;

    /// Release the session. Infallible: release problems are logged, not raised.
    fn close(self) -> impl Future<Output = ()> + Send;
}

/// A tab inside a session.
pub trait BrowserPage: Send + Sync {
    /// Navigate and wait for `wait_until`. Timeouts are enforced by the caller.
    fn goto(
        &self,
        url: &str,
        wait_until: WaitUntil,
    ) -> impl Future<Output = Result<(), BrowserError>> + Send;

    /// Evaluate a script in the page and return its JSON result.
    fn evaluate(
        &self,
        script: &str,
    ) -> impl Future<Output = Result<serde_json::Value, BrowserError>> + Send;
}

/// Navigate `page` to `url`, bounded by `options.timeout`.
pub async fn navigate<P: BrowserPage>(
    page: &P,
    url: &str,
    options: NavigateOptions,
) -> Result<(), BrowserError> {
    match tokio::time::timeout(options.timeout, page.goto(url, options.wait_until)).await {
        Ok(result) => result,
        Err(_) => Err(BrowserError::Timeout {
            url: url.to_string(),
            timeout_ms: options.timeout.as_millis() as u64,
        }),
    }
}

/// Launch a session, visit `url`, evaluate `script`, and release the session.
///
/// The session is closed on every exit path after a successful launch,
/// including navigation timeouts and extraction failures.
pub async fn visit_and_extract<B: BrowserAutomation>(
    browser: &B,
    url: &str,
    options: NavigateOptions,
    script: &str,
) -> Result<serde_json::Value, BrowserError> {
    let session = browser.launch().await?;
    let outcome = extract_in_session(&session, url, options, script).await;
    session.close().await;
    outcome
}

async fn extract_in_session<S: BrowserSession>(
    session: &S,
    url: &str,
    options: NavigateOptions,
    script: &str,
) -> Result<serde_json::Value, BrowserError> {
    let page = session.new_page().await?;
    navigate(&page, url, options).await?;
    page.evaluate(script).await
}
