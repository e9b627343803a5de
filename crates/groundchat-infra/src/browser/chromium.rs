//! ChromiumAutomation -- [`BrowserAutomation`] over the Chrome DevTools Protocol.
//!
//! Every `launch` starts a dedicated headless Chromium process with its own
//! throwaway profile directory, so concurrent turns never share cookies,
//! storage, or the profile lock. Closing the session shuts the process down
//! and stops its CDP handler task.

use std::path::{Path, PathBuf};

use chromiumoxide::{Browser, Page};
use futures_util::StreamExt;
use tempfile::TempDir;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use groundchat_core::browser::{BrowserAutomation, BrowserPage, BrowserSession, WaitUntil};
use groundchat_types::config::BrowserConfig;
use groundchat_types::error::BrowserError;

/// Launches Chromium sessions from a resolved executable.
#[derive(Debug, Clone)]
pub struct ChromiumAutomation {
    executable: PathBuf,
    headless: bool,
    no_sandbox: bool,
}

impl ChromiumAutomation {
    /// Resolve the capability from `[browser]` settings.
    ///
    /// Returns `None` when automation is disabled or no Chromium binary can
    /// be found; callers then run without a browser.
    pub fn detect(config: &BrowserConfig) -> Option<Self> {
        if !config.enabled {
            tracing::info!("browser automation disabled by configuration");
            return None;
        }

        let executable = match &config.chrome_executable {
            Some(path) => {
                let path = PathBuf::from(path);
                if !path.exists() {
                    tracing::warn!(path = %path.display(), "configured Chrome executable does not exist");
                    return None;
                }
                path
            }
            None => match find_chrome_binary() {
                Some(path) => path,
                None => {
                    tracing::warn!("no Chrome/Chromium binary found; web gathering unavailable");
                    return None;
                }
            },
        };

        tracing::info!(executable = %executable.display(), "browser automation enabled");
        Some(Self {
            executable,
            headless: config.headless,
            no_sandbox: config.no_sandbox,
        })
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

fn find_chrome_binary() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("CHROME_BIN") {
        let p = PathBuf::from(path);
        if p.exists() {
            return Some(p);
        }
    }

    let candidates = [
        "/usr/bin/google-chrome",
        "/usr/bin/google-chrome-stable",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
        "/snap/chromium/current/usr/lib/chromium-browser/chrome",
    ];

    candidates
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

impl BrowserAutomation for ChromiumAutomation {
    type Session = ChromiumSession;

    async fn launch(&self) -> Result<ChromiumSession, BrowserError> {
        let profile = TempDir::new()
            .map_err(|e| BrowserError::Launch(format!("failed to create profile dir: {e}")))?;

        let mut builder = chromiumoxide::BrowserConfig::builder()
            .chrome_executable(&self.executable)
            .user_data_dir(profile.path());
        if !self.headless {
            builder = builder.with_head();
        }
        if self.no_sandbox {
            builder = builder.no_sandbox();
        }
        let config = builder.build().map_err(BrowserError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
            tracing::trace!("chromium event loop exited");
        });

        tracing::debug!("chromium session launched");
        Ok(ChromiumSession {
            browser: Mutex::new(browser),
            handler_task,
            _profile: profile,
        })
    }
}

/// One Chromium process and its CDP handler task.
pub struct ChromiumSession {
    browser: Mutex<Browser>,
    handler_task: JoinHandle<()>,
    // Removed from disk when the session is dropped.
    _profile: TempDir,
}

impl BrowserSession for ChromiumSession {
    type Page = ChromiumPage;

    async fn new_page(&self) -> Result<ChromiumPage, BrowserError> {
        let page = self
            .browser
            .lock()
            .await
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::Session(format!("failed to open page: {e}")))?;
        Ok(ChromiumPage { page })
    }

    async fn close(self) {
        let mut browser = self.browser.into_inner();
        if let Err(e) = browser.close().await {
            tracing::warn!(error = %e, "failed to close chromium cleanly");
        }
        if let Err(e) = browser.wait().await {
            tracing::debug!(error = %e, "failed to reap chromium process");
        }
        self.handler_task.abort();
        tracing::debug!("chromium session closed");
    }
}

pub struct ChromiumPage {
    page: Page,
}

impl BrowserPage for ChromiumPage {
    async fn goto(&self, url: &str, wait_until: WaitUntil) -> Result<(), BrowserError> {
        let navigation_error = |e: chromiumoxide::error::CdpError| BrowserError::Navigation {
            url: url.to_string(),
            details: e.to_string(),
        };

        self.page.goto(url).await.map_err(navigation_error)?;
        if wait_until == WaitUntil::NetworkIdle {
            self.page
                .wait_for_navigation()
                .await
                .map_err(navigation_error)?;
        }
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value, BrowserError> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::Extraction(e.to_string()))?
            .into_value::<serde_json::Value>()
            .map_err(|e| BrowserError::Extraction(format!("script returned no JSON value: {e}")))
    }
}
