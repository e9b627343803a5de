//! Scripted in-memory browser for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use groundchat_types::error::BrowserError;

use super::{BrowserAutomation, BrowserPage, BrowserSession, WaitUntil};

/// What a page does once navigated to a matching URL.
#[derive(Debug, Clone)]
pub enum PageScript {
    Respond(serde_json::Value),
    /// Navigation never completes.
    Hang,
    FailNavigation(String),
    FailEvaluate(String),
}

impl PageScript {
    pub fn respond(value: serde_json::Value) -> Self {
        PageScript::Respond(value)
    }
}

#[derive(Default)]
struct FakeState {
    routes: Vec<(String, PageScript)>,
    fail_launch: bool,
    launches: AtomicUsize,
    closes: AtomicUsize,
    visited: Mutex<Vec<String>>,
}

impl FakeState {
    fn script_for(&self, url: &str) -> PageScript {
        self.routes
            .iter()
            .find(|(prefix, _)| url.starts_with(prefix.as_str()))
            .map(|(_, script)| script.clone())
            .unwrap_or_else(|| PageScript::FailNavigation("no scripted route".into()))
    }
}

/// Browser whose pages answer from a prefix-matched route table.
#[derive(Clone, Default)]
pub struct ScriptedBrowser {
    state: Arc<FakeState>,
}

impl ScriptedBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_launch() -> Self {
        Self {
            state: Arc::new(FakeState {
                fail_launch: true,
                ..Default::default()
            }),
        }
    }

    /// Add a route. Only valid before the browser is shared.
    pub fn route(mut self, prefix: &str, script: PageScript) -> Self {
        let state = Arc::get_mut(&mut self.state).expect("route() called after sharing");
        state.routes.push((prefix.to_string(), script));
        self
    }

    pub fn launches(&self) -> usize {
        self.state.launches.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.state.closes.load(Ordering::SeqCst)
    }

    pub fn visited(&self) -> Vec<String> {
        self.state.visited.lock().unwrap().clone()
    }
}

impl BrowserAutomation for ScriptedBrowser {
    type Session = FakeSession;

    async fn launch(&self) -> Result<FakeSession, BrowserError> {
        if self.state.fail_launch {
            return Err(BrowserError::Launch("scripted launch failure".into()));
        }
        self.state.launches.fetch_add(1, Ordering::SeqCst);
        Ok(FakeSession {
            state: Arc::clone(&self.state),
        })
    }
}

pub struct FakeSession {
    state: Arc<FakeState>,
}

impl BrowserSession for FakeSession {
    type Page = FakePage;

    async fn new_page(&self) -> Result<FakePage, BrowserError> {
        Ok(FakePage {
            state: Arc::clone(&self.state),
            script: Mutex::new(None),
        })
    }

    async fn close(self) {
        self.state.closes.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct FakePage {
    state: Arc<FakeState>,
    script: Mutex<Option<PageScript>>,
}

impl BrowserPage for FakePage {
    async fn goto(&self, url: &str, _wait_until: WaitUntil) -> Result<(), BrowserError> {
        self.state.visited.lock().unwrap().push(url.to_string());
        let script = self.state.script_for(url);
        match &script {
            PageScript::Hang => std::future::pending::<()>().await,
            PageScript::FailNavigation(details) => {
                return Err(BrowserError::Navigation {
                    url: url.to_string(),
                    details: details.clone(),
                });
            }
            _ => {}
        }
        *self.script.lock().unwrap() = Some(script);
        Ok(())
    }

    async fn evaluate(&self, _script: &str) -> Result<serde_json::Value, BrowserError> {
        let script = self.script.lock().unwrap().clone();
        match script {
            Some(PageScript::Respond(value)) => Ok(value),
            Some(PageScript::FailEvaluate(details)) => Err(BrowserError::Extraction(details)),
            _ => Err(BrowserError::Extraction("page was never navigated".into())),
        }
    }
}
