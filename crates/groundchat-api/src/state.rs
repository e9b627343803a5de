//! Application state wiring the orchestrator to its capabilities.
//!
//! AppState is generic over the inference and browser capabilities so the
//! router can be exercised with test doubles, but its defaults pin it to the
//! concrete infra implementations used by the binary.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use groundchat_core::browser::BrowserAutomation;
use groundchat_core::inference::InferenceProvider;
use groundchat_core::turn::TurnOrchestrator;
use groundchat_infra::browser::ChromiumAutomation;
use groundchat_infra::config::{load_global_config, resolve_config_path};
use groundchat_infra::inference::CloudflareInference;
use groundchat_types::config::GlobalConfig;

/// Shared application state, used by both CLI commands and HTTP handlers.
pub struct AppState<I = CloudflareInference, B = ChromiumAutomation> {
    pub orchestrator: TurnOrchestrator<I, B>,
    pub config: Arc<GlobalConfig>,
    /// Route path -> model identifier.
    routes: Arc<HashMap<String, String>>,
}

impl<I, B> Clone for AppState<I, B> {
    fn clone(&self) -> Self {
        Self {
            orchestrator: self.orchestrator.clone(),
            config: Arc::clone(&self.config),
            routes: Arc::clone(&self.routes),
        }
    }
}

impl AppState {
    /// Initialize the application state from the resolved config file and
    /// the environment.
    pub async fn init(config: GlobalConfig) -> anyhow::Result<Self> {
        let inference = CloudflareInference::from_config(&config.inference)
            .context("inference capability is not configured")?;
        let browser = ChromiumAutomation::detect(&config.browser);
        Ok(Self::new(config, Arc::new(inference), browser.map(Arc::new)))
    }
}

impl<I: InferenceProvider, B: BrowserAutomation> AppState<I, B> {
    pub fn new(config: GlobalConfig, inference: Arc<I>, browser: Option<Arc<B>>) -> Self {
        let routes = config
            .routes
            .iter()
            .map(|r| (r.path.clone(), r.model.clone()))
            .collect();
        let orchestrator = TurnOrchestrator::new(inference, browser, config.turn.clone());
        Self {
            orchestrator,
            config: Arc::new(config),
            routes: Arc::new(routes),
        }
    }

    /// Model bound to the chat route at `path`.
    pub fn model_for(&self, path: &str) -> Option<&str> {
        self.routes.get(path).map(String::as_str)
    }
}

/// Resolve, load, and validate the global configuration.
pub async fn load_config(explicit: Option<&Path>) -> anyhow::Result<GlobalConfig> {
    let config = match resolve_config_path(explicit) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            load_global_config(&path).await
        }
        None => GlobalConfig::default(),
    };
    config.validate()?;
    Ok(config)
}
