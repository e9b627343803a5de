//! Global configuration types for Groundchat.
//!
//! `GlobalConfig` represents the top-level `config.toml`. Every field has a
//! default, so an empty or missing file yields a working local setup.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default persona prompt injected when the caller supplies no system message.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful, friendly assistant. Provide concise and accurate responses.";

/// Default model for the primary chat route.
pub const DEFAULT_MODEL: &str = "@cf/meta/llama-3.3-70b-instruct-fp8-fast";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub inference: InferenceConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub turn: TurnConfig,

    /// Chat routes, each bound to one model identifier.
    #[serde(default = "default_routes")]
    pub routes: Vec<RouteConfig>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            inference: InferenceConfig::default(),
            browser: BrowserConfig::default(),
            turn: TurnConfig::default(),
            routes: default_routes(),
        }
    }
}

impl GlobalConfig {
    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.routes.is_empty() {
            return Err(ConfigError::Invalid("at least one route is required".into()));
        }
        for (i, route) in self.routes.iter().enumerate() {
            if !route.path.starts_with('/') {
                return Err(ConfigError::Invalid(format!(
                    "route path '{}' must start with '/'",
                    route.path
                )));
            }
            if route.model.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "route '{}' has an empty model",
                    route.path
                )));
            }
            if self.routes[..i].iter().any(|r| r.path == route.path) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate route path '{}'",
                    route.path
                )));
            }
        }
        if self.turn.scrape_timeout_secs == 0 || self.turn.search_timeout_secs == 0 {
            return Err(ConfigError::Invalid("navigation timeouts must be non-zero".into()));
        }
        if self.turn.search_query_chars == 0 {
            return Err(ConfigError::Invalid("search_query_chars must be non-zero".into()));
        }
        Ok(())
    }

    /// Model bound to the first configured route.
    pub fn default_model(&self) -> &str {
        self.routes
            .first()
            .map(|r| r.model.as_str())
            .unwrap_or(DEFAULT_MODEL)
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory of static frontend assets; unset disables static serving.
    #[serde(default)]
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

/// Inference capability settings (Workers AI REST API).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    #[serde(default = "default_inference_base_url")]
    pub base_url: String,

    /// Account identifier; falls back to `CLOUDFLARE_ACCOUNT_ID`.
    #[serde(default)]
    pub account_id: Option<String>,

    /// Name of the environment variable holding the API token.
    #[serde(default = "default_api_token_env")]
    pub api_token_env: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_inference_base_url(),
            account_id: None,
            api_token_env: default_api_token_env(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// When false the capability is absent and gathering degrades to text.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Explicit Chrome/Chromium binary; otherwise `CHROME_BIN` or well-known paths.
    #[serde(default)]
    pub chrome_executable: Option<String>,

    #[serde(default = "default_true")]
    pub headless: bool,

    #[serde(default)]
    pub no_sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            chrome_executable: None,
            headless: true,
            no_sandbox: false,
        }
    }
}

/// Per-turn orchestration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnConfig {
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// `max_tokens` on the direct (non-streaming) path.
    #[serde(default = "default_direct_max_tokens")]
    pub direct_max_tokens: u32,

    /// `max_tokens` on the streaming path.
    #[serde(default = "default_stream_max_tokens")]
    pub stream_max_tokens: u32,

    /// Sampling temperature on the streaming path.
    #[serde(default = "default_stream_temperature")]
    pub stream_temperature: f64,

    #[serde(default = "default_scrape_timeout_secs")]
    pub scrape_timeout_secs: u64,

    #[serde(default = "default_search_timeout_secs")]
    pub search_timeout_secs: u64,

    /// Leading characters of the utterance used as the search query.
    #[serde(default = "default_search_query_chars")]
    pub search_query_chars: usize,

    /// Run scraping and searching concurrently (merge order is unchanged).
    #[serde(default)]
    pub parallel_gathering: bool,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            direct_max_tokens: default_direct_max_tokens(),
            stream_max_tokens: default_stream_max_tokens(),
            stream_temperature: default_stream_temperature(),
            scrape_timeout_secs: default_scrape_timeout_secs(),
            search_timeout_secs: default_search_timeout_secs(),
            search_query_chars: default_search_query_chars(),
            parallel_gathering: false,
        }
    }
}

/// A chat endpoint bound to one model identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub path: String,
    pub model: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}

fn default_inference_base_url() -> String {
    "https://api.cloudflare.com/client/v4".to_string()
}

fn default_api_token_env() -> String {
    "CLOUDFLARE_API_TOKEN".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_true() -> bool {
    true
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_direct_max_tokens() -> u32 {
    1024
}

fn default_stream_max_tokens() -> u32 {
    2048
}

fn default_stream_temperature() -> f64 {
    0.7
}

fn default_scrape_timeout_secs() -> u64 {
    15
}

fn default_search_timeout_secs() -> u64 {
    10
}

fn default_search_query_chars() -> usize {
    100
}

fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig {
            path: "/api/chat".into(),
            model: DEFAULT_MODEL.into(),
        },
        RouteConfig {
            path: "/api/v0/gpt-oss-120b".into(),
            model: "@cf/openai/gpt-oss-20b".into(),
        },
        RouteConfig {
            path: "/api/v0/llm3.2-3b".into(),
            model: "@cf/meta/llama-3.2-3b-instruct".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_deserialize_with_defaults() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8787);
        assert_eq!(config.turn.direct_max_tokens, 1024);
        assert_eq!(config.turn.scrape_timeout_secs, 15);
        assert_eq!(config.turn.search_timeout_secs, 10);
        assert_eq!(config.turn.search_query_chars, 100);
        assert!(config.browser.enabled);
        assert_eq!(config.routes.len(), 3);
        assert_eq!(config.default_model(), DEFAULT_MODEL);
        assert_eq!(config.routes[1].path, "/api/v0/gpt-oss-120b");
        assert_eq!(config.routes[1].model, "@cf/openai/gpt-oss-20b");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_global_config_deserialize_with_values() {
        let toml_str = r#"
[server]
port = 9000
static_dir = "public"

[browser]
enabled = false

[turn]
stream_max_tokens = 4096
parallel_gathering = true

[[routes]]
path = "/api/chat"
model = "@cf/openai/gpt-oss-20b"
"#;
        let config: GlobalConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.static_dir.as_deref(), Some("public"));
        assert!(!config.browser.enabled);
        assert_eq!(config.turn.stream_max_tokens, 4096);
        assert!(config.turn.parallel_gathering);
        assert_eq!(config.routes.len(), 1);
        assert_eq!(config.default_model(), "@cf/openai/gpt-oss-20b");
    }

    #[test]
    fn test_validate_rejects_duplicate_routes() {
        let mut config = GlobalConfig::default();
        config.routes = vec![
            RouteConfig {
                path: "/api/chat".into(),
                model: "a".into(),
            },
            RouteConfig {
                path: "/api/chat".into(),
                model: "b".into(),
            },
        ];
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_relative_route_and_zero_timeout() {
        let mut config = GlobalConfig::default();
        config.routes = vec![RouteConfig {
            path: "api/chat".into(),
            model: "a".into(),
        }];
        assert!(config.validate().is_err());

        let mut config = GlobalConfig::default();
        assert!(config.validate().is_ok());
        config.turn.search_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
