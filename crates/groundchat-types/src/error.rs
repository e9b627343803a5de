use thiserror::Error;

/// Errors from the browser-automation capability.
///
/// These never reach the caller of a turn: scrape and search clients turn
/// them into inline diagnostic text.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("browser automation is not configured: {0}")]
    NotConfigured(String),

    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("browser session error: {0}")]
    Session(String),

    #[error("failed to navigate to {url}: {details}")]
    Navigation { url: String, details: String },

    #[error("navigation to {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("failed to extract page data: {0}")]
    Extraction(String),
}

/// Errors from decoding an inbound chat request.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("malformed request body: {0}")]
    MalformedJson(String),
}

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {details}")]
    Read { path: String, details: String },

    #[error("failed to parse config file {path}: {details}")]
    Parse { path: String, details: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
