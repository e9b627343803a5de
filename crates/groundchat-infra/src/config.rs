//! Global configuration loader for Groundchat.
//!
//! Reads `config.toml` and deserializes it into [`GlobalConfig`]. Falls back
//! to sensible defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use groundchat_types::config::GlobalConfig;
use groundchat_types::error::ConfigError;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "GROUNDCHAT_CONFIG";

/// Resolve which config file to read.
///
/// Priority:
/// 1. `explicit` (the `--config` flag)
/// 2. `$GROUNDCHAT_CONFIG`
/// 3. `<config dir>/groundchat/config.toml`
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("groundchat").join("config.toml"))
}

/// Read and parse `path`. A missing file is not an error and yields defaults.
pub async fn try_load_global_config(path: &Path) -> Result<GlobalConfig, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", path.display());
            return Ok(GlobalConfig::default());
        }
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                details: err.to_string(),
            });
        }
    };

    toml::from_str::<GlobalConfig>(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        details: err.to_string(),
    })
}

/// Load global configuration from `path`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but cannot be read or parsed, logs a warning and
///   returns the default.
pub async fn load_global_config(path: &Path) -> GlobalConfig {
    match try_load_global_config(path).await {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            GlobalConfig::default()
        }
    }
}
