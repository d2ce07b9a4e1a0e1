//! Layered configuration loading.

use crate::error::{ConfigError, ConfigResult};
use crate::types::{GatewayConfig, LogFormat};
use secrecy::SecretString;
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use validator::Validate;

/// Environment variable holding the process-wide provider key.
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";

const ENV_HOST: &str = "GATEWAY_HOST";
const ENV_PORT: &str = "GATEWAY_PORT";
const ENV_REQUEST_TIMEOUT_SECS: &str = "GATEWAY_REQUEST_TIMEOUT_SECS";
const ENV_MODEL: &str = "GEMINI_MODEL";
const ENV_BASE_URL: &str = "GEMINI_BASE_URL";
const ENV_LOG_LEVEL: &str = "GATEWAY_LOG_LEVEL";
const ENV_LOG_FORMAT: &str = "GATEWAY_LOG_FORMAT";

/// Load configuration from defaults, an optional file and the process environment.
///
/// # Errors
/// Returns error if the file cannot be read or parsed, an environment
/// variable is malformed, or the result fails validation.
pub async fn load_config(path: Option<&Path>) -> ConfigResult<GatewayConfig> {
    let mut config = match path {
        Some(path) => {
            let contents = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
            debug!(path = %path.display(), "Loaded config file");
            GatewayConfig::parse(path, &contents)?
        }
        None => GatewayConfig::default(),
    };

    config.apply_env(|name| std::env::var(name).ok())?;
    config.validate()?;

    Ok(config)
}

impl GatewayConfig {
    /// Parse file contents, choosing the format from the extension.
    ///
    /// # Errors
    /// Returns error on unknown extensions or malformed contents.
    pub fn parse(path: &Path, contents: &str) -> ConfigResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml" | "yml") => {
                serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
            Some("toml") => toml::from_str(contents).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// # Errors
    /// Returns error if a numeric or enum variable cannot be parsed.
    pub fn apply_env<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|e| ConfigError::Env {
                name: ENV_PORT.to_string(),
                message: format!("{e}"),
            })?;
        }
        if let Some(secs) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|e| ConfigError::Env {
                name: ENV_REQUEST_TIMEOUT_SECS.to_string(),
                message: format!("{e}"),
            })?;
            self.server.request_timeout = Duration::from_secs(secs);
        }
        if let Some(key) = lookup(ENV_API_KEY) {
            if !key.trim().is_empty() {
                self.provider.api_key = Some(SecretString::new(key));
            }
        }
        if let Some(model) = lookup(ENV_MODEL) {
            self.provider.model = model;
        }
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.provider.base_url = base_url;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            self.logging.format = format.parse::<LogFormat>().map_err(|message| {
                ConfigError::Env {
                    name: ENV_LOG_FORMAT.to_string(),
                    message,
                }
            })?;
        }

        Ok(())
    }
}
