//! Configuration types.

use gateway_core::ApiKey;
use secrecy::SecretString;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use validator::Validate;

/// Default Gemini REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default system framing for end-user questions.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant for a solar energy company. \
Answer questions about solar panels, solar power, installation, energy savings and sustainability \
clearly and concisely. If a question is unrelated to solar energy, politely steer the conversation \
back to solar topics.";

/// Top-level gateway configuration.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server settings
    #[validate(nested)]
    pub server: ServerSettings,
    /// Generative-text provider settings
    #[validate(nested)]
    pub provider: ProviderSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

impl GatewayConfig {
    /// Process-wide fallback credential, if one is configured and non-blank.
    #[must_use]
    pub fn fallback_api_key(&self) -> Option<ApiKey> {
        self.provider.api_key.as_ref().and_then(ApiKey::from_secret)
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct ServerSettings {
    /// Bind address
    #[validate(length(min = 1))]
    pub host: String,
    /// Bind port
    #[validate(range(min = 1))]
    pub port: u16,
    /// Upper bound on one request, provider call included
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Allowed CORS origins; empty allows any origin
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            request_timeout: Duration::from_secs(60),
            cors_allowed_origins: Vec::new(),
        }
    }
}

/// Generative-text provider settings.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct ProviderSettings {
    /// Fallback API key used when a request carries none
    pub api_key: Option<SecretString>,
    /// REST base URL
    #[validate(url)]
    pub base_url: String,
    /// Model identifier
    #[validate(length(min = 1))]
    pub model: String,
    /// HTTP client timeout for one provider call
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Framing placed before every end-user question
    #[validate(length(min = 1))]
    pub system_prompt: String,
    /// Cap on generated tokens
    #[validate(range(min = 1))]
    pub max_output_tokens: u32,
    /// Sampling temperature
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: f32,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(30),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_output_tokens: 1024,
            temperature: 0.7,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}
