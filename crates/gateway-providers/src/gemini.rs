//! Google AI Studio (Gemini) provider implementation.
//!
//! # API Format
//! `POST {base_url}/models/{MODEL}:generateContent`
//!
//! The key travels in the `x-goog-api-key` header rather than the query
//! string, so transport errors (which carry the URL) cannot expose it.

use async_trait::async_trait;
use gateway_core::{
    provider::GENERIC_PROVIDER_MESSAGE, ApiKey, GatewayError, Prompt, ProviderError,
    ProviderErrorKind, ProviderResult, TextProvider,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace, warn};

use crate::safety::{SafetyPolicy, SafetySetting};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Finish reasons that mean the answer was withheld by content filtering.
const BLOCKING_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "RECITATION",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
];

/// Gemini provider configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// REST base URL
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// HTTP timeout for one call
    pub timeout: Duration,
    /// Framing placed before end-user questions
    pub system_prompt: String,
    /// Cap on generated tokens
    pub max_output_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash".to_string(),
            timeout: Duration::from_secs(30),
            system_prompt: "You are a helpful assistant for a solar energy company.".to_string(),
            max_output_tokens: 1024,
            temperature: 0.7,
        }
    }
}

impl GeminiConfig {
    /// Create a configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the system framing
    #[must_use]
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    /// Set generation limits
    #[must_use]
    pub fn with_generation(mut self, max_output_tokens: u32, temperature: f32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self.temperature = temperature;
        self
    }
}

/// Gemini provider
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
    safety: SafetyPolicy,
    endpoint: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: GeminiConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(16)
            .build()
            .map_err(|e| GatewayError::internal(format!("Failed to create HTTP client: {e}")))?;

        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            config,
            client,
            safety: SafetyPolicy::standard(),
            endpoint,
        })
    }

    /// Build the wire request for `prompt`
    fn build_request(&self, prompt: &Prompt) -> GeminiRequest<'_> {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiRequestPart {
                    text: prompt.assemble(&self.config.system_prompt),
                }],
            }],
            safety_settings: self.safety.settings(),
            generation_config: GeminiGenerationConfig {
                max_output_tokens: self.config.max_output_tokens,
                temperature: self.config.temperature,
            },
        }
    }

    fn transport_error(err: reqwest::Error) -> ProviderError {
        let timed_out = err.is_timeout();
        let detail = err.without_url().to_string();
        warn!(error = %detail, timed_out, "Gemini request failed");

        if timed_out {
            ProviderError::timeout(detail)
        } else {
            ProviderError::generic(ProviderErrorKind::Transport, detail)
        }
    }

    /// Pull the answer text out of a decoded response
    fn extract_answer(response: GeminiResponse, raw: &str) -> ProviderResult {
        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(Self::blocked(&reason, raw));
        }

        let candidate = response.candidates.into_iter().next().ok_or_else(|| {
            ProviderError::generic(
                ProviderErrorKind::MalformedResponse,
                format!("No candidates in response: {raw}"),
            )
        })?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if !text.trim().is_empty() {
            return Ok(text);
        }

        match candidate.finish_reason.as_deref() {
            Some(reason) if BLOCKING_FINISH_REASONS.contains(&reason) => {
                Err(Self::blocked(reason, raw))
            }
            _ => Err(ProviderError::generic(
                ProviderErrorKind::MalformedResponse,
                format!("Empty answer in response: {raw}"),
            )),
        }
    }

    fn blocked(reason: &str, raw: &str) -> ProviderError {
        ProviderError::new(
            ProviderErrorKind::Blocked,
            format!("Response was blocked due to {reason}"),
            raw,
        )
    }

    /// Translate a non-success HTTP response
    fn parse_error(status: u16, body: &str) -> ProviderError {
        #[derive(Deserialize)]
        struct GeminiErrorResponse {
            error: GeminiErrorDetail,
        }

        #[derive(Deserialize)]
        struct GeminiErrorDetail {
            #[serde(default)]
            message: String,
        }

        let message = serde_json::from_str::<GeminiErrorResponse>(body)
            .ok()
            .map(|envelope| envelope.error.message)
            .filter(|m| !m.trim().is_empty());

        match message {
            Some(message) => ProviderError::new(Self::classify(status, &message), message, body),
            None => ProviderError::generic(
                Self::classify(status, ""),
                format!("HTTP {status}: {body}"),
            ),
        }
    }

    fn classify(status: u16, message: &str) -> ProviderErrorKind {
        match status {
            401 | 403 => ProviderErrorKind::Authentication,
            400 if message.to_ascii_lowercase().contains("api key") => {
                ProviderErrorKind::Authentication
            }
            429 => ProviderErrorKind::Quota,
            500..=599 => ProviderErrorKind::Upstream,
            _ => ProviderErrorKind::InvalidRequest,
        }
    }
}

#[async_trait]
impl TextProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, credential: &ApiKey, prompt: &Prompt) -> ProviderResult {
        let request = self.build_request(prompt);

        debug!(
            provider = "gemini",
            model = %self.config.model,
            key = %credential.masked(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, credential.expose())
            .json(&request)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(Self::transport_error)?;

        trace!(status = %status, body = %body, "Received Gemini response");

        if !status.is_success() {
            return Err(Self::parse_error(status.as_u16(), &body));
        }

        let decoded: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::new(
                ProviderErrorKind::MalformedResponse,
                GENERIC_PROVIDER_MESSAGE,
                format!("Invalid response JSON: {e}"),
            )
        })?;

        Self::extract_answer(decoded, &body)
    }
}

// Gemini API types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent>,
    safety_settings: &'a [SafetySetting],
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: &'static str,
    parts: Vec<GeminiRequestPart>,
}

#[derive(Debug, Serialize)]
struct GeminiRequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}
