//! Request types for the gateway.
//!
//! Both endpoints accept JSON bodies with camelCase field names. A blank
//! `apiKey` is treated the same as an absent one.

use crate::error::GatewayError;
use crate::types::{deserialize_optional_key, ApiKey};
use serde::Deserialize;

/// Body of `POST /chat`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The end-user message
    #[serde(default)]
    pub message: Option<String>,

    /// Optional per-request provider key
    #[serde(default, deserialize_with = "deserialize_optional_key")]
    pub api_key: Option<ApiKey>,
}

impl ChatRequest {
    /// Create a request for `message` without a credential override
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            api_key: None,
        }
    }

    /// Attach a per-request credential
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = ApiKey::new(api_key);
        self
    }

    /// Get the message as sent; blankness is judged on the trimmed text
    ///
    /// # Errors
    /// Returns [`GatewayError::MissingMessage`] when the message is absent or blank
    pub fn validated_message(&self) -> Result<&str, GatewayError> {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .ok_or(GatewayError::MissingMessage)
    }
}

/// Body of `POST /test-provider`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeRequest {
    /// Credential to verify; falls back to the configured one
    #[serde(default, deserialize_with = "deserialize_optional_key")]
    pub api_key: Option<ApiKey>,
}

impl ProbeRequest {
    /// Probe a specific key
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: ApiKey::new(api_key),
        }
    }
}
