//! Provider abstraction.
//!
//! A provider performs one single-turn text generation per call. Every
//! failure is returned as a [`ProviderError`]; implementations never panic
//! or let transport errors escape.

use crate::types::ApiKey;
use async_trait::async_trait;
use std::fmt;

/// Fallback message when the provider gave none of its own.
pub const GENERIC_PROVIDER_MESSAGE: &str = "Failed to get response from AI";

/// Result of a provider call: the answer text or a classified failure.
pub type ProviderResult = Result<String, ProviderError>;

/// Prompt handed to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// End-user message, to be wrapped in the provider's system framing
    Framed(String),
    /// Text sent verbatim
    Plain(String),
}

impl Prompt {
    /// End-user message that gets the assistant framing.
    #[must_use]
    pub fn framed(message: impl Into<String>) -> Self {
        Self::Framed(message.into())
    }

    /// Text sent without framing.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    /// Assemble the final prompt string.
    #[must_use]
    pub fn assemble(&self, framing: &str) -> String {
        match self {
            Self::Framed(message) => format!("{framing}\n\nUser question: {message}"),
            Self::Plain(text) => text.clone(),
        }
    }
}

/// Classification of a provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Network-level failure before a response arrived
    Transport,
    /// The call did not finish in time
    Timeout,
    /// The provider rejected the credential
    Authentication,
    /// Quota or rate limit exhausted on the provider side
    Quota,
    /// The provider rejected the request as invalid
    InvalidRequest,
    /// The provider failed internally
    Upstream,
    /// The prompt or answer was blocked by content safety
    Blocked,
    /// The response could not be decoded or carried no answer
    MalformedResponse,
}

impl ProviderErrorKind {
    /// Label used in logs and metrics
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Timeout => "timeout",
            Self::Authentication => "authentication",
            Self::Quota => "quota",
            Self::InvalidRequest => "invalid_request",
            Self::Upstream => "upstream",
            Self::Blocked => "blocked",
            Self::MalformedResponse => "malformed_response",
        }
    }
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider failure carrying a user-facing message and the raw detail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    /// Failure classification
    pub kind: ProviderErrorKind,
    /// Human-readable message, the provider's own when it sent one
    pub message: String,
    /// Raw underlying detail for diagnostics
    pub detail: String,
}

impl ProviderError {
    /// Create a provider error
    #[must_use]
    pub fn new(
        kind: ProviderErrorKind,
        message: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: detail.into(),
        }
    }

    /// Error with the generic fallback message
    #[must_use]
    pub fn generic(kind: ProviderErrorKind, detail: impl Into<String>) -> Self {
        Self::new(kind, GENERIC_PROVIDER_MESSAGE, detail)
    }

    /// Timeout error
    #[must_use]
    pub fn timeout(detail: impl Into<String>) -> Self {
        Self::new(
            ProviderErrorKind::Timeout,
            "Request to the AI provider timed out",
            detail,
        )
    }
}

/// Single-turn generative-text provider.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Model the provider calls
    fn model(&self) -> &str;

    /// Generate an answer for `prompt` using `credential`.
    ///
    /// Exactly one outbound call is made; there is no retry.
    async fn generate(&self, credential: &ApiKey, prompt: &Prompt) -> ProviderResult;
}
