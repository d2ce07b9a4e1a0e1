//! Response types for the gateway.

use serde::{Deserialize, Serialize};

/// Successful `/chat` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Answer text
    pub response: String,
}

impl ChatResponse {
    /// Create a chat response
    #[must_use]
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

/// Error body shared by all status-coded failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// User-facing message
    pub error: String,
    /// Diagnostic detail, present on server-side failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Error without details
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    /// Attach details
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// `/test-provider` body. Failure is reported only through `success`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResponse {
    /// Whether the credential produced an answer
    pub success: bool,
    /// Status message
    pub message: String,
    /// Answer to the probe prompt, only on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl ProbeResponse {
    /// Successful probe
    #[must_use]
    pub fn success(message: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            response: Some(response.into()),
        }
    }

    /// Failed probe
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            response: None,
        }
    }
}
