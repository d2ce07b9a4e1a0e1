//! Error types for the gateway.

use crate::provider::ProviderError;
use thiserror::Error;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors produced while answering a request.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The message field was absent or blank
    #[error("Message is required")]
    MissingMessage,

    /// No credential in the request and none configured
    #[error("API key is not provided")]
    MissingCredential,

    /// The provider call failed
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Anything not anticipated above, such as an undecodable body
    #[error("Internal server error: {message}")]
    Internal {
        /// Diagnostic detail
        message: String,
    },
}

impl GatewayError {
    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the caller is at fault
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingMessage | Self::MissingCredential)
    }

    /// Label used in logs and metrics
    #[must_use]
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::MissingMessage => "missing_message",
            Self::MissingCredential => "missing_credential",
            Self::Provider(err) => err.kind.as_str(),
            Self::Internal { .. } => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderErrorKind;

    #[test]
    fn test_client_error_messages() {
        assert_eq!(GatewayError::MissingMessage.to_string(), "Message is required");
        assert_eq!(
            GatewayError::MissingCredential.to_string(),
            "API key is not provided"
        );
        assert!(GatewayError::MissingMessage.is_client_error());
        assert!(GatewayError::MissingCredential.is_client_error());
    }

    #[test]
    fn test_provider_error_is_transparent() {
        let err: GatewayError =
            ProviderError::new(ProviderErrorKind::Quota, "Quota exceeded", "429").into();

        assert_eq!(err.to_string(), "Quota exceeded");
        assert!(!err.is_client_error());
        assert_eq!(err.outcome(), "quota");
    }

    #[test]
    fn test_internal_error() {
        let err = GatewayError::internal("bad body");
        assert!(!err.is_client_error());
        assert_eq!(err.outcome(), "internal");
    }
}
