//! Credential resolution.
//!
//! A request may carry its own provider key; otherwise the key configured
//! for the process is used. The resolver is a pure precedence function and
//! never touches the environment itself: the fallback key is injected when
//! the resolver is built.

use crate::error::GatewayError;
use crate::types::ApiKey;
use std::fmt;

/// Where a resolved credential came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Supplied in the request body
    Request,
    /// Process-wide configured fallback
    Configured,
}

impl CredentialSource {
    /// Label used in logs and metrics
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Configured => "configured",
        }
    }
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A credential together with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCredential {
    /// The key to present to the provider
    pub key: ApiKey,
    /// Where the key came from
    pub source: CredentialSource,
}

/// Picks the credential for a provider call.
#[derive(Debug, Clone, Default)]
pub struct CredentialResolver {
    fallback: Option<ApiKey>,
}

impl CredentialResolver {
    /// Create a resolver with an optional process-wide fallback key.
    #[must_use]
    pub fn new(fallback: Option<ApiKey>) -> Self {
        Self { fallback }
    }

    /// Whether a fallback key is configured.
    #[must_use]
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Resolve the credential for one call.
    ///
    /// A non-blank request key wins over the configured one.
    ///
    /// # Errors
    /// Returns [`GatewayError::MissingCredential`] when neither is available.
    pub fn resolve(&self, supplied: Option<&ApiKey>) -> Result<ResolvedCredential, GatewayError> {
        if let Some(key) = supplied {
            return Ok(ResolvedCredential {
                key: key.clone(),
                source: CredentialSource::Request,
            });
        }

        self.fallback
            .as_ref()
            .map(|key| ResolvedCredential {
                key: key.clone(),
                source: CredentialSource::Configured,
            })
            .ok_or(GatewayError::MissingCredential)
    }
}
