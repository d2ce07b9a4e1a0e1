//! # Gateway Core
//!
//! Core types, traits, and error handling for the assistant gateway.
//!
//! This crate provides the foundational types used throughout the gateway:
//! - The redacted [`ApiKey`] credential and the [`CredentialResolver`]
//! - Request and response contract types for `/chat` and `/test-provider`
//! - The [`TextProvider`] abstraction over the generative-text backend
//! - Error types and handling

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod credentials;
pub mod error;
pub mod provider;
pub mod request;
pub mod response;
pub mod types;

// Re-export commonly used types
pub use credentials::{CredentialResolver, CredentialSource, ResolvedCredential};
pub use error::{GatewayError, GatewayResult};
pub use provider::{Prompt, ProviderError, ProviderErrorKind, ProviderResult, TextProvider};
pub use request::{ChatRequest, ProbeRequest};
pub use response::{ChatResponse, ErrorResponse, ProbeResponse};
pub use types::ApiKey;
