//! Shared application state.

use gateway_config::GatewayConfig;
use gateway_core::{CredentialResolver, TextProvider};
use gateway_telemetry::Metrics;
use std::sync::Arc;

use crate::assistant::Assistant;

/// State handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Chat and probe orchestration
    pub assistant: Arc<Assistant>,
    /// Request and provider metrics
    pub metrics: Arc<Metrics>,
    /// Origins allowed by CORS; empty allows any
    pub cors_allowed_origins: Arc<[String]>,
}

impl AppState {
    /// Build state from configuration and a provider.
    #[must_use]
    pub fn new(config: &GatewayConfig, provider: Arc<dyn TextProvider>, metrics: Arc<Metrics>) -> Self {
        let assistant = Assistant::new(
            CredentialResolver::new(config.fallback_api_key()),
            provider,
            Arc::clone(&metrics),
        )
        .with_request_timeout(config.server.request_timeout);

        Self {
            assistant: Arc::new(assistant),
            metrics,
            cors_allowed_origins: config.server.cors_allowed_origins.clone().into(),
        }
    }
}
