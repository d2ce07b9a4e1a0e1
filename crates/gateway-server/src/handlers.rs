//! HTTP request handlers for the gateway API.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use gateway_core::{ChatRequest, ChatResponse, ProbeRequest, ProbeResponse};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::{
    error::ApiError,
    extractors::{BodyRejection, JsonBody, RequestId},
    state::AppState,
};

/// Metric label for `POST /chat`
pub const CHAT_ENDPOINT: &str = "chat";
/// Metric label for `POST /test-provider`
pub const PROBE_ENDPOINT: &str = "test_provider";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: &'static str,
    /// Version
    pub version: &'static str,
    /// Provider name
    pub provider: String,
    /// Model in use
    pub model: String,
    /// Whether a configured credential is available
    pub provider_configured: bool,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.assistant.provider_name().to_string(),
        model: state.assistant.model().to_string(),
        provider_configured: state.assistant.has_configured_credential(),
    })
}

/// Metrics endpoint (Prometheus format)
pub async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.gather(),
    )
}

/// `POST /chat`: answer one message.
#[instrument(skip_all, fields(request_id = %request_id))]
pub async fn chat(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    body: Result<JsonBody<ChatRequest>, BodyRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let JsonBody(request) = body.map_err(|rejection| {
        error!(error = %rejection.0, "Unreadable chat request body");
        state.metrics.record_request(CHAT_ENDPOINT, "internal");
        ApiError::from(rejection)
    })?;

    match state.assistant.chat(&request).await {
        Ok(answer) => {
            state.metrics.record_request(CHAT_ENDPOINT, "success");
            info!(answer_len = answer.len(), "Chat answered");
            Ok(Json(ChatResponse::new(answer)))
        }
        Err(err) => {
            state.metrics.record_request(CHAT_ENDPOINT, err.outcome());
            if err.is_client_error() {
                warn!(outcome = err.outcome(), "Chat request rejected");
            } else {
                error!(outcome = err.outcome(), error = %err, "Chat request failed");
            }
            Err(err.into())
        }
    }
}

/// `POST /test-provider`: check a credential end to end.
///
/// Always answers 200; the outcome is in the body.
#[instrument(skip_all, fields(request_id = %request_id))]
pub async fn test_provider(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    body: Result<JsonBody<ProbeRequest>, BodyRejection>,
) -> Json<ProbeResponse> {
    let response = match body {
        Ok(JsonBody(request)) => state.assistant.probe(&request).await,
        Err(rejection) => {
            warn!(error = %rejection.0, "Unreadable probe request body");
            ProbeResponse::failure("Invalid request body")
        }
    };

    let outcome = if response.success { "success" } else { "failure" };
    state.metrics.record_request(PROBE_ENDPOINT, outcome);
    info!(success = response.success, "Provider probe finished");

    Json(response)
}
