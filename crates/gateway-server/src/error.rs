//! API error type and its JSON rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gateway_core::{ErrorResponse, GatewayError};
use thiserror::Error;

/// Message used for every unexpected failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// An error rendered as a status code plus `{error, details?}` body.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status
    pub status: StatusCode,
    /// User-facing message
    pub message: String,
    /// Diagnostic detail
    pub details: Option<String>,
}

impl ApiError {
    /// Create an error with a status and message
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 500 with the generic message and the given details
    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE).with_details(details)
    }

    /// Attach details
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::MissingMessage | GatewayError::MissingCredential => {
                Self::bad_request(err.to_string())
            }
            GatewayError::Provider(provider) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, provider.message)
                    .with_details(provider.detail)
            }
            GatewayError::Internal { message } => Self::internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Errors that stop the server itself.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listener could not be bound
    #[error("Failed to bind {address}: {source}")]
    Bind {
        /// Requested address
        address: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The accept loop failed
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}
