//! Custom Axum extractors for the gateway.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;

/// Header carrying the request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id assigned by the request-id middleware, or read from the
/// incoming headers when the middleware did not run.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<Self>() {
            return Ok(id.clone());
        }

        let id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .or_else(|| parts.headers.get("x-correlation-id"))
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map_or_else(|| uuid::Uuid::new_v4().to_string(), String::from);

        Ok(Self(id))
    }
}

/// JSON body extractor.
///
/// An empty body reads as `{}`, so a bodiless request is handled like one
/// with every field absent.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

/// The body could not be read or was not valid JSON for the target type.
#[derive(Debug, Clone)]
pub struct BodyRejection(pub String);

impl From<BodyRejection> for ApiError {
    fn from(rejection: BodyRejection) -> Self {
        Self::internal(rejection.0)
    }
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = axum::body::Bytes::from_request(req, state)
            .await
            .map_err(|e| BodyRejection(format!("Failed to read request body: {e}")))?;

        let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        let value: T = serde_json::from_slice(raw).map_err(|e| {
            debug!(error = %e, "JSON parse error");
            BodyRejection(format!("Invalid JSON: {e}"))
        })?;

        Ok(Self(value))
    }
}
