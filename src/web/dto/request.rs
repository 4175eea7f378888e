//! Request DTOs for Web API.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::web::error::ApiError;

/// Login request. Missing fields decode as empty strings.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username.
    #[serde(default)]
    pub username: String,
    /// Password.
    #[serde(default)]
    pub password: String,
}

/// Directory listing request.
#[derive(Debug, Deserialize)]
pub struct ListRequest {
    /// Percent-encoded path relative to the served root.
    #[serde(default)]
    pub path: String,
}

/// Decode a JSON request body regardless of its `Content-Type`.
pub fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request body");
        ApiError::invalid_body()
    })
}

/// Decode a buffered request body, mapping extractor rejections to
/// [`ApiError`] so clients never see axum's rejection text.
pub fn parse_body<T: DeserializeOwned>(
    body: Result<Bytes, BytesRejection>,
) -> Result<T, ApiError> {
    let body = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Failed to buffer request body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::body_too_large()
        } else {
            ApiError::invalid_body()
        }
    })?;
    parse_json(&body)
}
