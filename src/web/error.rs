//! API error handling for fsbrowse.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::SessionError;
use crate::browse::BrowseError;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Unauthorized (401).
    Unauthorized,
    /// Not found (404).
    NotFound,
    /// Request body over the size limit (413).
    PayloadTooLarge,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error envelope: `{"status": "error", "error": {...}}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Always `"error"`.
    pub status: &'static str,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// HTTP reason phrase.
    pub title: String,
    /// Short, fixed message for clients.
    pub detail: String,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    detail: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: detail.into(),
        }
    }

    /// Create a bad request error.
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, detail)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, detail)
    }

    /// Create a not found error.
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, detail)
    }

    /// Create an internal server error.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, detail)
    }

    /// Malformed or undecodable JSON body.
    pub fn invalid_body() -> Self {
        Self::bad_request("invalid request payload")
    }

    /// Body rejected by the request size limit.
    pub fn body_too_large() -> Self {
        Self::new(ErrorCode::PayloadTooLarge, "request body too large")
    }

    /// Error code of this error.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Client-facing detail message.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            status: "error",
            error: ErrorDetail {
                title: status.canonical_reason().unwrap_or("Error").to_string(),
                detail: self.detail,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.detail)
    }
}

impl std::error::Error for ApiError {}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::AuthRequired
            | SessionError::SessionNotFound
            | SessionError::SessionExpired => ApiError::unauthorized(err.to_string()),
            SessionError::UserNotFound | SessionError::InvalidCredentials => {
                ApiError::unauthorized(SessionError::InvalidCredentials.to_string())
            }
            SessionError::SessionCreation => ApiError::internal(err.to_string()),
            SessionError::Hashing(_) | SessionError::StoreUnavailable => {
                tracing::error!("Session store error: {}", err);
                ApiError::internal("internal server error")
            }
        }
    }
}

impl From<BrowseError> for ApiError {
    fn from(err: BrowseError) -> Self {
        match err {
            BrowseError::InvalidPath | BrowseError::DirectoryNotFound => {
                ApiError::bad_request(err.to_string())
            }
            BrowseError::DirectoryRead(e) => {
                tracing::error!(error = %e, "Directory read failed");
                ApiError::internal("failed to read directory")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    #[test]
    fn test_error_code_status() {
        assert_eq!(ErrorCode::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ErrorCode::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::PayloadTooLarge.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ErrorCode::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_session_error_mapping() {
        let err = ApiError::from(SessionError::SessionExpired);
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.detail(), "session expired");

        let unknown_user = ApiError::from(SessionError::UserNotFound);
        let wrong_password = ApiError::from(SessionError::InvalidCredentials);
        assert_eq!(unknown_user.detail(), wrong_password.detail());
        assert_eq!(unknown_user.code(), ErrorCode::Unauthorized);

        let err = ApiError::from(SessionError::SessionCreation);
        assert_eq!(err.code(), ErrorCode::InternalError);

        let err = ApiError::from(SessionError::Hashing("argon2 exploded".to_string()));
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(!err.detail().contains("argon2"));
    }

    #[test]
    fn test_browse_error_mapping() {
        let err = ApiError::from(BrowseError::InvalidPath);
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert_eq!(err.detail(), "invalid path");

        let err = ApiError::from(BrowseError::DirectoryNotFound);
        assert_eq!(err.code(), ErrorCode::BadRequest);

        let io = std::io::Error::new(std::io::ErrorKind::Other, "/secret/path: EIO");
        let err = ApiError::from(BrowseError::DirectoryRead(io));
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.detail(), "failed to read directory");
    }

    #[tokio::test]
    async fn test_error_envelope() {
        let response = ApiError::bad_request("invalid path").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"]["title"], "Bad Request");
        assert_eq!(body["error"]["detail"], "invalid path");
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_body_too_large_envelope() {
        let response = ApiError::body_too_large().into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"]["title"], "Payload Too Large");
        assert_eq!(body["error"]["detail"], "request body too large");
    }
}
