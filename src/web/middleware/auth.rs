//! Session cookie authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use std::sync::Arc;

use crate::auth::{Session, SessionError};
use crate::web::cookie::{expired_cookie, SESSION_COOKIE_NAME};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Gate for protected routes.
///
/// Resolves the `session_id` cookie to a live session and stores it in the
/// request extensions for [`CurrentSession`].
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(cookie) = jar.get(SESSION_COOKIE_NAME) else {
        tracing::debug!(path = %request.uri().path(), "Request without session cookie");
        return ApiError::from(SessionError::AuthRequired).into_response();
    };

    let session = match state.backend.get_session_by_id(cookie.value()) {
        Ok(session) => session,
        Err(e) => {
            tracing::debug!(error = %e, "Session lookup rejected");
            return ApiError::from(e).into_response();
        }
    };

    // The store compares at second precision; this check uses the full clock.
    if session.is_expired() {
        if let Err(e) = state.backend.delete_session(&session.id) {
            tracing::warn!(session = session.log_id(), error = %e, "Failed to drop expired session");
        }
        tracing::info!(session = session.log_id(), "Session expired");
        return (
            jar.add(expired_cookie()),
            ApiError::from(SessionError::SessionExpired),
        )
            .into_response();
    }

    request.extensions_mut().insert(session);
    next.run(request).await
}

/// Extractor for the session attached by [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<Session>()
                .cloned()
                .map(CurrentSession)
                .ok_or_else(|| ApiError::from(SessionError::AuthRequired))
        })
    }
}
