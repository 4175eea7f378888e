//! Authentication handlers.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};
use axum_extra::extract::CookieJar;
use std::sync::Arc;

use crate::auth::{verify_password, verify_placeholder, SessionError};
use crate::web::cookie::{expired_cookie, session_cookie, SESSION_COOKIE_NAME};
use crate::web::dto::{parse_body, ApiResponse, LoginRequest, SessionReply};
use crate::web::error::ApiError;
use crate::web::middleware::CurrentSession;

use super::AppState;

/// POST /api/v1/auth/login - User login.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    body: Result<Bytes, BytesRejection>,
) -> Result<(CookieJar, Json<ApiResponse<SessionReply>>), ApiError> {
    let LoginRequest { username, password } = parse_body(body)?;

    let user = match state.backend.get_user(&username) {
        Ok(user) => Some(user),
        Err(SessionError::UserNotFound) => None,
        Err(e) => return Err(e.into()),
    };

    // Unknown users still pay for one Argon2 verification.
    let verified = tokio::task::spawn_blocking(move || match user {
        Some(user) => verify_password(&password, &user.password_hash).is_ok(),
        None => {
            verify_placeholder(&password);
            false
        }
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Password verification task failed");
        ApiError::internal("internal server error")
    })?;

    if !verified {
        tracing::warn!(username = %username, "Login failed");
        return Err(SessionError::InvalidCredentials.into());
    }

    let session = state.backend.create_session(&username)?;
    tracing::info!(username = %username, session = session.log_id(), "Login succeeded");

    let reply = SessionReply::from(&session);
    Ok((jar.add(session_cookie(&session)), Json(ApiResponse::new(reply))))
}

/// POST /api/v1/auth/logout - User logout.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<()>>), ApiError> {
    let Some(cookie) = jar.get(SESSION_COOKIE_NAME) else {
        return Ok((jar, Json(ApiResponse::empty())));
    };

    let id = cookie.value().to_string();
    state.backend.delete_session(&id).map_err(|e| {
        tracing::error!(error = %e, "Failed to delete session");
        ApiError::internal("failed to delete session")
    })?;
    tracing::info!(session = short_id(&id), "Logged out");

    Ok((jar.add(expired_cookie()), Json(ApiResponse::empty())))
}

/// GET /api/v1/auth/me - Current session.
pub async fn me(CurrentSession(session): CurrentSession) -> Json<ApiResponse<SessionReply>> {
    Json(ApiResponse::new(SessionReply::from(&session)))
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
