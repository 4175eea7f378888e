//! Session cookie construction.

use axum_extra::extract::cookie::{Cookie, SameSite};
use cookie::time::{Duration, OffsetDateTime};

use crate::auth::{Session, SESSION_MAX_AGE_SECS};

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE_NAME: &str = "session_id";

/// Build the `session_id` cookie for a freshly issued session.
pub fn session_cookie(session: &Session) -> Cookie<'static> {
    let builder = Cookie::build((SESSION_COOKIE_NAME, session.id.clone()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict);

    match OffsetDateTime::from_unix_timestamp(session.expires_at.timestamp()) {
        Ok(expires) => builder.expires(expires).build(),
        Err(_) => builder
            .max_age(Duration::seconds(SESSION_MAX_AGE_SECS))
            .build(),
    }
}

/// Build a cookie that makes the browser drop `session_id`.
pub fn expired_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
}
