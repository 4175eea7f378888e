//! Session and credential records, and the backend interface handlers use.

use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;
use thiserror::Error;

/// Session lifetime (30 minutes). Not extended by activity.
pub const SESSION_MAX_AGE_SECS: i64 = 30 * 60;

/// Session-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No user with the given name.
    #[error("user not found")]
    UserNotFound,

    /// Invalid credentials (wrong username or password).
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The request carried no session cookie.
    #[error("authorization required")]
    AuthRequired,

    /// Session not found.
    #[error("session not found")]
    SessionNotFound,

    /// Session has expired.
    #[error("session expired")]
    SessionExpired,

    /// A session could not be created.
    #[error("session creation failed")]
    SessionCreation,

    /// Password hashing failed while adding a user.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// The store lock was poisoned by a panicking holder.
    #[error("session store unavailable")]
    StoreUnavailable,
}

/// Stored credentials for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique login name.
    pub username: String,
    /// Argon2 PHC string.
    pub password_hash: String,
}

/// A live authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Opaque session token (UUID v4).
    pub id: String,
    /// Owning user.
    pub username: String,
    /// Absolute expiry, whole seconds.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a session for `username` issued now.
    pub fn new(username: impl Into<String>) -> Self {
        Self::issued_at(username, Utc::now())
    }

    /// Create a session issued at `now`, truncated to whole seconds.
    pub fn issued_at(username: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.into(),
            expires_at: now.trunc_subsecs(0) + chrono::Duration::seconds(SESSION_MAX_AGE_SECS),
        }
    }

    /// True if `expires_at` lies strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// True if the session has expired at the current instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Shortened id safe to put in logs.
    pub fn log_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

/// Authentication backend used by the HTTP layer.
///
/// `SessionStore` is the in-memory implementation; the trait lets handlers
/// and tests swap in other backends.
pub trait AuthBackend: Send + Sync {
    /// Look up a session, enforcing expiry.
    fn get_session_by_id(&self, id: &str) -> Result<Session, SessionError>;

    /// Create and store a new session for `username`.
    fn create_session(&self, username: &str) -> Result<Session, SessionError>;

    /// Remove a session. Absence is not an error.
    fn delete_session(&self, id: &str) -> Result<(), SessionError>;

    /// Replace the session stored under `id`.
    fn update_session(&self, id: &str, session: Session) -> Result<(), SessionError>;

    /// Look up a user's credentials.
    fn get_user(&self, username: &str) -> Result<UserRecord, SessionError>;

    /// Hash `password` and store or overwrite the user.
    fn add_user(&self, username: &str, password: &str) -> Result<(), SessionError>;
}
