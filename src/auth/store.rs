//! In-memory session and credential store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{SubsecRound, Utc};
use tracing::{debug, info};

use super::password::{check_hash_format, hash_password};
use super::session::{AuthBackend, Session, SessionError, UserRecord};
use crate::config::UserConfig;

#[derive(Debug, Default)]
struct StoreState {
    users: HashMap<String, UserRecord>,
    sessions: HashMap<String, Session>,
}

/// In-memory authentication backend.
///
/// Users and sessions live behind a single mutex. Expired sessions are
/// removed lazily when they are looked up; there is no background sweep.
#[derive(Debug, Default)]
pub struct SessionStore {
    state: Mutex<StoreState>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, SessionError> {
        self.state.lock().map_err(|_| SessionError::StoreUnavailable)
    }

    /// Store a user whose password has already been hashed.
    pub fn add_user_with_hash(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<(), SessionError> {
        check_hash_format(password_hash).map_err(|e| SessionError::Hashing(e.to_string()))?;
        self.insert_user(username, password_hash.to_string())
    }

    fn insert_user(&self, username: &str, password_hash: String) -> Result<(), SessionError> {
        let mut state = self.lock()?;
        state.users.insert(
            username.to_string(),
            UserRecord {
                username: username.to_string(),
                password_hash,
            },
        );
        debug!(username = %username, "User added");
        Ok(())
    }

    /// Number of stored sessions, including expired ones not yet looked up.
    pub fn session_count(&self) -> Result<usize, SessionError> {
        Ok(self.lock()?.sessions.len())
    }

    /// Number of stored users.
    pub fn user_count(&self) -> Result<usize, SessionError> {
        Ok(self.lock()?.users.len())
    }

    /// Add every configured account, hashing plaintext passwords.
    ///
    /// Entries are expected to have passed `Config::validate`.
    pub fn seed(&self, users: &[UserConfig]) -> Result<usize, SessionError> {
        for user in users {
            match (&user.password_hash, &user.password) {
                (Some(hash), _) => self.add_user_with_hash(&user.username, hash)?,
                (None, Some(password)) => self.add_user(&user.username, password)?,
                (None, None) => {
                    return Err(SessionError::Hashing(format!(
                        "no credentials for {}",
                        user.username
                    )))
                }
            }
        }
        Ok(users.len())
    }
}

impl AuthBackend for SessionStore {
    fn get_session_by_id(&self, id: &str) -> Result<Session, SessionError> {
        let mut state = self.lock()?;

        let session = state
            .sessions
            .get(id)
            .cloned()
            .ok_or(SessionError::SessionNotFound)?;

        if session.is_expired_at(Utc::now().trunc_subsecs(0)) {
            state.sessions.remove(id);
            debug!(
                session = %session.log_id(),
                username = %session.username,
                "Removed expired session"
            );
            return Err(SessionError::SessionExpired);
        }

        Ok(session)
    }

    fn create_session(&self, username: &str) -> Result<Session, SessionError> {
        let session = Session::new(username);

        let mut state = self.lock()?;
        if state.sessions.contains_key(&session.id) {
            return Err(SessionError::SessionCreation);
        }
        state.sessions.insert(session.id.clone(), session.clone());

        info!(
            username = %username,
            session = %session.log_id(),
            expires_at = %session.expires_at,
            "Session created"
        );
        Ok(session)
    }

    fn delete_session(&self, id: &str) -> Result<(), SessionError> {
        let mut state = self.lock()?;
        if let Some(session) = state.sessions.remove(id) {
            info!(
                username = %session.username,
                session = %session.log_id(),
                "Session deleted"
            );
        }
        Ok(())
    }

    fn update_session(&self, id: &str, session: Session) -> Result<(), SessionError> {
        let mut state = self.lock()?;
        state.sessions.insert(id.to_string(), session);
        Ok(())
    }

    fn get_user(&self, username: &str) -> Result<UserRecord, SessionError> {
        let state = self.lock()?;
        state
            .users
            .get(username)
            .cloned()
            .ok_or(SessionError::UserNotFound)
    }

    fn add_user(&self, username: &str, password: &str) -> Result<(), SessionError> {
        // Hash before taking the lock.
        let password_hash =
            hash_password(password).map_err(|e| SessionError::Hashing(e.to_string()))?;
        self.insert_user(username, password_hash)
    }
}
