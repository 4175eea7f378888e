//! Authentication module for fsbrowse.
//!
//! This module provides:
//! - Password hashing using Argon2id
//! - Session records with a fixed 30 minute lifetime
//! - The in-memory `SessionStore` behind the `AuthBackend` trait

mod password;
mod session;
mod store;

pub use password::{
    check_hash_format, hash_password, verify_password, verify_placeholder, warm_placeholder,
    PasswordError,
};
pub use session::{AuthBackend, Session, SessionError, UserRecord, SESSION_MAX_AGE_SECS};
pub use store::SessionStore;
