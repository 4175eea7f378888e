//! fsbrowse - remote directory browser
//!
//! Serves a JSON API over HTTPS that lets authenticated users list the
//! contents of a single confined directory tree.

pub mod auth;
pub mod browse;
pub mod config;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    hash_password, verify_password, AuthBackend, PasswordError, Session, SessionError,
    SessionStore, UserRecord,
};
pub use browse::{list_directory, resolve_path, BrowseError};
pub use config::Config;
pub use error::{FsBrowseError, Result};
pub use web::{AppState, WebServer};
