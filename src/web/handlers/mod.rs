//! API handlers for the directory browser.

pub mod auth;
pub mod files;

pub use auth::*;
pub use files::*;

use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::AuthBackend;
use crate::web::error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Users and sessions.
    pub backend: Arc<dyn AuthBackend>,
    /// Canonical directory that listings are confined to.
    pub root_dir: PathBuf,
}

impl AppState {
    /// Create a new application state.
    pub fn new(backend: Arc<dyn AuthBackend>, root_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            root_dir: root_dir.into(),
        }
    }
}

/// Fallback for unmatched `/api` routes.
pub async fn api_not_found() -> ApiError {
    ApiError::not_found("not found")
}
