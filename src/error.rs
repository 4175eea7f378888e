//! Error types for fsbrowse.

use thiserror::Error;

use crate::auth::SessionError;

/// Common error type for fsbrowse.
#[derive(Error, Debug)]
pub enum FsBrowseError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication backend error.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// Validation error for configuration or startup input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// TLS setup error.
    #[error("TLS error: {0}")]
    Tls(String),
}

impl FsBrowseError {
    /// True if this is an I/O error for a path that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FsBrowseError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Result type alias for fsbrowse operations.
pub type Result<T> = std::result::Result<T, FsBrowseError>;
