//! Directory browsing for fsbrowse.
//!
//! Client paths are resolved lexically against a trusted root and the
//! resulting directory is listed one level deep:
//! - `resolver`: percent-decoding, normalization and containment
//! - `lister`: one-pass directory enumeration with per-entry metadata

mod lister;
mod resolver;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use lister::{list_directory, DirectoryEntry, EntryType, Listing};
pub use resolver::{normalize, resolve_path};

use crate::{FsBrowseError, Result};

/// Errors produced while resolving or listing a client path.
#[derive(Debug, Error)]
pub enum BrowseError {
    /// The path failed decoding or the containment check.
    #[error("invalid path")]
    InvalidPath,

    /// The target could not be opened as a directory.
    #[error("directory not found")]
    DirectoryNotFound,

    /// Reading directory entries failed after the directory was opened.
    #[error("failed to read directory: {0}")]
    DirectoryRead(#[source] std::io::Error),
}

/// Check that `root` exists and is a directory, returning its canonical form.
pub fn validate_root(root: impl AsRef<Path>) -> Result<PathBuf> {
    let root = root.as_ref();
    let metadata = std::fs::metadata(root).map_err(|e| {
        FsBrowseError::Validation(format!("could not stat {}: {e}", root.display()))
    })?;
    if !metadata.is_dir() {
        return Err(FsBrowseError::Validation(format!(
            "provided path is not a directory: {}",
            root.display()
        )));
    }
    Ok(std::fs::canonicalize(root)?)
}
