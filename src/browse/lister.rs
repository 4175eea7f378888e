//! One-level directory listing.

use std::fs::{self, Metadata};
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use super::BrowseError;

/// Directory entry type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Anything that is not a directory, including symlinks.
    File,
    /// A directory.
    Dir,
}

/// A directory entry with metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Entry name (not full path).
    pub name: String,
    /// Size in bytes (0 for directories).
    pub size: u64,
    /// Entry type.
    pub entry_type: EntryType,
    /// Last modified timestamp.
    pub modified: DateTime<Utc>,
}

impl DirectoryEntry {
    fn from_metadata(name: String, metadata: &Metadata) -> Self {
        let (entry_type, size) = if metadata.is_dir() {
            (EntryType::Dir, 0)
        } else {
            (EntryType::File, metadata.len())
        };

        Self {
            name,
            size,
            entry_type,
            modified: to_utc(metadata.modified().ok()),
        }
    }
}

/// Result of listing a directory: the directory itself and its immediate
/// children, sorted by name.
#[derive(Debug, Clone)]
pub struct Listing {
    /// The listed directory.
    pub root: DirectoryEntry,
    /// Immediate children.
    pub children: Vec<DirectoryEntry>,
}

/// List the immediate contents of `path`.
///
/// Failing to open `path` as a directory yields `DirectoryNotFound`; an error
/// while iterating yields `DirectoryRead`. Children whose metadata cannot be
/// read are left out. Metadata is read without following symlinks.
pub fn list_directory(path: &Path) -> Result<Listing, BrowseError> {
    let reader = fs::read_dir(path).map_err(|e| {
        debug!(path = %path.display(), error = %e, "Failed to open directory");
        BrowseError::DirectoryNotFound
    })?;

    let mut children = Vec::new();
    for entry in reader {
        let entry = entry.map_err(BrowseError::DirectoryRead)?;
        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                debug!(
                    entry = %entry.path().display(),
                    error = %e,
                    "Skipping entry with unreadable metadata"
                );
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        children.push(DirectoryEntry::from_metadata(name, &metadata));
    }
    children.sort_by(|a, b| a.name.cmp(&b.name));

    let modified = fs::metadata(path).and_then(|m| m.modified()).ok();
    let root = DirectoryEntry {
        name: base_name(path),
        size: 0,
        entry_type: EntryType::Dir,
        modified: to_utc(modified),
    };

    Ok(Listing { root, children })
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn to_utc(time: Option<SystemTime>) -> DateTime<Utc> {
    time.map(DateTime::<Utc>::from)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
