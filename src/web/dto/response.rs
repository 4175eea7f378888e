//! Response DTOs for Web API.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::auth::Session;
use crate::browse::{DirectoryEntry, EntryType, Listing};

/// Success envelope: `{"status": "ok", "data": ...}`.
///
/// `data` is omitted when there is no payload.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always `"ok"`.
    pub status: &'static str,
    /// Response data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self {
            status: "ok",
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Create a response without a payload.
    pub fn empty() -> Self {
        Self {
            status: "ok",
            data: None,
        }
    }
}

/// Session summary returned by login and `/auth/me`.
#[derive(Debug, Serialize)]
pub struct SessionReply {
    /// Username.
    pub username: String,
    /// Session expiry.
    pub expires: DateTime<Utc>,
}

impl From<&Session> for SessionReply {
    fn from(session: &Session) -> Self {
        Self {
            username: session.username.clone(),
            expires: session.expires_at,
        }
    }
}

/// A node in the directory tree response.
///
/// Only the listed directory carries `contents`.
#[derive(Debug, Serialize)]
pub struct FileNode {
    /// Entry name.
    pub name: String,
    /// Size in bytes (0 for directories).
    pub size: u64,
    /// `file` or `dir`.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Last modification time.
    pub modified: DateTime<Utc>,
    /// Immediate children of the listed directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<Vec<FileNode>>,
}

impl From<DirectoryEntry> for FileNode {
    fn from(entry: DirectoryEntry) -> Self {
        Self {
            name: entry.name,
            size: entry.size,
            entry_type: entry.entry_type,
            modified: entry.modified,
            contents: None,
        }
    }
}

impl From<Listing> for FileNode {
    fn from(listing: Listing) -> Self {
        let contents = listing.children.into_iter().map(FileNode::from).collect();
        Self {
            contents: Some(contents),
            ..FileNode::from(listing.root)
        }
    }
}
