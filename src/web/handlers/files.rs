//! Directory listing handler.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};
use std::sync::Arc;

use crate::browse::{list_directory, resolve_path};
use crate::web::dto::{parse_body, ApiResponse, FileNode, ListRequest};
use crate::web::error::ApiError;
use crate::web::middleware::CurrentSession;

use super::AppState;

/// POST /api/v1/files - List one directory below the served root.
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ApiResponse<FileNode>>, ApiError> {
    let ListRequest { path } = parse_body(body)?;
    tracing::debug!(username = %session.username, path = %path, "Listing directory");

    let root = state.root_dir.clone();
    let listing = tokio::task::spawn_blocking(move || {
        let target = resolve_path(&root, &path)?;
        list_directory(&target)
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Directory listing task failed");
        ApiError::internal("internal server error")
    })??;

    Ok(Json(ApiResponse::new(FileNode::from(listing))))
}
