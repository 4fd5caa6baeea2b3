use thiserror::Error;

use crate::clipboard::ClipboardError;
use crate::window::WindowId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("a window with id `{0}` already exists")]
    DuplicateId(WindowId),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
}

/// Umbrella error for callers that drive several subsystems at once.
#[derive(Debug, Error)]
pub enum WmError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}
