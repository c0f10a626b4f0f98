//! Storage error types.
//!
//! Only a document that cannot be read at all is a hard error. Per-entry
//! problems (missing keys, unresolved definition ids, duplicates) degrade to
//! skip-and-warn so a partially corrupt snapshot still imports.

use thiserror::Error;

/// Errors from reading a snapshot document.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The document is not JSON at all.
    #[error("snapshot is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but the root is not an object.
    #[error("snapshot root must be a JSON object")]
    NotAnObject,
}
