//! Error types for snapshot persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing a state snapshot.
///
/// Reading never produces an error; see `read_snapshot`.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot could not be serialized.
    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing the temp file or renaming it into place failed.
    #[error("Failed to write snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
