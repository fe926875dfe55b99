//! Storage error types for cro-store.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the persistence layer underneath a [`crate::ReportStore`].
///
/// These are absorbed inside the store and only ever logged.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the slot file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The history could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The slot refused the operation (quota exceeded, storage disabled).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
