use std::path::PathBuf;

use thiserror::Error;

/// Failure of a key/value store operation.
///
/// Hooks built on stores treat these as recoverable: they log them and keep
/// using the in-memory value.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("quota exceeded writing '{key}': {needed} bytes needed, quota is {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    #[error("storage file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode value for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode value for '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
