//! Storage errors and their mapping into the application layer

use std::path::PathBuf;

use application::ApplicationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("State file {path} is not a JSON object of strings: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<StorageError> for ApplicationError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e.to_string())
    }
}
