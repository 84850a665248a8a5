//! JSON-file-backed key-value store
//!
//! The whole state is one flat JSON object. Every write rewrites the file via
//! a sibling temp file and a rename, so a crash never leaves half a document.

use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use application::{ApplicationError, KeyValueStorePort};
use parking_lot::RwLock;
use tracing::{debug, instrument, warn};

use super::error::StorageError;

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    #[instrument]
    pub fn open(path: impl AsRef<Path> + std::fmt::Debug) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No state file yet");
                BTreeMap::new()
            },
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let raw = serde_json::to_string_pretty(values)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl KeyValueStorePort for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, ApplicationError> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ApplicationError> {
        let mut values = self.values.write();
        values.insert(key.to_string(), value.to_string());
        self.persist(&values).map_err(|e| {
            warn!(error = %e, key, "Failed to persist state");
            e.into()
        })
    }

    fn remove(&self, key: &str) -> Result<(), ApplicationError> {
        let mut values = self.values.write();
        if values.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&values).map_err(Into::into)
    }
}
