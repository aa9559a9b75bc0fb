//! Persistence
//!
//! The cart and theme survive restarts as JSON snapshots written through a
//! [`SnapshotStorage`]. The catalog is never persisted.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use rustc_hash::FxHashMap;
use thiserror::Error;

pub mod bridge;
pub mod snapshot;

pub use bridge::{PersistenceBridge, Restored};
pub use snapshot::{CartSnapshot, LineRecord, SnapshotError, ThemeSnapshot};

/// Storage key for the cart snapshot.
pub const CART_KEY: &str = "cart";

/// Storage key for the theme snapshot.
pub const THEME_KEY: &str = "theme";

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying IO failure
    #[error("storage IO error: {0}")]
    Io(#[from] io::Error),

    /// A previous writer panicked while holding the storage lock
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Key-value storage for serialized snapshots.
pub trait SnapshotStorage: Send + Sync {
    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the value could not be written.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Load the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend could not be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
}

/// Process-local storage, mostly useful for tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<FxHashMap<String, String>>,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStorage for MemoryStorage {
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().map_err(|_err| StorageError::Poisoned)?;

        values.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().map_err(|_err| StorageError::Poisoned)?;

        Ok(values.get(key).cloned())
    }
}

/// Storage writing one `<key>.json` file per key into a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the snapshot files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotStorage for FileStorage {
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;

        // Snapshots are replaced by rename, never written in place.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StorageError::Io(error)),
        }
    }
}
