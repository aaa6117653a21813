//! Local key-value storage for client-side state.
//!
//! The cart is kept in a single slot of a small synchronous key-value store,
//! the server-side stand-in for browser local storage. Two backends exist:
//!
//! - [`LocalStorage::Directory`] - one `<key>.json` file per key under a directory
//! - [`LocalStorage::Memory`] - a process-local map, used in tests or when no
//!   directory is configured
//!
//! Keys are restricted to ASCII alphanumerics, `-` and `_` so they map to
//! file names safely.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

/// Errors from the local key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Synchronous key-value store holding string values.
#[derive(Debug)]
pub enum LocalStorage {
    Directory(PathBuf),
    Memory(Mutex<HashMap<String, String>>),
}

impl LocalStorage {
    /// File-backed store rooted at `dir`. The directory is created lazily on
    /// first write.
    #[must_use]
    pub fn directory(dir: impl Into<PathBuf>) -> Self {
        Self::Directory(dir.into())
    }

    /// Empty in-memory store.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(Mutex::new(HashMap::new()))
    }

    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the key is invalid or the backing file
    /// exists but cannot be read.
    pub fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        match self {
            Self::Directory(dir) => {
                let path = slot_path(dir, key);
                match std::fs::read_to_string(&path) {
                    Ok(value) => Ok(Some(value)),
                    Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                    Err(source) => Err(StorageError::Io { path, source }),
                }
            }
            Self::Memory(map) => Ok(map
                .lock()
                .map_err(|_| StorageError::Poisoned)?
                .get(key)
                .cloned()),
        }
    }

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the key is invalid or the write fails.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        match self {
            Self::Directory(dir) => {
                std::fs::create_dir_all(dir).map_err(|source| StorageError::Io {
                    path: dir.clone(),
                    source,
                })?;
                let path = slot_path(dir, key);
                std::fs::write(&path, value).map_err(|source| StorageError::Io { path, source })
            }
            Self::Memory(map) => {
                map.lock()
                    .map_err(|_| StorageError::Poisoned)?
                    .insert(key.to_owned(), value.to_owned());
                Ok(())
            }
        }
    }

    /// Delete the value stored under `key`. Removing an absent key is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the key is invalid or the file cannot be
    /// removed.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        match self {
            Self::Directory(dir) => {
                let path = slot_path(dir, key);
                match std::fs::remove_file(&path) {
                    Ok(()) => Ok(()),
                    Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                    Err(source) => Err(StorageError::Io { path, source }),
                }
            }
            Self::Memory(map) => {
                map.lock()
                    .map_err(|_| StorageError::Poisoned)?
                    .remove(key);
                Ok(())
            }
        }
    }

    /// Short backend description for logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Directory(dir) => format!("directory {}", dir.display()),
            Self::Memory(_) => "memory".to_owned(),
        }
    }
}

fn slot_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{key}.json"))
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::{NamedTempFile, TempDir};

    use super::*;

    #[test]
    fn test_memory_round_trip() {
        let storage = LocalStorage::memory();
        assert_eq!(storage.get("cart").unwrap(), None);

        storage.set("cart", "[]").unwrap();
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("[]"));

        storage.remove("cart").unwrap();
        assert_eq!(storage.get("cart").unwrap(), None);
    }

    #[test]
    fn test_directory_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::directory(dir.path());

        assert_eq!(storage.get("cart").unwrap(), None);
        storage.set("cart", r#"[{"id":1}]"#).unwrap();
        assert!(dir.path().join("cart.json").exists());
        assert_eq!(
            storage.get("cart").unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );

        storage.remove("cart").unwrap();
        storage.remove("cart").unwrap();
        assert_eq!(storage.get("cart").unwrap(), None);
    }

    #[test]
    fn test_directory_write_failure_is_reported() {
        // A regular file where the directory should be makes every write fail.
        // A regular file where the directory should be makes every write fail.
        let blocker = NamedTempFile::new().unwrap();

        let storage = LocalStorage::directory(blocker.path());
        let err = storage.set("cart", "[]").unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let storage = LocalStorage::memory();
        for key in ["", "../cart", "a/b", "cart.json"] {
            assert!(matches!(
                storage.set(key, "x"),
                Err(StorageError::InvalidKey(_))
            ));
        }
    }
}
