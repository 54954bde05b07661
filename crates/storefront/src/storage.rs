//! Local key-value storage collaborators.
//!
//! The cart store writes its whole state under a single key after every
//! mutation and reads it back at startup. [`Storage`] is the narrow
//! contract it depends on; [`FileStorage`] backs the running storefront and
//! [`MemoryStorage`] backs tests.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Storage failures. None of these are fatal to the storefront.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("storage quota exceeded writing key {key} ({needed} bytes, {quota} allowed)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },
}

/// A synchronous string key-value store.
pub trait Storage {
    /// Read the value for `key`. Absence is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// In-memory storage with an optional total byte quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the combined size of all stored values.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            values: HashMap::new(),
            quota: Some(quota),
        }
    }

    /// Seed a value directly, bypassing the quota.
    #[must_use]
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Read a value without going through the trait.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn used_excluding(&self, key: &str) -> usize {
        self.values
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len())
            .sum()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let needed = self.used_excluding(key) + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a temporary sibling file that is renamed into place, so a
/// crash mid-write never leaves a truncated value behind.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir` as the storage root. The directory is created lazily on
    /// first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_err)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)
    }
}
