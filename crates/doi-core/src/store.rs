//! Persistence seams: a key/value object store for session snapshots and
//! plain-file JSON download/upload for moving declarations between
//! machines.

use serde::{Serialize, de::DeserializeOwned};
use std::{collections::HashMap, fs, path::Path};
use thiserror::Error as ThisError;

///
/// StoreError
///

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("no object stored under key '{key}'")]
    NotFound { key: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

///
/// ObjectStore
///
/// Where session snapshots live. Implementations only move strings; the
/// JSON (de)serialization is provided here so every backend round-trips
/// identically.
///

pub trait ObjectStore {
    fn put(&mut self, key: &str, body: String) -> Result<(), StoreError>;

    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn save_object<T: Serialize>(&mut self, key: &str, object: &T) -> Result<(), StoreError> {
        let body = serde_json::to_string(object)?;
        self.put(key, body)
    }

    fn load_object<T: DeserializeOwned>(&self, key: &str) -> Result<T, StoreError> {
        let body = self.get(key)?.ok_or_else(|| StoreError::NotFound {
            key: key.to_string(),
        })?;

        Ok(serde_json::from_str(&body)?)
    }
}

///
/// MemoryStore
///

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    objects: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }
}

impl ObjectStore for MemoryStore {
    fn put(&mut self, key: &str, body: String) -> Result<(), StoreError> {
        self.objects.insert(key.to_string(), body);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.objects.get(key).cloned())
    }
}

/// Write `object` to `path` as pretty-printed JSON.
pub fn download<T: Serialize>(path: impl AsRef<Path>, object: &T) -> Result<(), StoreError> {
    let body = serde_json::to_string_pretty(object)?;
    fs::write(path, body)?;

    Ok(())
}

/// Read a JSON file back into `T`.
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, StoreError> {
    let body = fs::read_to_string(path)?;

    Ok(serde_json::from_str(&body)?)
}

///
/// TESTS
///
