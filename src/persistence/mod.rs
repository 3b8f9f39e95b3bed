//! Key-value persistence
//!
//! Features:
//! - `KeyValueStore` capability (load/save string values by key)
//! - In-memory store for tests and headless runs
//! - Meta/settings codec with fallback defaults on missing or corrupt values
//!
//! Browser LocalStorage and the native JSON file live in `platform::storage`.

pub mod codec;

use std::collections::HashMap;
use std::fmt;

pub use codec::{keys, load_meta, load_settings, save_meta, save_settings};

/// Why a write did not reach durable storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No backing store (private browsing, missing window)
    Unavailable,
    /// The backend refused the write (quota, I/O)
    Write(String),
    /// A value could not be encoded
    Encode(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "storage unavailable"),
            StorageError::Write(msg) => write!(f, "storage write failed: {}", msg),
            StorageError::Encode(msg) => write!(f, "could not encode value: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// Durable string storage keyed by name
pub trait KeyValueStore {
    /// Stored value, `None` if missing or unreadable
    fn load(&self, key: &str) -> Option<String>;
    /// Overwrite the full value under `key`
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Volatile store backed by a map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without counting it as a write
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of `save` calls so far
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.writes += 1;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}
