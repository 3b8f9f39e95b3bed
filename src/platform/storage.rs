//! Durable storage backends
//!
//! - Web: `window.localStorage`
//! - Native: a single JSON object file, rewritten through a temp file on
//!   every save

use crate::persistence::{KeyValueStore, StorageError};

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - progress will not persist");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::collections::BTreeMap;
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use super::{KeyValueStore, StorageError};

    /// Key-value pairs kept in one JSON file
    #[derive(Debug)]
    pub struct FileStore {
        path: PathBuf,
        values: BTreeMap<String, String>,
    }

    impl FileStore {
        /// Open (or start) a store at `path`
        ///
        /// A missing file is an empty store; an unreadable or corrupt one is
        /// logged and also treated as empty.
        pub fn open(path: impl AsRef<Path>) -> Self {
            let path = path.as_ref().to_path_buf();
            let values = match fs::read_to_string(&path) {
                Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                    log::warn!("Save file {} is corrupt ({}), starting fresh", path.display(), e);
                    BTreeMap::new()
                }),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    log::info!("No save file at {}, starting fresh", path.display());
                    BTreeMap::new()
                }
                Err(e) => {
                    log::warn!("Could not read {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            };
            Self { path, values }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn flush(&self) -> Result<(), StorageError> {
            let json = serde_json::to_string_pretty(&self.values)
                .map_err(|e| StorageError::Encode(e.to_string()))?;
            let tmp = self.path.with_extension("tmp");
            fs::write(&tmp, json).map_err(|e| StorageError::Write(e.to_string()))?;
            fs::rename(&tmp, &self.path).map_err(|e| StorageError::Write(e.to_string()))
        }
    }

    impl KeyValueStore for FileStore {
        fn load(&self, key: &str) -> Option<String> {
            self.values.get(key).cloned()
        }

        fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.values.insert(key.to_string(), value.to_string());
            self.flush()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn scratch_path(name: &str) -> PathBuf {
            let dir = std::env::temp_dir().join(format!("waddle-wings-{}-{}", name, std::process::id()));
            fs::create_dir_all(&dir).unwrap();
            dir.join("save.json")
        }

        #[test]
        fn test_missing_file_is_empty() {
            let path = scratch_path("missing");
            let _ = fs::remove_file(&path);
            let store = FileStore::open(&path);
            assert_eq!(store.load("ww_coins"), None);
        }

        #[test]
        fn test_values_survive_reopen() {
            let path = scratch_path("reopen");
            let mut store = FileStore::open(&path);
            store.save("ww_coins", "42").unwrap();
            store.save("ww_skin", "neon").unwrap();

            let reopened = FileStore::open(&path);
            assert_eq!(reopened.load("ww_coins").as_deref(), Some("42"));
            assert_eq!(reopened.load("ww_skin").as_deref(), Some("neon"));
        }

        #[test]
        fn test_corrupt_file_starts_fresh() {
            let path = scratch_path("corrupt");
            fs::write(&path, "{{{{").unwrap();
            let mut store = FileStore::open(&path);
            assert_eq!(store.load("ww_best"), None);
            store.save("ww_best", "7").unwrap();
            assert_eq!(FileStore::open(&path).load("ww_best").as_deref(), Some("7"));
        }
    }
}
