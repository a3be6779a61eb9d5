//! Key-value storage backends
//!
//! The app persists two string values under two keys. [`FileStore`] keeps
//! them in a single JSON document on disk; [`MemoryStore`] keeps them in a
//! map and can be told to fail writes, for exercising error paths.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("storage document {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode storage document: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("storage is unavailable")]
    Unavailable,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// String key-value storage
pub trait KeyValueStore {
    /// Read a value. Missing keys are `Ok(None)`.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing whatever was there.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// All keys in one pretty-printed JSON object
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub const FILE_NAME: &'static str = "storage.json";

    /// Storage document inside `dir`. Nothing is touched until first use.
    pub fn open(dir: &Path) -> Self {
        Self {
            path: dir.join(Self::FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|source| {
                StorageError::Corrupt {
                    path: self.path.clone(),
                    source,
                }
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    /// Replace the document via a sibling temp file so readers never see a
    /// half-written one.
    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let contents = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }
}

/// In-process storage for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set_item` fail with [`StorageError::Unavailable`]
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.get() {
            return Err(StorageError::Unavailable);
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_missing_document_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path());
        assert_eq!(store.get_item("@toDos").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_set_then_get() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path());
        store.set_item("@location", "false").unwrap();
        store.set_item("@toDos", "{}").unwrap();

        let reopened = FileStore::open(dir.path());
        assert_eq!(reopened.get_item("@location").unwrap().as_deref(), Some("false"));
        assert_eq!(reopened.get_item("@toDos").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_file_store_overwrites_value() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path());
        store.set_item("k", "1").unwrap();
        store.set_item("k", "2").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("2"));
        assert!(!dir.path().join("storage.json.tmp").exists());
    }

    #[test]
    fn test_file_store_creates_missing_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::open(&nested);
        store.set_item("k", "v").unwrap();
        assert!(nested.join(FileStore::FILE_NAME).exists());
    }

    #[test]
    fn test_file_store_corrupt_document() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(FileStore::FILE_NAME), "{{{").unwrap();
        let store = FileStore::open(dir.path());
        assert!(matches!(
            store.get_item("k"),
            Err(StorageError::Corrupt { .. })
        ));
        assert!(store.set_item("k", "v").is_err());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_store_failing_writes() {
        let store = MemoryStore::new();
        store.fail_writes(true);
        assert!(matches!(
            store.set_item("k", "v"),
            Err(StorageError::Unavailable)
        ));
        assert_eq!(store.get_item("k").unwrap(), None);
    }
}
