//! Snapshot persistence over a key-value store
//!
//! Items are written as one JSON snapshot under the items key after every
//! mutation; the mode is written as `"true"`/`"false"` under the mode key.
//! There is no delta persistence and no batching.

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::StorageConfig;
use crate::model::Mode;
use crate::storage::{KeyValueStore, StorageError};
use crate::store::ItemStore;

/// Error type for repository operations
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("malformed snapshot under {key}: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize items: {0}")]
    Encode(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RepoError>;

/// Reads and writes the two persisted values
#[derive(Debug)]
pub struct TodoRepo<S> {
    store: S,
    items_key: String,
    mode_key: String,
}

impl<S: KeyValueStore> TodoRepo<S> {
    pub fn new(store: S, config: &StorageConfig) -> Self {
        Self {
            store,
            items_key: config.items_key.clone(),
            mode_key: config.mode_key.clone(),
        }
    }

    pub fn with_default_keys(store: S) -> Self {
        Self::new(store, &StorageConfig::default())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the item snapshot. No snapshot yet means an empty store.
    pub fn load_items(&self) -> Result<ItemStore> {
        let Some(raw) = self.store.get_item(&self.items_key)? else {
            debug!(key = %self.items_key, "no item snapshot, starting empty");
            return Ok(ItemStore::new());
        };
        let items = ItemStore::from_json(&raw).map_err(|source| RepoError::Malformed {
            key: self.items_key.clone(),
            source,
        })?;
        debug!(count = items.len(), "loaded items");
        Ok(items)
    }

    /// Load the item snapshot, logging and falling back to an empty store on
    /// any failure. The next write-through replaces whatever was stored.
    pub fn load_items_or_empty(&self) -> ItemStore {
        self.load_items().unwrap_or_else(|e| {
            warn!(error = %e, "could not load items, starting empty");
            ItemStore::new()
        })
    }

    /// Write the full snapshot
    pub fn save_items(&self, items: &ItemStore) -> Result<()> {
        let json = items.to_json().map_err(RepoError::Encode)?;
        self.store
            .set_item(&self.items_key, &json)
            .inspect_err(|e| error!(error = %e, "failed to write items"))?;
        debug!(count = items.len(), "saved items");
        Ok(())
    }

    /// Load the persisted mode, defaulting to Work
    pub fn load_mode(&self) -> Result<Mode> {
        Ok(self
            .store
            .get_item(&self.mode_key)?
            .map(|value| Mode::from_stored(&value))
            .unwrap_or_default())
    }

    pub fn load_mode_or_default(&self) -> Mode {
        self.load_mode().unwrap_or_else(|e| {
            warn!(error = %e, "could not load mode, defaulting to Work");
            Mode::default()
        })
    }

    pub fn save_mode(&self, mode: Mode) -> Result<()> {
        self.store
            .set_item(&self.mode_key, mode.as_stored())
            .inspect_err(|e| error!(error = %e, "failed to write mode"))?;
        debug!(%mode, "saved mode");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};

    const T0: u64 = 1_700_000_000_000;

    #[test]
    fn test_load_items_empty_storage() {
        let repo = TodoRepo::with_default_keys(MemoryStore::new());
        assert!(repo.load_items().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_items() {
        let repo = TodoRepo::with_default_keys(MemoryStore::new());
        let (items, _) = ItemStore::new().add("Buy milk", Mode::Work, T0).unwrap();
        let (items, _) = items.add("Paris", Mode::Travel, T0 + 5).unwrap();
        repo.save_items(&items).unwrap();
        assert_eq!(repo.load_items().unwrap(), items);
    }

    #[test]
    fn test_items_written_under_configured_key() {
        let config = StorageConfig {
            items_key: "items".to_string(),
            mode_key: "mode".to_string(),
        };
        let repo = TodoRepo::new(MemoryStore::new(), &config);
        repo.save_items(&ItemStore::new()).unwrap();
        repo.save_mode(Mode::Travel).unwrap();
        assert_eq!(repo.store().get_item("items").unwrap().as_deref(), Some("{}"));
        assert_eq!(repo.store().get_item("mode").unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn test_malformed_snapshot() {
        let repo = TodoRepo::with_default_keys(MemoryStore::new());
        repo.store().set_item("@toDos", "{not json").unwrap();
        assert!(matches!(
            repo.load_items(),
            Err(RepoError::Malformed { .. })
        ));
        assert!(repo.load_items_or_empty().is_empty());
    }

    #[test]
    fn test_mode_defaults_to_work() {
        let repo = TodoRepo::with_default_keys(MemoryStore::new());
        assert_eq!(repo.load_mode().unwrap(), Mode::Work);
    }

    #[test]
    fn test_mode_round_trip() {
        let repo = TodoRepo::with_default_keys(MemoryStore::new());
        repo.save_mode(Mode::Travel).unwrap();
        assert_eq!(repo.load_mode().unwrap(), Mode::Travel);
        repo.save_mode(Mode::Work).unwrap();
        assert_eq!(repo.load_mode().unwrap(), Mode::Work);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let repo = TodoRepo::with_default_keys(MemoryStore::new());
        repo.store().fail_writes(true);
        assert!(matches!(
            repo.save_items(&ItemStore::new()),
            Err(RepoError::Storage(StorageError::Unavailable))
        ));
        assert!(repo.save_mode(Mode::Travel).is_err());
    }

    #[test]
    fn test_file_backed_repo_survives_reopen() {
        let dir = tempfile::TempDir::new().unwrap();
        let (items, id) = ItemStore::new().add("Paris", Mode::Travel, T0).unwrap();
        {
            let repo = TodoRepo::with_default_keys(FileStore::open(dir.path()));
            repo.save_items(&items).unwrap();
            repo.save_mode(Mode::Travel).unwrap();
        }
        let repo = TodoRepo::with_default_keys(FileStore::open(dir.path()));
        let loaded = repo.load_items().unwrap();
        assert_eq!(loaded.get(&id).unwrap().text, "Paris");
        assert_eq!(repo.load_mode().unwrap(), Mode::Travel);
    }
}
