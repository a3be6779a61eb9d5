//! Worktrip - a two-list to-do tracker for the terminal
//!
//! Keep Work tasks and Travel plans apart, mark them done, rename them, and
//! keep everything on the local disk.
//!
//! # Overview
//!
//! Items live in an [`ItemStore`], a flat id → item mapping. Every mutation
//! is a pure transform that returns a new store; callers then write the whole
//! snapshot through a [`TodoRepo`] into a [`KeyValueStore`]. The current
//! [`Mode`] (Work or Travel) is persisted under its own key.
//!
//! | Piece | Purpose |
//! |-------|---------|
//! | [`model`] | `Item`, `ItemId`, `Mode` |
//! | [`store`] | Pure item-store transforms |
//! | [`storage`] | Key-value backends (file, memory) |
//! | [`repo`] | Snapshot persistence over two storage keys |
//! | [`tui`] | ratatui front end (TEA: msg, update, view) |
//!
//! # Quick Start
//!
//! ```no_run
//! use worktrip::{MemoryStore, Mode, TodoRepo};
//!
//! let repo = TodoRepo::with_default_keys(MemoryStore::default());
//! let items = repo.load_items().unwrap();
//!
//! if let Some((items, id)) = items.add("Buy milk", Mode::Work, worktrip::model::now_millis()) {
//!     repo.save_items(&items).unwrap();
//!     println!("added {}", id);
//! }
//! ```

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod storage;
pub mod store;
pub mod tui;

pub use config::{Config, ConfigError, LoggingConfig, StorageConfig, UiConfig};
pub use model::{Item, ItemId, Mode};
pub use repo::{RepoError, TodoRepo};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{ItemStore, StoreError};
