//! The item store (functional core)
//!
//! An [`ItemStore`] is an immutable-by-convention id → item mapping. Every
//! operation here is a pure transform: it takes the current store by
//! reference and returns a new one, leaving persistence to the caller.
//!
//! Rejected input (empty text) is reported as `None` so callers can skip the
//! write-through. Operations addressed by id look the id up explicitly and
//! return [`StoreError::NotFound`] instead of assuming it exists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Item, ItemId, Mode};

/// Error type for store operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no item with id {0}")]
    NotFound(ItemId),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Snapshot of all items in both lists
///
/// Iteration follows id order. Ids are millisecond timestamps of equal width,
/// so this is also creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemStore {
    items: BTreeMap<ItemId, Item>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, &Item)> {
        self.items.iter()
    }

    /// Items belonging to one list, in store order
    pub fn in_mode(&self, mode: Mode) -> impl Iterator<Item = (&ItemId, &Item)> {
        self.items.iter().filter(move |(_, item)| item.mode == mode)
    }

    /// Pick an id for an item created at `now_millis`.
    ///
    /// Two submits in the same millisecond would collide, so the reading is
    /// bumped until it names a free slot.
    pub fn next_id(&self, now_millis: u64) -> ItemId {
        let mut millis = now_millis;
        loop {
            let id = ItemId::from_millis(millis);
            if !self.items.contains_key(&id) {
                return id;
            }
            millis = millis.saturating_add(1);
        }
    }

    /// Add a new, not-done item to `mode`'s list.
    ///
    /// Returns `None` for empty text.
    pub fn add(&self, text: &str, mode: Mode, now_millis: u64) -> Option<(Self, ItemId)> {
        if text.is_empty() {
            return None;
        }
        let id = self.next_id(now_millis);
        let mut items = self.items.clone();
        items.insert(id.clone(), Item::new(text, mode));
        Some((Self { items }, id))
    }

    /// Flip the done flag of an existing item
    pub fn set_done(&self, id: &ItemId) -> Result<Self> {
        self.modify(id, |item| item.done = !item.done)
    }

    /// Replace an item's text.
    ///
    /// `Ok(None)` means the text was empty and nothing changed.
    pub fn set_text(&self, id: &ItemId, text: &str) -> Result<Option<Self>> {
        if text.is_empty() {
            return Ok(None);
        }
        self.modify(id, |item| item.text = text.to_string()).map(Some)
    }

    /// Remove an item. Absent ids are fine.
    pub fn delete(&self, id: &ItemId) -> Self {
        let mut items = self.items.clone();
        items.remove(id);
        Self { items }
    }

    fn modify(&self, id: &ItemId, f: impl FnOnce(&mut Item)) -> Result<Self> {
        let mut items = self.items.clone();
        let item = items
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        f(item);
        Ok(Self { items })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl FromIterator<(ItemId, Item)> for ItemStore {
    fn from_iter<T: IntoIterator<Item = (ItemId, Item)>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
