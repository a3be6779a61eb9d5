//! TUI Type Definitions
//!
//! View models and transient UI state. Rows are derived from the item
//! store on every render; sessions exist only while their overlay is open.

use serde::Serialize;

use crate::model::ItemId;

/// Which pane receives typed characters when no overlay is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    List,
    Input,
}

/// The layer that currently owns the keyboard, topmost first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    ConfirmDelete,
    EditDialog,
    Help,
    Input,
    List,
}

/// One rendered list row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub id: ItemId,
    pub text: String,
    pub done: bool,
    /// Delete is always offered; it is gated by confirmation instead
    pub can_delete: bool,
    /// Done items cannot be renamed
    pub can_edit: bool,
}

/// Open edit dialog: the item, its text when opened, and what's been typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: ItemId,
    pub original_text: String,
    pub buffer: String,
}

impl EditSession {
    /// The buffer starts out holding the current text
    pub fn new(id: ItemId, original_text: impl Into<String>) -> Self {
        let original_text = original_text.into();
        Self {
            id,
            buffer: original_text.clone(),
            original_text,
        }
    }
}

/// Open delete prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: ItemId,
    pub text: String,
}

/// Completion glyph shown before each row
pub const CHECK_GLYPH: &str = "✔";

/// Crimson, for the check mark of a done item
pub const DONE_CHECK_RGB: (u8, u8, u8) = (0xDC, 0x14, 0x3C);
