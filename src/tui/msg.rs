//! TEA Message Types for the TUI
//!
//! This module defines the Msg enum representing all possible user actions.
//! Following The Elm Architecture (TEA), messages are:
//! - Data describing what happened (not how to handle it)
//! - The only way to trigger state changes
//! - Processed by a single update function

use crossterm::event::{KeyCode, KeyModifiers};

use super::types::Layer;

/// All possible messages/actions in the TUI
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    // === Navigation ===
    /// Move selection up by one
    MoveUp,
    /// Move selection down by one
    MoveDown,
    /// Jump to first row
    JumpToTop,
    /// Jump to last row
    JumpToBottom,

    // === Mode toggle ===
    SelectWork,
    SelectTravel,
    /// Flip between Work and Travel
    ToggleMode,

    // === Add field ===
    FocusInput,
    InputChar(char),
    InputBackspace,
    /// Enter in the add field, stamped with the clock reading for the new id
    SubmitInput { now_millis: u64 },
    LeaveInput,

    // === Item actions ===
    /// Flip done on the selected row
    ToggleDone,
    /// Open the delete prompt for the selected row
    RequestDelete,
    ConfirmDelete,
    CancelDelete,
    /// Open the edit dialog for the selected row
    OpenEdit,

    // === Edit dialog ===
    EditChar(char),
    EditBackspace,
    SubmitEdit,
    CancelEdit,

    // === Help ===
    ToggleHelp,

    // === Persistence feedback ===
    /// A write-through failed; carries the error text
    PersistFailed(String),
    /// Status message timed out
    ClearStatus,

    // === Lifecycle ===
    /// Quit the application
    Quit,
    /// Tick event (for timeouts)
    Tick,
    /// Window resized
    Resize(u16, u16),

    // === Internal ===
    /// No operation (for unhandled keys)
    Noop,
}

/// Convert a key event to a message
///
/// This is a pure function - no side effects, just pattern matching.
/// `now_millis` is only used to stamp `SubmitInput`.
pub fn key_to_msg(code: KeyCode, modifiers: KeyModifiers, layer: Layer, now_millis: u64) -> Msg {
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Msg::Quit;
    }

    match layer {
        Layer::ConfirmDelete => match code {
            KeyCode::Char('y') | KeyCode::Enter => Msg::ConfirmDelete,
            KeyCode::Char('n') | KeyCode::Esc => Msg::CancelDelete,
            _ => Msg::Noop,
        },

        Layer::EditDialog => match code {
            KeyCode::Enter => Msg::SubmitEdit,
            KeyCode::Esc => Msg::CancelEdit,
            KeyCode::Backspace => Msg::EditBackspace,
            KeyCode::Char(c) => Msg::EditChar(c),
            _ => Msg::Noop,
        },

        Layer::Help => match code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Msg::ToggleHelp,
            _ => Msg::Noop,
        },

        Layer::Input => match code {
            KeyCode::Enter => Msg::SubmitInput { now_millis },
            KeyCode::Esc => Msg::LeaveInput,
            KeyCode::Backspace => Msg::InputBackspace,
            KeyCode::Char(c) => Msg::InputChar(c),
            _ => Msg::Noop,
        },

        Layer::List => match code {
            // Quit
            KeyCode::Char('q') => Msg::Quit,

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => Msg::MoveDown,
            KeyCode::Char('k') | KeyCode::Up => Msg::MoveUp,
            KeyCode::Char('g') | KeyCode::Home => Msg::JumpToTop,
            KeyCode::Char('G') | KeyCode::End => Msg::JumpToBottom,

            // Mode
            KeyCode::Char('w') => Msg::SelectWork,
            KeyCode::Char('t') => Msg::SelectTravel,
            KeyCode::Tab | KeyCode::BackTab => Msg::ToggleMode,

            // Add field
            KeyCode::Char('i') | KeyCode::Char('a') => Msg::FocusInput,

            // Item actions
            KeyCode::Char(' ') | KeyCode::Enter => Msg::ToggleDone,
            KeyCode::Char('e') => Msg::OpenEdit,
            KeyCode::Char('d') | KeyCode::Delete => Msg::RequestDelete,

            // Help
            KeyCode::Char('?') => Msg::ToggleHelp,

            _ => Msg::Noop,
        },
    }
}

/// Check if a message mutates the item store (and so writes through)
pub fn is_item_mutation(msg: &Msg) -> bool {
    matches!(
        msg,
        Msg::SubmitInput { .. } | Msg::ToggleDone | Msg::ConfirmDelete | Msg::SubmitEdit
    )
}
