//! TEA Update Function
//!
//! This module contains the pure update function that processes messages.
//! Following The Elm Architecture (TEA):
//!
//! ```text
//! update : Msg -> Model -> (Model, Cmd)
//! ```
//!
//! The update function:
//! - Takes a message and current model
//! - Returns new model and optional side-effect commands
//! - Is a pure function (no I/O)
//!
//! Every item mutation returns `Cmd::PersistItems` with the full new snapshot;
//! every mode change returns `Cmd::PersistMode`. The runtime executes them.

use crate::model::Mode;
use crate::store::{ItemStore, StoreError};

use super::msg::Msg;
use super::state;
use super::types::{EditSession, Focus, Layer, PendingDelete};

/// Commands that need to be executed by the runtime (imperative shell)
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// No command
    None,
    /// Quit the application
    Quit,
    /// Write the whole item snapshot
    PersistItems(ItemStore),
    /// Write the selected mode
    PersistMode(Mode),
}

/// The whole application state
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    // Data
    pub items: ItemStore,
    pub mode: Mode,

    // List view
    pub selected_index: usize,
    pub scroll_offset: usize,
    pub visible_items: usize,

    // Add field
    pub focus: Focus,
    pub input: String,

    // Overlays
    pub edit: Option<EditSession>,
    pub pending_delete: Option<PendingDelete>,
    pub help_open: bool,

    // Misc
    pub status_message: Option<String>,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            items: ItemStore::new(),
            mode: Mode::Work,
            selected_index: 0,
            scroll_offset: 0,
            visible_items: 20,
            focus: Focus::List,
            input: String::new(),
            edit: None,
            pending_delete: None,
            help_open: false,
            status_message: None,
        }
    }
}

impl Model {
    pub fn new(items: ItemStore, mode: Mode) -> Self {
        Self {
            items,
            mode,
            ..Default::default()
        }
    }

    /// Which layer receives keys. Only one overlay is ever open.
    pub fn layer(&self) -> Layer {
        if self.pending_delete.is_some() {
            Layer::ConfirmDelete
        } else if self.edit.is_some() {
            Layer::EditDialog
        } else if self.help_open {
            Layer::Help
        } else if self.focus == Focus::Input {
            Layer::Input
        } else {
            Layer::List
        }
    }

    pub fn row_count(&self) -> usize {
        state::row_count(&self.items, self.mode)
    }

    /// Same model with the selection moved to `index` and scrolled into view
    fn select(self, index: usize) -> Self {
        let selected_index = state::clamp_selection(index, self.row_count());
        let scroll_offset =
            state::calculate_scroll_offset(selected_index, self.scroll_offset, self.visible_items);
        Self {
            selected_index,
            scroll_offset,
            ..self
        }
    }

    fn switch_mode(self, mode: Mode) -> (Self, Cmd) {
        (
            Self {
                mode,
                selected_index: 0,
                scroll_offset: 0,
                ..self
            },
            Cmd::PersistMode(mode),
        )
    }

    fn with_status(self, message: impl Into<String>) -> Self {
        Self {
            status_message: Some(message.into()),
            ..self
        }
    }

    fn not_found(self, err: StoreError) -> (Self, Cmd) {
        (self.with_status(err.to_string()), Cmd::None)
    }
}

/// The core update function - processes a message and returns new state + commands
pub fn update(msg: Msg, model: Model) -> (Model, Cmd) {
    match msg {
        // === Lifecycle ===
        Msg::Quit => (model, Cmd::Quit),

        Msg::Tick | Msg::Noop => (model, Cmd::None),

        Msg::Resize(_, height) => {
            let model = Model {
                visible_items: state::list_capacity(height),
                ..model
            };
            let selected = model.selected_index;
            (model.select(selected), Cmd::None)
        }

        // === Navigation ===
        Msg::MoveUp => {
            let index = state::move_selection_up(model.selected_index);
            (model.select(index), Cmd::None)
        }

        Msg::MoveDown => {
            let index = state::move_selection_down(model.selected_index, model.row_count());
            (model.select(index), Cmd::None)
        }

        Msg::JumpToTop => (model.select(0), Cmd::None),

        Msg::JumpToBottom => {
            let last = model.row_count().saturating_sub(1);
            (model.select(last), Cmd::None)
        }

        // === Mode toggle ===
        Msg::SelectWork => model.switch_mode(Mode::Work),

        Msg::SelectTravel => model.switch_mode(Mode::Travel),

        Msg::ToggleMode => {
            let mode = model.mode.toggle();
            model.switch_mode(mode)
        }

        // === Add field ===
        Msg::FocusInput => (
            Model {
                focus: Focus::Input,
                ..model
            },
            Cmd::None,
        ),

        Msg::LeaveInput => (
            Model {
                focus: Focus::List,
                ..model
            },
            Cmd::None,
        ),

        Msg::InputChar(c) => {
            let input = state::push_char(&model.input, c);
            (Model { input, ..model }, Cmd::None)
        }

        Msg::InputBackspace => {
            let input = state::pop_char(&model.input);
            (Model { input, ..model }, Cmd::None)
        }

        Msg::SubmitInput { now_millis } => {
            let Some((items, id)) = model.items.add(&model.input, model.mode, now_millis) else {
                return (model, Cmd::None);
            };
            let index = state::index_of(&items, model.mode, &id).unwrap_or(0);
            let model = Model {
                items: items.clone(),
                input: String::new(),
                ..model
            };
            (model.select(index), Cmd::PersistItems(items))
        }

        // === Item actions ===
        Msg::ToggleDone => {
            let Some(row) = state::selected_row(&model.items, model.mode, model.selected_index)
            else {
                return (model, Cmd::None);
            };
            match model.items.set_done(&row.id) {
                Ok(items) => (
                    Model {
                        items: items.clone(),
                        ..model
                    },
                    Cmd::PersistItems(items),
                ),
                Err(e) => model.not_found(e),
            }
        }

        Msg::RequestDelete => {
            let Some(row) = state::selected_row(&model.items, model.mode, model.selected_index)
            else {
                return (model, Cmd::None);
            };
            (
                Model {
                    pending_delete: Some(PendingDelete {
                        id: row.id,
                        text: row.text,
                    }),
                    ..model
                },
                Cmd::None,
            )
        }

        Msg::ConfirmDelete => {
            let Some(pending) = model.pending_delete.clone() else {
                return (model, Cmd::None);
            };
            let items = model.items.delete(&pending.id);
            let model = Model {
                items: items.clone(),
                pending_delete: None,
                ..model
            };
            let selected = model.selected_index;
            (model.select(selected), Cmd::PersistItems(items))
        }

        Msg::CancelDelete => (
            Model {
                pending_delete: None,
                ..model
            },
            Cmd::None,
        ),

        Msg::OpenEdit => {
            let Some(row) = state::selected_row(&model.items, model.mode, model.selected_index)
            else {
                return (model, Cmd::None);
            };
            if !row.can_edit {
                return (model, Cmd::None);
            }
            (
                Model {
                    edit: Some(EditSession::new(row.id, row.text)),
                    ..model
                },
                Cmd::None,
            )
        }

        // === Edit dialog ===
        Msg::EditChar(c) => {
            let edit = model.edit.clone().map(|session| EditSession {
                buffer: state::push_char(&session.buffer, c),
                ..session
            });
            (Model { edit, ..model }, Cmd::None)
        }

        Msg::EditBackspace => {
            let edit = model.edit.clone().map(|session| EditSession {
                buffer: state::pop_char(&session.buffer),
                ..session
            });
            (Model { edit, ..model }, Cmd::None)
        }

        Msg::SubmitEdit => {
            let Some(session) = model.edit.clone() else {
                return (model, Cmd::None);
            };
            match model.items.set_text(&session.id, &session.buffer) {
                // Empty buffer: the dialog stays open
                Ok(None) => (model, Cmd::None),
                Ok(Some(items)) => (
                    Model {
                        items: items.clone(),
                        edit: None,
                        ..model
                    },
                    Cmd::PersistItems(items),
                ),
                Err(e) => Model { edit: None, ..model }.not_found(e),
            }
        }

        Msg::CancelEdit => (Model { edit: None, ..model }, Cmd::None),

        // === Help ===
        Msg::ToggleHelp => (
            Model {
                help_open: !model.help_open,
                ..model
            },
            Cmd::None,
        ),

        // === Persistence feedback ===
        Msg::PersistFailed(error) => (model.with_status(format!("Save failed: {}", error)), Cmd::None),

        Msg::ClearStatus => (
            Model {
                status_message: None,
                ..model
            },
            Cmd::None,
        ),
    }
}
