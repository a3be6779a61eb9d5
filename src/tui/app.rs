//! Application shell for the TUI
//!
//! Owns the model and the repository. Messages go through the pure
//! [`update`] function; the commands it returns are executed here, which is
//! the only place the TUI touches storage.

use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyEventKind};
use tracing::{debug, info};

use crate::config::UiConfig;
use crate::model;
use crate::repo::TodoRepo;
use crate::storage::KeyValueStore;

use super::msg::{self, key_to_msg, Msg};
use super::update::{update, Cmd, Model};

/// Main application state
pub struct App<S> {
    repo: TodoRepo<S>,
    pub model: Model,

    // Status message expiry
    status_timeout: Duration,
    status_shown_at: Option<Instant>,
}

impl<S: KeyValueStore> App<S> {
    /// Load both persisted values and build the initial model.
    ///
    /// A malformed item snapshot is logged and replaced by an empty store.
    pub fn new(repo: TodoRepo<S>, config: &UiConfig) -> Self {
        let mode = repo.load_mode_or_default();
        let items = repo.load_items_or_empty();
        info!(%mode, items = items.len(), "app started");

        Self {
            repo,
            model: Model::new(items, mode),
            status_timeout: Duration::from_secs(config.status_timeout_secs),
            status_shown_at: None,
        }
    }

    pub fn repo(&self) -> &TodoRepo<S> {
        &self.repo
    }

    /// Map a key press to a message and process it. Returns true to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        let msg = key_to_msg(key.code, key.modifiers, self.model.layer(), model::now_millis());
        self.dispatch(msg)
    }

    /// Run one message through update and execute the resulting command.
    /// Returns true when the app should quit.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        if msg::is_item_mutation(&msg) {
            debug!(?msg, "item mutation");
        }
        let previous_status = self.model.status_message.clone();
        // A repeated failure shows the same text but still gets a full timeout
        let restart_timer = matches!(msg, Msg::PersistFailed(_));

        let (model, cmd) = update(msg, std::mem::take(&mut self.model));
        self.model = model;
        let quit = self.execute(cmd);

        if self.model.status_message.is_some()
            && (restart_timer || self.model.status_message != previous_status)
        {
            self.status_shown_at = Some(Instant::now());
        }
        quit
    }

    /// Execute a command. Write-throughs complete before this returns; a
    /// failed write is fed back as `Msg::PersistFailed`, the in-memory model
    /// keeps the change.
    fn execute(&mut self, cmd: Cmd) -> bool {
        match cmd {
            Cmd::None => false,
            Cmd::Quit => true,
            Cmd::PersistItems(items) => match self.repo.save_items(&items) {
                Ok(()) => false,
                Err(e) => self.dispatch(Msg::PersistFailed(e.to_string())),
            },
            Cmd::PersistMode(mode) => match self.repo.save_mode(mode) {
                Ok(()) => false,
                Err(e) => self.dispatch(Msg::PersistFailed(e.to_string())),
            },
        }
    }

    /// Expire the status message once its timeout has passed
    pub fn tick(&mut self) {
        let expired = self
            .status_shown_at
            .is_some_and(|shown| shown.elapsed() >= self.status_timeout);
        if expired {
            self.status_shown_at = None;
            self.dispatch(Msg::ClearStatus);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemId, Mode};
    use crate::storage::MemoryStore;
    use crate::store::ItemStore;
    use crossterm::event::{KeyCode, KeyModifiers};

    const T0: u64 = 1_700_000_000_000;

    fn app() -> App<MemoryStore> {
        App::new(TodoRepo::with_default_keys(MemoryStore::new()), &UiConfig::default())
    }

    fn add(app: &mut App<MemoryStore>, text: &str, now_millis: u64) {
        app.dispatch(Msg::FocusInput);
        for c in text.chars() {
            app.dispatch(Msg::InputChar(c));
        }
        app.dispatch(Msg::SubmitInput { now_millis });
        app.dispatch(Msg::LeaveInput);
    }

    #[test]
    fn test_new_loads_persisted_state() {
        let repo = TodoRepo::with_default_keys(MemoryStore::new());
        let (items, _) = ItemStore::new().add("Paris", Mode::Travel, T0).unwrap();
        repo.save_items(&items).unwrap();
        repo.save_mode(Mode::Travel).unwrap();

        let app = App::new(repo, &UiConfig::default());
        assert_eq!(app.model.mode, Mode::Travel);
        assert_eq!(app.model.items, items);
    }

    #[test]
    fn test_new_with_malformed_snapshot_starts_empty() {
        let repo = TodoRepo::with_default_keys(MemoryStore::new());
        repo.store().set_item("@toDos", "][").unwrap();
        let app = App::new(repo, &UiConfig::default());
        assert!(app.model.items.is_empty());
        assert_eq!(app.model.mode, Mode::Work);
    }

    #[test]
    fn test_mutations_write_through() {
        let mut app = app();
        add(&mut app, "Buy milk", T0);
        assert_eq!(app.repo().load_items().unwrap(), app.model.items);

        app.dispatch(Msg::ToggleDone);
        let stored = app.repo().load_items().unwrap();
        assert!(stored.get(&ItemId::from_millis(T0)).unwrap().done);
    }

    #[test]
    fn test_mode_writes_through() {
        let mut app = app();
        app.dispatch(Msg::SelectTravel);
        assert_eq!(app.repo().load_mode().unwrap(), Mode::Travel);
    }

    #[test]
    fn test_confirmed_delete_absent_after_reload() {
        let mut app = app();
        add(&mut app, "Buy milk", T0);
        app.dispatch(Msg::RequestDelete);
        app.dispatch(Msg::CancelDelete);
        assert_eq!(app.repo().load_items().unwrap().len(), 1);

        app.dispatch(Msg::RequestDelete);
        app.dispatch(Msg::ConfirmDelete);
        assert!(app.repo().load_items().unwrap().is_empty());
    }

    #[test]
    fn test_write_failure_keeps_change_and_reports() {
        let mut app = app();
        app.repo().store().fail_writes(true);
        add(&mut app, "Buy milk", T0);

        assert_eq!(app.model.items.len(), 1);
        assert!(app.repo().load_items().unwrap().is_empty());
        assert!(app
            .model
            .status_message
            .as_deref()
            .unwrap()
            .starts_with("Save failed"));
    }

    #[test]
    fn test_status_expires_on_tick() {
        let mut app = App::new(
            TodoRepo::with_default_keys(MemoryStore::new()),
            &UiConfig {
                status_timeout_secs: 0,
            },
        );
        app.dispatch(Msg::PersistFailed("boom".to_string()));
        assert!(app.model.status_message.is_some());
        app.tick();
        assert!(app.model.status_message.is_none());
    }

    #[test]
    fn test_repeated_write_failure_restarts_status_timer() {
        let mut app = app();
        app.repo().store().fail_writes(true);
        add(&mut app, "a", T0);
        let status = app.model.status_message.clone();

        // Pretend the first message has been up for longer than the timeout
        app.status_shown_at = Instant::now().checked_sub(Duration::from_secs(60));
        app.dispatch(Msg::ToggleDone);
        assert_eq!(app.model.status_message, status);

        app.tick();
        assert_eq!(app.model.status_message, status);
    }

    #[test]
    fn test_handle_key_quit_and_release() {
        let mut app = app();
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(!app.handle_key(release));
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_handle_key_typing_adds_item() {
        let mut app = app();
        for code in [
            KeyCode::Char('a'),
            KeyCode::Char('H'),
            KeyCode::Char('i'),
            KeyCode::Enter,
        ] {
            app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
        }
        let rows = crate::tui::state::visible_rows(&app.model.items, Mode::Work);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text, "Hi");
    }
}
