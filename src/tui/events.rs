//! Event handling for the TUI
//!
//! Turns terminal events into messages for the app.

use crossterm::event::Event;

use crate::storage::KeyValueStore;

use super::app::App;
use super::msg::Msg;
use super::types::Layer;

/// Handle a terminal event, returns true if app should quit
pub fn handle_event<S: KeyValueStore>(app: &mut App<S>, event: Event) -> bool {
    match event {
        Event::Key(key) => app.handle_key(key),
        Event::Resize(width, height) => app.dispatch(Msg::Resize(width, height)),
        Event::Paste(text) => handle_paste(app, &text),
        _ => false,
    }
}

/// Pasted text is typed into whichever buffer has focus
fn handle_paste<S: KeyValueStore>(app: &mut App<S>, text: &str) -> bool {
    let to_msg: fn(char) -> Msg = match app.model.layer() {
        Layer::Input => Msg::InputChar,
        Layer::EditDialog => Msg::EditChar,
        _ => return false,
    };
    for c in text.chars().filter(|c| *c != '\n' && *c != '\r') {
        app.dispatch(to_msg(c));
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiConfig;
    use crate::repo::TodoRepo;
    use crate::storage::MemoryStore;

    fn app() -> App<MemoryStore> {
        App::new(TodoRepo::with_default_keys(MemoryStore::new()), &UiConfig::default())
    }

    #[test]
    fn test_resize_event() {
        let mut app = app();
        assert!(!handle_event(&mut app, Event::Resize(100, 19)));
        assert_eq!(app.model.visible_items, 10);
    }

    #[test]
    fn test_paste_into_input() {
        let mut app = app();
        app.dispatch(Msg::FocusInput);
        handle_event(&mut app, Event::Paste("Lisbon\n".to_string()));
        assert_eq!(app.model.input, "Lisbon");
    }

    #[test]
    fn test_paste_ignored_in_list() {
        let mut app = app();
        handle_event(&mut app, Event::Paste("qqq".to_string()));
        assert_eq!(app.model.input, "");
    }
}
