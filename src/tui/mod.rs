//! Terminal User Interface for worktrip
//!
//! Features:
//! - Work / Travel tabs, persisted across runs
//! - Add field, done toggle, edit dialog, delete confirmation
//! - Every change written through to storage before the next key is read

pub mod app;
pub mod events;
pub mod msg; // TEA message types (what happened)
pub mod state; // Pure state transformations (functional core)
pub mod types;
pub mod ui;
pub mod update; // TEA update function (state transitions)
pub mod views;
pub mod widgets;

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{poll, read, DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::info;

use crate::config::UiConfig;
use crate::repo::TodoRepo;
use crate::storage::KeyValueStore;

use app::App;
use events::handle_event;
use msg::Msg;

/// Run the TUI application
pub fn run<S: KeyValueStore>(
    repo: TodoRepo<S>,
    config: &UiConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app, ensuring cleanup happens even on error
    let result = run_app_inner(&mut terminal, repo, config);

    // Restore terminal - this MUST run even if app fails
    let _ = disable_raw_mode();
    let _ = execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    );
    let _ = terminal.show_cursor();

    result
}

fn run_app_inner<B: Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    repo: TodoRepo<S>,
    config: &UiConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(repo, config);

    let size = terminal.size()?;
    app.dispatch(Msg::Resize(size.width, size.height));

    run_event_loop(terminal, &mut app)?;
    info!(items = app.model.items.len(), "app exited");
    Ok(())
}

fn run_event_loop<B: Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        // Draw the UI from the latest model snapshot
        terminal.draw(|f| ui::draw(f, &app.model))?;

        // Handle input with timeout
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if poll(timeout)? && handle_event(app, read()?) {
            return Ok(()); // Quit signal
        }

        // Tick for status expiry
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }
}
