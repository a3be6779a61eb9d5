//! UI rendering for the TUI
//!
//! Drawing only reads the model; nothing here mutates state.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
};

use crate::model::Mode;

use super::types::{Focus, Layer};
use super::update::Model;
use super::views::list;
use super::widgets::{centered_rect, confirm_delete, edit_dialog};

/// Main draw function - orchestrates all rendering
pub fn draw(frame: &mut Frame, model: &Model) {
    let area = frame.area();

    // Main layout: mode tabs, add field, list, footer
    let main_layout = Layout::vertical([
        Constraint::Length(3), // Mode tabs
        Constraint::Length(3), // Add field
        Constraint::Min(3),    // List
        Constraint::Length(1), // Footer/status
    ])
    .split(area);

    draw_header(frame, model, main_layout[0]);
    draw_input(frame, model, main_layout[1]);
    list::draw(frame, model, main_layout[2]);
    draw_footer(frame, model, main_layout[3]);

    // Draw overlays
    if model.help_open {
        draw_help_overlay(frame, area);
    }

    if let Some(ref session) = model.edit {
        edit_dialog::draw(frame, session, area);
    }

    if let Some(ref pending) = model.pending_delete {
        confirm_delete::draw(frame, pending, area);
    }
}

fn draw_header(frame: &mut Frame, model: &Model, area: Rect) {
    let selected = Mode::ALL
        .iter()
        .position(|m| *m == model.mode)
        .unwrap_or(0);

    let counts = format!(
        " {} work · {} travel ",
        model.items.in_mode(Mode::Work).count(),
        model.items.in_mode(Mode::Travel).count()
    );

    let tabs = Tabs::new(Mode::ALL.iter().map(|m| m.label()))
        .select(selected)
        .block(
            Block::default()
                .title(" worktrip ")
                .title_bottom(Line::from(counts).right_aligned())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::White).bold())
        .divider("│");

    frame.render_widget(tabs, area);
}

fn draw_input(frame: &mut Frame, model: &Model, area: Rect) {
    let focused = model.focus == Focus::Input;

    let content = if model.input.is_empty() && !focused {
        Line::from(Span::styled(
            model.mode.placeholder(),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut spans = vec![Span::raw(model.input.clone())];
        if focused {
            if model.input.is_empty() {
                spans.push(Span::styled(
                    model.mode.placeholder(),
                    Style::default().fg(Color::DarkGray),
                ));
            } else {
                spans.push(Span::styled(
                    "_",
                    Style::default().fg(Color::Cyan).rapid_blink(),
                ));
            }
        }
        Line::from(spans)
    };

    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    let input = Paragraph::new(content).block(
        Block::default()
            .title(" Add ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );

    frame.render_widget(input, area);
}

fn draw_footer(frame: &mut Frame, model: &Model, area: Rect) {
    let keybinds = match model.layer() {
        Layer::List => "w/t:mode  j/k:move  i:add  space:done  e:edit  d:delete  ?:help  q:quit",
        Layer::Input => "type to add  Enter:save  Esc:back to list",
        Layer::EditDialog => "type the new text  Enter:edit  Esc:cancel",
        Layer::ConfirmDelete => "y:delete  n:cancel",
        Layer::Help => "?/Esc:close help",
    };

    // Show status message if present, otherwise show keybinds
    let footer_text = model
        .status_message
        .clone()
        .unwrap_or_else(|| keybinds.to_string());

    let footer = Paragraph::new(format!(" {}", footer_text))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(footer, area);
}

fn draw_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(52, 24, area);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let help_text = r#"
  Lists
  ─────────────────────────────────
  w / t        Show Work / Travel
  Tab          Switch list

  Items
  ─────────────────────────────────
  j/k, ↑/↓     Move up/down
  g / G        Jump to top / bottom
  i, a         Add to this list
  Space, Enter Toggle done
  e            Edit (not when done)
  d, Del       Delete (asks first)

  q, Ctrl+c    Quit

  Press ? or Esc to close
"#;

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(help, popup_area);
}
