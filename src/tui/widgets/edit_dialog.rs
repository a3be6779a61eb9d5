//! Edit dialog - rename one item

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::centered_rect;
use crate::tui::types::EditSession;

/// Placeholder shown while the edit buffer is empty
pub const PLACEHOLDER: &str = "What's on your mind?";

/// Draw the edit dialog overlay
pub fn draw(frame: &mut Frame, session: &EditSession, area: Rect) {
    let popup_area = centered_rect(56, 10, area);
    frame.render_widget(Clear, popup_area);

    let input = if session.buffer.is_empty() {
        Line::from(vec![
            Span::styled("  > ", Style::default().fg(Color::Cyan)),
            Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(vec![
            Span::styled("  > ", Style::default().fg(Color::Cyan)),
            Span::raw(session.buffer.clone()),
            Span::styled("_", Style::default().fg(Color::Cyan).rapid_blink()),
        ])
    };

    let lines = vec![
        Line::from(""),
        Line::from("  Your current item is.."),
        Line::from(Span::styled(
            format!("  \" {} \"", session.original_text),
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(""),
        input,
        Line::from(""),
        Line::from(vec![
            Span::styled("  Enter", Style::default().fg(Color::Yellow)),
            Span::raw(": Edit   "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(": Cancel"),
        ]),
    ];

    let dialog = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Edit ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(dialog, popup_area);
}
