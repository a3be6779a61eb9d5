//! Delete confirmation prompt

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::centered_rect;
use crate::tui::types::PendingDelete;

/// Draw the one-shot delete prompt, titled with the item's text
pub fn draw(frame: &mut Frame, pending: &PendingDelete, area: Rect) {
    let popup_area = centered_rect(44, 7, area);
    frame.render_widget(Clear, popup_area);

    let title_width = usize::from(popup_area.width.saturating_sub(4));
    let title: String = pending.text.chars().take(title_width).collect();

    let lines = vec![
        Line::from(""),
        Line::from("  Are you sure?"),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("[n] Cancel", Style::default().fg(Color::White)),
            Span::raw("   "),
            Span::styled("[y] Delete", Style::default().fg(Color::Red).bold()),
        ]),
    ];

    let prompt = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!(" {} ", title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(prompt, popup_area);
}
