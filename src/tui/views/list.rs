//! List view - the current mode's items, one per line

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::tui::state;
use crate::tui::types::{Focus, Row, CHECK_GLYPH, DONE_CHECK_RGB};
use crate::tui::update::Model;

/// Draw the list of rows for the current mode
pub fn draw(frame: &mut Frame, model: &Model, area: Rect) {
    let border_color = if model.focus == Focus::List {
        Color::Blue
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(format!(" {} ", model.mode.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let rows = state::visible_rows(&model.items, model.mode);
    if rows.is_empty() {
        let empty = Paragraph::new(format!("Nothing in {} yet. Press i to add.", model.mode))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner_area);
        return;
    }

    let width = inner_area.width as usize;
    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(model.scroll_offset)
        .take(inner_area.height as usize)
        .map(|(idx, row)| {
            let is_selected = idx == model.selected_index && model.focus == Focus::List;
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(row_line(row, width)).style(style)
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(model.selected_index.saturating_sub(model.scroll_offset)));

    frame.render_stateful_widget(List::new(items), inner_area, &mut list_state);
}

/// Check mark, text, then the row's affordances
fn row_line(row: &Row, width: usize) -> Line<'static> {
    let (r, g, b) = DONE_CHECK_RGB;
    let check_style = if row.done {
        Style::default().fg(Color::Rgb(r, g, b))
    } else {
        Style::default().fg(Color::Gray)
    };
    let text_style = if row.done {
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(Color::White)
    };

    let mut affordances = Vec::new();
    if row.can_delete {
        affordances.push("[d]elete");
    }
    if row.can_edit {
        affordances.push("[e]dit");
    }
    let affordances = affordances.join(" ");

    // glyph + space + gap before affordances
    let reserved = 2 + 2 + affordances.chars().count();
    let text = truncate_str(&row.text, width.saturating_sub(reserved).max(4));

    Line::from(vec![
        Span::styled(CHECK_GLYPH, check_style),
        Span::raw(" "),
        Span::styled(text, text_style),
        Span::raw("  "),
        Span::styled(affordances, Style::default().fg(Color::DarkGray)),
    ])
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let char_len = max_len.saturating_sub(3);
        let truncated: String = s.chars().take(char_len).collect();
        format!("{}...", truncated)
    }
}
