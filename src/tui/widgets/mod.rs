//! Overlay widgets drawn on top of the main view

pub mod confirm_delete;
pub mod edit_dialog;

use ratatui::layout::Rect;

/// A `width` x `height` rectangle centered in `area`, shrunk to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
