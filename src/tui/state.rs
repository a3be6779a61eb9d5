//! Pure state transformations for the TUI (Functional Core)
//!
//! This module contains ONLY pure functions with no I/O.
//! All functions here:
//! - Take immutable inputs
//! - Return new values (no mutation)
//! - Have no side effects
//!
//! The "imperative shell" (app.rs, events.rs) handles I/O and calls these pure functions.

use crate::model::{ItemId, Mode};
use crate::store::ItemStore;

use super::types::Row;

/// Lines of the screen not available to list rows: header, add field,
/// list borders, footer
pub const LIST_CHROME_ROWS: u16 = 9;

// =============================================================================
// List rendering - which rows the current mode shows
// =============================================================================

/// Rows for the given mode, in store order. Other modes' items are left out.
pub fn visible_rows(items: &ItemStore, mode: Mode) -> Vec<Row> {
    items
        .in_mode(mode)
        .map(|(id, item)| Row {
            id: id.clone(),
            text: item.text.clone(),
            done: item.done,
            can_delete: true,
            can_edit: !item.done,
        })
        .collect()
}

/// Number of rows the current mode shows
pub fn row_count(items: &ItemStore, mode: Mode) -> usize {
    items.in_mode(mode).count()
}

/// The row under the cursor, if any
pub fn selected_row(items: &ItemStore, mode: Mode, selected: usize) -> Option<Row> {
    visible_rows(items, mode).into_iter().nth(selected)
}

/// Position of an item among the current mode's rows
pub fn index_of(items: &ItemStore, mode: Mode, id: &ItemId) -> Option<usize> {
    items.in_mode(mode).position(|(other, _)| other == id)
}

// =============================================================================
// Navigation - Pure index calculations
// =============================================================================

/// Calculate new selected index after moving up
pub fn move_selection_up(current: usize) -> usize {
    current.saturating_sub(1)
}

/// Calculate new selected index after moving down
pub fn move_selection_down(current: usize, max: usize) -> usize {
    if max == 0 {
        0
    } else {
        (current + 1).min(max - 1)
    }
}

/// Calculate scroll offset to keep selection visible
pub fn calculate_scroll_offset(
    selected: usize,
    current_offset: usize,
    visible_items: usize,
) -> usize {
    if visible_items == 0 {
        return 0;
    }
    if selected < current_offset {
        selected
    } else if selected >= current_offset + visible_items {
        selected.saturating_sub(visible_items - 1)
    } else {
        current_offset
    }
}

/// Clamp selection index to valid range
pub fn clamp_selection(selected: usize, max: usize) -> usize {
    if max == 0 {
        0
    } else {
        selected.min(max - 1)
    }
}

/// How many list rows fit in a terminal of the given height
pub fn list_capacity(height: u16) -> usize {
    usize::from(height.saturating_sub(LIST_CHROME_ROWS)).max(1)
}

// =============================================================================
// Text buffers
// =============================================================================

/// Append a typed character, ignoring control characters
pub fn push_char(buffer: &str, c: char) -> String {
    let mut next = buffer.to_string();
    if !c.is_control() {
        next.push(c);
    }
    next
}

/// Remove the last character
pub fn pop_char(buffer: &str) -> String {
    let mut next = buffer.to_string();
    next.pop();
    next
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Item;

    const T0: u64 = 1_700_000_000_000;

    fn sample() -> ItemStore {
        vec![
            (ItemId::from_millis(T0), Item::new("Buy milk", Mode::Work)),
            (ItemId::from_millis(T0 + 1), Item::new("Paris", Mode::Travel)),
            (
                ItemId::from_millis(T0 + 2),
                Item {
                    text: "Ship it".to_string(),
                    mode: Mode::Work,
                    done: true,
                },
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_visible_rows_filters_by_mode() {
        let items = sample();
        let work: Vec<_> = visible_rows(&items, Mode::Work)
            .into_iter()
            .map(|r| r.text)
            .collect();
        assert_eq!(work, vec!["Buy milk", "Ship it"]);

        let travel = visible_rows(&items, Mode::Travel);
        assert_eq!(travel.len(), 1);
        assert_eq!(travel[0].text, "Paris");
    }

    #[test]
    fn test_done_rows_lose_edit_but_keep_delete() {
        let rows = visible_rows(&sample(), Mode::Work);
        assert!(rows[0].can_edit);
        assert!(!rows[1].can_edit);
        assert!(rows[1].done);
        assert!(rows.iter().all(|r| r.can_delete));
    }

    #[test]
    fn test_selected_row_and_index_of() {
        let items = sample();
        let row = selected_row(&items, Mode::Work, 1).unwrap();
        assert_eq!(row.text, "Ship it");
        assert_eq!(index_of(&items, Mode::Work, &row.id), Some(1));
        assert_eq!(index_of(&items, Mode::Travel, &row.id), None);
        assert!(selected_row(&items, Mode::Travel, 3).is_none());
    }

    #[test]
    fn test_row_count() {
        assert_eq!(row_count(&sample(), Mode::Work), 2);
        assert_eq!(row_count(&ItemStore::new(), Mode::Travel), 0);
    }

    #[test]
    fn test_move_selection() {
        assert_eq!(move_selection_up(0), 0);
        assert_eq!(move_selection_up(3), 2);
        assert_eq!(move_selection_down(0, 0), 0);
        assert_eq!(move_selection_down(0, 2), 1);
        assert_eq!(move_selection_down(1, 2), 1);
    }

    #[test]
    fn test_scroll_offset() {
        assert_eq!(calculate_scroll_offset(0, 0, 5), 0);
        assert_eq!(calculate_scroll_offset(5, 0, 5), 1);
        assert_eq!(calculate_scroll_offset(2, 4, 5), 2);
        assert_eq!(calculate_scroll_offset(3, 0, 0), 0);
    }

    #[test]
    fn test_clamp_selection() {
        assert_eq!(clamp_selection(5, 0), 0);
        assert_eq!(clamp_selection(5, 3), 2);
        assert_eq!(clamp_selection(1, 3), 1);
    }

    #[test]
    fn test_list_capacity() {
        assert_eq!(list_capacity(30), 21);
        assert_eq!(list_capacity(3), 1);
    }

    #[test]
    fn test_text_buffers() {
        assert_eq!(push_char("ab", 'c'), "abc");
        assert_eq!(push_char("ab", '\u{7}'), "ab");
        assert_eq!(pop_char("abc"), "ab");
        assert_eq!(pop_char(""), "");
    }
}
