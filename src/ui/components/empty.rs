//! Loader, empty state and error banner.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;
use std::fmt::Write;

fn write_centered(out: &mut String, row: usize, text: &str, color: &str, cols: usize) {
    let len = text.chars().count();
    let padding = cols.saturating_sub(len) / 2;
    position_cursor(out, row, 1);
    let _ = write!(out, "{}{}{text}{}", Theme::fg(color), " ".repeat(padding), Theme::reset());
}

/// Blocking loader shown in place of the cards during the first query.
///
/// Returns the next free row (`row + 3`).
pub fn render_loader(out: &mut String, row: usize, theme: &Theme, cols: usize) -> usize {
    write_centered(out, row + 1, "Loading locations...", &theme.colors.loader_fg, cols);
    row + 3
}

/// Centered message and hint for a result set with no locations.
pub fn render_empty_state(out: &mut String, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    write_centered(out, row + 1, &empty.message, &theme.colors.empty_state_fg, cols);
    write_centered(out, row + 2, &empty.subtitle, &theme.colors.text_dim, cols);
    row + 4
}

pub fn render_error(out: &mut String, row: usize, message: &str, theme: &Theme, cols: usize) -> usize {
    write_centered(out, row, &format!("Search failed: {message}"), &theme.colors.error_fg, cols);
    row + 2
}
