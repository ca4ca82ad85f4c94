//! Search input box.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;
use std::fmt::Write;

const SEARCH_BOX_MARGIN: usize = 2;

/// Renders a three-row bordered search box.
///
/// Shows the placeholder, dimmed, while the query is empty. Long text is
/// truncated to the inner width.
///
/// # Parameters
///
/// * `row` - Row of the top border (1-indexed)
/// * `search` - Current query and placeholder
/// * `cols` - Terminal width; the box keeps a two-column margin on each side
///
/// # Returns
///
/// The next free row (`row + 3`)
///
/// # Layout
///
/// ```text
///   ┌──────────────────────────────┐
///   │ coffee                       │
///   └──────────────────────────────┘
/// ```
pub fn render_search_bar(out: &mut String, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = Theme::fg(&theme.colors.search_bar_border);
    let margin = " ".repeat(SEARCH_BOX_MARGIN);

    position_cursor(out, row, 1);
    let _ = write!(out, "{margin}{border}┌{}┐{}", "─".repeat(inner_width), Theme::reset());

    let (text_color, text) = if search.query.is_empty() {
        (Theme::fg(&theme.colors.text_dim), format!(" {}", search.placeholder))
    } else {
        (Theme::fg(&theme.colors.text_normal), format!(" {}", search.query))
    };
    let text = truncate(&text, inner_width);
    let padding = inner_width.saturating_sub(text.chars().count());

    position_cursor(out, row + 1, 1);
    let _ = write!(
        out,
        "{margin}{border}│{text_color}{text}{}{border}│{}",
        " ".repeat(padding),
        Theme::reset()
    );

    position_cursor(out, row + 2, 1);
    let _ = write!(out, "{margin}{border}└{}┘{}", "─".repeat(inner_width), Theme::reset());

    row + 3
}
