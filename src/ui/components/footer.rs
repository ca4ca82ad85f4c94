//! Pagination line and key hints.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, PaginationInfo};
use std::fmt::Write;

/// Renders the pagination line and the centered key hints.
///
/// # Parameters
///
/// * `row` - Row of the pagination line (1-indexed)
/// * `pagination` - Zero-based page and page count
/// * `footer` - Key hints for the current panel mode
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next free row (`row + 2`)
///
/// # Layout
///
/// ```text
///   Page 2 of 5
///        /: search  f: filters & features  n/p: page  Enter: select
/// ```
///
/// The pagination row stays blank when everything fits on one page.
pub fn render_footer(
    out: &mut String,
    row: usize,
    pagination: PaginationInfo,
    footer: &FooterInfo,
    theme: &Theme,
    cols: usize,
) -> usize {
    if pagination.page_count > 1 {
        position_cursor(out, row, 1);
        let _ = write!(
            out,
            "  {}Page {} of {}{}",
            Theme::fg(&theme.colors.text_normal),
            pagination.page + 1,
            pagination.page_count,
            Theme::reset()
        );
    }

    let text_len = footer.hints.chars().count().min(cols);
    let padding = cols.saturating_sub(text_len) / 2;

    position_cursor(out, row + 1, 1);
    let _ = write!(
        out,
        "{}{}{}{}",
        Theme::fg(&theme.colors.text_dim),
        " ".repeat(padding),
        footer.hints,
        Theme::reset()
    );
    row + 2
}
