//! Title bar with the result count.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;
use std::fmt::Write;

/// Renders the title bar and the result count line.
///
/// The title is bold, centered and padded to the full width. The count sits
/// on the next row in the dimmed text color.
///
/// # Parameters
///
/// * `out` - Frame buffer the escape sequences are appended to
/// * `row` - First row of the header (1-indexed)
/// * `header` - Title and formatted result count
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next free row (`row + 2`)
///
/// # Layout
///
/// ```text
/// [left padding] Store Locator: locations [right padding]
///   3 results
/// ```
///
/// When the width does not split evenly, the right padding takes the extra
/// column.
pub fn render_header(out: &mut String, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = header.title.chars().count();
    let padding = cols.saturating_sub(title_len) / 2;

    position_cursor(out, row, 1);
    let _ = write!(
        out,
        "{}{}{}{}{}{}",
        Theme::bold(),
        Theme::fg(&theme.colors.header_fg),
        " ".repeat(padding),
        header.title,
        " ".repeat(cols.saturating_sub(padding + title_len)),
        Theme::reset()
    );

    position_cursor(out, row + 1, 1);
    let _ = write!(
        out,
        "{}  {}{}",
        Theme::fg(&theme.colors.text_dim),
        header.result_count,
        Theme::reset()
    );

    row + 2
}
