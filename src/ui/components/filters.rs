//! Applied filter chips.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterChip;
use std::fmt::Write;

/// Renders chips on one row, dropping those that do not fit.
///
/// # Returns
///
/// `row + 1`, or `row` unchanged when `chips` is empty
///
/// # Layout
///
/// ```text
///  [ Near current area × ] [ Drive Thru × ]
/// ```
pub fn render_filter_chips(out: &mut String, row: usize, chips: &[FilterChip], theme: &Theme, cols: usize) -> usize {
    if chips.is_empty() {
        return row;
    }

    position_cursor(out, row, 1);
    out.push(' ');
    let mut used = 1;
    for chip in chips {
        let label = format!(" {} × ", chip.label);
        let width = label.chars().count() + 1;
        if used + width > cols {
            break;
        }
        let _ = write!(
            out,
            "{}{}{label}{} ",
            Theme::fg(&theme.colors.chip_fg),
            Theme::bg(&theme.colors.chip_bg),
            Theme::reset()
        );
        used += width;
    }

    row + 1
}
