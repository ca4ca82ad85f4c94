//! Shared rendering utilities.
//!
//! Components write into a `String` frame buffer instead of printing directly,
//! so a whole frame can be produced (and inspected in tests) before it reaches
//! the terminal. All text helpers work on characters, never on byte offsets.

use crate::app::Color;
use crate::ui::theme::Theme;
use std::fmt::Write;

/// Appends an ANSI cursor move to `row`, `col` (both 1-indexed).
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    let _ = write!(out, "\u{1b}[{row};{col}H");
}

/// Truncates `text` to at most `max_width` characters, ending in `...` when cut.
///
/// # Example
///
/// ```
/// use storefinder::ui::helpers::truncate;
///
/// assert_eq!(truncate("Piazza del Duomo", 10), "Piazza ...");
/// assert_eq!(truncate("Duomo", 10), "Duomo");
/// ```
#[must_use]
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    let keep = max_width.saturating_sub(3);
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}

/// Formats a distance in metres: `850 m` below one kilometre, `1.2 km` above.
#[must_use]
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{meters:.0} m")
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

/// Appends a colored block marker for a highlight, or padding when there is none.
///
/// Cards and pins both render their highlight through this helper so the two
/// views produce identical escapes for the same color.
pub fn write_highlight_marker(out: &mut String, color: Option<&Color>) {
    match color {
        Some(color) => {
            let _ = write!(out, "{}\u{2588}{} ", Theme::fg(color.as_hex()), Theme::reset());
        }
        None => out.push_str("  "),
    }
}
