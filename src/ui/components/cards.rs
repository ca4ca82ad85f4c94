//! Result cards.

use crate::ui::helpers::{position_cursor, write_highlight_marker};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CardItem;
use std::fmt::Write;

/// Renders every card, three rows each.
///
/// The caller windows `cards` to the rows available; nothing is clipped here.
/// A card with a highlight color gets the same marker as its map pin, and the
/// selected card is drawn in the selection colors.
///
/// # Parameters
///
/// * `out` - Frame buffer
/// * `row` - Row of the first card (1-indexed)
/// * `cards` - Cards of the visible window, in result order
/// * `theme` - Active color theme
///
/// # Returns
///
/// The next free row (`row + 3 * cards.len()`)
///
/// # Layout
///
/// ```text
/// █ Coffee Duomo  350 m
///   Piazza del Duomo 1, Milano
/// (blank spacer row)
/// ```
pub fn render_cards(out: &mut String, row: usize, cards: &[CardItem], theme: &Theme) -> usize {
    cards
        .iter()
        .fold(row, |current, card| render_card(out, current, card, theme))
}

fn render_card(out: &mut String, row: usize, card: &CardItem, theme: &Theme) -> usize {
    position_cursor(out, row, 1);
    write_highlight_marker(out, card.highlight_color.as_ref());

    if card.is_selected {
        let _ = write!(
            out,
            "{}{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg),
            Theme::bold()
        );
    } else {
        let _ = write!(out, "{}{}", Theme::fg(&theme.colors.text_normal), Theme::bold());
    }
    let _ = write!(out, "{}{}", card.name, Theme::reset());

    if let Some(distance) = &card.distance {
        let _ = write!(out, "  {}{distance}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
    }

    position_cursor(out, row + 1, 1);
    let _ = write!(
        out,
        "  {}{}{}",
        Theme::fg(&theme.colors.text_dim),
        card.address,
        Theme::reset()
    );

    row + 3
}
