//! Facet overlay with one tile per facet.

use crate::ui::helpers::{position_cursor, truncate, write_highlight_marker};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FacetPanel;
use std::fmt::Write;

const TILES_PER_ROW: usize = 3;

/// Renders the panel title and a three-column grid of tiles.
///
/// Each tile shows its icon path, the display name and a check mark when the
/// facet's first option is selected. A highlighted tile carries the same
/// marker color as the cards and pins.
///
/// # Returns
///
/// The row after the last tile line
///
/// # Layout
///
/// ```text
///   Filters & Features
///
/// █ [x] Drive Thru      [ ] Wifi            [ ] Delivery
///   /icons/drive-thru.svg /icons/wifi.svg   /icons/delivery.svg
/// ```
pub fn render_facet_panel(out: &mut String, row: usize, panel: &FacetPanel, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    let _ = write!(
        out,
        "  {}{}{}{}",
        Theme::bold(),
        Theme::fg(&theme.colors.header_fg),
        panel.title,
        Theme::reset()
    );

    let tile_width = (cols / TILES_PER_ROW).max(8);
    let mut current = row + 2;

    for line in panel.tiles.chunks(TILES_PER_ROW) {
        position_cursor(out, current, 1);
        for tile in line {
            write_highlight_marker(out, tile.highlight_color.as_ref());
            let check = if tile.is_selected { "[x]" } else { "[ ]" };
            let label = truncate(&format!("{check} {}", tile.display_name), tile_width.saturating_sub(3));
            let padding = tile_width.saturating_sub(label.chars().count() + 2);
            let _ = write!(
                out,
                "{}{label}{}{}",
                Theme::fg(&theme.colors.text_normal),
                " ".repeat(padding),
                Theme::reset()
            );
        }

        position_cursor(out, current + 1, 1);
        for tile in line {
            let icon = truncate(&tile.icon_path, tile_width.saturating_sub(3));
            let padding = tile_width.saturating_sub(icon.chars().count() + 2);
            let _ = write!(
                out,
                "  {}{icon}{}{}",
                Theme::fg(&theme.colors.text_dim),
                " ".repeat(padding),
                Theme::reset()
            );
        }

        current += 3;
    }

    current
}
