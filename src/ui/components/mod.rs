//! Composable UI component renderers.
//!
//! Each component appends one part of the frame to a `String` buffer and
//! returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title and result count
//! - [`search`]: Search input box
//! - [`filters`]: Applied filter chips
//! - [`cards`]: Result cards with highlight markers
//! - [`facets`]: Facet tile grid
//! - [`empty`]: Loader, empty state and error banner
//! - [`footer`]: Pagination and key hints
//!
//! # Layout Modes
//!
//! - [`render_results_mode`]: Header + Search + Chips + Cards + Footer
//! - [`render_facets_mode`]: Header + Facet panel + Footer

mod cards;
mod empty;
mod facets;
mod filters;
mod footer;
mod header;
mod search;

use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FacetPanel, LocatorViewModel};

use cards::render_cards;
use empty::{render_empty_state, render_error, render_loader};
use facets::render_facet_panel;
use filters::render_filter_chips;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;

const FIRST_ROW: usize = 2;

fn render_chrome_bottom(out: &mut String, vm: &LocatorViewModel, theme: &Theme, cols: usize, rows: usize) {
    let footer_start = rows.saturating_sub(2).max(FIRST_ROW);
    render_footer(out, footer_start, vm.pagination, &vm.footer, theme, cols);
}

/// Results list with the search bar, chips and either cards, the loader or
/// the empty state.
pub fn render_results_mode(out: &mut String, vm: &LocatorViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = FIRST_ROW;

    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_search_bar(out, current_row, &vm.search_bar, theme, cols);
    current_row = render_filter_chips(out, current_row, &vm.applied_filters, theme, cols);

    if let Some(error) = &vm.error {
        current_row = render_error(out, current_row, error, theme, cols);
    }

    if vm.loader {
        render_loader(out, current_row, theme, cols);
    } else if let Some(empty) = &vm.empty_state {
        render_empty_state(out, current_row, empty, theme, cols);
    } else {
        render_cards(out, current_row, &vm.cards, theme);
    }

    render_chrome_bottom(out, vm, theme, cols, rows);
}

/// Facet overlay replacing the results list.
pub fn render_facets_mode(
    out: &mut String,
    vm: &LocatorViewModel,
    panel: &FacetPanel,
    theme: &Theme,
    cols: usize,
    rows: usize,
) {
    let current_row = render_header(out, FIRST_ROW, &vm.header, theme, cols);
    render_facet_panel(out, current_row, panel, theme, cols);
    render_chrome_bottom(out, vm, theme, cols, rows);
}
