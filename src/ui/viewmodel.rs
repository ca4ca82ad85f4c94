//! View model types representing renderable locator state.
//!
//! View models are computed from [`AppState`](crate::app::AppState) by
//! `compute_viewmodel` and consumed by the renderer. They hold display-ready
//! strings and colors only; every highlight color in one view model comes from
//! the same [`HighlightSnapshot`].

use crate::app::{Color, HighlightSnapshot, PinDecoration};

/// Complete renderable state of the locator for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatorViewModel {
    pub header: HeaderInfo,

    pub search_bar: SearchBarInfo,

    /// Chips for the applied static filters and selected facet options.
    pub applied_filters: Vec<FilterChip>,

    /// Result cards visible in the current window.
    pub cards: Vec<CardItem>,

    /// Map pins for every result on the page.
    pub pins: Vec<PinDecoration>,

    /// Present while the facet panel is open.
    pub facet_panel: Option<FacetPanel>,

    /// Replaces the card list while the first query is in flight.
    pub loader: bool,

    pub empty_state: Option<EmptyState>,

    /// Last query failure, if not yet superseded by a successful query.
    pub error: Option<String>,

    pub pagination: PaginationInfo,

    pub highlight: HighlightSnapshot,

    pub footer: FooterInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// `"N results"` line.
    pub result_count: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    pub placeholder: String,
}

/// One removable applied-filter chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub field_id: String,
    pub label: String,
}

/// One result card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    pub location_id: String,
    pub name: String,
    pub address: String,
    /// Formatted distance, e.g. `1.2 km`, when a location filter is active.
    pub distance: Option<String>,
    pub highlight_color: Option<Color>,
    pub is_selected: bool,
}

/// Facet overlay contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetPanel {
    pub title: String,
    pub tiles: Vec<FacetTile>,
}

/// One facet tile. Activating it toggles the facet's first option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetTile {
    pub field_id: String,
    pub display_name: String,
    pub icon_path: String,
    pub is_selected: bool,
    /// Color of the tile's first option, when it is the highlighted one.
    pub highlight_color: Option<Color>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationInfo {
    /// Zero-based current page.
    pub page: usize,
    pub page_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub hints: String,
}
