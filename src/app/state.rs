//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the locator: the active
//! query, the static filter set, the facets and results of the last applied
//! response, the shared highlight cell and the executor's sequence and loading
//! state. Card and pin renderers never own copies of any of this; they receive
//! values derived from one state snapshot.
//!
//! # State Components
//!
//! - **Query**: active free-text query, seeded from navigation on mount
//! - **Filter set**: static filters with the reserved location slot
//! - **Facets**: facets of the last applied response, flagged from the
//!   selection map the state owns
//! - **Results**: locations and total count of the last applied response
//! - **Executor**: sequence numbers, loading state and pagination
//! - **Highlight**: the single highlighted facet-option identity
//! - **Panel mode**: results list or facet overlay
//!
//! # Example
//!
//! ```
//! use storefinder::app::AppState;
//! use storefinder::ui::Theme;
//!
//! let mut state = AppState::new("locations", Theme::default()).with_page_size(10);
//! let request = state.issue_query();
//! assert_eq!(request.vertical, "locations");
//! assert_eq!(request.limit, 10);
//!
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.loader);
//! ```

use super::bridge::{CrossViewDecorations, CrossViewHighlightBridge};
use super::colors::FacetColorMapper;
use super::executor::{SearchExecutor, DEFAULT_PAGE_SIZE};
use super::filters::FilterSet;
use super::highlight::{HighlightSnapshot, HighlightState};
use super::modes::{LoadingState, PanelMode};
use super::query_sync::QueryParams;
use crate::domain::{Facet, FacetOption, Location, SearchRequest, SearchResults};
use crate::ui::helpers::{format_distance, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CardItem, EmptyState, FacetPanel, FacetTile, FilterChip, FooterInfo, HeaderInfo,
    LocatorViewModel, PaginationInfo, SearchBarInfo,
};
use std::collections::{BTreeMap, BTreeSet};

const SEARCH_PLACEHOLDER: &str = "Enter an address, zip code, or city and state";
const FACET_PANEL_TITLE: &str = "Filters & Features";

/// Central locator state container.
///
/// Mutated only by the event handler. Every mutation replaces whole values
/// (filter list, facet list, result list) instead of patching them, so a
/// snapshot taken for a query or a render is never observed half-updated.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Vertical key every query runs against.
    pub vertical: String,

    /// Active free-text query. `None` means match-all.
    pub query: Option<String>,

    /// Navigation parameters last read from or pushed to history.
    pub params: QueryParams,

    pub filter_set: FilterSet,

    /// Facets of the last applied response, carrying the user's selections.
    pub facets: Vec<Facet>,

    /// Selected option values by facet field id.
    ///
    /// Changed only by facet toggles and filter removal. Response facets get
    /// their `selected` flags from here, never the other way round.
    pub facet_selections: BTreeMap<String, BTreeSet<String>>,

    /// Locations of the last applied response.
    pub locations: Vec<Location>,

    /// Total number of matches of the last applied response.
    pub result_count: usize,

    pub executor: SearchExecutor,

    pub highlight: HighlightState,

    pub color_mapper: FacetColorMapper,

    /// Location selected from a card or a pin.
    pub selected_location_id: Option<String>,

    pub panel_mode: PanelMode,

    /// Whether the facet panel can be opened at all.
    pub facets_enabled: bool,

    /// Message of the last failed query, cleared by the next applied result.
    pub last_error: Option<String>,

    pub theme: Theme,
}

impl AppState {
    /// Creates state for `vertical` in the `Loading` state.
    ///
    /// The color mapper is built from the theme's facet palette.
    #[must_use]
    pub fn new(vertical: impl Into<String>, theme: Theme) -> Self {
        Self {
            vertical: vertical.into(),
            query: None,
            params: QueryParams::default(),
            filter_set: FilterSet::new(),
            facets: Vec::new(),
            facet_selections: BTreeMap::new(),
            locations: Vec::new(),
            result_count: 0,
            executor: SearchExecutor::new(DEFAULT_PAGE_SIZE),
            highlight: HighlightState::new(),
            color_mapper: theme.color_mapper(),
            selected_location_id: None,
            panel_mode: PanelMode::Results,
            facets_enabled: false,
            last_error: None,
            theme,
        }
    }

    #[must_use]
    pub const fn with_facets_enabled(mut self, enabled: bool) -> Self {
        self.facets_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.executor = SearchExecutor::new(page_size);
        self
    }

    #[must_use]
    pub const fn loading(&self) -> LoadingState {
        self.executor.loading()
    }

    /// Snapshots query, filters and facets into the next sequenced request.
    pub fn issue_query(&mut self) -> SearchRequest {
        self.executor.issue(
            &self.vertical,
            self.query.as_deref(),
            self.filter_set.current(),
            &self.facets,
        )
    }

    /// Replaces results, facets and count with an applied response.
    ///
    /// Facet selections come from [`AppState::facet_selections`], so a
    /// response issued before the latest toggle cannot undo it. The selected
    /// location survives only if it is still among the results.
    pub fn apply_results(&mut self, results: SearchResults) {
        let _span = tracing::debug_span!(
            "apply_results",
            locations = results.locations.len(),
            facets = results.facets.len(),
            result_count = results.result_count
        )
        .entered();

        self.locations = results.locations;
        self.facets = self.merge_selections(results.facets);
        self.result_count = results.result_count;
        self.last_error = None;

        if let Some(selected) = &self.selected_location_id {
            if !self.locations.iter().any(|l| &l.id == selected) {
                tracing::debug!(location_id = %selected, "selected location left the result set");
                self.selected_location_id = None;
            }
        }
    }

    /// Flips the selection of one facet option.
    ///
    /// With `value == None` the facet's first option is toggled, as a facet
    /// tile does. Returns the toggled option's identity, or `None` when the
    /// facet or option does not exist.
    pub fn toggle_facet_option(&mut self, field_id: &str, value: Option<&str>) -> Option<String> {
        let facet = self.facets.iter().find(|f| f.field_id == field_id)?;
        let option = match value {
            Some(value) => facet.options.iter().find(|o| o.value == value)?,
            None => facet.options.first()?,
        };
        let identity = option.identity().to_string();
        let option_value = option.value.clone();

        let values = self.facet_selections.entry(field_id.to_string()).or_default();
        let selected = if values.remove(&option_value) {
            false
        } else {
            values.insert(option_value);
            true
        };
        if values.is_empty() {
            self.facet_selections.remove(field_id);
        }

        tracing::debug!(
            field_id = %field_id,
            identity = %identity,
            selected,
            "facet option toggled"
        );

        self.facets = self.merge_selections(self.facets.clone());
        Some(identity)
    }

    /// Removes an applied filter chip.
    ///
    /// Static filters on `field_id` are dropped; selected facet options on
    /// `field_id` are deselected. Returns whether anything changed.
    pub fn remove_filter(&mut self, field_id: &str) -> bool {
        let removed_static = self.filter_set.remove_field(field_id);
        let had_facet_selection = self.facet_selections.remove(field_id).is_some();
        if had_facet_selection {
            self.facets = self.merge_selections(self.facets.clone());
        }
        removed_static || had_facet_selection
    }

    /// Sets every option's `selected` flag from the selection map.
    ///
    /// Selected values missing from `facets` are appended with a zero count
    /// so the next request still filters on them.
    fn merge_selections(&self, mut facets: Vec<Facet>) -> Vec<Facet> {
        for facet in &mut facets {
            let values = self.facet_selections.get(&facet.field_id);
            for option in &mut facet.options {
                option.selected = values.is_some_and(|v| v.contains(&option.value));
            }
        }

        for (field_id, values) in &self.facet_selections {
            let index = match facets.iter().position(|f| &f.field_id == field_id) {
                Some(index) => index,
                None => {
                    facets.push(Facet {
                        field_id: field_id.clone(),
                        display_name: field_id.clone(),
                        options: Vec::new(),
                    });
                    facets.len() - 1
                }
            };
            let facet = &mut facets[index];
            for value in values {
                if !facet.options.iter().any(|o| &o.value == value) {
                    facet.options.push(FacetOption {
                        value: value.clone(),
                        display_name: None,
                        selected: true,
                        count: 0,
                    });
                }
            }
        }
        facets
    }

    #[must_use]
    pub fn selected_location(&self) -> Option<&Location> {
        let id = self.selected_location_id.as_deref()?;
        self.locations.iter().find(|l| l.id == id)
    }

    /// The highlight resolved to a color for this render cycle.
    #[must_use]
    pub fn highlight_snapshot(&self) -> HighlightSnapshot {
        self.highlight.snapshot(&self.color_mapper)
    }

    /// Card and pin decorations derived from one highlight snapshot.
    #[must_use]
    pub fn decorations(&self) -> CrossViewDecorations {
        CrossViewHighlightBridge::decorate(
            &self.highlight_snapshot(),
            &self.locations,
            self.selected_location_id.as_deref(),
        )
    }

    /// Computes a renderable view model for a `rows` x `cols` viewport.
    ///
    /// Cards take three rows each. The card window scrolls just enough to keep
    /// the selected card visible. Pins are not windowed: the map shows every
    /// result on the page.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> LocatorViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows, cols).entered();

        let decorations = self.decorations();
        let applied_filters = self.compute_filter_chips();

        let max_cards = self.calculate_card_capacity(rows, !applied_filters.is_empty());
        let selected_index = self
            .selected_location_id
            .as_deref()
            .and_then(|id| self.locations.iter().position(|l| l.id == id));
        let window_start = selected_index
            .map_or(0, |index| (index + 1).saturating_sub(max_cards));

        let text_width = cols.saturating_sub(4);
        let cards = self
            .locations
            .iter()
            .zip(&decorations.cards)
            .skip(window_start)
            .take(max_cards)
            .map(|(location, decoration)| CardItem {
                location_id: location.id.clone(),
                name: truncate(&location.name, text_width),
                address: truncate(&location.address, text_width),
                distance: location.distance.map(format_distance),
                highlight_color: decoration.highlight_color.clone(),
                is_selected: decoration.is_selected,
            })
            .collect();

        let loader = self.loading().is_blocking();
        let empty_state = if !loader && self.locations.is_empty() && self.last_error.is_none() {
            Some(self.compute_empty_state())
        } else {
            None
        };

        LocatorViewModel {
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                query: self.query.clone().unwrap_or_default(),
                placeholder: SEARCH_PLACEHOLDER.to_string(),
            },
            applied_filters,
            cards,
            pins: decorations.pins,
            facet_panel: self.compute_facet_panel(&decorations.snapshot),
            loader,
            empty_state,
            error: self.last_error.clone(),
            pagination: PaginationInfo {
                page: self.executor.page(),
                page_count: self.executor.page_count(self.result_count),
            },
            highlight: decorations.snapshot,
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let noun = if self.result_count == 1 { "result" } else { "results" };
        HeaderInfo {
            title: format!(" Store Locator: {} ", self.vertical),
            result_count: format!("{} {noun}", self.result_count),
        }
    }

    fn compute_filter_chips(&self) -> Vec<FilterChip> {
        let static_chips = self
            .filter_set
            .current()
            .iter()
            .filter(|f| f.selected)
            .map(|f| FilterChip {
                field_id: f.field_id.clone(),
                label: f.display_name.clone(),
            });

        let facet_chips = self.facets.iter().flat_map(|facet| {
            facet.options.iter().filter(|o| o.selected).map(|o| FilterChip {
                field_id: facet.field_id.clone(),
                label: o.identity().to_string(),
            })
        });

        static_chips.chain(facet_chips).collect()
    }

    fn compute_facet_panel(&self, snapshot: &HighlightSnapshot) -> Option<FacetPanel> {
        if !self.facets_enabled || self.panel_mode != PanelMode::Facets {
            return None;
        }

        let tiles = self
            .facets
            .iter()
            .map(|facet| {
                let first = facet.options.first();
                let is_highlighted = first
                    .is_some_and(|o| snapshot.identity.as_deref() == Some(o.identity()));
                FacetTile {
                    field_id: facet.field_id.clone(),
                    display_name: facet.display_name.clone(),
                    icon_path: facet.icon_path(),
                    is_selected: first.is_some_and(|o| o.selected),
                    highlight_color: if is_highlighted { snapshot.color.clone() } else { None },
                }
            })
            .collect();

        Some(FacetPanel {
            title: FACET_PANEL_TITLE.to_string(),
            tiles,
        })
    }

    fn compute_empty_state(&self) -> EmptyState {
        self.query.as_deref().map_or_else(
            || EmptyState {
                message: "No locations found".to_string(),
                subtitle: "Drag the map or search for an address".to_string(),
            },
            |query| EmptyState {
                message: format!("No locations match \"{query}\""),
                subtitle: "Try a different address, zip code or city".to_string(),
            },
        )
    }

    fn compute_footer(&self) -> FooterInfo {
        let hints = match self.panel_mode {
            PanelMode::Facets => "Enter: toggle facet  Esc: apply & close",
            PanelMode::Results if self.facets_enabled => {
                "/: search  f: filters & features  n/p: page  Enter: select"
            }
            PanelMode::Results => "/: search  n/p: page  Enter: select",
        };
        FooterInfo {
            hints: hints.to_string(),
        }
    }

    /// Cards that fit after the header (3), search bar (3), optional chip
    /// row (1) and pagination plus footer (3).
    const fn calculate_card_capacity(&self, rows: usize, has_chips: bool) -> usize {
        let chrome = if has_chips { 10 } else { 9 };
        let capacity = rows.saturating_sub(chrome) / 3;
        if capacity == 0 {
            1
        } else {
            capacity
        }
    }
}
