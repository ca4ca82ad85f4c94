//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place where [`AppState`] changes. Each event
//! either mutates state and asks for a new query, or applies a worker
//! response. Side effects are returned as [`Action`]s.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Mount`
//! - **Query**: `SubmitSearch`, `ChangePage`
//! - **Location filter**: `MapDragEnd`, `UseGeolocation`, `RemoveFilter`
//! - **Facets**: `ToggleFacet`, `ToggleFacetOption`, `ClearHighlight`,
//!   `OpenFacetPanel`, `CloseFacetPanel`
//! - **Selection**: `SelectLocation`
//! - **Worker**: `SearchResponse`
//!
//! Every query-triggering event issues the query immediately. There is no
//! debounce and no cancellation; overlapping responses are sorted out by the
//! executor's sequence numbers when they arrive.
//!
//! # Example
//!
//! ```
//! use storefinder::app::{handle_event, Action, AppState, Event};
//! use storefinder::ui::Theme;
//!
//! let mut state = AppState::new("locations", Theme::default());
//! let (render, actions) = handle_event(
//!     &mut state,
//!     &Event::Mount { search: "?query=coffee".to_string() },
//! )?;
//!
//! assert!(render);
//! assert_eq!(state.query.as_deref(), Some("coffee"));
//! assert!(matches!(actions[0], Action::PostToWorker(_)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::executor::Completion;
use super::modes::PanelMode;
use super::query_sync::{QueryParams, QuerySync};
use super::radius::{RadiusFilterDeriver, CURRENT_LOCATION};
use crate::app::{Action, AppState};
use crate::domain::{GeoPoint, LocatorError, Result, ViewportDrag};
use crate::worker::{SearchMessage, SearchResponse};

/// Events from the user, the map, the host and the search worker.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Locator mounted. Seeds the query from the `query` parameter of
    /// `search` and always issues the initial query.
    Mount {
        /// Current location search string.
        search: String,
    },

    /// User submitted the search bar.
    SubmitSearch {
        query: String,
        /// Navigation parameters at submission time.
        params: QueryParams,
    },

    /// Map drag ended with this viewport.
    MapDragEnd(ViewportDrag),

    /// Device position obtained from the "use my location" control.
    UseGeolocation {
        position: GeoPoint,
        /// Search radius in metres.
        radius: f64,
    },

    /// Facet tile activated: toggles the facet's first option.
    ToggleFacet {
        field_id: String,
    },

    /// A specific facet option toggled.
    ToggleFacetOption {
        field_id: String,
        value: String,
    },

    /// Drops the highlight back to "nothing highlighted".
    ClearHighlight,

    /// A card or a pin was picked.
    SelectLocation {
        location_id: String,
    },

    /// Applied filter chip removed.
    RemoveFilter {
        field_id: String,
    },

    /// Pagination control; `page` is zero-based.
    ChangePage {
        page: usize,
    },

    OpenFacetPanel,

    /// Closes the facet overlay (both "Apply" and "Cancel").
    CloseFacetPanel,

    /// A worker response arrived.
    SearchResponse(SearchResponse),
}

/// Issues a query for the current state.
fn execute_query(state: &mut AppState) -> Action {
    Action::PostToWorker(SearchMessage::execute_vertical_query(state.issue_query()))
}

/// Issues a query for a changed query or filter set, starting at page 0.
fn execute_from_first_page(state: &mut AppState) -> Action {
    state.executor.set_page(0);
    execute_query(state)
}

/// Processes an event, mutates state and returns `(re-render, actions)`.
///
/// # Errors
///
/// Returns [`LocatorError::Search`] for a geolocation radius that is negative
/// or not finite.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Mount { search } => {
            let params = QueryParams::parse(search);
            state.query = QuerySync::initial_query(&params);
            state.params = params;

            tracing::debug!(
                vertical = %state.vertical,
                query = ?state.query,
                "mounting locator"
            );

            Ok((true, vec![execute_from_first_page(state)]))
        }

        Event::SubmitSearch { query, params } => {
            state.query = if query.is_empty() { None } else { Some(query.clone()) };

            let next = QuerySync::on_submit(params, query);
            let search = next.to_search_string();
            state.params = next;

            tracing::debug!(query = %query, search = %search, "search submitted");

            Ok((true, vec![execute_from_first_page(state), Action::PushHistory { search }]))
        }

        Event::MapDragEnd(drag) => {
            let filter = RadiusFilterDeriver::derive(drag);
            state.filter_set.replace_location_filter(filter);
            Ok((true, vec![execute_from_first_page(state)]))
        }

        Event::UseGeolocation { position, radius } => {
            if !radius.is_finite() || *radius < 0.0 {
                return Err(LocatorError::Search(format!("invalid geolocation radius: {radius}")));
            }
            tracing::debug!(lat = position.lat, lng = position.lng, radius, "using device position");
            let filter = RadiusFilterDeriver::from_position(*position, *radius, CURRENT_LOCATION);
            state.filter_set.replace_location_filter(filter);
            Ok((true, vec![execute_from_first_page(state)]))
        }

        Event::ToggleFacet { field_id } => toggle_facet(state, field_id, None),

        Event::ToggleFacetOption { field_id, value } => toggle_facet(state, field_id, Some(value)),

        Event::ClearHighlight => {
            if state.highlight.highlighted().is_none() {
                return Ok((false, vec![]));
            }
            state.highlight.clear_highlight();
            Ok((true, vec![Action::BroadcastHighlight(state.highlight_snapshot())]))
        }

        Event::SelectLocation { location_id } => {
            if !state.locations.iter().any(|l| &l.id == location_id) {
                tracing::debug!(location_id = %location_id, "selected location not in results");
                return Ok((false, vec![]));
            }
            state.selected_location_id = Some(location_id.clone());
            Ok((
                true,
                vec![Action::LocationSelected {
                    location_id: location_id.clone(),
                }],
            ))
        }

        Event::RemoveFilter { field_id } => {
            if !state.remove_filter(field_id) {
                return Ok((false, vec![]));
            }
            tracing::debug!(field_id = %field_id, "filter removed");
            Ok((true, vec![execute_from_first_page(state)]))
        }

        Event::ChangePage { page } => {
            let page_count = state.executor.page_count(state.result_count);
            if *page == state.executor.page() || *page >= page_count {
                tracing::debug!(page, page_count, "page change ignored");
                return Ok((false, vec![]));
            }
            state.executor.set_page(*page);
            Ok((true, vec![execute_query(state)]))
        }

        Event::OpenFacetPanel => {
            if !state.facets_enabled {
                return Ok((false, vec![]));
            }
            state.panel_mode = PanelMode::Facets;
            Ok((true, vec![]))
        }

        Event::CloseFacetPanel => {
            let changed = state.panel_mode != PanelMode::Results;
            state.panel_mode = PanelMode::Results;
            Ok((changed, vec![]))
        }

        Event::SearchResponse(response) => handle_search_response(state, response),
    }
}

/// Flips a facet option, highlights it and re-runs the query.
fn toggle_facet(state: &mut AppState, field_id: &str, value: Option<&String>) -> Result<(bool, Vec<Action>)> {
    let Some(identity) = state.toggle_facet_option(field_id, value.map(String::as_str)) else {
        tracing::debug!(field_id = %field_id, value = ?value, "facet option not found");
        return Ok((false, vec![]));
    };

    state.highlight.set_highlighted(identity);

    Ok((
        true,
        vec![
            Action::BroadcastHighlight(state.highlight_snapshot()),
            execute_from_first_page(state),
        ],
    ))
}

fn handle_search_response(state: &mut AppState, response: &SearchResponse) -> Result<(bool, Vec<Action>)> {
    match response {
        SearchResponse::QueryCompleted { sequence, results } => match state.executor.complete(*sequence) {
            Completion::Apply => {
                state.apply_results(results.clone());
                Ok((true, vec![]))
            }
            Completion::Stale => Ok((false, vec![])),
        },

        SearchResponse::QueryFailed { sequence, message } => match state.executor.fail(*sequence) {
            Completion::Apply => {
                tracing::warn!(sequence, error = %message, "vertical query failed");
                state.last_error = Some(message.clone());
                Ok((true, vec![]))
            }
            Completion::Stale => {
                tracing::debug!(sequence, error = %message, "ignoring failure of superseded query");
                Ok((false, vec![]))
            }
        },

        SearchResponse::IndexLoaded { count } => {
            tracing::debug!(count, "index reloaded, refreshing results");
            Ok((true, vec![execute_from_first_page(state)]))
        }

        SearchResponse::Error { message } => {
            tracing::warn!(error = %message, "search worker error");
            state.last_error = Some(message.clone());
            Ok((true, vec![]))
        }
    }
}
