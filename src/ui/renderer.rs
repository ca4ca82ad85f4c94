//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process: compute a [`LocatorViewModel`] from
//! [`AppState`], then let the components write the frame. The whole frame is
//! built in memory first and written to stdout in one call.
//!
//! # Example
//!
//! ```
//! use storefinder::app::AppState;
//! use storefinder::ui::{render_to_string, Theme};
//!
//! let state = AppState::new("locations", Theme::default());
//! let frame = render_to_string(&state, 24, 80);
//! assert!(frame.contains("Loading locations..."));
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::LocatorViewModel;
use std::io::Write;

/// Renders a frame for a `rows` x `cols` terminal into a string.
#[must_use]
pub fn render_to_string(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);
    render_viewmodel(&viewmodel, &state.theme, rows, cols)
}

/// Renders a frame to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let frame = render_to_string(state, rows, cols);
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(frame.as_bytes()).and_then(|()| stdout.flush()) {
        tracing::debug!(error = %e, "failed to write frame");
    }
}

fn render_viewmodel(vm: &LocatorViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let mut out = String::with_capacity(rows * cols * 4);

    if let Some(panel) = &vm.facet_panel {
        components::render_facets_mode(&mut out, vm, panel, theme, cols, rows);
    } else {
        components::render_results_mode(&mut out, vm, theme, cols, rows);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::PanelMode;
    use crate::domain::{Facet, FacetOption, GeoPoint, Location, SearchResults};
    use std::collections::BTreeMap;

    fn ready_state() -> AppState {
        let mut state = AppState::new("locations", Theme::default()).with_facets_enabled(true);
        let request = state.issue_query();
        state.executor.complete(request.sequence);
        state.apply_results(SearchResults {
            locations: vec![Location {
                id: "1".to_string(),
                name: "Duomo Store".to_string(),
                address: "Piazza del Duomo 1, Milano".to_string(),
                coordinate: GeoPoint::new(45.464, 9.19),
                distance: Some(420.0),
                fields: BTreeMap::new(),
            }],
            facets: vec![Facet {
                field_id: "c_services".to_string(),
                display_name: "Wheelchair Accessible".to_string(),
                options: vec![FacetOption {
                    value: "Wheelchair Accessible".to_string(),
                    display_name: None,
                    selected: false,
                    count: 1,
                }],
            }],
            result_count: 1,
        });
        state
    }

    #[test]
    fn results_frame_contains_cards() {
        let frame = render_to_string(&ready_state(), 24, 80);
        assert!(frame.contains("Duomo Store"));
        assert!(frame.contains("420 m"));
        assert!(frame.contains("1 result"));
    }

    #[test]
    fn facet_frame_shows_tiles_with_icons() {
        let mut state = ready_state();
        state.panel_mode = PanelMode::Facets;
        let frame = render_to_string(&state, 24, 120);
        assert!(frame.contains("Filters & Features"));
        assert!(frame.contains("/icons/wheelchair-accessible.svg"));
        assert!(!frame.contains("Duomo Store"));
    }
}
