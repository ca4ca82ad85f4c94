//! Geo-search state coordinator.
//!
//! Keeps the active query, the derived radius filter, facet selections and the
//! cross-view highlight consistent while queries run asynchronously.
//!
//! # Architecture
//!
//! Data flows in one direction:
//!
//! ```text
//! User / Map → Event → handle_event → AppState → Actions → Worker / History / Subscribers
//!                          ↑                                      │
//!                          └────────── SearchResponse ────────────┘
//! ```
//!
//! # Modules
//!
//! - [`query_sync`]: `query` parameter seeding and write-back
//! - [`filters`]: static filter set with the reserved location slot
//! - [`radius`]: location filters from map drags and device positions
//! - [`colors`]: deterministic facet-option colors
//! - [`highlight`]: the single shared highlight cell and its snapshots
//! - [`bridge`]: card and pin decorations from one snapshot
//! - [`executor`]: sequenced query issuing, stale-response discard, paging
//! - [`modes`]: loading and panel state machines
//! - [`state`]: central state container and view model computation
//! - [`actions`]: side effects emitted by the handler
//! - [`handler`]: event processing

pub mod actions;
pub mod bridge;
pub mod colors;
pub mod executor;
pub mod filters;
pub mod handler;
pub mod highlight;
pub mod modes;
pub mod query_sync;
pub mod radius;
pub mod state;

pub use actions::Action;
pub use bridge::{CardDecoration, CrossViewDecorations, CrossViewHighlightBridge, PinDecoration};
pub use colors::{Color, FacetColorMapper, DEFAULT_FACET_PALETTE};
pub use executor::{Completion, SearchExecutor, DEFAULT_PAGE_SIZE};
pub use filters::FilterSet;
pub use handler::{handle_event, Event};
pub use highlight::{HighlightSnapshot, HighlightState, HighlightSubscriber};
pub use modes::{LoadingState, PanelMode};
pub use query_sync::{QueryParams, QuerySync, QUERY_PARAM, TYPE_PARAM};
pub use radius::{RadiusFilterDeriver, CURRENT_LOCATION, NEAR_CURRENT_AREA};
pub use state::AppState;
