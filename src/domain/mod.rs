//! Domain layer for the store locator.
//!
//! Core types shared by the coordinator, the search worker and the view layer,
//! independent of any particular search service, map provider or renderer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`geo`]: Coordinates, bounds, drag gestures and great-circle distance
//! - [`filter`]: Static filter clauses and the reserved location field
//! - [`facet`]: Facets and facet options returned with results
//! - [`location`]: Result rows and vertical query request/response shapes

pub mod error;
pub mod facet;
pub mod filter;
pub mod geo;
pub mod location;

pub use error::{LocatorError, Result};
pub use facet::{Facet, FacetOption};
pub use filter::{FilterValue, Matcher, NearFilterValue, StaticFilter, LOCATION_FIELD_ID};
pub use geo::{GeoBounds, GeoPoint, ViewportDrag};
pub use location::{Location, SearchRequest, SearchResults};
