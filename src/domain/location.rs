//! Location result model and the request/response shapes of a vertical query.

use super::facet::Facet;
use super::filter::StaticFilter;
use super::geo::GeoPoint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single location returned by a vertical query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub coordinate: GeoPoint,
    /// Distance in metres from the active location filter center, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Remaining entity fields, passed through to renderers untouched.
    #[serde(default)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

/// Everything the search service needs to answer one vertical query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Monotonic sequence number assigned by the executor.
    pub sequence: u64,
    pub vertical: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default)]
    pub static_filters: Vec<StaticFilter>,
    /// Facets carrying the user's current option selections.
    #[serde(default)]
    pub facets: Vec<Facet>,
    pub offset: usize,
    pub limit: usize,
}

impl SearchRequest {
    /// Iterates the `(field_id, value)` pairs of selected facet options.
    pub fn selected_facet_options(&self) -> impl Iterator<Item = (&str, &str)> {
        self.facets.iter().flat_map(|facet| {
            facet
                .options
                .iter()
                .filter(|o| o.selected)
                .map(move |o| (facet.field_id.as_str(), o.value.as_str()))
        })
    }
}

/// Results of a vertical query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub locations: Vec<Location>,
    #[serde(default)]
    pub facets: Vec<Facet>,
    /// Total matches before pagination.
    pub result_count: usize,
}
