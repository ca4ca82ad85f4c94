//! Index record models.
//!
//! Records are the on-disk shape of the location index. They are kept apart
//! from the domain [`Location`] so the file format can carry fields (city,
//! raw coordinates, facet definitions) that results expose differently.

use crate::domain::{GeoPoint, Location};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current index file format version.
pub const INDEX_VERSION: u32 = 1;

/// One indexed location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub city: String,

    pub latitude: f64,

    pub longitude: f64,

    /// Filterable entity fields. Facet fields hold strings or string arrays.
    #[serde(default)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl LocationRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: String::new(),
            city: String::new(),
            latitude,
            longitude,
            fields: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>, city: impl Into<String>) -> Self {
        self.address = address.into();
        self.city = city.into();
        self
    }

    #[must_use]
    pub fn with_field(mut self, field_id: impl Into<String>, value: serde_json::Value) -> Self {
        self.fields.insert(field_id.into(), value);
        self
    }

    #[must_use]
    pub const fn coordinate(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// String values of a field: the string itself, each string of an array,
    /// or the JSON rendering of a scalar.
    #[must_use]
    pub fn field_values(&self, field_id: &str) -> Vec<String> {
        match self.fields.get(field_id) {
            None | Some(serde_json::Value::Null) => Vec::new(),
            Some(serde_json::Value::String(s)) => vec![s.clone()],
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(s) => Some(s.clone()),
                    serde_json::Value::Null => None,
                    other => Some(other.to_string()),
                })
                .collect(),
            Some(other) => vec![other.to_string()],
        }
    }

    /// Converts to a result row, with `distance` from the active location filter.
    #[must_use]
    pub fn to_location(&self, distance: Option<f64>) -> Location {
        let address = match (self.address.is_empty(), self.city.is_empty()) {
            (false, false) => format!("{}, {}", self.address, self.city),
            (false, true) => self.address.clone(),
            (true, _) => self.city.clone(),
        };

        Location {
            id: self.id.clone(),
            name: self.name.clone(),
            address,
            coordinate: self.coordinate(),
            distance,
            fields: self.fields.clone(),
        }
    }
}

/// A field exposed as a facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetField {
    pub field_id: String,
    pub display_name: String,
}

/// Top-level index document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexData {
    pub version: u32,

    #[serde(default)]
    pub facet_fields: Vec<FacetField>,

    #[serde(default)]
    pub locations: Vec<LocationRecord>,
}

impl Default for IndexData {
    fn default() -> Self {
        Self {
            version: INDEX_VERSION,
            facet_fields: Vec::new(),
            locations: Vec::new(),
        }
    }
}
