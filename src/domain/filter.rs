//! Static filter model.
//!
//! A static filter is a clause set by the application itself, as opposed to a
//! facet option toggled by the end user. The search service interprets the
//! field, matcher and value; the coordinator only assembles them.

use serde::{Deserialize, Serialize};

/// Field id of the reserved location radius filter.
pub const LOCATION_FIELD_ID: &str = "builtin.location";

/// Comparison applied between a field and a filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Matcher {
    #[serde(rename = "$eq")]
    Equals,
    #[serde(rename = "!$eq")]
    NotEquals,
    #[serde(rename = "$lt")]
    LessThan,
    #[serde(rename = "$le")]
    LessThanOrEqualTo,
    #[serde(rename = "$gt")]
    GreaterThan,
    #[serde(rename = "$ge")]
    GreaterThanOrEqualTo,
    #[serde(rename = "$between")]
    Between,
    #[serde(rename = "$near")]
    Near,
}

/// Center and radius of a proximity filter. Radius is in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearFilterValue {
    pub lat: f64,
    pub lng: f64,
    pub radius: f64,
}

/// Value side of a filter clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Near(NearFilterValue),
    Number(f64),
    Bool(bool),
    Text(String),
}

impl FilterValue {
    /// Returns the proximity payload when this is a `Near` value.
    #[must_use]
    pub const fn as_near(&self) -> Option<&NearFilterValue> {
        match self {
            Self::Near(near) => Some(near),
            _ => None,
        }
    }
}

/// A selectable static filter as held in the active filter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticFilter {
    pub field_id: String,
    pub matcher: Matcher,
    pub value: FilterValue,
    pub selected: bool,
    pub display_name: String,
}

impl StaticFilter {
    /// Whether this filter occupies the reserved location slot.
    #[must_use]
    pub fn is_location(&self) -> bool {
        self.field_id == LOCATION_FIELD_ID
    }
}
