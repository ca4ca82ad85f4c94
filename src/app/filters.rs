//! Active static filter set with a reserved location slot.
//!
//! The set is an ordered list. At most one filter may carry the
//! `builtin.location` field id; installing a new one evicts the previous one
//! while every other filter keeps its relative position.
//!
//! Filters are never patched in place. Each mutation rebuilds the list so a
//! snapshot taken for an in-flight query is never affected by later gestures.

use crate::domain::{StaticFilter, LOCATION_FIELD_ID};

/// Ordered set of static filters sent with the next vertical query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    filters: Vec<StaticFilter>,
}

impl FilterSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Builds a set from an initial list, keeping only the last location filter.
    #[must_use]
    pub fn from_filters(filters: Vec<StaticFilter>) -> Self {
        let mut set = Self::new();
        for filter in filters {
            if filter.is_location() {
                set.replace_location_filter(filter);
            } else {
                set.filters.push(filter);
            }
        }
        set
    }

    /// Removes any existing location filter, then appends `filter`.
    ///
    /// # Examples
    ///
    /// ```
    /// use storefinder::app::{FilterSet, RadiusFilterDeriver, CURRENT_LOCATION};
    /// use storefinder::domain::GeoPoint;
    ///
    /// let near_a = RadiusFilterDeriver::from_position(GeoPoint::new(45.46, 9.19), 2_000.0, CURRENT_LOCATION);
    /// let near_b = RadiusFilterDeriver::from_position(GeoPoint::new(45.07, 7.68), 5_000.0, CURRENT_LOCATION);
    ///
    /// let mut set = FilterSet::new();
    /// set.replace_location_filter(near_a);
    /// set.replace_location_filter(near_b.clone());
    /// assert_eq!(set.location_filter(), Some(&near_b));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn replace_location_filter(&mut self, filter: StaticFilter) {
        let rebuilt: Vec<StaticFilter> = self
            .filters
            .iter()
            .filter(|f| !f.is_location())
            .cloned()
            .chain(std::iter::once(filter))
            .collect();

        tracing::trace!(
            previous = self.filters.len(),
            current = rebuilt.len(),
            "location filter replaced"
        );

        self.filters = rebuilt;
    }

    /// Drops every filter on `field_id`. Returns whether anything was removed.
    pub fn remove_field(&mut self, field_id: &str) -> bool {
        let rebuilt: Vec<StaticFilter> = self
            .filters
            .iter()
            .filter(|f| f.field_id != field_id)
            .cloned()
            .collect();
        let removed = rebuilt.len() != self.filters.len();
        self.filters = rebuilt;
        removed
    }

    /// The filter list used for the next query execution.
    #[must_use]
    pub fn current(&self) -> &[StaticFilter] {
        &self.filters
    }

    /// The filter occupying the location slot, if any.
    #[must_use]
    pub fn location_filter(&self) -> Option<&StaticFilter> {
        self.filters.iter().find(|f| f.field_id == LOCATION_FIELD_ID)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
