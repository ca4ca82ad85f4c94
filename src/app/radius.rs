//! Derivation of location radius filters from map gestures.
//!
//! The radius is the great-circle distance from the viewport center to the
//! north-east corner of the visible bounds. That over-covers the viewport on
//! purpose so results at the visible edges are not clipped while panning.

use crate::domain::{FilterValue, GeoPoint, Matcher, NearFilterValue, StaticFilter, ViewportDrag, LOCATION_FIELD_ID};

/// Display name of filters derived from a map drag.
pub const NEAR_CURRENT_AREA: &str = "Near Current Area";

/// Display name of filters derived from the device position.
pub const CURRENT_LOCATION: &str = "Current Location";

/// Converts map gestures and device positions into location filters.
#[derive(Debug, Clone, Copy, Default)]
pub struct RadiusFilterDeriver;

impl RadiusFilterDeriver {
    /// Radius in metres covering the dragged viewport.
    ///
    /// Degenerate bounds (north-east corner equal to the center) yield `0.0`,
    /// which is passed through unchanged.
    #[must_use]
    pub fn radius_for(drag: &ViewportDrag) -> f64 {
        drag.center.distance_to(&drag.bounds.north_east)
    }

    /// Builds the `Near Current Area` filter for a drag-end gesture.
    ///
    /// # Examples
    ///
    /// ```
    /// use storefinder::app::RadiusFilterDeriver;
    /// use storefinder::domain::{GeoBounds, GeoPoint, Matcher, ViewportDrag};
    ///
    /// let drag = ViewportDrag {
    ///     center: GeoPoint::new(40.0, -73.0),
    ///     bounds: GeoBounds::new(GeoPoint::new(39.9, -73.1), GeoPoint::new(40.1, -72.9)),
    /// };
    /// let filter = RadiusFilterDeriver::derive(&drag);
    /// assert_eq!(filter.matcher, Matcher::Near);
    /// assert!(filter.value.as_near().unwrap().radius > 0.0);
    /// ```
    #[must_use]
    pub fn derive(drag: &ViewportDrag) -> StaticFilter {
        let radius = Self::radius_for(drag);

        tracing::debug!(
            center_lat = drag.center.lat,
            center_lng = drag.center.lng,
            radius_m = radius,
            "derived radius filter from viewport drag"
        );

        Self::from_position(drag.center, radius, NEAR_CURRENT_AREA)
    }

    /// Builds a location filter around an arbitrary point.
    #[must_use]
    pub fn from_position(center: GeoPoint, radius: f64, display_name: &str) -> StaticFilter {
        StaticFilter {
            field_id: LOCATION_FIELD_ID.to_string(),
            matcher: Matcher::Near,
            value: FilterValue::Near(NearFilterValue {
                lat: center.lat,
                lng: center.lng,
                radius,
            }),
            selected: true,
            display_name: display_name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GeoBounds;

    #[test]
    fn derived_filter_carries_center_and_corner_distance() {
        let center = GeoPoint::new(40.0, -73.0);
        let north_east = GeoPoint::new(40.1, -72.9);
        let drag = ViewportDrag {
            center,
            bounds: GeoBounds::new(GeoPoint::new(39.9, -73.1), north_east),
        };

        let filter = RadiusFilterDeriver::derive(&drag);
        let near = filter.value.as_near().copied().unwrap();

        assert_eq!(filter.field_id, LOCATION_FIELD_ID);
        assert_eq!(filter.display_name, NEAR_CURRENT_AREA);
        assert!(filter.selected);
        assert_eq!((near.lat, near.lng), (40.0, -73.0));
        assert!((near.radius - center.distance_to(&north_east)).abs() < f64::EPSILON);
    }

    #[test]
    fn degenerate_bounds_pass_zero_radius_through() {
        let center = GeoPoint::new(45.0, 9.0);
        let drag = ViewportDrag {
            center,
            bounds: GeoBounds::new(center, center),
        };
        assert_eq!(RadiusFilterDeriver::radius_for(&drag), 0.0);
    }
}
