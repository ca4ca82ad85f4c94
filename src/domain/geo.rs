//! Geographic primitives used by map gestures and radius filters.
//!
//! Distances follow the haversine great-circle formula on a sphere with the
//! mean earth radius, which is what the map view uses when it reports
//! `LngLat::distanceTo`.

use serde::{Deserialize, Serialize};

/// Mean earth radius in metres.
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to `other` in metres.
    ///
    /// Always non-negative. Identical points yield exactly `0.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use storefinder::domain::GeoPoint;
    ///
    /// let a = GeoPoint::new(40.0, -73.0);
    /// assert_eq!(a.distance_to(&a), 0.0);
    ///
    /// let b = GeoPoint::new(41.0, -73.0);
    /// let meters = a.distance_to(&b);
    /// assert!((meters - 111_195.0).abs() < 100.0);
    /// ```
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());

        (EARTH_RADIUS_METERS * c).max(0.0)
    }
}

/// Axis-aligned viewport bounds reported by the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl GeoBounds {
    #[must_use]
    pub const fn new(south_west: GeoPoint, north_east: GeoPoint) -> Self {
        Self { south_west, north_east }
    }

    /// Whether `point` lies inside the box (edges inclusive, no antimeridian wrap).
    #[must_use]
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }
}

/// A drag-end gesture emitted by the map view.
///
/// Ephemeral: produced once per gesture and consumed immediately to derive a
/// radius filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportDrag {
    pub center: GeoPoint,
    pub bounds: GeoBounds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(40.0, -73.0);
        let b = GeoPoint::new(40.1, -72.9);
        let ab = a.distance_to(&b);
        let ba = b.distance_to(&a);
        assert!((ab - ba).abs() < 1e-6);
        assert!(ab > 13_000.0 && ab < 14_500.0, "unexpected distance {ab}");
    }

    #[test]
    fn antipodal_points_do_not_produce_nan() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);
        let d = a.distance_to(&b);
        assert!(d.is_finite());
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_METERS).abs() < 1.0);
    }

    #[test]
    fn bounds_contain_edges() {
        let bounds = GeoBounds::new(GeoPoint::new(39.9, -73.1), GeoPoint::new(40.1, -72.9));
        assert!(bounds.contains(&GeoPoint::new(40.0, -73.0)));
        assert!(bounds.contains(&GeoPoint::new(40.1, -72.9)));
        assert!(!bounds.contains(&GeoPoint::new(40.2, -73.0)));
    }
}
