//! Fixed-precision geographic point
//!
//! Coordinates are stored as integers in millionths of a degree so that equality and hashing
//! are exact. Distances and headings use a flat-earth approximation with fixed scale factors
//! tuned for a reference location near 32.78N 35.01E, which is accurate enough for paths
//! spanning a few kilometres around it.

use crate::{GeoError, Result, utils};
use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point on the earth, north latitudes and east longitudes positive
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGeoPoint"))]
pub struct GeoPoint {
    /// Latitude in millionths of a degree
    latitude: i32,
    /// Longitude in millionths of a degree
    longitude: i32,
}

/// Unvalidated wire form, checked through [`GeoPoint::new`] on deserialization
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: i32,
    longitude: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = GeoError;

    fn try_from(raw: RawGeoPoint) -> Result<Self> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    /// Minimum latitude, in millionths of a degree
    pub const MIN_LATITUDE: i32 = -90 * 1_000_000;
    /// Maximum latitude, in millionths of a degree
    pub const MAX_LATITUDE: i32 = 90 * 1_000_000;
    /// Minimum longitude, in millionths of a degree
    pub const MIN_LONGITUDE: i32 = -180 * 1_000_000;
    /// Maximum longitude, in millionths of a degree
    pub const MAX_LONGITUDE: i32 = 180 * 1_000_000;

    /// Kilometres per degree of latitude at the reference location
    pub const KM_PER_DEGREE_LATITUDE: f64 = 110.901;
    /// Kilometres per degree of longitude at the reference location
    pub const KM_PER_DEGREE_LONGITUDE: f64 = 93.681;

    /// Multiplier mixing latitude into the hash
    pub const HASH_FACTOR: i64 = 11;
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl GeoPoint {
    /// Create a new point from coordinates in millionths of a degree
    ///
    /// # Arguments
    /// * `latitude` - Latitude, `-90_000_000..=90_000_000`
    /// * `longitude` - Longitude, `-180_000_000..=180_000_000`
    ///
    /// # Returns
    /// The point, or [`GeoError::CoordinateOutOfRange`] if either value is out of range
    pub fn new(latitude: i32, longitude: i32) -> Result<Self> {
        let lat_ok = (Self::MIN_LATITUDE..=Self::MAX_LATITUDE).contains(&latitude);
        let lon_ok = (Self::MIN_LONGITUDE..=Self::MAX_LONGITUDE).contains(&longitude);
        if !(lat_ok && lon_ok) {
            return Err(GeoError::CoordinateOutOfRange {
                latitude,
                longitude,
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a new point from decimal degrees, rounded to the nearest millionth
    pub fn from_degrees(latitude: f64, longitude: f64) -> Result<Self> {
        match (
            utils::degrees_to_millionths(latitude),
            utils::degrees_to_millionths(longitude),
        ) {
            (Some(lat), Some(lon)) => Self::new(lat, lon),
            _ => Err(GeoError::NonFiniteCoordinate {
                latitude,
                longitude,
            }),
        }
    }

    /// Latitude in millionths of a degree
    #[inline]
    pub fn latitude(&self) -> i32 {
        self.latitude
    }

    /// Longitude in millionths of a degree
    #[inline]
    pub fn longitude(&self) -> i32 {
        self.longitude
    }

    /// Latitude in decimal degrees
    #[inline]
    pub fn latitude_degrees(&self) -> f64 {
        utils::millionths_to_degrees(self.latitude)
    }

    /// Longitude in decimal degrees
    #[inline]
    pub fn longitude_degrees(&self) -> f64 {
        utils::millionths_to_degrees(self.longitude)
    }

    /// Flat-earth distance to another point in kilometres
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let (d_lat, d_lon) = self.degree_deltas(other);
        let north_km = d_lat * Self::KM_PER_DEGREE_LATITUDE;
        let east_km = d_lon * Self::KM_PER_DEGREE_LONGITUDE;
        north_km.hypot(east_km)
    }

    /// Compass heading to another point in degrees
    ///
    /// The result is in `[0, 360)`, 0 is north and values increase clockwise.
    /// Returns `None` when `other` is this point, since a zero-length vector has no direction.
    pub fn heading_to(&self, other: &GeoPoint) -> Option<f64> {
        if self == other {
            return None;
        }
        let (d_lat, d_lon) = self.degree_deltas(other);
        Some(utils::math_angle_to_compass(
            d_lat.atan2(d_lon).to_degrees(),
        ))
    }

    /// Signed (latitude, longitude) differences from this point to `other`, in degrees
    #[inline]
    fn degree_deltas(&self, other: &GeoPoint) -> (f64, f64) {
        // i64 so that antipodal longitudes cannot overflow
        let d_lat = other.latitude as i64 - self.latitude as i64;
        let d_lon = other.longitude as i64 - self.longitude as i64;
        (
            d_lat as f64 / utils::MILLIONTHS_PER_DEGREE,
            d_lon as f64 / utils::MILLIONTHS_PER_DEGREE,
        )
    }
}

impl Hash for GeoPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Self::HASH_FACTOR * self.latitude as i64 + self.longitude as i64).hash(state);
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.6}, {:.6})",
            self.latitude_degrees(),
            self.longitude_degrees()
        )
    }
}

impl From<GeoPoint> for geo::Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        geo::Coord {
            x: point.longitude_degrees(),
            y: point.latitude_degrees(),
        }
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        geo::Point::new(point.longitude_degrees(), point.latitude_degrees())
    }
}

impl TryFrom<geo::Point<f64>> for GeoPoint {
    type Error = GeoError;

    fn try_from(point: geo::Point<f64>) -> Result<Self> {
        GeoPoint::from_degrees(point.y(), point.x())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::collections::hash_map::DefaultHasher;

    fn point(lat: i32, lon: i32) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    fn hash_of(p: &GeoPoint) -> u64 {
        let mut hasher = DefaultHasher::new();
        p.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_point_creation() {
        let ziv = point(32_783_098, 35_014_528);
        assert_eq!(ziv.latitude(), 32_783_098);
        assert_eq!(ziv.longitude(), 35_014_528);
        assert_abs_diff_eq!(ziv.latitude_degrees(), 32.783098, epsilon = 1e-9);
        assert_abs_diff_eq!(ziv.longitude_degrees(), 35.014528, epsilon = 1e-9);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(GeoPoint::new(GeoPoint::MAX_LATITUDE, GeoPoint::MAX_LONGITUDE).is_ok());
        assert!(GeoPoint::new(GeoPoint::MIN_LATITUDE, GeoPoint::MIN_LONGITUDE).is_ok());
    }

    #[test]
    fn test_out_of_range_fails() {
        assert_eq!(
            GeoPoint::new(90_000_001, 0),
            Err(GeoError::CoordinateOutOfRange {
                latitude: 90_000_001,
                longitude: 0
            })
        );
        assert!(GeoPoint::new(0, -180_000_001).is_err());
        assert!(GeoPoint::new(i32::MIN, i32::MAX).is_err());
    }

    #[test]
    fn test_from_degrees() {
        let p = GeoPoint::from_degrees(32.783098, 35.014528).unwrap();
        assert_eq!(p, point(32_783_098, 35_014_528));

        assert!(matches!(
            GeoPoint::from_degrees(f64::NAN, 0.0),
            Err(GeoError::NonFiniteCoordinate { .. })
        ));
        assert!(matches!(
            GeoPoint::from_degrees(0.0, 181.0),
            Err(GeoError::CoordinateOutOfRange { .. })
        ));
        assert!(matches!(
            GeoPoint::from_degrees(1.0e10, 0.0),
            Err(GeoError::CoordinateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        for p in [point(0, 0), point(32_783_098, 35_014_528), point(-90_000_000, 180_000_000)] {
            assert_eq!(p.distance_to(&p), 0.0);
        }
    }

    #[test]
    fn test_distance_uses_scale_factors() {
        let origin = point(0, 0);
        assert_relative_eq!(
            origin.distance_to(&point(1_000_000, 0)),
            GeoPoint::KM_PER_DEGREE_LATITUDE
        );
        assert_relative_eq!(
            origin.distance_to(&point(0, 1_000_000)),
            GeoPoint::KM_PER_DEGREE_LONGITUDE
        );
        let diagonal = origin.distance_to(&point(1_000_000, 1_000_000));
        assert_relative_eq!(
            diagonal,
            GeoPoint::KM_PER_DEGREE_LATITUDE.hypot(GeoPoint::KM_PER_DEGREE_LONGITUDE)
        );
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = point(32_783_098, 35_014_528);
        let b = point(32_778_000, 35_021_000);
        assert_relative_eq!(a.distance_to(&b), b.distance_to(&a));
    }

    #[test]
    fn test_distance_across_antimeridian_does_not_overflow() {
        let west = point(0, GeoPoint::MIN_LONGITUDE);
        let east = point(0, GeoPoint::MAX_LONGITUDE);
        assert_relative_eq!(
            west.distance_to(&east),
            360.0 * GeoPoint::KM_PER_DEGREE_LONGITUDE
        );
    }

    #[test]
    fn test_heading_cardinals() {
        let origin = point(0, 0);
        assert_abs_diff_eq!(origin.heading_to(&point(1_000_000, 0)).unwrap(), 0.0);
        assert_abs_diff_eq!(origin.heading_to(&point(0, 1_000_000)).unwrap(), 90.0);
        assert_abs_diff_eq!(origin.heading_to(&point(-1_000_000, 0)).unwrap(), 180.0);
        assert_abs_diff_eq!(origin.heading_to(&point(0, -1_000_000)).unwrap(), 270.0);
        assert_abs_diff_eq!(
            origin.heading_to(&point(1_000_000, 1_000_000)).unwrap(),
            45.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_heading_to_self_is_undefined() {
        let p = point(32_783_098, 35_014_528);
        assert_eq!(p.heading_to(&p), None);
    }

    #[test]
    fn test_heading_range() {
        let center = point(0, 0);
        for lat in (-3..=3).map(|i| i * 250_000) {
            for lon in (-3..=3).map(|i| i * 250_000) {
                let other = point(lat, lon);
                if other == center {
                    continue;
                }
                let heading = center.heading_to(&other).unwrap();
                assert!((0.0..360.0).contains(&heading), "heading {heading}");
            }
        }
        // Just west of north stays below a full turn.
        let heading = center.heading_to(&point(90_000_000, -1)).unwrap();
        assert!((0.0..360.0).contains(&heading), "heading {heading}");
    }

    #[test]
    fn test_equality_and_hash() {
        let a = point(32_783_098, 35_014_528);
        let b = point(32_783_098, 35_014_528);
        let c = point(32_783_098, 35_014_529);

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, c);
    }

    #[test]
    fn test_display() {
        let p = point(32_783_098, -35_014_528);
        assert_eq!(p.to_string(), "(32.783098, -35.014528)");
    }

    #[test]
    fn test_geo_conversions() {
        let p = point(32_783_098, 35_014_528);
        let geo_point: geo::Point<f64> = p.into();
        assert_abs_diff_eq!(geo_point.x(), 35.014528, epsilon = 1e-9);
        assert_abs_diff_eq!(geo_point.y(), 32.783098, epsilon = 1e-9);

        let coord: geo::Coord<f64> = p.into();
        assert_abs_diff_eq!(coord.x, geo_point.x());

        let back = GeoPoint::try_from(geo_point).unwrap();
        assert_eq!(back, p);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_validates_ranges() {
        let p = point(1, 2);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"latitude":1,"longitude":2}"#);
        assert_eq!(serde_json::from_str::<GeoPoint>(&json).unwrap(), p);

        let bad = r#"{"latitude":100000000,"longitude":0}"#;
        assert!(serde_json::from_str::<GeoPoint>(bad).is_err());
    }
}
