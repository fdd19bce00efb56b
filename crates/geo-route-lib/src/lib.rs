//! Geo Route Library - Immutable value types for named geographic paths
//!
//! This library represents travel paths made of straight-line segments and measures them.
//! Raw point-to-point segments carry a name (a street, a river), consecutive segments with
//! the same name are aggregated into features, and features are chained into routes.
//!
//! # Architecture
//!
//! - **[`GeoPoint`]**: Fixed-precision latitude/longitude with flat-earth distance and heading
//! - **[`GeoSegment`]**: Named straight-line edge between two points
//! - **[`GeoFeature`]**: Connected chain of segments sharing one name
//! - **[`Route`]**: Connected chain of features, adjacent features differing in name
//!
//! Every type is immutable. Extending a feature or a route with
//! [`add_segment`](Route::add_segment) returns a new value and leaves the original untouched,
//! so values can be shared freely between threads.
//!
//! # Example
//!
//! ```
//! use geo_route_lib::{GeoPoint, GeoSegment, Route};
//!
//! let a = GeoPoint::new(32_783_098, 35_014_528)?;
//! let b = GeoPoint::new(32_784_000, 35_014_528)?;
//! let c = GeoPoint::new(32_784_000, 35_016_000)?;
//!
//! let route = Route::new(GeoSegment::new("Main St", a, b))
//!     .add_segment(GeoSegment::new("Side St", b, c))?;
//!
//! assert_eq!(route.feature_count(), 2);
//! assert_eq!(route.end(), c);
//! # Ok::<(), geo_route_lib::GeoError>(())
//! ```

mod feature;
mod point;
mod route;
mod segment;
pub mod utils;

// Public API exports
pub use feature::GeoFeature;
pub use point::GeoPoint;
pub use route::Route;
pub use segment::GeoSegment;

/// Error types for path construction
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeoError {
    #[error("Coordinate out of range: latitude {latitude}, longitude {longitude} (millionths of a degree)")]
    CoordinateOutOfRange { latitude: i32, longitude: i32 },

    #[error("Non-finite coordinate: latitude {latitude}, longitude {longitude}")]
    NonFiniteCoordinate { latitude: f64, longitude: f64 },

    #[error("Non-contiguous segment: expected it to start at {expected}, found {found}")]
    NonContiguousSegment { expected: GeoPoint, found: GeoPoint },

    #[error("Name mismatch: expected segment named {expected:?}, found {found:?}")]
    NameMismatch { expected: String, found: String },

    #[error("Empty path")]
    EmptyPath,
}

pub type Result<T> = std::result::Result<T, GeoError>;
