//! Named straight-line segment between two points

use crate::GeoPoint;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A straight-line edge from `p1` to `p2` carrying the name of what it belongs to
///
/// The name identifies the real-world feature the segment is part of (a street, a river),
/// and is what [`GeoFeature`](crate::GeoFeature) and [`Route`](crate::Route) use to group
/// consecutive segments. Equality is order-sensitive: a segment and its
/// [`reverse`](GeoSegment::reverse) are different values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoSegment {
    /// Feature name, shared between clones
    name: Arc<str>,
    /// Start point
    p1: GeoPoint,
    /// End point
    p2: GeoPoint,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl GeoSegment {
    /// Create a new segment
    ///
    /// `p1` and `p2` may be equal; such a degenerate segment has zero length and no heading.
    pub fn new(name: impl Into<Arc<str>>, p1: GeoPoint, p2: GeoPoint) -> Self {
        Self {
            name: name.into(),
            p1,
            p2,
        }
    }

    /// Same segment traversed in the opposite direction
    pub fn reverse(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            p1: self.p2,
            p2: self.p1,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn p1(&self) -> GeoPoint {
        self.p1
    }

    #[inline]
    pub fn p2(&self) -> GeoPoint {
        self.p2
    }

    /// Length in kilometres
    #[inline]
    pub fn length(&self) -> f64 {
        self.p1.distance_to(&self.p2)
    }

    /// Compass heading from `p1` to `p2` in degrees, `None` for a degenerate segment
    #[inline]
    pub fn heading(&self) -> Option<f64> {
        self.p1.heading_to(&self.p2)
    }

    /// Whether both endpoints coincide
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.p1 == self.p2
    }
}

impl fmt::Display for GeoSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {} to {}", self.name, self.p1, self.p2)
    }
}

impl From<&GeoSegment> for geo::Line<f64> {
    fn from(segment: &GeoSegment) -> Self {
        geo::Line::new(geo::Coord::from(segment.p1), geo::Coord::from(segment.p2))
    }
}
