//! Named feature storage module
//!
//! This module provides the `GeoFeature` struct: a connected chain of segments that all
//! carry the same name, with its total length precomputed.

use crate::{GeoError, GeoPoint, GeoSegment, Result};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A geographic feature, such as a street or a river, made of connected same-named segments
///
/// The chain is never empty, every segment has the feature's name, and each segment starts
/// where the previous one ends. These hold by construction: the only ways to build a feature
/// are [`GeoFeature::new`], [`GeoFeature::add_segment`] and [`GeoFeature::from_segments`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<GeoSegment>", into = "Vec<GeoSegment>")
)]
pub struct GeoFeature {
    /// Ordered, non-empty, immutable segment chain
    segments: Arc<[GeoSegment]>,
    /// Cached total length in kilometres (computed once during construction)
    cached_length: f64,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl GeoFeature {
    /// Create a feature holding a single segment, named after it
    pub fn new(segment: GeoSegment) -> Self {
        let cached_length = segment.length();
        Self {
            segments: Arc::from([segment]),
            cached_length,
        }
    }

    /// Build a feature from an ordered sequence of segments
    ///
    /// # Returns
    /// The feature, [`GeoError::EmptyPath`] if there are no segments, or the same errors as
    /// [`GeoFeature::add_segment`] for the first segment that does not extend the chain
    pub fn from_segments<I>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = GeoSegment>,
    {
        #[cfg(feature = "profiling")]
        profiling::scope!("feature::from_segments");

        let mut iter = segments.into_iter();
        let first = iter.next().ok_or(GeoError::EmptyPath)?;

        let mut cached_length = first.length();
        let mut chain = vec![first];
        for segment in iter {
            let last = &chain[chain.len() - 1];
            Self::check_extends(last.name(), last.p2(), &segment)?;
            cached_length += segment.length();
            chain.push(segment);
        }

        Ok(Self {
            segments: Arc::from(chain),
            cached_length,
        })
    }

    /// Return a new feature with `segment` appended
    ///
    /// `self` is left untouched.
    ///
    /// # Returns
    /// The extended feature, [`GeoError::NonContiguousSegment`] if `segment` does not start
    /// at [`end`](GeoFeature::end), or [`GeoError::NameMismatch`] if it is named differently
    pub fn add_segment(&self, segment: GeoSegment) -> Result<Self> {
        Self::check_extends(self.name(), self.end(), &segment)?;

        let cached_length = self.cached_length + segment.length();
        let mut chain = Vec::with_capacity(self.segments.len() + 1);
        chain.extend_from_slice(&self.segments);
        chain.push(segment);

        tracing::trace!(
            "Extended feature {:?} to {} segments",
            self.name(),
            chain.len()
        );

        Ok(Self {
            segments: Arc::from(chain),
            cached_length,
        })
    }

    /// Check that `segment` may follow a chain named `name` that ends at `end`
    fn check_extends(name: &str, end: GeoPoint, segment: &GeoSegment) -> Result<()> {
        if segment.p1() != end {
            return Err(GeoError::NonContiguousSegment {
                expected: end,
                found: segment.p1(),
            });
        }
        if segment.name() != name {
            return Err(GeoError::NameMismatch {
                expected: name.to_string(),
                found: segment.name().to_string(),
            });
        }
        Ok(())
    }

    #[inline]
    fn first_segment(&self) -> &GeoSegment {
        &self.segments[0]
    }

    #[inline]
    fn last_segment(&self) -> &GeoSegment {
        &self.segments[self.segments.len() - 1]
    }

    /// Name shared by every segment
    #[inline]
    pub fn name(&self) -> &str {
        self.first_segment().name()
    }

    /// Start point of the first segment
    #[inline]
    pub fn start(&self) -> GeoPoint {
        self.first_segment().p1()
    }

    /// End point of the last segment
    #[inline]
    pub fn end(&self) -> GeoPoint {
        self.last_segment().p2()
    }

    /// Heading of the first segment, `None` if it is degenerate
    #[inline]
    pub fn start_heading(&self) -> Option<f64> {
        self.first_segment().heading()
    }

    /// Heading of the last segment, `None` if it is degenerate
    #[inline]
    pub fn end_heading(&self) -> Option<f64> {
        self.last_segment().heading()
    }

    /// Total length in kilometres
    ///
    /// This is O(1) as the value is cached during construction.
    #[inline]
    pub fn length(&self) -> f64 {
        self.cached_length
    }

    /// Number of segments, always at least one
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; present for API symmetry with `len`
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The segments in order, from start to end
    #[inline]
    pub fn segments(&self) -> &[GeoSegment] {
        &self.segments
    }

    /// Iterate over the segments in order
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, GeoSegment> {
        self.segments.iter()
    }

    /// Polyline through every vertex of the feature, in degrees (x = longitude)
    pub fn to_line_string(&self) -> geo::LineString<f64> {
        let coords = std::iter::once(self.start())
            .chain(self.segments.iter().map(GeoSegment::p2))
            .map(geo::Coord::from)
            .collect::<Vec<_>>();
        geo::LineString::new(coords)
    }
}

impl PartialEq for GeoFeature {
    /// Element-wise comparison of the whole chain, last segment included
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for GeoFeature {}

impl Hash for GeoFeature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segments.hash(state);
    }
}

impl<'a> IntoIterator for &'a GeoFeature {
    type Item = &'a GeoSegment;
    type IntoIter = std::slice::Iter<'a, GeoSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<Vec<GeoSegment>> for GeoFeature {
    type Error = GeoError;

    fn try_from(segments: Vec<GeoSegment>) -> Result<Self> {
        Self::from_segments(segments)
    }
}

impl From<GeoFeature> for Vec<GeoSegment> {
    fn from(feature: GeoFeature) -> Self {
        feature.segments.to_vec()
    }
}

impl fmt::Display for GeoFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} from {} to {} ({} segments, {:.3} km)",
            self.name(),
            self.start(),
            self.end(),
            self.len(),
            self.length()
        )
    }
}
