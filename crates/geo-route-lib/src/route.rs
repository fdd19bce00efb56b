//! Route storage module
//!
//! This module provides the `Route` struct: a connected chain of features where adjacent
//! features differ in name, with precomputed metadata like total length and segment count.

use crate::{GeoError, GeoFeature, GeoPoint, GeoSegment, Result};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A travel path across one or more geographic features
///
/// Consecutive segments sharing a name are merged into one [`GeoFeature`], so two adjacent
/// features never have the same name, and each feature starts where the previous one ends.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<GeoSegment>", into = "Vec<GeoSegment>")
)]
pub struct Route {
    /// Ordered, non-empty, immutable feature chain
    features: Arc<[GeoFeature]>,
    /// Cached total length in kilometres (computed once during construction)
    cached_length: f64,
    /// Cached total number of segments (computed once during construction)
    cached_segment_count: usize,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Route {
    /// Create a route made of a single segment
    pub fn new(segment: GeoSegment) -> Self {
        let feature = GeoFeature::new(segment);
        Self {
            cached_length: feature.length(),
            cached_segment_count: 1,
            features: Arc::from([feature]),
        }
    }

    /// Build a route from an ordered sequence of segments
    ///
    /// Equivalent to [`Route::new`] on the first segment followed by
    /// [`Route::add_segment`] for each of the others, done in a single pass.
    ///
    /// # Returns
    /// The route, [`GeoError::EmptyPath`] if there are no segments, or
    /// [`GeoError::NonContiguousSegment`] for the first segment that does not start where the
    /// previous one ends
    pub fn from_segments<I>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = GeoSegment>,
    {
        #[cfg(feature = "profiling")]
        profiling::scope!("route::from_segments");

        let mut iter = segments.into_iter();
        let first = iter.next().ok_or(GeoError::EmptyPath)?;

        // Group consecutive same-named segments before building any feature
        let mut end = first.p2();
        let mut groups: Vec<Vec<GeoSegment>> = vec![vec![first]];
        for segment in iter {
            if segment.p1() != end {
                return Err(GeoError::NonContiguousSegment {
                    expected: end,
                    found: segment.p1(),
                });
            }
            end = segment.p2();

            let last_group = groups.len() - 1;
            if groups[last_group][0].name() == segment.name() {
                groups[last_group].push(segment);
            } else {
                groups.push(vec![segment]);
            }
        }

        let features = groups
            .into_iter()
            .map(GeoFeature::from_segments)
            .collect::<Result<Vec<_>>>()?;

        let cached_length = features.iter().map(GeoFeature::length).sum();
        let cached_segment_count = features.iter().map(GeoFeature::len).sum();

        tracing::debug!(
            "Built route with {} features and {} segments",
            features.len(),
            cached_segment_count
        );

        Ok(Self {
            features: Arc::from(features),
            cached_length,
            cached_segment_count,
        })
    }

    /// Return a new route with `segment` appended
    ///
    /// If `segment` has the same name as the last feature, that feature is extended with it;
    /// otherwise it starts a new feature. `self` is left untouched.
    ///
    /// # Returns
    /// The extended route, or [`GeoError::NonContiguousSegment`] if `segment` does not start
    /// at [`end`](Route::end)
    pub fn add_segment(&self, segment: GeoSegment) -> Result<Self> {
        if segment.p1() != self.end() {
            return Err(GeoError::NonContiguousSegment {
                expected: self.end(),
                found: segment.p1(),
            });
        }

        let cached_length = self.cached_length + segment.length();
        let last_feature = self.last_feature();

        let features: Vec<GeoFeature> = if last_feature.name() == segment.name() {
            let merged = last_feature.add_segment(segment)?;
            let kept = &self.features[..self.features.len() - 1];

            let mut features = Vec::with_capacity(self.features.len());
            features.extend_from_slice(kept);
            features.push(merged);
            features
        } else {
            tracing::trace!(
                "Route leaves {:?} for {:?}",
                last_feature.name(),
                segment.name()
            );

            let mut features = Vec::with_capacity(self.features.len() + 1);
            features.extend_from_slice(&self.features);
            features.push(GeoFeature::new(segment));
            features
        };

        Ok(Self {
            features: Arc::from(features),
            cached_length,
            cached_segment_count: self.cached_segment_count + 1,
        })
    }

    #[inline]
    fn first_feature(&self) -> &GeoFeature {
        &self.features[0]
    }

    #[inline]
    fn last_feature(&self) -> &GeoFeature {
        &self.features[self.features.len() - 1]
    }

    /// Start point of the route
    #[inline]
    pub fn start(&self) -> GeoPoint {
        self.first_feature().start()
    }

    /// End point of the route
    #[inline]
    pub fn end(&self) -> GeoPoint {
        self.last_feature().end()
    }

    /// Heading of the first segment, `None` if it is degenerate
    #[inline]
    pub fn start_heading(&self) -> Option<f64> {
        self.first_feature().start_heading()
    }

    /// Heading of the last segment, `None` if it is degenerate
    #[inline]
    pub fn end_heading(&self) -> Option<f64> {
        self.last_feature().end_heading()
    }

    /// Total length in kilometres
    ///
    /// This is O(1) as the value is cached during construction.
    #[inline]
    pub fn length(&self) -> f64 {
        self.cached_length
    }

    /// Number of features, always at least one
    #[inline]
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Number of segments across all features
    ///
    /// This is O(1) as the value is cached during construction.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.cached_segment_count
    }

    /// The features in order, from start to end
    #[inline]
    pub fn features(&self) -> &[GeoFeature] {
        &self.features
    }

    /// Iterate over every segment of every feature, in order
    pub fn segments(&self) -> impl Iterator<Item = &GeoSegment> + '_ {
        self.features.iter().flat_map(GeoFeature::iter)
    }

    /// Polyline through every vertex of the route, in degrees (x = longitude)
    pub fn to_line_string(&self) -> geo::LineString<f64> {
        let coords = std::iter::once(self.start())
            .chain(self.segments().map(GeoSegment::p2))
            .map(geo::Coord::from)
            .collect::<Vec<_>>();
        geo::LineString::new(coords)
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.features == other.features
    }
}

impl Eq for Route {}

impl Hash for Route {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.features.hash(state);
    }
}

impl TryFrom<Vec<GeoSegment>> for Route {
    type Error = GeoError;

    fn try_from(segments: Vec<GeoSegment>) -> Result<Self> {
        Self::from_segments(segments)
    }
}

impl From<Route> for Vec<GeoSegment> {
    fn from(route: Route) -> Self {
        route.segments().cloned().collect()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Route from {} to {} ({} features, {:.3} km)",
            self.start(),
            self.end(),
            self.feature_count(),
            self.length()
        )
    }
}
