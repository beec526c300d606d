//! Grouping quantized segments into colinear line families
//!
//! Each segment is keyed by its snapped angle and by its perpendicular offset
//! rounded to a tolerance band. Members of one key are projected onto the
//! family axis and merged into disjoint drawn intervals.

use crate::math::numeric::LENGTH_EPSILON;
use crate::pattern::angle::AngleSet;
use crate::vector::geometry::{Point, Segment};
use std::collections::BTreeMap;

/// Clustering thresholds, all in pattern units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterConfig {
    /// Canonical directions available to families
    pub angle_set: AngleSet,
    /// Width of the perpendicular offset band shared by one family
    pub offset_tolerance: f64,
    /// Segments shorter than this are dropped as degenerate
    pub min_segment_length: f64,
    /// Families drawing less than this in total are discarded
    pub min_family_length: f64,
    /// Families with fewer member segments are discarded
    pub min_family_segments: usize,
}

/// A drawn stretch along a family axis, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Parallel coordinate where drawing starts
    pub start: f64,
    /// Parallel coordinate where drawing stops
    pub end: f64,
}

impl Interval {
    /// Create an interval, ordering the bounds
    pub const fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Drawn length
    pub const fn length(&self) -> f64 {
        self.end - self.start
    }
}

/// A family before its repeat vector and dash sequence are resolved
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyCluster {
    /// Quantized angle in `[0, 180)`
    pub angle: f64,
    /// Length-weighted mean perpendicular offset along `N = (-sin θ, cos θ)`
    pub offset: f64,
    /// Sorted, disjoint drawn intervals along `U = (cos θ, sin θ)`
    pub intervals: Vec<Interval>,
    /// Number of member segments
    pub segment_count: usize,
}

impl FamilyCluster {
    /// Unit vector along the family
    pub fn direction(&self) -> Point {
        Point::from_angle(self.angle)
    }

    /// Unit normal of the family
    pub fn normal(&self) -> Point {
        let u = self.direction();
        Point::new(-u.y, u.x)
    }

    /// Sum of all drawn interval lengths
    pub fn drawn_length(&self) -> f64 {
        self.intervals.iter().map(Interval::length).sum()
    }
}

/// Result of clustering one batch of segments
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClusterReport {
    /// Surviving families sorted by angle, then offset
    pub families: Vec<FamilyCluster>,
    /// Segments dropped for being zero-length, non-finite, or too short
    pub degenerate_segments: usize,
    /// Families dropped by the noise floor
    pub discarded_families: usize,
}

#[derive(Default)]
struct Accumulator {
    intervals: Vec<Interval>,
    weighted_offset: f64,
    total_length: f64,
    members: usize,
}

/// Quantize, key, and merge segments into line families
pub fn cluster_segments(segments: &[Segment], config: &ClusterConfig) -> ClusterReport {
    let angles = config.angle_set.angles();
    let band = config.offset_tolerance.max(LENGTH_EPSILON);
    let mut groups: BTreeMap<(usize, i64), Accumulator> = BTreeMap::new();
    let mut degenerate_segments = 0;

    for segment in segments {
        let length = segment.length();
        if segment.is_degenerate() || length < config.min_segment_length {
            degenerate_segments += 1;
            continue;
        }

        let index = config.angle_set.nearest_index(segment.angle_degrees());
        let angle = angles.get(index).copied().unwrap_or(0.0);
        let u = Point::from_angle(angle);
        let n = Point::new(-u.y, u.x);

        let offset = segment.midpoint().dot(n);
        let key = (index, (offset / band).round() as i64);

        let group = groups.entry(key).or_default();
        group
            .intervals
            .push(Interval::new(segment.p1.dot(u), segment.p2.dot(u)));
        group.weighted_offset += offset * length;
        group.total_length += length;
        group.members += 1;
    }

    let mut families = Vec::new();
    let mut discarded_families = 0;

    for ((index, _band), group) in groups {
        let cluster = FamilyCluster {
            angle: angles.get(index).copied().unwrap_or(0.0),
            offset: group.weighted_offset / group.total_length,
            intervals: merge_intervals(group.intervals),
            segment_count: group.members,
        };

        if cluster.segment_count < config.min_family_segments
            || cluster.drawn_length() < config.min_family_length
        {
            discarded_families += 1;
            continue;
        }
        families.push(cluster);
    }

    families.sort_by(|a, b| a.angle.total_cmp(&b.angle).then(a.offset.total_cmp(&b.offset)));

    tracing::debug!(
        families = families.len(),
        degenerate_segments,
        discarded_families,
        "clustered segments into families"
    );

    ClusterReport {
        families,
        degenerate_segments,
        discarded_families,
    }
}

/// Sort intervals and merge those that touch or overlap
pub fn merge_intervals(mut intervals: Vec<Interval>) -> Vec<Interval> {
    intervals.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match merged.last_mut() {
            Some(current) if interval.start <= current.end + LENGTH_EPSILON => {
                current.end = current.end.max(interval.end);
            }
            _ => merged.push(interval),
        }
    }
    merged
}
