//! Vector stages: geometry primitives, tracing, and simplification

/// Stroke following on thinned masks
pub mod centerline;
/// Border following on binary masks
pub mod contour;
/// Points, polylines, segments, and coordinate mapping
pub mod geometry;
/// Douglas-Peucker simplification
pub mod simplify;

pub use geometry::{Extent, PixelToUnitScale, Point, Polyline, Segment};
