//! Points, polylines, segments, and the pixel-to-pattern coordinate mapping

use std::ops::{Add, Mul, Sub};

/// A 2D point or vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product with another vector
    pub fn dot(self, other: Self) -> f64 {
        self.x.mul_add(other.x, self.y * other.y)
    }

    /// Euclidean length of the vector
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// Unit vector at `degrees` counter-clockwise from +X
    pub fn from_angle(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(cos, sin)
    }

    /// Whether both coordinates are finite
    pub const fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Perpendicular distance from `point` to the infinite line through `a` and `b`
///
/// Falls back to the distance to `a` when the chord is degenerate.
pub fn perpendicular_distance(point: Point, a: Point, b: Point) -> f64 {
    let chord = b - a;
    let length = chord.length();
    if length < f64::EPSILON {
        return point.distance(a);
    }
    let offset = point - a;
    (offset.x * chord.y - offset.y * chord.x).abs() / length
}

/// An ordered point sequence, open or closed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    points: Vec<Point>,
    closed: bool,
}

impl Polyline {
    /// Create a polyline
    pub const fn new(points: Vec<Point>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Vertices in order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Whether the last vertex connects back to the first
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether there are no vertices
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total edge length, including the closing edge of closed polylines
    pub fn perimeter(&self) -> f64 {
        let open: f64 = self
            .points
            .windows(2)
            .map(|pair| match pair {
                [a, b] => a.distance(*b),
                _ => 0.0,
            })
            .sum();

        let closing = match (self.closed, self.points.first(), self.points.last()) {
            (true, Some(first), Some(last)) => last.distance(*first),
            _ => 0.0,
        };
        open + closing
    }

    /// Absolute enclosed area by the shoelace formula (0 for open polylines)
    pub fn area(&self) -> f64 {
        if !self.closed || self.points.len() < 3 {
            return 0.0;
        }
        let twice: f64 = self
            .points
            .iter()
            .zip(self.points.iter().cycle().skip(1))
            .map(|(a, b)| a.x.mul_add(b.y, -(b.x * a.y)))
            .sum();
        twice.abs() / 2.0
    }

    /// Consecutive vertex pairs as segments
    ///
    /// Closed polylines with at least three vertices also yield the closing edge.
    /// A closed two-vertex polyline is an out-and-back stroke and yields one segment.
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments: Vec<Segment> = self
            .points
            .windows(2)
            .filter_map(|pair| match pair {
                [a, b] => Some(Segment::new(*a, *b)),
                _ => None,
            })
            .collect();

        if self.closed && self.points.len() >= 3 {
            if let (Some(first), Some(last)) = (self.points.first(), self.points.last()) {
                segments.push(Segment::new(*last, *first));
            }
        }
        segments
    }
}

/// A directed straight segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start point
    pub p1: Point,
    /// End point
    pub p2: Point,
}

impl Segment {
    /// Create a segment
    pub const fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// Create a segment from raw coordinates `(x1, y1, x2, y2)`
    pub const fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    /// Euclidean length
    pub fn length(&self) -> f64 {
        self.p1.distance(self.p2)
    }

    /// Direction in degrees, normalized to `[0, 360)`
    pub fn angle_degrees(&self) -> f64 {
        let delta = self.p2 - self.p1;
        let degrees = delta.y.atan2(delta.x).to_degrees();
        if degrees < 0.0 { degrees + 360.0 } else { degrees }
    }

    /// Midpoint of the segment
    pub fn midpoint(&self) -> Point {
        (self.p1 + self.p2) * 0.5
    }

    /// Whether the segment has no usable direction
    pub fn is_degenerate(&self) -> bool {
        !self.p1.is_finite() || !self.p2.is_finite() || self.length() < f64::EPSILON
    }
}

/// Mapping from working-canvas pixels to Y-up pattern units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelToUnitScale {
    /// Pattern units per horizontal pixel
    pub scale_x: f64,
    /// Pattern units per vertical pixel
    pub scale_y: f64,
    /// Canvas height in pixels, used to flip the Y axis
    pub canvas_height: f64,
}

impl PixelToUnitScale {
    /// Derive the scale from the tile size and the working canvas size
    pub fn new(tile_width: f64, tile_height: f64, canvas_width: usize, canvas_height: usize) -> Self {
        let canvas_width = canvas_width.max(1) as f64;
        let canvas_height = canvas_height.max(1) as f64;
        Self {
            scale_x: tile_width / canvas_width,
            scale_y: tile_height / canvas_height,
            canvas_height,
        }
    }

    /// Convert an image-space point (Y down) to pattern space (Y up)
    pub const fn to_units(&self, point: Point) -> Point {
        Point::new(
            point.x * self.scale_x,
            (self.canvas_height - point.y) * self.scale_y,
        )
    }

    /// Convert both endpoints of an image-space segment
    pub const fn segment_to_units(&self, segment: &Segment) -> Segment {
        Segment::new(self.to_units(segment.p1), self.to_units(segment.p2))
    }
}

/// Axis-aligned bounding extent of externally supplied geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Lower-left corner
    pub min: Point,
    /// Upper-right corner
    pub max: Point,
}

impl Extent {
    /// Create an extent from its corners
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Smallest extent covering every finite endpoint, or `None` for no input
    pub fn from_segments(segments: &[Segment]) -> Option<Self> {
        let mut points = segments
            .iter()
            .flat_map(|segment| [segment.p1, segment.p2])
            .filter(|point| point.is_finite());
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some(Self { min, max })
    }

    /// Horizontal size
    pub const fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Vertical size
    pub const fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}
