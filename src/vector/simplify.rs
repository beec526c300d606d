//! Douglas-Peucker polyline simplification
//!
//! The absolute tolerance is `epsilon_factor × perimeter`, so the same factor
//! behaves consistently for small specks and canvas-spanning strokes.

use crate::vector::geometry::{Point, Polyline, perpendicular_distance};
use bitvec::vec::BitVec;

/// Reduce a polyline to the vertices that deviate more than the tolerance
///
/// Returns `None` when fewer than two vertices would remain.
pub fn simplify(polyline: &Polyline, epsilon_factor: f64) -> Option<Polyline> {
    let tolerance = epsilon_factor * polyline.perimeter();
    let points = polyline.points();

    let reduced = if polyline.is_closed() {
        simplify_closed(points, tolerance)
    } else {
        douglas_peucker(points, tolerance)
    };

    (reduced.len() >= 2).then(|| Polyline::new(reduced, polyline.is_closed()))
}

/// Douglas-Peucker on an open point sequence; both endpoints are always kept
pub fn douglas_peucker(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut keep: BitVec = BitVec::repeat(false, points.len());
    keep.set(0, true);
    keep.set(last, true);

    // Explicit stack: traced contours can have thousands of vertices
    let mut stack = vec![(0usize, last)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }
        let (Some(&a), Some(&b)) = (points.get(start), points.get(end)) else {
            continue;
        };

        let mut max_distance = 0.0;
        let mut max_index = start;
        for (index, point) in points.iter().enumerate().take(end).skip(start + 1) {
            let distance = perpendicular_distance(*point, a, b);
            if distance > max_distance {
                max_distance = distance;
                max_index = index;
            }
        }

        if max_distance > tolerance {
            keep.set(max_index, true);
            stack.push((start, max_index));
            stack.push((max_index, end));
        }
    }

    points
        .iter()
        .zip(keep.iter())
        .filter_map(|(point, kept)| kept.then_some(*point))
        .collect()
}

// Anchors a closed loop at its first vertex and the vertex farthest from it,
// then simplifies both halves as open chains
fn simplify_closed(points: &[Point], tolerance: f64) -> Vec<Point> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    if points.len() < 3 {
        return points.to_vec();
    }

    let far_index = points
        .iter()
        .enumerate()
        .fold((0, 0.0), |(best, best_distance), (index, point)| {
            let distance = point.distance(first);
            if distance > best_distance {
                (index, distance)
            } else {
                (best, best_distance)
            }
        })
        .0;

    if far_index == 0 {
        return vec![first];
    }

    let outbound = points.get(..=far_index).unwrap_or(points);
    let mut inbound: Vec<Point> = points.get(far_index..).unwrap_or(&[]).to_vec();
    inbound.push(first);

    let mut reduced = douglas_peucker(outbound, tolerance);
    let returning = douglas_peucker(&inbound, tolerance);
    // Drop the shared far vertex and the repeated first vertex
    let interior = returning.len().saturating_sub(1);
    reduced.extend(returning.into_iter().take(interior).skip(1));
    reduced
}
