//! Centerline tracing: follow the 1-px strokes of a thinned mask as polylines
//!
//! Pixels are linked with m-adjacency: a diagonal link exists only when neither
//! of the two shared side pixels is set, so staircase steps never read as
//! junctions. Chains run between nodes (pixels with a link count other than
//! two). Components made only of two-link pixels become closed loops.
//!
//! Each stroke is traced once, unlike region borders which follow both sides
//! of a thin stroke.

use crate::raster::mask::BinaryMask;
use crate::vector::contour::ContourConfig;
use crate::vector::geometry::{Point, Polyline};
use bitvec::vec::BitVec;

/// Link directions as `(dx, dy)`, clockwise from east in image space
const DIRECTIONS: [(isize, isize); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

const fn opposite(direction: usize) -> usize {
    (direction + 4) % 8
}

/// Link bookkeeping over the foreground pixels of a mask
struct LinkGraph<'a> {
    mask: &'a BinaryMask,
    nodes: BitVec,
    used: Vec<u8>,
}

impl<'a> LinkGraph<'a> {
    fn new(mask: &'a BinaryMask) -> Self {
        let cells = mask.width() * mask.height();
        let mut graph = Self {
            mask,
            nodes: BitVec::repeat(false, cells),
            used: vec![0; cells],
        };
        for ((y, x), &cell) in mask.cells().indexed_iter() {
            if cell && graph.degree(x, y) != 2 {
                let index = graph.index(x, y);
                graph.nodes.set(index, true);
            }
        }
        graph
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.mask.width() + x
    }

    fn neighbour(&self, x: usize, y: usize, direction: usize) -> Option<(usize, usize)> {
        let &(dx, dy) = DIRECTIONS.get(direction)?;
        let (sx, sy) = (x as isize, y as isize);
        if !self.mask.get_signed(sx + dx, sy + dy) {
            return None;
        }
        if dx != 0
            && dy != 0
            && (self.mask.get_signed(sx + dx, sy) || self.mask.get_signed(sx, sy + dy))
        {
            return None;
        }
        Some(((sx + dx) as usize, (sy + dy) as usize))
    }

    fn degree(&self, x: usize, y: usize) -> usize {
        (0..DIRECTIONS.len())
            .filter(|&direction| self.neighbour(x, y, direction).is_some())
            .count()
    }

    fn is_node(&self, (x, y): (usize, usize)) -> bool {
        self.nodes
            .get(self.index(x, y))
            .is_some_and(|bit| *bit)
    }

    fn is_used(&self, (x, y): (usize, usize), direction: usize) -> bool {
        self.used
            .get(self.index(x, y))
            .is_some_and(|links| links & (1 << direction) != 0)
    }

    fn mark(&mut self, from: (usize, usize), direction: usize, to: (usize, usize)) {
        let (a, b) = (self.index(from.0, from.1), self.index(to.0, to.1));
        if let Some(links) = self.used.get_mut(a) {
            *links |= 1 << direction;
        }
        if let Some(links) = self.used.get_mut(b) {
            *links |= 1 << opposite(direction);
        }
    }

    fn next_link(&self, pixel: (usize, usize)) -> Option<(usize, (usize, usize))> {
        (0..DIRECTIONS.len()).find_map(|direction| {
            self.neighbour(pixel.0, pixel.1, direction)
                .filter(|_| !self.is_used(pixel, direction))
                .map(|next| (direction, next))
        })
    }

    /// Walk from `start` through `direction` until a node or the start is reached
    fn follow(&mut self, start: (usize, usize), direction: usize, first: (usize, usize)) -> Polyline {
        let mut pixels = vec![start];
        let mut link = (direction, first);
        let mut from = start;

        for _ in 0..self.used.len() {
            let (step, current) = link;
            self.mark(from, step, current);
            pixels.push(current);
            if current == start || self.is_node(current) {
                break;
            }
            let Some(next) = self.next_link(current) else {
                break;
            };
            from = current;
            link = next;
        }

        let closed = pixels.len() > 2 && pixels.first() == pixels.last();
        if closed {
            pixels.pop();
        }
        let points = pixels
            .into_iter()
            .map(|(x, y)| Point::new(x as f64, y as f64))
            .collect();
        Polyline::new(points, closed)
    }

    /// Trace every chain leaving `pixel` through an unused link
    fn trace_from(&mut self, pixel: (usize, usize), chains: &mut Vec<Polyline>) {
        while let Some((direction, first)) = self.next_link(pixel) {
            chains.push(self.follow(pixel, direction, first));
        }
    }
}

/// Trace the strokes of a one-pixel-wide mask, dropping chains below the noise floor
///
/// Open chains are kept by length alone; `min_area` applies to closed loops.
pub fn trace_centerlines(mask: &BinaryMask, config: &ContourConfig) -> Vec<Polyline> {
    let mut graph = LinkGraph::new(mask);
    let foreground: Vec<(usize, usize)> = mask
        .cells()
        .indexed_iter()
        .filter(|&(_, &cell)| cell)
        .map(|((y, x), _)| (x, y))
        .collect();

    let nodes: Vec<(usize, usize)> = foreground
        .iter()
        .copied()
        .filter(|&pixel| graph.is_node(pixel))
        .collect();

    // Chains between nodes first, then the remaining loops
    let mut chains = Vec::new();
    for pixel in nodes.into_iter().chain(foreground) {
        graph.trace_from(pixel, &mut chains);
    }
    let found = chains.len();

    let polylines: Vec<Polyline> = chains
        .into_iter()
        .filter(|polyline| polyline.perimeter() >= config.min_perimeter)
        .filter(|polyline| !polyline.is_closed() || polyline.area() >= config.min_area)
        .collect();

    tracing::debug!(found, kept = polylines.len(), "traced centerlines");
    polylines
}
