//! Centerline extraction by iterative thinning
//!
//! Two alternating Zhang–Suen sub-iterations peel boundary pixels until a full
//! pass removes nothing. Candidates of a sub-iteration are marked against the
//! state at its start, then removed in scan order after a re-test against the
//! current state. A pixel is only removed while its remaining neighbours form
//! one connected run, so components never split or vanish (a 2×2 block thins to
//! a pair) and thinning a skeleton again returns it unchanged.

use crate::raster::mask::BinaryMask;
use bitvec::vec::BitVec;

/// Neighbour offsets `P2..P9` clockwise from north, as `(dx, dy)`
const RING: [(isize, isize); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubIteration {
    SouthEast,
    NorthWest,
}

/// Thin a mask to a one-pixel-wide skeleton
pub fn skeletonize(mask: &BinaryMask) -> BinaryMask {
    let mut thinned = mask.clone();
    let mut passes = 0usize;

    loop {
        let removed = thin_pass(&mut thinned, SubIteration::SouthEast)
            + thin_pass(&mut thinned, SubIteration::NorthWest);
        passes += 1;
        if removed == 0 {
            break;
        }
    }

    tracing::debug!(
        passes,
        before = mask.foreground_count(),
        after = thinned.foreground_count(),
        "skeletonized mask"
    );
    thinned
}

fn thin_pass(mask: &mut BinaryMask, step: SubIteration) -> usize {
    let width = mask.width();
    let mut candidates: BitVec = BitVec::repeat(false, width * mask.height());
    for ((y, x), &cell) in mask.cells().indexed_iter() {
        if cell && is_deletable(mask, x, y, step) {
            candidates.set(y * width + x, true);
        }
    }

    let mut removed = 0;
    for index in candidates.iter_ones() {
        let (x, y) = (index % width, index / width);
        if is_deletable(mask, x, y, step) {
            mask.set(x, y, false);
            removed += 1;
        }
    }
    removed
}

fn is_deletable(mask: &BinaryMask, x: usize, y: usize, step: SubIteration) -> bool {
    let ring = RING.map(|(dx, dy)| mask.get_signed(x as isize + dx, y as isize + dy));
    let [p2, _p3, p4, _p5, p6, _p7, p8, _p9] = ring;

    let neighbours = ring.iter().filter(|&&set| set).count();
    if !(2..=6).contains(&neighbours) {
        return false;
    }

    // Exactly one background-to-foreground transition around the ring
    let transitions = (0..8)
        .filter(|&i| {
            let current = ring.get(i).copied().unwrap_or(false);
            let next = ring.get((i + 1) % 8).copied().unwrap_or(false);
            !current && next
        })
        .count();
    if transitions != 1 {
        return false;
    }

    match step {
        SubIteration::SouthEast => !(p2 && p4 && p6) && !(p4 && p6 && p8),
        SubIteration::NorthWest => !(p2 && p4 && p8) && !(p2 && p6 && p8),
    }
}
