//! Snapping segment directions to the canonical hatch angles
//!
//! A line and its 180° rotation describe the same family, so every direction
//! is reduced modulo 180° before snapping, and distances between angles are
//! measured on that 180° circle.

use crate::math::numeric::{circular_distance, wrap};

/// Half-turn period of undirected line angles
pub const HALF_TURN: f64 = 180.0;

/// Angle of the 2:1 brick-bond diagonal, `atan(1/2)` in degrees
pub const BRICK_SHALLOW: f64 = 26.565_051_177_077_99;
/// Angle of the 1:2 brick-bond diagonal, `atan(2)` in degrees
pub const BRICK_STEEP: f64 = 63.434_948_822_922_01;

const BASIC_ANGLES: [f64; 4] = [0.0, 45.0, 90.0, 135.0];
const BRICK_BOND_ANGLES: [f64; 8] = [
    0.0,
    45.0,
    90.0,
    135.0,
    BRICK_SHALLOW,
    BRICK_STEEP,
    HALF_TURN - BRICK_STEEP,
    HALF_TURN - BRICK_SHALLOW,
];

/// The fixed set of directions families may take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleSet {
    /// Horizontal, vertical, and the two diagonals
    #[default]
    Basic,
    /// The basic set plus the four ±26.565°/±63.435° brick-bond diagonals
    BrickBond,
}

impl AngleSet {
    /// Members of the set in tie-breaking order, all in `[0, 180)`
    pub const fn angles(self) -> &'static [f64] {
        match self {
            Self::Basic => &BASIC_ANGLES,
            Self::BrickBond => &BRICK_BOND_ANGLES,
        }
    }

    /// Index of the member nearest to `degrees` (any real value)
    ///
    /// Ties resolve to the member listed first.
    pub fn nearest_index(self, degrees: f64) -> usize {
        let axis = line_axis(degrees);
        self.angles()
            .iter()
            .enumerate()
            .fold((0, f64::INFINITY), |(best, best_distance), (index, &member)| {
                let distance = circular_distance(axis, member, HALF_TURN);
                if distance < best_distance {
                    (index, distance)
                } else {
                    (best, best_distance)
                }
            })
            .0
    }

    /// Snap `degrees` to the nearest member of the set
    pub fn quantize(self, degrees: f64) -> f64 {
        self.angles()
            .get(self.nearest_index(degrees))
            .copied()
            .unwrap_or(0.0)
    }
}

/// Normalize any angle to `[0, 360)`
pub fn normalize_degrees(degrees: f64) -> f64 {
    wrap(degrees, 2.0 * HALF_TURN)
}

/// Undirected line axis of an angle, in `[0, 180)`
pub fn line_axis(degrees: f64) -> f64 {
    wrap(normalize_degrees(degrees), HALF_TURN)
}
