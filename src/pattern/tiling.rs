//! Repeat vectors and dash sequences that make families tile seamlessly
//!
//! For a family at angle θ with `U = (cos θ, sin θ)` and `N = (-sin θ, cos θ)`,
//! two translations of the tile lattice `(i·width, j·height)` describe it
//! completely: the shortest lattice step `D` along `U`, whose length is the
//! period of the dash sequence, and a repeat step `R` to the next parallel
//! instance. `R` is the tile edge *not* closer to the family direction
//! (`(0, height)` for near-horizontal lines, `(width, 0)` for near-vertical
//! ones) whenever `D` and that edge span the lattice, which holds for every
//! basic angle on a square tile. Otherwise the other edge or the smallest
//! complementary lattice step is used, so translating the pattern by either
//! tile edge always lands on another instance.
//!
//! Families whose direction meets no lattice point within
//! [`MAX_LATTICE_STEP`] tiles cannot close on the tile; they keep the
//! axis-selected edge and the period `width / |cos θ|` or `height / |sin θ|`.

use crate::io::error::{Result, invalid_parameter};
use crate::math::numeric::{LENGTH_EPSILON, wrap};
use crate::pattern::definition::LineFamily;
use crate::pattern::family::{FamilyCluster, Interval, merge_intervals};
use crate::vector::geometry::Point;

/// Physical size of the repeating tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSize {
    /// Width in pattern units
    pub width: f64,
    /// Height in pattern units
    pub height: f64,
}

impl TileSize {
    /// Create a validated tile size
    ///
    /// # Errors
    ///
    /// Returns an error if either side is not a positive finite number
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(invalid_parameter("tile_width", &width, &"must be positive"));
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(invalid_parameter(
                "tile_height",
                &height,
                &"must be positive",
            ));
        }
        Ok(Self { width, height })
    }

    /// The 1×1 tile
    pub const fn unit() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }

    /// Both sides multiplied by `factor`
    pub const fn scaled(self, factor: f64) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

/// Translation from one instance of a family to the next parallel instance,
/// expressed in the family's own `(U, N)` frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RepeatVector {
    /// Shift along the family direction
    pub delta_parallel: f64,
    /// Offset to the next parallel line
    pub delta_perpendicular: f64,
}

impl RepeatVector {
    /// The repeat as a pattern-space translation for a family at `angle`
    pub fn to_translation(self, angle: f64) -> Point {
        let u = Point::from_angle(angle);
        let n = Point::new(-u.y, u.x);
        u * self.delta_parallel + n * self.delta_perpendicular
    }
}

/// Placement of a dash/gap sequence along a family axis
#[derive(Debug, Clone, PartialEq)]
pub struct DashLayout {
    /// Parallel coordinate where the first dash starts
    pub start: f64,
    /// Alternating dash (positive) and gap (negative) lengths; empty when continuous
    pub tokens: Vec<f64>,
}

/// Largest multiple of a tile side searched for a family's lattice direction
pub const MAX_LATTICE_STEP: i64 = 16;

/// Largest `|sin|` of the angle between a family and a lattice step deemed parallel
const PARALLEL_TOLERANCE: f64 = 1e-9;

/// A translation of the tile lattice, `(columns · width, rows · height)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatticeStep {
    /// Multiple of the tile width
    pub columns: i64,
    /// Multiple of the tile height
    pub rows: i64,
}

impl LatticeStep {
    /// One tile to the right
    pub const WIDTH: Self = Self::new(1, 0);
    /// One tile up
    pub const HEIGHT: Self = Self::new(0, 1);

    /// Create a lattice step
    pub const fn new(columns: i64, rows: i64) -> Self {
        Self { columns, rows }
    }

    /// The step in pattern units
    pub const fn to_point(self, tile: TileSize) -> Point {
        Point::new(
            self.columns as f64 * tile.width,
            self.rows as f64 * tile.height,
        )
    }

    /// Integer cross product; `±1` when both steps span the whole lattice
    pub const fn cross(self, other: Self) -> i64 {
        self.columns * other.rows - self.rows * other.columns
    }
}

const fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Coefficients `(x, y)` with `a·x + b·y = gcd(a, b)`
const fn bezout(a: i64, b: i64) -> (i64, i64) {
    let (mut previous, mut remainder) = (a, b);
    let (mut previous_a, mut coefficient_a) = (1, 0);
    let (mut previous_b, mut coefficient_b) = (0, 1);
    while remainder != 0 {
        let quotient = previous / remainder;
        (previous, remainder) = (remainder, previous - quotient * remainder);
        (previous_a, coefficient_a) = (coefficient_a, previous_a - quotient * coefficient_a);
        (previous_b, coefficient_b) = (coefficient_b, previous_b - quotient * coefficient_b);
    }
    if previous < 0 {
        (-previous_a, -previous_b)
    } else {
        (previous_a, previous_b)
    }
}

fn is_near_horizontal(angle: f64) -> bool {
    let u = Point::from_angle(angle);
    u.x.abs() >= u.y.abs()
}

/// Shortest lattice step parallel to a family, if one exists within [`MAX_LATTICE_STEP`]
pub fn lattice_direction(angle: f64, tile: TileSize) -> Option<LatticeStep> {
    let u = Point::from_angle(angle);
    let mut shortest: Option<(f64, LatticeStep)> = None;

    for columns in 0..=MAX_LATTICE_STEP {
        for rows in -MAX_LATTICE_STEP..=MAX_LATTICE_STEP {
            // One sign per line direction, reduced steps only
            if gcd(columns, rows) != 1 || (columns == 0 && rows != 1) {
                continue;
            }
            let step = LatticeStep::new(columns, rows);
            let vector = step.to_point(tile);
            let length = vector.length();
            let misalignment = (u.x * vector.y - u.y * vector.x).abs() / length;
            if misalignment < PARALLEL_TOLERANCE
                && shortest.is_none_or(|(best, _)| length < best)
            {
                shortest = Some((length, step));
            }
        }
    }
    shortest.map(|(_, step)| step)
}

/// Whether a family at `angle` repeats exactly under both tile edges
pub fn is_tileable(angle: f64, tile: TileSize) -> bool {
    lattice_direction(angle, tile).is_some()
}

/// Lattice step from one instance of a family to the next parallel instance
pub fn repeat_step(angle: f64, tile: TileSize) -> LatticeStep {
    let (preferred, other) = if is_near_horizontal(angle) {
        (LatticeStep::HEIGHT, LatticeStep::WIDTH)
    } else {
        (LatticeStep::WIDTH, LatticeStep::HEIGHT)
    };
    let Some(direction) = lattice_direction(angle, tile) else {
        return preferred;
    };
    if direction.cross(preferred).abs() == 1 {
        return preferred;
    }
    if direction.cross(other).abs() == 1 {
        return other;
    }

    // direction × (columns, rows) = 1, then the shift along the family is minimized
    let (x, y) = bezout(direction.columns, direction.rows);
    let complement = LatticeStep::new(-y, x);
    let d = direction.to_point(tile);
    let shift = (complement.to_point(tile).dot(d) / d.dot(d)).round() as i64;
    LatticeStep::new(
        complement.columns - shift * direction.columns,
        complement.rows - shift * direction.rows,
    )
}

/// Project the repeat step onto the family frame
pub fn repeat_vector(angle: f64, tile: TileSize) -> RepeatVector {
    let step = repeat_step(angle, tile).to_point(tile);
    let u = Point::from_angle(angle);
    let n = Point::new(-u.y, u.x);
    RepeatVector {
        delta_parallel: step.dot(u),
        delta_perpendicular: step.dot(n),
    }
}

/// Distance along the family after which its dash sequence must repeat
pub fn parallel_period(angle: f64, tile: TileSize) -> f64 {
    if let Some(direction) = lattice_direction(angle, tile) {
        return direction.to_point(tile).length();
    }
    let u = Point::from_angle(angle);
    if is_near_horizontal(angle) {
        tile.width / u.x.abs()
    } else {
        tile.height / u.y.abs()
    }
}

/// Close the drawn intervals of a family on exactly one period
///
/// Intervals are wrapped into `[first.start, first.start + period)`. The final
/// gap is `-(period - Σ|previous tokens|)`. When the last dash runs into the
/// period boundary it is joined with the first dash and the layout starts at
/// the last dash instead. Full coverage yields a continuous line.
pub fn dash_sequence(intervals: &[Interval], period: f64) -> DashLayout {
    let Some(first) = intervals.first() else {
        return DashLayout {
            start: 0.0,
            tokens: Vec::new(),
        };
    };
    let origin = first.start;
    let end = origin + period;
    let continuous = DashLayout {
        start: origin,
        tokens: Vec::new(),
    };

    let mut wrapped = Vec::with_capacity(intervals.len() + 1);
    for interval in intervals {
        let length = interval.length();
        if length >= period - LENGTH_EPSILON {
            return continuous;
        }
        let start = origin + wrap(interval.start - origin, period);
        let stop = start + length;
        if stop > end {
            wrapped.push(Interval::new(start, end));
            wrapped.push(Interval::new(origin, stop - period));
        } else {
            wrapped.push(Interval::new(start, stop));
        }
    }

    let mut runs: Vec<Interval> = merge_intervals(wrapped)
        .into_iter()
        .filter(|interval| interval.length() > LENGTH_EPSILON)
        .collect();

    let covered: f64 = runs.iter().map(Interval::length).sum();
    if covered >= period - LENGTH_EPSILON {
        return continuous;
    }

    let mut start = origin;
    if runs.len() > 1 && runs.last().is_some_and(|last| last.end >= end - LENGTH_EPSILON) {
        if let (Some(last), Some(head)) = (runs.pop(), runs.first().copied()) {
            start = last.start;
            let mut rotated = vec![Interval::new(last.start, head.end + period)];
            rotated.extend(
                runs.iter()
                    .skip(1)
                    .map(|run| Interval::new(run.start + period, run.end + period)),
            );
            runs = rotated;
        }
    }

    let mut tokens = Vec::with_capacity(runs.len() * 2);
    for (index, run) in runs.iter().enumerate() {
        tokens.push(run.length());
        if let Some(next) = runs.get(index + 1) {
            tokens.push(-(next.start - run.end));
        }
    }
    let used: f64 = tokens.iter().map(|token| token.abs()).sum();
    tokens.push(-(period - used));

    DashLayout { start, tokens }
}

/// Resolve the repeat vector and dash sequence of a clustered family
pub fn synthesize(cluster: &FamilyCluster, tile: TileSize) -> LineFamily {
    let repeat = repeat_vector(cluster.angle, tile);
    let period = parallel_period(cluster.angle, tile);
    let layout = dash_sequence(&cluster.intervals, period);
    let origin = cluster.normal() * cluster.offset + cluster.direction() * layout.start;

    LineFamily {
        angle: cluster.angle,
        origin,
        repeat,
        dashes: layout.tokens,
    }
}
