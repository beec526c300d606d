//! Line families, pattern definitions, and the `.pat` text format
//!
//! ```text
//! *NAME, description
//! ;%TYPE=MODEL
//! ; Size: 10.00000x10.00000 units
//! angle, origin-x, origin-y, delta-parallel, delta-perpendicular, dash, gap, ...
//! ```
//!
//! Every number is written in fixed-point notation with a fixed precision so
//! that strict line-oriented consumers can read it and so that parsing and
//! re-serializing a record reproduces it byte for byte.

use crate::io::configuration::{
    DEFAULT_PATTERN_DESCRIPTION, DEFAULT_PATTERN_NAME, DEFAULT_PRECISION,
};
use crate::io::error::{Result, parse_error};
use crate::math::numeric::format_fixed;
use crate::pattern::tiling::{RepeatVector, TileSize};
use crate::vector::geometry::Point;
use std::fmt;

/// Marker line declaring a model (real-world sized) pattern
pub const TYPE_MARKER: &str = ";%TYPE=MODEL";

const SIZE_PREFIX: &str = "; Size:";

/// One family of parallel, evenly offset dashed lines
#[derive(Debug, Clone, PartialEq)]
pub struct LineFamily {
    /// Direction in degrees
    pub angle: f64,
    /// A point where the first dash of one instance starts
    pub origin: Point,
    /// Step from one instance to the next parallel instance
    pub repeat: RepeatVector,
    /// Alternating dash (positive) and gap (negative) lengths; empty when continuous
    pub dashes: Vec<f64>,
}

impl LineFamily {
    /// Unit vector along the family
    pub fn direction(&self) -> Point {
        Point::from_angle(self.angle)
    }

    /// Unit normal of the family
    pub fn normal(&self) -> Point {
        let u = self.direction();
        Point::new(-u.y, u.x)
    }

    /// Signed perpendicular offset of the instance through the origin
    pub fn offset(&self) -> f64 {
        self.origin.dot(self.normal())
    }

    /// Length of one dash/gap cycle, or `None` for a continuous line
    pub fn period(&self) -> Option<f64> {
        let period: f64 = self.dashes.iter().map(|token| token.abs()).sum();
        (!self.dashes.is_empty() && period > 0.0).then_some(period)
    }

    /// Format as one comma-separated record
    pub fn to_record(&self, precision: usize) -> String {
        [
            self.angle,
            self.origin.x,
            self.origin.y,
            self.repeat.delta_parallel,
            self.repeat.delta_perpendicular,
        ]
        .iter()
        .chain(self.dashes.iter())
        .map(|&value| format_fixed(value, precision))
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// Parse one comma-separated record; `line` is used for error reporting
    ///
    /// # Errors
    ///
    /// Returns [`crate::HatchError::PatternParse`] when fewer than five fields
    /// are present or a field is not a finite number
    pub fn from_record(record: &str, line: usize) -> Result<Self> {
        let values = record
            .split(',')
            .map(str::trim)
            .map(|field| {
                field
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .ok_or_else(|| parse_error(line, &format!("invalid number '{field}'")))
            })
            .collect::<Result<Vec<f64>>>()?;

        let [angle, x, y, delta_parallel, delta_perpendicular, dashes @ ..] = values.as_slice()
        else {
            return Err(parse_error(
                line,
                &format!("expected at least 5 fields, found {}", values.len()),
            ));
        };

        Ok(Self {
            angle: *angle,
            origin: Point::new(*x, *y),
            repeat: RepeatVector {
                delta_parallel: *delta_parallel,
                delta_perpendicular: *delta_perpendicular,
            },
            dashes: dashes.to_vec(),
        })
    }
}

/// A named, tile-sized collection of line families
#[derive(Debug, Clone, PartialEq)]
pub struct PatternDefinition {
    name: String,
    description: String,
    tile: TileSize,
    families: Vec<LineFamily>,
}

impl PatternDefinition {
    /// Create a definition; commas and line breaks in the name are replaced
    pub fn new(name: &str, description: &str, tile: TileSize, families: Vec<LineFamily>) -> Self {
        let name = sanitize(name, &[',', '\n', '\r']);
        let description = sanitize(description, &['\n', '\r']);
        Self {
            name: if name.is_empty() {
                DEFAULT_PATTERN_NAME.to_string()
            } else {
                name
            },
            description: if description.is_empty() {
                DEFAULT_PATTERN_DESCRIPTION.to_string()
            } else {
                description
            },
            tile,
            families,
        }
    }

    /// Pattern name from the header line
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-text description from the header line
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declared tile size
    pub const fn tile(&self) -> TileSize {
        self.tile
    }

    /// Families in output order
    pub fn families(&self) -> &[LineFamily] {
        &self.families
    }

    /// Whether no family survived
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Total number of dash/gap tokens over all families
    pub fn dash_token_count(&self) -> usize {
        self.families.iter().map(|family| family.dashes.len()).sum()
    }

    /// Largest dash/gap token count of a single family
    pub fn max_dash_tokens(&self) -> usize {
        self.families
            .iter()
            .map(|family| family.dashes.len())
            .max()
            .unwrap_or(0)
    }

    /// Render the `.pat` text at a fixed decimal precision
    pub fn serialize(&self, precision: usize) -> String {
        let mut lines = vec![
            format!("*{}, {}", self.name, self.description),
            TYPE_MARKER.to_string(),
            format!(
                "{SIZE_PREFIX} {}x{} units",
                format_fixed(self.tile.width, precision),
                format_fixed(self.tile.height, precision)
            ),
        ];
        lines.extend(self.families.iter().map(|family| family.to_record(precision)));

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// Parse `.pat` text
    ///
    /// Blank lines and `;` comments are skipped except for the size comment.
    /// Without a size comment the tile defaults to 1×1.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HatchError::PatternParse`] for malformed records or a
    /// malformed size comment
    pub fn parse(text: &str) -> Result<Self> {
        let mut name = String::new();
        let mut description = String::new();
        let mut tile = TileSize::unit();
        let mut families = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line_number = index + 1;
            let line = raw.trim();

            if line.is_empty() {
                continue;
            }
            if let Some(header) = line.strip_prefix('*') {
                let (head, tail) = header.split_once(',').unwrap_or((header, ""));
                name = head.trim().to_string();
                description = tail.trim().to_string();
            } else if let Some(size) = line.strip_prefix(SIZE_PREFIX) {
                tile = parse_size(size, line_number)?;
            } else if !line.starts_with(';') {
                families.push(LineFamily::from_record(line, line_number)?);
            }
        }

        Ok(Self::new(&name, &description, tile, families))
    }
}

impl fmt::Display for PatternDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize(DEFAULT_PRECISION))
    }
}

fn sanitize(text: &str, forbidden: &[char]) -> String {
    text.chars()
        .map(|c| if forbidden.contains(&c) { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

fn parse_size(size: &str, line: usize) -> Result<TileSize> {
    let dimensions = size.trim().trim_end_matches("units").trim();
    let (width, height) = dimensions
        .split_once('x')
        .ok_or_else(|| parse_error(line, &format!("invalid size '{dimensions}'")))?;

    let parse = |field: &str| {
        field
            .trim()
            .parse::<f64>()
            .map_err(|err| parse_error(line, &format!("invalid size value '{}': {err}", field.trim())))
    };
    TileSize::new(parse(width)?, parse(height)?).map_err(|err| parse_error(line, &err))
}
