//! Plain-text segment lists, one `x1,y1,x2,y2` record per line
//!
//! This is the hand-off format for geometry extracted from CAD drawings.
//! Fields may be separated by commas, semicolons, or whitespace. Blank lines
//! and lines starting with `#` are ignored, and a non-numeric first record is
//! treated as a column header.

use crate::io::error::{Result, WithPath, parse_error};
use crate::vector::geometry::Segment;
use std::path::Path;

/// Parse a segment list
///
/// # Errors
///
/// Returns [`crate::HatchError::PatternParse`] with the line number of the
/// first record that does not hold exactly four finite numbers
pub fn parse_segments(text: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut seen_record = false;

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let first_record = !seen_record;
        seen_record = true;

        match parse_record(line) {
            Ok(segment) => segments.push(segment),
            Err(_) if first_record && looks_like_header(line) => {}
            Err(reason) => return Err(parse_error(index + 1, &reason)),
        }
    }

    tracing::debug!(segments = segments.len(), "parsed segment list");
    Ok(segments)
}

/// Read and parse a segment list file
///
/// # Errors
///
/// Returns [`crate::HatchError::FileSystem`] if the file cannot be read, or a
/// parse error as in [`parse_segments`]
pub fn read_segments(path: &Path) -> Result<Vec<Segment>> {
    let text = std::fs::read_to_string(path).with_path(path, "read segment list")?;
    parse_segments(&text)
}

fn fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|field| !field.is_empty())
}

fn looks_like_header(line: &str) -> bool {
    fields(line).all(|field| field.parse::<f64>().is_err())
}

fn parse_record(line: &str) -> std::result::Result<Segment, String> {
    let values = fields(line)
        .map(|field| {
            field
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| format!("invalid coordinate '{field}'"))
        })
        .collect::<std::result::Result<Vec<f64>, String>>()?;

    match values.as_slice() {
        &[x1, y1, x2, y2] => Ok(Segment::from_coords(x1, y1, x2, y2)),
        other => Err(format!("expected 4 coordinates, found {}", other.len())),
    }
}
