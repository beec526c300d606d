//! Simulated N×N tiling of a pattern for visual verification
//!
//! Families are drawn the way a CAD renderer expands them: every parallel
//! instance `origin + k·repeat` that crosses the preview region is walked along
//! its direction, and only the positive (dash) tokens are stroked.

use crate::io::configuration::{
    DEFAULT_PREVIEW_REPEATS, DEFAULT_PREVIEW_SIZE, MAX_PREVIEW_LINES, MAX_PREVIEW_PERIODS,
};
use crate::io::error::Result;
use crate::math::numeric::LENGTH_EPSILON;
use crate::pattern::definition::{LineFamily, PatternDefinition};
use crate::pattern::tiling::TileSize;
use crate::raster::mask::BinaryMask;
use crate::vector::geometry::{Extent, Point, Polyline, Segment};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const STROKE: Rgb<u8> = Rgb([0, 0, 0]);
const GRID: Rgb<u8> = Rgb([210, 210, 210]);
const MASK_FILL: Rgb<u8> = Rgb([190, 215, 240]);

/// Preview raster options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewConfig {
    /// Tiles per axis
    pub repeats: u32,
    /// Side length of the square output raster in pixels
    pub size: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            repeats: DEFAULT_PREVIEW_REPEATS,
            size: DEFAULT_PREVIEW_SIZE,
        }
    }
}

/// Region covered by `repeats × repeats` tiles starting at the origin
pub fn tiled_region(tile: TileSize, repeats: u32) -> Extent {
    let count = f64::from(repeats.max(1));
    Extent::new(
        Point::new(0.0, 0.0),
        Point::new(tile.width * count, tile.height * count),
    )
}

/// Dash strokes of one family inside `region`, in pattern units
pub fn family_strokes(family: &LineFamily, region: &Extent) -> Vec<Segment> {
    let u = family.direction();
    let n = family.normal();
    let step = family.repeat.to_translation(family.angle);
    let corners = [
        region.min,
        Point::new(region.max.x, region.min.y),
        region.max,
        Point::new(region.min.x, region.max.y),
    ];

    let (lowest, highest) = span(corners.map(|corner| (corner - family.origin).dot(n)));
    let spacing = family.repeat.delta_perpendicular;
    let (first, last) = if spacing.abs() < LENGTH_EPSILON {
        (0, 0)
    } else {
        let (a, b) = (lowest / spacing, highest / spacing);
        (a.min(b).ceil() as i64, a.max(b).floor() as i64)
    };

    let mut strokes = Vec::new();
    for k in (first..=last).take(MAX_PREVIEW_LINES) {
        let base = family.origin + step * (k as f64);
        let (t_min, t_max) = span(corners.map(|corner| (corner - base).dot(u)));

        match family.period() {
            None => strokes.extend(clip_to_region(
                Segment::new(base + u * t_min, base + u * t_max),
                region,
            )),
            Some(period) => {
                let mut t = (t_min / period).floor() * period;
                let mut periods = 0;
                while t < t_max && periods < MAX_PREVIEW_PERIODS {
                    for &token in &family.dashes {
                        if token > 0.0 {
                            strokes.extend(clip_to_region(
                                Segment::new(base + u * t, base + u * (t + token)),
                                region,
                            ));
                        }
                        t += token.abs();
                    }
                    periods += 1;
                }
            }
        }
    }
    strokes
}

/// Render an N×N tiling of a pattern definition
pub fn render_preview(definition: &PatternDefinition, config: PreviewConfig) -> RgbImage {
    let size = config.size.max(1);
    let tile = definition.tile();
    let region = tiled_region(tile, config.repeats);
    let scale = f64::from(size) / region.width().max(region.height());
    let mut canvas = RgbImage::from_pixel(size, size, BACKGROUND);

    let to_pixel = |p: Point| {
        (
            ((p.x - region.min.x) * scale) as f32,
            ((region.max.y - p.y) * scale) as f32,
        )
    };

    for i in 0..=config.repeats.max(1) {
        let x = tile.width * f64::from(i);
        let y = tile.height * f64::from(i);
        draw_line_segment_mut(
            &mut canvas,
            to_pixel(Point::new(x, region.min.y)),
            to_pixel(Point::new(x, region.max.y)),
            GRID,
        );
        draw_line_segment_mut(
            &mut canvas,
            to_pixel(Point::new(region.min.x, y)),
            to_pixel(Point::new(region.max.x, y)),
            GRID,
        );
    }

    for family in definition.families() {
        for stroke in family_strokes(family, &region) {
            draw_line_segment_mut(&mut canvas, to_pixel(stroke.p1), to_pixel(stroke.p2), STROKE);
        }
    }
    canvas
}

/// Parse `.pat` text and render its N×N tiling
///
/// # Errors
///
/// Returns [`crate::HatchError::PatternParse`] when the text is malformed
pub fn render_preview_text(text: &str, config: PreviewConfig) -> Result<RgbImage> {
    let definition = PatternDefinition::parse(text)?;
    Ok(render_preview(&definition, config))
}

/// Draw traced polylines over the working mask, in pixel space
pub fn render_overlay(mask: &BinaryMask, polylines: &[Polyline]) -> RgbImage {
    let mut canvas = RgbImage::from_fn(mask.width() as u32, mask.height() as u32, |x, y| {
        if mask.get(x as usize, y as usize) {
            MASK_FILL
        } else {
            BACKGROUND
        }
    });

    for polyline in polylines {
        for segment in polyline.segments() {
            draw_line_segment_mut(
                &mut canvas,
                (segment.p1.x as f32, segment.p1.y as f32),
                (segment.p2.x as f32, segment.p2.y as f32),
                STROKE,
            );
        }
    }
    canvas
}

fn span<const N: usize>(values: [f64; N]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Liang–Barsky clipping of a segment to an axis-aligned region
pub fn clip_to_region(segment: Segment, region: &Extent) -> Option<Segment> {
    let delta = segment.p2 - segment.p1;
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;

    let edges = [
        (-delta.x, segment.p1.x - region.min.x),
        (delta.x, region.max.x - segment.p1.x),
        (-delta.y, segment.p1.y - region.min.y),
        (delta.y, region.max.y - segment.p1.y),
    ];

    for (p, q) in edges {
        if p.abs() < f64::EPSILON {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    let clipped = Segment::new(segment.p1 + delta * t0, segment.p1 + delta * t1);
    (clipped.length() > LENGTH_EPSILON).then_some(clipped)
}
