//! Contour tracing: extract closed boundary polylines from a binary mask
//!
//! Border following (Suzuki–Abe) is delegated to `imageproc`; this module
//! selects which borders to keep and drops scan-noise regions.

use crate::io::configuration::{DEFAULT_MIN_CONTOUR_AREA, DEFAULT_MIN_CONTOUR_PERIMETER};
use crate::raster::mask::BinaryMask;
use crate::vector::geometry::{Point, Polyline};
use imageproc::contours::{BorderType, Contour, find_contours};

/// Which region borders are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContourMode {
    /// Outer borders of foreground regions only
    Outer,
    /// Outer borders and the borders of holes inside them
    #[default]
    All,
}

/// Border selection and noise-floor options
///
/// The noise floor also applies to centerlines traced from thinned masks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourConfig {
    /// Border selection when tracing unthinned masks
    pub mode: ContourMode,
    /// Contours with a smaller closed perimeter (pixels) are discarded
    pub min_perimeter: f64,
    /// Contours enclosing a smaller area (square pixels) are discarded
    pub min_area: f64,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            mode: ContourMode::All,
            min_perimeter: DEFAULT_MIN_CONTOUR_PERIMETER,
            min_area: DEFAULT_MIN_CONTOUR_AREA,
        }
    }
}

/// Trace all region borders of `mask` that pass the noise floor
pub fn trace_contours(mask: &BinaryMask, config: &ContourConfig) -> Vec<Polyline> {
    let contours: Vec<Contour<u32>> = find_contours(&mask.to_gray_image());
    let found = contours.len();

    let polylines: Vec<Polyline> = contours
        .into_iter()
        .filter(|contour| config.mode == ContourMode::All || contour.border_type == BorderType::Outer)
        .filter(|contour| contour.points.len() >= 2)
        .map(|contour| {
            let points = contour
                .points
                .into_iter()
                .map(|p| Point::new(f64::from(p.x), f64::from(p.y)))
                .collect();
            Polyline::new(points, true)
        })
        .filter(|polyline| polyline.perimeter() >= config.min_perimeter)
        .filter(|polyline| polyline.area() >= config.min_area)
        .collect();

    tracing::debug!(
        found,
        kept = polylines.len(),
        "traced contours"
    );
    polylines
}
