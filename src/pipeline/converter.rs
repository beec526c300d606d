//! The staged conversion pipeline
//!
//! ```text
//! bytes ─ decode ─ crop ─ threshold/edges ─ polarity ─┐
//!                                                     mask ─ open/close ─ thin ─ trace ─ simplify ─┐
//!                                       segment list ─ extent mapping ─────────────────────────────┤
//!                                                                       cluster ─ tile ─ serialize ─ preview
//! ```
//!
//! A [`Converter`] holds only its validated configuration, so one instance can
//! serve any number of conversions and be shared by reference across threads.

use crate::io::configuration::{
    DEFAULT_CLOSE_RADIUS, DEFAULT_EPSILON_FACTOR, DEFAULT_MIN_FAMILY_LENGTH,
    DEFAULT_MIN_FAMILY_SEGMENTS, DEFAULT_MIN_SEGMENT_LENGTH, DEFAULT_OFFSET_TOLERANCE,
    DEFAULT_OPEN_RADIUS, DEFAULT_PATTERN_DESCRIPTION, DEFAULT_PATTERN_NAME, DEFAULT_PATTERN_SCALE,
    DEFAULT_PRECISION, DEFAULT_TILE_HEIGHT, DEFAULT_TILE_WIDTH, MAX_ADVISORY_DASH_TOKENS,
    MAX_ADVISORY_FAMILIES,
};
use crate::io::error::{Result, computation_error, invalid_parameter};
use crate::pattern::angle::AngleSet;
use crate::pattern::definition::PatternDefinition;
use crate::pattern::family::{ClusterConfig, cluster_segments};
use crate::pattern::preview::{PreviewConfig, render_overlay, render_preview};
use crate::pattern::tiling::{TileSize, is_tileable, synthesize};
use crate::pipeline::outcome::{ConversionStats, ConversionSuccess, ConversionWarning};
use crate::raster::mask::BinaryMask;
use crate::raster::morphology::bridge_gaps;
use crate::raster::preprocess::{
    ExtractionStrategy, PreprocessConfig, ThresholdMethod, decode_image, preprocess_image,
};
use crate::raster::skeleton::skeletonize;
use crate::vector::centerline::trace_centerlines;
use crate::vector::contour::{ContourConfig, trace_contours};
use crate::vector::geometry::{Extent, PixelToUnitScale, Point, Polyline, Segment};
use crate::vector::simplify::simplify;
use image::DynamicImage;

/// Largest number of decimals accepted for serialization
const MAX_PRECISION: usize = 12;

/// Every option of the conversion pipeline
///
/// Offset tolerance and the two length floors are fractions of the effective
/// tile width, so the same values work for raster and segment-list inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    /// Tile width in pattern units before scaling
    pub tile_width: f64,
    /// Tile height in pattern units before scaling
    pub tile_height: f64,
    /// Multiplier applied to the declared tile and therefore to all geometry
    pub scale: f64,
    /// Decoding, thresholding, and polarity options
    pub preprocess: PreprocessConfig,
    /// Despeckling opening radius in pixels, 0 disables
    pub open_radius: u8,
    /// Gap-closing radius in pixels, 0 disables
    pub close_radius: u8,
    /// Thin strokes to 1-px centerlines before tracing
    pub skeletonize: bool,
    /// Border selection and noise floor
    pub contour: ContourConfig,
    /// Douglas-Peucker tolerance as a fraction of each contour's perimeter
    pub epsilon_factor: f64,
    /// Canonical family directions
    pub angle_set: AngleSet,
    /// Perpendicular band shared by one family, as a fraction of the tile width
    pub offset_tolerance: f64,
    /// Shorter segments are degenerate, as a fraction of the tile width
    pub min_segment_length: f64,
    /// Families drawing less are discarded, as a fraction of the tile width
    pub min_family_length: f64,
    /// Families with fewer member segments are discarded
    pub min_family_segments: usize,
    /// Preview tiling options
    pub preview: PreviewConfig,
    /// Pattern name written to the header
    pub name: String,
    /// Pattern description written to the header
    pub description: String,
    /// Decimals used when serializing
    pub precision: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            tile_width: DEFAULT_TILE_WIDTH,
            tile_height: DEFAULT_TILE_HEIGHT,
            scale: DEFAULT_PATTERN_SCALE,
            preprocess: PreprocessConfig::default(),
            open_radius: DEFAULT_OPEN_RADIUS,
            close_radius: DEFAULT_CLOSE_RADIUS,
            skeletonize: true,
            contour: ContourConfig::default(),
            epsilon_factor: DEFAULT_EPSILON_FACTOR,
            angle_set: AngleSet::Basic,
            offset_tolerance: DEFAULT_OFFSET_TOLERANCE,
            min_segment_length: DEFAULT_MIN_SEGMENT_LENGTH,
            min_family_length: DEFAULT_MIN_FAMILY_LENGTH,
            min_family_segments: DEFAULT_MIN_FAMILY_SEGMENTS,
            preview: PreviewConfig::default(),
            name: DEFAULT_PATTERN_NAME.to_string(),
            description: DEFAULT_PATTERN_DESCRIPTION.to_string(),
            precision: DEFAULT_PRECISION,
        }
    }
}

fn non_negative(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid_parameter(parameter, &value, &"must be a non-negative number"))
    }
}

impl ConversionConfig {
    /// Tile declared in the output, after applying the scale multiplier
    ///
    /// # Errors
    ///
    /// Returns an error if the tile sides or the scale are not positive
    pub fn effective_tile(&self) -> Result<TileSize> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(invalid_parameter("scale", &self.scale, &"must be positive"));
        }
        Ok(TileSize::new(self.tile_width, self.tile_height)?.scaled(self.scale))
    }

    /// Clustering thresholds resolved against the effective tile width
    ///
    /// # Errors
    ///
    /// Returns an error if the tile is invalid
    pub fn cluster_config(&self) -> Result<ClusterConfig> {
        let width = self.effective_tile()?.width;
        Ok(ClusterConfig {
            angle_set: self.angle_set,
            offset_tolerance: self.offset_tolerance * width,
            min_segment_length: self.min_segment_length * width,
            min_family_length: self.min_family_length * width,
            min_family_segments: self.min_family_segments,
        })
    }

    /// Check every option
    ///
    /// # Errors
    ///
    /// Returns [`crate::HatchError::InvalidParameter`] naming the first
    /// offending option
    pub fn validate(&self) -> Result<()> {
        self.effective_tile()?;

        if !(self.epsilon_factor.is_finite() && (0.0..1.0).contains(&self.epsilon_factor)) {
            return Err(invalid_parameter(
                "epsilon_factor",
                &self.epsilon_factor,
                &"must be in [0, 1)",
            ));
        }
        if !(self.offset_tolerance.is_finite() && self.offset_tolerance > 0.0) {
            return Err(invalid_parameter(
                "offset_tolerance",
                &self.offset_tolerance,
                &"must be positive",
            ));
        }
        non_negative("min_segment_length", self.min_segment_length)?;
        non_negative("min_family_length", self.min_family_length)?;
        non_negative("min_contour_perimeter", self.contour.min_perimeter)?;
        non_negative("min_contour_area", self.contour.min_area)?;

        if let ThresholdMethod::AdaptiveMean { block_radius, .. } = self.preprocess.threshold
            && block_radius == 0
        {
            return Err(invalid_parameter(
                "adaptive_block_radius",
                &block_radius,
                &"must be at least 1",
            ));
        }
        if let ExtractionStrategy::Edges { low, high, .. } = self.preprocess.strategy {
            if !(low.is_finite() && low >= 0.0) {
                return Err(invalid_parameter("canny_low", &low, &"must be non-negative"));
            }
            if !(high.is_finite() && high >= low) {
                return Err(invalid_parameter(
                    "canny_high",
                    &high,
                    &format!("must be at least canny_low ({low})"),
                ));
            }
        }

        if self.preview.repeats == 0 {
            return Err(invalid_parameter(
                "preview_repeats",
                &self.preview.repeats,
                &"must be at least 1",
            ));
        }
        if self.preview.size == 0 {
            return Err(invalid_parameter(
                "preview_size",
                &self.preview.size,
                &"must be at least 1",
            ));
        }
        if self.precision > MAX_PRECISION {
            return Err(invalid_parameter(
                "precision",
                &self.precision,
                &format!("must be at most {MAX_PRECISION}"),
            ));
        }
        Ok(())
    }
}

/// Runs the conversion pipeline with a fixed, validated configuration
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConversionConfig,
    tile: TileSize,
    clustering: ClusterConfig,
}

impl Converter {
    /// Validate the configuration and build a converter
    ///
    /// # Errors
    ///
    /// Returns [`crate::HatchError::InvalidParameter`] if any option is out of range
    pub fn new(config: ConversionConfig) -> Result<Self> {
        config.validate()?;
        let tile = config.effective_tile()?;
        let clustering = config.cluster_config()?;
        Ok(Self {
            config,
            tile,
            clustering,
        })
    }

    /// Active configuration
    pub const fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Tile declared in generated patterns
    pub const fn tile(&self) -> TileSize {
        self.tile
    }

    /// Convert encoded image bytes (PNG, JPEG, BMP, GIF, WebP)
    ///
    /// # Errors
    ///
    /// Returns [`crate::HatchError::Decode`] when the bytes are not a supported image
    pub fn convert_image(&self, bytes: &[u8]) -> Result<ConversionSuccess> {
        let image = decode_image(bytes)?;
        self.convert_dynamic_image(&image)
    }

    /// Convert an already decoded image
    ///
    /// # Errors
    ///
    /// Returns an error if the image has no pixels
    pub fn convert_dynamic_image(&self, image: &DynamicImage) -> Result<ConversionSuccess> {
        let mask = preprocess_image(image, &self.config.preprocess);
        tracing::debug!(
            width = mask.width(),
            height = mask.height(),
            foreground = mask.foreground_count(),
            "preprocessed image"
        );
        self.convert_mask(&mask)
    }

    /// Convert a stroke mask whose foreground is the drawn lines
    ///
    /// # Errors
    ///
    /// Returns an error if the mask has no pixels
    pub fn convert_mask(&self, mask: &BinaryMask) -> Result<ConversionSuccess> {
        if mask.width() == 0 || mask.height() == 0 {
            return Err(invalid_parameter(
                "mask",
                &format!("{}x{}", mask.width(), mask.height()),
                &"must contain at least one pixel",
            ));
        }

        let polylines = self.trace_polylines(mask);
        let scale = PixelToUnitScale::new(
            self.tile.width,
            self.tile.height,
            mask.width(),
            mask.height(),
        );
        let segments: Vec<Segment> = polylines
            .iter()
            .flat_map(Polyline::segments)
            .map(|segment| scale.segment_to_units(&segment))
            .collect();

        let mut success = self.assemble(&segments, polylines.len());
        success.overlay = Some(render_overlay(mask, &polylines));
        Ok(success)
    }

    /// Convert externally supplied segments whose bounding extent is mapped
    /// onto the tile; the input is already Y-up
    ///
    /// # Errors
    ///
    /// Returns [`crate::HatchError::InvalidParameter`] when the extent is not
    /// finite or has zero size on both axes, and [`crate::HatchError::Computation`]
    /// when it is too small to scale onto the tile
    pub fn convert_segments(&self, segments: &[Segment], extent: Extent) -> Result<ConversionSuccess> {
        if !(extent.min.is_finite() && extent.max.is_finite()) {
            return Err(invalid_parameter(
                "extent",
                &format!("{extent:?}"),
                &"must be finite",
            ));
        }

        let (width, height) = (extent.width(), extent.height());
        let scale_x = (width > 0.0).then(|| self.tile.width / width);
        let scale_y = (height > 0.0).then(|| self.tile.height / height);
        let (scale_x, scale_y) = match (scale_x, scale_y) {
            (Some(x), Some(y)) => (x, y),
            (Some(x), None) => (x, x),
            (None, Some(y)) => (y, y),
            (None, None) => {
                return Err(invalid_parameter(
                    "extent",
                    &format!("{width}x{height}"),
                    &"must have a positive width or height",
                ));
            }
        };
        if !(scale_x.is_finite() && scale_y.is_finite()) {
            return Err(computation_error(
                "convert_segments",
                &format!("extent {width}x{height} gives a non-finite scale"),
            ));
        }

        let map = |p: Point| {
            Point::new(
                (p.x - extent.min.x) * scale_x,
                (p.y - extent.min.y) * scale_y,
            )
        };
        let mapped: Vec<Segment> = segments
            .iter()
            .map(|segment| Segment::new(map(segment.p1), map(segment.p2)))
            .collect();

        Ok(self.assemble(&mapped, 0))
    }

    /// Bridge, optionally thin, trace, and simplify a mask into pixel-space polylines
    ///
    /// Thinned masks are traced along their centerlines, unthinned ones along
    /// their region borders.
    pub fn trace_polylines(&self, mask: &BinaryMask) -> Vec<Polyline> {
        let bridged = bridge_gaps(mask, self.config.open_radius, self.config.close_radius);
        tracing::debug!(components = bridged.component_count(), "bridged gaps");
        let traced = if self.config.skeletonize {
            trace_centerlines(&skeletonize(&bridged), &self.config.contour)
        } else {
            trace_contours(&bridged, &self.config.contour)
        };

        let polylines: Vec<Polyline> = traced
            .iter()
            .filter_map(|polyline| simplify(polyline, self.config.epsilon_factor))
            .collect();

        tracing::debug!(
            polylines = polylines.len(),
            vertices = polylines.iter().map(Polyline::len).sum::<usize>(),
            "simplified contours"
        );
        polylines
    }

    fn assemble(&self, segments: &[Segment], contours: usize) -> ConversionSuccess {
        let report = cluster_segments(segments, &self.clustering);
        let families = report
            .families
            .iter()
            .map(|cluster| synthesize(cluster, self.tile))
            .collect();
        let pattern = PatternDefinition::new(
            &self.config.name,
            &self.config.description,
            self.tile,
            families,
        );

        let mut warnings = Vec::new();
        if pattern.is_empty() {
            warnings.push(ConversionWarning::EmptyGeometry);
        }
        let unclosed = report
            .families
            .iter()
            .filter(|cluster| !is_tileable(cluster.angle, self.tile))
            .count();
        if unclosed > 0 {
            warnings.push(ConversionWarning::UnclosedTiling { families: unclosed });
        }
        let families = pattern.families().len();
        let max_dash_tokens = pattern.max_dash_tokens();
        if families > MAX_ADVISORY_FAMILIES || max_dash_tokens > MAX_ADVISORY_DASH_TOKENS {
            warnings.push(ConversionWarning::ExcessiveComplexity {
                families,
                max_dash_tokens,
            });
        }
        for warning in &warnings {
            tracing::warn!(%warning, "conversion warning");
        }

        let stats = ConversionStats {
            contours,
            segments: segments.len(),
            degenerate_segments: report.degenerate_segments,
            discarded_families: report.discarded_families,
            families,
            dash_tokens: pattern.dash_token_count(),
        };
        tracing::debug!(summary = %stats.summary(), "assembled pattern");

        let preview = render_preview(&pattern, self.config.preview);
        ConversionSuccess {
            pattern,
            preview,
            overlay: None,
            stats,
            warnings,
            precision: self.config.precision,
        }
    }
}
