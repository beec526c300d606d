//! Conversion results, statistics, and advisory warnings

use crate::pattern::definition::PatternDefinition;
use image::RgbImage;
use std::fmt;

/// Non-fatal conditions detected while converting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionWarning {
    /// No family survived; the definition has a header only
    EmptyGeometry,
    /// The pattern is likely too heavy for downstream CAD renderers
    ExcessiveComplexity {
        /// Number of families in the definition
        families: usize,
        /// Largest dash/gap token count of a single family
        max_dash_tokens: usize,
    },
    /// Families whose direction does not close on the tile lattice
    UnclosedTiling {
        /// Number of affected families
        families: usize,
    },
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGeometry => write!(f, "no line families were detected"),
            Self::ExcessiveComplexity {
                families,
                max_dash_tokens,
            } => write!(
                f,
                "pattern is complex ({families} families, up to {max_dash_tokens} dash tokens per family)"
            ),
            Self::UnclosedTiling { families } => write!(
                f,
                "{families} families do not repeat on the tile and will show seams"
            ),
        }
    }
}

/// Counters collected across the pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversionStats {
    /// Polylines that survived tracing and simplification
    pub contours: usize,
    /// Straight segments handed to the clusterer
    pub segments: usize,
    /// Segments dropped as zero-length or too short
    pub degenerate_segments: usize,
    /// Families dropped by the noise floor
    pub discarded_families: usize,
    /// Families in the final definition
    pub families: usize,
    /// Dash/gap tokens over all families
    pub dash_tokens: usize,
}

impl ConversionStats {
    /// One-line human readable summary
    pub fn summary(&self) -> String {
        format!(
            "Generated {} vector segments from {} contours into {} line families ({} dash tokens, {} degenerate segments dropped)",
            self.segments, self.contours, self.families, self.dash_tokens, self.degenerate_segments
        )
    }
}

/// A successful conversion
#[derive(Debug, Clone)]
pub struct ConversionSuccess {
    /// The synthesized pattern
    pub pattern: PatternDefinition,
    /// N×N tiled rendering of the pattern
    pub preview: RgbImage,
    /// Traced polylines over the working mask; `None` for segment input
    pub overlay: Option<RgbImage>,
    /// Stage counters
    pub stats: ConversionStats,
    /// Advisory warnings, empty when none apply
    pub warnings: Vec<ConversionWarning>,
    /// Decimal places used for [`Self::pattern_text`]
    pub precision: usize,
}

impl ConversionSuccess {
    /// Serialized `.pat` text
    pub fn pattern_text(&self) -> String {
        self.pattern.serialize(self.precision)
    }

    /// Whether a warning of the given kind was raised
    pub fn has_warning(&self, predicate: impl Fn(&ConversionWarning) -> bool) -> bool {
        self.warnings.iter().any(predicate)
    }
}
