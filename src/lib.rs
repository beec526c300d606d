//! Raster sketch to tileable CAD hatch pattern conversion
//!
//! A sketch is binarized, bridged, thinned, traced, and simplified into straight
//! segments. Segments are snapped to a small set of canonical angles, grouped into
//! colinear families, and each family gets a repeat vector and a dash sequence that
//! close exactly on the tile, so the resulting `.pat` definition repeats without seams.

#![forbid(unsafe_code)]

/// Input/output operations, configuration defaults, and error handling
pub mod io;
/// Numeric helpers for periodic angles and fixed-point output
pub mod math;
/// Angle quantization, family clustering, tiling synthesis, and the `.pat` format
pub mod pattern;
/// End-to-end conversion pipeline and its results
pub mod pipeline;
/// Raster preprocessing, morphology, and thinning
pub mod raster;
/// Geometry primitives, contour tracing, and simplification
pub mod vector;

pub use io::error::{HatchError, Result};
pub use pattern::{LineFamily, PatternDefinition, TileSize};
pub use pipeline::{
    ConversionConfig, ConversionStats, ConversionSuccess, ConversionWarning, Converter,
};
