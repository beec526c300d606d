//! End-to-end conversion from sketches or segment lists to tileable patterns

/// Conversion configuration and the staged pipeline
pub mod converter;
/// Conversion results, statistics, and advisory warnings
pub mod outcome;

pub use converter::{ConversionConfig, Converter};
pub use outcome::{ConversionStats, ConversionSuccess, ConversionWarning};
