//! Raster stages of the conversion pipeline
//!
//! This module contains:
//! - Binary mask storage and connectivity queries
//! - Decoding, cropping, thresholding, and polarity normalization
//! - Morphological gap bridging
//! - Skeletonization

/// Binary stroke masks
pub mod mask;
/// Morphological opening and closing
pub mod morphology;
/// Image decoding and binarization
pub mod preprocess;
/// Centerline extraction by thinning
pub mod skeleton;

pub use mask::BinaryMask;
