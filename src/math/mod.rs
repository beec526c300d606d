//! Mathematical utilities shared across the pipeline

/// Float rounding, wrapping, and circular distance helpers
pub mod numeric;
