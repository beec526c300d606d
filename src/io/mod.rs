/// Command-line interface and batch file processing
pub mod cli;
/// Default values and fixed limits
pub mod configuration;
/// Error types and helpers
pub mod error;
/// Writing patterns and preview images to disk
pub mod export;
/// Batch progress display
pub mod progress;
/// Plain-text segment lists
pub mod segments;
