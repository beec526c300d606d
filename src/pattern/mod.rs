//! Pattern synthesis: angle quantization, family clustering, tiling, and the `.pat` format

/// Canonical hatch angle sets
pub mod angle;
/// Line families and `.pat` serialization
pub mod definition;
/// Segment clustering into colinear families
pub mod family;
/// Tiled preview rendering
pub mod preview;
/// Repeat vectors and periodic dash sequences
pub mod tiling;

pub use angle::AngleSet;
pub use definition::{LineFamily, PatternDefinition};
pub use tiling::TileSize;
