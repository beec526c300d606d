//! Conversion constants and runtime configuration defaults

// Declared tile geometry
/// Default physical tile width in pattern units
pub const DEFAULT_TILE_WIDTH: f64 = 10.0;
/// Default physical tile height in pattern units
pub const DEFAULT_TILE_HEIGHT: f64 = 10.0;
/// Default multiplier applied to the declared tile size
pub const DEFAULT_PATTERN_SCALE: f64 = 1.0;

// Raster stages
/// Default morphological closing radius in pixels
pub const DEFAULT_CLOSE_RADIUS: u8 = 1;
/// Default despeckle opening radius in pixels (0 disables the opening pass)
pub const DEFAULT_OPEN_RADIUS: u8 = 0;
/// Default half-size of the adaptive threshold window in pixels
pub const DEFAULT_ADAPTIVE_BLOCK_RADIUS: u32 = 15;
/// Default intensity offset subtracted from the local mean by adaptive thresholding
pub const DEFAULT_ADAPTIVE_OFFSET: i16 = 5;
/// Default Canny low threshold for the edge pre-stage
pub const DEFAULT_CANNY_LOW: f32 = 50.0;
/// Default Canny high threshold for the edge pre-stage
pub const DEFAULT_CANNY_HIGH: f32 = 150.0;
/// Default Gaussian blur kernel size for the edge pre-stage (odd)
pub const DEFAULT_BLUR_KERNEL: u32 = 5;

// Vectorization
/// Default Douglas-Peucker tolerance as a fraction of each contour's perimeter
pub const DEFAULT_EPSILON_FACTOR: f64 = 0.005;
/// Default minimum contour perimeter in pixels
pub const DEFAULT_MIN_CONTOUR_PERIMETER: f64 = 4.0;
/// Default minimum enclosed contour area in square pixels
pub const DEFAULT_MIN_CONTOUR_AREA: f64 = 0.0;

// Family clustering, expressed as fractions of the tile width so that raster
// and segment-list inputs share one set of defaults
/// Width of the perpendicular offset band that groups colinear segments
pub const DEFAULT_OFFSET_TOLERANCE: f64 = 0.015;
/// Minimum segment length kept by the clusterer
pub const DEFAULT_MIN_SEGMENT_LENGTH: f64 = 0.005;
/// Minimum total drawn length of a family
pub const DEFAULT_MIN_FAMILY_LENGTH: f64 = 0.01;
/// Minimum number of member segments of a family
pub const DEFAULT_MIN_FAMILY_SEGMENTS: usize = 1;

// Advisory limits for downstream CAD consumers
/// Family count above which an excessive-complexity warning is raised
pub const MAX_ADVISORY_FAMILIES: usize = 256;
/// Dash/gap token count per family above which an excessive-complexity warning is raised
pub const MAX_ADVISORY_DASH_TOKENS: usize = 32;

// Serialization
/// Fixed number of decimals used for every numeric field of a pattern record
pub const DEFAULT_PRECISION: usize = 5;
/// Pattern name used when none is supplied
pub const DEFAULT_PATTERN_NAME: &str = "HatchCraftGen";
/// Pattern description used when none is supplied
pub const DEFAULT_PATTERN_DESCRIPTION: &str = "generated pattern";

// Preview
/// Default number of tile repeats per preview axis
pub const DEFAULT_PREVIEW_REPEATS: u32 = 3;
/// Default preview raster side length in pixels
pub const DEFAULT_PREVIEW_SIZE: u32 = 600;
// Bounds the work of degenerate repeat vectors or dash periods
/// Maximum number of parallel lines rendered per family
pub const MAX_PREVIEW_LINES: usize = 20_000;
/// Maximum number of dash periods walked along one line
pub const MAX_PREVIEW_PERIODS: usize = 20_000;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to preview filenames
pub const PREVIEW_SUFFIX: &str = "_preview";
/// Suffix added to traced-contour overlay filenames
pub const CONTOURS_SUFFIX: &str = "_contours";
/// Extension of written pattern files
pub const PATTERN_EXTENSION: &str = "pat";
/// Raster file extensions accepted by the batch processor
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "gif", "webp"];
/// Segment-list file extensions accepted by the batch processor
pub const SEGMENT_EXTENSIONS: [&str; 2] = ["csv", "txt"];
