//! Command-line interface for batch converting sketches and segment lists

use crate::io::configuration::{
    DEFAULT_ADAPTIVE_BLOCK_RADIUS, DEFAULT_ADAPTIVE_OFFSET, DEFAULT_BLUR_KERNEL,
    DEFAULT_CANNY_HIGH, DEFAULT_CANNY_LOW, DEFAULT_CLOSE_RADIUS, DEFAULT_EPSILON_FACTOR,
    DEFAULT_OPEN_RADIUS, DEFAULT_PATTERN_DESCRIPTION, DEFAULT_PATTERN_NAME, DEFAULT_PATTERN_SCALE,
    DEFAULT_PREVIEW_REPEATS, DEFAULT_PREVIEW_SIZE, DEFAULT_TILE_HEIGHT, DEFAULT_TILE_WIDTH,
    CONTOURS_SUFFIX, IMAGE_EXTENSIONS, PATTERN_EXTENSION, PREVIEW_SUFFIX, SEGMENT_EXTENSIONS,
};
use crate::io::error::{HatchError, Result, WithPath, invalid_parameter};
use crate::io::export::{export_preview_png, write_pattern};
use crate::io::progress::ProgressManager;
use crate::io::segments::read_segments;
use crate::pattern::angle::AngleSet;
use crate::pattern::preview::PreviewConfig;
use crate::pipeline::converter::{ConversionConfig, Converter};
use crate::pipeline::outcome::ConversionSuccess;
use crate::raster::preprocess::{
    BinarizationMode, ExtractionStrategy, PreprocessConfig, ThresholdMethod,
};
use crate::vector::contour::{ContourConfig, ContourMode};
use crate::vector::geometry::Extent;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Global threshold selection on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThresholdArg {
    /// Otsu's global level
    Otsu,
    /// Local mean over a square window
    Adaptive,
}

/// Stroke polarity selection on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolarityArg {
    /// Strokes are the minority class
    Auto,
    /// Dark strokes on a light background
    Light,
    /// Light strokes on a dark background
    Dark,
}

#[derive(Parser)]
#[command(name = "hatchcraft")]
#[command(
    author,
    version,
    about = "Convert raster sketches into tileable CAD hatch patterns (.pat)"
)]
/// Command-line arguments for the conversion tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Image file, segment list (.csv/.txt), or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Tile width in pattern units
    #[arg(short = 'W', long, default_value_t = DEFAULT_TILE_WIDTH)]
    pub tile_width: f64,

    /// Tile height in pattern units
    #[arg(short = 'H', long, default_value_t = DEFAULT_TILE_HEIGHT)]
    pub tile_height: f64,

    /// Multiplier applied to the tile and all geometry
    #[arg(short, long, default_value_t = DEFAULT_PATTERN_SCALE)]
    pub scale: f64,

    /// Simplification tolerance as a fraction of each contour's perimeter
    #[arg(short, long, default_value_t = DEFAULT_EPSILON_FACTOR)]
    pub epsilon: f64,

    /// Gap-closing radius in pixels (0 disables)
    #[arg(short, long, default_value_t = DEFAULT_CLOSE_RADIUS)]
    pub close_radius: u8,

    /// Despeckling opening radius in pixels (0 disables)
    #[arg(short, long, default_value_t = DEFAULT_OPEN_RADIUS)]
    pub open_radius: u8,

    /// Trace filled stroke outlines instead of thinned centerlines
    #[arg(long)]
    pub no_skeleton: bool,

    /// With --no-skeleton, keep only outer borders and ignore holes
    #[arg(long)]
    pub outer_only: bool,

    /// Threshold method
    #[arg(long, value_enum, default_value_t = ThresholdArg::Otsu)]
    pub threshold: ThresholdArg,

    /// Adaptive threshold window radius in pixels
    #[arg(long, default_value_t = DEFAULT_ADAPTIVE_BLOCK_RADIUS)]
    pub block_radius: u32,

    /// Adaptive threshold offset below the local mean
    #[arg(long, default_value_t = DEFAULT_ADAPTIVE_OFFSET, allow_hyphen_values = true)]
    pub adaptive_offset: i16,

    /// Stroke polarity
    #[arg(long, value_enum, default_value_t = PolarityArg::Auto)]
    pub polarity: PolarityArg,

    /// Invert the detected polarity
    #[arg(short, long)]
    pub invert: bool,

    /// Use Canny edges instead of thresholded regions
    #[arg(long)]
    pub edges: bool,

    /// Canny low hysteresis threshold
    #[arg(long, default_value_t = DEFAULT_CANNY_LOW)]
    pub canny_low: f32,

    /// Canny high hysteresis threshold
    #[arg(long, default_value_t = DEFAULT_CANNY_HIGH)]
    pub canny_high: f32,

    /// Gaussian kernel size before Canny (below 3 disables blurring)
    #[arg(long, default_value_t = DEFAULT_BLUR_KERNEL)]
    pub blur_kernel: u32,

    /// Add the 26.565°/63.435° brick-bond diagonals to the angle set
    #[arg(short, long)]
    pub brick: bool,

    /// Preview raster side length in pixels
    #[arg(long, default_value_t = DEFAULT_PREVIEW_SIZE)]
    pub preview_size: u32,

    /// Preview tiles per axis
    #[arg(short = 'r', long, default_value_t = DEFAULT_PREVIEW_REPEATS)]
    pub preview_repeats: u32,

    /// Pattern name (defaults to the input file stem)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Pattern description
    #[arg(short, long, default_value = DEFAULT_PATTERN_DESCRIPTION)]
    pub description: String,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Build the pipeline configuration for one input file
    pub fn conversion_config(&self, input_path: &Path) -> ConversionConfig {
        let threshold = match self.threshold {
            ThresholdArg::Otsu => ThresholdMethod::Otsu,
            ThresholdArg::Adaptive => ThresholdMethod::AdaptiveMean {
                block_radius: self.block_radius,
                offset: self.adaptive_offset,
            },
        };
        let mode = match self.polarity {
            PolarityArg::Auto => BinarizationMode::AutoDetect,
            PolarityArg::Light => BinarizationMode::ForceLightBackground,
            PolarityArg::Dark => BinarizationMode::ForceDarkBackground,
        };
        let strategy = if self.edges {
            ExtractionStrategy::Edges {
                low: self.canny_low,
                high: self.canny_high,
                blur_kernel: self.blur_kernel,
            }
        } else {
            ExtractionStrategy::Contours
        };

        let name = self.name.clone().unwrap_or_else(|| {
            input_path
                .file_stem()
                .map_or_else(|| DEFAULT_PATTERN_NAME.to_string(), |stem| {
                    stem.to_string_lossy().to_uppercase()
                })
        });

        ConversionConfig {
            tile_width: self.tile_width,
            tile_height: self.tile_height,
            scale: self.scale,
            preprocess: PreprocessConfig {
                threshold,
                mode,
                invert: self.invert,
                strategy,
            },
            open_radius: self.open_radius,
            close_radius: self.close_radius,
            skeletonize: !self.no_skeleton,
            contour: ContourConfig {
                mode: if self.outer_only {
                    ContourMode::Outer
                } else {
                    ContourMode::All
                },
                ..ContourConfig::default()
            },
            epsilon_factor: self.epsilon,
            angle_set: if self.brick {
                AngleSet::BrickBond
            } else {
                AngleSet::Basic
            },
            preview: PreviewConfig {
                repeats: self.preview_repeats,
                size: self.preview_size,
            },
            name,
            description: self.description.clone(),
            ..ConversionConfig::default()
        }
    }
}

/// Kind of input a file is converted from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Raster sketch
    Image,
    /// Plain-text segment list
    Segments,
}

impl InputKind {
    /// Classify a path by its extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            Some(Self::Image)
        } else if SEGMENT_EXTENSIONS.contains(&extension.as_str()) {
            Some(Self::Segments)
        } else {
            None
        }
    }
}

/// Orchestrates batch conversion with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if InputKind::from_path(target).is_none() {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"must be an image or a .csv/.txt segment list",
                ));
            }
            Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                vec![]
            })
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).with_path(target, "read directory")? {
                let path = entry.with_path(target, "read directory entry")?.path();
                if InputKind::from_path(&path) == Some(InputKind::Image)
                    && !Self::is_preview(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be an existing file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        if Self::pattern_path(input_path).exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn enter_stage(&mut self, index: usize, stage: usize) {
        if let Some(ref mut pm) = self.progress_manager {
            pm.enter_stage(index, stage);
        }
    }

    // Allow print for the per-file summary and warnings
    #[allow(clippy::print_stderr)]
    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path);
        }

        let converter = Converter::new(self.cli.conversion_config(input_path))?;
        let outcome = match InputKind::from_path(input_path) {
            Some(InputKind::Segments) => {
                let segments = read_segments(input_path)?;
                self.enter_stage(index, 1);
                let extent = Extent::from_segments(&segments).ok_or_else(|| {
                    invalid_parameter(
                        "segments",
                        &input_path.display(),
                        &"contains no finite segments",
                    )
                })?;
                converter.convert_segments(&segments, extent)?
            }
            _ => {
                let image = image::open(input_path).map_err(|source| HatchError::ImageLoad {
                    path: input_path.to_path_buf(),
                    source,
                })?;
                self.enter_stage(index, 1);
                converter.convert_dynamic_image(&image)?
            }
        };

        self.enter_stage(index, 2);
        write_pattern(&outcome.pattern_text(), &Self::pattern_path(input_path))?;
        self.enter_stage(index, 3);
        export_preview_png(&outcome.preview, &Self::preview_path(input_path))?;
        if let Some(overlay) = &outcome.overlay {
            export_preview_png(overlay, &Self::overlay_path(input_path))?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }

        if !self.cli.quiet {
            eprintln!("{}: {}", input_path.display(), outcome.stats.summary());
            Self::report_warnings(&outcome);
        }

        Ok(())
    }

    // Allow print for user-facing warnings
    #[allow(clippy::print_stderr)]
    fn report_warnings(outcome: &ConversionSuccess) {
        for warning in &outcome.warnings {
            eprintln!("  warning: {warning}");
        }
    }

    /// Path of the `.pat` file written for an input
    pub fn pattern_path(input_path: &Path) -> PathBuf {
        input_path.with_extension(PATTERN_EXTENSION)
    }

    /// Whether a path is a preview or overlay written by an earlier run
    pub fn is_preview(path: &Path) -> bool {
        path.file_stem().is_some_and(|stem| {
            let stem = stem.to_string_lossy();
            stem.ends_with(PREVIEW_SUFFIX) || stem.ends_with(CONTOURS_SUFFIX)
        })
    }

    /// Path of the preview PNG written for an input
    pub fn preview_path(input_path: &Path) -> PathBuf {
        Self::suffixed_png(input_path, PREVIEW_SUFFIX)
    }

    /// Path of the traced-contour overlay PNG written for an image input
    pub fn overlay_path(input_path: &Path) -> PathBuf {
        Self::suffixed_png(input_path, CONTOURS_SUFFIX)
    }

    fn suffixed_png(input_path: &Path, suffix: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let name = format!("{}{suffix}.png", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(name)
        } else {
            PathBuf::from(name)
        }
    }
}
