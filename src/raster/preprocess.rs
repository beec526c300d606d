//! Image decoding, square cropping, thresholding, and polarity normalization
//!
//! Produces a [`BinaryMask`] whose foreground is always the drawn strokes,
//! regardless of whether the source sketch was dark-on-light or light-on-dark.

use crate::io::error::{HatchError, Result};
use crate::raster::mask::BinaryMask;
use image::{DynamicImage, GrayImage};
use imageproc::contrast::otsu_level;
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use ndarray::Array2;

/// How grayscale intensities are split into a dark and a light class
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdMethod {
    /// Single global level chosen by Otsu's method
    Otsu,
    /// Local mean over a `(2r+1)²` window; pixels at or below `mean - offset` are dark
    AdaptiveMean {
        /// Half-size of the averaging window in pixels
        block_radius: u32,
        /// Constant subtracted from the local mean
        offset: i16,
    },
}

/// Which intensity class holds the drawn strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinarizationMode {
    /// Strokes are whichever class covers at most half of the canvas
    #[default]
    AutoDetect,
    /// Dark strokes on a light background
    ForceLightBackground,
    /// Light strokes on a dark background
    ForceDarkBackground,
}

/// How the foreground mask is extracted from the grayscale canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExtractionStrategy {
    /// Threshold the canvas and trace the filled (or thinned) stroke regions
    Contours,
    /// Blur, run Canny, and trace the resulting edge map
    Edges {
        /// Canny low hysteresis threshold
        low: f32,
        /// Canny high hysteresis threshold
        high: f32,
        /// Gaussian kernel size (odd; values below 3 disable blurring)
        blur_kernel: u32,
    },
}

/// Options for the raster preprocessing stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreprocessConfig {
    /// Threshold method used by the contour strategy
    pub threshold: ThresholdMethod,
    /// Polarity selection
    pub mode: BinarizationMode,
    /// Toggle the computed polarity once more
    pub invert: bool,
    /// Mask extraction strategy
    pub strategy: ExtractionStrategy,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            threshold: ThresholdMethod::Otsu,
            mode: BinarizationMode::AutoDetect,
            invert: false,
            strategy: ExtractionStrategy::Contours,
        }
    }
}

/// Decode an in-memory raster image
///
/// # Errors
///
/// Returns [`HatchError::Decode`] when the bytes are not a supported image format
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|source| HatchError::Decode { source })
}

/// Crop the largest centered square out of an image
pub fn crop_to_square(image: &DynamicImage) -> DynamicImage {
    let (width, height) = (image.width(), image.height());
    let side = width.min(height);
    image.crop_imm((width - side) / 2, (height - side) / 2, side, side)
}

/// Produce the normalized stroke mask from an already decoded image
pub fn preprocess_image(image: &DynamicImage, config: &PreprocessConfig) -> BinaryMask {
    let gray = crop_to_square(image).to_luma8();

    match config.strategy {
        ExtractionStrategy::Contours => {
            let dark = dark_pixels(&gray, config.threshold);
            normalize_polarity(&dark, config.mode, config.invert)
        }
        ExtractionStrategy::Edges {
            low,
            high,
            blur_kernel,
        } => {
            let edges = detect_edges(&gray, low, high, blur_kernel);
            if config.invert {
                edges.inverted()
            } else {
                edges
            }
        }
    }
}

/// Classify every pixel as dark (`true`) or light (`false`)
pub fn dark_pixels(gray: &GrayImage, method: ThresholdMethod) -> BinaryMask {
    match method {
        ThresholdMethod::Otsu => {
            let level = otsu_level(gray);
            BinaryMask::from_fn(gray.width() as usize, gray.height() as usize, |x, y| {
                gray.get_pixel(x as u32, y as u32).0[0] <= level
            })
        }
        ThresholdMethod::AdaptiveMean {
            block_radius,
            offset,
        } => adaptive_mean_dark(gray, block_radius as usize, i64::from(offset)),
    }
}

/// Pick the stroke class from a dark-pixel classification
///
/// In [`BinarizationMode::AutoDetect`] the dark class is inverted when it covers
/// more than half of the canvas. `invert` then toggles the result once.
pub fn normalize_polarity(dark: &BinaryMask, mode: BinarizationMode, invert: bool) -> BinaryMask {
    let strokes_are_light = match mode {
        BinarizationMode::AutoDetect => {
            let total = dark.width() * dark.height();
            dark.foreground_count() * 2 > total
        }
        BinarizationMode::ForceLightBackground => false,
        BinarizationMode::ForceDarkBackground => true,
    };

    if strokes_are_light ^ invert {
        dark.inverted()
    } else {
        dark.clone()
    }
}

/// Gaussian sigma matching an odd kernel size, or `None` when blurring is disabled
pub fn blur_sigma(kernel: u32) -> Option<f32> {
    (kernel >= 3).then(|| 0.3f32.mul_add((kernel as f32 - 1.0).mul_add(0.5, -1.0), 0.8))
}

/// Edge map of the canvas as a foreground mask
pub fn detect_edges(gray: &GrayImage, low: f32, high: f32, blur_kernel: u32) -> BinaryMask {
    let edges = match blur_sigma(blur_kernel) {
        Some(sigma) => canny(&gaussian_blur_f32(gray, sigma), low, high),
        None => canny(gray, low, high),
    };
    BinaryMask::from_gray_image(&edges)
}

fn adaptive_mean_dark(gray: &GrayImage, radius: usize, offset: i64) -> BinaryMask {
    let (width, height) = (gray.width() as usize, gray.height() as usize);

    // Summed-area table with a zero guard row and column
    let mut integral = Array2::<i64>::zeros((height + 1, width + 1));
    for y in 0..height {
        let mut row_sum = 0i64;
        for x in 0..width {
            row_sum += i64::from(gray.get_pixel(x as u32, y as u32).0[0]);
            let above = integral.get((y, x + 1)).copied().unwrap_or(0);
            if let Some(cell) = integral.get_mut((y + 1, x + 1)) {
                *cell = above + row_sum;
            }
        }
    }

    BinaryMask::from_fn(width, height, |x, y| {
        let x0 = x.saturating_sub(radius);
        let y0 = y.saturating_sub(radius);
        let x1 = (x + radius + 1).min(width);
        let y1 = (y + radius + 1).min(height);
        let area = ((x1 - x0) * (y1 - y0)) as i64;

        let at = |row: usize, col: usize| integral.get((row, col)).copied().unwrap_or(0);
        let sum = at(y1, x1) - at(y0, x1) - at(y1, x0) + at(y0, x0);

        let value = i64::from(gray.get_pixel(x as u32, y as u32).0[0]);
        // value <= sum / area - offset, kept in integers
        value * area <= sum - offset * area
    })
}
