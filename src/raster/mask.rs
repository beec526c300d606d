//! Binary foreground/background grids shared by every raster stage
//!
//! Cells are stored row-major as `(y, x)` so that `ndarray` iteration order
//! matches image scan order. `true` always means "drawn stroke".

use bitvec::vec::BitVec;
use image::{GrayImage, Luma};
use ndarray::Array2;

/// Pixel value written for foreground cells when converting to an image
pub const FOREGROUND_VALUE: u8 = 255;

/// Offsets of the 8-connected neighbourhood as `(dx, dy)`
const NEIGHBOURS_8: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A 2D boolean grid with normalized stroke polarity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    cells: Array2<bool>,
}

impl BinaryMask {
    /// Create an all-background mask
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::from_elem((height, width), false),
        }
    }

    /// Build a mask by evaluating `f(x, y)` for every cell
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> bool) -> Self {
        Self {
            cells: Array2::from_shape_fn((height, width), |(y, x)| f(x, y)),
        }
    }

    /// Interpret every non-zero pixel of a grayscale image as foreground
    pub fn from_gray_image(image: &GrayImage) -> Self {
        Self::from_fn(image.width() as usize, image.height() as usize, |x, y| {
            image.get_pixel(x as u32, y as u32).0[0] > 0
        })
    }

    /// Render foreground as white (255) on black (0)
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width() as u32, self.height() as u32, |x, y| {
            if self.get(x as usize, y as usize) {
                Luma([FOREGROUND_VALUE])
            } else {
                Luma([0])
            }
        })
    }

    /// Mask width in pixels
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Mask height in pixels
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Read a cell; out-of-bounds reads are background
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells.get((y, x)).copied().unwrap_or(false)
    }

    /// Read a cell at signed coordinates; out-of-bounds reads are background
    pub fn get_signed(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.get(x as usize, y as usize)
    }

    /// Write a cell; out-of-bounds writes are ignored
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if let Some(cell) = self.cells.get_mut((y, x)) {
            *cell = value;
        }
    }

    /// Underlying `(height, width)` array
    pub const fn cells(&self) -> &Array2<bool> {
        &self.cells
    }

    /// Number of foreground cells
    pub fn foreground_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Whether the mask has no foreground at all
    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&cell| cell)
    }

    /// Swap foreground and background
    pub fn inverted(&self) -> Self {
        Self {
            cells: self.cells.mapv(|cell| !cell),
        }
    }

    /// Number of 8-connected foreground components
    pub fn component_count(&self) -> usize {
        let width = self.width();
        let mut visited: BitVec = BitVec::repeat(false, width * self.height());
        let mut stack = Vec::new();
        let mut components = 0;

        for ((y, x), &cell) in self.cells.indexed_iter() {
            if !cell || visited.get(y * width + x).is_some_and(|bit| *bit) {
                continue;
            }
            components += 1;
            visited.set(y * width + x, true);
            stack.push((x, y));

            while let Some((cx, cy)) = stack.pop() {
                for (dx, dy) in NEIGHBOURS_8 {
                    let nx = cx as isize + dx;
                    let ny = cy as isize + dy;
                    if !self.get_signed(nx, ny) {
                        continue;
                    }
                    let index = ny as usize * width + nx as usize;
                    if visited.get(index).is_some_and(|bit| *bit) {
                        continue;
                    }
                    visited.set(index, true);
                    stack.push((nx as usize, ny as usize));
                }
            }
        }

        components
    }
}
