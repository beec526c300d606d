//! Gap bridging through binary morphology
//!
//! Uses square (L∞) structuring elements of side `2·radius + 1`.

use crate::raster::mask::BinaryMask;
use imageproc::distance_transform::Norm;

/// Dilate then erode so that strokes separated by small gaps become connected
///
/// A radius of 0 returns the mask unchanged.
pub fn close(mask: &BinaryMask, radius: u8) -> BinaryMask {
    if radius == 0 {
        return mask.clone();
    }
    let closed = imageproc::morphology::close(&mask.to_gray_image(), Norm::LInf, radius);
    BinaryMask::from_gray_image(&closed)
}

/// Erode then dilate, removing specks smaller than the structuring element
///
/// A radius of 0 returns the mask unchanged.
pub fn open(mask: &BinaryMask, radius: u8) -> BinaryMask {
    if radius == 0 {
        return mask.clone();
    }
    let opened = imageproc::morphology::open(&mask.to_gray_image(), Norm::LInf, radius);
    BinaryMask::from_gray_image(&opened)
}

/// Optional despeckling opening followed by gap-closing
pub fn bridge_gaps(mask: &BinaryMask, open_radius: u8, close_radius: u8) -> BinaryMask {
    let despeckled = open(mask, open_radius);
    let bridged = close(&despeckled, close_radius);
    tracing::debug!(
        open_radius,
        close_radius,
        before = mask.foreground_count(),
        after = bridged.foreground_count(),
        "bridged mask gaps"
    );
    bridged
}
