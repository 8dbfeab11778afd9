//! Generated test images
//!
//! Small deterministic images for tests that should not depend on files.

use graypipe_core::{GrayImage, Image, Pixel};

/// Smooth RGB image: red follows x, green follows y, blue is constant.
///
/// # Panics
///
/// Panics if `width` or `height` is 0.
pub fn rgb_gradient(width: u32, height: u32) -> Image<Pixel<3>> {
    Image::from_fn(width, height, |x, y| [ramp(x, width), ramp(y, height), 128])
        .expect("non-empty gradient dimensions")
}

/// Smooth RGBA image with a horizontal alpha ramp.
///
/// # Panics
///
/// Panics if `width` or `height` is 0.
pub fn rgba_gradient(width: u32, height: u32) -> Image<Pixel<4>> {
    Image::from_fn(width, height, |x, y| {
        [ramp(x, width), ramp(y, height), 64, 255 - ramp(x, width)]
    })
    .expect("non-empty gradient dimensions")
}

/// Smooth grayscale image rising diagonally from 0 to 255.
///
/// # Panics
///
/// Panics if `width` or `height` is 0.
pub fn gray_gradient(width: u32, height: u32) -> GrayImage {
    Image::from_fn(width, height, |x, y| {
        let span = (width + height).saturating_sub(2).max(1);
        ((x + y) * 255 / span) as u8
    })
    .expect("non-empty gradient dimensions")
}

/// Grayscale checkerboard with `cell`-sized squares of 0 and 255.
///
/// # Panics
///
/// Panics if `width`, `height` or `cell` is 0.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> GrayImage {
    Image::from_fn(width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 { 0 } else { 255 }
    })
    .expect("non-empty checkerboard dimensions")
}

/// Map `pos` in `0..len` linearly onto `0..=255`.
fn ramp(pos: u32, len: u32) -> u8 {
    if len <= 1 {
        return 0;
    }
    (pos * 255 / (len - 1)) as u8
}
