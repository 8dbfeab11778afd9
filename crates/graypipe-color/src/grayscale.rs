//! Grayscale reduction
//!
//! Maps every multi-channel pixel to a single intensity by averaging its
//! channels with integer division:
//!
//! ```text
//! gray = (c0 + c1 + ... + cN-1) / N      (truncating)
//! ```
//!
//! The default reduction is channel-count agnostic: an alpha channel is
//! summed on equal footing with the color channels. [`GrayReduction::ExcludeAlpha`]
//! leaves the alpha channel of 2- and 4-channel pixels out of the average.

use crate::{ColorError, ColorResult};
use graypipe_core::{GrayImage, Image, Intensity, Pixel, PixelImage};
use log::debug;

/// Channel selection for grayscale reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrayReduction {
    /// Average every channel, alpha included
    #[default]
    ChannelAverage,
    /// Average color channels only; for 2- and 4-channel pixels the last
    /// channel is alpha and is ignored
    ExcludeAlpha,
}

impl GrayReduction {
    /// Number of leading channels that take part in the average.
    fn averaged_channels(self, channels: usize) -> usize {
        match (self, channels) {
            (GrayReduction::ExcludeAlpha, 2 | 4) => channels - 1,
            _ => channels,
        }
    }
}

/// Reduce a single pixel to its intensity by averaging all channels.
///
/// # Examples
///
/// ```
/// use graypipe_color::pixel_to_gray;
///
/// assert_eq!(pixel_to_gray(&[90, 120, 150]), 120);
/// assert_eq!(pixel_to_gray(&[255, 255, 254]), 254);
/// ```
#[inline]
pub fn pixel_to_gray(channels: &[u8]) -> Intensity {
    if channels.is_empty() {
        return 0;
    }
    let sum: u32 = channels.iter().map(|&c| u32::from(c)).sum();
    // mean of u8 values never exceeds 255
    (sum / channels.len() as u32) as Intensity
}

/// Reduce an image to grayscale with [`GrayReduction::ChannelAverage`].
///
/// # Errors
///
/// Returns [`ColorError::EmptyImage`] if the image has zero area.
///
/// # Examples
///
/// ```
/// use graypipe_color::reduce;
/// use graypipe_core::Image;
///
/// let rgb = Image::new(2, 2, [90u8, 120, 150]).unwrap();
/// let gray = reduce(&rgb).unwrap();
/// assert_eq!(gray.get(1, 1), Some(120));
/// ```
pub fn reduce<const N: usize>(img: &Image<Pixel<N>>) -> ColorResult<GrayImage> {
    reduce_with(img, GrayReduction::ChannelAverage)
}

/// Reduce an image to grayscale with the given channel selection.
///
/// The output has the same width and height as the input.
///
/// # Errors
///
/// Returns [`ColorError::EmptyImage`] if the image has zero area.
pub fn reduce_with<const N: usize>(
    img: &Image<Pixel<N>>,
    mode: GrayReduction,
) -> ColorResult<GrayImage> {
    if img.is_empty() || N == 0 {
        return Err(ColorError::EmptyImage);
    }
    let used = mode.averaged_channels(N);
    debug!(
        "reducing {}x{} image with {} channels ({:?}, {} averaged)",
        img.width(),
        img.height(),
        N,
        mode,
        used
    );
    Ok(img.map(|pixel| pixel_to_gray(&pixel[..used])))
}

/// Reduce a decoded image of any channel layout.
///
/// # Errors
///
/// Returns [`ColorError::EmptyImage`] if the image has zero area.
pub fn reduce_pixels(img: &PixelImage, mode: GrayReduction) -> ColorResult<GrayImage> {
    match img {
        PixelImage::Gray(img) => reduce_with(img, mode),
        PixelImage::GrayAlpha(img) => reduce_with(img, mode),
        PixelImage::Rgb(img) => reduce_with(img, mode),
        PixelImage::Rgba(img) => reduce_with(img, mode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_to_gray_truncates() {
        assert_eq!(pixel_to_gray(&[90, 120, 150]), 120);
        // 2 / 3 truncates to 0, not rounded to 1
        assert_eq!(pixel_to_gray(&[1, 1, 0]), 0);
        assert_eq!(pixel_to_gray(&[255, 255, 255]), 255);
        assert_eq!(pixel_to_gray(&[0, 0, 0]), 0);
        assert_eq!(pixel_to_gray(&[]), 0);
    }

    #[test]
    fn test_reduce_rgb() {
        let img = Image::from_rows(&[
            [[90u8, 120, 150], [255, 0, 0]],
            [[0, 255, 0], [10, 20, 31]],
        ])
        .unwrap();
        let gray = reduce(&img).unwrap();
        assert_eq!(gray.to_rows(), vec![vec![120, 85], vec![85, 20]]);
    }

    #[test]
    fn test_reduce_rgba_includes_alpha() {
        let img = Image::new(1, 1, [100u8, 100, 100, 0]).unwrap();
        assert_eq!(reduce(&img).unwrap().get(0, 0), Some(75));
    }

    #[test]
    fn test_reduce_rgba_exclude_alpha() {
        let img = Image::new(1, 1, [100u8, 100, 100, 0]).unwrap();
        let gray = reduce_with(&img, GrayReduction::ExcludeAlpha).unwrap();
        assert_eq!(gray.get(0, 0), Some(100));
    }

    #[test]
    fn test_exclude_alpha_without_alpha_is_average() {
        let img = Image::new(2, 1, [10u8, 20, 30]).unwrap();
        let a = reduce_with(&img, GrayReduction::ExcludeAlpha).unwrap();
        let b = reduce(&img).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_reduce_gray_alpha() {
        let img = Image::new(1, 1, [200u8, 100]).unwrap();
        assert_eq!(reduce(&img).unwrap().get(0, 0), Some(150));
        let gray = reduce_with(&img, GrayReduction::ExcludeAlpha).unwrap();
        assert_eq!(gray.get(0, 0), Some(200));
    }

    #[test]
    fn test_reduce_preserves_dimensions() {
        let img = Image::from_fn(7, 3, |x, y| [x as u8, y as u8, 0]).unwrap();
        let gray = reduce(&img).unwrap();
        assert_eq!(gray.dimensions(), (7, 3));
    }

    #[test]
    fn test_reduce_empty() {
        let img: Image<Pixel<3>> = Image::empty(0, 0).unwrap();
        assert!(matches!(reduce(&img), Err(ColorError::EmptyImage)));
    }

    #[test]
    fn test_reduce_pixels_dispatch() {
        let img: PixelImage = Image::new(2, 2, [0u8, 30, 60, 90]).unwrap().into();
        let gray = reduce_pixels(&img, GrayReduction::ChannelAverage).unwrap();
        assert_eq!(gray.get(0, 0), Some(45));
        let gray = reduce_pixels(&img, GrayReduction::ExcludeAlpha).unwrap();
        assert_eq!(gray.get(0, 0), Some(30));
    }
}
