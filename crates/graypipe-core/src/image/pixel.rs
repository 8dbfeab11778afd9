//! Decoded multi-channel images
//!
//! A codec only learns the channel count of a file while decoding it, so
//! decoded images are carried as a [`PixelImage`]: one variant per channel
//! layout, each holding an `Image<Pixel<N>>` with the count fixed in its
//! element type.

use super::{GrayImage, Image, Pixel};

/// Decoded image with 1 to 4 channels per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelImage {
    /// Gray
    Gray(Image<Pixel<1>>),
    /// Gray and alpha
    GrayAlpha(Image<Pixel<2>>),
    /// Red, green, blue
    Rgb(Image<Pixel<3>>),
    /// Red, green, blue, alpha
    Rgba(Image<Pixel<4>>),
}

impl PixelImage {
    /// Get the image width.
    pub fn width(&self) -> u32 {
        match self {
            PixelImage::Gray(img) => img.width(),
            PixelImage::GrayAlpha(img) => img.width(),
            PixelImage::Rgb(img) => img.width(),
            PixelImage::Rgba(img) => img.width(),
        }
    }

    /// Get the image height.
    pub fn height(&self) -> u32 {
        match self {
            PixelImage::Gray(img) => img.height(),
            PixelImage::GrayAlpha(img) => img.height(),
            PixelImage::Rgb(img) => img.height(),
            PixelImage::Rgba(img) => img.height(),
        }
    }

    /// Number of channels per pixel.
    pub fn channels(&self) -> usize {
        match self {
            PixelImage::Gray(_) => 1,
            PixelImage::GrayAlpha(_) => 2,
            PixelImage::Rgb(_) => 3,
            PixelImage::Rgba(_) => 4,
        }
    }

    /// Check whether the last channel is alpha.
    pub fn has_alpha(&self) -> bool {
        matches!(self, PixelImage::GrayAlpha(_) | PixelImage::Rgba(_))
    }
}

impl From<GrayImage> for PixelImage {
    fn from(img: GrayImage) -> Self {
        PixelImage::Gray(img.map(|v| [v]))
    }
}

impl From<Image<Pixel<1>>> for PixelImage {
    fn from(img: Image<Pixel<1>>) -> Self {
        PixelImage::Gray(img)
    }
}

impl From<Image<Pixel<2>>> for PixelImage {
    fn from(img: Image<Pixel<2>>) -> Self {
        PixelImage::GrayAlpha(img)
    }
}

impl From<Image<Pixel<3>>> for PixelImage {
    fn from(img: Image<Pixel<3>>) -> Self {
        PixelImage::Rgb(img)
    }
}

impl From<Image<Pixel<4>>> for PixelImage {
    fn from(img: Image<Pixel<4>>) -> Self {
        PixelImage::Rgba(img)
    }
}
