//! Image - The fixed-shape 2D sample container
//!
//! `Image<T>` is a rectangular, row-major grid of samples. The element type
//! decides what a sample is:
//!
//! - [`Intensity`] (`u8`) for single-channel grayscale images
//! - [`Pixel<N>`] (`[u8; N]`) for multi-channel images with `N` channels
//!
//! # Shape invariant
//!
//! The buffer always holds exactly `width * height` samples, so every row
//! has the same length. Ragged input is rejected at construction time
//! ([`Image::from_rows`], [`Image::from_vec`]) instead of being detected
//! by the operations that consume the image.
//!
//! Regular constructors require `width > 0` and `height > 0`. A zero-area
//! image can only be created with [`Image::empty`]; resampling produces one
//! when the scale factor rounds a dimension down to zero.
//!
//! # Ownership model
//!
//! Operations never modify their input. Each one borrows the source image
//! and returns a freshly allocated result.

mod access;
mod pixel;

pub use pixel::PixelImage;

use crate::error::{Error, Result};

/// Single-channel grayscale sample in [0, 255].
pub type Intensity = u8;

/// Multi-channel pixel with `N` unsigned 8-bit channels.
///
/// The channel count is part of the type, so all pixels of one
/// `Image<Pixel<N>>` share it.
pub type Pixel<const N: usize> = [u8; N];

/// Single-channel image, the output of grayscale reduction.
pub type GrayImage = Image<Intensity>;

/// Fixed-shape, row-major 2D image
///
/// # Examples
///
/// ```
/// use graypipe_core::Image;
///
/// let img = Image::from_rows(&[[10u8, 20], [30, 40]]).unwrap();
/// assert_eq!(img.width(), 2);
/// assert_eq!(img.height(), 2);
/// assert_eq!(img.get(1, 0), Some(20));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image<T> {
    /// Width in samples
    width: u32,
    /// Height in rows
    height: u32,
    /// Row-major samples, `width * height` long
    data: Vec<T>,
}

impl<T: Copy> Image<T> {
    /// Create an image with every sample set to `fill`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, fill: T) -> Result<Self> {
        let len = Self::checked_len(width, height)?;
        Ok(Image {
            width,
            height,
            data: vec![fill; len],
        })
    }

    /// Wrap a row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, and
    /// [`Error::DataLength`] if `data` does not hold `width * height` samples.
    pub fn from_vec(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        let expected = Self::checked_len(width, height)?;
        if data.len() != expected {
            return Err(Error::DataLength {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Image {
            width,
            height,
            data,
        })
    }

    /// Build an image from nested rows.
    ///
    /// The width is taken from the first row; every other row must match it.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if there are no rows or the first row is empty
    /// - [`Error::RaggedRow`] for the first row whose length differs
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(Error::EmptyInput("image has no rows"));
        };
        let expected = first.as_ref().len();
        if expected == 0 {
            return Err(Error::EmptyInput("image rows are empty"));
        }

        let mut data = Vec::with_capacity(expected * rows.len());
        for (row, samples) in rows.iter().enumerate() {
            let samples = samples.as_ref();
            if samples.len() != expected {
                return Err(Error::RaggedRow {
                    row,
                    expected,
                    actual: samples.len(),
                });
            }
            data.extend_from_slice(samples);
        }

        let width = u32::try_from(expected).map_err(|_| Error::InvalidDimension {
            width: u32::MAX,
            height: 0,
        })?;
        let height = u32::try_from(rows.len()).map_err(|_| Error::InvalidDimension {
            width,
            height: u32::MAX,
        })?;
        Ok(Image {
            width,
            height,
            data,
        })
    }

    /// Create an image by evaluating `f(x, y)` for every coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> T,
    {
        let len = Self::checked_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Ok(Image {
            width,
            height,
            data,
        })
    }

    /// Compute the buffer length for a non-degenerate shape.
    fn checked_len(width: u32, height: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimension { width, height })
    }
}

impl<T> Image<T> {
    /// Create a zero-area image.
    ///
    /// At least one of `width` and `height` must be 0; the other keeps the
    /// size the caller computed so the degenerate shape stays visible.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if both dimensions are non-zero.
    pub fn empty(width: u32, height: u32) -> Result<Self> {
        if width != 0 && height != 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Image {
            width,
            height,
            data: Vec::new(),
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of samples (`width * height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check whether two images have the same width and height.
    pub fn sizes_equal<U>(&self, other: &Image<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Row-major sample buffer.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consume the image and return its row-major buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}
