//! graypipe-io - Image codec for the graypipe pipeline
//!
//! Decodes image bytes into a [`PixelImage`] and encodes single-channel
//! [`GrayImage`]s back to bytes. Formats are selected by Cargo feature:
//!
//! | Feature | Read | Write |
//! |---|---|---|
//! | `png-format` | all PNG color types, normalized to 8 bits | 8-bit grayscale |
//! | `jpeg` | 8/16-bit gray, RGB | 8-bit grayscale |
//! | `pnm` | P2, P3, P5, P6 | P5 |
//!
//! The format of input bytes is detected from their magic number; the
//! format of a file to write is chosen by the caller, usually from the
//! file extension via [`ImageFormat::from_path`].

mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};
pub use graypipe_core::ImageFormat;

use graypipe_core::{GrayImage, Image, Pixel, PixelImage};
use log::debug;
use std::fs;
use std::path::Path;

/// Decode image bytes, detecting the format from the header.
///
/// # Errors
///
/// Fails with a decode-kind [`IoError`] if the format is unknown, not
/// enabled, or the data is corrupt.
pub fn decode(data: &[u8]) -> IoResult<PixelImage> {
    let format = detect_format_from_bytes(data)?;
    decode_as(data, format)
}

/// Decode image bytes as a specific format.
pub fn decode_as(data: &[u8], format: ImageFormat) -> IoResult<PixelImage> {
    let pix = match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(std::io::Cursor::new(data))?,
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(data)?,
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(data)?,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "{:?} input is not supported",
                format
            )));
        }
    };
    debug!(
        "decoded {:?} image: {}x{}, {} channels",
        format,
        pix.width(),
        pix.height(),
        pix.channels()
    );
    Ok(pix)
}

/// Encode a grayscale image in the given format.
///
/// # Errors
///
/// Fails with [`IoError::EncodeError`] if the image has zero area, exceeds
/// the format's size limits, or the format is unknown or not enabled.
pub fn encode(img: &GrayImage, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(img, &mut buffer)?,
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(img, &mut buffer, jpeg::DEFAULT_JPEG_QUALITY)?,
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(img, &mut buffer)?,
        _ => {
            return Err(IoError::EncodeError(format!(
                "{:?} output is not supported",
                format
            )));
        }
    }
    debug!(
        "encoded {}x{} image as {:?} ({} bytes)",
        img.width(),
        img.height(),
        format,
        buffer.len()
    );
    Ok(buffer)
}

/// Read and decode an image file.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<PixelImage> {
    let data = fs::read(path.as_ref())?;
    decode(&data)
}

/// Encode an image and write it to a file.
///
/// Nothing is written if encoding fails.
pub fn write_image<P: AsRef<Path>>(img: &GrayImage, path: P, format: ImageFormat) -> IoResult<()> {
    let data = encode(img, format)?;
    fs::write(path.as_ref(), data)?;
    Ok(())
}

/// Split an interleaved 8-bit buffer into an image of `N`-channel pixels.
///
/// `stride` is the number of bytes per row and may include padding.
pub(crate) fn interleaved_to_image<const N: usize>(
    data: &[u8],
    width: u32,
    height: u32,
    stride: usize,
) -> IoResult<Image<Pixel<N>>> {
    let overflow = || {
        IoError::InvalidData(format!(
            "image dimensions {}x{} overflow the address space",
            width, height
        ))
    };
    let row_bytes = (width as usize).checked_mul(N).ok_or_else(overflow)?;
    let count = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(overflow)?;
    if stride < row_bytes {
        return Err(IoError::InvalidData(format!(
            "row stride {} shorter than {} bytes",
            stride, row_bytes
        )));
    }
    let needed = if height == 0 {
        0
    } else {
        stride
            .checked_mul(height as usize - 1)
            .and_then(|n| n.checked_add(row_bytes))
            .ok_or_else(overflow)?
    };
    if data.len() < needed {
        return Err(IoError::InvalidData(format!(
            "image data truncated: expected {} bytes, got {}",
            needed,
            data.len()
        )));
    }

    let mut pixels = Vec::with_capacity(count);
    for y in 0..height as usize {
        let row = &data[y * stride..y * stride + row_bytes];
        for chunk in row.chunks_exact(N) {
            let mut px = [0u8; N];
            px.copy_from_slice(chunk);
            pixels.push(px);
        }
    }
    Ok(Image::from_vec(width, height, pixels)?)
}
