//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate: 8-bit grayscale,
//! 16-bit grayscale (reduced to its most significant byte) and 24-bit RGB.
//! CMYK files are rejected. Writes 8-bit grayscale using `jpeg-encoder`.

use crate::{IoError, IoResult, interleaved_to_image};
use graypipe_core::{GrayImage, Image, PixelImage};
use jpeg_decoder::{Decoder, PixelFormat};
use jpeg_encoder::{ColorType, Encoder};
use std::io::{Read, Write};

/// Quality used when the caller has no preference.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<PixelImage> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing after decode".to_string()))?;

    let width = u32::from(info.width);
    let height = u32::from(info.height);

    match info.pixel_format {
        PixelFormat::L8 => {
            Ok(interleaved_to_image::<1>(&pixels, width, height, width as usize)?.into())
        }
        PixelFormat::L16 => {
            // big-endian samples; keep the high byte
            let high: Vec<[u8; 1]> = pixels.chunks_exact(2).map(|s| [s[0]]).collect();
            Ok(Image::from_vec(width, height, high)?.into())
        }
        PixelFormat::RGB24 => {
            Ok(interleaved_to_image::<3>(&pixels, width, height, width as usize * 3)?.into())
        }
        other => Err(IoError::UnsupportedFormat(format!(
            "unsupported JPEG pixel format: {:?}",
            other
        ))),
    }
}

/// Write a grayscale image as baseline JPEG.
///
/// # Arguments
/// * `img` - The image to encode; both dimensions must be in 1..=65535
/// * `writer` - Destination writer
/// * `quality` - Encoder quality in 1..=100
pub fn write_jpeg<W: Write>(img: &GrayImage, writer: W, quality: u8) -> IoResult<()> {
    if img.is_empty() {
        return Err(IoError::EncodeError(format!(
            "cannot write {}x{} image as JPEG",
            img.width(),
            img.height()
        )));
    }
    let too_large = || {
        IoError::EncodeError(format!(
            "{}x{} exceeds the JPEG limit of 65535",
            img.width(),
            img.height()
        ))
    };
    let width = u16::try_from(img.width()).map_err(|_| too_large())?;
    let height = u16::try_from(img.height()).map_err(|_| too_large())?;

    let encoder = Encoder::new(writer, quality);
    encoder
        .encode(img.data(), width, height, ColorType::Luma)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_jpeg_roundtrip_flat_gray() {
        // a flat image survives lossy compression within a small tolerance
        let img = Image::new(16, 16, 128u8).unwrap();
        let mut buffer = Vec::new();
        write_jpeg(&img, &mut buffer, 95).unwrap();
        assert!(buffer.starts_with(&[0xFF, 0xD8, 0xFF]));

        let PixelImage::Gray(decoded) = read_jpeg(Cursor::new(buffer)).unwrap() else {
            panic!("expected grayscale JPEG");
        };
        assert_eq!(decoded.dimensions(), (16, 16));
        for &[v] in decoded.data() {
            assert!((i32::from(v) - 128).abs() <= 2, "sample {v}");
        }
    }

    #[test]
    fn test_jpeg_write_empty_fails() {
        let img: GrayImage = Image::empty(4, 0).unwrap();
        let mut buffer = Vec::new();
        let err = write_jpeg(&img, &mut buffer, DEFAULT_JPEG_QUALITY).unwrap_err();
        assert!(matches!(err, IoError::EncodeError(_)));
    }

    #[test]
    fn test_jpeg_write_too_wide_fails() {
        let img = Image::new(70_000, 1, 0u8).unwrap();
        let mut buffer = Vec::new();
        assert!(write_jpeg(&img, &mut buffer, DEFAULT_JPEG_QUALITY).is_err());
    }

    #[test]
    fn test_jpeg_read_garbage() {
        let data = [0xFF, 0xD8, 0xFF, 0x00, 0x01, 0x02];
        assert!(read_jpeg(Cursor::new(data)).is_err());
    }
}
