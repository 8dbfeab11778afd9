//! PNG image format support
//!
//! Reading accepts every PNG color type. Palettes, sub-byte gray depths and
//! `tRNS` transparency are expanded and 16-bit samples are stripped to
//! 8 bits by the decoder, so the result is always 8 bits per channel with
//! 1 to 4 channels. Writing produces 8-bit grayscale.

use crate::{IoError, IoResult, interleaved_to_image};
use graypipe_core::{GrayImage, PixelImage};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<PixelImage> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    // Read image data
    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    if output_info.bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            output_info.bit_depth
        )));
    }

    let width = output_info.width;
    let height = output_info.height;
    let stride = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let pix: PixelImage = match output_info.color_type {
        ColorType::Grayscale => interleaved_to_image::<1>(data, width, height, stride)?.into(),
        ColorType::GrayscaleAlpha => interleaved_to_image::<2>(data, width, height, stride)?.into(),
        ColorType::Rgb => interleaved_to_image::<3>(data, width, height, stride)?.into(),
        ColorType::Rgba => interleaved_to_image::<4>(data, width, height, stride)?.into(),
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };

    Ok(pix)
}

/// Write a grayscale image as 8-bit PNG
pub fn write_png<W: Write>(img: &GrayImage, writer: W) -> IoResult<()> {
    if img.is_empty() {
        return Err(IoError::EncodeError(format!(
            "cannot write {}x{} image as PNG",
            img.width(),
            img.height()
        )));
    }

    let mut encoder = Encoder::new(writer, img.width(), img.height());
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(img.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}
