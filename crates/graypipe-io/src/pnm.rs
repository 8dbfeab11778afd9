//! PNM (Portable Any Map) format support
//!
//! Reads PGM (P2 ASCII, P5 binary) and PPM (P3 ASCII, P6 binary) with a
//! maxval of at most 255; samples are rescaled to the full 0..=255 range
//! when maxval is smaller. PBM (P1/P4) and 16-bit maxvals are not
//! supported. Writes binary PGM (P5).

use crate::{IoError, IoResult, interleaved_to_image};
use graypipe_core::{GrayImage, Image, Pixel, PixelImage};
use std::io::{Read, Write};

/// Header fields shared by all PNM variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PnmHeader {
    /// Magic digit after `P`
    kind: u8,
    width: u32,
    height: u32,
    maxval: u32,
}

/// Cursor over the raw file bytes.
struct Tokens<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(data: &'a [u8]) -> Self {
        Tokens { data, pos: 0 }
    }

    /// Skip whitespace and `#` comments.
    fn skip_separators(&mut self) {
        while let Some(&b) = self.data.get(self.pos) {
            if b == b'#' {
                while let Some(&c) = self.data.get(self.pos) {
                    self.pos += 1;
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn token(&mut self) -> IoResult<&'a [u8]> {
        self.skip_separators();
        let start = self.pos;
        while let Some(b) = self.data.get(self.pos) {
            if b.is_ascii_whitespace() || *b == b'#' {
                break;
            }
            self.pos += 1;
        }
        if start == self.pos {
            return Err(IoError::InvalidData("unexpected end of PNM data".to_string()));
        }
        Ok(&self.data[start..self.pos])
    }

    fn number(&mut self) -> IoResult<u32> {
        let token = self.token()?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                IoError::InvalidData(format!(
                    "invalid PNM number: {:?}",
                    String::from_utf8_lossy(token)
                ))
            })
    }

    /// Binary raster following the single whitespace byte after maxval.
    fn raster(&self) -> &'a [u8] {
        self.data.get(self.pos + 1..).unwrap_or(&[])
    }
}

fn read_header(tokens: &mut Tokens<'_>) -> IoResult<PnmHeader> {
    let magic = tokens.token()?;
    let kind = match magic {
        [b'P', d @ b'1'..=b'6'] => *d - b'0',
        _ => {
            return Err(IoError::InvalidData(format!(
                "invalid PNM magic: {:?}",
                String::from_utf8_lossy(magic)
            )));
        }
    };
    if kind == 1 || kind == 4 {
        return Err(IoError::UnsupportedFormat(
            "PBM bitmaps are not supported".to_string(),
        ));
    }

    let width = tokens.number()?;
    let height = tokens.number()?;
    if width == 0 || height == 0 {
        return Err(IoError::InvalidData(format!(
            "invalid PNM dimensions: {}x{}",
            width, height
        )));
    }
    let maxval = tokens.number()?;
    if maxval == 0 || maxval > 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNM maxval: {}",
            maxval
        )));
    }
    Ok(PnmHeader {
        kind,
        width,
        height,
        maxval,
    })
}

/// Rescale a sample from `0..=maxval` to `0..=255`.
fn rescale(val: u32, maxval: u32) -> IoResult<u8> {
    if val > maxval {
        return Err(IoError::InvalidData(format!(
            "PNM sample {} exceeds maxval {}",
            val, maxval
        )));
    }
    Ok((val * 255 / maxval) as u8)
}

fn read_ascii<const N: usize>(
    tokens: &mut Tokens<'_>,
    header: &PnmHeader,
) -> IoResult<Image<Pixel<N>>> {
    let count = (header.width as usize)
        .checked_mul(header.height as usize)
        .ok_or_else(|| {
            IoError::InvalidData(format!(
                "PNM dimensions {}x{} overflow the address space",
                header.width, header.height
            ))
        })?;
    // the header is untrusted; let the vector grow past this
    let mut pixels = Vec::with_capacity(count.min(1 << 20));
    for _ in 0..count {
        let mut px = [0u8; N];
        for c in px.iter_mut() {
            *c = rescale(tokens.number()?, header.maxval)?;
        }
        pixels.push(px);
    }
    Ok(Image::from_vec(header.width, header.height, pixels)?)
}

fn read_binary<const N: usize>(raster: &[u8], header: &PnmHeader) -> IoResult<Image<Pixel<N>>> {
    let stride = (header.width as usize).saturating_mul(N);
    let img = interleaved_to_image::<N>(raster, header.width, header.height, stride)?;
    if header.maxval == 255 {
        return Ok(img);
    }
    let mut out = Vec::with_capacity(img.len());
    for px in img.data() {
        let mut scaled = [0u8; N];
        for (dst, &src) in scaled.iter_mut().zip(px) {
            *dst = rescale(u32::from(src), header.maxval)?;
        }
        out.push(scaled);
    }
    Ok(Image::from_vec(header.width, header.height, out)?)
}

/// Read a PNM image (P2/P3/P5/P6) from a reader.
///
/// # Returns
/// A [`PixelImage::Gray`] for PGM or a [`PixelImage::Rgb`] for PPM.
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<PixelImage> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let mut tokens = Tokens::new(&data);
    let header = read_header(&mut tokens)?;

    let pix: PixelImage = match header.kind {
        2 => read_ascii::<1>(&mut tokens, &header)?.into(),
        3 => read_ascii::<3>(&mut tokens, &header)?.into(),
        5 => read_binary::<1>(tokens.raster(), &header)?.into(),
        6 => read_binary::<3>(tokens.raster(), &header)?.into(),
        kind => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNM type: P{}",
                kind
            )));
        }
    };
    Ok(pix)
}

/// Write a grayscale image as binary PGM (P5).
pub fn write_pnm<W: Write>(img: &GrayImage, mut writer: W) -> IoResult<()> {
    if img.is_empty() {
        return Err(IoError::EncodeError(format!(
            "cannot write {}x{} image as PNM",
            img.width(),
            img.height()
        )));
    }
    write!(writer, "P5\n{} {}\n255\n", img.width(), img.height())?;
    writer.write_all(img.data())?;
    writer.flush()?;
    Ok(())
}
