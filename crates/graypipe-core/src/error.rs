//! Error types for graypipe-core
//!
//! Provides the error type for image construction and pixel access, and
//! the [`ErrorKind`] classification shared by every crate in the workspace.
//! Each crate keeps its own error enum; `kind()` maps any of them onto one
//! of the kinds below so a driver can react without matching every variant.

use std::fmt;
use thiserror::Error;

/// Coarse classification of a pipeline failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Inconsistent row lengths, zero dimensions where disallowed,
    /// out-of-range access
    MalformedImage,
    /// Scale factor not usable for resampling
    InvalidScale,
    /// Codec could not read the input bytes
    DecodeFailure,
    /// Codec could not produce output bytes
    EncodeFailure,
    /// File system error around the codec
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::MalformedImage => "malformed image",
            ErrorKind::InvalidScale => "invalid scale",
            ErrorKind::DecodeFailure => "decode failure",
            ErrorKind::EncodeFailure => "encode failure",
            ErrorKind::Io => "I/O failure",
        };
        f.write_str(name)
    }
}

/// graypipe-core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Row length differs from the first row
    #[error("ragged rows: row {row} has {actual} elements, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Flat buffer does not hold exactly `width * height` samples
    #[error("data length mismatch for {width}x{height}: expected {expected}, got {actual}")]
    DataLength {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Coordinates outside the image
    #[error("index out of bounds: ({x}, {y}) outside {width}x{height}")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Empty input where pixels are required
    #[error("empty input: {0}")]
    EmptyInput(&'static str),
}

impl Error {
    /// Classify this error.
    ///
    /// Every core error describes a shape problem, so all variants map to
    /// [`ErrorKind::MalformedImage`].
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::MalformedImage
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::RaggedRow {
            row: 2,
            expected: 4,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "ragged rows: row 2 has 3 elements, expected 4"
        );
        assert_eq!(err.kind(), ErrorKind::MalformedImage);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::InvalidScale.to_string(), "invalid scale");
        assert_eq!(ErrorKind::DecodeFailure.to_string(), "decode failure");
    }
}
