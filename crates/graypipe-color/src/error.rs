//! Error types for graypipe-color

use graypipe_core::ErrorKind;
use thiserror::Error;

/// Errors that can occur during grayscale reduction
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] graypipe_core::Error),

    /// Empty image
    #[error("empty image: no pixels to process")]
    EmptyImage,
}

impl ColorError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ColorError::Core(e) => e.kind(),
            ColorError::EmptyImage => ErrorKind::MalformedImage,
        }
    }
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
