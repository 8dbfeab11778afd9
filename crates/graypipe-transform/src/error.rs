//! Error types for graypipe-transform

use graypipe_core::ErrorKind;
use thiserror::Error;

/// Errors that can occur during resampling
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] graypipe_core::Error),

    /// Invalid scale factor
    #[error("invalid scale factor {scale}: {reason}")]
    InvalidScale { scale: f64, reason: &'static str },

    /// Source image has zero area
    #[error("empty image: nothing to resample")]
    EmptyImage,
}

impl TransformError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransformError::Core(e) => e.kind(),
            TransformError::InvalidScale { .. } => ErrorKind::InvalidScale,
            TransformError::EmptyImage => ErrorKind::MalformedImage,
        }
    }
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
