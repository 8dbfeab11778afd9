//! graypipe Color - Grayscale reduction
//!
//! This crate turns decoded multi-channel images into single-channel
//! intensity images:
//!
//! - **Grayscale reduction** ([`grayscale`]): integer channel averaging,
//!   with or without the alpha channel

pub mod error;
pub mod grayscale;

// Re-export core types
pub use graypipe_core;

// Re-export error types
pub use error::{ColorError, ColorResult};

// Re-export grayscale types and functions
pub use grayscale::{
    // Types
    GrayReduction,
    // Functions
    pixel_to_gray,
    reduce,
    reduce_pixels,
    reduce_with,
};
