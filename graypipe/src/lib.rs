//! graypipe - Grayscale reduction and bilinear resampling for Rust
//!
//! # Overview
//!
//! graypipe decodes a raster image, reduces it to a single intensity
//! channel by averaging its color channels, and optionally resamples the
//! intensity image by a scale factor with bilinear interpolation:
//!
//! - Image I/O (PNG, JPEG, PNM) in [`io`]
//! - Grayscale reduction in [`color`]
//! - Bilinear resampling in [`transform`]
//! - File-level processing in [`pipeline`] and the interactive loop in
//!   [`session`]
//!
//! # Example
//!
//! ```
//! use graypipe::{GrayImage, Image};
//! use graypipe::transform::resample;
//!
//! let img: GrayImage = Image::from_rows(&[[10u8, 20], [30, 40]]).unwrap();
//! let big = resample(&img, 2.0).unwrap();
//! assert_eq!(big.dimensions(), (4, 4));
//! assert_eq!(big.get(1, 1), Some(25));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use graypipe_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use graypipe_color as color;
pub use graypipe_io as io;
pub use graypipe_transform as transform;

pub mod pipeline;
pub mod session;
