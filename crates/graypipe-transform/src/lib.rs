//! graypipe-transform - Geometric resampling for graypipe
//!
//! This crate provides resampling of single-channel images:
//!
//! - Bilinear resampling by an arbitrary positive scale factor, using
//!   inverse mapping so the same code path serves upscaling and downscaling
//! - Forward-then-inverse round trips for quality inspection

mod error;
pub mod resample;

pub use error::{TransformError, TransformResult};
pub use resample::{
    BoundaryMode, EmptyOutputPolicy, ResampleOptions, RoundTrip, output_dimensions, resample,
    resample_round_trip, resample_with,
};
