//! graypipe Core - Image containers for the grayscale pipeline
//!
//! This crate provides the data structures shared by every stage of the
//! pipeline:
//!
//! - [`Image`] - Fixed-shape, row-major 2D container, generic over its sample type
//! - [`Intensity`] / [`GrayImage`] - Single-channel samples and images
//! - [`Pixel`] / [`PixelImage`] - Multi-channel pixels and decoded images
//! - [`ImageFormat`] - File format tags used by the codec
//! - [`Error`] / [`ErrorKind`] - Core errors and the workspace-wide failure classification

pub mod error;
pub mod format;
pub mod image;

pub use error::{Error, ErrorKind, Result};
pub use format::ImageFormat;
pub use image::{GrayImage, Image, Intensity, Pixel, PixelImage};
