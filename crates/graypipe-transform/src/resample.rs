//! Bilinear resampling
//!
//! Every output sample `(i, j)` is mapped back into the source at
//! `x = j / scale`, `y = i / scale` and interpolated from the four source
//! samples around that point:
//!
//! ```text
//!   (x1, y1) Q11 ------- Q21 (x2, y1)
//!             |           |
//!             |   (x, y)  |
//!             |           |
//!   (x1, y2) Q12 ------- Q22 (x2, y2)
//!
//!   out = (Q11*dx2*dy2 + Q21*dx1*dy2 + Q12*dx2*dy1 + Q22*dx1*dy1) / denom
//!   dx1 = x - x1, dx2 = x2 - x, dy1 = y - y1, dy2 = y2 - y
//!   denom = (x2 - x1) * (y2 - y1), or 1 when that product is 0
//! ```
//!
//! # Neighbor selection
//!
//! `x1 = floor(x)` and `x2 = ceil(x)`; when they coincide (x on the grid)
//! `x2` is bumped by one so the pair always spans a cell. `x2` is then
//! clamped to `width - 1`, and likewise for y.
//!
//! # Boundary behavior
//!
//! Once `x2` is clamped onto `x1` the horizontal weights `dx1 + dx2` sum to
//! zero, so with [`BoundaryMode::Collapse`] every output sample that maps
//! onto the last source column (or row) is 0. [`BoundaryMode::Replicate`]
//! gives the remaining neighbor full weight instead, which repeats the edge
//! samples.

use crate::{TransformError, TransformResult};
use graypipe_core::{GrayImage, Image};
use log::{debug, warn};

/// Weighting used on an axis whose upper neighbor was clamped onto the
/// lower one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryMode {
    /// Keep the plain formula: both weights cancel and the sample is 0
    #[default]
    Collapse,
    /// Put full weight on the edge sample
    Replicate,
}

/// Handling of a scale factor that rounds an output dimension to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyOutputPolicy {
    /// Return a zero-area image
    #[default]
    Allow,
    /// Fail with [`TransformError::InvalidScale`]
    Reject,
}

/// Options for [`resample_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResampleOptions {
    /// Edge weighting
    pub boundary: BoundaryMode,
    /// Zero-dimension handling
    pub empty_output: EmptyOutputPolicy,
}

impl ResampleOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the boundary mode.
    pub fn with_boundary(mut self, boundary: BoundaryMode) -> Self {
        self.boundary = boundary;
        self
    }

    /// Set the empty-output policy.
    pub fn with_empty_output(mut self, policy: EmptyOutputPolicy) -> Self {
        self.empty_output = policy;
        self
    }
}

/// Result of a forward-then-inverse resampling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTrip {
    /// Image resampled by `scale`
    pub forward: GrayImage,
    /// `forward` resampled by `1 / scale`
    pub back: GrayImage,
}

/// Neighbor pair and weights along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisSample {
    /// Lower neighbor index (x1 / y1)
    lo: u32,
    /// Upper neighbor index (x2 / y2)
    hi: u32,
    /// Weight of the lower neighbor (dx2 / dy2)
    w_lo: f64,
    /// Weight of the upper neighbor (dx1 / dy1)
    w_hi: f64,
    /// Neighbor distance (x2 - x1 / y2 - y1)
    span: f64,
}

impl AxisSample {
    fn new(pos: f64, len: u32, boundary: BoundaryMode) -> Self {
        let last = len - 1;
        let lo_raw = pos.floor();
        let mut hi_raw = pos.ceil();
        if lo_raw == hi_raw {
            hi_raw += 1.0;
        }
        // float-to-int casts saturate; lo only needs the clamp when rounding
        // pushes floor(pos) onto len
        let lo = (lo_raw as u32).min(last);
        let hi = (hi_raw as u32).min(last);

        if hi == lo && boundary == BoundaryMode::Replicate {
            return AxisSample {
                lo,
                hi,
                w_lo: 1.0,
                w_hi: 0.0,
                span: 1.0,
            };
        }

        AxisSample {
            lo,
            hi,
            w_lo: f64::from(hi) - pos,
            w_hi: pos - f64::from(lo),
            span: f64::from(hi) - f64::from(lo),
        }
    }
}

fn validate_scale(scale: f64) -> TransformResult<()> {
    if scale.is_nan() || scale <= 0.0 {
        return Err(TransformError::InvalidScale {
            scale,
            reason: "must be greater than zero",
        });
    }
    if !scale.is_finite() {
        return Err(TransformError::InvalidScale {
            scale,
            reason: "must be finite",
        });
    }
    Ok(())
}

fn scaled_dimension(len: u32, scale: f64) -> TransformResult<u32> {
    let scaled = (f64::from(len) * scale).floor();
    if scaled > f64::from(u32::MAX) {
        return Err(TransformError::InvalidScale {
            scale,
            reason: "output dimension overflows",
        });
    }
    Ok(scaled as u32)
}

/// Compute the output size `(floor(width * scale), floor(height * scale))`.
///
/// # Errors
///
/// Returns [`TransformError::InvalidScale`] if `scale` is not a positive
/// finite number or the output would not fit in memory.
pub fn output_dimensions(width: u32, height: u32, scale: f64) -> TransformResult<(u32, u32)> {
    validate_scale(scale)?;
    let new_w = scaled_dimension(width, scale)?;
    let new_h = scaled_dimension(height, scale)?;
    if (new_w as usize).checked_mul(new_h as usize).is_none() {
        return Err(TransformError::InvalidScale {
            scale,
            reason: "output dimension overflows",
        });
    }
    Ok((new_w, new_h))
}

/// Resample an image by `scale` with default options.
///
/// # Arguments
/// * `img` - Single-channel source image
/// * `scale` - Ratio applied to both width and height (e.g., 2.0 = double size)
///
/// # Errors
///
/// - [`TransformError::InvalidScale`] if `scale <= 0` or is not finite
/// - [`TransformError::EmptyImage`] if `img` has zero area
///
/// # Examples
///
/// ```
/// use graypipe_core::Image;
/// use graypipe_transform::resample;
///
/// let img = Image::from_rows(&[[10u8, 20], [30, 40]]).unwrap();
/// let up = resample(&img, 2.0).unwrap();
/// assert_eq!(up.dimensions(), (4, 4));
/// assert_eq!(up.get(1, 1), Some(25));
/// ```
pub fn resample(img: &GrayImage, scale: f64) -> TransformResult<GrayImage> {
    resample_with(img, scale, &ResampleOptions::default())
}

/// Resample an image by `scale`.
///
/// See the module documentation for the interpolation formula and the
/// boundary rules.
///
/// # Errors
///
/// - [`TransformError::InvalidScale`] if `scale <= 0`, is not finite, or
///   produces a zero dimension under [`EmptyOutputPolicy::Reject`]
/// - [`TransformError::EmptyImage`] if `img` has zero area
pub fn resample_with(
    img: &GrayImage,
    scale: f64,
    options: &ResampleOptions,
) -> TransformResult<GrayImage> {
    validate_scale(scale)?;
    if img.is_empty() {
        return Err(TransformError::EmptyImage);
    }

    let (w, h) = img.dimensions();
    let (new_w, new_h) = output_dimensions(w, h, scale)?;
    debug!(
        "resampling {}x{} -> {}x{} (scale {}, {:?})",
        w, h, new_w, new_h, scale, options.boundary
    );

    if new_w == 0 || new_h == 0 {
        return match options.empty_output {
            EmptyOutputPolicy::Allow => {
                warn!(
                    "scale {} reduces {}x{} to an empty {}x{} image",
                    scale, w, h, new_w, new_h
                );
                Ok(Image::empty(new_w, new_h)?)
            }
            EmptyOutputPolicy::Reject => Err(TransformError::InvalidScale {
                scale,
                reason: "output has a zero dimension",
            }),
        };
    }

    let columns: Vec<AxisSample> = (0..new_w)
        .map(|j| AxisSample::new(f64::from(j) / scale, w, options.boundary))
        .collect();

    let mut data = Vec::with_capacity(new_w as usize * new_h as usize);
    for i in 0..new_h {
        let ay = AxisSample::new(f64::from(i) / scale, h, options.boundary);
        let top = img.row(ay.lo);
        let bottom = img.row(ay.hi);

        for ax in &columns {
            let q11 = f64::from(top[ax.lo as usize]);
            let q21 = f64::from(top[ax.hi as usize]);
            let q12 = f64::from(bottom[ax.lo as usize]);
            let q22 = f64::from(bottom[ax.hi as usize]);

            let sum = q11 * ax.w_lo * ay.w_lo
                + q21 * ax.w_hi * ay.w_lo
                + q12 * ax.w_lo * ay.w_hi
                + q22 * ax.w_hi * ay.w_hi;
            let mut denom = ax.span * ay.span;
            if denom == 0.0 {
                denom = 1.0;
            }

            data.push((sum / denom).floor().clamp(0.0, 255.0) as u8);
        }
    }

    Ok(Image::from_vec(new_w, new_h, data)?)
}

/// Resample by `scale`, then resample the result by `1 / scale`.
///
/// The second image has the source dimensions up to floor rounding.
///
/// # Errors
///
/// Same as [`resample_with`]. A forward result with zero area cannot be
/// resampled back and yields [`TransformError::EmptyImage`].
pub fn resample_round_trip(
    img: &GrayImage,
    scale: f64,
    options: &ResampleOptions,
) -> TransformResult<RoundTrip> {
    let forward = resample_with(img, scale, options)?;
    let back = resample_with(&forward, 1.0 / scale, options)?;
    Ok(RoundTrip { forward, back })
}
