//! Decode, reduce, resample and encode one image
//!
//! [`run`] works on decoded images in memory; [`process_file`] wraps it
//! with the codec and writes each stage next to a name derived from the
//! input file:
//!
//! | Stage | File name |
//! |---|---|
//! | grayscale reduction | `grayscale_<name>` |
//! | resampled by `scale` | `resampled_<name>` |
//! | resampled back by `1 / scale` | `resampledBack_<name>` |

use graypipe_color::{ColorError, GrayReduction, reduce_pixels};
use graypipe_core::{ErrorKind, GrayImage, ImageFormat, PixelImage};
use graypipe_io::IoError;
use graypipe_transform::{ResampleOptions, TransformError, resample_round_trip};
use log::{debug, info};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Prefix of the grayscale output file
pub const GRAYSCALE_PREFIX: &str = "grayscale_";
/// Prefix of the forward-resampled output file
pub const RESAMPLED_PREFIX: &str = "resampled_";
/// Prefix of the resampled-back output file
pub const RESAMPLED_BACK_PREFIX: &str = "resampledBack_";

/// Errors from running the pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The input file could not be read or decoded
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    /// An output file could not be encoded or written
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    /// The input path has no file name to derive output names from
    #[error("no file name in path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// Grayscale reduction failed
    #[error(transparent)]
    Color(#[from] ColorError),

    /// Resampling failed
    #[error(transparent)]
    Transform(#[from] TransformError),
}

impl PipelineError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Read { source, .. } | PipelineError::Write { source, .. } => {
                source.kind()
            }
            PipelineError::InvalidPath(_) => ErrorKind::Io,
            PipelineError::Color(e) => e.kind(),
            PipelineError::Transform(e) => e.kind(),
        }
    }
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Pipeline configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PipelineOptions {
    /// Resampling scale; `None` stops after grayscale reduction
    pub scale: Option<f64>,
    /// Channel selection for grayscale reduction
    pub reduction: GrayReduction,
    /// Resampling behavior
    pub resample: ResampleOptions,
    /// Output format; `None` follows the input file extension and falls
    /// back to PNG
    pub format: Option<ImageFormat>,
}

impl PipelineOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resample by `scale` after reduction.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Set the grayscale reduction mode.
    pub fn with_reduction(mut self, reduction: GrayReduction) -> Self {
        self.reduction = reduction;
        self
    }

    /// Set the resampling options.
    pub fn with_resample(mut self, resample: ResampleOptions) -> Self {
        self.resample = resample;
        self
    }

    /// Force the output format.
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// Images produced by one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    /// Single-channel reduction of the input
    pub grayscale: GrayImage,
    /// `grayscale` resampled by the configured scale
    pub resampled: Option<GrayImage>,
    /// `resampled` resampled by the inverse scale
    pub resampled_back: Option<GrayImage>,
}

/// Run the pipeline on a decoded image.
///
/// # Errors
///
/// Fails if reduction fails or, when a scale is configured, if either
/// resampling pass fails. No partial output is returned.
pub fn run(img: &PixelImage, options: &PipelineOptions) -> PipelineResult<PipelineOutput> {
    let grayscale = reduce_pixels(img, options.reduction)?;

    let Some(scale) = options.scale else {
        return Ok(PipelineOutput {
            grayscale,
            resampled: None,
            resampled_back: None,
        });
    };

    let round_trip = resample_round_trip(&grayscale, scale, &options.resample)?;
    Ok(PipelineOutput {
        grayscale,
        resampled: Some(round_trip.forward),
        resampled_back: Some(round_trip.back),
    })
}

/// Read `input`, run the pipeline and write every stage into `output_dir`.
///
/// # Returns
///
/// The paths written, grayscale first.
///
/// # Errors
///
/// Nothing is written unless reading, reduction and resampling all
/// succeed. A failure while writing leaves earlier stages on disk.
pub fn process_file<P, Q>(
    input: P,
    output_dir: Q,
    options: &PipelineOptions,
) -> PipelineResult<Vec<PathBuf>>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    let name = input
        .file_name()
        .ok_or_else(|| PipelineError::InvalidPath(input.to_path_buf()))?;
    let name = Path::new(name);

    info!("reading {}", input.display());
    let pix = graypipe_io::read_image(input).map_err(|source| PipelineError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let output = run(&pix, options)?;

    let format = output_format(name, options.format);
    debug!("writing {:?} outputs for {}", format, input.display());

    let stages = [
        (GRAYSCALE_PREFIX, Some(&output.grayscale)),
        (RESAMPLED_PREFIX, output.resampled.as_ref()),
        (RESAMPLED_BACK_PREFIX, output.resampled_back.as_ref()),
    ];
    let mut written = Vec::with_capacity(stages.len());
    for (prefix, img) in stages {
        let Some(img) = img else { continue };
        let path = output_dir.as_ref().join(output_name(prefix, name, format));
        graypipe_io::write_image(img, &path, format).map_err(|source| PipelineError::Write {
            path: path.clone(),
            source,
        })?;
        info!(
            "wrote {} ({}x{})",
            path.display(),
            img.width(),
            img.height()
        );
        written.push(path);
    }
    Ok(written)
}

/// Pick the output format for an input file name.
fn output_format(name: &Path, forced: Option<ImageFormat>) -> ImageFormat {
    match forced.unwrap_or_else(|| ImageFormat::from_path(name)) {
        ImageFormat::Unknown => ImageFormat::Png,
        format => format,
    }
}

/// Build `<prefix><name>`, swapping the extension when it does not match
/// `format`.
pub fn output_name(prefix: &str, name: &Path, format: ImageFormat) -> String {
    if ImageFormat::from_path(name) == format {
        return format!("{}{}", prefix, name.display());
    }
    let stem = name.file_stem().unwrap_or(name.as_os_str());
    format!(
        "{}{}.{}",
        prefix,
        stem.to_string_lossy(),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use graypipe_core::Image;
    use graypipe_transform::BoundaryMode;

    fn rgb_corners() -> PixelImage {
        Image::from_rows(&[[[10u8, 10, 10], [20, 20, 20]], [[30, 30, 30], [40, 40, 40]]])
            .unwrap()
            .into()
    }

    #[test]
    fn test_run_grayscale_only() {
        let out = run(&rgb_corners(), &PipelineOptions::default()).unwrap();
        assert_eq!(out.grayscale.to_rows(), vec![vec![10, 20], vec![30, 40]]);
        assert!(out.resampled.is_none());
        assert!(out.resampled_back.is_none());
    }

    #[test]
    fn test_run_with_scale() {
        let options = PipelineOptions::new().with_scale(2.0).with_resample(
            ResampleOptions::new().with_boundary(BoundaryMode::Replicate),
        );
        let out = run(&rgb_corners(), &options).unwrap();
        let resampled = out.resampled.unwrap();
        assert_eq!(resampled.dimensions(), (4, 4));
        assert_eq!(resampled.get(1, 1), Some(25));
        assert_eq!(out.resampled_back.unwrap().dimensions(), (2, 2));
    }

    #[test]
    fn test_run_invalid_scale() {
        let options = PipelineOptions::new().with_scale(0.0);
        let err = run(&rgb_corners(), &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidScale);
    }

    #[test]
    fn test_output_name() {
        let name = Path::new("photo.png");
        assert_eq!(
            output_name(GRAYSCALE_PREFIX, name, ImageFormat::Png),
            "grayscale_photo.png"
        );
        assert_eq!(
            output_name(RESAMPLED_BACK_PREFIX, name, ImageFormat::Pnm),
            "resampledBack_photo.pnm"
        );
        assert_eq!(
            output_name(RESAMPLED_PREFIX, Path::new("photo.JPEG"), ImageFormat::Jpeg),
            "resampled_photo.JPEG"
        );
    }

    #[test]
    fn test_output_format() {
        assert_eq!(output_format(Path::new("a.pgm"), None), ImageFormat::Pnm);
        assert_eq!(output_format(Path::new("a.bmp"), None), ImageFormat::Png);
        assert_eq!(
            output_format(Path::new("a.png"), Some(ImageFormat::Jpeg)),
            ImageFormat::Jpeg
        );
    }

    #[test]
    fn test_process_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = process_file(
            dir.path().join("missing.png"),
            dir.path(),
            &PipelineOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(matches!(err, PipelineError::Read { .. }));
    }

    #[test]
    fn test_process_no_file_name() {
        let err = process_file("..", ".", &PipelineOptions::default()).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidPath(_)));
    }
}
