//! Command-line driver for graypipe
//!
//! # Usage
//!
//! ```bash
//! # Reduce two files to grayscale in the current directory
//! graypipe photo.png scan.pgm
//!
//! # Also resample by 2 and back, writing into ./out
//! graypipe photo.png --scale 2 --out-dir out
//!
//! # Interactive mode
//! graypipe
//! ```

use clap::Parser;
use graypipe::color::GrayReduction;
use graypipe::pipeline::{PipelineOptions, process_file};
use graypipe::session::{Session, SessionEnd, parse_scale};
use graypipe::transform::{BoundaryMode, EmptyOutputPolicy, ResampleOptions};
use log::{error, info};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Reduce images to grayscale and resample them with bilinear interpolation
#[derive(Parser, Debug)]
#[command(name = "graypipe")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input images; prompts interactively when none are given
    files: Vec<PathBuf>,

    /// Resample by this factor and back by its inverse
    #[arg(short, long, value_parser = parse_scale)]
    scale: Option<f64>,

    /// Directory for output files
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Leave the alpha channel out of the grayscale average
    #[arg(long)]
    exclude_alpha: bool,

    /// Repeat edge samples instead of the plain formula at the last
    /// row and column
    #[arg(long)]
    replicate_edges: bool,

    /// Fail when the scale rounds an output dimension to zero
    #[arg(long)]
    reject_empty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn pipeline_options(&self) -> PipelineOptions {
        let mut resample = ResampleOptions::new();
        if self.replicate_edges {
            resample = resample.with_boundary(BoundaryMode::Replicate);
        }
        if self.reject_empty {
            resample = resample.with_empty_output(EmptyOutputPolicy::Reject);
        }
        let reduction = if self.exclude_alpha {
            GrayReduction::ExcludeAlpha
        } else {
            GrayReduction::ChannelAverage
        };
        PipelineOptions {
            scale: self.scale,
            reduction,
            resample,
            format: None,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run_batch(args: &Args, options: &PipelineOptions) -> ExitCode {
    let mut failed = 0;
    for file in &args.files {
        match process_file(file, &args.out_dir, options) {
            Ok(paths) => {
                for path in paths {
                    println!("{}", path.display());
                }
            }
            Err(e) => {
                error!("{}: {} ({})", file.display(), e, e.kind());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        eprintln!("{} of {} files failed", failed, args.files.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run_interactive(args: &Args, options: PipelineOptions) -> ExitCode {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session =
        Session::new(stdin.lock(), stdout.lock(), options).with_output_dir(&args.out_dir);

    match session.run() {
        Ok(summary) => {
            if summary.end == SessionEnd::EndOfInput {
                info!("input closed");
            }
            if summary.failed > 0 {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("terminal error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = args.pipeline_options();
    if args.files.is_empty() {
        run_interactive(&args, options)
    } else {
        run_batch(&args, &options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "graypipe",
            "a.png",
            "--scale",
            "0.5",
            "--replicate-edges",
            "--exclude-alpha",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.files, vec![PathBuf::from("a.png")]);
        assert_eq!(args.verbose, 2);

        let options = args.pipeline_options();
        assert_eq!(options.scale, Some(0.5));
        assert_eq!(options.reduction, GrayReduction::ExcludeAlpha);
        assert_eq!(options.resample.boundary, BoundaryMode::Replicate);
        assert_eq!(options.resample.empty_output, EmptyOutputPolicy::Allow);
    }

    #[test]
    fn test_rejects_bad_scale() {
        assert!(Args::try_parse_from(["graypipe", "a.png", "--scale", "0"]).is_err());
        assert!(Args::try_parse_from(["graypipe", "a.png", "--scale", "x"]).is_err());
    }
}
