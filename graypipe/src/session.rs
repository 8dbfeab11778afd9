//! Interactive conversion loop
//!
//! A [`Session`] asks for a file name and an optional scale factor,
//! processes the file with [`pipeline::process_file`](crate::pipeline::process_file),
//! then asks whether to convert another image. It reads answers from any
//! [`BufRead`] and writes prompts to any [`Write`], so the same loop runs
//! on a terminal and in tests.
//!
//! A failed conversion is reported and the loop continues to the
//! continue-prompt; only the user (answering `n` or closing the input)
//! ends the session.

use crate::pipeline::{PipelineOptions, process_file};
use log::{debug, warn};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Prompt for the input file name
pub const FILE_PROMPT: &str = "Enter the name of the file to be read: ";
/// Prompt for the scale factor
pub const SCALE_PROMPT: &str = "Enter a scale factor (blank for none): ";
/// Prompt for another round
pub const CONTINUE_PROMPT: &str = "Would you like to convert another image? (y/n): ";

/// One conversion requested by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Input file
    pub path: PathBuf,
    /// Scale factor, or `None` to skip resampling
    pub scale: Option<f64>,
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user declined to convert another image
    Cancelled,
    /// The input closed while a prompt was waiting
    EndOfInput,
}

/// Outcome of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Conversions that wrote all their outputs
    pub converted: usize,
    /// Conversions that failed
    pub failed: usize,
    /// How the session stopped
    pub end: SessionEnd,
}

/// Interactive session over an input and an output stream.
pub struct Session<R, W> {
    input: R,
    output: W,
    options: PipelineOptions,
    output_dir: PathBuf,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session writing results to the current directory.
    ///
    /// `options.scale` is used when the user leaves the scale prompt blank.
    pub fn new(input: R, output: W, options: PipelineOptions) -> Self {
        Session {
            input,
            output,
            options,
            output_dir: PathBuf::from("."),
        }
    }

    /// Write results into `dir` instead of the current directory.
    pub fn with_output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Consume the session, returning the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user stops.
    ///
    /// # Errors
    ///
    /// Fails only if the input or output stream fails; conversion errors
    /// are reported to the user and counted in the summary.
    pub fn run(&mut self) -> io::Result<SessionSummary> {
        let mut converted = 0;
        let mut failed = 0;

        let end = loop {
            let Some(request) = self.next_request()? else {
                break SessionEnd::EndOfInput;
            };

            if self.convert(&request)? {
                converted += 1;
            } else {
                failed += 1;
            }

            match self.prompt(CONTINUE_PROMPT)? {
                None => break SessionEnd::EndOfInput,
                Some(answer) if answer.eq_ignore_ascii_case("n") => {
                    writeln!(self.output, "Thank you for using this tool.")?;
                    break SessionEnd::Cancelled;
                }
                Some(_) => {}
            }
        };

        debug!(
            "session ended ({:?}): {} converted, {} failed",
            end, converted, failed
        );
        Ok(SessionSummary {
            converted,
            failed,
            end,
        })
    }

    /// Ask for the next file and scale.
    ///
    /// Returns `None` if the input closes before both answers are given.
    pub fn next_request(&mut self) -> io::Result<Option<Request>> {
        let path = loop {
            match self.prompt(FILE_PROMPT)? {
                None => return Ok(None),
                Some(name) if name.is_empty() => continue,
                Some(name) => break PathBuf::from(name),
            }
        };

        let scale = loop {
            let Some(answer) = self.prompt(SCALE_PROMPT)? else {
                return Ok(None);
            };
            if answer.is_empty() {
                break self.options.scale;
            }
            match parse_scale(&answer) {
                Ok(scale) => break Some(scale),
                Err(msg) => writeln!(self.output, "Error: {}", msg)?,
            }
        };

        Ok(Some(Request { path, scale }))
    }

    /// Process one request, reporting the result to the user.
    ///
    /// Returns whether the conversion succeeded.
    fn convert(&mut self, request: &Request) -> io::Result<bool> {
        let options = PipelineOptions {
            scale: request.scale,
            ..self.options
        };

        writeln!(self.output, "Reading file...")?;
        match process_file(&request.path, &self.output_dir, &options) {
            Ok(paths) => {
                for path in paths {
                    writeln!(self.output, "Saved {}", path.display())?;
                }
                Ok(true)
            }
            Err(e) => {
                warn!("{} failed: {}", request.path.display(), e);
                writeln!(self.output, "Error ({}): {}", e.kind(), e)?;
                Ok(false)
            }
        }
    }

    /// Show `text` and read one line, without its line ending.
    ///
    /// Returns `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Parse a user-supplied scale factor.
///
/// Accepts finite numbers greater than zero.
pub fn parse_scale(text: &str) -> Result<f64, String> {
    let scale: f64 = text
        .trim()
        .parse()
        .map_err(|_| format!("not a number: {:?}", text))?;
    if !scale.is_finite() || scale <= 0.0 {
        return Err(format!("scale must be a positive number, got {}", text));
    }
    Ok(scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(input: &str) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
        Session::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            PipelineOptions::default(),
        )
    }

    #[test]
    fn test_parse_scale() {
        assert_eq!(parse_scale("2"), Ok(2.0));
        assert_eq!(parse_scale(" 0.5 "), Ok(0.5));
        assert!(parse_scale("0").is_err());
        assert!(parse_scale("-1").is_err());
        assert!(parse_scale("inf").is_err());
        assert!(parse_scale("NaN").is_err());
        assert!(parse_scale("two").is_err());
    }

    #[test]
    fn test_next_request() {
        let mut s = session("\nphoto.png\nabc\n1.5\n");
        let request = s.next_request().unwrap().unwrap();
        assert_eq!(request.path, PathBuf::from("photo.png"));
        assert_eq!(request.scale, Some(1.5));

        let out = String::from_utf8(s.into_output()).unwrap();
        assert_eq!(out.matches(FILE_PROMPT).count(), 2);
        assert!(out.contains("Error: not a number"));
    }

    #[test]
    fn test_blank_scale_uses_default() {
        let mut s = Session::new(
            Cursor::new(b"a.png\n\n".to_vec()),
            Vec::new(),
            PipelineOptions::new().with_scale(3.0),
        );
        let request = s.next_request().unwrap().unwrap();
        assert_eq!(request.scale, Some(3.0));
    }

    #[test]
    fn test_end_of_input_before_request() {
        let mut s = session("");
        let summary = s.run().unwrap();
        assert_eq!(summary.end, SessionEnd::EndOfInput);
        assert_eq!(summary.converted, 0);
        assert_eq!(summary.failed, 0);
    }

    #[test]
    fn test_failure_then_cancel() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");
        let input = format!("{}\n\nn\n", missing.display());
        let mut s = session(&input).with_output_dir(dir.path());

        let summary = s.run().unwrap();
        assert_eq!(summary.end, SessionEnd::Cancelled);
        assert_eq!(summary.failed, 1);

        let out = String::from_utf8(s.into_output()).unwrap();
        assert!(out.contains("Error (I/O failure)"));
        assert!(out.contains(CONTINUE_PROMPT));
        assert!(out.ends_with("Thank you for using this tool.\n"));
    }
}
