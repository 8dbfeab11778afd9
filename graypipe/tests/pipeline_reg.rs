//! Pipeline regression test
//!
//! Runs whole files through reduction and resampling, in batch and
//! through an interactive session.

use graypipe::pipeline::{PipelineOptions, process_file};
use graypipe::session::{Session, SessionEnd};
use graypipe::transform::{BoundaryMode, ResampleOptions};
use graypipe::{ErrorKind, GrayImage, Image, ImageFormat, PixelImage};
use graypipe_test::{RegParams, test_data_path};
use std::io::Cursor;
use std::path::Path;

fn read_gray(path: &Path) -> GrayImage {
    match graypipe::io::read_image(path).expect("read output") {
        PixelImage::Gray(img) => img.map(|[v]| v),
        other => panic!("expected grayscale output, got {} channels", other.channels()),
    }
}

fn file_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .expect("output file name")
}

#[test]
fn pipeline_reg() {
    let mut rp = RegParams::new("pipeline");
    let dir = tempfile::tempdir().expect("tempdir");

    // --- Test 1: grayscale only ---
    let written = process_file(
        test_data_path("sunset.ppm"),
        dir.path(),
        &PipelineOptions::default(),
    )
    .expect("process sunset");
    rp.compare_values(1.0, written.len() as f64, 0.0);
    assert_eq!(file_name(&written[0]), "grayscale_sunset.ppm");
    let gray = read_gray(&written[0]);
    let expected: GrayImage = Image::from_rows(&[
        [142u8, 158, 175, 191],
        [136, 136, 136, 136],
        [43, 53, 63, 73],
    ])
    .expect("expected rows");
    rp.compare_images(&expected, &gray);

    // --- Test 2: grayscale and both resampling stages ---
    let options = PipelineOptions::new().with_scale(2.0);
    let written = process_file(test_data_path("corners.pgm"), dir.path(), &options)
        .expect("process corners");
    let names: Vec<&str> = written.iter().map(|p| file_name(p)).collect();
    assert_eq!(
        names,
        [
            "grayscale_corners.pgm",
            "resampled_corners.pgm",
            "resampledBack_corners.pgm"
        ]
    );
    let resampled = read_gray(&written[1]);
    rp.compare_values(4.0, resampled.width() as f64, 0.0);
    rp.compare_values(25.0, f64::from(resampled.get_unchecked(1, 1)), 0.0);
    rp.compare_values(0.0, f64::from(resampled.get_unchecked(3, 3)), 0.0);
    let back = read_gray(&written[2]);
    rp.compare_values(2.0, back.width() as f64, 0.0);
    rp.compare_values(10.0, f64::from(back.get_unchecked(0, 0)), 0.0);

    // --- Test 3: forced PNG output with replicated edges ---
    let options = PipelineOptions::new()
        .with_scale(2.0)
        .with_format(ImageFormat::Png)
        .with_resample(ResampleOptions::new().with_boundary(BoundaryMode::Replicate));
    let written = process_file(test_data_path("corners.pgm"), dir.path(), &options)
        .expect("process corners as png");
    assert_eq!(file_name(&written[1]), "resampled_corners.png");
    let resampled = read_gray(&written[1]);
    rp.compare_values(40.0, f64::from(resampled.get_unchecked(3, 3)), 0.0);
    rp.write_image_and_check(&resampled, ImageFormat::Png)
        .expect("write resampled corners");

    // --- Test 4: failures write nothing ---
    let fail_dir = tempfile::tempdir().expect("tempdir");
    let bad = fail_dir.path().join("bad.png");
    std::fs::write(&bad, b"\x89PNG\r\n\x1a\nbroken").expect("write bad file");
    let err = process_file(&bad, fail_dir.path(), &PipelineOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DecodeFailure);

    let err = process_file(
        test_data_path("ramp.pgm"),
        fail_dir.path(),
        &PipelineOptions::new().with_scale(-1.0),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidScale);
    let entries = std::fs::read_dir(fail_dir.path()).expect("list").count();
    rp.compare_values(1.0, entries as f64, 0.0);

    assert!(rp.cleanup(), "pipeline regression test failed");
}

#[test]
fn session_reg() {
    let mut rp = RegParams::new("session");
    let dir = tempfile::tempdir().expect("tempdir");

    let input = format!(
        "{}\n2\ny\n{}\n\nn\n",
        test_data_path("corners.pgm"),
        dir.path().join("missing.pgm").display()
    );
    let mut session = Session::new(
        Cursor::new(input.into_bytes()),
        Vec::new(),
        PipelineOptions::default(),
    )
    .with_output_dir(dir.path());

    let summary = session.run().expect("session");
    assert_eq!(summary.end, SessionEnd::Cancelled);
    rp.compare_values(1.0, summary.converted as f64, 0.0);
    rp.compare_values(1.0, summary.failed as f64, 0.0);

    for name in [
        "grayscale_corners.pgm",
        "resampled_corners.pgm",
        "resampledBack_corners.pgm",
    ] {
        assert!(dir.path().join(name).exists(), "{} missing", name);
    }

    let out = String::from_utf8(session.into_output()).expect("utf8 output");
    assert!(out.contains("Saved "));
    assert!(out.contains("Error (I/O failure)"));
    assert!(out.ends_with("Thank you for using this tool.\n"));

    // Closing the input is not a cancellation
    let mut session = Session::new(
        Cursor::new(format!("{}\n", test_data_path("corners.pgm")).into_bytes()),
        Vec::new(),
        PipelineOptions::default(),
    )
    .with_output_dir(dir.path());
    let summary = session.run().expect("session");
    assert_eq!(summary.end, SessionEnd::EndOfInput);
    rp.compare_values(0.0, summary.converted as f64, 0.0);

    assert!(rp.cleanup(), "session regression test failed");
}
