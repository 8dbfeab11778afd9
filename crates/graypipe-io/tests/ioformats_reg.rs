//! I/O formats regression test
//!
//! Reads the test images, writes grayscale output in every format and
//! reads it back.

use graypipe_core::{ErrorKind, GrayImage, ImageFormat, PixelImage};
use graypipe_io::{decode, detect_format, encode, read_image, write_image};
use graypipe_test::{RegParams, load_test_image, test_data_path};

fn decode_gray(bytes: &[u8]) -> GrayImage {
    match decode(bytes).expect("decode") {
        PixelImage::Gray(img) => img.map(|[v]| v),
        other => panic!("expected grayscale, got {} channels", other.channels()),
    }
}

#[test]
fn ioformats_reg() {
    let mut rp = RegParams::new("ioformats");

    // --- Test 1: format detection of the test data ---
    for (name, format) in [
        ("corners.pgm", ImageFormat::Pnm),
        ("ramp.pgm", ImageFormat::Pnm),
        ("sunset.ppm", ImageFormat::Pnm),
    ] {
        let detected = detect_format(test_data_path(name)).expect("detect");
        assert_eq!(detected, format, "{}", name);
    }

    // --- Test 2: ASCII PNM decodes with its declared shape ---
    let pix = load_test_image("ramp.pgm").expect("load ramp.pgm");
    rp.compare_values(8.0, pix.width() as f64, 0.0);
    rp.compare_values(6.0, pix.height() as f64, 0.0);
    rp.compare_values(1.0, pix.channels() as f64, 0.0);
    let PixelImage::Gray(ramp) = pix else {
        panic!("ramp.pgm should decode as gray");
    };
    let ramp = ramp.map(|[v]| v);
    rp.compare_values(235.0, f64::from(ramp.get_unchecked(7, 5)), 0.0);

    // --- Test 3: lossless formats keep every sample ---
    for format in [ImageFormat::Png, ImageFormat::Pnm] {
        let bytes = encode(&ramp, format).expect("encode");
        rp.compare_images(&ramp, &decode_gray(&bytes));
        rp.write_image_and_check(&ramp, format).expect("write ramp");
    }

    // --- Test 4: JPEG keeps shape and approximate values ---
    let bytes = encode(&ramp, ImageFormat::Jpeg).expect("encode jpeg");
    let decoded = decode_gray(&bytes);
    assert!(decoded.sizes_equal(&ramp));
    rp.compare_images_within(&ramp, &decoded, 16);

    // --- Test 5: file round trip through the file system ---
    let dir = scratch_dir();
    let path = dir.join("ramp.png");
    write_image(&ramp, &path, ImageFormat::Png).expect("write png file");
    let PixelImage::Gray(back) = read_image(&path).expect("read png file") else {
        panic!("expected grayscale PNG");
    };
    rp.compare_images(&ramp, &back.map(|[v]| v));
    let _ = std::fs::remove_file(&path);

    // --- Test 6: failure classification ---
    let err = decode(b"GIF89a not supported").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DecodeFailure);
    let mut truncated = encode(&ramp, ImageFormat::Png).expect("encode png");
    truncated.truncate(truncated.len() / 2);
    assert_eq!(decode(&truncated).unwrap_err().kind(), ErrorKind::DecodeFailure);
    let mut huge = b"P6\n4000000000 4000000000\n255\n".to_vec();
    huge.extend_from_slice(&[0; 16]);
    assert_eq!(decode(&huge).unwrap_err().kind(), ErrorKind::DecodeFailure);
    let err = decode(b"P2\n0 0\n255\n").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DecodeFailure);
    let err = read_image(test_data_path("missing.png")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);

    assert!(rp.cleanup(), "ioformats regression test failed");
}

/// Scratch directory under the regression output directory.
fn scratch_dir() -> std::path::PathBuf {
    let dir = std::path::PathBuf::from(graypipe_test::regout_dir()).join("ioformats");
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}
