use std::process::Command;

use image::{Rgb, RgbImage};

#[test]
fn pixels_cli_writes_exact_dump() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("red.png");
    let output = tmp.path().join("red.txt");
    RgbImage::from_pixel(2, 1, Rgb([255, 0, 0]))
        .save(&input)
        .unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_framekit-pixels"))
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .status()
        .unwrap();

    assert!(status.success());
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "[2,1]\n[255,0,0,255][255,0,0,255]"
    );
}

#[test]
fn pixels_cli_accepts_long_underscore_flags() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("dot.png");
    let output = tmp.path().join("dot.txt");
    RgbImage::from_pixel(1, 1, Rgb([1, 2, 3])).save(&input).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_framekit-pixels"))
        .arg("--input_file")
        .arg(&input)
        .arg("--output_file")
        .arg(&output)
        .status()
        .unwrap();

    assert!(status.success());
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "[1,1]\n[1,2,3,255]"
    );
}

#[test]
fn missing_input_prints_message_and_exits_zero() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("missing.png");
    let output = tmp.path().join("out.txt");

    let out = Command::new(env!("CARGO_BIN_EXE_framekit-pixels"))
        .arg("-i")
        .arg(&missing)
        .arg("-o")
        .arg(&output)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("does not exist"));
    assert!(!output.exists());

    let out = Command::new(env!("CARGO_BIN_EXE_framekit-resize"))
        .arg("-i")
        .arg(&missing)
        .args(["-r", "32", "-c", "1"])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("does not exist"));

    let out = Command::new(env!("CARGO_BIN_EXE_framekit-tile"))
        .arg("-i")
        .arg(tmp.path().join("missing.mp4"))
        .arg("-o")
        .arg(tmp.path().join("sheet.png"))
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("does not exist"));
}

#[test]
fn resize_rejects_out_of_range_compression() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("pic.png");
    RgbImage::new(4, 4).save(&input).unwrap();
    let before = std::fs::read(&input).unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_framekit-resize"))
        .arg("-i")
        .arg(&input)
        .args(["-r", "2", "-c", "10"])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("between 1 and 9"));
    assert_eq!(std::fs::read(&input).unwrap(), before);
}

#[test]
fn resize_reports_every_out_of_range_compression_the_same_way() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("pic.png");
    RgbImage::new(4, 4).save(&input).unwrap();
    let before = std::fs::read(&input).unwrap();

    for compression in ["0", "10", "300", "-1"] {
        let out = Command::new(env!("CARGO_BIN_EXE_framekit-resize"))
            .arg("-i")
            .arg(&input)
            .args(["-r", "2", "-c", compression])
            .output()
            .unwrap();
        assert_eq!(out.status.code(), Some(0), "compression {compression}");
        let stdout = String::from_utf8_lossy(&out.stdout);
        assert!(
            stdout.contains("between 1 and 9"),
            "compression {compression}: {stdout}"
        );
        assert_eq!(std::fs::read(&input).unwrap(), before);
    }
}

#[test]
fn resize_without_ffmpeg_fails_and_keeps_original() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("pic.png");
    RgbImage::new(4, 4).save(&input).unwrap();
    let before = std::fs::read(&input).unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_framekit-resize"))
        .arg("-i")
        .arg(&input)
        .args(["-r", "2", "--ffmpeg", "/definitely/not/here/ffmpeg"])
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert_eq!(std::fs::read(&input).unwrap(), before);
    assert!(!tmp.path().join("pic_backup.png").exists());
}

#[test]
fn missing_required_argument_is_a_usage_error() {
    let out = Command::new(env!("CARGO_BIN_EXE_framekit-pixels"))
        .args(["-i", "x.png"])
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("--output_file"));
}
