use std::{path::Path, process::Command};

use image::{GenericImageView, ImageFormat};
use tempfile::TempDir;

const CREATE_ICONS: &str = env!("CARGO_BIN_EXE_create-icons");
const INSPECT_PNG: &str = env!("CARGO_BIN_EXE_inspect-png");

fn run(binary: &str, args: &[&str], out_dir: &Path) -> std::process::Output {
    Command::new(binary)
        .args(args)
        .arg(out_dir)
        .output()
        .expect("failed to run binary")
}

#[test]
fn writes_default_icon_set() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let out_dir = temp_dir.path().join("icons");

    let output = run(CREATE_ICONS, &["-o"], &out_dir);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    for size in [16, 32, 48, 128] {
        let path = out_dir.join(format!("icon{size}.png"));
        let bytes = std::fs::read(&path).expect("icon should exist");
        let icon = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!(icon.dimensions(), (size, size));
        assert_eq!(icon.get_pixel(0, 0).0, [102, 126, 234, 255]);
    }
    assert!(!out_dir.join("icons.json").exists());
}

#[test]
fn writes_manifest_for_requested_sizes() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let out_dir = temp_dir.path();

    let output = run(CREATE_ICONS, &["--sizes", "24,64", "--manifest", "-o"], out_dir);
    assert!(output.status.success());

    let manifest: serde_json::Value =
        serde_json::from_slice(&std::fs::read(out_dir.join("icons.json")).unwrap()).unwrap();
    assert_eq!(manifest["icons"]["24"], "icon24.png");
    assert_eq!(manifest["icons"]["64"], "icon64.png");
    assert!(manifest["generated_at"].is_string());
    assert!(out_dir.join("icon24.png").exists());
    assert!(!out_dir.join("icon16.png").exists());
}

#[test]
fn zero_size_fails_without_writing_anything() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let out_dir = temp_dir.path().join("icons");

    let output = run(CREATE_ICONS, &["--sizes", "16,0", "-o"], &out_dir);
    assert!(!output.status.success());
    assert!(!out_dir.exists());
}

#[test]
fn inspect_lists_chunks_of_generated_icon() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let out_dir = temp_dir.path();
    assert!(run(CREATE_ICONS, &["-s", "16", "-o"], out_dir).status.success());

    let output = run(INSPECT_PNG, &[], &out_dir.join("icon16.png"));
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert!(lines[0].starts_with("IHDR length=13"));
    assert!(lines[0].contains("16x16 depth=8 color=Truecolor"));
    assert!(lines[1].starts_with("IDAT"));
    assert!(lines[2].starts_with("IEND length=0 crc=ae426082"));
    assert_eq!(lines[3], "decoded 16x16 (256 pixels)");
}

#[test]
fn inspect_rejects_corrupted_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let out_dir = temp_dir.path();
    assert!(run(CREATE_ICONS, &["-s", "16", "-o"], out_dir).status.success());

    let path = out_dir.join("icon16.png");
    let mut bytes = std::fs::read(&path).unwrap();
    bytes[8 + 25 + 10] ^= 0xff;
    std::fs::write(&path, bytes).unwrap();

    let output = run(INSPECT_PNG, &[], &path);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("CRC mismatch"));
}
