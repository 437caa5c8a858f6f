use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

#[test]
fn png2ico_prints_output_path() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("icon.png");
    RgbaImage::from_pixel(20, 20, Rgba([5, 6, 7, 255])).save(&input).unwrap();
    let output = temp.path().join("icon.ico");

    let result = run_tool(env!("CARGO_BIN_EXE_png2ico"), &[&input, &output]);
    assert!(result.status.success());
    let stdout = String::from_utf8(result.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.contains(&output.display().to_string()));
    assert!(output.exists());
}

#[test]
fn png2ico_missing_input_fails_with_diagnostic() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("missing.png");
    let output = temp.path().join("icon.ico");

    let result = run_tool(env!("CARGO_BIN_EXE_png2ico"), &[&input, &output]);
    assert_eq!(result.status.code(), Some(1));
    assert!(result.stdout.is_empty());
    let stderr = String::from_utf8(result.stderr).unwrap();
    assert!(stderr.contains("ERROR"));
    assert!(stderr.contains("failed to load image"));
    assert!(stderr.contains(&input.display().to_string()));
    assert!(!output.exists());
}

#[test]
fn remove_background_prints_path_and_dimensions() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input.png");
    RgbImage::from_pixel(3, 2, Rgb([250, 250, 250])).save(&input).unwrap();
    let output = temp.path().join("icon.png");

    let result = run_tool(env!("CARGO_BIN_EXE_remove_background"),
                          &[&input, &output]);
    assert!(result.status.success());
    let stdout = String::from_utf8(result.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains(&output.display().to_string()));
    assert!(lines[1].contains("3×2"));
}

#[test]
fn remove_background_missing_input_fails_with_diagnostic() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("missing.jpg");
    let output = temp.path().join("icon.png");

    let result = run_tool(env!("CARGO_BIN_EXE_remove_background"),
                          &[&input, &output]);
    assert_eq!(result.status.code(), Some(1));
    assert!(result.stdout.is_empty());
    let stderr = String::from_utf8(result.stderr).unwrap();
    assert!(stderr.contains("failed to load image"));
    assert!(stderr.contains(&input.display().to_string()));
}

#[test]
fn readico_lists_every_entry() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("icon.png");
    RgbaImage::new(8, 8).save(&input).unwrap();
    let ico = temp.path().join("icon.ico");
    icoprep::generate_icon(&input, &ico).unwrap();

    let result = run_tool(env!("CARGO_BIN_EXE_readico"), &[&ico]);
    assert!(result.status.success());
    let stdout = String::from_utf8(result.stdout).unwrap();
    assert!(stdout.starts_with("ICO file contains 6 entries:"));
    assert_eq!(stdout.lines().filter(|line| line.contains("Png")).count(),
               6);
}

fn run_tool(exe: &str, args: &[&Path]) -> Output {
    Command::new(exe)
        .args(args)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}
