//! Integration tests for the generate workflow.
//!
//! These run the built `testtiles` binary against temporary directories.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;
use testtiles::output::TilesetHeader;

/// Run the CLI with logs kept inside `temp`.
fn run_cli(temp: &TempDir, args: &[&str]) -> Output {
    let log_dir = temp.path().join("logs");
    Command::new(env!("CARGO_BIN_EXE_testtiles"))
        .args(args)
        .arg("--log-dir")
        .arg(&log_dir)
        .output()
        .expect("Failed to execute CLI command")
}

fn assert_success(output: &Output, context: &str) {
    if !output.status.success() {
        panic!(
            "{} failed:\nstdout: {}\nstderr: {}",
            context,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path is UTF-8")
}

#[test]
fn test_generates_pyramid_with_header() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("tiles");

    let output = run_cli(&temp, &[path_str(&out), "-l", "1", "-c", "2", "--seed", "5"]);
    assert_success(&output, "generate");

    for tile in ["0/0/0.pbf", "1/0/0.pbf", "1/1/0.pbf", "1/0/1.pbf", "1/1/1.pbf"] {
        assert!(out.join(tile).is_file(), "{} should exist", tile);
    }
    assert!(!out.join("2").exists());

    let header: TilesetHeader =
        serde_json::from_slice(&fs::read(out.join("header")).unwrap()).unwrap();
    assert_eq!(header.tileset_name, "tiles");
    assert_eq!(header.seed, 5);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Wrote 5 tiles"), "stdout: {}", stdout);
    assert!(temp.path().join("logs/testtiles.log").is_file());
}

#[test]
fn test_same_seed_same_bytes() {
    let temp = TempDir::new().unwrap();
    let a = temp.path().join("a");
    let b = temp.path().join("b");

    assert_success(
        &run_cli(&temp, &[path_str(&a), "-l", "2", "-c", "20", "--seed", "9"]),
        "first run",
    );
    assert_success(
        &run_cli(
            &temp,
            &[path_str(&b), "-l", "2", "-c", "20", "--seed", "9", "-j", "4"],
        ),
        "second run",
    );

    for tile in ["0/0/0.pbf", "1/1/0.pbf", "2/3/3.pbf"] {
        assert_eq!(
            fs::read(a.join(tile)).unwrap(),
            fs::read(b.join(tile)).unwrap(),
            "{} differs",
            tile
        );
    }
}

#[test]
fn test_negative_zoom_fails_without_output() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("tiles");

    let output = run_cli(&temp, &[path_str(&out), "-l", "-1"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration error"), "stderr: {}", stderr);
    assert!(!out.exists());
}

#[test]
fn test_negative_count_fails() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("tiles");

    let output = run_cli(&temp, &[path_str(&out), "-c", "-3"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!out.exists());
}

#[test]
fn test_mvt_format_and_no_header() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("tiles");

    let output = run_cli(
        &temp,
        &[path_str(&out), "-l", "0", "--format", "mvt", "--no-header", "--seed", "1"],
    );
    assert_success(&output, "generate mvt");

    assert!(out.join("0/0/0.mvt").is_file());
    assert!(!out.join("header").exists());
}

#[test]
fn test_zero_count_still_writes_tiles() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("tiles");

    let output = run_cli(&temp, &[path_str(&out), "-l", "1", "-c", "0", "--seed", "2"]);
    assert_success(&output, "generate empty");

    let root = fs::read(out.join("0/0/0.pbf")).unwrap();
    assert!(!root.is_empty());
}

#[test]
fn test_vessel_profile_writes_series_tilesets() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("ships");

    let output = run_cli(
        &temp,
        &[path_str(&out), "-l", "1", "-c", "3", "--profile", "vessel", "--seed", "8"],
    );
    assert_success(&output, "generate vessel");

    let sub = out.join("sub/seriesgroup=1");
    assert!(sub.join("0/0/0.pbf").is_file());
    let info: serde_json::Value = serde_json::from_slice(&fs::read(sub.join("info")).unwrap()).unwrap();
    assert_eq!(info["mmsi"], "1");
    assert_eq!(info["callsign"], "SE1");
    assert_eq!(info["vesselname"], "Tor");
    assert!(out.join("sub/seriesgroup=5/header").is_file());

    let header: TilesetHeader =
        serde_json::from_slice(&fs::read(out.join("header")).unwrap()).unwrap();
    assert!(header.series_tilesets);
}

#[test]
fn test_temporal_slices_each_hold_a_tileset() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("slices");

    let output = run_cli(
        &temp,
        &[
            path_str(&out),
            "-l",
            "0",
            "-c",
            "2",
            "--seed",
            "3",
            "-s",
            "2020-01-01T00:00:00",
            "-e",
            "86400000",
            "-E",
            "2",
        ],
    );
    assert_success(&output, "generate slices");

    for slice in [
        "2020-01-01T00:00:00,2020-01-02T00:00:00",
        "2020-01-02T00:00:00,2020-01-03T00:00:00",
    ] {
        assert!(out.join(slice).join("0/0/0.pbf").is_file(), "{}", slice);
        assert!(out.join(slice).join("header").is_file(), "{}", slice);
    }

    let header: TilesetHeader =
        serde_json::from_slice(&fs::read(out.join("header")).unwrap()).unwrap();
    assert_eq!(header.temporal_extents, Some(true));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Wrote 2 tiles"), "stdout: {}", stdout);
}

#[test]
fn test_unknown_profile_rejected() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("tiles");

    let output = run_cli(&temp, &[path_str(&out), "--profile", "ships"]);
    assert!(!output.status.success());
    assert!(!out.exists());
}
