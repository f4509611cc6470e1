//! Integration tests for CLI output formatting.
//!
//! These run the built `quadmap` binary against a small point file and check
//! both JSON and human output modes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn quadmap_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove 'deps' directory
    path.push("quadmap");
    path
}

fn write_sample_points(dir: &Path) -> PathBuf {
    let path = dir.join("points.geojson");
    let content = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [10.0, 10.0]},
                "properties": {"data": "a"}
            },
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [20.0, 20.0]},
                "properties": {"data": "b"}
            },
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-10.0, -10.0]},
                "properties": {"data": "c"}
            }
        ]
    }"#;
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_query_json_output_is_valid() {
    let dir = tempfile::tempdir().unwrap();
    let points = write_sample_points(dir.path());

    let output = Command::new(quadmap_bin())
        .args([
            "query",
            points.to_str().unwrap(),
            "--center-x",
            "0",
            "--center-y",
            "0",
            "--half-width",
            "15",
            "--half-height",
            "15",
            "--json",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");

    assert_eq!(parsed["status"], "success");
    assert_eq!(parsed["data"]["matches"], 2);
    let results = parsed["data"]["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["data"], "a");
    assert_eq!(results[1]["data"], "c");
}

#[test]
fn test_nearest_human_output() {
    let dir = tempfile::tempdir().unwrap();
    let points = write_sample_points(dir.path());

    let output = Command::new(quadmap_bin())
        .args(["nearest", points.to_str().unwrap(), "--x", "12", "--y", "12"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Nearest Neighbor"), "got: {stdout}");
    assert!(stdout.contains("(10, 10)"), "got: {stdout}");
}

#[test]
fn test_export_stdout_is_a_feature_collection() {
    let dir = tempfile::tempdir().unwrap();
    let points = write_sample_points(dir.path());

    let output = Command::new(quadmap_bin())
        .args(["export", points.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("Export should be valid GeoJSON");

    assert_eq!(parsed["type"], "FeatureCollection");
    assert_eq!(parsed["features"].as_array().unwrap().len(), 3);
}

#[test]
fn test_stats_json_counts_points() {
    let dir = tempfile::tempdir().unwrap();
    let points = write_sample_points(dir.path());

    let output = Command::new(quadmap_bin())
        .args(["stats", points.to_str().unwrap(), "--json", "--capacity", "1"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");

    assert_eq!(parsed["data"]["points"], 3);
    assert_eq!(parsed["data"]["capacity"], 1);
    assert!(parsed["data"]["nodes"].as_u64().unwrap() > 1);
}

#[test]
fn test_missing_file_fails() {
    let output = Command::new(quadmap_bin())
        .args(["stats", "/nonexistent/points.geojson"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}
