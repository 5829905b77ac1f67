//! Integration tests for the tcgen CLI.

#![allow(deprecated)] // cargo_bin is deprecated but works fine for standard builds

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tcgen() -> Command {
    Command::cargo_bin("tcgen").unwrap()
}

// ============================================================================
// Help and Version tests
// ============================================================================

#[test]
fn test_help_describes_precedence() {
    tcgen()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Later sources win"));
}

#[test]
fn test_help_short_flag() {
    tcgen()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("--help"));
}

#[test]
fn test_version() {
    tcgen()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_shows_all_options() {
    tcgen()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-color"))
        .stdout(predicate::str::contains("--verbose"))
        .stdout(predicate::str::contains("--set"))
        .stdout(predicate::str::contains("--input"))
        .stdout(predicate::str::contains("--options-file"))
        .stdout(predicate::str::contains("--recipe"))
        .stdout(predicate::str::contains("--output-format"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--explain"))
        .stdout(predicate::str::contains("--list-options"))
        .stdout(predicate::str::contains("--list-recipes"));
}

#[test]
fn test_invalid_output_format_fails() {
    tcgen()
        .args(["--output-format", "invalid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid"));
}

// ============================================================================
// Command generation
// ============================================================================

#[test]
fn test_defaults_with_input() {
    tcgen()
        .args(["-n", "-i", "cities.geojson"])
        .assert()
        .success()
        .stdout("tippecanoe -o output.mbtiles -z14 cities.geojson\n");
}

#[test]
fn test_input_with_at_in_filename_has_no_layer() {
    tcgen()
        .args(["-n", "-i", "tiles@2x.geojson", "-i", "roads.geojson@roads"])
        .assert()
        .success()
        .stdout("tippecanoe -o output.mbtiles -z14 tiles@2x.geojson -L roads:roads.geojson\n");
}

#[test]
fn test_home_relative_input_is_quoted() {
    tcgen()
        .args(["-n", "-i", "~/data/cities.geojson"])
        .assert()
        .success()
        .stdout("tippecanoe -o output.mbtiles -z14 '~/data/cities.geojson'\n");
}

#[test]
fn test_auto_zoom_scenario() {
    tcgen()
        .args([
            "--no-color",
            "-s",
            "output_format=mbtiles",
            "-s",
            "output_file=output",
            "-s",
            "zoom_mode=auto-detect",
            "-i",
            "cities.geojson",
        ])
        .assert()
        .success()
        .stdout("tippecanoe -o output.mbtiles -zg cities.geojson\n");
}

#[test]
fn test_layers_and_quoting() {
    tcgen()
        .args([
            "-n",
            "-s",
            "name=World Cities",
            "-i",
            "data/cities.geojson@cities",
            "-i",
            "my roads.geojson",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("-n 'World Cities'"))
        .stdout(predicate::str::contains(
            "-L cities:data/cities.geojson 'my roads.geojson'",
        ));
}

#[test]
fn test_directory_output_target() {
    tcgen()
        .args(["-n", "-s", "output_format=directory", "-s", "output_dir=tiles"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("tippecanoe -e tiles -z14"))
        .stdout(predicate::str::contains("-o ").not());
}

#[test]
fn test_recipe() {
    tcgen()
        .args(["-n", "--recipe", "railroads"])
        .assert()
        .success()
        .stdout(
            "tippecanoe -o ne_10m_railroads.mbtiles -zg -ae -as ne_10m_railroads.geojson\n",
        );
}

#[test]
fn test_unknown_recipe_fails() {
    tcgen()
        .args(["-n", "--recipe", "rivers"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown recipe 'rivers'"));
}

#[test]
fn test_unknown_option_fails() {
    tcgen()
        .args(["-n", "-s", "max_zooom=3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown option: max_zooom"));
}

#[test]
fn test_out_of_range_value_fails() {
    tcgen()
        .args(["-n", "-s", "max_zoom=23"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_unknown_choice_fails() {
    tcgen()
        .args(["-n", "-s", "zoom_mode=guess"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown choice 'guess'"));
}

#[test]
fn test_malformed_set_fails() {
    tcgen()
        .args(["-n", "-s", "zoom_mode"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected NAME=VALUE"));
}

// ============================================================================
// Output formats and destinations
// ============================================================================

#[test]
fn test_json_output() {
    let output = tcgen()
        .args(["-n", "-f", "json", "-i", "cities.geojson"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["program"], "tippecanoe");
    assert_eq!(
        parsed["tokens"],
        serde_json::json!(["-o", "output.mbtiles", "-z14", "cities.geojson"])
    );
    assert_eq!(
        parsed["command"],
        "tippecanoe -o output.mbtiles -z14 cities.geojson"
    );
}

#[test]
fn test_script_output() {
    tcgen()
        .args(["-n", "-f", "script", "-i", "cities.geojson"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("#!/bin/sh\n"))
        .stdout(predicate::str::ends_with(
            "tippecanoe -o output.mbtiles -z14 cities.geojson\n",
        ));
}

#[test]
fn test_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("command.txt");

    tcgen()
        .args(["-n", "-i", "cities.geojson", "-o"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "tippecanoe -o output.mbtiles -z14 cities.geojson\n");
}

// ============================================================================
// Options files
// ============================================================================

#[test]
fn test_options_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cities.yaml");
    fs::write(
        &path,
        "options:\n  output_format: pmtiles\n  output_file: cities\n  drop_rate: 1\n\
         inputs:\n  - path: cities.geojson\n    layer: cities\n",
    )
    .unwrap();

    tcgen()
        .args(["-n", "-c"])
        .arg(&path)
        .args(["-s", "drop_rate=2"])
        .assert()
        .success()
        .stdout("tippecanoe -o cities.pmtiles -z14 -r2.0 -L cities:cities.geojson\n");
}

#[test]
fn test_missing_options_file_fails() {
    tcgen()
        .args(["-n", "-c", "/nonexistent/options.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_invalid_options_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.yaml");
    fs::write(&path, "- just\n- a list\n").unwrap();

    tcgen()
        .args(["-n", "-c"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Root document must be a mapping"));
}

// ============================================================================
// Listings, explain and lints
// ============================================================================

#[test]
fn test_list_options() {
    tcgen()
        .args(["-n", "--list-options"])
        .assert()
        .success()
        .stdout(predicate::str::contains("----------- Output -----------"))
        .stdout(predicate::str::contains("max_zoom  integer 0..22 [default: 14]"))
        .stdout(predicate::str::contains("Drop Options:"));
}

#[test]
fn test_list_recipes() {
    tcgen()
        .args(["-n", "--list-recipes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("railroads"))
        .stdout(predicate::str::contains("clustered-cities"));
}

#[test]
fn test_explain_writes_to_stderr() {
    tcgen()
        .args(["-n", "--explain", "-s", "zoom_mode=auto-detect", "-i", "c.geojson"])
        .assert()
        .success()
        .stdout("tippecanoe -o output.mbtiles -zg c.geojson\n")
        .stderr(predicate::str::contains("----------- Contributions -----------"))
        .stderr(predicate::str::contains("(zoom_mode)"));
}

#[test]
fn test_lints_warn_without_blocking() {
    tcgen()
        .args(["-n", "-s", "feature_filter={\"*\":", "-i", "c.geojson"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-j '{\"*\":'"))
        .stderr(predicate::str::contains("filter is not valid JSON"));
}

#[test]
fn test_missing_input_warns() {
    tcgen()
        .arg("-n")
        .assert()
        .success()
        .stdout("tippecanoe -o output.mbtiles -z14\n")
        .stderr(predicate::str::contains("no input files"));
}
