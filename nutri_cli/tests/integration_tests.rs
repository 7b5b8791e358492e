//! Integration tests for the nutri binary.
//!
//! These tests verify end-to-end behavior including:
//! - Unit conversion (strict and fail-soft)
//! - Portion nutrition lookup
//! - Food log analysis from JSON and CSV files
//! - Config file handling

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("nutri"))
}

/// Helper to write a small CSV food log
fn write_csv_log(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("day.csv");
    fs::write(
        &path,
        "name,quantity,unit,category,date,food_key\n\
         oatmeal,80,g,grains,2024-03-01T08:00:00Z,\n\
         grilled salmon,150,g,protein,2024-03-01T13:00:00Z,\n\
         spinach,2,cup,vegetables,2024-03-01T13:00:00Z,\n\
         apple,1,piece,fruits,2024-03-01T16:00:00Z,\n",
    )
    .expect("Failed to write CSV log");
    path
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Nutrition unit normalization and health scoring",
        ));
}

#[test]
fn test_convert_uses_food_override() {
    cli()
        .args(["convert", "1", "piece", "--food", "apple"])
        .assert()
        .success()
        .stdout(predicate::str::contains("182 g"));
}

#[test]
fn test_convert_accepts_negative_amount() {
    cli()
        .args(["convert", "-1", "pieces", "--food", "apple"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-182 g"));
}

#[test]
fn test_nutrition_accepts_negative_quantity() {
    let output = cli()
        .args(["nutrition", "white rice", "-200", "g", "--json"])
        .output()
        .expect("Failed to run nutri");
    assert!(output.status.success());

    let profile: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(profile["calories"].as_f64(), Some(-260.0));
}

#[test]
fn test_verbose_flag_raises_log_level() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[conversion]\nliquid_density_g_per_ml = 1.0\n").unwrap();

    cli()
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config_path)
        .args(["convert", "1", "g"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Loaded config").not());

    cli()
        .env_remove("RUST_LOG")
        .arg("-v")
        .arg("--config")
        .arg(&config_path)
        .args(["convert", "1", "g"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Loaded config"));
}

#[test]
fn test_convert_volume_stays_in_milliliters() {
    cli()
        .args(["convert", "2", "tbsp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("29.57 ml"));
}

#[test]
fn test_convert_unknown_unit_fails() {
    cli()
        .args(["convert", "3", "cubits"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cubits"));
}

#[test]
fn test_safe_convert_assumes_grams() {
    cli()
        .args(["convert", "3", "cubits", "--safe"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 g"))
        .stderr(predicate::str::contains("assuming grams"));
}

#[test]
fn test_nutrition_json_output() {
    let output = cli()
        .args(["nutrition", "white rice", "200", "g", "--json"])
        .output()
        .expect("Failed to run nutri");
    assert!(output.status.success());

    let profile: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    assert_eq!(profile["calories"].as_f64(), Some(260.0));
    assert!(profile["nutrients"].as_array().is_some_and(|n| !n.is_empty()));
}

#[test]
fn test_analyze_csv_text_report() {
    let temp_dir = setup_test_dir();
    let log = write_csv_log(&temp_dir);

    cli()
        .arg("analyze")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("DAILY SUMMARY"))
        .stdout(predicate::str::contains("Entries: 4"))
        .stdout(predicate::str::contains("PCOS"))
        .stdout(predicate::str::contains("MALE FERTILITY"));
}

#[test]
fn test_analyze_single_condition_json() {
    let temp_dir = setup_test_dir();
    let log = write_csv_log(&temp_dir);

    let output = cli()
        .arg("analyze")
        .arg(&log)
        .args(["--condition", "diabetes", "--json"])
        .output()
        .expect("Failed to run nutri");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    assert_eq!(report["entry_count"], 4);
    let score = report["diabetes"]["score"].as_f64().expect("missing diabetes score");
    assert!((0.0..=100.0).contains(&score));
    assert!(report.get("pcos").is_none());
    assert!(report.get("male_fertility").is_none());
}

#[test]
fn test_analyze_json_log() {
    let temp_dir = setup_test_dir();
    let path = temp_dir.path().join("day.json");
    fs::write(
        &path,
        r#"[
  {"name": "white bread", "quantity": 2, "unit": "slice", "calories": 160,
   "category": "grains", "date_added": "2024-03-01T08:00:00Z",
   "nutrients": [{"id": "carbs", "name": "Carbohydrates", "amount": 30,
                  "unit": "g", "category": "macronutrient"}]}
]"#,
    )
    .unwrap();

    cli()
        .arg("analyze")
        .arg(&path)
        .args(["--condition", "pcos"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Insulin impact: high"));
}

#[test]
fn test_analyze_missing_file_fails() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("analyze")
        .arg(temp_dir.path().join("missing.csv"))
        .assert()
        .failure();
}

#[test]
fn test_analyze_rejects_unknown_condition() {
    let temp_dir = setup_test_dir();
    let log = write_csv_log(&temp_dir);

    cli()
        .arg("analyze")
        .arg(&log)
        .args(["--condition", "thyroid"])
        .assert()
        .failure();
}

#[test]
fn test_config_file_changes_piece_weight() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[conversion]\ndefault_grams_per_piece = 50.0\n").unwrap();

    // 3 servings x 50 g of quinoa at 120 kcal / 100 g
    let output = cli()
        .arg("--config")
        .arg(&config_path)
        .args(["nutrition", "quinoa", "3", "servings", "--json"])
        .output()
        .expect("Failed to run nutri");
    assert!(output.status.success());

    let profile: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(profile["calories"].as_f64(), Some(180.0));
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[conversion]\nliquid_density_g_per_ml = -1.0\n").unwrap();

    cli()
        .arg("--config")
        .arg(&config_path)
        .args(["convert", "1", "g"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("liquid_density_g_per_ml"));
}
