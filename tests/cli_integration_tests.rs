//! CLI Integration Tests
//!
//! Tests the gridx binary directly using assert_cmd to exercise main.rs code paths.
//!
//! # Coverage Exclusion (ADR-006)
//! These tests are skipped during coverage runs; the library paths they reach
//! are covered by the unit and codec tests.

#![cfg(not(coverage))]
#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use predicates::prelude::*;
use royalbit_gridx::cli::commands::read_grid_document;
use royalbit_gridx::excel::SpreadsheetCodec;
use royalbit_gridx::grid::CellGrid;
use std::fs;
use tempfile::TempDir;

fn gridx() -> Command {
    let mut cmd = Command::cargo_bin("gridx").unwrap();
    cmd.env_remove("GRIDX_CONFIG").env_remove("RUST_LOG");
    cmd
}

const SAMPLE_JSON: &str = r#"{"rows": 2, "columns": 2, "cells": [["a", ""], ["", "d"]]}"#;

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    gridx()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("gridx"))
        .stdout(predicate::str::contains("COMMANDS"));
}

#[test]
fn test_cli_version() {
    gridx()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gridx"));
}

#[test]
fn test_export_help() {
    gridx()
        .args(["export", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Export a grid document"));
}

#[test]
fn test_unknown_typing_rejected() {
    gridx()
        .args(["--typing", "numeric", "new", "x.xlsx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("numeric"));
}

// ═══════════════════════════════════════════════════════════════════════════
// EXPORT / IMPORT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_export_then_import_json() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("grid.json");
    let workbook = temp_dir.path().join("grid.xlsx");
    let output = temp_dir.path().join("back.yaml");
    fs::write(&input, SAMPLE_JSON).unwrap();

    gridx()
        .arg("export")
        .arg(&input)
        .arg(&workbook)
        .assert()
        .success()
        .stdout(predicate::str::contains("Export Complete"));

    gridx()
        .arg("import")
        .arg(&workbook)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Import Complete"));

    let original = read_grid_document(&input).unwrap();
    let back = read_grid_document(&output).unwrap();
    assert_eq!(back, original);
}

#[test]
fn test_import_prints_preview() {
    let temp_dir = TempDir::new().unwrap();
    let workbook = temp_dir.path().join("preview.xlsx");
    let grid = CellGrid::from_rows(vec![vec!["alpha".to_string(), "beta".to_string()]]).unwrap();
    SpreadsheetCodec::default().encode(&grid, &workbook).unwrap();

    gridx()
        .arg("import")
        .arg(&workbook)
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha"))
        .stdout(predicate::str::contains("beta"));
}

#[test]
fn test_import_missing_workbook_fails() {
    let temp_dir = TempDir::new().unwrap();

    gridx()
        .arg("import")
        .arg(temp_dir.path().join("missing.xlsx"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Read error"));
}

#[test]
fn test_export_ragged_document_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("ragged.json");
    let workbook = temp_dir.path().join("ragged.xlsx");
    fs::write(
        &input,
        r#"{"rows": 2, "columns": 2, "cells": [["a", "b"], ["c"]]}"#,
    )
    .unwrap();

    gridx()
        .arg("export")
        .arg(&input)
        .arg(&workbook)
        .assert()
        .failure();
    assert!(!workbook.exists());
}

#[test]
fn test_export_with_sheet_name_and_inferred_typing() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("nums.yaml");
    let workbook = temp_dir.path().join("nums.xlsx");
    fs::write(&input, "rows: 1\ncolumns: 2\ncells:\n  - [\"42\", \"007\"]\n").unwrap();

    gridx()
        .args(["--sheet-name", "Book", "--typing", "inferred"])
        .arg("export")
        .arg(&input)
        .arg(&workbook)
        .assert()
        .success();

    let decoded = SpreadsheetCodec::default().decode(&workbook).unwrap();
    assert_eq!(decoded.get(0, 0), Some("42"));
    assert_eq!(decoded.get(0, 1), Some("007"));
}

#[test]
fn test_config_from_environment() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("gridx.yaml");
    fs::write(&config, "sheet_name: \"bad/name\"\n").unwrap();

    gridx()
        .env("GRIDX_CONFIG", &config)
        .arg("new")
        .arg(temp_dir.path().join("blank.xlsx"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

// ═══════════════════════════════════════════════════════════════════════════
// INSPECT / NEW
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_new_then_inspect() {
    let temp_dir = TempDir::new().unwrap();
    let workbook = temp_dir.path().join("blank.xlsx");

    gridx()
        .arg("new")
        .arg(&workbook)
        .args(["--rows", "7", "--columns", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    gridx()
        .arg("inspect")
        .arg(&workbook)
        .assert()
        .success()
        .stdout(predicate::str::contains("7 rows x 3 columns"))
        .stdout(predicate::str::contains("0 cells"));
}

#[test]
fn test_new_uses_default_shape() {
    let temp_dir = TempDir::new().unwrap();
    let workbook = temp_dir.path().join("default.xlsx");

    gridx().arg("new").arg(&workbook).assert().success();

    let decoded = SpreadsheetCodec::default().decode(&workbook).unwrap();
    assert_eq!(decoded.shape(), (100, 20));
}

#[test]
fn test_new_rejects_non_xlsx() {
    let temp_dir = TempDir::new().unwrap();

    gridx()
        .arg("new")
        .arg(temp_dir.path().join("blank.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Write error"));
}
