// Copyright (C) Brian G. Milnes 2025

//! Tests for the coverage document: layout, file writing, schema validation

mod common;

use anyhow::Result;
use common::*;
use serde_json::{json, Value};
use typecov::{
    compute_coverage, snapshot_coverage, type_coverage, validate_document, CoverageDocument,
};

fn mixed_program() -> Value {
    let function = function_decl("load", vec![bare_param("", "path", Some("any"))], Some("any"));
    let body = source_file(vec![
        function,
        ws("\n"),
        node("ExpressionStatement", vec![ident("path", Some("string"))]),
    ]);
    snapshot(vec![file("src/load.ts", body)])
}

#[test]
fn test_document_starts_with_overall_stats() -> Result<()> {
    let document = compute_coverage(&program(mixed_program()), true)?;
    let json = document.to_json()?;

    assert!(json.starts_with("{\n  \"stats\": {\n    \"knownCount\": 1,\n    \"totalCount\": 2,"), "got:\n{json}");
    assert!(json.ends_with("}\n"));

    let identifiers_at = json.find("\"identifiers\"").unwrap();
    let declarations_at = json.find("\"declarations\"").unwrap();
    let parameters_at = json.find("\"parameters\"").unwrap();
    let returns_at = json.find("\"returns\"").unwrap();
    assert!(identifiers_at < declarations_at);
    assert!(declarations_at < parameters_at);
    assert!(parameters_at < returns_at);
    Ok(())
}

#[test]
fn test_generated_document_validates() -> Result<()> {
    let document = compute_coverage(&program(mixed_program()), true)?;
    let value: Value = serde_json::from_str(&document.to_json()?)?;
    let errors = validate_document(&value)?;
    assert!(errors.is_empty(), "unexpected violations: {errors:?}");
    Ok(())
}

#[test]
fn test_schema_rejects_listed_file_without_incidents() -> Result<()> {
    let document = json!({
        "stats": { "knownCount": 1, "totalCount": 1, "percentage": 100.0 },
        "breakdowns": {
            "identifiers": {
                "stats": { "knownCount": 1, "totalCount": 1, "percentage": 100.0 },
                "files": [{
                    "filename": "a.ts",
                    "stats": { "knownCount": 1, "totalCount": 1, "percentage": 100.0 },
                    "incidents": []
                }]
            },
            "declarations": { "stats": { "knownCount": 0, "totalCount": 0, "percentage": 100.0 }, "files": [] },
            "parameters": { "stats": { "knownCount": 0, "totalCount": 0, "percentage": 100.0 }, "files": [] },
            "returns": { "stats": { "knownCount": 0, "totalCount": 0, "percentage": 100.0 }, "files": [] }
        }
    });
    assert!(!validate_document(&document)?.is_empty());
    Ok(())
}

#[test]
fn test_schema_rejects_missing_breakdown() -> Result<()> {
    let document = json!({
        "stats": { "knownCount": 0, "totalCount": 0, "percentage": 100.0 },
        "breakdowns": {}
    });
    assert!(!validate_document(&document)?.is_empty());
    Ok(())
}

#[test]
fn test_type_coverage_writes_and_overwrites_file() -> Result<()> {
    let dir = scratch_dir("overwrite");
    let coverage_file = dir.join("coverage.json");
    std::fs::write(&coverage_file, "stale contents that are much longer than nothing")?;

    let program = program(mixed_program());
    let stats = type_coverage(&program, Some(&coverage_file))?;
    assert_eq!(stats.known_count, 1);
    assert_eq!(stats.total_count, 2);
    assert!((stats.percentage - 50.0).abs() < 1e-9);

    let written = CoverageDocument::from_json(&std::fs::read_to_string(&coverage_file)?)?;
    assert_eq!(written.stats, stats);
    assert_eq!(written, compute_coverage(&program, true)?);
    assert_eq!(written.breakdowns.returns.files[0].incidents[0].name, "load");
    Ok(())
}

#[test]
fn test_type_coverage_without_path_writes_nothing() -> Result<()> {
    let dir = scratch_dir("no-output");
    let stats = type_coverage(&program(mixed_program()), None)?;
    assert_eq!(stats.total_count, 2);
    assert_eq!(std::fs::read_dir(&dir)?.count(), 0);
    Ok(())
}

#[test]
fn test_snapshot_coverage_from_disk() -> Result<()> {
    let dir = scratch_dir("from-disk");
    let snapshot_path = dir.join("program.json");
    let coverage_file = dir.join("coverage.json");
    std::fs::write(&snapshot_path, serde_json::to_string(&mixed_program())?)?;

    let stats = snapshot_coverage(&snapshot_path, Some(&coverage_file))?;
    assert_eq!(stats.known_count, 1);
    assert!(coverage_file.exists());
    Ok(())
}
