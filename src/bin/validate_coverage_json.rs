// Copyright (C) Brian G. Milnes 2025

//! Validate a typecov coverage document against its JSON Schema
//!
//! Usage:
//!   typecov-validate-report <coverage_json> [schema_json]
//!
//! Without a schema path the schema built into typecov is used.
//! Binary: typecov-validate-report

use std::fs;
use anyhow::{bail, Context, Result};
use serde_json::Value;
use typecov::output::output::{validate_document, validate_document_with};
use typecov::{format_number, format_percentage, CoverageDocument};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let Some(json_path) = args.get(1) else {
        bail!("Usage: typecov-validate-report <coverage_json> [schema_json]");
    };
    let schema_path = args.get(2);

    println!("typecov-validate-report");
    println!("=======================");
    println!("JSON:   {json_path}");
    println!("Schema: {}", schema_path.map_or("(bundled)", |s| s.as_str()));
    println!();

    let data_str = fs::read_to_string(json_path)
        .with_context(|| format!("Failed to read JSON: {json_path}"))?;
    let data: Value = serde_json::from_str(&data_str)
        .context("Failed to parse data JSON")?;

    let errors = match schema_path {
        Some(schema_path) => {
            let schema_str = fs::read_to_string(schema_path)
                .with_context(|| format!("Failed to read schema: {schema_path}"))?;
            let schema: Value = serde_json::from_str(&schema_str)
                .context("Failed to parse schema JSON")?;
            validate_document_with(&schema, &data)?
        }
        None => validate_document(&data)?,
    };

    if !errors.is_empty() {
        println!("✗ Validation errors:");
        for error in &errors {
            println!("  - {error}");
        }
        bail!("{} schema violation(s) in {json_path}", errors.len());
    }
    println!("✓ JSON validates against schema!\n");

    let document = CoverageDocument::from_json(&data_str)?;
    println!("=== Summary ===");
    println!(
        "{:<13} {:>10} {:>10} {:>9} {:>7}",
        "Breakdown", "Known", "Total", "Coverage", "Files"
    );
    println!("{}", "-".repeat(53));
    println!(
        "{:<13} {:>10} {:>10} {:>9} {:>7}",
        "overall",
        format_number(document.stats.known_count),
        format_number(document.stats.total_count),
        format_percentage(document.stats.percentage),
        "-"
    );
    for (name, report) in document.breakdowns.named() {
        println!(
            "{:<13} {:>10} {:>10} {:>9} {:>7}",
            name,
            format_number(report.stats.known_count),
            format_number(report.stats.total_count),
            format_percentage(report.stats.percentage),
            report.files.len()
        );
    }

    Ok(())
}
