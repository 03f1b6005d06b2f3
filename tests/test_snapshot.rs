// Copyright (C) Brian G. Milnes 2025

//! Tests for rebuilding programs from snapshots

mod common;

use anyhow::Result;
use common::*;
use serde_json::json;
use typecov::{compute_coverage, Program, SnapshotProgram, SyntaxKind, TypeOracle};

fn load_error(snapshot: serde_json::Value) -> String {
    format!("{:#}", SnapshotProgram::from_value(snapshot).unwrap_err())
}

#[test]
fn test_tree_text_and_facts_survive_rebuild() -> Result<()> {
    let statement = node("ExpressionStatement", vec![ws("  "), with_symbol(ident("count", Some("number")), "count")]);
    let mut value = snapshot(vec![file("a.ts", source_file(vec![statement]))]);
    value["symbols"] = json!({ "count": { "declaredType": "number" } });
    let program = program(value);

    let source = program.source_file("a.ts").unwrap();
    assert_eq!(source.file_name(), "a.ts");
    assert!(!source.is_declaration_file());
    assert_eq!(source.syntax().text().to_string(), "  count");

    let identifier = source.syntax().descendants()
        .find(|n| n.kind() == SyntaxKind::IDENTIFIER)
        .unwrap();
    let oracle = program.type_oracle();
    assert_eq!(oracle.type_at_node(&identifier)?.as_deref(), Some("number"));
    let symbol = oracle.symbol_at_node(&identifier)?.unwrap();
    assert_eq!(oracle.declared_type_of_symbol(&symbol)?.as_deref(), Some("number"));

    // Nothing was recorded for the statement itself
    let statement = identifier.parent().unwrap();
    assert_eq!(oracle.type_at_node(&statement)?, None);
    assert_eq!(oracle.signature_from_declaration(&statement)?, None);
    Ok(())
}

#[test]
fn test_identical_subtrees_keep_their_own_facts() -> Result<()> {
    let body = source_file(vec![
        node("ExpressionStatement", vec![ident("x", Some("any"))]),
        node("ExpressionStatement", vec![ident("x", Some("string"))]),
    ]);
    let program = program(snapshot(vec![file("a.ts", body)]));
    let root = program.source_file("a.ts").unwrap().syntax().clone();

    let types: Vec<Option<String>> = root.descendants()
        .filter(|n| n.kind() == SyntaxKind::IDENTIFIER)
        .map(|n| program.type_oracle().type_at_node(&n))
        .collect::<Result<_>>()?;
    assert_eq!(types, [Some("any".to_string()), Some("string".to_string())]);
    Ok(())
}

#[test]
fn test_identical_zero_width_nodes_keep_their_own_facts() -> Result<()> {
    // Error recovery leaves empty identifiers behind
    let missing = |ty: &str| with_type(node("Identifier", vec![]), ty);
    let body = source_file(vec![node("ExpressionStatement", vec![missing("any"), missing("number")])]);
    let program = program(snapshot(vec![file("a.ts", body)]));

    let document = compute_coverage(&program, true)?;
    assert_eq!(document.stats.total_count, 2);
    assert_eq!(document.stats.known_count, 1);
    let incident = &document.breakdowns.identifiers.files[0].incidents[0];
    assert_eq!((incident.start, incident.end), (0, 0));
    Ok(())
}

/// Snapshot text of `((((x))))` nested `depth` times
fn nested_snapshot_json(depth: usize) -> String {
    let mut json = String::from(r#"{"rootFileNames":["deep.ts"],"files":[{"fileName":"deep.ts","root":{"kind":"SourceFile","children":["#);
    for _ in 0..depth {
        json.push_str(r#"{"kind":"ParenthesizedExpression","children":[{"token":"Punct","text":"("},"#);
    }
    json.push_str(r#"{"kind":"Identifier","type":"number","children":[{"token":"Ident","text":"x"}]}"#);
    for _ in 0..depth {
        json.push_str(r#",{"token":"Punct","text":")"}]}"#);
    }
    json.push_str("]}}]}");
    json
}

#[test]
fn test_deeply_nested_snapshot_text_loads() -> Result<()> {
    let program = SnapshotProgram::from_json(&nested_snapshot_json(2_000))?;
    let root = program.source_file("deep.ts").unwrap().syntax().clone();
    assert_eq!(u32::from(root.text().len()), 2 * 2_000 + 1);

    let document = compute_coverage(&program, true)?;
    assert_eq!(document.stats.total_count, 1);
    assert_eq!(document.stats.known_count, 1);
    Ok(())
}

#[test]
fn test_trailing_text_after_snapshot_is_rejected() {
    let json = format!("{} extra", nested_snapshot_json(1));
    let error = format!("{:#}", SnapshotProgram::from_json(&json).unwrap_err());
    assert!(error.contains("Failed to parse snapshot JSON"), "got: {error}");
}

#[test]
fn test_element_without_token_or_kind_is_rejected() {
    let body = source_file(vec![json!({ "text": "x" })]);
    assert!(SnapshotProgram::from_value(snapshot(vec![file("a.ts", body)])).is_err());
}

#[test]
fn test_unknown_kind_names_load_as_other() -> Result<()> {
    let body = source_file(vec![node("JsxSelfClosingElement", vec![ident("Widget", Some("any"))])]);
    let program = program(snapshot(vec![file("a.tsx", body)]));
    let root = program.source_file("a.tsx").unwrap().syntax().clone();
    assert_eq!(root.first_child().unwrap().kind(), SyntaxKind::OTHER);
    Ok(())
}

#[test]
fn test_duplicate_file_is_rejected() {
    let error = load_error(snapshot(vec![
        file("a.ts", source_file(vec![])),
        file("a.ts", source_file(vec![])),
    ]));
    assert!(error.contains("Duplicate file in snapshot: a.ts"), "got: {error}");
}

#[test]
fn test_unknown_symbol_is_rejected() {
    let body = source_file(vec![with_symbol(ident("ghost", None), "ghost")]);
    let error = load_error(snapshot(vec![file("a.ts", body)]));
    assert!(error.contains("unknown symbol 'ghost'"), "got: {error}");
}

#[test]
fn test_token_with_node_kind_is_rejected() {
    let body = source_file(vec![token("Identifier", "x")]);
    let error = load_error(snapshot(vec![file("a.ts", body)]));
    assert!(error.contains("Bad syntax tree for a.ts"), "got: {error}");
    assert!(error.contains("Token has node kind"), "got: {error}");
}

#[test]
fn test_node_with_token_kind_is_rejected() {
    let body = source_file(vec![node("Punct", vec![])]);
    let error = load_error(snapshot(vec![file("a.ts", body)]));
    assert!(error.contains("Node has token kind"), "got: {error}");
}

#[test]
fn test_missing_root_file_is_tolerated() -> Result<()> {
    let mut value = snapshot(vec![file("a.ts", source_file(vec![]))]);
    value["rootFileNames"] = json!(["a.ts", "generated.ts"]);
    let program = program(value);
    assert_eq!(program.root_file_names(), ["a.ts", "generated.ts"]);
    assert!(program.source_file("generated.ts").is_none());
    Ok(())
}

#[test]
fn test_load_reports_path_and_parse_failure() {
    let dir = scratch_dir("bad-snapshot");
    let path = dir.join("program.json");
    std::fs::write(&path, "{ not json").unwrap();

    let error = format!("{:#}", SnapshotProgram::load(&path).unwrap_err());
    assert!(error.contains("Invalid snapshot"), "got: {error}");
    assert!(error.contains("Failed to parse snapshot JSON"), "got: {error}");

    let missing = dir.join("missing.json");
    let error = format!("{:#}", SnapshotProgram::load(&missing).unwrap_err());
    assert!(error.contains("Failed to read snapshot"), "got: {error}");
}
