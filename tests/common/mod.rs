// Copyright (C) Brian G. Milnes 2025

//! Snapshot builders shared by the integration tests

#![allow(dead_code)]

use std::path::PathBuf;
use serde_json::{json, Value};
use typecov::SnapshotProgram;

pub fn token(kind: &str, text: &str) -> Value {
    json!({ "token": kind, "text": text })
}

pub fn ws(text: &str) -> Value {
    token("Whitespace", text)
}

pub fn kw(text: &str) -> Value {
    token("Keyword", text)
}

pub fn punct(text: &str) -> Value {
    token("Punct", text)
}

pub fn literal(text: &str) -> Value {
    token("Literal", text)
}

pub fn node(kind: &str, children: Vec<Value>) -> Value {
    json!({ "kind": kind, "children": children })
}

/// Identifier node; `ty` is the checker's type at that identifier
pub fn ident(name: &str, ty: Option<&str>) -> Value {
    let mut identifier = node("Identifier", vec![token("Ident", name)]);
    if let Some(ty) = ty {
        identifier["type"] = json!(ty);
    }
    identifier
}

pub fn with_type(mut element: Value, ty: &str) -> Value {
    element["type"] = json!(ty);
    element
}

pub fn with_symbol(mut element: Value, symbol: &str) -> Value {
    element["symbol"] = json!(symbol);
    element
}

/// Mark a function-like node as having a call signature
pub fn with_signature(mut element: Value, return_type: Option<&str>) -> Value {
    element["signature"] = match return_type {
        Some(return_type) => json!({ "returnType": return_type }),
        None => json!({}),
    };
    element
}

/// `name: ty` parameter whose annotation resolves to `annotated`
pub fn annotated_param(name: &str, annotation: &str, annotated: &str) -> Value {
    node("Parameter", vec![
        ident(name, Some(annotated)),
        punct(":"),
        with_type(node("TypeAnnotation", vec![ws(" "), kw(annotation)]), annotated),
    ])
}

/// Parameter without annotation; `inferred` is the parameter's own type
pub fn bare_param(leading: &str, name: &str, inferred: Option<&str>) -> Value {
    let mut children = Vec::new();
    if !leading.is_empty() {
        children.push(ws(leading));
    }
    children.push(ident(name, inferred));
    let parameter = node("Parameter", children);
    match inferred {
        Some(ty) => with_type(parameter, ty),
        None => parameter,
    }
}

pub fn param_list(params: Vec<Value>) -> Value {
    let mut children = vec![punct("(")];
    for (i, param) in params.into_iter().enumerate() {
        if i > 0 {
            children.push(punct(","));
        }
        children.push(param);
    }
    children.push(punct(")"));
    node("ParameterList", children)
}

pub fn empty_block() -> Value {
    node("Block", vec![ws(" "), punct("{"), punct("}")])
}

/// `function name(params) {}` with the given return type
pub fn function_decl(name: &str, params: Vec<Value>, return_type: Option<&str>) -> Value {
    with_signature(
        node("FunctionDeclaration", vec![
            kw("function"),
            ws(" "),
            ident(name, Some("Function")),
            param_list(params),
            empty_block(),
        ]),
        return_type,
    )
}

pub fn source_file(children: Vec<Value>) -> Value {
    node("SourceFile", children)
}

pub fn file(name: &str, root: Value) -> Value {
    json!({ "fileName": name, "root": root })
}

pub fn declaration_file(name: &str, root: Value) -> Value {
    json!({ "fileName": name, "isDeclarationFile": true, "root": root })
}

/// Snapshot whose root files are all given files, in order
pub fn snapshot(files: Vec<Value>) -> Value {
    let roots: Vec<Value> = files.iter().map(|f| f["fileName"].clone()).collect();
    json!({ "rootFileNames": roots, "files": files })
}

pub fn program(snapshot: Value) -> SnapshotProgram {
    SnapshotProgram::from_value(snapshot).expect("snapshot should load")
}

/// Fresh scratch directory for one test
pub fn scratch_dir(test_name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(format!("typecov-{}-{}", test_name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}
