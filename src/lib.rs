// Copyright (C) Brian G. Milnes 2025

//! Typecov - type coverage for TypeScript programs
//!
//! Measures how many type-bearing positions (identifier uses, parameters,
//! return positions) have a known type rather than `any`, and ranks files by
//! how many unknown positions they contribute. Types come from an external
//! checker behind the `TypeOracle` trait.

pub mod syntax;
pub mod ast_utils;
pub mod oracle;
pub mod report;
pub mod classifier;
pub mod visitor;
pub mod coverage;
pub mod output;
pub mod snapshot;
pub mod args;
pub mod logging;
pub mod tool_runner;

use anyhow::Result;
use std::path::Path;

// Re-export commonly used items
pub use syntax::syntax::{SyntaxKind, SyntaxNode, TsLanguage};
pub use oracle::oracle::{ParsedFile, Program, TypeOracle, ANY_TYPE};
pub use report::report::{finalize_file, finalize_report, FileReport, Incident, Report, Stats};
pub use classifier::classifier::{classify, Classification};
pub use visitor::visitor::{walk, CoverageVisitor};
pub use coverage::coverage::{compute_coverage, type_coverage};
pub use output::output::{validate_document, write_coverage_file, Breakdowns, CoverageDocument};
pub use snapshot::snapshot::{SnapshotOracle, SnapshotProgram};
pub use args::args::{format_number, format_percentage, CoverageArgs};

/// Load a snapshot file and compute its coverage
///
/// Writes the coverage document when `coverage_file` is given.
pub fn snapshot_coverage(snapshot: &Path, coverage_file: Option<&Path>) -> Result<Stats> {
    let program = SnapshotProgram::load(snapshot)?;
    type_coverage(&program, coverage_file)
}
