// Copyright (C) Brian G. Milnes 2025

//! Coverage document assembly, serialization and schema validation

pub mod output {
    use std::fs;
    use std::path::Path;
    use anyhow::{Context, Result};
    use serde::{Deserialize, Serialize};
    use serde_json::Value;
    use crate::report::report::{Report, Stats};

    /// JSON Schema for the coverage document
    pub const COVERAGE_SCHEMA: &str = include_str!("../schemas/typecov-coverage.schema.json");

    /// The four breakdowns, in output order
    ///
    /// `declarations` is finalized with the others but nothing feeds it.
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    pub struct Breakdowns {
        pub identifiers: Report,
        pub declarations: Report,
        pub parameters: Report,
        pub returns: Report,
    }

    impl Breakdowns {
        /// Breakdowns with their output names
        pub fn named(&self) -> [(&'static str, &Report); 4] {
            [
                ("identifiers", &self.identifiers),
                ("declarations", &self.declarations),
                ("parameters", &self.parameters),
                ("returns", &self.returns),
            ]
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct CoverageDocument {
        pub stats: Stats,
        pub breakdowns: Breakdowns,
    }

    impl CoverageDocument {
        pub fn assemble(stats: Stats, breakdowns: Breakdowns) -> Self {
            CoverageDocument { stats, breakdowns }
        }

        /// Two-space indented JSON with a trailing newline
        pub fn to_json(&self) -> Result<String> {
            let mut json = serde_json::to_string_pretty(self)
                .context("Failed to serialize coverage document")?;
            json.push('\n');
            Ok(json)
        }

        pub fn from_json(json: &str) -> Result<Self> {
            serde_json::from_str(json).context("Failed to parse coverage document")
        }
    }

    /// Write the document to `path`, replacing whatever was there
    pub fn write_coverage_file(document: &CoverageDocument, path: &Path) -> Result<()> {
        let json = document.to_json()?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write coverage file: {}", path.display()))
    }

    /// Validate against the bundled schema; returns one message per violation
    pub fn validate_document(document: &Value) -> Result<Vec<String>> {
        let schema: Value = serde_json::from_str(COVERAGE_SCHEMA)
            .context("Failed to parse bundled coverage schema")?;
        validate_document_with(&schema, document)
    }

    /// Validate against an arbitrary schema; returns one message per violation
    pub fn validate_document_with(schema: &Value, document: &Value) -> Result<Vec<String>> {
        let validator = jsonschema::validator_for(schema)
            .context("Failed to compile schema")?;
        Ok(validator
            .iter_errors(document)
            .map(|error| error.to_string())
            .collect())
    }
}
