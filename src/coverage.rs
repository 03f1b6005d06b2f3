// Copyright (C) Brian G. Milnes 2025

//! Type coverage traversal
//!
//! Walks every root source file of a program once, scoring:
//! - identifier uses, in the identifiers breakdown and the overall stats
//! - function-like declarations, by return type, in the returns breakdown
//! - parameters, by annotated or inferred type, in the parameters breakdown
//!
//! When incidents are requested each file gets its own reports, which are
//! folded into the breakdowns after the file is walked. Otherwise counts go
//! straight into the breakdowns and no incidents are kept.

pub mod coverage {
    use std::path::Path;
    use anyhow::Result;
    use crate::ast_utils::ast_utils::{
        child_of_kind, declaration_label, full_start, has_parent_of_kind, last_child_of_kind,
        node_text, truncate, SNIPPET_LIMIT,
    };
    use crate::oracle::oracle::{Program, TypeOracle};
    use crate::output::output::{write_coverage_file, Breakdowns, CoverageDocument};
    use crate::report::report::{finalize_file, finalize_report, FileReport, Incident, Stats};
    use crate::syntax::syntax::{SyntaxKind, SyntaxNode};
    use crate::visitor::visitor::{walk, CoverageVisitor};

    /// Compute coverage, writing the full document to `coverage_file` if given
    ///
    /// Returns the overall (identifier) stats either way.
    pub fn type_coverage<P: Program>(program: &P, coverage_file: Option<&Path>) -> Result<Stats> {
        let document = compute_coverage(program, coverage_file.is_some())?;
        if let Some(path) = coverage_file {
            write_coverage_file(&document, path)?;
        }
        Ok(document.stats)
    }

    /// Compute coverage for every eligible root file, finalized and ranked
    ///
    /// With `collect_incidents` false the breakdown file lists stay empty.
    pub fn compute_coverage<P: Program>(program: &P, collect_incidents: bool) -> Result<CoverageDocument> {
        let oracle = program.type_oracle();
        let mut overall = Stats::new();
        let mut breakdowns = Breakdowns::default();

        for file_name in program.root_file_names() {
            let Some(source_file) = program.source_file(file_name) else {
                continue;
            };
            if source_file.is_declaration_file() {
                continue;
            }

            let mut sinks = collect_incidents.then(|| FileSinks::new(source_file.file_name()));
            let mut coverage_walk = CoverageWalk {
                oracle,
                overall: &mut overall,
                breakdowns: &mut breakdowns,
                sinks: sinks.as_mut(),
            };
            walk(source_file.syntax(), &mut coverage_walk)?;

            if let Some(FileSinks { identifiers, parameters, returns }) = sinks {
                finalize_file(&mut breakdowns.identifiers, Some(identifiers));
                finalize_file(&mut breakdowns.parameters, Some(parameters));
                finalize_file(&mut breakdowns.returns, Some(returns));
            }
        }

        finalize_report(&mut breakdowns.identifiers);
        finalize_report(&mut breakdowns.declarations);
        finalize_report(&mut breakdowns.parameters);
        finalize_report(&mut breakdowns.returns);
        overall.finalize();

        Ok(CoverageDocument::assemble(overall, breakdowns))
    }

    #[derive(Debug, Clone, Copy)]
    enum Category {
        Identifiers,
        Parameters,
        Returns,
    }

    /// Per-file reports for the file being walked
    struct FileSinks {
        identifiers: FileReport,
        parameters: FileReport,
        returns: FileReport,
    }

    impl FileSinks {
        fn new(file_name: &str) -> Self {
            FileSinks {
                identifiers: FileReport::new(file_name),
                parameters: FileReport::new(file_name),
                returns: FileReport::new(file_name),
            }
        }

        fn get_mut(&mut self, category: Category) -> &mut FileReport {
            match category {
                Category::Identifiers => &mut self.identifiers,
                Category::Parameters => &mut self.parameters,
                Category::Returns => &mut self.returns,
            }
        }
    }

    struct CoverageWalk<'a, O: TypeOracle> {
        oracle: &'a O,
        overall: &'a mut Stats,
        breakdowns: &'a mut Breakdowns,
        sinks: Option<&'a mut FileSinks>,
    }

    impl<O: TypeOracle> CoverageWalk<'_, O> {
        /// Count one position in `category`; unknown positions leave an incident when sinks exist
        fn tally<F>(&mut self, category: Category, known: bool, incident: F)
        where
            F: FnOnce() -> Incident,
        {
            match self.sinks.as_deref_mut() {
                Some(sinks) => {
                    let report = sinks.get_mut(category);
                    report.stats.record(known);
                    if !known {
                        report.incidents.push(incident());
                    }
                }
                None => {
                    let report = match category {
                        Category::Identifiers => &mut self.breakdowns.identifiers,
                        Category::Parameters => &mut self.breakdowns.parameters,
                        Category::Returns => &mut self.breakdowns.returns,
                    };
                    report.stats.record(known);
                }
            }
        }

        /// Declared type of the symbol an import specifier binds
        fn declared_import_type(&self, specifier: &SyntaxNode) -> Result<Option<O::Type>> {
            let Some(name) = last_child_of_kind(specifier, SyntaxKind::IDENTIFIER) else {
                return Ok(None);
            };
            let Some(symbol) = self.oracle.symbol_at_node(&name)? else {
                return Ok(None);
            };
            self.oracle.declared_type_of_symbol(&symbol)
        }
    }

    fn incident(node: &SyntaxNode, name: String, text: String) -> Incident {
        Incident {
            name,
            start: full_start(node).into(),
            end: node.text_range().end().into(),
            text,
        }
    }

    impl<O: TypeOracle> CoverageVisitor for CoverageWalk<'_, O> {
        fn visit_identifier(&mut self, node: &SyntaxNode) -> Result<()> {
            let Some(ty) = self.oracle.type_at_node(node)? else {
                return Ok(());
            };
            let mut known = !self.oracle.is_any(&ty);
            if !known && has_parent_of_kind(node, SyntaxKind::IMPORT_SPECIFIER) {
                if let Some(specifier) = node.parent() {
                    if let Some(declared) = self.declared_import_type(&specifier)? {
                        known = !self.oracle.is_any(&declared);
                    }
                }
            }

            self.overall.record(known);
            self.tally(Category::Identifiers, known, || {
                let text = node_text(node);
                incident(node, text.clone(), truncate(&text, SNIPPET_LIMIT))
            });
            Ok(())
        }

        fn visit_function(&mut self, node: &SyntaxNode) -> Result<()> {
            let Some(signature) = self.oracle.signature_from_declaration(node)? else {
                return Ok(());
            };
            let Some(return_type) = self.oracle.return_type_of_signature(&signature)? else {
                return Ok(());
            };
            let known = !self.oracle.is_any(&return_type);
            self.tally(Category::Returns, known, || {
                incident(node, declaration_label(node), truncate(&node_text(node), SNIPPET_LIMIT))
            });
            Ok(())
        }

        fn visit_parameter(&mut self, node: &SyntaxNode) -> Result<()> {
            let resolved = match child_of_kind(node, SyntaxKind::TYPE_ANNOTATION) {
                Some(annotation) => self.oracle.type_from_type_node(&annotation)?,
                None => self.oracle.type_at_node(node)?,
            };
            let known = resolved.is_some_and(|ty| !self.oracle.is_any(&ty));
            // Parameter snippets are kept whole
            self.tally(Category::Parameters, known, || {
                incident(node, declaration_label(node), node_text(node))
            });
            Ok(())
        }
    }
}
