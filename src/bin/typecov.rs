// Copyright (C) Brian G. Milnes 2025

//! Type coverage for a program snapshot
//!
//! Prints overall identifier coverage; with -o also writes the full coverage
//! document and lists the files with the largest gaps per breakdown.
//! Binary: typecov

use anyhow::{bail, Result};
use clap::Parser;
use typecov::logging::logging::ToolLogger;
use typecov::tool_runner::tool_runner::{run_tool, ToolConfig};
use typecov::{
    compute_coverage, format_number, format_percentage, write_coverage_file, CoverageArgs,
    CoverageDocument, SnapshotProgram, Stats,
};

fn stats_line(stats: &Stats) -> String {
    format!(
        "{} of {} known ({}), gap {}",
        format_number(stats.known_count),
        format_number(stats.total_count),
        format_percentage(stats.percentage),
        format_number(stats.gap())
    )
}

fn log_breakdowns(logger: &mut ToolLogger, document: &CoverageDocument, top: usize) {
    for (name, report) in document.breakdowns.named() {
        logger.log(&format!("{name}: {}", stats_line(&report.stats)));
        for file in report.files.iter().take(top) {
            logger.log(&format!(
                "  {}: gap {} ({})",
                file.filename,
                format_number(file.stats.gap()),
                format_percentage(file.stats.percentage)
            ));
        }
        if report.files.len() > top {
            logger.log(&format!("  ... {} more", report.files.len() - top));
        }
        for file in &report.files {
            for incident in &file.incidents {
                logger.log_silent(&format!(
                    "  {name} {}:{}-{}: {} `{}`",
                    file.filename, incident.start, incident.end, incident.name, incident.text
                ));
            }
        }
    }
}

fn main() -> Result<()> {
    let args = CoverageArgs::parse();
    args.validate()?;

    let config = ToolConfig::new("typecov", args.base_dir()).with_logging(args.log);

    run_tool(config, |logger| {
        let program = SnapshotProgram::load(&args.snapshot)?;
        let document = compute_coverage(&program, args.coverage_file.is_some())?;
        logger.log(&format!("Identifiers: {}", stats_line(&document.stats)));

        if let Some(path) = &args.coverage_file {
            logger.log("");
            log_breakdowns(logger, &document, args.top);
            write_coverage_file(&document, path)?;
            logger.log(&format!("Wrote {}", path.display()));
        }

        let summary = format!(
            "Summary: {} of {} identifier types known, {} coverage",
            format_number(document.stats.known_count),
            format_number(document.stats.total_count),
            format_percentage(document.stats.percentage)
        );

        if let Some(threshold) = args.fail_under {
            if document.stats.percentage < threshold {
                logger.log(&summary);
                bail!(
                    "Coverage {} is below --fail-under {}",
                    format_percentage(document.stats.percentage),
                    format_percentage(threshold)
                );
            }
        }

        Ok(summary)
    })
}
