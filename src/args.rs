// Copyright (C) Brian G. Milnes 2025

//! Command line arguments shared by the typecov tools

pub mod args {
    use std::path::{Path, PathBuf};
    use anyhow::{bail, Result};
    use clap::Parser;

    /// Compute type coverage for a program snapshot
    #[derive(Debug, Clone, Parser)]
    #[command(name = "typecov", version, about)]
    pub struct CoverageArgs {
        /// Program snapshot JSON exported by the type checker
        #[arg(value_name = "SNAPSHOT")]
        pub snapshot: PathBuf,

        /// Write the full coverage document (with incidents) to this path
        #[arg(short = 'o', long = "coverage-file", value_name = "PATH")]
        pub coverage_file: Option<PathBuf>,

        /// Worst files to print per breakdown when a coverage file is written
        #[arg(long, default_value_t = 10)]
        pub top: usize,

        /// Also log to logs/typecov/<date>/run-<time>.log
        #[arg(long)]
        pub log: bool,

        /// Fail when overall coverage is below this percentage
        #[arg(long, value_name = "PERCENT")]
        pub fail_under: Option<f64>,
    }

    impl CoverageArgs {
        /// Reject values clap cannot check on its own
        pub fn validate(&self) -> Result<()> {
            if let Some(threshold) = self.fail_under {
                if !(0.0..=100.0).contains(&threshold) {
                    bail!("--fail-under must be between 0 and 100, got {threshold}");
                }
            }
            Ok(())
        }

        /// Directory reported as the run context: the snapshot's parent
        pub fn base_dir(&self) -> PathBuf {
            match self.snapshot.parent() {
                Some(parent) if parent != Path::new("") => parent.to_path_buf(),
                _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            }
        }
    }

    /// Format a count with thousands separators: 1234567 -> "1,234,567"
    pub fn format_number(n: u64) -> String {
        let digits = n.to_string();
        let mut result = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }
        result
    }

    /// Format a percentage with two decimals: 87.5 -> "87.50%"
    pub fn format_percentage(percentage: f64) -> String {
        format!("{percentage:.2}%")
    }
}
