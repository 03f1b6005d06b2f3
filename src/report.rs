// Copyright (C) Brian G. Milnes 2025

//! Coverage statistics and reports
//!
//! - `Stats`: known vs total counts, with a percentage fixed by `finalize`
//! - `Incident`: one located unknown-type occurrence
//! - `FileReport`: stats and incidents for one file in one breakdown
//! - `Report`: stats summed over all files plus the files that had incidents

pub mod report {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Stats {
        pub known_count: u64,
        pub total_count: u64,
        /// Only meaningful after `finalize`
        pub percentage: f64,
    }

    impl Stats {
        pub fn new() -> Self {
            Stats {
                known_count: 0,
                total_count: 0,
                percentage: 100.0,
            }
        }

        /// Count one position, known or not
        pub fn record(&mut self, known: bool) {
            self.total_count += 1;
            if known {
                self.known_count += 1;
            }
        }

        /// Fold another record's counts into this one
        pub fn absorb(&mut self, other: &Stats) {
            self.total_count += other.total_count;
            self.known_count += other.known_count;
        }

        /// Unresolved positions
        pub fn gap(&self) -> u64 {
            self.total_count - self.known_count
        }

        pub fn finalize(&mut self) {
            self.percentage = if self.total_count == 0 {
                100.0
            } else {
                100.0 * self.known_count as f64 / self.total_count as f64
            };
        }
    }

    impl Default for Stats {
        fn default() -> Self {
            Self::new()
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Incident {
        pub name: String,
        pub start: u32,
        pub end: u32,
        pub text: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct FileReport {
        pub filename: String,
        pub stats: Stats,
        pub incidents: Vec<Incident>,
    }

    impl FileReport {
        pub fn new(filename: &str) -> Self {
            FileReport {
                filename: filename.to_string(),
                stats: Stats::new(),
                incidents: Vec::new(),
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    pub struct Report {
        pub stats: Stats,
        pub files: Vec<FileReport>,
    }

    impl Report {
        pub fn new() -> Self {
            Self::default()
        }
    }

    /// Fold a finished file into its breakdown
    ///
    /// The file's counts always reach the breakdown stats; the file itself is
    /// listed only when it produced at least one incident.
    pub fn finalize_file(report: &mut Report, per_file: Option<FileReport>) {
        let Some(mut per_file) = per_file else {
            return;
        };
        per_file.stats.finalize();
        report.stats.absorb(&per_file.stats);
        if !per_file.incidents.is_empty() {
            report.files.push(per_file);
        }
    }

    /// Fix the breakdown percentage and rank files worst gap first
    pub fn finalize_report(report: &mut Report) {
        report.stats.finalize();
        // sort_by is stable: equal gaps keep traversal order
        report.files.sort_by(|a, b| b.stats.gap().cmp(&a.stats.gap()));
    }
}
