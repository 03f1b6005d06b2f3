// Copyright (C) Brian G. Milnes 2025

//! Run logs for typecov tools
//!
//! Messages always go to stdout. With logging enabled they are also appended to
//! logs/<tool-name>/<date>/run-<timestamp>.log, one file per run.

pub mod logging {
    use std::fs;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use chrono::{DateTime, Local};
    use anyhow::{Context, Result};

    /// The file one run appends to
    struct RunLog {
        file: fs::File,
        path: PathBuf,
    }

    impl RunLog {
        fn create(tool_name: &str, logs_root: &Path, started: &DateTime<Local>) -> Result<Self> {
            let dir = logs_root
                .join(tool_name)
                .join(started.format("%Y-%m-%d").to_string());
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;

            let path = dir.join(format!("run-{}.log", started.format("%H-%M-%S")));
            let file = fs::File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Ok(RunLog { file, path })
        }
    }

    /// Stdout logger with an optional run log file
    pub struct ToolLogger {
        run_log: Option<RunLog>,
        started: DateTime<Local>,
    }

    impl ToolLogger {
        /// Logger that only prints
        pub fn new_disabled() -> Self {
            ToolLogger {
                run_log: None,
                started: Local::now(),
            }
        }

        /// Logger writing under `logs_root`/<tool-name>/<YYYY-MM-DD>/run-<HH-MM-SS>.log
        ///
        /// If the file cannot be created the logger warns and only prints.
        pub fn new(tool_name: &str, logs_root: &Path) -> Self {
            let started = Local::now();
            let run_log = RunLog::create(tool_name, logs_root, &started)
                .map_err(|e| eprintln!("Warning: run log disabled: {e:#}"))
                .ok();
            ToolLogger { run_log, started }
        }

        /// Print and, if enabled, append to the log file
        pub fn log(&mut self, message: &str) {
            println!("{message}");
            self.log_silent(message);
        }

        /// Append to the log file only
        pub fn log_silent(&mut self, message: &str) {
            if let Some(run_log) = self.run_log.as_mut() {
                let _ = writeln!(run_log.file, "{message}");
            }
        }

        /// Close the run with a summary block
        pub fn finalize(&mut self, summary: &str) {
            let ended = Local::now();
            let elapsed = ended.signed_duration_since(self.started);

            for line in [
                String::new(),
                "=== Run Summary ===".to_string(),
                summary.to_string(),
                format!("Started: {}", self.started.format("%Y-%m-%d %H:%M:%S")),
                format!("Ended: {}", ended.format("%Y-%m-%d %H:%M:%S")),
                format!("Duration: {}ms", elapsed.num_milliseconds()),
            ] {
                self.log_silent(&line);
            }

            if let Some(path) = self.run_log.as_ref().map(|run_log| run_log.path.clone()) {
                self.log(&format!("Log saved to: {}", path.display()));
            }
        }
    }
}
