// Copyright (C) Brian G. Milnes 2025

//! Tool runner for typecov binaries
//!
//! Wraps a tool body with the directory context line, timing, and the run
//! logger's lifecycle.

pub mod tool_runner {
    use std::path::PathBuf;
    use std::time::Instant;
    use anyhow::Result;
    use crate::logging::logging::ToolLogger;

    /// Configuration for a tool run
    pub struct ToolConfig {
        /// Name of the tool (for the log directory)
        pub tool_name: String,
        /// Directory shown in "Entering directory"
        pub base_dir: PathBuf,
        /// Whether to write a run log file
        pub enable_logging: bool,
        /// Where run log directories are created
        pub logs_root: PathBuf,
    }

    impl ToolConfig {
        pub fn new(tool_name: &str, base_dir: PathBuf) -> Self {
            ToolConfig {
                tool_name: tool_name.to_string(),
                base_dir,
                enable_logging: false,
                logs_root: PathBuf::from("logs"),
            }
        }

        pub fn with_logging(mut self, enable_logging: bool) -> Self {
            self.enable_logging = enable_logging;
            self
        }
    }

    /// Run a tool body; it returns the summary line printed at the end
    ///
    /// A failing body still gets its timing line, then the error is returned.
    pub fn run_tool<F>(config: ToolConfig, tool_fn: F) -> Result<()>
    where
        F: FnOnce(&mut ToolLogger) -> Result<String>,
    {
        let start = Instant::now();

        println!("Entering directory '{}'", config.base_dir.display());
        println!();

        let mut logger = if config.enable_logging {
            ToolLogger::new(&config.tool_name, &config.logs_root)
        } else {
            ToolLogger::new_disabled()
        };

        let outcome = tool_fn(&mut logger);
        let summary = match &outcome {
            Ok(summary) => summary.clone(),
            Err(e) => format!("Failed: {e:#}"),
        };

        println!();
        logger.log(&summary);
        println!("Completed in {}ms", start.elapsed().as_millis());

        if config.enable_logging {
            logger.finalize(&summary);
        }

        outcome.map(|_| ())
    }
}
