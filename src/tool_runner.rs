// Copyright (C) Brian G. Milnes 2025

//! Tool runner shared by the nestless binaries
//!
//! Prints the directory context (for Emacs compile-mode), times the run, wires
//! up the logger and turns the tool's outcome into a process exit code.

pub mod tool_runner {
    use std::path::PathBuf;
    use std::time::Instant;
    use anyhow::Result;
    use crate::logging::logging::ToolLogger;

    /// Configuration for a tool run
    pub struct ToolConfig {
        pub tool_name: String,
        /// Directory shown in "Entering directory"
        pub base_dir: PathBuf,
        /// Mirror output to `logs/` under `base_dir`
        pub enable_logging: bool,
        /// Print the framing lines on stderr, leaving stdout to the tool
        pub status_on_stderr: bool,
    }

    impl ToolConfig {
        pub fn new(tool_name: &str, base_dir: PathBuf, enable_logging: bool) -> Self {
            ToolConfig {
                tool_name: tool_name.to_string(),
                base_dir,
                enable_logging,
                status_on_stderr: false,
            }
        }

        pub fn with_status_on_stderr(self, status_on_stderr: bool) -> Self {
            ToolConfig { status_on_stderr, ..self }
        }
    }

    /// What a tool reports back to the runner
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ToolOutcome {
        pub summary: String,
        /// Process exit code: 0 clean, 1 findings
        pub exit_code: i32,
    }

    impl ToolOutcome {
        pub fn clean(summary: impl Into<String>) -> Self {
            ToolOutcome { summary: summary.into(), exit_code: 0 }
        }

        pub fn findings(summary: impl Into<String>) -> Self {
            ToolOutcome { summary: summary.into(), exit_code: 1 }
        }
    }

    /// Run a tool with directory context, timing and optional logging
    ///
    /// Returns the exit code the binary should terminate with.
    pub fn run_tool<F>(config: ToolConfig, tool_fn: F) -> Result<i32>
    where
        F: FnOnce(&mut ToolLogger) -> Result<ToolOutcome>,
    {
        let start = Instant::now();

        let mut logger = if config.enable_logging {
            ToolLogger::new(&config.tool_name, &config.base_dir.join("logs"))
        } else {
            ToolLogger::new_disabled()
        };
        if config.status_on_stderr {
            logger = logger.with_status_on_stderr();
        }

        logger.status(&format!("Entering directory '{}'", config.base_dir.display()));
        logger.status("");

        let outcome = tool_fn(&mut logger)?;

        logger.status("");
        logger.status(&outcome.summary);
        logger.status(&format!("Completed in {}ms", start.elapsed().as_millis()));

        if logger.is_enabled() {
            logger.finalize(&outcome.summary);
        }

        Ok(outcome.exit_code)
    }
}
