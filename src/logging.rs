// Copyright (C) Brian G. Milnes 2025

//! Logging for nestless tools
//!
//! Output always goes to stdout (warnings to stderr). With logging enabled it is
//! mirrored to `logs/<tool-name>/<YYYY-MM-DD>/run-<HH-MM-SS>.log`, so repeated
//! runs on one day each keep their own file.

pub mod logging {
    use std::fs;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use anyhow::Result;
    use chrono::{DateTime, Local};

    pub struct ToolLogger {
        log_file: Option<fs::File>,
        log_path: Option<PathBuf>,
        start_time: DateTime<Local>,
        /// Send `status` lines to stderr so stdout carries only tool output
        status_to_stderr: bool,
    }

    impl ToolLogger {
        /// Console-only logger
        pub fn new_disabled() -> Self {
            ToolLogger {
                log_file: None,
                log_path: None,
                start_time: Local::now(),
                status_to_stderr: false,
            }
        }

        /// Logger mirrored under `logs_dir`
        ///
        /// If the file cannot be created the logger degrades to console only.
        pub fn new(tool_name: &str, logs_dir: &Path) -> Self {
            let start_time = Local::now();

            match Self::create_log_file(logs_dir, tool_name, &start_time) {
                Ok((file, path)) => ToolLogger {
                    log_file: Some(file),
                    log_path: Some(path),
                    start_time,
                    status_to_stderr: false,
                },
                Err(e) => {
                    eprintln!("Warning: Could not create log file: {e}");
                    ToolLogger {
                        log_file: None,
                        log_path: None,
                        start_time,
                        status_to_stderr: false,
                    }
                }
            }
        }

        fn create_log_file(
            logs_dir: &Path,
            tool_name: &str,
            start_time: &DateTime<Local>,
        ) -> Result<(fs::File, PathBuf)> {
            let log_dir = logs_dir
                .join(tool_name)
                .join(start_time.format("%Y-%m-%d").to_string());
            fs::create_dir_all(&log_dir)?;

            let log_path = log_dir.join(format!("run-{}.log", start_time.format("%H-%M-%S")));
            let log_file = fs::File::create(&log_path)?;
            Ok((log_file, log_path))
        }

        fn write_file(&mut self, message: &str) {
            if let Some(ref mut file) = self.log_file {
                let _ = writeln!(file, "{message}");
            }
        }

        /// stdout + log file
        pub fn log(&mut self, message: &str) {
            println!("{message}");
            self.write_file(message);
        }

        /// Exactly `text` on stdout, no newline added; for emitting file contents
        pub fn log_raw(&mut self, text: &str) {
            print!("{text}");
            let _ = std::io::stdout().flush();
            self.write_file(text);
        }

        /// Framing around the tool's output: headers, summaries, timing
        pub fn status(&mut self, message: &str) {
            if self.status_to_stderr {
                eprintln!("{message}");
                self.write_file(message);
            } else {
                self.log(message);
            }
        }

        pub fn with_status_on_stderr(mut self) -> Self {
            self.status_to_stderr = true;
            self
        }

        /// stderr + log file
        pub fn warn(&mut self, message: &str) {
            eprintln!("Warning: {message}");
            self.write_file(&format!("Warning: {message}"));
        }

        pub fn log_path(&self) -> Option<&Path> {
            self.log_path.as_deref()
        }

        pub fn is_enabled(&self) -> bool {
            self.log_file.is_some()
        }

        /// Write the run summary to the log file
        pub fn finalize(&mut self, summary: &str) {
            let end_time = Local::now();
            let duration = end_time.signed_duration_since(self.start_time);

            self.write_file("");
            self.write_file("=== Run Summary ===");
            self.write_file(summary);
            self.write_file(&format!("Started: {}", self.start_time.format("%Y-%m-%d %H:%M:%S")));
            self.write_file(&format!("Ended: {}", end_time.format("%Y-%m-%d %H:%M:%S")));
            self.write_file(&format!("Duration: {}ms", duration.num_milliseconds()));

            if let Some(path) = self.log_path.clone() {
                self.status(&format!("Log saved to: {}", path.display()));
            }
        }
    }

    impl Drop for ToolLogger {
        fn drop(&mut self) {
            if let Some(ref mut file) = self.log_file {
                let _ = file.flush();
            }
        }
    }
}
