// Copyright (C) Brian G. Milnes 2025

//! Diagnostics and fixes reported by executors

pub mod diagnostic {
    use std::fmt;
    use std::path::PathBuf;
    use serde::{Deserialize, Serialize};
    use thiserror::Error;
    use crate::printer::printer::PrintError;
    use crate::reindent::reindent::ReindentError;
    use crate::source_unit::source_unit::SourceUnit;

    /// Replacement of the char span `[start, end)` of the original text
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Fix {
        pub start: usize,
        pub end: usize,
        pub content: String,
    }

    /// One pattern match
    ///
    /// `start`/`end` are char offsets of the flagged span, not of the fix.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Diagnostic {
        pub code: String,
        pub message: String,
        pub file_path: PathBuf,
        pub relative_file_path: String,
        pub line: usize,
        pub start: usize,
        pub end: usize,
        pub fix: Option<Fix>,
    }

    impl Diagnostic {
        /// Diagnostic for the char span `[start, end)` of `unit`, without a fix
        pub fn new(
            unit: &SourceUnit,
            code: &str,
            message: &str,
            line: usize,
            start: usize,
            end: usize,
        ) -> Self {
            Diagnostic {
                code: code.to_string(),
                message: message.to_string(),
                file_path: unit.path().to_path_buf(),
                relative_file_path: unit.relative_path().to_string(),
                line,
                start,
                end,
                fix: None,
            }
        }

        pub fn with_fix(mut self, fix: Option<Fix>) -> Self {
            self.fix = fix;
            self
        }

        pub fn has_fix(&self) -> bool {
            self.fix.is_some()
        }
    }

    impl fmt::Display for Diagnostic {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(
                f,
                "{}:{}: [{}] {}",
                self.relative_file_path, self.line, self.code, self.message
            )
        }
    }

    /// Why an executor could not attach a fix to a diagnostic
    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    pub enum FixBuildError {
        #[error(transparent)]
        Print(#[from] PrintError),

        #[error(transparent)]
        Reindent(#[from] ReindentError),
    }
}
