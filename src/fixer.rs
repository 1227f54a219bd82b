// Copyright (C) Brian G. Milnes 2025

//! Fixer module for applying a diagnostic's fix to its file
//!
//! Fixes are always spliced into the pristine text of the unit. Applying two
//! fixes from the same file gives two independent results, never a combined
//! one; callers that want several must re-run detection after each.

pub mod fixer {
    use std::path::PathBuf;
    use thiserror::Error;
    use crate::diagnostic::diagnostic::{Diagnostic, Fix};
    use crate::project::project::Project;

    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    pub enum ApplyFixError {
        #[error("{path}:{line}: [{code}] diagnostic carries no fix")]
        MissingFix { path: PathBuf, line: usize, code: String },

        #[error("{0} is not part of the project")]
        UnknownFile(PathBuf),

        #[error("fix span {start}..{end} is outside the text ({len} chars)")]
        InvalidSpan { start: usize, end: usize, len: usize },
    }

    /// Full text of the diagnostic's file with its fix applied
    pub fn apply_fix(project: &Project, diagnostic: &Diagnostic) -> Result<String, ApplyFixError> {
        let fix = diagnostic.fix.as_ref().ok_or_else(|| ApplyFixError::MissingFix {
            path: diagnostic.file_path.clone(),
            line: diagnostic.line,
            code: diagnostic.code.clone(),
        })?;

        let unit = project
            .unit(&diagnostic.file_path)
            .ok_or_else(|| ApplyFixError::UnknownFile(diagnostic.file_path.clone()))?;

        splice(unit.text(), fix)
    }

    /// `text[..start] + content + text[end..]`, offsets in chars
    pub fn splice(text: &str, fix: &Fix) -> Result<String, ApplyFixError> {
        let len = text.chars().count();
        if fix.start > fix.end || fix.end > len {
            return Err(ApplyFixError::InvalidSpan {
                start: fix.start,
                end: fix.end,
                len,
            });
        }

        let byte_at = |offset: usize| {
            text.char_indices()
                .nth(offset)
                .map(|(byte, _)| byte)
                .unwrap_or(text.len())
        };
        let start = byte_at(fix.start);
        let end = byte_at(fix.end);

        let mut result = String::with_capacity(text.len() - (end - start) + fix.content.len());
        result.push_str(&text[..start]);
        result.push_str(&fix.content);
        result.push_str(&text[end..]);
        Ok(result)
    }
}
