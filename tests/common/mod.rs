// Copyright (C) Brian G. Milnes 2025

//! Common test utilities for integration tests

#![allow(dead_code)]

use anyhow::{Context, Result};
use nestless::{review, Diagnostic, FormatSettings, Project};

pub const PROJECT_ROOT: &str = "/project";

/// Project holding a single `index.ts` with default settings
pub fn project_with_file(code: &str) -> Project {
    project_with_settings(code, FormatSettings::default())
}

pub fn project_with_settings(code: &str, settings: FormatSettings) -> Project {
    let mut project = Project::new(PROJECT_ROOT, settings);
    project.add_source_file("index.ts", code);
    project
}

/// Assert exactly one invert-if diagnostic, optionally at (line, start, end)
pub fn expect_invert_if(code: &str, cursors: Option<(usize, usize, usize)>) -> (Project, Diagnostic) {
    let project = project_with_file(code);
    let results = review(&project);

    assert_eq!(results.len(), 1, "expected one diagnostic, got {results:#?}");
    let diagnostic = results[0].clone();
    assert_eq!(diagnostic.code, "invert-if");
    assert_eq!(diagnostic.message, "Invert if statement to reduce nesting.");
    assert!(diagnostic.file_path.ends_with("index.ts"));
    assert_eq!(diagnostic.relative_file_path, "index.ts");

    if let Some((line, start, end)) = cursors {
        assert_eq!(diagnostic.line, line);
        assert_eq!(diagnostic.start, start);
        assert_eq!(diagnostic.end, end);
    }

    (project, diagnostic)
}

pub fn expect_no_invert_if(code: &str) {
    let project = project_with_file(code);
    let results = review(&project);
    assert!(results.is_empty(), "expected no diagnostics, got {results:#?}");
}

/// Parse a number with possible commas (e.g., "1,234" -> 1234)
pub fn parse_number(s: &str) -> Result<usize> {
    let cleaned = s.replace(',', "");
    cleaned
        .parse::<usize>()
        .context(format!("Failed to parse number: {s}"))
}
