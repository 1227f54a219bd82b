// Copyright (C) Brian G. Milnes 2025

//! Tests for fixer module

mod common;

use std::path::PathBuf;
use common::{expect_invert_if, project_with_file};
use nestless::{apply_fix, review, splice, ApplyFixError, Fix};

#[test]
fn test_apply_fix_is_independent_per_diagnostic() {
    let project = project_with_file(
        "function one() {\n  if (a) {\n    x();\n  }\n}\n\nfunction two() {\n  if (b) {\n    y();\n  }\n}\n",
    );
    let results = review(&project);
    assert_eq!(results.len(), 2);

    let first = apply_fix(&project, &results[0]).unwrap();
    let second = apply_fix(&project, &results[1]).unwrap();

    assert!(first.contains("if (!a) {"));
    assert!(first.contains("if (b) {"));
    assert!(second.contains("if (a) {"));
    assert!(second.contains("if (!b) {"));
    // The project text itself is untouched.
    assert!(project.units()[0].text().contains("if (a) {"));
}

#[test]
fn test_apply_fix_with_unicode_before_the_block() {
    let (project, diagnostic) = expect_invert_if(
        "function main() {\n  const s = 'héllo ✓';\n  if (a) {\n    x();\n  }\n}\n",
        Some((3, 43, 45)),
    );

    let fix = diagnostic.fix.as_ref().unwrap();
    assert_eq!((fix.start, fix.end), (16, 66));
    assert_eq!(
        apply_fix(&project, &diagnostic).unwrap(),
        "function main() {\n  const s = \"héllo ✓\";\n  if (!a) {\n    return;\n  }\n\n  x();\n}\n"
    );
}

#[test]
fn test_missing_fix_is_an_error() {
    let (project, mut diagnostic) = expect_invert_if("function f() {\n  if (a) {\n    x();\n  }\n}\n", None);
    diagnostic.fix = None;

    let error = apply_fix(&project, &diagnostic).unwrap_err();
    assert_eq!(
        error,
        ApplyFixError::MissingFix {
            path: PathBuf::from("/project/index.ts"),
            line: 2,
            code: "invert-if".to_string(),
        }
    );
}

#[test]
fn test_unknown_file_is_an_error() {
    let (project, mut diagnostic) = expect_invert_if("function f() {\n  if (a) {\n    x();\n  }\n}\n", None);
    diagnostic.file_path = PathBuf::from("/elsewhere/index.ts");

    assert_eq!(
        apply_fix(&project, &diagnostic),
        Err(ApplyFixError::UnknownFile(PathBuf::from("/elsewhere/index.ts")))
    );
}

#[test]
fn test_splice_replaces_char_span() {
    let fix = Fix { start: 2, end: 4, content: "XY".to_string() };
    assert_eq!(splice("ééééé", &fix).unwrap(), "ééXYé");

    let append = Fix { start: 3, end: 3, content: "!".to_string() };
    assert_eq!(splice("abc", &append).unwrap(), "abc!");
}

#[test]
fn test_splice_rejects_bad_spans() {
    let past_end = Fix { start: 1, end: 9, content: String::new() };
    assert_eq!(
        splice("abc", &past_end),
        Err(ApplyFixError::InvalidSpan { start: 1, end: 9, len: 3 })
    );

    let reversed = Fix { start: 2, end: 1, content: String::new() };
    assert!(matches!(splice("abc", &reversed), Err(ApplyFixError::InvalidSpan { .. })));
}
