// Copyright (C) Brian G. Milnes 2025

//! Nestless - syntax-tree based pattern review and fix tool for JavaScript/TypeScript
//!
//! Files are parsed with tree-sitter; executors look for structural patterns
//! and may attach a fix that is spliced back into the original text with its
//! indentation reconciled to the file's own style.

pub mod source_unit;
pub mod ast_utils;
pub mod project;
pub mod reindent;
pub mod printer;
pub mod diagnostic;
pub mod executor;
pub mod invert_if;
pub mod fixer;
pub mod args;
pub mod logging;
pub mod tool_runner;

// Re-export commonly used items
pub use source_unit::source_unit::{parse_source, Dialect, ParseError, SourceUnit};
pub use project::project::{find_source_files, ConfigError, FormatSettings, Project, ProjectConfig, ResolvedFormat};
pub use reindent::reindent::{anchor_base, detect_indent_style, detect_indentation, detect_line_indentation, reindent, reindent_with_style, IndentStyle, IndentationContext, ReindentError};
pub use printer::printer::{PrintError, Printer, QuoteStyle, Statement, PRINTER_TAB_SIZE};
pub use diagnostic::diagnostic::{Diagnostic, Fix, FixBuildError};
pub use executor::executor::{default_executors, execute, execute_parallel, Executor};
pub use invert_if::invert_if::InvertIf;
pub use fixer::fixer::{apply_fix, splice, ApplyFixError};
pub use args::args::{format_number, StandardArgs};

/// Run the default executors over a project
pub fn review(project: &Project) -> Vec<Diagnostic> {
    execute(project, &default_executors())
}
