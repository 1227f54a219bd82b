// Copyright (C) Brian G. Milnes 2025

//! Review: report patterns the executors find
//!
//! Binary: nestless-review
//!
//! Output lines are `relative/path:line: [code] message` so Emacs compile-mode
//! can jump to them. Exit code 1 when anything was found.

use std::collections::HashSet;
use anyhow::Result;
use clap::Parser;
use nestless::tool_runner::tool_runner::{run_tool, ToolConfig, ToolOutcome};
use nestless::{format_number, review, StandardArgs};

#[derive(Debug, Parser)]
#[command(name = "nestless-review", version, about = "Report nesting that can be flattened")]
struct Cli {
    #[command(flatten)]
    standard: StandardArgs,

    /// Print diagnostics as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ToolConfig::new("nestless-review", cli.standard.base_dir(), cli.standard.log);

    let exit_code = run_tool(config, |logger| {
        let project = cli.standard.load_project()?;
        for unit in project.unparsed() {
            if let Some(error) = unit.parse_error() {
                logger.warn(&format!("Skipping {error}"));
            }
        }

        let diagnostics = review(&project);

        if cli.json {
            logger.log(&serde_json::to_string_pretty(&diagnostics)?);
        } else if diagnostics.is_empty() {
            logger.log("✓ No issues found");
        } else {
            logger.log(&format!("✗ Found {} issue(s):", format_number(diagnostics.len())));
            logger.log("");
            for diagnostic in &diagnostics {
                let suffix = if diagnostic.has_fix() { " (fix available)" } else { "" };
                logger.log(&format!("{diagnostic}{suffix}"));
            }
        }

        let files_with_issues: HashSet<_> = diagnostics.iter().map(|d| &d.file_path).collect();
        let summary = format!(
            "Summary: {} files checked, {} files with issues, {} total issues",
            format_number(project.units().len()),
            format_number(files_with_issues.len()),
            format_number(diagnostics.len())
        );

        Ok(if diagnostics.is_empty() {
            ToolOutcome::clean(summary)
        } else {
            ToolOutcome::findings(summary)
        })
    })?;

    std::process::exit(exit_code);
}
