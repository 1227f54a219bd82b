// Copyright (C) Brian G. Milnes 2025

//! Fix: apply one diagnostic's fix to a file
//!
//! Binary: nestless-fix
//!
//! Fixes are computed against the file as it is on disk; to apply several,
//! run the tool again after each one. Without `--in-place` stdout carries
//! only the fixed file, so `nestless-fix -f a.ts > b.ts` works.

use anyhow::{bail, Result};
use clap::Parser;
use nestless::tool_runner::tool_runner::{run_tool, ToolConfig, ToolOutcome};
use nestless::{apply_fix, review, StandardArgs};

#[derive(Debug, Parser)]
#[command(name = "nestless-fix", version, about = "Apply a fix reported by nestless-review")]
struct Cli {
    #[command(flatten)]
    standard: StandardArgs,

    /// Which diagnostic of the file to fix, in report order
    #[arg(short = 'n', long, default_value_t = 0)]
    index: usize,

    /// Write the result back instead of printing it
    #[arg(short = 'i', long)]
    in_place: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let Some(target) = cli.standard.files.first().cloned() else {
        bail!("nestless-fix needs the file to fix: -f <file>");
    };
    let config = ToolConfig::new("nestless-fix", cli.standard.base_dir(), cli.standard.log)
        .with_status_on_stderr(!cli.in_place);

    let exit_code = run_tool(config, |logger| {
        let project = cli.standard.load_project()?;
        let diagnostics: Vec<_> = review(&project)
            .into_iter()
            .filter(|d| d.file_path == target)
            .collect();

        let Some(diagnostic) = diagnostics.get(cli.index) else {
            return Ok(ToolOutcome::clean(format!(
                "Summary: {} has {} diagnostic(s), nothing to fix at index {}",
                target.display(),
                diagnostics.len(),
                cli.index
            )));
        };

        let fixed = apply_fix(&project, diagnostic)?;
        if cli.in_place {
            std::fs::write(&target, &fixed)?;
            logger.log(&format!("Fixed and saved to {}", target.display()));
        } else {
            logger.log_raw(&fixed);
        }

        Ok(ToolOutcome::clean(format!("Summary: applied {diagnostic}")))
    })?;

    std::process::exit(exit_code);
}
