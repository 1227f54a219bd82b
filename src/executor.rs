// Copyright (C) Brian G. Milnes 2025

//! Executors and the orchestrator that runs them over a project
//!
//! Executors are passed in explicitly as an ordered list; there is no global
//! registry. Output order is executor registration order, then project file
//! order within each executor. Nothing is sorted by position.

pub mod executor {
    use rayon::prelude::*;
    use crate::diagnostic::diagnostic::Diagnostic;
    use crate::invert_if::invert_if::InvertIf;
    use crate::project::project::{FormatSettings, Project};
    use crate::source_unit::source_unit::SourceUnit;

    /// A rule that detects one structural pattern in a parsed file
    ///
    /// Implementations must be pure functions of their input: the same unit and
    /// settings always give the same diagnostics, in the same order.
    pub trait Executor: Send + Sync {
        /// Code stamped on every diagnostic this executor reports
        fn code(&self) -> &'static str;

        fn detect(&self, unit: &SourceUnit, settings: &FormatSettings) -> Vec<Diagnostic>;
    }

    /// The executors `nestless-review` runs
    pub fn default_executors() -> Vec<Box<dyn Executor>> {
        vec![Box::new(InvertIf::new())]
    }

    /// Run every executor against every parsed unit, sequentially
    pub fn execute(project: &Project, executors: &[Box<dyn Executor>]) -> Vec<Diagnostic> {
        let settings = project.settings();
        let mut diagnostics = Vec::new();

        for executor in executors {
            for unit in project.units() {
                if unit.tree().is_none() {
                    continue;
                }
                diagnostics.extend(executor.detect(unit, settings));
            }
        }

        diagnostics
    }

    /// Same result as `execute`, with files analyzed in parallel
    pub fn execute_parallel(project: &Project, executors: &[Box<dyn Executor>]) -> Vec<Diagnostic> {
        let settings = project.settings();
        let mut diagnostics = Vec::new();

        for executor in executors {
            let per_file: Vec<Vec<Diagnostic>> = project
                .units()
                .par_iter()
                .map(|unit| match unit.tree() {
                    Some(_) => executor.detect(unit, settings),
                    None => Vec::new(),
                })
                .collect();
            diagnostics.extend(per_file.into_iter().flatten());
        }

        diagnostics
    }
}
