// Copyright (C) Brian G. Milnes 2025

//! Command line arguments shared by the nestless binaries

pub mod args {
    use std::path::PathBuf;
    use anyhow::{bail, Context, Result};
    use clap::Args;
    use crate::project::project::{find_source_files, FormatSettings, Project, ProjectConfig};

    /// Which files to analyze and how they are indented
    #[derive(Debug, Clone, Default, Args)]
    pub struct StandardArgs {
        /// Project configuration file (JSON)
        #[arg(short = 'c', long)]
        pub config: Option<PathBuf>,

        /// Directory to scan (repeatable)
        #[arg(short = 'd', long = "dir")]
        pub dirs: Vec<PathBuf>,

        /// Single file to analyze (repeatable)
        #[arg(short = 'f', long = "file")]
        pub files: Vec<PathBuf>,

        /// Columns per level in the source files; disables detection
        #[arg(long)]
        pub tab_size: Option<usize>,

        /// Columns per level in generated fixes; disables detection
        #[arg(long)]
        pub desired_tab_size: Option<usize>,

        /// Source files and fixes indent with tabs; disables detection
        #[arg(long)]
        pub tabs: bool,

        /// Mirror output to logs/<tool>/<date>/
        #[arg(long)]
        pub log: bool,
    }

    impl StandardArgs {
        /// Directory holding the configuration file, or the current directory
        pub fn base_dir(&self) -> PathBuf {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            match self.config.as_ref().and_then(|c| c.parent()) {
                Some(parent) if !parent.as_os_str().is_empty() => cwd.join(parent),
                _ => cwd,
            }
        }

        fn format_settings(&self, configured: FormatSettings) -> Result<FormatSettings> {
            if self.tab_size == Some(0) || self.desired_tab_size == Some(0) {
                bail!("tab sizes must be positive");
            }
            if self.tabs {
                return Ok(FormatSettings::tabs());
            }
            if self.tab_size.is_none() && self.desired_tab_size.is_none() {
                return Ok(configured);
            }
            let tab_size = self.tab_size.unwrap_or(configured.tab_size);
            Ok(FormatSettings::fixed(tab_size, self.desired_tab_size.unwrap_or(tab_size)))
        }

        /// Build the project these arguments describe
        ///
        /// With a configuration file its file set comes first, then `-d`/`-f`
        /// additions. Without any of them the current directory is scanned.
        pub fn load_project(&self) -> Result<Project> {
            let defaults = ProjectConfig::default();
            let base_dir = self.base_dir();

            let mut project = match &self.config {
                Some(path) => Project::from_config_file(path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => Project::new(base_dir.clone(), defaults.format),
            };
            project.set_settings(self.format_settings(*project.settings())?);

            let mut search = self.dirs.clone();
            if self.config.is_none() && self.dirs.is_empty() && self.files.is_empty() {
                search.push(base_dir);
            }

            let discovered = find_source_files(&search, &defaults.extensions, &defaults.exclude);
            for file in discovered.iter().chain(self.files.iter()) {
                if project.unit(file).is_some() {
                    continue;
                }
                project
                    .add_file(file)
                    .with_context(|| format!("reading {}", file.display()))?;
            }

            Ok(project)
        }
    }

    /// Format a number with thousands separators
    pub fn format_number(n: usize) -> String {
        let digits = n.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        out
    }
}
