// Copyright (C) Brian G. Milnes 2025

//! Projects: the ordered set of files one analysis pass runs over
//!
//! A project is built either programmatically (`add_source_file`) or from a
//! JSON configuration file:
//!
//! ```json
//! { "root": ".", "include": ["src"], "exclude": ["node_modules"],
//!   "extensions": ["ts", "js"], "tab_size": 2, "desired_tab_size": 2,
//!   "indent_style": "spaces", "detect_indentation": true }
//! ```
//!
//! Every field is optional. A relative `root` resolves against the directory
//! holding the configuration file.

pub mod project {
    use std::fs;
    use std::path::{Path, PathBuf};
    use serde::{Deserialize, Serialize};
    use thiserror::Error;
    use walkdir::WalkDir;
    use crate::reindent::reindent::{detect_indent_style, detect_indentation, IndentStyle};
    use crate::source_unit::source_unit::SourceUnit;

    #[derive(Debug, Error)]
    pub enum ConfigError {
        #[error("could not read {path}: {source}")]
        Read {
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },

        #[error("invalid configuration {path}: {source}")]
        Parse {
            path: PathBuf,
            #[source]
            source: serde_json::Error,
        },

        #[error("tab sizes must be positive")]
        ZeroTabSize,
    }

    /// Indentation settings shared by every file of a project
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct FormatSettings {
        /// Columns per nesting level in the source files
        pub tab_size: usize,
        /// Columns per nesting level in generated fixes
        pub desired_tab_size: usize,
        /// Spaces or tabs; with tabs both widths are one tab per level
        pub indent_style: IndentStyle,
        /// Measure style and widths from each file instead of using the values above
        pub detect_indentation: bool,
    }

    impl Default for FormatSettings {
        fn default() -> Self {
            FormatSettings {
                tab_size: 2,
                desired_tab_size: 2,
                indent_style: IndentStyle::Spaces,
                detect_indentation: true,
            }
        }
    }

    /// Indentation in effect for one file
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ResolvedFormat {
        pub tab_size: usize,
        pub desired_tab_size: usize,
        pub indent_style: IndentStyle,
        /// `"\r\n"` or `"\n"`, whichever the file uses
        pub line_ending: &'static str,
    }

    impl FormatSettings {
        /// Fixed widths, no detection
        pub fn fixed(tab_size: usize, desired_tab_size: usize) -> Self {
            FormatSettings {
                tab_size,
                desired_tab_size,
                indent_style: IndentStyle::Spaces,
                detect_indentation: false,
            }
        }

        /// Fixed tab indentation, no detection
        pub fn tabs() -> Self {
            FormatSettings {
                tab_size: 1,
                desired_tab_size: 1,
                indent_style: IndentStyle::Tabs,
                detect_indentation: false,
            }
        }

        pub fn resolve(&self, unit: &SourceUnit) -> ResolvedFormat {
            let line_ending = unit.line_ending();
            let style = if self.detect_indentation {
                detect_indent_style(unit.text()).unwrap_or(self.indent_style)
            } else {
                self.indent_style
            };

            if style == IndentStyle::Tabs {
                return ResolvedFormat {
                    tab_size: 1,
                    desired_tab_size: 1,
                    indent_style: style,
                    line_ending,
                };
            }

            let detected = self
                .detect_indentation
                .then(|| detect_indentation(unit.text()))
                .flatten();

            match detected {
                Some(width) => ResolvedFormat {
                    tab_size: width,
                    desired_tab_size: width,
                    indent_style: style,
                    line_ending,
                },
                None => ResolvedFormat {
                    tab_size: self.tab_size,
                    desired_tab_size: self.desired_tab_size,
                    indent_style: style,
                    line_ending,
                },
            }
        }
    }

    /// Contents of a project configuration file
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct ProjectConfig {
        pub root: PathBuf,
        /// Directories or files under `root` to analyze; empty means all of `root`
        pub include: Vec<PathBuf>,
        /// Path components that exclude a file when present anywhere in its path
        pub exclude: Vec<String>,
        pub extensions: Vec<String>,
        #[serde(flatten)]
        pub format: FormatSettings,
    }

    impl Default for ProjectConfig {
        fn default() -> Self {
            ProjectConfig {
                root: PathBuf::from("."),
                include: Vec::new(),
                exclude: ["node_modules", ".git", "dist", "build"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                extensions: ["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                format: FormatSettings::default(),
            }
        }
    }

    impl ProjectConfig {
        pub fn load(path: &Path) -> Result<Self, ConfigError> {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            let config: ProjectConfig =
                serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
            if config.format.tab_size == 0 || config.format.desired_tab_size == 0 {
                return Err(ConfigError::ZeroTabSize);
            }
            Ok(config)
        }
    }

    /// Find source files under `paths`, sorted per directory for a stable order
    pub fn find_source_files(paths: &[PathBuf], extensions: &[String], exclude: &[String]) -> Vec<PathBuf> {
        let wanted = |path: &Path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.iter().any(|e| e == ext))
        };
        let excluded = |path: &Path| {
            path.components().any(|component| {
                let name = component.as_os_str().to_string_lossy();
                exclude.iter().any(|e| *e == name)
            })
        };

        let mut files = Vec::new();
        for path in paths {
            if path.is_file() {
                if wanted(path) {
                    files.push(path.clone());
                }
                continue;
            }
            for entry in WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| !excluded(e.path().strip_prefix(path).unwrap_or(e.path())))
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file() && wanted(entry.path()) {
                    files.push(entry.path().to_path_buf());
                }
            }
        }
        files
    }

    /// Ordered collection of source units plus formatting settings
    #[derive(Debug)]
    pub struct Project {
        root: PathBuf,
        settings: FormatSettings,
        units: Vec<SourceUnit>,
    }

    impl Project {
        pub fn new(root: impl Into<PathBuf>, settings: FormatSettings) -> Self {
            Project {
                root: root.into(),
                settings,
                units: Vec::new(),
            }
        }

        /// Build a project from a configuration file, reading every matching file
        pub fn from_config_file(path: &Path) -> Result<Self, ConfigError> {
            let config = ProjectConfig::load(path)?;
            let base_dir = path.parent().unwrap_or(Path::new("."));
            Project::from_config(&config, base_dir)
        }

        pub fn from_config(config: &ProjectConfig, base_dir: &Path) -> Result<Self, ConfigError> {
            let root = if config.root.is_absolute() {
                config.root.clone()
            } else {
                base_dir.join(&config.root)
            };

            let search: Vec<PathBuf> = if config.include.is_empty() {
                vec![root.clone()]
            } else {
                config.include.iter().map(|p| root.join(p)).collect()
            };

            let mut project = Project::new(root, config.format);
            for file in find_source_files(&search, &config.extensions, &config.exclude) {
                project.add_file(&file)?;
            }
            Ok(project)
        }

        /// Add in-memory content as `root/relative_path`
        pub fn add_source_file(&mut self, relative_path: impl AsRef<Path>, text: impl Into<String>) -> &SourceUnit {
            let relative_path = relative_path.as_ref();
            let path = self.root.join(relative_path);
            let relative = relative_path.to_string_lossy().replace('\\', "/");
            self.push(SourceUnit::new(path, relative, text))
        }

        /// Read a file from disk and add it
        pub fn add_file(&mut self, path: &Path) -> Result<&SourceUnit, ConfigError> {
            let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            let relative = path
                .strip_prefix(&self.root)
                .unwrap_or(path)
                .to_string_lossy()
                .replace('\\', "/");
            Ok(self.push(SourceUnit::new(path.to_path_buf(), relative, text)))
        }

        fn push(&mut self, unit: SourceUnit) -> &SourceUnit {
            self.units.push(unit);
            &self.units[self.units.len() - 1]
        }

        pub fn root(&self) -> &Path {
            &self.root
        }

        pub fn settings(&self) -> &FormatSettings {
            &self.settings
        }

        pub fn set_settings(&mut self, settings: FormatSettings) {
            self.settings = settings;
        }

        /// Units in insertion order
        pub fn units(&self) -> &[SourceUnit] {
            &self.units
        }

        pub fn unit(&self, path: &Path) -> Option<&SourceUnit> {
            self.units.iter().find(|unit| unit.path() == path)
        }

        /// Units that failed to parse and therefore report nothing
        pub fn unparsed(&self) -> impl Iterator<Item = &SourceUnit> {
            self.units.iter().filter(|unit| unit.parse_error().is_some())
        }
    }
}
