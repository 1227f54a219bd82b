// Copyright (C) Brian G. Milnes 2025

//! Reindentation of printer output
//!
//! The printer nests lines in multiples of its own tab width, which has nothing
//! to do with the file a fix is spliced into. `reindent` rescales every line to
//! the file's tab width and anchors the result at the insertion point.
//!
//! Getting this wrong corrupts user files silently, so every inconsistency in
//! the input is an error rather than a best guess.

pub mod reindent {
    use std::collections::BTreeMap;
    use regex::Regex;
    use serde::{Deserialize, Serialize};
    use thiserror::Error;

    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    pub enum ReindentError {
        #[error("tab size must be positive (input {input}, desired {desired})")]
        ZeroTabSize { input: usize, desired: usize },

        #[error("printer output has no reference line to measure indentation from")]
        MissingReferenceLine,

        #[error("line {line} would need negative indentation ({adjusted})")]
        NegativeIndentation { line: usize, adjusted: isize },

        #[error("invalid blank-line pattern: {0}")]
        Pattern(String),
    }

    /// Character that makes up one indentation column of a file
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum IndentStyle {
        #[default]
        Spaces,
        /// One `\t` per level; tab sizes are then counted in tab characters
        Tabs,
    }

    /// Parameters of one reindentation, recomputed per fix
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct IndentationContext {
        pub base_indentation: usize,
        pub input_tab_size: usize,
        pub desired_tab_size: usize,
        pub trim_first_line: bool,
        pub indent_style: IndentStyle,
    }

    impl IndentationContext {
        pub fn apply(&self, output: &str) -> Result<String, ReindentError> {
            reindent_with_style(
                output,
                self.base_indentation,
                self.input_tab_size,
                self.desired_tab_size,
                self.trim_first_line,
                self.indent_style,
            )
        }
    }

    /// Lines that carry no indentation information: blank lines and comment
    /// bodies (` * ` continuation lines sit one column off the code grid).
    fn is_measurable(line: &str) -> bool {
        let trimmed = line.trim_start();
        !(trimmed.is_empty()
            || trimmed.starts_with("//")
            || trimmed.starts_with("/*")
            || trimmed.starts_with('*'))
    }

    /// Count of leading whitespace chars
    pub fn detect_line_indentation(line: &str) -> usize {
        line.chars().take_while(|c| c.is_whitespace()).count()
    }

    /// Most frequent positive indentation step between consecutive code lines
    ///
    /// Blank and comment lines are skipped. Ties go to the smaller step.
    /// `None` when the text never indents.
    pub fn detect_indentation(text: &str) -> Option<usize> {
        let mut steps: BTreeMap<usize, usize> = BTreeMap::new();
        let mut previous = 0;

        for line in text.lines().filter(|line| is_measurable(line)) {
            let indentation = detect_line_indentation(line);
            if indentation > previous {
                *steps.entry(indentation - previous).or_insert(0) += 1;
            }
            previous = indentation;
        }

        steps
            .into_iter()
            .max_by(|(a_step, a_count), (b_step, b_count)| {
                a_count.cmp(b_count).then(b_step.cmp(a_step))
            })
            .map(|(step, _)| step)
    }

    /// Whether indented code lines mostly start with a tab or a space
    ///
    /// `None` when no code line is indented.
    pub fn detect_indent_style(text: &str) -> Option<IndentStyle> {
        let (mut tabs, mut spaces) = (0usize, 0usize);
        for line in text.lines().filter(|line| is_measurable(line)) {
            match line.chars().next() {
                Some('\t') => tabs += 1,
                Some(' ') => spaces += 1,
                _ => {}
            }
        }

        match (tabs, spaces) {
            (0, 0) => None,
            (tabs, spaces) if tabs > spaces => Some(IndentStyle::Tabs),
            _ => Some(IndentStyle::Spaces),
        }
    }

    /// Base indentation that puts a line of printer depth `d` at
    /// `block_indentation + d * desired_tab_size`, given that the reference line
    /// sits at printer depth `reference_depth`.
    pub fn anchor_base(block_indentation: usize, reference_depth: usize) -> usize {
        block_indentation + reference_depth + 1
    }

    /// Rescale printer output to the target file's indentation
    ///
    /// 1. Lines made of exactly `base_indentation` whitespace chars are emptied.
    ///    Printers emit these for placeholder statements; they carry no
    ///    indentation.
    /// 2. The reference line is line 0, or line 1 with `trim_first_line` (the
    ///    first line is then glued to an existing physical line and is only
    ///    trimmed).
    /// 3. Every other non-blank line of printer depth `n` lands at
    ///    `base_indentation - ref / input_tab_size + n * desired_tab_size - 1`.
    ///    Columns past the last whole level (`indent % input_tab_size`) are
    ///    alignment and are kept as spaces.
    pub fn reindent(
        output: &str,
        base_indentation: usize,
        input_tab_size: usize,
        desired_tab_size: usize,
        trim_first_line: bool,
    ) -> Result<String, ReindentError> {
        reindent_with_style(
            output,
            base_indentation,
            input_tab_size,
            desired_tab_size,
            trim_first_line,
            IndentStyle::Spaces,
        )
    }

    /// `reindent`, writing level columns as `style` characters
    ///
    /// With `IndentStyle::Tabs` every level column becomes a `\t`; alignment
    /// columns stay spaces.
    pub fn reindent_with_style(
        output: &str,
        base_indentation: usize,
        input_tab_size: usize,
        desired_tab_size: usize,
        trim_first_line: bool,
        style: IndentStyle,
    ) -> Result<String, ReindentError> {
        if input_tab_size == 0 || desired_tab_size == 0 {
            return Err(ReindentError::ZeroTabSize {
                input: input_tab_size,
                desired: desired_tab_size,
            });
        }

        let blank_placeholder = Regex::new(&format!(r"(?m)^[ \t]{{{base_indentation}}}$"))
            .map_err(|e| ReindentError::Pattern(e.to_string()))?;
        let collapsed = blank_placeholder.replace_all(output, "");
        let lines: Vec<&str> = collapsed.split('\n').collect();

        let reference_index = usize::from(trim_first_line);
        let reference = lines
            .get(reference_index)
            .ok_or(ReindentError::MissingReferenceLine)?;
        let reference_depth = (detect_line_indentation(reference) / input_tab_size) as isize;
        let level_char = match style {
            IndentStyle::Spaces => " ",
            IndentStyle::Tabs => "\t",
        };

        let mut result = Vec::with_capacity(lines.len());
        for (i, line) in lines.iter().enumerate() {
            let trimmed = line.trim();

            if i == 0 && trim_first_line {
                result.push(trimmed.to_string());
                continue;
            }
            if trimmed.is_empty() {
                result.push(String::new());
                continue;
            }

            let indentation = detect_line_indentation(line);
            let depth = (indentation / input_tab_size) as isize;
            let alignment = indentation % input_tab_size;
            let adjusted = base_indentation as isize - reference_depth
                + depth * desired_tab_size as isize
                - 1;
            if adjusted < 0 {
                return Err(ReindentError::NegativeIndentation { line: i, adjusted });
            }

            result.push(format!(
                "{}{}{}",
                level_char.repeat(adjusted as usize),
                " ".repeat(alignment),
                trimmed
            ));
        }

        Ok(result.join("\n"))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_glued_block_lands_on_file_indentation() {
            let printed = "{\n    a();\n    if (x) {\n        b();\n    }\n}";
            let out = reindent(printed, anchor_base(6, 1), 4, 2, true).unwrap();
            assert_eq!(out, "{\n        a();\n        if (x) {\n          b();\n        }\n      }");
        }

        #[test]
        fn test_placeholder_line_collapses() {
            let printed = "{\n    a();\n  \n    b();\n}";
            let out = reindent(printed, anchor_base(0, 1), 4, 2, true).unwrap();
            assert_eq!(out, "{\n  a();\n\n  b();\n}");
        }

        #[test]
        fn test_detect_indentation_prefers_most_common_step() {
            let text = "a {\n  b {\n    c\n  }\n  d {\n    e\n  }\n}\n";
            assert_eq!(detect_indentation(text), Some(2));
            assert_eq!(detect_indentation("flat\ntext\n"), None);
        }

        #[test]
        fn test_doc_comments_do_not_count_as_steps() {
            let text = "/**\n * One.\n */\nfunction a() {\n  /**\n   * Two.\n   */\n  b();\n}\n";
            assert_eq!(detect_indentation(text), Some(2));
        }

        #[test]
        fn test_tab_levels() {
            let printed = "{\n    a();\n    if (x) {\n        b();\n    }\n}";
            let out = reindent_with_style(printed, anchor_base(1, 1), 4, 1, true, IndentStyle::Tabs).unwrap();
            assert_eq!(out, "{\n\t\ta();\n\t\tif (x) {\n\t\t\tb();\n\t\t}\n\t}");
        }
    }
}
