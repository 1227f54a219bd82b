// Copyright (C) Brian G. Milnes 2025

//! Printer for synthesized blocks
//!
//! Executors describe a replacement block as a short list of `Statement`s:
//! original statements lifted out of the tree, plus the few statements they
//! synthesize. The printer renders that list with its own fixed tab width;
//! `reindent` then fits the result to the target file.
//!
//! Output format details callers rely on:
//! - the block opens with a lone `{` line and closes with `}` at depth 0;
//! - `Statement::Blank` prints as a line holding only indentation.

pub mod printer {
    use thiserror::Error;
    use tree_sitter::Node;
    use crate::ast_utils::ast_utils::preorder;
    use crate::reindent::reindent::{detect_line_indentation, IndentStyle};
    use crate::source_unit::source_unit::SourceUnit;

    /// Spaces per nesting level in printer output
    pub const PRINTER_TAB_SIZE: usize = 4;

    /// Literals whose text would change if a line inside them were re-indented
    const LITERAL_KINDS: &[&str] = &["string", "template_string", "regex"];

    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    pub enum PrintError {
        #[error("line {line}: multi-line {kind} literal cannot be re-indented")]
        MultilineLiteral { line: usize, kind: &'static str },

        #[error("line {line}: expression spans several lines")]
        MultilineExpression { line: usize },
    }

    /// One line of a lifted statement, `depth` levels below the statement's first line
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct VerbatimLine {
        pub depth: usize,
        /// Spaces past the last whole level, e.g. the ` * ` of a doc comment
        pub alignment: usize,
        pub text: String,
    }

    impl VerbatimLine {
        pub fn new(depth: usize, text: impl Into<String>) -> Self {
            VerbatimLine { depth, alignment: 0, text: text.into() }
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Statement {
        /// A statement copied from the source, line structure kept
        Verbatim(Vec<VerbatimLine>),
        /// Placeholder separating groups of statements
        Blank,
        If {
            condition: String,
            consequence: Vec<Statement>,
        },
        Return(Option<String>),
    }

    /// How string literals are written when statements are lifted
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum QuoteStyle {
        #[default]
        Double,
        Preserve,
    }

    #[derive(Debug, Clone, Copy)]
    pub struct Printer {
        tab_size: usize,
        quote_style: QuoteStyle,
    }

    impl Default for Printer {
        fn default() -> Self {
            Printer::new(QuoteStyle::default())
        }
    }

    impl Printer {
        pub fn new(quote_style: QuoteStyle) -> Self {
            Printer {
                tab_size: PRINTER_TAB_SIZE,
                quote_style,
            }
        }

        pub fn tab_size(&self) -> usize {
            self.tab_size
        }

        /// Lift a statement out of the source
        ///
        /// Continuation lines keep their nesting relative to the statement's
        /// first line, measured in `source_tab_size` columns per level (one tab
        /// per level with `IndentStyle::Tabs`). Leftover columns are kept as
        /// alignment.
        pub fn lift(
            &self,
            unit: &SourceUnit,
            node: Node<'_>,
            source_tab_size: usize,
            style: IndentStyle,
        ) -> Result<Statement, PrintError> {
            let text = self.render(unit, node)?;
            let first = unit
                .line_text(unit.node_line(node))
                .map(split_indentation)
                .unwrap_or((0, 0));
            let tab = source_tab_size.max(1);

            let lines = text
                .split('\n')
                .enumerate()
                .map(|(i, line)| {
                    let line = line.trim_end_matches('\r');
                    if i == 0 || line.trim().is_empty() {
                        return VerbatimLine::new(0, line.trim());
                    }

                    let (levels, spaces) = split_indentation(line);
                    let (depth, alignment) = match style {
                        IndentStyle::Tabs => (
                            levels.saturating_sub(first.0),
                            spaces.saturating_sub(first.1),
                        ),
                        IndentStyle::Spaces => {
                            let relative = (levels + spaces).saturating_sub(first.0 + first.1);
                            (relative / tab, relative % tab)
                        }
                    };
                    VerbatimLine {
                        depth,
                        alignment,
                        text: line.trim().to_string(),
                    }
                })
                .collect();

            Ok(Statement::Verbatim(lines))
        }

        /// Source text of an expression that must fit on one line
        pub fn expression(&self, unit: &SourceUnit, node: Node<'_>) -> Result<String, PrintError> {
            let text = self.render(unit, node)?;
            if text.contains('\n') {
                return Err(PrintError::MultilineExpression { line: unit.node_line(node) });
            }
            Ok(text)
        }

        /// Node text with string literals rewritten to the printer's quote style
        fn render(&self, unit: &SourceUnit, node: Node<'_>) -> Result<String, PrintError> {
            let descendants = preorder(node);

            if let Some(literal) = descendants.iter().find(|n| {
                LITERAL_KINDS.contains(&n.kind()) && n.start_position().row != n.end_position().row
            }) {
                return Err(PrintError::MultilineLiteral {
                    line: unit.node_line(*literal),
                    kind: literal.kind(),
                });
            }

            let mut text = unit.node_text(node).to_string();
            if self.quote_style == QuoteStyle::Preserve {
                return Ok(text);
            }

            let base = node.start_byte();
            let strings: Vec<Node<'_>> = descendants
                .into_iter()
                .filter(|n| n.kind() == "string")
                .filter(|n| !n.parent().is_some_and(|p| p.kind().starts_with("jsx")))
                .collect();

            // Back to front so earlier ranges stay valid.
            for string in strings.iter().rev() {
                let literal = unit.node_text(*string);
                if let Some(rewritten) = double_quoted(literal) {
                    let start = string.start_byte() - base;
                    let end = string.end_byte() - base;
                    text.replace_range(start..end, &rewritten);
                }
            }

            Ok(text)
        }

        /// Print `statements` as a brace-delimited block
        pub fn print_block(&self, statements: &[Statement]) -> String {
            let mut out = String::from("{\n");
            for statement in statements {
                self.print_statement(statement, 1, &mut out);
            }
            out.push('}');
            out
        }

        fn print_statement(&self, statement: &Statement, depth: usize, out: &mut String) {
            let indent = " ".repeat(depth * self.tab_size);

            match statement {
                Statement::Blank => {
                    out.push_str(&indent);
                    out.push('\n');
                }
                Statement::Verbatim(lines) => {
                    for line in lines {
                        if !line.text.is_empty() {
                            out.push_str(&indent);
                            out.push_str(&" ".repeat(line.depth * self.tab_size + line.alignment));
                            out.push_str(&line.text);
                        }
                        out.push('\n');
                    }
                }
                Statement::Return(None) => {
                    out.push_str(&format!("{indent}return;\n"));
                }
                Statement::Return(Some(value)) => {
                    out.push_str(&format!("{indent}return {value};\n"));
                }
                Statement::If { condition, consequence } => {
                    out.push_str(&format!("{indent}if ({condition}) {{\n"));
                    for inner in consequence {
                        self.print_statement(inner, depth + 1, out);
                    }
                    out.push_str(&format!("{indent}}}\n"));
                }
            }
        }
    }

    /// Leading whitespace of `line` as (chars up to the last tab, spaces after it)
    fn split_indentation(line: &str) -> (usize, usize) {
        let indentation = detect_line_indentation(line);
        let leading: Vec<char> = line.chars().take(indentation).collect();
        let levels = leading.iter().rposition(|c| *c == '\t').map_or(0, |i| i + 1);
        (levels, indentation - levels)
    }

    /// Rewrite a single-quoted literal with double quotes; `None` if already double-quoted
    fn double_quoted(literal: &str) -> Option<String> {
        let inner = literal.strip_prefix('\'')?.strip_suffix('\'')?;
        let mut out = String::with_capacity(literal.len() + 2);
        out.push('"');

        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some('\'') => out.push('\''),
                    Some(escaped) => {
                        out.push('\\');
                        out.push(escaped);
                    }
                    None => out.push('\\'),
                },
                '"' => out.push_str("\\\""),
                other => out.push(other),
            }
        }

        out.push('"');
        Some(out)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_double_quoted_escapes() {
            assert_eq!(double_quoted("'Yes'").as_deref(), Some("\"Yes\""));
            assert_eq!(double_quoted(r#"'say "hi"'"#).as_deref(), Some(r#""say \"hi\"""#));
            assert_eq!(double_quoted(r"'it\'s'").as_deref(), Some("\"it's\""));
            assert_eq!(double_quoted("\"kept\""), None);
        }

        #[test]
        fn test_print_block_nests_with_printer_width() {
            let block = vec![
                Statement::If {
                    condition: "a <= 0.5".to_string(),
                    consequence: vec![Statement::Return(None)],
                },
                Statement::Blank,
                Statement::Verbatim(vec![VerbatimLine::new(0, "go();")]),
            ];
            let printed = Printer::default().print_block(&block);
            assert_eq!(
                printed,
                "{\n    if (a <= 0.5) {\n        return;\n    }\n    \n    go();\n}"
            );
        }

        #[test]
        fn test_verbatim_alignment_is_printed() {
            let block = vec![Statement::Verbatim(vec![
                VerbatimLine::new(0, "/**"),
                VerbatimLine { depth: 0, alignment: 1, text: "* doc".to_string() },
                VerbatimLine { depth: 0, alignment: 1, text: "*/".to_string() },
            ])];
            assert_eq!(Printer::default().print_block(&block), "{\n    /**\n     * doc\n     */\n}");
        }

        #[test]
        fn test_split_indentation() {
            assert_eq!(split_indentation("    x"), (0, 4));
            assert_eq!(split_indentation("\t\t * x"), (2, 1));
            assert_eq!(split_indentation("x"), (0, 0));
        }
    }
}
