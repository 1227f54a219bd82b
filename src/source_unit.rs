// Copyright (C) Brian G. Milnes 2025

//! Parsed source files
//!
//! A SourceUnit is an immutable snapshot of one file: its text, its tree-sitter
//! syntax tree (or the reason it could not be parsed) and a line table for
//! mapping between offsets and line/column positions.
//!
//! Offsets handed out by the crate are char (Unicode scalar value) offsets.
//! Tree-sitter works in bytes; the conversion happens here.

pub mod source_unit {
    use std::fmt;
    use std::path::{Path, PathBuf};
    use thiserror::Error;
    use tree_sitter::{Language, Node, Parser, Tree};
    use crate::ast_utils::ast_utils::find_first_where;
    use crate::reindent::reindent::detect_line_indentation;

    /// Why a file has no syntax tree
    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    pub enum ParseError {
        #[error("{path}: could not load grammar: {message}")]
        Language { path: PathBuf, message: String },

        #[error("{path}: parser produced no tree")]
        NoTree { path: PathBuf },

        #[error("{path}:{line}:{column}: syntax error")]
        Syntax { path: PathBuf, line: usize, column: usize },
    }

    /// Grammar used for a file, chosen from its extension
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Dialect {
        TypeScript,
        Tsx,
    }

    impl Dialect {
        /// JavaScript files and `.tsx` may hold JSX and need the JSX-aware grammar;
        /// `.ts`, `.mts` and `.cts` use plain TypeScript, where `<T>x` is a cast.
        pub fn from_path(path: &Path) -> Self {
            match path.extension().and_then(|ext| ext.to_str()) {
                Some("tsx" | "jsx" | "js" | "mjs" | "cjs") => Dialect::Tsx,
                _ => Dialect::TypeScript,
            }
        }

        pub fn language(self) -> Language {
            match self {
                Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
                Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            }
        }
    }

    /// Parse `text` as the dialect implied by `path`
    ///
    /// A tree that contains ERROR or MISSING nodes is rejected: fixes are never
    /// computed against a partially understood file.
    pub fn parse_source(path: &Path, text: &str) -> Result<Tree, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&Dialect::from_path(path).language())
            .map_err(|e| ParseError::Language {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let tree = parser
            .parse(text, None)
            .ok_or_else(|| ParseError::NoTree { path: path.to_path_buf() })?;

        let root = tree.root_node();
        if root.has_error() {
            let culprit = find_first_where(root, |node| node.is_error() || node.is_missing())
                .unwrap_or(root);
            let position = culprit.start_position();
            return Err(ParseError::Syntax {
                path: path.to_path_buf(),
                line: position.row + 1,
                column: position.column + 1,
            });
        }

        Ok(tree)
    }

    /// One file's text and syntax tree
    pub struct SourceUnit {
        path: PathBuf,
        relative_path: String,
        text: String,
        line_starts: Vec<usize>,
        syntax: Result<Tree, ParseError>,
    }

    impl SourceUnit {
        /// Snapshot `text` and parse it. A parse failure is kept on the unit rather
        /// than returned: the file stays in the project and reports nothing.
        pub fn new(path: PathBuf, relative_path: impl Into<String>, text: impl Into<String>) -> Self {
            let text = text.into();
            let syntax = parse_source(&path, &text);
            let line_starts = std::iter::once(0)
                .chain(text.match_indices('\n').map(|(i, _)| i + 1))
                .collect();

            SourceUnit {
                path,
                relative_path: relative_path.into(),
                text,
                line_starts,
                syntax,
            }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        pub fn relative_path(&self) -> &str {
            &self.relative_path
        }

        pub fn text(&self) -> &str {
            &self.text
        }

        /// `"\r\n"` when the first line break is CRLF, else `"\n"`
        pub fn line_ending(&self) -> &'static str {
            match self.text.find('\n') {
                Some(i) if self.text[..i].ends_with('\r') => "\r\n",
                _ => "\n",
            }
        }

        pub fn tree(&self) -> Option<&Tree> {
            self.syntax.as_ref().ok()
        }

        pub fn parse_error(&self) -> Option<&ParseError> {
            self.syntax.as_ref().err()
        }

        /// Number of chars in the text; the upper bound for every offset.
        pub fn char_len(&self) -> usize {
            self.text.chars().count()
        }

        pub fn line_count(&self) -> usize {
            self.line_starts.len()
        }

        /// Convert a byte offset (as reported by tree-sitter) to a char offset.
        /// Offsets inside a multi-byte char round down to that char.
        pub fn byte_to_char(&self, byte: usize) -> usize {
            let byte = byte.min(self.text.len());
            self.text
                .char_indices()
                .take_while(|(i, _)| *i < byte)
                .count()
        }

        /// Convert a char offset to a byte offset; `None` past the end of the text.
        pub fn char_to_byte(&self, offset: usize) -> Option<usize> {
            if offset == 0 {
                return Some(0);
            }
            match self.text.char_indices().nth(offset) {
                Some((byte, _)) => Some(byte),
                None if offset == self.char_len() => Some(self.text.len()),
                None => None,
            }
        }

        /// Char offset -> (1-based line, 0-based char column)
        pub fn offset_to_position(&self, offset: usize) -> Option<(usize, usize)> {
            let byte = self.char_to_byte(offset)?;
            let line = self.line_starts.partition_point(|&start| start <= byte);
            let line_start = self.line_starts[line - 1];
            let column = self.text[line_start..byte].chars().count();
            Some((line, column))
        }

        /// (1-based line, 0-based char column) -> char offset
        pub fn position_to_offset(&self, line: usize, column: usize) -> Option<usize> {
            let line_text = self.line_text(line)?;
            if column > line_text.chars().count() {
                return None;
            }
            let line_start = self.byte_to_char(self.line_starts[line - 1]);
            Some(line_start + column)
        }

        /// Text of a 1-based line, without its newline
        pub fn line_text(&self, line: usize) -> Option<&str> {
            if line == 0 || line > self.line_starts.len() {
                return None;
            }
            let start = self.line_starts[line - 1];
            let end = self
                .line_starts
                .get(line)
                .map(|next| next - 1)
                .unwrap_or(self.text.len());
            Some(self.text[start..end].trim_end_matches('\r'))
        }

        /// Leading whitespace chars of a 1-based line
        pub fn line_indentation(&self, line: usize) -> usize {
            self.line_text(line).map(detect_line_indentation).unwrap_or(0)
        }

        /// Source text of a node
        pub fn node_text(&self, node: Node<'_>) -> &str {
            &self.text[node.byte_range()]
        }

        /// Char span `[start, end)` of a node
        pub fn char_span(&self, node: Node<'_>) -> (usize, usize) {
            (self.byte_to_char(node.start_byte()), self.byte_to_char(node.end_byte()))
        }

        /// 1-based line of a node's first char
        pub fn node_line(&self, node: Node<'_>) -> usize {
            node.start_position().row + 1
        }
    }

    impl fmt::Debug for SourceUnit {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("SourceUnit")
                .field("path", &self.path)
                .field("relative_path", &self.relative_path)
                .field("chars", &self.char_len())
                .field("parse_error", &self.parse_error())
                .finish()
        }
    }
}
