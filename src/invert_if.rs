// Copyright (C) Brian G. Milnes 2025

//! Executor: invert-if
//!
//! Flags an `if` without `else` that ends its function (possibly through a
//! chain of such `if`s), and rewrites it into a guard clause:
//!
//! ```text
//! function main() {             function main() {
//!   setup();                      setup();
//!   if (a > 0.5) {       =>       if (a <= 0.5) {
//!     work();                       return;
//!   }                             }
//! }                               work();
//!                               }
//! ```
//!
//! An `if` followed by a single `return` also qualifies; the guard then returns
//! that value. Anything else after the `if` runs on both paths, so the `if`
//! cannot be turned into an early exit.

pub mod invert_if {
    use tree_sitter::Node;
    use crate::ast_utils::ast_utils::{
        block_children, block_statements, find_nodes, first_named_child, is_function_body,
        is_trivia,
    };
    use crate::diagnostic::diagnostic::{Diagnostic, Fix, FixBuildError};
    use crate::executor::executor::Executor;
    use crate::printer::printer::{Printer, QuoteStyle, Statement};
    use crate::project::project::{FormatSettings, ResolvedFormat};
    use crate::reindent::reindent::{anchor_base, IndentationContext};
    use crate::source_unit::source_unit::SourceUnit;

    pub const CODE: &str = "invert-if";
    pub const MESSAGE: &str = "Invert if statement to reduce nesting.";

    /// Comparison operators and their logical complements
    const COMPLEMENTS: &[(&str, &str)] = &[
        ("<", ">="),
        ("<=", ">"),
        (">", "<="),
        (">=", "<"),
        ("==", "!="),
        ("!=", "=="),
        ("===", "!=="),
        ("!==", "==="),
    ];

    /// Expressions that bind tighter than a prefix `!`
    const PRIMARY_KINDS: &[&str] = &[
        "identifier",
        "this",
        "true",
        "false",
        "null",
        "undefined",
        "number",
        "string",
        "template_string",
        "member_expression",
        "subscript_expression",
        "call_expression",
        "parenthesized_expression",
        "unary_expression",
    ];

    pub fn complement(operator: &str) -> Option<&'static str> {
        COMPLEMENTS
            .iter()
            .find(|(op, _)| *op == operator)
            .map(|(_, negated)| *negated)
    }

    /// What follows the `if` in its block
    #[derive(Debug, Clone, Copy)]
    enum Tail<'tree> {
        End,
        Return(Node<'tree>),
    }

    /// A qualifying `if` together with its enclosing block
    #[derive(Debug, Clone, Copy)]
    struct Candidate<'tree> {
        if_node: Node<'tree>,
        block: Node<'tree>,
        tail: Tail<'tree>,
    }

    /// Where `statement` sits in its block, if it is last or followed by one `return`
    fn tail_of(statement: Node<'_>) -> Option<(Node<'_>, Tail<'_>)> {
        let block = statement.parent()?;
        if block.kind() != "statement_block" {
            return None;
        }

        let statements = block_statements(block);
        let position = statements.iter().position(|s| s.id() == statement.id())?;
        match &statements[position + 1..] {
            [] => Some((block, Tail::End)),
            [next] if next.kind() == "return_statement" => Some((block, Tail::Return(*next))),
            _ => None,
        }
    }

    /// A block after which control leaves the function
    ///
    /// Function bodies, and consequences of else-less `if`s that are themselves
    /// the last statement of such a block.
    fn is_tail_block(block: Node<'_>) -> bool {
        if is_function_body(&block) {
            return true;
        }

        let Some(parent) = block.parent() else {
            return false;
        };
        if parent.kind() != "if_statement" || parent.child_by_field_name("alternative").is_some() {
            return false;
        }
        if !parent
            .child_by_field_name("consequence")
            .is_some_and(|consequence| consequence.id() == block.id())
        {
            return false;
        }

        match tail_of(parent) {
            Some((outer, Tail::End)) => is_tail_block(outer),
            _ => false,
        }
    }

    fn candidate(if_node: Node<'_>) -> Option<Candidate<'_>> {
        if if_node.child_by_field_name("alternative").is_some() {
            return None;
        }
        if_node.child_by_field_name("consequence")?;

        let (block, tail) = tail_of(if_node)?;
        if !is_tail_block(block) {
            return None;
        }

        Some(Candidate { if_node, block, tail })
    }

    /// The invert-if executor
    #[derive(Debug, Clone, Copy)]
    pub struct InvertIf {
        emit_fixes: bool,
        printer: Printer,
    }

    impl Default for InvertIf {
        fn default() -> Self {
            InvertIf::new()
        }
    }

    impl InvertIf {
        pub fn new() -> Self {
            InvertIf {
                emit_fixes: true,
                printer: Printer::default(),
            }
        }

        /// Report diagnostics only
        pub fn without_fixes() -> Self {
            InvertIf {
                emit_fixes: false,
                ..InvertIf::new()
            }
        }

        pub fn with_quote_style(self, quote_style: QuoteStyle) -> Self {
            InvertIf {
                printer: Printer::new(quote_style),
                ..self
            }
        }

        /// Negated form of an `if` condition
        ///
        /// Comparisons flip to their complement; anything else gets a single
        /// `!`. No further simplification is attempted.
        pub fn negate_condition(&self, unit: &SourceUnit, condition: Node<'_>) -> Result<String, FixBuildError> {
            let expression = if condition.kind() == "parenthesized_expression" {
                first_named_child(condition).unwrap_or(condition)
            } else {
                condition
            };

            if expression.kind() == "binary_expression" {
                let operator = expression.child_by_field_name("operator");
                let left = expression.child_by_field_name("left");
                let right = expression.child_by_field_name("right");
                if let (Some(operator), Some(left), Some(right)) = (operator, left, right) {
                    if let Some(negated) = complement(operator.kind()) {
                        return Ok(format!(
                            "{} {} {}",
                            self.printer.expression(unit, left)?,
                            negated,
                            self.printer.expression(unit, right)?
                        ));
                    }
                }
            }

            let text = self.printer.expression(unit, expression)?;
            if PRIMARY_KINDS.contains(&expression.kind()) {
                Ok(format!("!{text}"))
            } else {
                Ok(format!("!({text})"))
            }
        }

        /// Lift `nodes` into `out`, keeping blank-line separation from the source
        fn lift_all(
            &self,
            unit: &SourceUnit,
            nodes: &[Node<'_>],
            mut previous_end: Option<usize>,
            format: &ResolvedFormat,
            out: &mut Vec<Statement>,
        ) -> Result<Option<usize>, FixBuildError> {
            for node in nodes {
                if let Some(end) = previous_end {
                    if has_blank_line(&unit.text()[end..node.start_byte()]) {
                        out.push(Statement::Blank);
                    }
                }
                out.push(self.printer.lift(unit, *node, format.tab_size, format.indent_style)?);
                previous_end = Some(node.end_byte());
            }
            Ok(previous_end)
        }

        fn build_fix(
            &self,
            unit: &SourceUnit,
            settings: &FormatSettings,
            candidate: &Candidate<'_>,
        ) -> Result<Fix, FixBuildError> {
            let format = settings.resolve(unit);
            let Candidate { if_node, block, tail } = *candidate;

            let children = block_children(block);
            let position = children
                .iter()
                .position(|c| c.id() == if_node.id())
                .unwrap_or(children.len());
            let (before, rest) = children.split_at(position);
            let after = rest.get(1..).unwrap_or(&[]);

            let consequence = if_node.child_by_field_name("consequence");
            let body: Vec<Node<'_>> = match consequence {
                Some(node) if node.kind() == "statement_block" => block_children(node),
                Some(node) => vec![node],
                None => Vec::new(),
            };

            let condition = if_node
                .child_by_field_name("condition")
                .map(|c| self.negate_condition(unit, c))
                .transpose()?
                .unwrap_or_else(|| "false".to_string());
            let exit = match tail {
                Tail::End => Statement::Return(None),
                Tail::Return(node) => Statement::Return(
                    first_named_child(node)
                        .map(|value| self.printer.expression(unit, value))
                        .transpose()?,
                ),
            };

            let mut statements = Vec::new();
            let previous_end = self.lift_all(unit, before, None, &format, &mut statements)?;
            if previous_end.is_some_and(|end| has_blank_line(&unit.text()[end..if_node.start_byte()])) {
                statements.push(Statement::Blank);
            }
            statements.push(Statement::If {
                condition,
                consequence: vec![exit],
            });

            if !body.is_empty() {
                statements.push(Statement::Blank);
            }
            self.lift_all(unit, &body, None, &format, &mut statements)?;

            let body_exits = body
                .iter()
                .rev()
                .find(|node| !is_trivia(node))
                .is_some_and(|last| matches!(last.kind(), "return_statement" | "throw_statement"));
            let kept_after: Vec<Node<'_>> = after
                .iter()
                .copied()
                .filter(|node| !(body_exits && node.kind() == "return_statement"))
                .collect();
            self.lift_all(unit, &kept_after, Some(if_node.end_byte()), &format, &mut statements)?;

            let printed = self.printer.print_block(&statements);
            let block_indentation = unit.line_indentation(unit.node_line(block));
            let context = IndentationContext {
                base_indentation: anchor_base(block_indentation, 1),
                input_tab_size: self.printer.tab_size(),
                desired_tab_size: format.desired_tab_size,
                trim_first_line: true,
                indent_style: format.indent_style,
            };
            let content = context.apply(&printed)?.replace('\n', format.line_ending);

            let (start, end) = unit.char_span(block);
            Ok(Fix { start, end, content })
        }
    }

    fn has_blank_line(between: &str) -> bool {
        between.matches('\n').count() >= 2
    }

    impl Executor for InvertIf {
        fn code(&self) -> &'static str {
            CODE
        }

        fn detect(&self, unit: &SourceUnit, settings: &FormatSettings) -> Vec<Diagnostic> {
            let Some(tree) = unit.tree() else {
                return Vec::new();
            };

            find_nodes(tree.root_node(), "if_statement")
                .into_iter()
                .filter_map(candidate)
                .map(|candidate| {
                    let start = unit.byte_to_char(candidate.if_node.start_byte());
                    let line = unit.node_line(candidate.if_node);
                    let diagnostic = Diagnostic::new(unit, CODE, MESSAGE, line, start, start + 2);
                    if !self.emit_fixes {
                        return diagnostic;
                    }
                    diagnostic.with_fix(self.build_fix(unit, settings, &candidate).ok())
                })
                .collect()
        }
    }
}
