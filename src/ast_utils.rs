// Copyright (C) Brian G. Milnes 2025

//! Syntax tree traversal utilities
//!
//! Provides common functions for walking and querying tree-sitter trees

pub mod ast_utils {
    use tree_sitter::Node;

    /// Node kinds whose `body` field is a function body
    pub const FUNCTION_KINDS: &[&str] = &[
        "function_declaration",
        "function_expression",
        "function",
        "generator_function_declaration",
        "generator_function",
        "arrow_function",
        "method_definition",
    ];

    /// Visit every node under `root` (inclusive) in preorder
    pub fn preorder<'tree>(root: Node<'tree>) -> Vec<Node<'tree>> {
        let mut results = Vec::new();
        let mut cursor = root.walk();

        'walk: loop {
            results.push(cursor.node());
            if cursor.goto_first_child() {
                continue;
            }
            while !cursor.goto_next_sibling() {
                if !cursor.goto_parent() {
                    break 'walk;
                }
            }
        }

        results
    }

    /// Find all nodes of a specific kind in preorder
    pub fn find_nodes<'tree>(root: Node<'tree>, kind: &str) -> Vec<Node<'tree>> {
        find_nodes_where(root, |node| node.kind() == kind)
    }

    /// Find all nodes matching a predicate, in preorder
    pub fn find_nodes_where<'tree, F>(root: Node<'tree>, predicate: F) -> Vec<Node<'tree>>
    where
        F: Fn(&Node<'tree>) -> bool,
    {
        preorder(root).into_iter().filter(|node| predicate(node)).collect()
    }

    /// First node (preorder) matching a predicate
    pub fn find_first_where<'tree, F>(root: Node<'tree>, predicate: F) -> Option<Node<'tree>>
    where
        F: Fn(&Node<'tree>) -> bool,
    {
        preorder(root).into_iter().find(|node| predicate(node))
    }

    /// Comments and stray `;` sit in statement lists but never affect control flow
    pub fn is_trivia(node: &Node<'_>) -> bool {
        matches!(node.kind(), "comment" | "empty_statement")
    }

    /// Named children of a block, comments included, in source order
    pub fn block_children<'tree>(block: Node<'tree>) -> Vec<Node<'tree>> {
        let mut cursor = block.walk();
        block.named_children(&mut cursor).collect()
    }

    /// Statements of a block in source order, trivia skipped
    pub fn block_statements<'tree>(block: Node<'tree>) -> Vec<Node<'tree>> {
        block_children(block)
            .into_iter()
            .filter(|node| !is_trivia(node))
            .collect()
    }

    /// First named child that is not a comment
    pub fn first_named_child<'tree>(node: Node<'tree>) -> Option<Node<'tree>> {
        let mut cursor = node.walk();
        let child = node
            .named_children(&mut cursor)
            .find(|child| child.kind() != "comment");
        child
    }

    /// Check if `block` is the body of a function-like node
    pub fn is_function_body(block: &Node<'_>) -> bool {
        let Some(parent) = block.parent() else {
            return false;
        };
        FUNCTION_KINDS.contains(&parent.kind())
            && parent
                .child_by_field_name("body")
                .is_some_and(|body| body.id() == block.id())
    }
}
