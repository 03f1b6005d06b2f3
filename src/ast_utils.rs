// Copyright (C) Brian G. Milnes 2025

//! Syntax tree queries used by the coverage engine
//!
//! Provides the positional and textual views of a node the reports need

pub mod ast_utils {
    use rowan::TextSize;
    use crate::syntax::syntax::{SyntaxKind, SyntaxNode};

    /// Snippets for identifier and function incidents are cut to this many characters
    pub const SNIPPET_LIMIT: usize = 40;

    /// Placeholder label when a declaration has no identifier name
    pub const UNKNOWN_NAME: &str = "unknown";

    /// Start of the node including leading trivia
    pub fn full_start(node: &SyntaxNode) -> TextSize {
        node.text_range().start()
    }

    /// Start of the node's first non-trivia token
    pub fn start(node: &SyntaxNode) -> TextSize {
        node.descendants_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| !token.kind().is_trivia())
            .map_or_else(|| node.text_range().end(), |token| token.text_range().start())
    }

    /// Source text of the node without leading trivia
    pub fn node_text(node: &SyntaxNode) -> String {
        let full = node.text().to_string();
        let skip: usize = (start(node) - full_start(node)).into();
        full[skip..].to_string()
    }

    /// First `limit` characters of `text`
    pub fn truncate(text: &str, limit: usize) -> String {
        text.chars().take(limit).collect()
    }

    /// The node in a declaration's name slot, if it has one
    ///
    /// Arrow functions never carry a name; for everything else the name is the
    /// first name-kind child appearing before the parameter list.
    pub fn declaration_name(node: &SyntaxNode) -> Option<SyntaxNode> {
        if node.kind() == SyntaxKind::ARROW_FUNCTION {
            return None;
        }
        node.children()
            .take_while(|child| child.kind() != SyntaxKind::PARAMETER_LIST)
            .find(|child| child.kind().is_name())
    }

    /// Name text when the name slot holds a plain identifier, else `"unknown"`
    pub fn declaration_label(node: &SyntaxNode) -> String {
        declaration_name(node)
            .filter(|name| name.kind() == SyntaxKind::IDENTIFIER)
            .map_or_else(|| UNKNOWN_NAME.to_string(), |name| node_text(&name))
    }

    /// Get the first child node of a specific kind
    pub fn child_of_kind(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
        node.children().find(|child| child.kind() == kind)
    }

    /// Get the last child node of a specific kind
    pub fn last_child_of_kind(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
        node.children().filter(|child| child.kind() == kind).last()
    }

    /// Check if a node has a parent of a specific kind
    pub fn has_parent_of_kind(node: &SyntaxNode, kind: SyntaxKind) -> bool {
        node.parent().is_some_and(|p| p.kind() == kind)
    }

    /// Check if a node has a grandparent of a specific kind
    pub fn has_grandparent_of_kind(node: &SyntaxNode, kind: SyntaxKind) -> bool {
        node.parent()
            .and_then(|p| p.parent())
            .is_some_and(|g| g.kind() == kind)
    }
}
