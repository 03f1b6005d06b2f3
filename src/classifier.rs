// Copyright (C) Brian G. Milnes 2025

//! Decides which coverage category, if any, a syntax node is scored under

pub mod classifier {
    use crate::ast_utils::ast_utils::{has_grandparent_of_kind, has_parent_of_kind};
    use crate::syntax::syntax::{SyntaxKind, SyntaxNode};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Classification {
        IdentifierUse,
        FunctionSignature,
        Parameter,
        Unclassified,
    }

    /// Classify a node; the first matching rule wins.
    ///
    /// 1. identifiers, except the names of function and class declarations and
    ///    the binding of a catch clause variable
    /// 2. methods, functions, arrow functions, function expressions
    /// 3. parameters
    pub fn classify(node: &SyntaxNode) -> Classification {
        let kind = node.kind();
        if kind == SyntaxKind::IDENTIFIER {
            if is_declaration_site(node) {
                Classification::Unclassified
            } else {
                Classification::IdentifierUse
            }
        } else if kind.is_function_like() {
            Classification::FunctionSignature
        } else if kind == SyntaxKind::PARAMETER {
            Classification::Parameter
        } else {
            Classification::Unclassified
        }
    }

    fn is_declaration_site(identifier: &SyntaxNode) -> bool {
        has_parent_of_kind(identifier, SyntaxKind::FUNCTION_DECLARATION)
            || has_parent_of_kind(identifier, SyntaxKind::CLASS_DECLARATION)
            || (has_parent_of_kind(identifier, SyntaxKind::VARIABLE_DECLARATION)
                && has_grandparent_of_kind(identifier, SyntaxKind::CATCH_CLAUSE))
    }
}
