// Copyright (C) Brian G. Milnes 2025

//! Visitor pattern implementation for traversing TypeScript syntax trees

pub mod visitor {
    use anyhow::Result;
    use rowan::WalkEvent;
    use crate::classifier::classifier::{classify, Classification};
    use crate::syntax::syntax::SyntaxNode;

    /// Callbacks for the node categories the coverage engine scores
    pub trait CoverageVisitor {
        fn visit_identifier(&mut self, node: &SyntaxNode) -> Result<()>;
        fn visit_function(&mut self, node: &SyntaxNode) -> Result<()>;
        fn visit_parameter(&mut self, node: &SyntaxNode) -> Result<()>;
    }

    /// Visit every node under `root`, parents before children
    ///
    /// Every subtree is entered whatever its root classified as. rowan's
    /// preorder iterator keeps no call stack, so nesting depth is not a concern.
    pub fn walk<V: CoverageVisitor>(root: &SyntaxNode, visitor: &mut V) -> Result<()> {
        for event in root.preorder() {
            let WalkEvent::Enter(node) = event else {
                continue;
            };
            match classify(&node) {
                Classification::IdentifierUse => visitor.visit_identifier(&node)?,
                Classification::FunctionSignature => visitor.visit_function(&node)?,
                Classification::Parameter => visitor.visit_parameter(&node)?,
                Classification::Unclassified => {}
            }
        }
        Ok(())
    }
}
