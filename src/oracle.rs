// Copyright (C) Brian G. Milnes 2025

//! Boundary to the type checker
//!
//! The coverage engine never resolves types itself. It asks a `TypeOracle`
//! about nodes of trees handed over by a `Program`.

pub mod oracle {
    use anyhow::Result;
    use rowan::GreenNode;
    use crate::syntax::syntax::SyntaxNode;

    /// Printed form of the dynamic/untyped type
    pub const ANY_TYPE: &str = "any";

    /// Semantic queries answered by the type checker.
    ///
    /// `Ok(None)` means the checker has no answer for that node. `Err` means the
    /// checker itself failed and aborts the whole coverage run.
    pub trait TypeOracle {
        type Type;
        type Symbol;
        type Signature;

        fn type_at_node(&self, node: &SyntaxNode) -> Result<Option<Self::Type>>;

        /// Canonical printed form; only compared against `ANY_TYPE`.
        fn type_to_string(&self, ty: &Self::Type) -> String;

        fn symbol_at_node(&self, node: &SyntaxNode) -> Result<Option<Self::Symbol>>;

        fn declared_type_of_symbol(&self, symbol: &Self::Symbol) -> Result<Option<Self::Type>>;

        fn signature_from_declaration(&self, node: &SyntaxNode) -> Result<Option<Self::Signature>>;

        fn return_type_of_signature(&self, signature: &Self::Signature) -> Result<Option<Self::Type>>;

        fn type_from_type_node(&self, node: &SyntaxNode) -> Result<Option<Self::Type>>;

        fn is_any(&self, ty: &Self::Type) -> bool {
            self.type_to_string(ty) == ANY_TYPE
        }
    }

    /// A parsed program: its root files, their trees, and the oracle over them
    pub trait Program {
        type Oracle: TypeOracle;

        /// Root file names in the order the program lists them
        fn root_file_names(&self) -> &[String];

        fn source_file(&self, file_name: &str) -> Option<&ParsedFile>;

        fn type_oracle(&self) -> &Self::Oracle;
    }

    /// One parsed source file
    #[derive(Debug, Clone)]
    pub struct ParsedFile {
        file_name: String,
        root: SyntaxNode,
        is_declaration_file: bool,
    }

    impl ParsedFile {
        pub fn new(file_name: impl Into<String>, green: GreenNode, is_declaration_file: bool) -> Self {
            ParsedFile {
                file_name: file_name.into(),
                root: SyntaxNode::new_root(green),
                is_declaration_file,
            }
        }

        pub fn file_name(&self) -> &str {
            &self.file_name
        }

        /// Root of the tree. Clones share identity with nodes handed to the oracle.
        pub fn syntax(&self) -> &SyntaxNode {
            &self.root
        }

        /// True for ambient `.d.ts` style files with nothing to cover
        pub fn is_declaration_file(&self) -> bool {
            self.is_declaration_file
        }
    }
}
