// Copyright (C) Brian G. Milnes 2025

//! Syntax tree vocabulary for TypeScript programs
//!
//! The tree itself is produced elsewhere (a type checker export, see `snapshot`).
//! This module only fixes the node and token kinds and plugs them into rowan.

pub mod syntax {
    use serde::Deserialize;

    /// Kinds of tokens and nodes in a TypeScript syntax tree.
    ///
    /// Node kind names follow the TypeScript compiler's `SyntaxKind` names so a
    /// snapshot exported from `tsc` can name them directly.
    #[allow(non_camel_case_types)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
    #[repr(u16)]
    pub enum SyntaxKind {
        // Tokens
        #[serde(rename = "Whitespace")]
        WHITESPACE = 0,
        #[serde(rename = "Comment")]
        COMMENT,
        #[serde(rename = "Ident")]
        IDENT,
        #[serde(rename = "Keyword")]
        KEYWORD,
        #[serde(rename = "Punct")]
        PUNCT,
        #[serde(rename = "Literal")]
        LITERAL,

        // Nodes
        #[serde(rename = "SourceFile")]
        SOURCE_FILE,
        #[serde(rename = "Identifier")]
        IDENTIFIER,
        #[serde(rename = "PrivateIdentifier")]
        PRIVATE_IDENTIFIER,
        #[serde(rename = "StringLiteral")]
        STRING_LITERAL,
        #[serde(rename = "NumericLiteral")]
        NUMERIC_LITERAL,
        #[serde(rename = "ComputedPropertyName")]
        COMPUTED_PROPERTY_NAME,
        #[serde(rename = "ObjectBindingPattern")]
        OBJECT_BINDING_PATTERN,
        #[serde(rename = "ArrayBindingPattern")]
        ARRAY_BINDING_PATTERN,
        #[serde(rename = "BindingElement")]
        BINDING_ELEMENT,
        #[serde(rename = "FunctionDeclaration")]
        FUNCTION_DECLARATION,
        #[serde(rename = "FunctionExpression")]
        FUNCTION_EXPRESSION,
        #[serde(rename = "ArrowFunction")]
        ARROW_FUNCTION,
        #[serde(rename = "MethodDeclaration")]
        METHOD_DECLARATION,
        #[serde(rename = "Constructor")]
        CONSTRUCTOR,
        #[serde(rename = "ClassDeclaration")]
        CLASS_DECLARATION,
        #[serde(rename = "ClassExpression")]
        CLASS_EXPRESSION,
        #[serde(rename = "PropertyDeclaration")]
        PROPERTY_DECLARATION,
        #[serde(rename = "HeritageClause")]
        HERITAGE_CLAUSE,
        #[serde(rename = "ParameterList")]
        PARAMETER_LIST,
        #[serde(rename = "Parameter")]
        PARAMETER,
        #[serde(rename = "TypeAnnotation")]
        TYPE_ANNOTATION,
        #[serde(rename = "TypeReference")]
        TYPE_REFERENCE,
        #[serde(rename = "Block")]
        BLOCK,
        #[serde(rename = "VariableStatement")]
        VARIABLE_STATEMENT,
        #[serde(rename = "VariableDeclarationList")]
        VARIABLE_DECLARATION_LIST,
        #[serde(rename = "VariableDeclaration")]
        VARIABLE_DECLARATION,
        #[serde(rename = "TryStatement")]
        TRY_STATEMENT,
        #[serde(rename = "CatchClause")]
        CATCH_CLAUSE,
        #[serde(rename = "ImportDeclaration")]
        IMPORT_DECLARATION,
        #[serde(rename = "ImportClause")]
        IMPORT_CLAUSE,
        #[serde(rename = "NamedImports")]
        NAMED_IMPORTS,
        #[serde(rename = "ImportSpecifier")]
        IMPORT_SPECIFIER,
        #[serde(rename = "ExportDeclaration")]
        EXPORT_DECLARATION,
        #[serde(rename = "ExpressionStatement")]
        EXPRESSION_STATEMENT,
        #[serde(rename = "ReturnStatement")]
        RETURN_STATEMENT,
        #[serde(rename = "CallExpression")]
        CALL_EXPRESSION,
        #[serde(rename = "PropertyAccessExpression")]
        PROPERTY_ACCESS_EXPRESSION,
        #[serde(rename = "BinaryExpression")]
        BINARY_EXPRESSION,
        #[serde(rename = "ObjectLiteralExpression")]
        OBJECT_LITERAL_EXPRESSION,
        #[serde(rename = "PropertyAssignment")]
        PROPERTY_ASSIGNMENT,
        #[serde(rename = "ParenthesizedExpression")]
        PARENTHESIZED_EXPRESSION,

        /// Any node kind the coverage engine has no rule for.
        #[serde(rename = "Other", other)]
        OTHER,
    }

    use SyntaxKind::*;

    impl SyntaxKind {
        // Indexed by discriminant.
        const ALL: [SyntaxKind; 48] = [
            WHITESPACE, COMMENT, IDENT, KEYWORD, PUNCT, LITERAL,
            SOURCE_FILE, IDENTIFIER, PRIVATE_IDENTIFIER, STRING_LITERAL, NUMERIC_LITERAL,
            COMPUTED_PROPERTY_NAME, OBJECT_BINDING_PATTERN, ARRAY_BINDING_PATTERN, BINDING_ELEMENT,
            FUNCTION_DECLARATION, FUNCTION_EXPRESSION, ARROW_FUNCTION, METHOD_DECLARATION, CONSTRUCTOR,
            CLASS_DECLARATION, CLASS_EXPRESSION, PROPERTY_DECLARATION, HERITAGE_CLAUSE,
            PARAMETER_LIST, PARAMETER, TYPE_ANNOTATION, TYPE_REFERENCE, BLOCK,
            VARIABLE_STATEMENT, VARIABLE_DECLARATION_LIST, VARIABLE_DECLARATION,
            TRY_STATEMENT, CATCH_CLAUSE,
            IMPORT_DECLARATION, IMPORT_CLAUSE, NAMED_IMPORTS, IMPORT_SPECIFIER, EXPORT_DECLARATION,
            EXPRESSION_STATEMENT, RETURN_STATEMENT, CALL_EXPRESSION, PROPERTY_ACCESS_EXPRESSION,
            BINARY_EXPRESSION, OBJECT_LITERAL_EXPRESSION, PROPERTY_ASSIGNMENT, PARENTHESIZED_EXPRESSION,
            OTHER,
        ];

        /// Map a raw rowan kind back to a `SyntaxKind`; out-of-range values become `OTHER`.
        pub fn from_raw(raw: u16) -> SyntaxKind {
            Self::ALL.get(raw as usize).copied().unwrap_or(OTHER)
        }

        pub fn is_token(self) -> bool {
            (self as u16) <= (LITERAL as u16)
        }

        /// Whitespace and comments: part of a node's full extent, never of its text.
        pub fn is_trivia(self) -> bool {
            matches!(self, WHITESPACE | COMMENT)
        }

        /// Method, standalone function, arrow function, or function expression.
        pub fn is_function_like(self) -> bool {
            matches!(
                self,
                METHOD_DECLARATION | FUNCTION_DECLARATION | ARROW_FUNCTION | FUNCTION_EXPRESSION
            )
        }

        /// Kinds that can occupy the name slot of a declaration.
        pub fn is_name(self) -> bool {
            matches!(
                self,
                IDENTIFIER
                    | PRIVATE_IDENTIFIER
                    | STRING_LITERAL
                    | NUMERIC_LITERAL
                    | COMPUTED_PROPERTY_NAME
                    | OBJECT_BINDING_PATTERN
                    | ARRAY_BINDING_PATTERN
            )
        }
    }

    impl From<SyntaxKind> for rowan::SyntaxKind {
        fn from(kind: SyntaxKind) -> Self {
            rowan::SyntaxKind(kind as u16)
        }
    }

    #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub enum TsLanguage {}

    impl rowan::Language for TsLanguage {
        type Kind = SyntaxKind;

        fn kind_from_raw(raw: rowan::SyntaxKind) -> SyntaxKind {
            SyntaxKind::from_raw(raw.0)
        }

        fn kind_to_raw(kind: SyntaxKind) -> rowan::SyntaxKind {
            kind.into()
        }
    }

    pub type SyntaxNode = rowan::SyntaxNode<TsLanguage>;
    pub type SyntaxToken = rowan::SyntaxToken<TsLanguage>;
    pub type SyntaxElement = rowan::SyntaxElement<TsLanguage>;

}
