// Copyright (C) Brian G. Milnes 2025

//! Program snapshots: a type checker's answers exported as JSON
//!
//! A snapshot carries the root file list, each file's syntax tree, and the
//! per-node facts the checker reported (type at location, symbol, signature).
//! `SnapshotProgram` rebuilds the trees with rowan and serves the facts
//! through `TypeOracle`, so coverage runs without the checker in process.

pub mod snapshot {
    use std::collections::{BTreeMap, HashMap};
    use std::fmt;
    use std::fs;
    use std::path::Path;
    use anyhow::{bail, Context, Result};
    use rowan::{GreenNode, GreenToken, NodeOrToken};
    use serde::de::{self, IgnoredAny, MapAccess, Visitor};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use crate::oracle::oracle::{ParsedFile, Program, TypeOracle};
    use crate::syntax::syntax::{SyntaxKind, SyntaxNode};

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProgramSnapshot {
        pub root_file_names: Vec<String>,
        #[serde(default)]
        pub symbols: BTreeMap<String, SymbolSnapshot>,
        pub files: Vec<FileSnapshot>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SymbolSnapshot {
        pub declared_type: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FileSnapshot {
        pub file_name: String,
        #[serde(default)]
        pub is_declaration_file: bool,
        pub root: NodeSnapshot,
    }

    /// A token `{token, text}` or a node `{kind, children, ...}`
    #[derive(Debug, Clone)]
    pub enum ElementSnapshot {
        Token(TokenSnapshot),
        Node(NodeSnapshot),
    }

    #[derive(Debug, Clone)]
    pub struct TokenSnapshot {
        pub token: SyntaxKind,
        pub text: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct NodeSnapshot {
        pub kind: SyntaxKind,
        #[serde(default)]
        pub children: Vec<ElementSnapshot>,
        #[serde(rename = "type")]
        pub ty: Option<String>,
        pub symbol: Option<String>,
        pub signature: Option<SignatureSnapshot>,
    }

    /// Children are released with an explicit stack, so deep trees drop safely
    impl Drop for NodeSnapshot {
        fn drop(&mut self) {
            let mut pending = std::mem::take(&mut self.children);
            while let Some(element) = pending.pop() {
                if let ElementSnapshot::Node(mut node) = element {
                    pending.append(&mut node.children);
                }
            }
        }
    }

    // Token or node is decided once every key has been read
    impl<'de> Deserialize<'de> for ElementSnapshot {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
            deserializer.deserialize_map(ElementVisitor)
        }
    }

    struct ElementVisitor;

    impl<'de> Visitor<'de> for ElementVisitor {
        type Value = ElementSnapshot;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a token {token, text} or a node {kind, children}")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<ElementSnapshot, A::Error> {
            let mut token = None;
            let mut text = None;
            let mut kind = None;
            let mut children = None;
            let mut ty = None;
            let mut symbol = None;
            let mut signature = None;

            while let Some(key) = map.next_key::<String>()? {
                match key.as_str() {
                    "token" => token = Some(map.next_value::<SyntaxKind>()?),
                    "text" => text = Some(map.next_value::<String>()?),
                    "kind" => kind = Some(map.next_value::<SyntaxKind>()?),
                    "children" => children = Some(map.next_value::<Vec<ElementSnapshot>>()?),
                    "type" => ty = map.next_value::<Option<String>>()?,
                    "symbol" => symbol = map.next_value::<Option<String>>()?,
                    "signature" => signature = map.next_value::<Option<SignatureSnapshot>>()?,
                    _ => {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
            }

            match (token, kind) {
                (Some(token), _) => {
                    let text = text.ok_or_else(|| de::Error::missing_field("text"))?;
                    Ok(ElementSnapshot::Token(TokenSnapshot { token, text }))
                }
                (None, Some(kind)) => Ok(ElementSnapshot::Node(NodeSnapshot {
                    kind,
                    children: children.unwrap_or_default(),
                    ty,
                    symbol,
                    signature,
                })),
                (None, None) => Err(de::Error::missing_field("kind")),
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SignatureSnapshot {
        pub return_type: Option<String>,
    }

    /// What the checker reported for one node
    #[derive(Debug, Clone)]
    struct NodeFacts {
        ty: Option<String>,
        symbol: Option<String>,
        signature: Option<SignatureSnapshot>,
    }

    impl NodeFacts {
        fn of(node: &NodeSnapshot) -> Option<Self> {
            if node.ty.is_none() && node.symbol.is_none() && node.signature.is_none() {
                return None;
            }
            Some(NodeFacts {
                ty: node.ty.clone(),
                symbol: node.symbol.clone(),
                signature: node.signature.clone(),
            })
        }
    }

    /// Oracle answering from recorded facts
    ///
    /// Facts are keyed by node identity. Each snapshot node owns its green
    /// node (no interning), so even identical zero-width siblings stay distinct.
    #[derive(Debug)]
    pub struct SnapshotOracle {
        facts: HashMap<SyntaxNode, NodeFacts>,
        symbols: BTreeMap<String, SymbolSnapshot>,
    }

    impl SnapshotOracle {
        fn facts(&self, node: &SyntaxNode) -> Option<&NodeFacts> {
            self.facts.get(node)
        }
    }

    impl TypeOracle for SnapshotOracle {
        type Type = String;
        type Symbol = String;
        type Signature = SignatureSnapshot;

        fn type_at_node(&self, node: &SyntaxNode) -> Result<Option<String>> {
            Ok(self.facts(node).and_then(|facts| facts.ty.clone()))
        }

        fn type_to_string(&self, ty: &String) -> String {
            ty.clone()
        }

        fn symbol_at_node(&self, node: &SyntaxNode) -> Result<Option<String>> {
            Ok(self.facts(node).and_then(|facts| facts.symbol.clone()))
        }

        fn declared_type_of_symbol(&self, symbol: &String) -> Result<Option<String>> {
            Ok(self.symbols.get(symbol).and_then(|s| s.declared_type.clone()))
        }

        fn signature_from_declaration(&self, node: &SyntaxNode) -> Result<Option<SignatureSnapshot>> {
            Ok(self.facts(node).and_then(|facts| facts.signature.clone()))
        }

        fn return_type_of_signature(&self, signature: &SignatureSnapshot) -> Result<Option<String>> {
            Ok(signature.return_type.clone())
        }

        fn type_from_type_node(&self, node: &SyntaxNode) -> Result<Option<String>> {
            self.type_at_node(node)
        }
    }

    /// A program rebuilt from a snapshot
    #[derive(Debug)]
    pub struct SnapshotProgram {
        root_file_names: Vec<String>,
        files: HashMap<String, ParsedFile>,
        oracle: SnapshotOracle,
    }

    impl SnapshotProgram {
        /// Read and rebuild a snapshot file
        pub fn load(path: &Path) -> Result<Self> {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
            Self::from_json(&json)
                .with_context(|| format!("Invalid snapshot: {}", path.display()))
        }

        /// Parse snapshot text; nesting depth is limited only by memory
        pub fn from_json(json: &str) -> Result<Self> {
            let mut json_de = serde_json::Deserializer::from_str(json);
            json_de.disable_recursion_limit();
            let snapshot = ProgramSnapshot::deserialize(serde_stacker::Deserializer::new(&mut json_de))
                .context("Failed to parse snapshot JSON")?;
            json_de.end().context("Failed to parse snapshot JSON")?;
            Self::from_snapshot(snapshot)
        }

        pub fn from_value(value: Value) -> Result<Self> {
            let snapshot = ProgramSnapshot::deserialize(serde_stacker::Deserializer::new(value))
                .context("Failed to decode snapshot")?;
            Self::from_snapshot(snapshot)
        }

        pub fn from_snapshot(snapshot: ProgramSnapshot) -> Result<Self> {
            let mut files = HashMap::new();
            let mut facts = HashMap::new();

            for file in &snapshot.files {
                if files.contains_key(&file.file_name) {
                    bail!("Duplicate file in snapshot: {}", file.file_name);
                }
                let green = build_green(&file.root)
                    .with_context(|| format!("Bad syntax tree for {}", file.file_name))?;
                let parsed = ParsedFile::new(file.file_name.as_str(), green, file.is_declaration_file);

                for (node, recorded) in parsed.syntax().descendants().zip(preorder_nodes(&file.root)) {
                    let Some(node_facts) = NodeFacts::of(recorded) else {
                        continue;
                    };
                    if let Some(symbol) = &node_facts.symbol {
                        if !snapshot.symbols.contains_key(symbol) {
                            bail!("{}: node refers to unknown symbol '{symbol}'", file.file_name);
                        }
                    }
                    facts.insert(node, node_facts);
                }

                files.insert(file.file_name.clone(), parsed);
            }

            Ok(SnapshotProgram {
                root_file_names: snapshot.root_file_names,
                files,
                oracle: SnapshotOracle {
                    facts,
                    symbols: snapshot.symbols,
                },
            })
        }
    }

    impl Program for SnapshotProgram {
        type Oracle = SnapshotOracle;

        fn root_file_names(&self) -> &[String] {
            &self.root_file_names
        }

        fn source_file(&self, file_name: &str) -> Option<&ParsedFile> {
            self.files.get(file_name)
        }

        fn type_oracle(&self) -> &SnapshotOracle {
            &self.oracle
        }
    }

    /// Build the green tree without recursing, so nesting depth is unbounded
    ///
    /// Nodes are built with `GreenNode::new` rather than an interning builder:
    /// every snapshot node gets its own green node and thus its own identity.
    fn build_green(root: &NodeSnapshot) -> Result<GreenNode> {
        if root.kind.is_token() {
            bail!("Root element must be a node, found token kind {:?}", root.kind);
        }
        let mut stack = vec![(root.kind, root.children.iter(), Vec::new())];

        loop {
            let Some((_, children, built)) = stack.last_mut() else {
                bail!("Syntax tree builder lost its root");
            };
            match children.next() {
                Some(ElementSnapshot::Token(token)) => {
                    if !token.token.is_token() {
                        bail!("Token has node kind {:?}: {:?}", token.token, token.text);
                    }
                    built.push(NodeOrToken::Token(GreenToken::new(token.token.into(), &token.text)));
                }
                Some(ElementSnapshot::Node(node)) => {
                    if node.kind.is_token() {
                        bail!("Node has token kind {:?}", node.kind);
                    }
                    stack.push((node.kind, node.children.iter(), Vec::new()));
                }
                None => {
                    let Some((kind, _, built)) = stack.pop() else {
                        bail!("Syntax tree builder lost its root");
                    };
                    let green = GreenNode::new(kind.into(), built);
                    match stack.last_mut() {
                        Some((_, _, parent)) => parent.push(NodeOrToken::Node(green)),
                        None => return Ok(green),
                    }
                }
            }
        }
    }

    /// Snapshot nodes in the order rowan's `descendants` yields them
    fn preorder_nodes(root: &NodeSnapshot) -> Vec<&NodeSnapshot> {
        let mut ordered = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            ordered.push(node);
            for child in node.children.iter().rev() {
                if let ElementSnapshot::Node(child) = child {
                    stack.push(child);
                }
            }
        }
        ordered
    }
}
