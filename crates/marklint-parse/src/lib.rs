//! Recoverable multi-dialect markup lexer and tree builder.
//!
//! # Scope
//!
//! This crate turns raw, often malformed, mixed-dialect markup into a
//! position-annotated source tree:
//!
//! - **Tokenizer chain** — ordered recognizers for comments, template
//!   comments, DOCTYPE, processing directives, embedded-template
//!   directives and expressions, CDATA blocks, element tags, and a
//!   catch-all text recognizer that guarantees progress on any input
//! - **Element tokenizer** — tag name and ordered attribute parsing with
//!   a nested-quote matcher tolerant of quotes-inside-quotes
//! - **Tree builder** — implicit-closing and void-element rules over a
//!   stack of open elements, with recovery for mismatched end tags
//! - **Dialect narrowing** — Vue single-file components are reduced to
//!   their first top-level `<template>` block
//!
//! There is no fatal-error path for malformed input: anything that cannot
//! be parsed as markup degrades to text, and mismatched tags are corrected
//! rather than reported. Rule checks consume the result through the
//! traversal contract in `marklint-visit`.
//!
//! # Not in scope
//!
//! - Full HTML5 tree construction (no insertion modes, no foster
//!   parenting, no adoption agency algorithm)
//! - Markup validation and semantic analysis of embedded script/style

/// Position-tracking input cursor.
pub mod cursor;
/// Dialect selection for a parse session.
pub mod dialect;
/// The recognizer chain and lexer loop.
pub mod tokenizer;
/// Stack-based tree construction.
pub mod tree;

mod vue;

pub use dialect::{Dialect, DialectError};
pub use tokenizer::TokenizerChain;

use marklint_nodes::{NodeId, NodeKind, SourceTree};

/// A fully parsed file: the node arena, the flat node list in document
/// order (narrowed for Vue), and the dialect it was parsed as.
///
/// Once constructed the document is read-only; it can be shared across
/// any number of concurrently running checks.
#[derive(Debug, Clone)]
pub struct Document {
    tree: SourceTree,
    nodes: Vec<NodeId>,
    dialect: Dialect,
}

impl Document {
    /// The node arena, in document order.
    #[must_use]
    pub const fn tree(&self) -> &SourceTree {
        &self.tree
    }

    /// The flat node list checks should walk. For Vue this is the first
    /// top-level `<template>` block; for every other dialect it is the
    /// full sequence.
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// The dialect this document was parsed as.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// First opening tag with the given name (case-insensitive), in
    /// document order.
    #[must_use]
    pub fn find_element(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().copied().find(|&id| {
            self.tree
                .as_tag(id)
                .is_some_and(|data| !data.is_end && data.has_name(name))
        })
    }

    /// Concatenated character data of the node and its descendants.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(node) = self.tree.get(id) {
            match &node.kind {
                NodeKind::Text | NodeKind::Cdata => out.push_str(&node.raw),
                NodeKind::Tag(data) => {
                    for &child in &data.children {
                        self.collect_text(child, out);
                    }
                }
                _ => {}
            }
        }
    }
}

/// Parse one decoded text buffer under the given dialect hint.
///
/// Never fails: malformed spans degrade to text nodes and mismatched tags
/// are corrected by the tree builder. The whole tree is built eagerly;
/// parsing performs no I/O and has no suspension points, so files can be
/// parsed in parallel with one worker per file. Warning deduplication is
/// reset here, so tolerated-construct warnings print once per file rather
/// than once per process.
#[must_use]
pub fn parse(source: &str, dialect: Dialect) -> Document {
    marklint_common::warning::clear_warnings();
    let chain = TokenizerChain::for_dialect(dialect);
    let mut tree = chain.run(source);
    tree::builder::build(&mut tree);

    let nodes = if dialect == Dialect::Vue {
        vue::extract_template(&tree)
    } else {
        tree.ids().collect()
    };

    Document {
        tree,
        nodes,
        dialect,
    }
}
