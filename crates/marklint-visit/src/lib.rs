//! Traversal dispatcher and the contract rule checks consume.
//!
//! Checks never walk the tree themselves. They implement [`NodeVisitor`]
//! and the dispatcher drives them over one parsed file in document order,
//! one pass per file:
//!
//! - `start_document` first, with the full flat node list — the safe
//!   place for a check to reset per-file state;
//! - per node, at its position in the flat list: `start_element`,
//!   `characters`, `comment`, `directive`, or `expression` — so a comment
//!   lexed between an element's open tag and its text fires between
//!   `start_element` and `characters`, never after the subtree;
//! - `end_element` with the *opening* tag node at the point its element
//!   closes: at its matching close tag, at the tag that implicitly closes
//!   it, immediately for void and self-closed tags, or at end of input
//!   for tags left dangling open. Standalone closing-tag tokens are not
//!   dispatched as events of their own;
//! - `end_document` last.
//!
//! The dispatcher replays the tree builder's open-element discipline over
//! the flat list, so start/end events bracket exactly the structure the
//! builder produced. Visitors are stateful values constructed fresh per
//! file (or reset in `start_document`); nothing here mutates the tree, so
//! one tree can be shared by any number of visitors in the same pass or
//! separate passes.

use marklint_nodes::{NodeId, NodeKind, SourceTree};
use marklint_parse::tree::builder::{close_element, pop_implicitly_closed};
use marklint_parse::tree::tables::is_void;

use serde::Serialize;

/// Callbacks a rule check registers interest in. All have empty default
/// bodies; a check overrides only what it needs.
pub trait NodeVisitor {
    /// Called once before any other callback, with the flat node list in
    /// document order (closing-tag tokens included). Reset per-file state
    /// here.
    fn start_document(&mut self, _tree: &SourceTree, _nodes: &[NodeId]) {}

    /// Called once after all nodes are visited.
    fn end_document(&mut self) {}

    /// An opening (or self-closed / void) element tag.
    fn start_element(&mut self, _tree: &SourceTree, _id: NodeId) {}

    /// The element opened by `id` is closing. `id` is the opening tag
    /// node, whether the close was explicit, implicit, or forced at end
    /// of input.
    fn end_element(&mut self, _tree: &SourceTree, _id: NodeId) {}

    /// A run of character data (text or CDATA).
    fn characters(&mut self, _tree: &SourceTree, _id: NodeId) {}

    /// An HTML or template-engine comment.
    fn comment(&mut self, _tree: &SourceTree, _id: NodeId) {}

    /// A DOCTYPE, processing directive, or embedded-template directive.
    fn directive(&mut self, _tree: &SourceTree, _id: NodeId) {}

    /// An embedded-template expression.
    fn expression(&mut self, _tree: &SourceTree, _id: NodeId) {}
}

/// Drive one visitor over one parsed file.
///
/// `nodes` is the flat list in document order (possibly dialect-narrowed);
/// `tree` is the arena it indexes into.
pub fn dispatch(tree: &SourceTree, nodes: &[NodeId], visitor: &mut dyn NodeVisitor) {
    visitor.start_document(tree, nodes);

    // Open-element stack replaying the tree builder's discipline, so
    // end_element fires exactly where the builder closed each element and
    // parentless kinds (comments, directives, expressions) land at their
    // own flat-list position, interleaved with the elements around them.
    let mut stack: Vec<NodeId> = Vec::new();

    for &id in nodes {
        let Some(node) = tree.get(id) else { continue };
        match &node.kind {
            NodeKind::Tag(data) => {
                let lower = data.name.to_ascii_lowercase();
                if data.is_end {
                    for closed in close_element(tree, &mut stack, &lower) {
                        visitor.end_element(tree, closed);
                    }
                } else {
                    for closed in pop_implicitly_closed(tree, &mut stack, &lower) {
                        visitor.end_element(tree, closed);
                    }
                    visitor.start_element(tree, id);
                    if data.self_closing || is_void(&lower) {
                        visitor.end_element(tree, id);
                    } else {
                        stack.push(id);
                    }
                }
            }
            NodeKind::Text | NodeKind::Cdata => visitor.characters(tree, id),
            NodeKind::Comment => visitor.comment(tree, id),
            NodeKind::Directive => visitor.directive(tree, id),
            NodeKind::Expression => visitor.expression(tree, id),
        }
    }

    // Elements left dangling open at end of input close innermost-first.
    while let Some(open) = stack.pop() {
        visitor.end_element(tree, open);
    }
    visitor.end_document();
}

/// One reported rule violation, in user-facing 1-based coordinates.
///
/// The parser core never raises these itself; violation semantics belong
/// entirely to external checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Key of the rule that raised this violation.
    pub rule_key: String,
    /// Human-readable message.
    pub message: String,
    /// 1-based line the violating span starts on.
    pub start_line: usize,
    /// 1-based column the violating span starts at.
    pub start_column: usize,
    /// 1-based line the violating span ends on (exclusive end position).
    pub end_line: usize,
    /// 1-based column the violating span ends at (exclusive).
    pub end_column: usize,
}

impl Violation {
    /// Build a violation spanning exactly the given node.
    #[must_use]
    pub fn for_node(tree: &SourceTree, id: NodeId, rule_key: &str, message: &str) -> Self {
        let span = tree.get(id).map(|n| n.span);
        let (start, end) = span.map_or_else(
            || {
                let p = marklint_nodes::Position::START;
                (p, p)
            },
            |s| (s.start, s.end),
        );
        Self {
            rule_key: rule_key.to_string(),
            message: message.to_string(),
            start_line: start.line,
            start_column: start.column,
            end_line: end.line,
            end_column: end.column,
        }
    }
}
