//! Position-annotated source tree for the marklint analysis core.
//!
//! This crate provides the arena-based node storage shared by the lexer,
//! the tree builder, and every downstream check.
//!
//! # Design
//!
//! All nodes live in a single arena ([`SourceTree`]) in **document order**:
//! the arena sequence is exactly the flat token sequence the lexer emitted.
//! Hierarchy is expressed through [`NodeId`] indices (`parent` on a node,
//! `children` on a tag), so the tree is representable without reference
//! cycles or lifetime entanglement and is trivially shareable read-only
//! once built.
//!
//! Only tag and text nodes ever participate in the hierarchy. Comments,
//! directives, and expressions stay parentless by design: some checks
//! detect "top-level" directives precisely by the absence of a tree parent.

use core::fmt;

/// A type-safe index into the source tree arena.
///
/// Arena order is document order, so comparing two `NodeId`s orders the
/// nodes as they appear in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

/// A 1-based line/column position in the source file.
///
/// Checks report diagnostics to users in these coordinates, so they must
/// stay exact through multi-line tokens (comments, CDATA blocks).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number, counted in characters.
    pub column: usize,
}

impl Position {
    /// The start of a file.
    pub const START: Self = Self { line: 1, column: 1 };

    /// Create a position from 1-based line and column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The source region a node was lexed from.
///
/// `end` is exclusive: it is the position of the first character *after*
/// the node's raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Position of the node's first character.
    pub start: Position,
    /// Position one past the node's last character.
    pub end: Position,
}

impl Span {
    /// Create a span from start and (exclusive) end positions.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// One attribute of a tag, as written in the source.
///
/// The attribute list on a tag preserves source order verbatim and retains
/// duplicate names; checks that care about duplicates rely on this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name, case as written.
    pub name: String,
    /// Attribute value, if one was given. `None` for bare attributes
    /// (`<input disabled>`).
    pub value: Option<String>,
    /// The quote character delimiting the value (`'` or `"`), if the value
    /// was quoted.
    pub quote: Option<char>,
    /// 1-based line the attribute name starts on.
    pub line: usize,
}

impl Attribute {
    /// Create a bare attribute (no value) at the given line.
    #[must_use]
    pub const fn new(name: String, line: usize) -> Self {
        Self {
            name,
            value: None,
            quote: None,
            line,
        }
    }
}

/// Tag-specific data for a [`NodeKind::Tag`] node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagData {
    /// Tag name, case as written (comparisons elsewhere are
    /// case-insensitive; the raw casing is kept for checks that flag it).
    pub name: String,
    /// Attributes in source order, duplicates retained.
    pub attributes: Vec<Attribute>,
    /// True for a `</name>` closing token.
    pub is_end: bool,
    /// True for a `<name ... />` token.
    pub self_closing: bool,
    /// Child nodes in document order. Owned by index: the arena owns the
    /// storage, this list owns the membership.
    pub children: Vec<NodeId>,
}

impl TagData {
    /// Create tag data for an element with the given name.
    #[must_use]
    pub const fn new(name: String, is_end: bool) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            is_end,
            self_closing: false,
            children: Vec::new(),
        }
    }

    /// True if this is an opening token (`<name ...>`), i.e. neither a
    /// closing token nor a self-closed one.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.is_end && !self.self_closing
    }

    /// Case-insensitive tag name comparison.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// First attribute with the given name (case-insensitive), if any.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Value of the first attribute with the given name, if present.
    #[must_use]
    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(|a| a.value.as_deref())
    }
}

/// The closed set of token categories the lexer can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// An element tag: opening, closing, or self-closed.
    Tag(TagData),
    /// A run of character data between tags.
    Text,
    /// A `<![CDATA[ ... ]]>` block. Treated as character data by the
    /// traversal contract ([`Node::is_textual`]).
    Cdata,
    /// An HTML comment (`<!-- -->`) or template-engine comment
    /// (`<%-- --%>`).
    Comment,
    /// A declaration or directive: DOCTYPE, processing directive
    /// (`<? ?>`), or embedded-template directive (`<%@ %>`).
    Directive,
    /// An embedded-template expression (`<% %>`).
    Expression,
}

/// One lexed node: its raw source text, its span, and its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// The raw source text this node was lexed from, delimiters included.
    /// Concatenating all nodes' raw text in arena order reproduces the
    /// input exactly.
    pub raw: String,
    /// Source region covered by `raw`.
    pub span: Span,
    /// Enclosing tag, if this node was attached during tree building.
    /// Set once for tag and text nodes, never for comments, directives,
    /// or expressions.
    pub parent: Option<NodeId>,
    /// Kind-specific data.
    pub kind: NodeKind,
}

impl Node {
    /// Create an unattached node.
    #[must_use]
    pub const fn new(raw: String, span: Span, kind: NodeKind) -> Self {
        Self {
            raw,
            span,
            parent: None,
            kind,
        }
    }

    /// Tag data, if this node is a tag.
    #[must_use]
    pub const fn as_tag(&self) -> Option<&TagData> {
        match &self.kind {
            NodeKind::Tag(data) => Some(data),
            _ => None,
        }
    }

    /// True if this node carries character data (text or CDATA).
    #[must_use]
    pub const fn is_textual(&self) -> bool {
        matches!(self.kind, NodeKind::Text | NodeKind::Cdata)
    }
}

/// Arena holding every node of one parsed file, in document order.
///
/// The lexer appends nodes as it consumes the input; the tree builder then
/// links them (setting `parent`, filling `children`) in a single forward
/// pass. After that the tree is read-only: nothing mutates it, so it may be
/// shared freely across concurrently running checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTree {
    /// All nodes, indexed by `NodeId`. Arena order is document order.
    nodes: Vec<Node>,
}

impl SourceTree {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no nodes have been lexed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node and return its ID. IDs are handed out in document
    /// order, so the lexer calls this exactly once per token.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID. Only the tree builder
    /// uses this; downstream consumers treat the tree as immutable.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Iterate all node IDs in document order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + use<> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Iterate all nodes in document order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Tag data of the node, if it is a tag.
    #[must_use]
    pub fn as_tag(&self, id: NodeId) -> Option<&TagData> {
        self.get(id).and_then(Node::as_tag)
    }

    /// Raw character data of the node, if it is textual.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id)
            .filter(|n| n.is_textual())
            .map(|n| n.raw.as_str())
    }

    /// Attach `child` to `parent`: set the child's parent link and append
    /// it to the parent's child list.
    ///
    /// Used only by the tree builder, which guarantees each node is
    /// attached at most once, always to the element currently innermost on
    /// its open stack. That discipline is what makes the tree acyclic.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a tag node or either ID is out of bounds,
    /// which indicates a tree-builder bug.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        assert_ne!(parent, child, "node attached to itself");
        self.nodes[child.0].parent = Some(parent);
        match &mut self.nodes[parent.0].kind {
            NodeKind::Tag(data) => data.children.push(child),
            _ => panic!("attach called with a non-tag parent"),
        }
    }

    /// Children of the node, in document order. Empty for non-tag nodes.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.as_tag(id).map_or(&[], |data| data.children.as_slice())
    }

    /// Parent of the node, if it was attached during tree building.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a SourceTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
