//! Integration tests for the source-tree arena.

use marklint_nodes::{Node, NodeKind, Position, SourceTree, Span, TagData};

fn tag_node(name: &str) -> Node {
    Node::new(
        format!("<{name}>"),
        Span::new(Position::START, Position::new(1, name.len() + 3)),
        NodeKind::Tag(TagData::new(name.to_string(), false)),
    )
}

fn text_node(raw: &str) -> Node {
    Node::new(
        raw.to_string(),
        Span::new(Position::START, Position::new(1, raw.len() + 1)),
        NodeKind::Text,
    )
}

#[test]
fn test_arena_order_is_document_order() {
    let mut tree = SourceTree::new();
    let a = tree.alloc(tag_node("a"));
    let b = tree.alloc(tag_node("b"));
    let c = tree.alloc(text_node("x"));
    assert!(a < b && b < c);
    let ids: Vec<_> = tree.ids().collect();
    assert_eq!(ids, vec![a, b, c]);
}

#[test]
fn test_attach_sets_parent_and_child_order() {
    let mut tree = SourceTree::new();
    let parent = tree.alloc(tag_node("ul"));
    let first = tree.alloc(tag_node("li"));
    let second = tree.alloc(tag_node("li"));
    tree.attach(parent, first);
    tree.attach(parent, second);

    assert_eq!(tree.parent(first), Some(parent));
    assert_eq!(tree.parent(second), Some(parent));
    assert_eq!(tree.children(parent), &[first, second]);
    assert_eq!(tree.children(first), &[]);
}

#[test]
fn test_ancestors_terminate() {
    let mut tree = SourceTree::new();
    let a = tree.alloc(tag_node("a"));
    let b = tree.alloc(tag_node("b"));
    let c = tree.alloc(text_node("x"));
    tree.attach(a, b);
    tree.attach(b, c);

    let chain: Vec<_> = tree.ancestors(c).collect();
    assert_eq!(chain, vec![b, a]);
    assert!(tree.is_descendant_of(c, a));
    assert!(!tree.is_descendant_of(a, c));
}

#[test]
fn test_as_text_only_for_textual_nodes() {
    let mut tree = SourceTree::new();
    let t = tree.alloc(text_node("hello"));
    let g = tree.alloc(tag_node("p"));
    assert_eq!(tree.as_text(t), Some("hello"));
    assert_eq!(tree.as_text(g), None);
    assert!(tree.as_tag(g).is_some());
}

#[test]
fn test_tag_attribute_lookup_case_insensitive() {
    let mut data = TagData::new("input".to_string(), false);
    data.attributes.push(marklint_nodes::Attribute {
        name: "TYPE".to_string(),
        value: Some("text".to_string()),
        quote: Some('"'),
        line: 1,
    });
    assert_eq!(data.attribute_value("type"), Some("text"));
    assert!(data.attribute("missing").is_none());
    assert!(data.has_name("INPUT"));
}
