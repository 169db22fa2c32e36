//! Integration tests for the tokenizer chain.

use marklint_nodes::{NodeKind, Position, SourceTree};
use marklint_parse::{Dialect, TokenizerChain};

/// Helper to lex a string under the given dialect.
fn lex(input: &str, dialect: Dialect) -> SourceTree {
    TokenizerChain::for_dialect(dialect).run(input)
}

/// Helper to collect the node kinds in document order.
fn kinds(tree: &SourceTree) -> Vec<NodeKind> {
    tree.nodes().map(|(_, n)| n.kind.clone()).collect()
}

/// Concatenating all raw texts must reproduce the input exactly.
fn assert_lossless(input: &str, dialect: Dialect) {
    let tree = lex(input, dialect);
    let rebuilt: String = tree.nodes().map(|(_, n)| n.raw.as_str()).collect();
    assert_eq!(rebuilt, input, "tokenization lost characters");
}

#[test]
fn test_span_coverage_mixed_content() {
    assert_lossless(
        "<!DOCTYPE html>\n<html>\n<!-- a\ncomment -->\n<body class=\"x\">text & more</body>\n</html>\n",
        Dialect::Html,
    );
    assert_lossless(
        "<%@ page language=\"java\" %><ul><li>a<li>b</ul><%-- note --%><% render() %>",
        Dialect::Jsp,
    );
    assert_lossless("prose with a < b and <3 hearts", Dialect::Html);
    assert_lossless("<div", Dialect::Html);
    assert_lossless("<!-- never closed", Dialect::Html);
}

#[test]
fn test_progress_on_hostile_input() {
    // every recognizer must either consume or pass; the text recognizer
    // guarantees at least one character per round
    for input in ["<", "<<<<", "< % @ >", "<!-", "\n\n<", "<%", "<?"] {
        assert_lossless(input, Dialect::Generic);
    }
}

#[test]
fn test_idempotent_retokenization() {
    let input = "<div id=a><!-- c --><p>x</p></div>";
    let first = lex(input, Dialect::Html);
    let second = lex(input, Dialect::Html);
    assert_eq!(first, second);
}

#[test]
fn test_comment_kinds_and_positions() {
    let tree = lex("<p>\n<!-- c\nmore -->\nx</p>", Dialect::Html);
    let (_, comment) = tree
        .nodes()
        .find(|(_, n)| n.kind == NodeKind::Comment)
        .expect("comment node");
    assert_eq!(comment.raw, "<!-- c\nmore -->");
    assert_eq!(comment.span.start, Position::new(2, 1));
    assert_eq!(comment.span.end, Position::new(3, 9));
}

#[test]
fn test_doctype_is_directive() {
    let tree = lex("<!doctype HTML>", Dialect::Html);
    assert_eq!(tree.len(), 1);
    let (_, node) = tree.nodes().next().unwrap();
    assert_eq!(node.kind, NodeKind::Directive);
}

#[test]
fn test_cdata_block_single_node() {
    let tree = lex("<![CDATA[ a < b && c > d ]]>", Dialect::Html);
    assert_eq!(tree.len(), 1);
    let (_, node) = tree.nodes().next().unwrap();
    assert_eq!(node.kind, NodeKind::Cdata);
    assert_eq!(node.raw, "<![CDATA[ a < b && c > d ]]>");
}

#[test]
fn test_jsp_directive_and_expression() {
    let tree = lex("<%@ taglib uri=\"x\" %><% out.print(1); %>", Dialect::Jsp);
    let got = kinds(&tree);
    assert_eq!(got, vec![NodeKind::Directive, NodeKind::Expression]);
}

#[test]
fn test_processing_directive_php() {
    let tree = lex("<?php echo \"?>\"; ?>", Dialect::Php);
    assert_eq!(tree.len(), 1);
    let (_, node) = tree.nodes().next().unwrap();
    assert_eq!(node.kind, NodeKind::Directive);
    // the quoted "?>" must not terminate the directive
    assert_eq!(node.raw, "<?php echo \"?>\"; ?>");
}

#[test]
fn test_stray_less_than_stays_text() {
    let tree = lex("a < b", Dialect::Html);
    assert!(tree.nodes().all(|(_, n)| n.kind == NodeKind::Text));
    let rebuilt: String = tree.nodes().map(|(_, n)| n.raw.as_str()).collect();
    assert_eq!(rebuilt, "a < b");
}

#[test]
fn test_script_body_single_text_node() {
    let tree = lex("<script>if (a < b) {}</script>", Dialect::Html);
    let raws: Vec<_> = tree.nodes().map(|(_, n)| n.raw.as_str()).collect();
    assert_eq!(raws, vec!["<script>", "if (a < b) {}", "</script>"]);
    let (_, body) = tree.nodes().nth(1).unwrap();
    assert_eq!(body.kind, NodeKind::Text);
}

#[test]
fn test_script_case_insensitive_end() {
    let tree = lex("<SCRIPT>x < 1</Script>done", Dialect::Html);
    let raws: Vec<_> = tree.nodes().map(|(_, n)| n.raw.as_str()).collect();
    assert_eq!(raws, vec!["<SCRIPT>", "x < 1", "</Script>", "done"]);
}

#[test]
fn test_unclosed_script_runs_to_eof() {
    let tree = lex("<script>var a = 1;", Dialect::Html);
    let raws: Vec<_> = tree.nodes().map(|(_, n)| n.raw.as_str()).collect();
    assert_eq!(raws, vec!["<script>", "var a = 1;"]);
}

#[test]
fn test_multiline_token_position_accounting() {
    let tree = lex("<div\n  class=\"a\"\n>x", Dialect::Html);
    let (_, tag) = tree.nodes().next().unwrap();
    assert_eq!(tag.span.start, Position::new(1, 1));
    assert_eq!(tag.span.end, Position::new(3, 2));
    let (_, text) = tree.nodes().nth(1).unwrap();
    assert_eq!(text.span.start, Position::new(3, 2));
    assert_eq!(text.span.end, Position::new(3, 3));
}
