//! Integration tests for Vue single-file-component narrowing.

use marklint_nodes::NodeKind;
use marklint_parse::{Dialect, parse};

#[test]
fn test_only_template_contents_retained() {
    let doc = parse(
        "<template><p>hello</p></template>\n<script>export default {}</script>",
        Dialect::Vue,
    );
    // the wrapper pair itself is excluded
    for &id in doc.nodes() {
        if let Some(tag) = doc.tree().as_tag(id) {
            assert!(!tag.has_name("template"));
            assert!(!tag.has_name("script"));
        }
    }
    let p = doc.find_element("p").unwrap();
    assert_eq!(doc.text_content(p), "hello");
}

#[test]
fn test_second_top_level_template_ignored() {
    let doc = parse(
        "<template><p>one</p></template><template><p>two</p></template>",
        Dialect::Vue,
    );
    let texts: Vec<_> = doc
        .nodes()
        .iter()
        .filter_map(|&id| doc.tree().as_text(id))
        .collect();
    assert_eq!(texts, vec!["one"]);
}

#[test]
fn test_nested_template_retained() {
    let doc = parse(
        "<template><div><template v-if=\"x\"><span>s</span></template></div></template>",
        Dialect::Vue,
    );
    // the inner template is real content and survives narrowing
    let inner = doc.find_element("template").expect("inner template kept");
    assert!(doc.tree().as_tag(inner).unwrap().attribute("v-if").is_some());
    assert!(doc.find_element("span").is_some());
}

#[test]
fn test_no_template_block_yields_empty_list() {
    let doc = parse("<p>not a component</p>", Dialect::Vue);
    assert!(doc.nodes().is_empty());
    // the full tree is still there for tools that want it
    assert!(!doc.tree().is_empty());
}

#[test]
fn test_hierarchy_built_before_narrowing() {
    let doc = parse(
        "<template><ul><li>a<li>b</ul></template>",
        Dialect::Vue,
    );
    let ul = doc.find_element("ul").unwrap();
    let lis: Vec<_> = doc
        .tree()
        .children(ul)
        .iter()
        .filter(|&&c| matches!(doc.tree().get(c).map(|n| &n.kind), Some(NodeKind::Tag(_))))
        .collect();
    assert_eq!(lis.len(), 2);
}
