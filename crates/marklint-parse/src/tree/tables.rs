//! Static element tables driving the tree builder.
//!
//! All lookups are ASCII case-insensitive; callers pass names lowercased.

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// Void elements cannot contain content and never take an end tag. The
/// tree builder never pushes them on the open stack, so they can never
/// acquire children.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose open tag stays open inside `head` without implicitly
/// closing it.
const HEAD_CONTENT: &[&str] = &[
    "base", "link", "meta", "noscript", "script", "style", "template", "title",
];

/// [§ 13.1.2.4 Optional tags](https://html.spec.whatwg.org/multipage/syntax.html#optional-tags)
///
/// Block-level tags that implicitly end an open `p` element: an open
/// paragraph's end tag can be omitted when any of these follows it.
const P_CLOSERS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "details",
    "div",
    "dl",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "ul",
];

/// Standard HTML element names. Stack recovery for a mismatched end tag
/// only discards open elements from this set; custom / component tag
/// names are left alone so legitimate custom-element nesting survives
/// malformed surrounding markup.
const KNOWN_ELEMENTS: &[&str] = &[
    "a", "abbr", "address", "area", "article", "aside", "audio", "b", "base", "bdi", "bdo",
    "blockquote", "body", "br", "button", "canvas", "caption", "cite", "code", "col", "colgroup",
    "data", "datalist", "dd", "del", "details", "dfn", "dialog", "div", "dl", "dt", "em", "embed",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "head", "header", "hgroup", "hr", "html", "i", "iframe", "img", "input", "ins", "kbd", "label",
    "legend", "li", "link", "main", "map", "mark", "menu", "meta", "meter", "nav", "noscript",
    "object", "ol", "optgroup", "option", "output", "p", "param", "picture", "pre", "progress",
    "q", "rb", "rp", "rt", "rtc", "ruby", "s", "samp", "script", "search", "section", "select",
    "slot", "small", "source", "span", "strong", "style", "sub", "summary", "sup", "table",
    "tbody", "td", "template", "textarea", "tfoot", "th", "thead", "time", "title", "tr", "track",
    "u", "ul", "var", "video", "wbr",
];

/// True if `name` (lowercase) is a void element.
#[must_use]
pub fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// True if `name` (lowercase) is a standard HTML element.
#[must_use]
pub fn is_known_element(name: &str) -> bool {
    KNOWN_ELEMENTS.contains(&name)
}

/// [§ 13.1.2.4 Optional tags](https://html.spec.whatwg.org/multipage/syntax.html#optional-tags)
///
/// True if an open `parent` element is implicitly closed by a new sibling
/// `incoming` tag being opened. Both names lowercase. Evaluated only while
/// the new tag is being opened, never retroactively.
#[must_use]
pub fn closes_implicitly(parent: &str, incoming: &str) -> bool {
    match parent {
        "head" => !HEAD_CONTENT.contains(&incoming),
        "li" => incoming == "li",
        "dt" | "dd" => matches!(incoming, "dt" | "dd"),
        "p" => P_CLOSERS.contains(&incoming),
        "rb" | "rp" | "rt" => matches!(incoming, "rtc" | "rb" | "rp" | "rt"),
        "rtc" => matches!(incoming, "rb" | "rtc"),
        "optgroup" => incoming == "optgroup",
        "option" => matches!(incoming, "option" | "optgroup"),
        "colgroup" => !matches!(incoming, "col" | "template"),
        "caption" => matches!(
            incoming,
            "caption" | "colgroup" | "thead" | "tbody" | "tr" | "tfoot"
        ),
        "thead" | "tbody" => matches!(incoming, "tbody" | "tfoot"),
        "tr" => !matches!(incoming, "td" | "th"),
        "td" | "th" => matches!(incoming, "td" | "th"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_elements() {
        assert!(is_void("br"));
        assert!(is_void("img"));
        assert!(!is_void("div"));
        assert!(!is_void("template"));
    }

    #[test]
    fn test_li_closes_li() {
        assert!(closes_implicitly("li", "li"));
        assert!(!closes_implicitly("li", "div"));
    }

    #[test]
    fn test_p_closes_on_block_level() {
        assert!(closes_implicitly("p", "div"));
        assert!(closes_implicitly("p", "p"));
        assert!(!closes_implicitly("p", "span"));
    }

    #[test]
    fn test_head_stays_open_for_metadata() {
        assert!(!closes_implicitly("head", "meta"));
        assert!(!closes_implicitly("head", "title"));
        assert!(closes_implicitly("head", "body"));
    }

    #[test]
    fn test_table_sections() {
        assert!(closes_implicitly("thead", "tbody"));
        assert!(closes_implicitly("tr", "tr"));
        assert!(!closes_implicitly("tr", "td"));
        assert!(closes_implicitly("td", "th"));
    }

    #[test]
    fn test_custom_elements_unknown() {
        assert!(is_known_element("template"));
        assert!(!is_known_element("my-widget"));
        assert!(!is_known_element("c:if"));
    }
}
