//! The ordered recognizer chain and the lexer main loop.
//!
//! At each cursor position the recognizers are tried in priority order;
//! the first whose start pattern matches consumes exactly one token. The
//! chain is a per-session value constructed from the dialect hint — there
//! is no global tokenizer state, so parses with different dialects can run
//! concurrently.

use marklint_nodes::{NodeKind, SourceTree};

use crate::cursor::Cursor;
use crate::dialect::Dialect;
use crate::tokenizer::delimited::{
    CDATA, DOCTYPE, DelimitedSyntax, EMBEDDED_DIRECTIVE, EMBEDDED_EXPRESSION, HTML_COMMENT,
    PROCESSING_DIRECTIVE, TEMPLATE_COMMENT,
};
use crate::tokenizer::{element, text};

/// One recognizer in the chain. A closed set: the chain is data, not a
/// hierarchy, so a session's active recognizers are plain values.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Recognizer {
    /// A fixed-delimiter syntax (comments, directives, expressions, CDATA).
    Delimited(DelimitedSyntax),
    /// The generic element tag recognizer.
    Element,
    /// The catch-all text recognizer. Must be last; always succeeds.
    Text,
}

/// The ordered recognizer list for one parse session.
#[derive(Debug, Clone)]
pub struct TokenizerChain {
    recognizers: Vec<Recognizer>,
}

impl TokenizerChain {
    /// Build the recognizer chain active for the given dialect.
    ///
    /// Order matters twice over: first match wins, and several syntaxes
    /// share prefixes (`<%--` before `<%@` before `<%`; `<!--` and
    /// `<!DOCTYPE` and `<![CDATA[` all start with `<!`).
    #[must_use]
    pub fn for_dialect(dialect: Dialect) -> Self {
        let mut recognizers = vec![Recognizer::Delimited(HTML_COMMENT)];
        if matches!(dialect, Dialect::Jsp | Dialect::Generic) {
            recognizers.push(Recognizer::Delimited(TEMPLATE_COMMENT));
        }
        recognizers.push(Recognizer::Delimited(DOCTYPE));
        recognizers.push(Recognizer::Delimited(PROCESSING_DIRECTIVE));
        if matches!(dialect, Dialect::Jsp | Dialect::Generic) {
            recognizers.push(Recognizer::Delimited(EMBEDDED_DIRECTIVE));
            recognizers.push(Recognizer::Delimited(EMBEDDED_EXPRESSION));
        }
        recognizers.push(Recognizer::Delimited(CDATA));
        recognizers.push(Recognizer::Element);
        recognizers.push(Recognizer::Text);
        Self { recognizers }
    }

    /// Run the chain over the whole input, producing the flat node
    /// sequence in document order. Never fails: the trailing text
    /// recognizer consumes anything the others reject.
    #[must_use]
    pub fn run(&self, source: &str) -> SourceTree {
        let mut cursor = Cursor::new(source);
        let mut tree = SourceTree::new();
        // Raw-text mode: set while the last emitted tag is an unclosed
        // <script> open tag, cleared by the next tag token.
        let mut in_script = false;

        while !cursor.is_at_end() {
            // Inside a script body everything up to the closing tag is raw
            // text, so the rest of the chain never sees it.
            let node = if in_script && !cursor.starts_with_ignore_case("</script") {
                text::try_consume(&mut cursor, true)
            } else {
                self.recognizers.iter().find_map(|recognizer| match recognizer {
                    Recognizer::Delimited(syntax) => syntax.try_consume(&mut cursor),
                    Recognizer::Element => element::try_consume(&mut cursor),
                    Recognizer::Text => text::try_consume(&mut cursor, in_script),
                })
            };
            if let Some(node) = node {
                if let NodeKind::Tag(data) = &node.kind {
                    in_script = data.is_open() && data.has_name("script");
                }
                let _ = tree.alloc(node);
            }
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_wins_on_shared_prefixes() {
        let chain = TokenizerChain::for_dialect(Dialect::Jsp);
        let tree = chain.run("<%-- c --%><%@ page %><% x %>");
        let kinds: Vec<_> = tree.nodes().map(|(_, n)| n.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Comment, NodeKind::Directive, NodeKind::Expression]
        );
    }

    #[test]
    fn test_script_body_with_tag_like_content_stays_raw() {
        let chain = TokenizerChain::for_dialect(Dialect::Html);
        let tree = chain.run("<script><div>x</div></script>");
        let raws: Vec<_> = tree.nodes().map(|(_, n)| n.raw.as_str()).collect();
        assert_eq!(raws, vec!["<script>", "<div>x</div>", "</script>"]);
    }

    #[test]
    fn test_jsp_syntax_inactive_for_html() {
        let chain = TokenizerChain::for_dialect(Dialect::Html);
        let tree = chain.run("<% x %>");
        // without the expression recognizer this lexes as tag-less text
        assert!(
            tree.nodes()
                .all(|(_, n)| !matches!(n.kind, NodeKind::Expression))
        );
    }
}
