//! Recognizer for tokens bracketed by fixed start/end delimiter sequences.
//!
//! Comments, DOCTYPE declarations, processing directives, embedded-template
//! directives and expressions, and CDATA blocks all share one shape: a
//! start sequence, a body, an end sequence. One table-driven recognizer
//! covers all of them.
//!
//! The end-matcher counts nested occurrences of the start sequence (nested
//! `<!--` is not expected in practice, but the mechanism supports it) and,
//! for syntaxes that embed code, toggles a quoting flag on `"` so an end
//! sequence inside a quoted string does not terminate the token. An
//! unterminated token consumes to end of input; that is tolerated, not an
//! error.

use marklint_common::warning::warn_once;
use marklint_nodes::{Node, NodeKind, Span};

use crate::cursor::Cursor;

/// One bracketed syntax the lexer can recognize.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DelimitedSyntax {
    /// Human-readable name, used in warnings only.
    pub(crate) label: &'static str,
    /// Start delimiter sequence.
    pub(crate) start: &'static str,
    /// End delimiter sequence.
    pub(crate) end: &'static str,
    /// Whether the start sequence matches case-insensitively
    /// (`<!DOCTYPE` vs `<!doctype`).
    pub(crate) case_insensitive: bool,
    /// Whether `"` toggles a quoting flag that masks delimiter sequences.
    /// On for code-carrying syntaxes (directives, expressions), off for
    /// comments and CDATA, where a lone `"` is ordinary prose.
    pub(crate) quote_aware: bool,
    /// Node kind produced on a match.
    pub(crate) kind: DelimitedKind,
}

/// Node kind a [`DelimitedSyntax`] produces. CDATA is kept distinct from
/// plain text so the raw delimiters survive in `raw` while the traversal
/// contract still dispatches it as character data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DelimitedKind {
    /// `<!-- -->` or `<%-- --%>`.
    Comment,
    /// `<!DOCTYPE >`, `<? ?>`, or `<%@ %>`.
    Directive,
    /// `<% %>`.
    Expression,
    /// `<![CDATA[ ]]>`.
    Cdata,
}

impl DelimitedKind {
    const fn node_kind(self) -> NodeKind {
        match self {
            Self::Comment => NodeKind::Comment,
            Self::Directive => NodeKind::Directive,
            Self::Expression => NodeKind::Expression,
            Self::Cdata => NodeKind::Cdata,
        }
    }
}

/// HTML comment: `<!-- ... -->`.
pub(crate) const HTML_COMMENT: DelimitedSyntax = DelimitedSyntax {
    label: "comment",
    start: "<!--",
    end: "-->",
    case_insensitive: false,
    quote_aware: false,
    kind: DelimitedKind::Comment,
};

/// Template-engine comment: `<%-- ... --%>`. Must be tried before the
/// embedded directive and expression syntaxes, which share the `<%` prefix.
pub(crate) const TEMPLATE_COMMENT: DelimitedSyntax = DelimitedSyntax {
    label: "template comment",
    start: "<%--",
    end: "--%>",
    case_insensitive: false,
    quote_aware: false,
    kind: DelimitedKind::Comment,
};

/// DOCTYPE declaration: `<!DOCTYPE ... >`, case-insensitive.
pub(crate) const DOCTYPE: DelimitedSyntax = DelimitedSyntax {
    label: "doctype",
    start: "<!DOCTYPE",
    end: ">",
    case_insensitive: true,
    quote_aware: true,
    kind: DelimitedKind::Directive,
};

/// Processing directive: `<? ... ?>` (PHP blocks, XML declarations).
pub(crate) const PROCESSING_DIRECTIVE: DelimitedSyntax = DelimitedSyntax {
    label: "processing directive",
    start: "<?",
    end: "?>",
    case_insensitive: false,
    quote_aware: true,
    kind: DelimitedKind::Directive,
};

/// Embedded-template directive: `<%@ ... %>`. Must be tried before the
/// embedded expression, which shares the `<%` prefix.
pub(crate) const EMBEDDED_DIRECTIVE: DelimitedSyntax = DelimitedSyntax {
    label: "embedded directive",
    start: "<%@",
    end: "%>",
    case_insensitive: false,
    quote_aware: true,
    kind: DelimitedKind::Directive,
};

/// Embedded-template expression: `<% ... %>`.
pub(crate) const EMBEDDED_EXPRESSION: DelimitedSyntax = DelimitedSyntax {
    label: "embedded expression",
    start: "<%",
    end: "%>",
    case_insensitive: false,
    quote_aware: true,
    kind: DelimitedKind::Expression,
};

/// Literal data block: `<![CDATA[ ... ]]>`.
pub(crate) const CDATA: DelimitedSyntax = DelimitedSyntax {
    label: "CDATA block",
    start: "<![CDATA[",
    end: "]]>",
    case_insensitive: false,
    quote_aware: false,
    kind: DelimitedKind::Cdata,
};

impl DelimitedSyntax {
    /// Try to consume one token of this syntax at the cursor position.
    /// Returns `None` without consuming anything if the start sequence
    /// does not match.
    pub(crate) fn try_consume(&self, cursor: &mut Cursor) -> Option<Node> {
        let start_matches = if self.case_insensitive {
            cursor.starts_with_ignore_case(self.start)
        } else {
            cursor.starts_with(self.start)
        };
        if !start_matches {
            return None;
        }

        let start = cursor.position();
        let mut raw = String::new();
        cursor.consume_into(self.start.chars().count(), &mut raw);

        let mut depth = 1usize;
        let mut quoting = false;
        loop {
            if cursor.is_at_end() {
                warn_once(
                    "lexer",
                    &format!(
                        "unterminated {} starting at {start}, consumed to end of input",
                        self.label
                    ),
                );
                break;
            }
            if !quoting && cursor.starts_with(self.end) {
                cursor.consume_into(self.end.chars().count(), &mut raw);
                depth -= 1;
                if depth == 0 {
                    break;
                }
                continue;
            }
            if !quoting && self.start_matches_here(cursor) {
                cursor.consume_into(self.start.chars().count(), &mut raw);
                depth += 1;
                continue;
            }
            if let Some(c) = cursor.consume() {
                raw.push(c);
                if self.quote_aware && c == '"' {
                    quoting = !quoting;
                }
            }
        }

        let span = Span::new(start, cursor.position());
        Some(Node::new(raw, span, self.kind.node_kind()))
    }

    fn start_matches_here(&self, cursor: &Cursor) -> bool {
        if self.case_insensitive {
            cursor.starts_with_ignore_case(self.start)
        } else {
            cursor.starts_with(self.start)
        }
    }
}
