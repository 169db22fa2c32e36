//! Recognizer and sub-parser for element tags.
//!
//! Recognition happens in two passes, both tolerant of malformed input:
//!
//! 1. The recognizer validates that `<`, `</`, or `<!` is followed by a
//!    legal markup name-start character (so `a < b` in prose is never
//!    mistaken for a tag), then consumes the whole tag span through the
//!    matching `>`, skipping quoted attribute values so a `>` inside a
//!    value does not terminate the span.
//! 2. The span is re-scanned by a three-mode state machine that extracts
//!    the tag name and the ordered attribute list, including the
//!    nested-quote matcher for values that themselves contain quotes,
//!    brackets, or tag-like template syntax.

use marklint_common::warning::warn_once;
use marklint_nodes::{Attribute, Node, NodeKind, Span, TagData};

use strum_macros::Display;

use crate::cursor::Cursor;

/// Recursion guard for nested tags inside attribute position. Real
/// templates nest one or two levels; anything deeper is treated as an
/// unterminated span.
const MAX_NESTED_TAG_DEPTH: usize = 16;

/// Legal first character of a markup name: ASCII letter, `:`, `_`, or one
/// of the XML `NameStartChar` Unicode ranges. The supplementary-plane
/// range is what a UTF-16 implementation would reach via surrogate pairs.
pub(crate) const fn is_name_start_char(c: char) -> bool {
    matches!(c,
        'A'..='Z' | 'a'..='z' | ':' | '_'
        | '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}' | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}' | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

/// True if the `<` at the cursor opens a tag rather than being a stray
/// less-than in text: the character after `<` (or `</`) must be a legal
/// name-start character.
pub(crate) fn is_tag_start(cursor: &Cursor) -> bool {
    if cursor.peek(0) != Some('<') {
        return false;
    }
    match cursor.peek(1) {
        Some('/' | '!') => cursor.peek(2).is_some_and(is_name_start_char),
        Some(c) => is_name_start_char(c),
        None => false,
    }
}

/// Try to consume one element tag at the cursor position. Returns `None`
/// without consuming anything if this is not a tag start.
pub(crate) fn try_consume(cursor: &mut Cursor) -> Option<Node> {
    if !is_tag_start(cursor) {
        return None;
    }
    let is_end = cursor.peek(1) == Some('/');

    let start = cursor.position();
    let mut raw = String::new();
    let terminated = consume_tag_span(cursor, &mut raw, 0);
    if !terminated {
        warn_once(
            "lexer",
            &format!("unterminated tag starting at {start}, consumed to end of input"),
        );
    }

    let mut data = parse_tag_span(&raw, start.line);
    data.is_end = is_end;
    data.self_closing = !is_end && terminated && raw.ends_with("/>");

    let span = Span::new(start, cursor.position());
    Some(Node::new(raw, span, NodeKind::Tag(data)))
}

/// Consume a tag span from the `<` at the cursor through the matching `>`,
/// appending everything to `raw`. Quoted attribute values are skipped with
/// the nested-quote matcher; a nested `<` that itself looks like a tag
/// start deepens the span (structural-directive brackets can contain
/// tag-like syntax). Returns false if the span ran to end of input.
fn consume_tag_span(cursor: &mut Cursor, raw: &mut String, depth: usize) -> bool {
    if depth >= MAX_NESTED_TAG_DEPTH {
        return false;
    }
    // opening '<'
    cursor.consume_into(1, raw);
    while let Some(c) = cursor.peek(0) {
        match c {
            '"' | '\'' => {
                cursor.consume_into(1, raw);
                let _ = consume_quoted(cursor, c, raw);
            }
            '>' => {
                cursor.consume_into(1, raw);
                return true;
            }
            '<' if is_tag_start(cursor) => {
                if !consume_tag_span(cursor, raw, depth + 1) {
                    return false;
                }
            }
            _ => cursor.consume_into(1, raw),
        }
    }
    false
}

/// Scan a quoted attribute value. The cursor stands just past the opening
/// quote `outer`; on return it stands just past the matching close. All
/// consumed characters (closing quote included) are appended to `raw`; the
/// returned string is the unescaped value, closing quote excluded.
///
/// The matcher keeps a stack of open quote characters seeded with `outer`
/// and a bracket-depth counter over unescaped `(`/`[` and `)`/`]`:
///
/// - a quote equal to the stack top closes that level;
/// - a *different* quote opens a nested level, which handles
///   differently-quoted template expressions like
///   `class="<c:if test='${x}'>"`;
/// - the *same* quote as `outer`, met while bracket depth is positive and
///   only the outer level is open, opens a nested level instead of
///   closing, which handles indexer syntax like `value="@dict["key"]"`.
///
/// The value ends when the stack empties. This is a heuristic, not a
/// grammar; it matches what template authors actually write.
fn consume_quoted(cursor: &mut Cursor, outer: char, raw: &mut String) -> String {
    let mut stack = vec![outer];
    let mut bracket_depth = 0usize;
    let mut value = String::new();

    while let Some(c) = cursor.peek(0) {
        // A backslash-escaped quote is unescaped into the value and is
        // inert for matching purposes.
        if c == '\\' && matches!(cursor.peek(1), Some('"' | '\'')) {
            let _ = cursor.consume();
            raw.push('\\');
            if let Some(q) = cursor.consume() {
                raw.push(q);
                value.push(q);
            }
            continue;
        }
        // An escaped bracket stays literal and never moves the depth
        // counter; only quote escapes are unescaped.
        if c == '\\' && matches!(cursor.peek(1), Some('(' | '[' | ')' | ']')) {
            let _ = cursor.consume();
            raw.push('\\');
            value.push('\\');
            if let Some(b) = cursor.consume() {
                raw.push(b);
                value.push(b);
            }
            continue;
        }
        let Some(c) = cursor.consume() else { break };
        raw.push(c);
        match c {
            '(' | '[' => {
                bracket_depth += 1;
                value.push(c);
            }
            ')' | ']' => {
                bracket_depth = bracket_depth.saturating_sub(1);
                value.push(c);
            }
            '"' | '\'' => {
                if bracket_depth > 0 && stack.len() == 1 && c == outer {
                    stack.push(c);
                    value.push(c);
                } else if stack.last() == Some(&c) {
                    let _ = stack.pop();
                    if stack.is_empty() {
                        break;
                    }
                    value.push(c);
                } else {
                    stack.push(c);
                    value.push(c);
                }
            }
            _ => value.push(c),
        }
    }
    value
}

/// The three modes of the tag-span scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
enum ScanMode {
    /// Accumulating the tag name.
    BeforeName,
    /// Between attributes, or accumulating an attribute name.
    BeforeAttrName,
    /// An `=` was seen; the next token is an attribute value.
    BeforeAttrValue,
}

/// Parse one recognized tag span (delimiters included) into a tag name and
/// ordered attribute list. `start_line` is the 1-based line the tag starts
/// on; attribute lines are offset from it.
fn parse_tag_span(raw: &str, start_line: usize) -> TagData {
    let mut cursor = Cursor::new(raw);
    let mut mode = ScanMode::BeforeName;
    let mut name = String::new();
    let mut attributes: Vec<Attribute> = Vec::new();

    while let Some(c) = cursor.peek(0) {
        if c.is_whitespace() {
            let _ = cursor.consume();
            continue;
        }
        match mode {
            ScanMode::BeforeName => match c {
                '=' => {
                    let _ = cursor.consume();
                    mode = ScanMode::BeforeAttrValue;
                }
                // structural / no-op characters in this sub-scan
                '>' | '/' | '%' | '@' | '<' | '!' => {
                    let _ = cursor.consume();
                }
                _ => {
                    name = take_while(&mut cursor, |c| {
                        !matches!(c, '=' | '>' | '/') && !c.is_whitespace()
                    });
                    mode = ScanMode::BeforeAttrName;
                }
            },
            ScanMode::BeforeAttrName => match c {
                '=' => {
                    let _ = cursor.consume();
                    mode = ScanMode::BeforeAttrValue;
                }
                '>' | '/' | '%' | '@' => {
                    let _ = cursor.consume();
                }
                '<' => parse_nested_tag(&mut cursor, &mut attributes, start_line),
                _ => {
                    let line = start_line + cursor.position().line - 1;
                    let attr_name = take_while(&mut cursor, |c| {
                        !matches!(c, '=' | '>') && !c.is_whitespace()
                    });
                    attributes.push(Attribute::new(attr_name, line));
                }
            },
            ScanMode::BeforeAttrValue => match c {
                '=' => {
                    let _ = cursor.consume();
                }
                '"' | '\'' => {
                    let _ = cursor.consume();
                    let mut consumed = String::new();
                    let value = consume_quoted(&mut cursor, c, &mut consumed);
                    if let Some(attr) = attributes.last_mut() {
                        attr.value = Some(value);
                        attr.quote = Some(c);
                    }
                    mode = ScanMode::BeforeAttrName;
                }
                _ => {
                    let value = take_while(&mut cursor, |c| {
                        !matches!(c, '"' | '\'' | '=' | '<' | '>' | '`') && !c.is_whitespace()
                    });
                    if let Some(attr) = attributes.last_mut() {
                        attr.value = Some(value);
                    }
                    mode = ScanMode::BeforeAttrName;
                }
            },
        }
    }

    TagData {
        name,
        attributes,
        is_end: false,
        self_closing: false,
        children: Vec::new(),
    }
}

/// A `<` in attribute position starts a nested tag-like construct. The
/// complete nested span is stored as a synthetic attribute; if the nested
/// parse fails (no matching `>` within the enclosing span), the remaining
/// content is kept as a literal attribute instead.
fn parse_nested_tag(cursor: &mut Cursor, attributes: &mut Vec<Attribute>, start_line: usize) {
    let line = start_line + cursor.position().line - 1;
    if is_tag_start(cursor) {
        let mut nested_raw = String::new();
        if consume_tag_span(cursor, &mut nested_raw, 1) {
            attributes.push(Attribute::new(nested_raw, line));
            return;
        }
        warn_once(
            "lexer",
            "nested tag in attribute position did not terminate, kept as literal",
        );
        attributes.push(Attribute::new(nested_raw, line));
        return;
    }
    // a bare '<' that opens nothing is simply skipped
    let _ = cursor.consume();
}

/// Accumulate characters while `keep` holds.
fn take_while(cursor: &mut Cursor, keep: impl Fn(char) -> bool) -> String {
    let mut out = String::new();
    while let Some(c) = cursor.peek(0) {
        if !keep(c) {
            break;
        }
        let _ = cursor.consume();
        out.push(c);
    }
    out
}
