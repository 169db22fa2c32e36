//! Catch-all text recognizer.
//!
//! Always last in the chain and always succeeds on non-empty input, which
//! is what guarantees the lexer makes progress on arbitrarily malformed
//! markup: anything no other recognizer claims degrades to text.
//!
//! When the previously emitted node is an unclosed `<script>` open tag the
//! recognizer switches to raw-text behavior and consumes everything up to
//! a case-insensitive `</script`, so `<` inside script bodies
//! (`if (a < b)`) is never misread as markup. End of input is an implicit
//! terminator in both modes.

use marklint_nodes::{Node, NodeKind, Span};

use crate::cursor::Cursor;

/// Try to consume a text run at the cursor position. Returns `None` only
/// at end of input.
pub(crate) fn try_consume(cursor: &mut Cursor, in_script: bool) -> Option<Node> {
    if cursor.is_at_end() {
        return None;
    }
    let start = cursor.position();
    let mut raw = String::new();

    if in_script {
        while !cursor.is_at_end() && !cursor.starts_with_ignore_case("</script") {
            cursor.consume_into(1, &mut raw);
        }
    } else {
        // The first character is consumed unconditionally: if we got here
        // on a '<', every other recognizer already rejected it, so it is
        // plain text.
        cursor.consume_into(1, &mut raw);
        while let Some(c) = cursor.peek(0) {
            if c == '<' {
                break;
            }
            cursor.consume_into(1, &mut raw);
        }
    }

    if raw.is_empty() {
        // Unclosed script followed immediately by </script yields nothing
        // for us; let the element recognizer take it on the next round.
        cursor.consume_into(1, &mut raw);
    }
    let span = Span::new(start, cursor.position());
    Some(Node::new(raw, span, NodeKind::Text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumes_up_to_next_tag() {
        let mut cursor = Cursor::new("hello <b>");
        let node = try_consume(&mut cursor, false).unwrap();
        assert_eq!(node.raw, "hello ");
        assert_eq!(cursor.peek(0), Some('<'));
    }

    #[test]
    fn test_leading_less_than_is_consumed() {
        let mut cursor = Cursor::new("< b <i>");
        let node = try_consume(&mut cursor, false).unwrap();
        assert_eq!(node.raw, "< b ");
    }

    #[test]
    fn test_script_mode_ignores_inner_less_than() {
        let mut cursor = Cursor::new("if (a < b) {}</script>");
        let node = try_consume(&mut cursor, true).unwrap();
        assert_eq!(node.raw, "if (a < b) {}");
        assert!(cursor.starts_with("</script>"));
    }

    #[test]
    fn test_script_mode_eof_terminates() {
        let mut cursor = Cursor::new("var x = 1;");
        let node = try_consume(&mut cursor, true).unwrap();
        assert_eq!(node.raw, "var x = 1;");
        assert!(cursor.is_at_end());
    }
}
