//! Position-tracking cursor over the input character stream.
//!
//! Every token the lexer emits carries exact 1-based line/column spans, so
//! all consumption goes through this cursor: it is the single place where
//! line/column accounting happens. Lookahead never consumes.

use marklint_nodes::Position;

/// A cursor over a pre-loaded character buffer.
///
/// The buffer is indexed by character, not byte, so bounded lookahead and
/// column counting are O(1) per character regardless of encoding width.
#[derive(Debug)]
pub struct Cursor {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Cursor {
    /// Create a cursor at the start of the given input.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Current position, 1-based. This is the position of the next
    /// unconsumed character (or one past the last character at end of
    /// input).
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// True once every character has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Look at the character `offset` positions ahead without consuming.
    /// `peek(0)` is the next character `consume` would return.
    #[must_use]
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// Consume the next character, advancing the line/column accounting.
    /// Returns `None` at end of input.
    pub fn consume(&mut self) -> Option<char> {
        let c = self.peek(0)?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Check if the next few characters match `target` exactly.
    #[must_use]
    pub fn starts_with(&self, target: &str) -> bool {
        target
            .chars()
            .enumerate()
            .all(|(i, t)| self.peek(i) == Some(t))
    }

    /// Check if the next few characters match `target` using ASCII
    /// case-insensitive comparison.
    #[must_use]
    pub fn starts_with_ignore_case(&self, target: &str) -> bool {
        target.chars().enumerate().all(|(i, t)| {
            self.peek(i)
                .is_some_and(|c| c.eq_ignore_ascii_case(&t))
        })
    }

    /// Consume `count` characters, appending them to `raw`. Stops early at
    /// end of input.
    pub fn consume_into(&mut self, count: usize, raw: &mut String) {
        for _ in 0..count {
            match self.consume() {
                Some(c) => raw.push(c),
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_tracking_across_newlines() {
        let mut cursor = Cursor::new("ab\ncd");
        assert_eq!(cursor.position(), Position::new(1, 1));
        assert_eq!(cursor.consume(), Some('a'));
        assert_eq!(cursor.consume(), Some('b'));
        assert_eq!(cursor.position(), Position::new(1, 3));
        assert_eq!(cursor.consume(), Some('\n'));
        assert_eq!(cursor.position(), Position::new(2, 1));
        assert_eq!(cursor.consume(), Some('c'));
        assert_eq!(cursor.position(), Position::new(2, 2));
    }

    #[test]
    fn test_peek_does_not_consume() {
        let cursor = Cursor::new("xy");
        assert_eq!(cursor.peek(0), Some('x'));
        assert_eq!(cursor.peek(1), Some('y'));
        assert_eq!(cursor.peek(2), None);
        assert_eq!(cursor.position(), Position::new(1, 1));
    }

    #[test]
    fn test_starts_with() {
        let cursor = Cursor::new("<!DOCTYPE html>");
        assert!(cursor.starts_with("<!"));
        assert!(!cursor.starts_with("<!doctype"));
        assert!(cursor.starts_with_ignore_case("<!doctype"));
    }
}
