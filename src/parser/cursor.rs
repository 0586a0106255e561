use super::token::{Token, TokenKind};

/// A read position over the message with the ability to look ahead and undo.
///
/// Everything between `start` (the last emission point) and `pos` is the span
/// of the token currently being scanned. Rewinding can never cross `start`.
#[derive(Clone, Debug)]
pub(crate) struct Cursor<'a> {
    source: &'a str,
    start: usize,
    pos: usize,
    // `next_char` calls that hit the end of input since the last emission;
    // these are undone before any real character.
    eof_reads: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            source,
            start: 0,
            pos: 0,
            eof_reads: 0,
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Consume one character, `None` at the end of input.
    pub(crate) fn next_char(&mut self) -> Option<char> {
        match self.source[self.pos..].chars().next() {
            Some(c) => {
                self.pos += c.len_utf8();
                Some(c)
            }
            None => {
                self.eof_reads += 1;
                None
            }
        }
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    /// Undo exactly one `next_char`.
    pub(crate) fn rewind(&mut self) {
        if self.eof_reads > 0 {
            self.eof_reads -= 1;
            return;
        }

        debug_assert!(self.start < self.pos, "rewind past the last emission");
        if let Some(c) = self.current().chars().next_back() {
            self.pos -= c.len_utf8();
        }
    }

    /// Consume characters while `predicate` holds.
    pub(crate) fn take_while(&mut self, mut predicate: impl FnMut(char) -> bool) {
        while let Some(c) = self.next_char() {
            if !predicate(c) {
                break;
            }
        }
        self.rewind();
    }

    /// Consume the next character if it is `expected`.
    pub(crate) fn take_if_next(&mut self, expected: char) -> bool {
        if self.next_char() == Some(expected) {
            true
        } else {
            self.rewind();
            false
        }
    }

    /// Whether the unconsumed input starts with `literal`.
    pub(crate) fn starts_with(&self, literal: &str) -> bool {
        self.source[self.pos..].starts_with(literal)
    }

    /// The span scanned since the last emission.
    pub(crate) fn current(&self) -> &'a str {
        &self.source[self.start..self.pos]
    }

    pub(crate) fn emit(&mut self, kind: TokenKind) -> Token<'a> {
        let token = Token::new(kind, self.current(), self.start, self.pos);
        self.ignore();
        token
    }

    /// Drop the current span without producing a token.
    pub(crate) fn ignore(&mut self) {
        self.start = self.pos;
        self.eof_reads = 0;
    }
}
