use std::collections::VecDeque;
use std::iter::FusedIterator;

use super::cursor::Cursor;
use super::token::{Token, TokenKind};
use crate::{Error, ErrorKind};

pub(crate) const BREAKING_PHRASE: &str = "BREAKING CHANGE";
pub(crate) const BREAKING_ARROW: &str = "BREAKING-CHANGE";

const BREAKING_KEYS: [&str; 2] = ["BREAKING CHANGE: ", "BREAKING-CHANGE: "];

/// A footer token found by looking ahead from the start of a line.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct FooterKey {
    chars: usize,
    breaking: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum State {
    Type,
    Scope,
    DescDelimiter,
    Description,
    HeaderBlankLine,
    BodyOrFooter,
    Body,
    BodyBlankLine(FooterKey),
    FooterToken(FooterKey),
    FooterDelimiter,
    FooterValue,
}

type Step = Result<Option<State>, Error>;

/// Lazily lexes a commit message into [`Token`]s.
///
/// Yields every token in source order. A malformed message yields the tokens
/// read so far followed by a single `Err`, after which the iterator is done.
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    cursor: Cursor<'a>,
    state: Option<State>,
    queue: VecDeque<Token<'a>>,
    error: Option<Error>,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(message: &'a str) -> Self {
        Self {
            cursor: Cursor::new(message),
            state: Some(State::Type),
            queue: VecDeque::with_capacity(2),
            error: None,
        }
    }

    fn emit(&mut self, kind: TokenKind) {
        let token = self.cursor.emit(kind);
        self.queue.push_back(token);
    }

    fn fail(&self, kind: ErrorKind) -> Step {
        Err(Error::at(kind, self.cursor.position()))
    }

    fn step(&mut self, state: State) -> Step {
        match state {
            State::Type => self.type_(),
            State::Scope => self.scope(),
            State::DescDelimiter => self.desc_delimiter(),
            State::Description => self.description(),
            State::HeaderBlankLine => self.header_blank_line(),
            State::BodyOrFooter => self.body_or_footer(),
            State::Body => self.body(),
            State::BodyBlankLine(key) => self.body_blank_line(key),
            State::FooterToken(key) => self.footer_token(key),
            State::FooterDelimiter => self.footer_delimiter(),
            State::FooterValue => self.footer_value(),
        }
    }

    // <type>            ::= <any UTF8-octets except newline or parens or ":" or "!:" or whitespace>+
    fn type_(&mut self) -> Step {
        loop {
            match self.cursor.peek() {
                None if self.cursor.current().is_empty() => {
                    return self.fail(ErrorKind::MissingType);
                }
                None => return self.fail(ErrorKind::MissingScopeOrDescription),
                Some(c @ (':' | '!' | '(')) => {
                    if self.cursor.current().is_empty() {
                        return self.fail(ErrorKind::MissingType);
                    }
                    self.emit(TokenKind::HeaderType);
                    if c != '(' {
                        return Ok(Some(State::DescDelimiter));
                    }
                    self.cursor.next_char();
                    self.emit(TokenKind::LeftScopeDelim);
                    return Ok(Some(State::Scope));
                }
                Some(c) if !is_type_char(c) => return self.fail(ErrorKind::InvalidTypeChar(c)),
                Some(_) => {
                    self.cursor.next_char();
                }
            }
        }
    }

    // <scope>           ::= <any UTF8-octets except newline or parens>+
    fn scope(&mut self) -> Step {
        loop {
            match self.cursor.peek() {
                None => return self.fail(ErrorKind::ScopeMissingParen),
                Some(')') => {
                    if self.cursor.current().is_empty() {
                        return self.fail(ErrorKind::ScopeEmpty);
                    }
                    self.emit(TokenKind::HeaderScope);
                    self.cursor.next_char();
                    self.emit(TokenKind::RightScopeDelim);
                    return Ok(Some(State::DescDelimiter));
                }
                Some(c) if !is_scope_char(c) => {
                    return self.fail(ErrorKind::InvalidScopeChar(c));
                }
                Some(_) => {
                    self.cursor.next_char();
                }
            }
        }
    }

    // ["!"], ":", " "
    fn desc_delimiter(&mut self) -> Step {
        if self.cursor.take_if_next('!') {
            self.emit(TokenKind::Breaking);
        }

        if !(self.cursor.take_if_next(':') && self.cursor.take_if_next(' ')) {
            return self.fail(ErrorKind::DescriptionMissingDelimiter);
        }
        self.emit(TokenKind::DescDelim);

        Ok(Some(State::Description))
    }

    // <text>            ::= <any UTF8-octets except newline>*
    fn description(&mut self) -> Step {
        self.cursor.take_while(|c| c != '\n');
        if self.cursor.current().trim().is_empty() {
            return self.fail(ErrorKind::MissingDescription);
        }
        self.emit(TokenKind::Description);

        match self.cursor.peek() {
            Some(_) => Ok(Some(State::HeaderBlankLine)),
            None => Ok(None),
        }
    }

    fn header_blank_line(&mut self) -> Step {
        if !self.skip_blank_lines() {
            return self.fail(ErrorKind::HeaderMissingBlankLine);
        }

        Ok(Some(State::BodyOrFooter))
    }

    fn body_or_footer(&mut self) -> Step {
        match footer_key(&mut self.cursor) {
            Some(key) => Ok(Some(State::FooterToken(key))),
            None => Ok(Some(State::Body)),
        }
    }

    fn body(&mut self) -> Step {
        let Some(key) = self.take_until_footer_key() else {
            self.emit(TokenKind::Body);
            return Ok(None);
        };

        // back to the last character that is not a newline
        loop {
            self.cursor.rewind();
            if self.cursor.peek() != Some('\n') {
                break;
            }
        }
        self.cursor.next_char();
        self.emit(TokenKind::Body);

        Ok(Some(State::BodyBlankLine(key)))
    }

    fn body_blank_line(&mut self, key: FooterKey) -> Step {
        if !self.skip_blank_lines() {
            return self.fail(ErrorKind::BodyMissingBlankLine);
        }

        Ok(Some(State::FooterToken(key)))
    }

    // <token>           ::= "BREAKING CHANGE" | "BREAKING-CHANGE" | <letter, digit or "-">+
    fn footer_token(&mut self, key: FooterKey) -> Step {
        for _ in 0..key.chars {
            self.cursor.next_char();
        }
        if key.breaking {
            self.emit(TokenKind::Breaking);
        } else {
            self.emit(TokenKind::FooterKey);
        }

        Ok(Some(State::FooterDelimiter))
    }

    // <separator>       ::= ": " | " #"
    fn footer_delimiter(&mut self) -> Step {
        // the separator was already checked by `footer_key`
        self.cursor.next_char();
        self.cursor.next_char();
        self.emit(TokenKind::FooterDelim);

        Ok(Some(State::FooterValue))
    }

    fn footer_value(&mut self) -> Step {
        if self.cursor.peek().is_none() {
            return Ok(None);
        }

        let key = self.take_until_footer_key();
        self.emit(TokenKind::FooterValue);

        Ok(key.map(State::FooterToken))
    }

    /// Consume a run of newlines, succeeding when it contains an empty line.
    fn skip_blank_lines(&mut self) -> bool {
        self.cursor.take_while(|c| c == '\n');
        if self.cursor.current().len() < 2 {
            return false;
        }
        self.cursor.ignore();
        true
    }

    /// Consume everything up to the start of the next line that begins with a
    /// footer token.
    ///
    /// Leaves the cursor just after the newline preceding that token.
    fn take_until_footer_key(&mut self) -> Option<FooterKey> {
        loop {
            // a footer token has to begin at the start of a line
            if self.cursor.next_char()? == '\n' {
                if let Some(key) = footer_key(&mut self.cursor) {
                    return Some(key);
                }
            }
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Token<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.queue.pop_front() {
                return Some(Ok(token));
            }
            if let Some(err) = self.error.take() {
                return Some(Err(err));
            }

            let state = self.state.take()?;
            match self.step(state) {
                Ok(next) => self.state = next,
                Err(err) => self.error = Some(err),
            }
        }
    }
}

impl FusedIterator for Tokens<'_> {}

/// Look ahead for a footer token followed by its separator.
///
/// The cursor is left where it was.
fn footer_key(cursor: &mut Cursor<'_>) -> Option<FooterKey> {
    if BREAKING_KEYS.iter().any(|key| cursor.starts_with(key)) {
        return Some(FooterKey {
            chars: BREAKING_PHRASE.len(),
            breaking: true,
        });
    }

    let mut chars = 0;
    let mut c = cursor.next_char();
    while c.is_some_and(is_footer_key_char) {
        chars += 1;
        c = cursor.next_char();
    }
    let separated = match c {
        Some(':') => cursor.peek() == Some(' '),
        Some(' ') => cursor.peek() == Some('#'),
        _ => false,
    };

    for _ in 0..=chars {
        cursor.rewind();
    }

    (chars > 0 && separated).then_some(FooterKey {
        chars,
        breaking: false,
    })
}

fn is_type_char(c: char) -> bool {
    !matches!(c, '\n' | '(' | ')' | ':') && !c.is_whitespace()
}

fn is_scope_char(c: char) -> bool {
    !matches!(c, '\n' | '(' | ')')
}

// letters and decimal digits; other numerics such as `½` end the key
fn is_footer_key_char(c: char) -> bool {
    c.is_alphabetic() || c.is_ascii_digit() || c == '-'
}
