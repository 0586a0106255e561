/// The classification of a [`Token`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum TokenKind {
    /// The commit type, e.g. `feat`.
    HeaderType,
    /// The text between the scope parentheses.
    HeaderScope,
    /// `(`
    LeftScopeDelim,
    /// `)`
    RightScopeDelim,
    /// Either the `!` of the header or a `BREAKING CHANGE` / `BREAKING-CHANGE` footer token.
    Breaking,
    /// `: ` after the type or scope.
    DescDelim,
    /// The rest of the header line.
    Description,
    /// Everything between the header and the footers.
    Body,
    /// `: ` or ` #` after a footer token.
    FooterDelim,
    /// A footer token such as `Reviewed-by`.
    FooterKey,
    /// The, possibly multi-line, value of a footer.
    FooterValue,
}

/// A classified slice of the commit message.
///
/// `start` and `end` are byte offsets into the message the token was read
/// from, so `&message[token.start()..token.end()] == token.text()`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Token<'a> {
    kind: TokenKind,
    text: &'a str,
    start: usize,
    end: usize,
}

impl<'a> Token<'a> {
    pub(crate) const fn new(kind: TokenKind, text: &'a str, start: usize, end: usize) -> Self {
        Self {
            kind,
            text,
            start,
            end,
        }
    }

    /// The classification of the token.
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The verbatim text of the token.
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Byte offset of the first character.
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Byte offset one past the last character.
    pub const fn end(&self) -> usize {
        self.end
    }
}
