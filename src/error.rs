//! All errors related to Conventional Commits.

use std::fmt;

/// The error returned when parsing a commit (or a version) fails.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    kind: ErrorKind,

    offset: Option<usize>,

    context: Option<String>,
}

impl Error {
    /// Create a new error from a `ErrorKind`.
    pub(crate) fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            offset: None,
            context: None,
        }
    }

    /// Create a new error pointing at a byte offset of the parsed input.
    pub(crate) fn at(kind: ErrorKind, offset: usize) -> Self {
        Self {
            offset: Some(offset),
            ..Self::new(kind)
        }
    }

    pub(crate) fn set_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// The kind of error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Byte offset into the (trailing-whitespace trimmed) message where parsing stopped.
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    /// The input that failed to parse, when known.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// See [`ErrorKind::is_header_error`].
    pub fn is_header_error(&self) -> bool {
        self.kind.is_header_error()
    }

    /// See [`ErrorKind::is_no_blank_line_error`].
    pub fn is_no_blank_line_error(&self) -> bool {
        self.kind.is_no_blank_line_error()
    }

    /// See [`ErrorKind::is_scope_error`].
    pub fn is_scope_error(&self) -> bool {
        self.kind.is_scope_error()
    }

    /// See [`ErrorKind::is_version_error`].
    pub fn is_version_error(&self) -> bool {
        self.kind.is_version_error()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)?;
        if let Some(offset) = self.offset {
            write!(f, " (at offset {offset})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

/// All possible error kinds returned when parsing a conventional commit.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The commit type is missing from the commit message.
    MissingType,

    /// The commit type contains a character that is not allowed in a type.
    InvalidTypeChar(char),

    /// The header ended before a scope or a description delimiter was found.
    MissingScopeOrDescription,

    /// The scope was opened with `(` but never closed.
    ScopeMissingParen,

    /// The scope is `()`.
    ScopeEmpty,

    /// The scope contains a character that is not allowed in a scope.
    InvalidScopeChar(char),

    /// The type or scope is not followed by `: ` (optionally preceded by `!`).
    DescriptionMissingDelimiter,

    /// The description of the commit is missing.
    MissingDescription,

    /// The header is not followed by an empty line.
    HeaderMissingBlankLine,

    /// The body is not followed by an empty line before the footers.
    BodyMissingBlankLine,

    /// A version string is not a valid semantic version.
    InvalidVersion,
}

impl ErrorKind {
    /// The coarse "unable to parse commit header" category.
    ///
    /// Covers every failure of the header line, including a header that is
    /// not followed by a blank line.
    pub fn is_header_error(self) -> bool {
        !matches!(self, Self::BodyMissingBlankLine | Self::InvalidVersion)
    }

    /// A required empty line (after the header or after the body) is missing.
    pub fn is_no_blank_line_error(self) -> bool {
        matches!(self, Self::HeaderMissingBlankLine | Self::BodyMissingBlankLine)
    }

    /// The `(scope)` group is malformed.
    pub fn is_scope_error(self) -> bool {
        matches!(
            self,
            Self::ScopeMissingParen | Self::ScopeEmpty | Self::InvalidScopeChar(_)
        )
    }

    /// The version, not the commit message, failed to parse.
    pub fn is_version_error(self) -> bool {
        matches!(self, Self::InvalidVersion)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ErrorKind::{
            BodyMissingBlankLine, DescriptionMissingDelimiter, HeaderMissingBlankLine,
            InvalidScopeChar, InvalidTypeChar, InvalidVersion, MissingDescription,
            MissingScopeOrDescription, MissingType, ScopeEmpty, ScopeMissingParen,
        };

        match self {
            MissingType => f.write_str("missing type definition"),
            InvalidTypeChar(c) => write!(f, "type: invalid character {c:?}"),
            MissingScopeOrDescription => f.write_str("header: missing scope or description"),
            ScopeMissingParen => f.write_str("scope should end with ')'"),
            ScopeEmpty => f.write_str("scope is empty"),
            InvalidScopeChar(c) => write!(f, "scope: invalid character {c:?}"),
            DescriptionMissingDelimiter => f.write_str("type or scope must be followed by ': '"),
            MissingDescription => f.write_str("missing commit description"),
            HeaderMissingBlankLine => {
                f.write_str("at least one empty line required after header")
            }
            BodyMissingBlankLine => f.write_str("at least one empty line required after body"),
            InvalidVersion => f.write_str("invalid semantic version"),
        }
    }
}
