//! A streaming parser for the [Conventional Commit] specification.
//!
//! [conventional commit]: https://www.conventionalcommits.org
//!
//! Messages are lexed by a small state machine into [`Token`]s which are then
//! folded into a [`Commit`]. Every part of the commit borrows from the
//! message.
//!
//! # Example
//!
//! ```rust
//! use indoc::indoc;
//!
//! let message = indoc!("
//!     docs(example)!: add tested usage example
//!
//!     This example is tested using Rust's doctest capabilities. Having this
//!     example helps people understand how to use the parser.
//!
//!     BREAKING CHANGE: Going from nothing to something, meaning anyone doing
//!     nothing before suddenly has something to do. That sounds like a change
//!     in your break.
//!     Co-Authored-By: Lisa Simpson <lisa@simpsons.fam>
//!     Closes #12
//! ");
//!
//! let commit = conventional_commit_parser::parse(message).unwrap();
//!
//! // You can access all components of the header.
//! assert_eq!(commit.type_(), conventional_commit_parser::DOCS);
//! assert_eq!(commit.scope().unwrap(), "example");
//! assert_eq!(commit.description(), "add tested usage example");
//! assert_eq!(commit.header(), "docs(example)!: add tested usage example");
//!
//! // And the free-form commit body.
//! assert!(commit.body().unwrap().contains("helps people understand"));
//!
//! // If a commit is marked with a bang (`!`) OR has a footer with the key
//! // "BREAKING CHANGE", it is considered a "breaking" commit.
//! assert!(commit.breaking());
//!
//! // You can access each footer individually, values may span lines.
//! assert!(commit.footers()[0].value().contains("That sounds like a change"));
//!
//! // Footers provide access to their token and value.
//! assert_eq!(commit.footers()[1].token(), "Co-Authored-By");
//! assert_eq!(commit.footers()[1].value(), "Lisa Simpson <lisa@simpsons.fam>");
//!
//! // Two types of separators are supported, regular ": ", and " #":
//! assert_eq!(commit.footers()[2].separator(), " #");
//! assert_eq!(commit.footers()[2].value(), "12");
//! ```
//!
//! Malformed messages are rejected with a classifiable [`Error`]:
//!
//! ```rust
//! use conventional_commit_parser::ErrorKind;
//!
//! let err = conventional_commit_parser::parse("fix: typo\nin the README").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::HeaderMissingBlankLine);
//! assert!(err.is_no_blank_line_error());
//! ```

#![warn(missing_docs)]

mod commit;
mod error;
mod parser;
pub mod version;

pub use commit::{Commit, Footer, FooterSeparator, FooterToken, Scope, Type};
pub use error::{Error, ErrorKind};
pub use parser::{tokenize, Token, TokenKind, Tokens, TOKEN_QUEUE_CAPACITY};

/// Parse a conventional commit message.
///
/// Trailing whitespace is ignored; see [`Commit::parse`].
///
/// # Errors
///
/// This function returns an error if the commit does not conform to the
/// Conventional Commit specification.
pub fn parse(message: &str) -> Result<Commit<'_>, Error> {
    Commit::parse(message)
}

/// Commit type when introducing new features (correlates with `minor` in semver)
pub const FEAT: Type<'static> = Type::FEAT;
/// Commit type when patching a bug (correlates with `patch` in semver)
pub const FIX: Type<'static> = Type::FIX;
/// Possible commit type when reverting changes.
pub const REVERT: Type<'static> = Type::REVERT;
/// Possible commit type for changing documentation.
pub const DOCS: Type<'static> = Type::DOCS;
/// Possible commit type for changing code style.
pub const STYLE: Type<'static> = Type::STYLE;
/// Possible commit type for refactoring code structure.
pub const REFACTOR: Type<'static> = Type::REFACTOR;
/// Possible commit type for performance optimizations.
pub const PERF: Type<'static> = Type::PERF;
/// Possible commit type for addressing tests.
pub const TEST: Type<'static> = Type::TEST;
/// Possible commit type for other things.
pub const CHORE: Type<'static> = Type::CHORE;
