//! The conventional commit type and its components.

use std::fmt;
use std::ops::Deref;

use crate::parser::{BREAKING_ARROW, BREAKING_PHRASE};
use crate::Error;

/// A conventional commit.
///
/// Every piece of text is a slice of the parsed message.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq)]
pub struct Commit<'a> {
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) message: &'a str,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) header: &'a str,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub(crate) ty: Type<'a>,
    pub(crate) scope: Option<Scope<'a>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) exclamation: bool,
    pub(crate) description: &'a str,
    pub(crate) body: Option<&'a str>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) footer: Option<&'a str>,
    pub(crate) breaking: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) breaking_description: Option<&'a str>,
    pub(crate) footers: Vec<Footer<'a>>,
}

impl<'a> Commit<'a> {
    /// Create a new Conventional Commit based on the provided commit message
    /// string.
    ///
    /// Trailing whitespace is ignored.
    ///
    /// # Errors
    ///
    /// This function returns an error if the commit does not conform to the
    /// Conventional Commit specification.
    pub fn parse(string: &'a str) -> Result<Self, Error> {
        crate::parser::parse(string)
    }

    /// Like [`Commit::parse`], but lexes on a separate thread that streams
    /// tokens through a bounded queue (see [`TOKEN_QUEUE_CAPACITY`]).
    ///
    /// The result is always identical to [`Commit::parse`].
    ///
    /// [`TOKEN_QUEUE_CAPACITY`]: crate::TOKEN_QUEUE_CAPACITY
    ///
    /// # Errors
    ///
    /// Same as [`Commit::parse`].
    pub fn parse_pipelined(string: &'a str) -> Result<Self, Error> {
        crate::parser::parse_pipelined(string)
    }

    /// The parsed message, without trailing whitespace.
    pub fn message(&self) -> &'a str {
        self.message
    }

    /// The verbatim first line of the message.
    pub fn header(&self) -> &'a str {
        self.header
    }

    /// The type of the commit.
    pub fn type_(&self) -> Type<'a> {
        self.ty
    }

    /// The optional scope of the commit.
    pub fn scope(&self) -> Option<Scope<'a>> {
        self.scope
    }

    /// The commit description.
    pub fn description(&self) -> &'a str {
        self.description
    }

    /// The commit body, containing a more detailed explanation of the commit
    /// changes.
    pub fn body(&self) -> Option<&'a str> {
        self.body
    }

    /// The verbatim block of footers.
    pub fn footer(&self) -> Option<&'a str> {
        self.footer
    }

    /// A flag to signal that the commit contains breaking changes.
    ///
    /// This flag is set either when the commit has an exclamation mark after
    /// the message type and scope, e.g.:
    /// ```text
    /// feat(scope)!: this is a breaking change
    /// ```
    ///
    /// Or when the `BREAKING CHANGE: ` (or `BREAKING-CHANGE: `) footer is defined:
    /// ```text
    /// feat: my commit description
    ///
    /// BREAKING CHANGE: this is a breaking change
    /// ```
    pub fn breaking(&self) -> bool {
        self.breaking
    }

    /// Explanation for the breaking change.
    ///
    /// Note: if no `BREAKING CHANGE` footer is provided, the `description` is expected to describe
    /// the breaking change.
    pub fn breaking_description(&self) -> Option<&'a str> {
        self.breaking_description
    }

    /// Any footer, in the order they appear in the message.
    ///
    /// A footer is similar to a Git trailer, with the exception of not
    /// requiring whitespace before newlines.
    ///
    /// See: <https://git-scm.com/docs/git-interpret-trailers>
    pub fn footers(&self) -> &[Footer<'a>] {
        &self.footers
    }
}

impl fmt::Display for Commit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_().as_str())?;

        if let Some(scope) = &self.scope() {
            write!(f, "({scope})")?;
        }

        if self.exclamation {
            f.write_str("!")?;
        }

        write!(f, ": {}", self.description())?;

        if let Some(body) = &self.body() {
            write!(f, "\n\n{body}")?;
        }

        for (i, footer) in self.footers().iter().enumerate() {
            let gap = if i == 0 { "\n\n" } else { "\n" };
            write!(f, "{gap}{footer}")?;
        }

        Ok(())
    }
}

/// A single footer note.
///
/// A footer is similar to a Git trailer, with the exception of not requiring
/// whitespace before newlines.
///
/// See: <https://git-scm.com/docs/git-interpret-trailers>
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Footer<'a> {
    token: FooterToken<'a>,
    pub(crate) sep: FooterSeparator,
    pub(crate) value: &'a str,
}

impl<'a> Footer<'a> {
    /// Piece together a footer.
    pub const fn new(token: FooterToken<'a>, sep: FooterSeparator, value: &'a str) -> Self {
        Self { token, sep, value }
    }

    /// The token of the footer.
    pub const fn token(&self) -> FooterToken<'a> {
        self.token
    }

    /// The separator between the footer token and its value.
    pub const fn separator(&self) -> FooterSeparator {
        self.sep
    }

    /// The value of the footer, which may span several lines.
    pub const fn value(&self) -> &'a str {
        self.value
    }

    /// A flag to signal that the footer describes a breaking change.
    pub fn breaking(&self) -> bool {
        self.token.breaking()
    }
}

impl fmt::Display for Footer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.token, self.sep, self.value)
    }
}

/// The type of separator between the footer token and value.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum FooterSeparator {
    /// ": "
    Value,

    /// " #"
    Ref,
}

impl FooterSeparator {
    /// Access `str` representation of `FooterSeparator`
    pub fn as_str(self) -> &'static str {
        match self {
            FooterSeparator::Value => ": ",
            FooterSeparator::Ref => " #",
        }
    }

    pub(crate) fn from_delimiter(delimiter: &str) -> Self {
        if delimiter == " #" {
            FooterSeparator::Ref
        } else {
            FooterSeparator::Value
        }
    }
}

impl Deref for FooterSeparator {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl PartialEq<&'_ str> for FooterSeparator {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for FooterSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

macro_rules! unicase_components {
    ($($ty:ident),+) => (
        $(
            /// A component of the conventional commit, compared case-insensitively.
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $ty<'a>(unicase::UniCase<&'a str>);

            impl<'a> $ty<'a> {
                /// Wrap a `str` without checking it against the grammar.
                pub const fn new_unchecked(value: &'a str) -> Self {
                    $ty(unicase::UniCase::unicode(value))
                }

                /// Access `str` representation
                pub fn as_str(&self) -> &'a str {
                    self.0.into_inner()
                }
            }

            impl Deref for $ty<'_> {
                type Target = str;

                fn deref(&self) -> &Self::Target {
                    self.as_str()
                }
            }

            impl PartialEq<&'_ str> for $ty<'_> {
                fn eq(&self, other: &&str) -> bool {
                    *self == $ty::new_unchecked(*other)
                }
            }

            impl fmt::Display for $ty<'_> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(&self.0, f)
                }
            }

            #[cfg(feature = "serde")]
            impl serde::Serialize for $ty<'_> {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: serde::Serializer,
                {
                    serializer.serialize_str(self)
                }
            }

            #[cfg(feature = "schemars")]
            impl schemars::JsonSchema for $ty<'_> {
                fn inline_schema() -> bool {
                    true
                }

                fn schema_name() -> std::borrow::Cow<'static, str> {
                    <str as schemars::JsonSchema>::schema_name()
                }

                fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
                    <str as schemars::JsonSchema>::json_schema(generator)
                }
            }
        )+
    )
}

unicase_components![Type, Scope, FooterToken];

/// Common commit types
impl Type<'static> {
    /// Commit type when introducing new features (correlates with `minor` in semver)
    pub const FEAT: Type<'static> = Type::new_unchecked("feat");
    /// Commit type when patching a bug (correlates with `patch` in semver)
    pub const FIX: Type<'static> = Type::new_unchecked("fix");
    /// Possible commit type when reverting changes.
    pub const REVERT: Type<'static> = Type::new_unchecked("revert");
    /// Possible commit type for changing documentation.
    pub const DOCS: Type<'static> = Type::new_unchecked("docs");
    /// Possible commit type for changing code style.
    pub const STYLE: Type<'static> = Type::new_unchecked("style");
    /// Possible commit type for refactoring code structure.
    pub const REFACTOR: Type<'static> = Type::new_unchecked("refactor");
    /// Possible commit type for performance optimizations.
    pub const PERF: Type<'static> = Type::new_unchecked("perf");
    /// Possible commit type for addressing tests.
    pub const TEST: Type<'static> = Type::new_unchecked("test");
    /// Possible commit type for other things.
    pub const CHORE: Type<'static> = Type::new_unchecked("chore");
}

impl FooterToken<'_> {
    /// A flag to signal that the footer describes a breaking change.
    ///
    /// Unlike other comparisons on components, this one is case-sensitive.
    pub fn breaking(&self) -> bool {
        let token = self.as_str();
        token == BREAKING_PHRASE || token == BREAKING_ARROW
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ErrorKind;
    use indoc::indoc;
    #[cfg(feature = "serde")]
    use serde_test::Token;

    #[test]
    fn test_valid_simple_commit() {
        let commit = Commit::parse("type(my scope): hello world").unwrap();

        assert_eq!(commit.type_(), "type");
        assert_eq!(commit.scope().unwrap(), "my scope");
        assert_eq!(commit.description(), "hello world");
        assert_eq!(commit.header(), "type(my scope): hello world");
        assert_eq!(commit.body(), None);
        assert_eq!(commit.footer(), None);
        assert!(!commit.breaking());
    }

    #[test]
    fn test_trailing_whitespace_without_body() {
        let commit = Commit::parse("type(my scope): hello world\n\n\n").unwrap();

        assert_eq!(commit.type_(), "type");
        assert_eq!(commit.scope().unwrap(), "my scope");
        assert_eq!(commit.description(), "hello world");
        assert_eq!(commit.message(), "type(my scope): hello world");
    }

    #[test]
    fn test_trailing_nl() {
        for message in ["type: hello world\n", "type: hello world\n\n", "type: hello world \n\t\n"] {
            let commit = Commit::parse(message).unwrap();

            assert_eq!(commit.type_(), "type");
            assert_eq!(commit.scope(), None);
            assert_eq!(commit.description(), "hello world");
        }
    }

    #[test]
    fn test_parenthetical_statement() {
        let commit = Commit::parse("type: hello world (#1)").unwrap();

        assert_eq!(commit.type_(), "type");
        assert_eq!(commit.scope(), None);
        assert_eq!(commit.description(), "hello world (#1)");
    }

    #[test]
    fn test_colons_in_description() {
        for message in [
            "feat: description with colon at the end: mid:dle and :start of words",
            "feat(scope)!: :hammer: description with gitmoji at the start",
            "feat: : : A description",
            "feat: :: A description ::",
            "1245#feat1234(@scope/scope1,scope2): description",
        ] {
            let commit = Commit::parse(message).unwrap();
            assert_eq!(commit.header(), message);
        }
    }

    #[test]
    fn test_breaking_change() {
        let commit = Commit::parse("feat!: this is a breaking change").unwrap();
        assert_eq!(Type::FEAT, commit.type_());
        assert!(commit.breaking());
        assert_eq!(
            commit.breaking_description(),
            Some("this is a breaking change")
        );

        let commit = Commit::parse(indoc!(
            "feat: message

            BREAKING CHANGE: breaking change"
        ))
        .unwrap();
        assert_eq!(Type::FEAT, commit.type_());
        assert_eq!("breaking change", commit.footers()[0].value());
        assert!(commit.breaking());
        assert_eq!(commit.breaking_description(), Some("breaking change"));

        let commit = Commit::parse(indoc!(
            "fix: message

            BREAKING-CHANGE: it's broken"
        ))
        .unwrap();
        assert_eq!(Type::FIX, commit.type_());
        assert_eq!("it's broken", commit.footers()[0].value());
        assert!(commit.breaking());
        assert_eq!(commit.breaking_description(), Some("it's broken"));
    }

    #[test]
    fn test_breaking_footer_is_case_sensitive() {
        let commit = Commit::parse("fix: message\n\nbreaking-change: no").unwrap();
        assert_eq!(commit.footers()[0].token(), "BREAKING-CHANGE");
        assert!(!commit.footers()[0].breaking());
        assert!(!commit.breaking());
    }

    #[test]
    fn test_breaking_signals_are_independent() {
        let commit = Commit::parse("feat(api)!: drop v1\n\nBREAKING CHANGE: v1 is gone").unwrap();
        assert!(commit.breaking());
        assert_eq!(commit.breaking_description(), Some("v1 is gone"));
    }

    #[test]
    fn test_full_commit() {
        let commit = Commit::parse("type(scope)!: desc\n\nbody\n\nKey: value").unwrap();

        assert_eq!(commit.type_(), "type");
        assert_eq!(commit.scope().unwrap(), "scope");
        assert!(commit.breaking());
        assert_eq!(commit.description(), "desc");
        assert_eq!(commit.body(), Some("body"));
        assert_eq!(commit.footers().len(), 1);
        assert_eq!(commit.footers()[0].token(), "Key");
        assert_eq!(commit.footers()[0].separator(), FooterSeparator::Value);
        assert_eq!(commit.footers()[0].value(), "value");
        assert_eq!(commit.footer(), Some("Key: value"));
    }

    #[test]
    fn test_body_and_ordered_footers() {
        let commit = Commit::parse(indoc! {"
            feat(scope): description

            this is first line in body

            this is second line in body

            Ref #123
            Date: 01-01-2021
            By: John Doe"})
        .unwrap();

        assert_eq!(commit.type_(), "feat");
        assert_eq!(commit.scope().unwrap(), "scope");
        assert_eq!(commit.description(), "description");
        assert_eq!(
            commit.body(),
            Some("this is first line in body\n\nthis is second line in body")
        );
        let notes: Vec<_> = commit
            .footers()
            .iter()
            .map(|f| (f.token().as_str(), f.separator(), f.value()))
            .collect();
        assert_eq!(
            notes,
            [
                ("Ref", FooterSeparator::Ref, "123"),
                ("Date", FooterSeparator::Value, "01-01-2021"),
                ("By", FooterSeparator::Value, "John Doe"),
            ]
        );
        assert!(!commit.breaking());
        assert_eq!(
            commit.footer(),
            Some("Ref #123\nDate: 01-01-2021\nBy: John Doe")
        );
    }

    #[test]
    fn test_multi_line_footer() {
        let commit =
            Commit::parse("type: description message\n\nFooter: line one\nline two\nOther: 123")
                .unwrap();

        assert_eq!(commit.body(), None);
        assert_eq!(commit.footers().len(), 2);
        assert_eq!(commit.footers()[0].value(), "line one\nline two");
        assert_eq!(commit.footers()[1].token(), "Other");
        assert_eq!(commit.footers()[1].value(), "123");
    }

    #[test]
    fn test_footer_value_trailing_blank_lines_are_trimmed() {
        let commit = Commit::parse("fix: x\n\nFirst: a\n\n\nSecond: b").unwrap();

        assert_eq!(commit.footers()[0].value(), "a");
        assert_eq!(commit.footers()[1].value(), "b");
    }

    #[test]
    fn test_valid_complex_commit() {
        let commit = indoc! {"
            chore: improve changelog readability

            Change date notation from YYYY-MM-DD to YYYY.MM.DD to make it a tiny bit
            easier to parse while reading.

            BREAKING CHANGE: Just kidding!
        "};

        let commit = Commit::parse(commit).unwrap();

        assert_eq!(Type::CHORE, commit.type_());
        assert_eq!(None, commit.scope());
        assert_eq!("improve changelog readability", commit.description());
        assert_eq!(
            Some(indoc!(
                "Change date notation from YYYY-MM-DD to YYYY.MM.DD to make it a tiny bit
                 easier to parse while reading."
            )),
            commit.body()
        );
        assert_eq!("Just kidding!", commit.footers()[0].value());
        assert!(commit.breaking());
    }

    #[test]
    fn test_slices_reparse_to_same_fields() {
        let message = indoc! {"
            refactor(core)!: split lexer

            The lexer now lives in its own module.

            Reviewed-by: Z
            Refs #42"};
        let commit = Commit::parse(message).unwrap();

        let header = Commit::parse(commit.header()).unwrap();
        assert_eq!(header.type_(), commit.type_());
        assert_eq!(header.scope(), commit.scope());
        assert_eq!(header.description(), commit.description());
        assert_eq!(header.breaking(), commit.breaking());

        let rebuilt = format!(
            "{}\n\n{}\n\n{}",
            commit.header(),
            commit.body().unwrap(),
            commit.footer().unwrap()
        );
        let reparsed = Commit::parse(&rebuilt).unwrap();
        assert_eq!(reparsed.body(), commit.body());
        assert_eq!(reparsed.footers(), commit.footers());
    }

    #[test]
    fn test_display_reparses() {
        let message = indoc! {"
            feat(lexer)!: stream tokens

            Tokens are produced lazily.

            BREAKING CHANGE: `parse` no longer
            returns partial commits
            Closes #7"};
        let commit = Commit::parse(message).unwrap();
        assert_eq!(commit.to_string(), message);

        let reparsed_text = commit.to_string();
        let reparsed = Commit::parse(&reparsed_text).unwrap();
        assert_eq!(reparsed.footers(), commit.footers());
        assert_eq!(reparsed.breaking(), commit.breaking());
    }

    #[test]
    fn test_missing_type() {
        let err = Commit::parse("").unwrap_err();

        assert_eq!(ErrorKind::MissingType, err.kind());
    }

    #[test]
    fn test_missing_blank_line() {
        let err = Commit::parse("type: desc\nbody").unwrap_err();

        assert_eq!(ErrorKind::HeaderMissingBlankLine, err.kind());
        assert!(err.is_no_blank_line_error());
        assert!(err.is_header_error());
    }

    #[test]
    fn test_missing_delimiter() {
        let err = Commit::parse("type:desc").unwrap_err();

        assert_eq!(ErrorKind::DescriptionMissingDelimiter, err.kind());
        assert!(err.is_header_error());
    }

    #[test]
    fn test_invalid_headers() {
        for message in [
            "feat:() description with name.txt",
            "feat:1 description with name.txt",
            "feat:! description with name.txt",
            "feat123:A description with name.txt",
            "feat())!:A description with name1.txt",
            "feat(()!:A description with name2.txt",
            "feat(scope1)!:A description with name.txt",
            "feat((scope)!: A description with name.txt",
            "feat((",
            "feat():",
            "feat):",
            "feat:::: A description",
            "Hello World",
            "fix Improved error messages\n",
        ] {
            let err = Commit::parse(message).unwrap_err();
            assert!(err.is_header_error(), "{message:?}: {err}");
        }
    }

    #[test]
    fn test_footer_token_comparisons() {
        let token = FooterToken::new_unchecked("Reviewed-By");
        assert_eq!(token, "reviewed-by");
        assert!(!token.breaking());
        assert!(FooterToken::new_unchecked("BREAKING CHANGE").breaking());
        assert_eq!(FooterSeparator::Ref, " #");
        assert_eq!(&*FooterSeparator::Value, ": ");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_commit_serialize() {
        let commit = Commit::parse("type(my scope): hello world").unwrap();
        serde_test::assert_ser_tokens(
            &commit,
            &[
                Token::Struct {
                    name: "Commit",
                    len: 6,
                },
                Token::Str("type"),
                Token::Str("type"),
                Token::Str("scope"),
                Token::Some,
                Token::Str("my scope"),
                Token::Str("description"),
                Token::Str("hello world"),
                Token::Str("body"),
                Token::None,
                Token::Str("breaking"),
                Token::Bool(false),
                Token::Str("footers"),
                Token::Seq { len: Some(0) },
                Token::SeqEnd,
                Token::StructEnd,
            ],
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_footer_serialize() {
        let commit = Commit::parse("fix: x\n\nCloses #12").unwrap();
        serde_test::assert_ser_tokens(
            &commit.footers()[0],
            &[
                Token::Struct {
                    name: "Footer",
                    len: 3,
                },
                Token::Str("token"),
                Token::Str("Closes"),
                Token::Str("sep"),
                Token::UnitVariant {
                    name: "FooterSeparator",
                    variant: "Ref",
                },
                Token::Str("value"),
                Token::Str("12"),
                Token::StructEnd,
            ],
        );
    }
}
