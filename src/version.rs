//! Semantic versions and the next release version implied by a set of commits.
//!
//! ```rust
//! use conventional_commit_parser::version::{next_version, DEFAULT_PATCH_TYPES};
//!
//! let messages = [
//!     "fix: handle empty scope",
//!     "feat(lexer): stream tokens",
//!     "not a conventional commit",
//! ];
//! let next = next_version("v1.4.2", messages, DEFAULT_PATCH_TYPES).unwrap();
//! assert_eq!(next.to_string(), "1.5.0");
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use winnow::ascii::digit1;
use winnow::combinator::{opt, preceded};
use winnow::token::{one_of, take_while};
use winnow::Parser;

use crate::{Commit, Error, ErrorKind};

/// Commit types that only warrant a patch release unless told otherwise.
pub const DEFAULT_PATCH_TYPES: &[&str] = &["fix"];

/// A semantic version: `major.minor.patch[-pre][+build]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    pre: String,
    build: String,
}

impl Version {
    /// A release version without pre-release or build metadata.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre: String::new(),
            build: String::new(),
        }
    }

    /// Parse a version, as found in a tag.
    ///
    /// A leading `v` is accepted and a missing minor or patch number counts as
    /// `0`, so `v2` is `2.0.0`.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::InvalidVersion`] error carrying `text` as
    /// context.
    pub fn parse(text: &str) -> Result<Self, Error> {
        version
            .parse(text)
            .map_err(|err| Error::at(ErrorKind::InvalidVersion, err.offset()).set_context(text))
    }

    /// The major version.
    pub fn major(&self) -> u64 {
        self.major
    }

    /// The minor version.
    pub fn minor(&self) -> u64 {
        self.minor
    }

    /// The patch version.
    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// The pre-release identifiers, empty for a release.
    pub fn pre(&self) -> &str {
        &self.pre
    }

    /// The build metadata, empty when absent.
    pub fn build(&self) -> &str {
        &self.build
    }

    /// Apply `bump`, dropping pre-release and build metadata.
    ///
    /// Bumping the patch of a pre-release only drops the pre-release, since
    /// `1.2.3-rc.1` is released as `1.2.3`.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::InvalidVersion`] when the bumped component
    /// would overflow.
    pub fn bump(&self, bump: Bump) -> Result<Self, Error> {
        let version = match bump {
            Bump::Major => Self::new(increment(self.major)?, 0, 0),
            Bump::Minor => Self::new(self.major, increment(self.minor)?, 0),
            Bump::Patch if !self.pre.is_empty() => Self::new(self.major, self.minor, self.patch),
            Bump::Patch => Self::new(self.major, self.minor, increment(self.patch)?),
        };
        Ok(version)
    }
}

fn increment(component: u64) -> Result<u64, Error> {
    component
        .checked_add(1)
        .ok_or_else(|| Error::new(ErrorKind::InvalidVersion).set_context(component.to_string()))
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre.is_empty() {
            write!(f, "-{}", self.pre)?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build)?;
        }
        Ok(())
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (self.pre.is_empty(), other.pre.is_empty()) {
                (true, true) => Ordering::Equal,
                // a pre-release sorts before its release
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => cmp_pre_release(&self.pre, &other.pre),
            })
            // not part of the precedence; keeps `Ord` consistent with `Eq`
            .then_with(|| self.build.cmp(&other.build))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

fn cmp_pre_release(a: &str, b: &str) -> Ordering {
    let mut a = a.split('.');
    let mut b = b.split('.');
    loop {
        let ordering = match (a.next(), b.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(a), Some(b)) => match (a.parse::<u64>(), b.parse::<u64>()) {
                (Ok(a), Ok(b)) => a.cmp(&b),
                (Ok(_), Err(_)) => Ordering::Less,
                (Err(_), Ok(_)) => Ordering::Greater,
                (Err(_), Err(_)) => a.cmp(b),
            },
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

// <version>         ::= ["v" | "V"], <number>, [".", <number>, [".", <number>]], ["-", <identifiers>], ["+", <identifiers>]
fn version(input: &mut &str) -> winnow::Result<Version> {
    opt(one_of(['v', 'V'])).parse_next(input)?;
    let major = number.parse_next(input)?;
    let minor = opt(preceded('.', number)).parse_next(input)?;
    let patch = match minor {
        Some(_) => opt(preceded('.', number)).parse_next(input)?,
        None => None,
    };
    let pre = opt(preceded('-', identifiers)).parse_next(input)?;
    let build = opt(preceded('+', identifiers)).parse_next(input)?;

    Ok(Version {
        major,
        minor: minor.unwrap_or(0),
        patch: patch.unwrap_or(0),
        pre: pre.unwrap_or_default().to_owned(),
        build: build.unwrap_or_default().to_owned(),
    })
}

fn number(input: &mut &str) -> winnow::Result<u64> {
    digit1.try_map(str::parse).parse_next(input)
}

// <identifiers>     ::= <alphanumeric, "-" or ".">+
fn identifiers<'i>(input: &mut &'i str) -> winnow::Result<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '.').parse_next(input)
}

/// The size of a release.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bump {
    /// Bug fixes only.
    Patch,
    /// New, backwards compatible functionality.
    Minor,
    /// Incompatible changes.
    Major,
}

impl Bump {
    /// The release a single commit calls for.
    ///
    /// `patch_types` are compared case-insensitively.
    pub fn for_commit(commit: &Commit<'_>, patch_types: &[&str]) -> Self {
        if commit.breaking() {
            Bump::Major
        } else if patch_types.iter().any(|ty| commit.type_() == *ty) {
            Bump::Patch
        } else {
            Bump::Minor
        }
    }
}

/// Parse every message, keeping going past the ones that fail.
pub fn parse_messages<'a, I>(messages: I) -> (Vec<Commit<'a>>, Vec<Error>)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut commits = Vec::new();
    let mut errors = Vec::new();
    for message in messages {
        match Commit::parse(message) {
            Ok(commit) => commits.push(commit),
            Err(err) => errors.push(err),
        }
    }
    (commits, errors)
}

/// The version following `current` given the commits made since.
///
/// Any breaking commit makes a major release, any commit whose type is not in
/// `patch_types` a minor release, and otherwise it is a patch release. Without
/// any commit, a minor release is assumed.
///
/// # Errors
///
/// Fails when the bumped component of `current` would overflow.
pub fn next_version_from_commits(
    current: &Version,
    commits: &[Commit<'_>],
    patch_types: &[&str],
) -> Result<Version, Error> {
    let bump = commits
        .iter()
        .map(|commit| {
            let bump = Bump::for_commit(commit, patch_types);
            tracing::debug!(
                ty = %commit.type_(),
                description = commit.description(),
                ?bump,
                "classified commit"
            );
            bump
        })
        .max();

    let bump = bump.unwrap_or_else(|| {
        tracing::warn!("no conventional commits parsed, defaulting to a minor increment");
        Bump::Minor
    });
    current.bump(bump)
}

/// Parse `current` and `messages`, then compute the next version.
///
/// Messages that are not conventional commits are logged and skipped.
///
/// # Errors
///
/// Fails when `current` is not a valid version or cannot be bumped.
pub fn next_version<'a, I>(current: &str, messages: I, patch_types: &[&str]) -> Result<Version, Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let current = Version::parse(current)?;

    let (commits, errors) = parse_messages(messages);
    for err in &errors {
        tracing::warn!(error = %err, message = err.context(), "skipping commit message");
    }

    next_version_from_commits(&current, &commits, patch_types)
}

/// The greatest version among `tags`, ignoring anything that is not a
/// version and `0.0.0`.
pub fn latest_version<'a, I>(tags: I) -> Option<Version>
where
    I: IntoIterator<Item = &'a str>,
{
    tags.into_iter()
        .filter_map(|tag| match Version::parse(tag) {
            Ok(version) => Some(version),
            Err(_) => {
                tracing::debug!(tag, "ignoring tag that is not a valid version");
                None
            }
        })
        .filter(|version| *version != Version::default())
        .max()
}
