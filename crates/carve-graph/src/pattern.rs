//! Pattern normalization for alias, ignore and chunk rules.
//!
//! Rules arrive either as plain strings (from configuration files or the
//! command line) or as already compiled patterns. Both collapse into a
//! [`Pattern`], a thin wrapper around [`regex::Regex`] that remembers the text
//! it was built from.
//!
//! String rules follow two forms:
//!
//! - `/body/flags` is a regular-expression literal. Flags `i`, `m`, `s` and `x`
//!   become inline flags; `g`, `u` and `y` are accepted and have no effect.
//! - Anything else is compiled as a regular expression as written, so
//!   `node_modules` matches anywhere in a path and `@/*` matches `@` followed by
//!   any number of slashes.

use std::fmt;

use regex::{NoExpand, Regex};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Flags accepted after the closing slash of a `/body/flags` literal.
const LITERAL_FLAGS: &str = "gimsuxy";

/// Error raised when a rule cannot be turned into a [`Pattern`].
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("invalid pattern '{pattern}': {source}")]
    Invalid {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A normalized match rule over path strings.
#[derive(Clone)]
pub struct Pattern {
    regex: Regex,
    source: String,
}

impl Pattern {
    /// Compile a rule string. Equivalent to `normalize_pattern(RawPattern::Source(..))`.
    pub fn new(source: impl Into<String>) -> Result<Self, PatternError> {
        let source = source.into();
        let expression = match split_literal(&source) {
            Some((body, flags)) => with_inline_flags(body, flags),
            None => source.clone(),
        };
        let regex = compile(&source, &expression)?;
        Ok(Self { regex, source })
    }

    /// Wrap an existing regex without re-parsing it.
    pub fn from_regex(regex: Regex) -> Self {
        let source = regex.as_str().to_string();
        Self { regex, source }
    }

    /// Return an equivalent pattern that only matches at the start of input.
    ///
    /// Alias rules are anchored so that they rewrite specifier prefixes and
    /// never a fragment in the middle of a path. Every alternation branch is
    /// anchored, including ones after a leading `^`.
    pub fn anchored(&self) -> Result<Self, PatternError> {
        let expression = self.regex.as_str();
        let regex = compile(&self.source, &format!("^(?:{expression})"))?;
        Ok(Self {
            regex,
            source: self.source.clone(),
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Replace the first match in `text` with `replacement`, taken literally.
    pub fn replace_first(&self, text: &str, replacement: &str) -> String {
        self.regex.replace(text, NoExpand(replacement)).into_owned()
    }

    /// The rule text this pattern was created from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled regular expression.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.regex.as_str()).finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.regex.as_str() == other.regex.as_str()
    }
}

impl Eq for Pattern {}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self::from_regex(regex)
    }
}

/// A rule as supplied by the caller, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawPattern {
    /// Rule text, either a `/body/flags` literal or a bare expression.
    Source(String),
    /// A pattern that has already been normalized.
    Compiled(Pattern),
}

impl From<&str> for RawPattern {
    fn from(source: &str) -> Self {
        Self::Source(source.to_string())
    }
}

impl From<String> for RawPattern {
    fn from(source: String) -> Self {
        Self::Source(source)
    }
}

impl From<Pattern> for RawPattern {
    fn from(pattern: Pattern) -> Self {
        Self::Compiled(pattern)
    }
}

impl From<Regex> for RawPattern {
    fn from(regex: Regex) -> Self {
        Self::Compiled(Pattern::from_regex(regex))
    }
}

impl Serialize for RawPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Source(source) => serializer.serialize_str(source),
            Self::Compiled(pattern) => pattern.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for RawPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::Source)
    }
}

/// Turn a raw rule into a [`Pattern`].
///
/// Normalizing an already compiled pattern returns it unchanged.
pub fn normalize_pattern(raw: impl Into<RawPattern>) -> Result<Pattern, PatternError> {
    match raw.into() {
        RawPattern::Source(source) => Pattern::new(source),
        RawPattern::Compiled(pattern) => Ok(pattern),
    }
}

/// Normalize a list of rules, stopping at the first invalid one.
pub fn normalize_patterns<I, P>(raw: I) -> Result<Vec<Pattern>, PatternError>
where
    I: IntoIterator<Item = P>,
    P: Into<RawPattern>,
{
    raw.into_iter().map(normalize_pattern).collect()
}

fn compile(source: &str, expression: &str) -> Result<Regex, PatternError> {
    Regex::new(expression).map_err(|source_err| PatternError::Invalid {
        pattern: source.to_string(),
        source: source_err,
    })
}

/// Split `/body/flags` into its parts, if `source` has that shape.
fn split_literal(source: &str) -> Option<(&str, &str)> {
    let rest = source.strip_prefix('/')?;
    let close = rest.rfind('/')?;
    let (body, flags) = (&rest[..close], &rest[close + 1..]);
    if body.is_empty() || !flags.chars().all(|flag| LITERAL_FLAGS.contains(flag)) {
        return None;
    }
    Some((body, flags))
}

fn with_inline_flags(body: &str, flags: &str) -> String {
    let inline: String = flags
        .chars()
        .filter(|flag| matches!(flag, 'i' | 'm' | 's' | 'x'))
        .collect();
    if inline.is_empty() {
        body.to_string()
    } else {
        format!("(?{inline}){body}")
    }
}
