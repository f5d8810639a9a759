//! Resolver configuration and resolution outcomes.

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::pattern::RawPattern;

/// Extensions tried when a specifier names a file without one.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".js", ".cjs", ".mjs", ".ts"];

/// Paths skipped unless the caller says otherwise.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &["node_modules"];

/// Options for [`PathResolver`](super::PathResolver).
///
/// Defaults are plain values on this struct rather than process-wide state,
/// so two resolvers built from equal options always behave the same.
#[derive(Debug, Clone)]
pub struct ResolverOptions {
    /// Base directory for bare, aliased and entry-point specifiers.
    pub root: PathBuf,

    /// Candidate extensions, tried in order. A missing leading dot is added.
    pub extensions: Vec<String>,

    /// Alias rules as (pattern, replacement prefix); the first match wins.
    pub aliases: Vec<(RawPattern, String)>,

    /// Paths matching any of these are skipped. Patterns see the specifier
    /// after alias rewriting and the candidate path relative to `root`.
    pub ignore_patterns: Vec<RawPattern>,
}

impl ResolverOptions {
    /// Options rooted at `root` with the default extensions and ignore list.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            aliases: Vec::new(),
            ignore_patterns: DEFAULT_IGNORE_PATTERNS
                .iter()
                .map(|p| RawPattern::from(*p))
                .collect(),
        }
    }

    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Append an alias rule.
    pub fn alias(mut self, pattern: impl Into<RawPattern>, replacement: impl Into<String>) -> Self {
        self.aliases.push((pattern.into(), replacement.into()));
        self
    }

    /// Append alias rules from an ordered map of pattern text to replacement.
    pub fn aliases(mut self, aliases: IndexMap<String, String>) -> Self {
        self.aliases.extend(
            aliases
                .into_iter()
                .map(|(pattern, replacement)| (RawPattern::Source(pattern), replacement)),
        );
        self
    }

    /// Replace the ignore list.
    pub fn ignore_patterns<I, P>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<RawPattern>,
    {
        self.ignore_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }
}

/// Why a specifier produced no module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// Matched an ignore pattern.
    Ignored,
    /// Nothing exists at the path or at any extension/index candidate.
    NotFound,
    /// An existing file whose extension is not configured.
    UnsupportedExtension,
    /// Reading the module took longer than the configured timeout.
    TimedOut,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Ignored => "ignored",
            Self::NotFound => "not found",
            Self::UnsupportedExtension => "unsupported extension",
            Self::TimedOut => "timed out",
        };
        f.write_str(text)
    }
}

/// Result of module resolution.
///
/// Every variant carries the cleaned absolute candidate path so diagnostics
/// can show where the resolver looked.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", content = "path", rename_all = "kebab-case")]
pub enum ResolveResult {
    /// Module resolved to a local file path.
    Local(PathBuf),

    /// Candidate matched an ignore pattern.
    Ignored(PathBuf),

    /// Candidate is an existing file with an extension outside the configured set.
    Unsupported(PathBuf),

    /// No file exists at the candidate or any extension/index variant of it.
    NotFound(PathBuf),
}

impl ResolveResult {
    pub fn is_local(&self) -> bool {
        matches!(self, ResolveResult::Local(_))
    }

    /// The resolved path, if resolution succeeded.
    pub fn local(&self) -> Option<&Path> {
        match self {
            ResolveResult::Local(path) => Some(path),
            _ => None,
        }
    }

    pub fn into_local(self) -> Option<PathBuf> {
        match self {
            ResolveResult::Local(path) => Some(path),
            _ => None,
        }
    }

    /// The path the resolver settled on or last looked at.
    pub fn candidate(&self) -> &Path {
        match self {
            ResolveResult::Local(path)
            | ResolveResult::Ignored(path)
            | ResolveResult::Unsupported(path)
            | ResolveResult::NotFound(path) => path,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            ResolveResult::Local(_) => None,
            ResolveResult::Ignored(_) => Some(SkipReason::Ignored),
            ResolveResult::Unsupported(_) => Some(SkipReason::UnsupportedExtension),
            ResolveResult::NotFound(_) => Some(SkipReason::NotFound),
        }
    }
}

impl fmt::Display for ResolveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveResult::Local(path) => write!(f, "Local({})", path.display()),
            ResolveResult::Ignored(path) => write!(f, "Ignored({})", path.display()),
            ResolveResult::Unsupported(path) => write!(f, "Unsupported({})", path.display()),
            ResolveResult::NotFound(path) => write!(f, "NotFound({})", path.display()),
        }
    }
}
