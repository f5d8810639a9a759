//! Path resolution: raw import specifier -> canonical on-disk module path.
//!
//! Resolution runs in a fixed order:
//!
//! 1. Apply the first matching alias rule to the raw specifier.
//! 2. Make the result absolute. Relative specifiers (`./`, `../`) are joined
//!    to the importer's directory; aliased, bare and entry-point specifiers are
//!    joined to the resolver root; absolute specifiers are kept. The joined
//!    path is lexically cleaned and that string is the canonical path.
//! 3. Skip the candidate if it, or the rewritten specifier, matches an ignore
//!    pattern. Candidates inside the root are matched root-relative.
//! 4. Accept the candidate if it is a regular file with a configured extension.
//! 5. Otherwise probe `candidate + ext`, then `candidate/index + ext`.
//!
//! Ignored, missing and unsupported candidates are ordinary
//! [`ResolveResult`] values. Only I/O faults surface as errors.

mod aliases;
mod extensions;
mod options;

pub use aliases::{AliasRule, resolve_path_alias};
pub use extensions::{candidates, has_supported_extension, normalize_extension, resolve_with_extensions};
pub use options::{
    DEFAULT_EXTENSIONS, DEFAULT_IGNORE_PATTERNS, ResolveResult, ResolverOptions, SkipReason,
};

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use tracing::debug;

use crate::pattern::{Pattern, PatternError, normalize_patterns};
use crate::runtime::{Runtime, RuntimeError};

/// Configuration faults detected while building a resolver.
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    #[error("invalid resolver pattern: {0}")]
    Pattern(#[from] PatternError),

    #[error("invalid extension '{0}': extensions must not be empty")]
    InvalidExtension(String),

    #[error("at least one extension is required")]
    NoExtensions,
}

/// Resolves import specifiers against a project root.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
    extensions: Vec<String>,
    aliases: Vec<AliasRule>,
    ignore_patterns: Vec<Pattern>,
}

impl PathResolver {
    /// Compile the options into a resolver.
    ///
    /// All patterns are compiled here, so a bad alias or ignore rule fails
    /// before any traversal begins.
    pub fn new(options: ResolverOptions) -> Result<Self, ResolverError> {
        let mut extensions = Vec::with_capacity(options.extensions.len());
        for raw in &options.extensions {
            let ext = normalize_extension(raw)
                .ok_or_else(|| ResolverError::InvalidExtension(raw.clone()))?;
            if !extensions.contains(&ext) {
                extensions.push(ext);
            }
        }
        if extensions.is_empty() {
            return Err(ResolverError::NoExtensions);
        }

        let aliases = options
            .aliases
            .into_iter()
            .map(|(pattern, replacement)| AliasRule::new(pattern, replacement))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            root: options.root.clean(),
            extensions,
            aliases,
            ignore_patterns: normalize_patterns(options.ignore_patterns)?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn aliases(&self) -> &[AliasRule] {
        &self.aliases
    }

    pub fn ignore_patterns(&self) -> &[Pattern] {
        &self.ignore_patterns
    }

    /// Resolve a module specifier.
    ///
    /// `importer_dir` is the directory of the importing module, or `None` for
    /// the entry point.
    pub async fn resolve(
        &self,
        specifier: &str,
        importer_dir: Option<&Path>,
        runtime: &dyn Runtime,
    ) -> Result<ResolveResult, RuntimeError> {
        let rewritten = resolve_path_alias(specifier, &self.aliases);
        let aliased = rewritten != specifier;
        let candidate = self.absolutize(&rewritten, aliased, importer_dir);

        if self.is_ignored(&rewritten, &candidate) {
            debug!(specifier, path = %candidate.display(), "ignored by pattern");
            return Ok(ResolveResult::Ignored(candidate));
        }

        let result = resolve_with_extensions(candidate, &self.extensions, runtime).await?;
        debug!(specifier, outcome = %result, "resolved");
        Ok(result)
    }

    /// Whether `path` would be skipped by the ignore list.
    ///
    /// Candidates inside the root are matched by their root-relative form, so
    /// directories above the root never cause a skip.
    pub fn is_ignored(&self, specifier: &str, candidate: &Path) -> bool {
        let candidate = candidate
            .strip_prefix(&self.root)
            .unwrap_or(candidate)
            .to_string_lossy();
        self.ignore_patterns
            .iter()
            .any(|pattern| pattern.is_match(specifier) || pattern.is_match(&candidate))
    }

    fn absolutize(&self, specifier: &str, aliased: bool, importer_dir: Option<&Path>) -> PathBuf {
        let base = match importer_dir {
            Some(dir) if !aliased && is_relative_specifier(specifier) => dir,
            _ => self.root.as_path(),
        };
        base.join(specifier).clean()
    }
}

/// `./x`, `../x`, `.` and `..` are relative to the importing module.
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}
