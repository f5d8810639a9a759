//! Path alias handling for module resolution.
//!
//! Rewrites specifiers such as `@/components/Button` to `src/components/Button`
//! before any filesystem probing happens.

use std::borrow::Cow;

use crate::pattern::{Pattern, PatternError, RawPattern, normalize_pattern};

/// A compiled alias: specifiers matching `pattern` at their start get the
/// matched prefix replaced by `replacement`.
#[derive(Debug, Clone)]
pub struct AliasRule {
    pattern: Pattern,
    replacement: String,
}

impl AliasRule {
    pub fn new(pattern: impl Into<RawPattern>, replacement: impl Into<String>) -> Result<Self, PatternError> {
        Ok(Self {
            pattern: normalize_pattern(pattern)?.anchored()?,
            replacement: replacement.into(),
        })
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Rewrite `specifier` if this rule applies to it.
    pub fn apply(&self, specifier: &str) -> Option<String> {
        self.pattern
            .is_match(specifier)
            .then(|| self.pattern.replace_first(specifier, &self.replacement))
    }
}

/// Apply the first matching alias rule. Returns the specifier unchanged
/// (borrowed) when no rule matches.
pub fn resolve_path_alias<'a>(specifier: &'a str, rules: &[AliasRule]) -> Cow<'a, str> {
    rules
        .iter()
        .find_map(|rule| rule.apply(specifier))
        .map_or(Cow::Borrowed(specifier), Cow::Owned)
}
