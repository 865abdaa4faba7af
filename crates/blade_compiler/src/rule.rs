//! A single pattern-to-replacement rewrite over raw template text.

use std::borrow::Cow;

use regex::Regex;

/// One dialect construct expressed as a regular-expression rewrite.
///
/// The replacement may reference capture groups of the pattern using the
/// `${N}` syntax of [`Regex::replace_all`]. Rules hold no state and can be
/// shared freely between translations.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    /// Short identifier used in logs and tests.
    name: &'static str,

    /// What the rule matches.
    pattern: Regex,

    /// What every match is replaced with.
    replacement: &'static str,
}

impl RewriteRule {
    /// Creates a rule from an already compiled pattern.
    pub fn new(name: &'static str, pattern: Regex, replacement: &'static str) -> Self {
        Self {
            name,
            pattern,
            replacement,
        }
    }

    /// Returns the rule's identifier.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the source of the match pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    #[cfg(test)]
    pub(crate) fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Rewrites every non-overlapping match in `text`.
    ///
    /// Returns [`Cow::Borrowed`] when nothing matched.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.pattern.replace_all(text, self.replacement)
    }
}
