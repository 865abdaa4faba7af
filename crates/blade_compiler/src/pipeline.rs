//! Ordered application of rewrite rules.

use std::borrow::Cow;

use crate::rule::RewriteRule;
use crate::rules;

/// A fixed, ordered list of rewrite rules.
///
/// Built once and reused for every translation. Each rule sees the output of
/// the previous one, and every rule runs regardless of whether earlier rules
/// matched anything.
#[derive(Debug, Clone)]
pub struct Pipeline {
    rules: Vec<RewriteRule>,
}

impl Pipeline {
    /// Creates a pipeline applying `rules` in the given order.
    pub fn new(rules: Vec<RewriteRule>) -> Self {
        Self { rules }
    }

    /// The Blade pipeline: comments, echoes, then conditionals.
    pub fn standard() -> Self {
        Self::new(rules::standard_rules())
    }

    /// Returns the rules in application order.
    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// Translates Blade source text into field-template syntax.
    pub fn translate(&self, source: &str) -> String {
        let mut text = source.to_string();
        for rule in &self.rules {
            let rewritten = match rule.apply(&text) {
                Cow::Borrowed(_) => continue,
                Cow::Owned(rewritten) => rewritten,
            };
            tracing::trace!(
                rule = rule.name(),
                pattern = rule.pattern(),
                "rule rewrote template text"
            );
            text = rewritten;
        }
        text
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}
