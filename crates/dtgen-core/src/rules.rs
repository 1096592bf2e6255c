//! Literal multi-pattern substitution.
//!
//! All matchers of a [`RuleSet`] are applied in one leftmost-longest pass.
//! Replacements are never re-scanned, so a replacement value cannot be hit by a
//! pending matcher, and a short matcher (`Double`) never splits a longer one
//! (`getElementDoubleAbs`) that starts at the same position.

use aho_corasick::{AhoCorasick, MatchKind};

use dtgen_model::{GenError, Result};

/// One literal `(matcher, replacement)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub matcher: String,
    pub replacement: String,
}

impl Rule {
    pub fn new(matcher: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            matcher: matcher.into(),
            replacement: replacement.into(),
        }
    }
}

/// Compiled set of rules.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    automaton: Option<AhoCorasick>,
}

impl RuleSet {
    /// Compile rules. Identical duplicates are merged; a matcher with two
    /// different replacements is rejected.
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> Result<Self> {
        let mut merged: Vec<Rule> = Vec::new();
        for rule in rules {
            if rule.matcher.is_empty() {
                return Err(GenError::InvalidRule {
                    message: format!("empty matcher for replacement {:?}", rule.replacement),
                });
            }
            match merged.iter().find(|existing| existing.matcher == rule.matcher) {
                Some(existing) if existing.replacement == rule.replacement => {}
                Some(existing) => {
                    return Err(GenError::ConflictingTokens {
                        token: rule.matcher,
                        first: existing.replacement.clone(),
                        second: rule.replacement,
                    });
                }
                None => merged.push(rule),
            }
        }

        let automaton = if merged.is_empty() {
            None
        } else {
            let patterns: Vec<&str> = merged.iter().map(|rule| rule.matcher.as_str()).collect();
            let automaton = AhoCorasick::builder()
                .match_kind(MatchKind::LeftmostLongest)
                .build(&patterns)
                .map_err(|error| GenError::InvalidRule {
                    message: error.to_string(),
                })?;
            Some(automaton)
        };
        Ok(Self {
            rules: merged,
            automaton,
        })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Replace every match in one pass.
    pub fn apply(&self, text: &str) -> String {
        self.apply_counting(text).0
    }

    /// Replace every match and report how often each rule fired.
    pub fn apply_counting(&self, text: &str) -> (String, Vec<usize>) {
        let mut hits = vec![0; self.rules.len()];
        let Some(automaton) = &self.automaton else {
            return (text.to_string(), hits);
        };
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for found in automaton.find_iter(text) {
            let index = found.pattern().as_usize();
            out.push_str(&text[last..found.start()]);
            out.push_str(&self.rules[index].replacement);
            hits[index] += 1;
            last = found.end();
        }
        out.push_str(&text[last..]);
        (out, hits)
    }
}
