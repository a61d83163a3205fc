// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! String rewriting: forward expansion and greedy backward reduction.
//!
//! A [`RuleSet`] holds `pattern => replacement` rules and is the only owner of
//! them; nothing is cached between calls.
//!
//! - **Forward** ([`RuleSet::expand`]): every single-site application of every
//!   rule, overlapping occurrences included, collected into a set.
//! - **Backward** ([`RuleSet::reduce`]): undo rules greedily until the
//!   terminal symbol is reached, counting steps.
//!
//! Backward reduction is a heuristic. At each step it picks the earliest
//! position where some rule's replacement occurs and, among those, the
//! longest replacement. Rules that produce the terminal symbol are applied
//! only to the entire string. Whether this reaches the terminal at all, and
//! in the fewest steps, depends on the rule set; it does for grammars in
//! which every rule strictly grows the string and replacements do not
//! ambiguously overlap.

use crate::error::SearchError;
use std::collections::BTreeSet;
use tracing::trace;

/// A single `pattern => replacement` rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pattern: String,
    replacement: String,
}

impl Rule {
    /// Create a rule rewriting `pattern` into `replacement`.
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }

    /// The text the rule matches when expanding.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The text the rule produces, and matches when reducing.
    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

/// Limits for backward reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReduceLimits {
    /// Steps after which a reduction that has not reached the terminal fails.
    pub max_steps: usize,
}

impl Default for ReduceLimits {
    fn default() -> Self {
        Self { max_steps: 100_000 }
    }
}

/// An ordered set of rewrite rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Create a rule set; earlier rules win ties during reduction.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Append a rule with the lowest priority so far.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Iterate over the rules in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every distinct string reachable from `source` in one rule application.
    pub fn expand(&self, source: &str) -> BTreeSet<String> {
        let mut reachable = BTreeSet::new();
        for rule in &self.rules {
            for at in occurrences(source, &rule.pattern) {
                let mut candidate =
                    String::with_capacity(source.len() - rule.pattern.len() + rule.replacement.len());
                candidate.push_str(&source[..at]);
                candidate.push_str(&rule.replacement);
                candidate.push_str(&source[at + rule.pattern.len()..]);
                reachable.insert(candidate);
            }
        }
        reachable
    }

    /// Steps needed to reduce `target` to `terminal`, with default limits.
    pub fn reduce(&self, target: &str, terminal: &str) -> Result<usize, SearchError> {
        self.reduce_with_limits(target, terminal, ReduceLimits::default())
    }

    /// Steps needed to reduce `target` to `terminal`.
    ///
    /// Fails with `StuckReduction` when no rule applies, and with
    /// `StepLimitExceeded` when the limit is reached first.
    pub fn reduce_with_limits(
        &self,
        target: &str,
        terminal: &str,
        limits: ReduceLimits,
    ) -> Result<usize, SearchError> {
        let mut current = target.to_string();
        let mut steps = 0;

        while current != terminal {
            if steps >= limits.max_steps {
                return Err(SearchError::StepLimitExceeded {
                    max_steps: limits.max_steps,
                });
            }
            let Some((at, rule)) = self.next_reduction(&current, terminal) else {
                return Err(SearchError::StuckReduction {
                    steps,
                    remaining: current,
                });
            };
            current.replace_range(at..at + rule.replacement.len(), &rule.pattern);
            steps += 1;
            trace!(step = steps, length = current.len(), "reduced");
        }
        Ok(steps)
    }

    /// The position and rule for the next backward step, if any applies.
    fn next_reduction(&self, current: &str, terminal: &str) -> Option<(usize, &Rule)> {
        if let Some(rule) = self
            .rules
            .iter()
            .find(|r| r.pattern == terminal && r.replacement == current)
        {
            return Some((0, rule));
        }

        for (at, _) in current.char_indices() {
            let rest = &current[at..];
            let mut longest: Option<&Rule> = None;
            for rule in &self.rules {
                if rule.pattern == terminal
                    || rule.replacement.is_empty()
                    || !rest.starts_with(rule.replacement.as_str())
                {
                    continue;
                }
                if longest.map_or(true, |best| rule.replacement.len() > best.replacement.len()) {
                    longest = Some(rule);
                }
            }
            if let Some(rule) = longest {
                return Some((at, rule));
            }
        }
        None
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Every distinct string reachable from `source` in one rule application.
pub fn expand(source: &str, rules: &[Rule]) -> BTreeSet<String> {
    RuleSet::new(rules.to_vec()).expand(source)
}

/// Greedy backward step count from `target` to `terminal`.
pub fn reduce(target: &str, rules: &[Rule], terminal: &str) -> Result<usize, SearchError> {
    RuleSet::new(rules.to_vec()).reduce(target, terminal)
}

/// Start offsets of every occurrence of `needle`, overlapping ones included.
/// An empty needle occurs nowhere.
fn occurrences<'a>(haystack: &'a str, needle: &'a str) -> impl Iterator<Item = usize> + 'a {
    haystack
        .char_indices()
        .map(|(at, _)| at)
        .filter(move |&at| !needle.is_empty() && haystack[at..].starts_with(needle))
}
