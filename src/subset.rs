// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Capacity-bounded subset enumeration.
//!
//! Enumerates every non-empty combination of item indices whose running sum
//! stays within a capacity. Each round of [`ExtendPredicate`] offers the items
//! after the last chosen index that still fit, so a combination is produced
//! exactly once, in ascending index order. Every combination is recorded as
//! soon as it is formed, before its extensions (DFS preorder).
//!
//! Callers filter and aggregate the enumeration; [`ExactFit`] covers the
//! common exact-total query.
//!
//! # Examples
//!
//! ```
//! use puzzle_search::subset::{enumerate, ExactFit};
//!
//! let items = [20, 15, 10, 5, 5];
//! let fit = ExactFit::new(&items, &enumerate(&items, 25), 25);
//! assert_eq!(fit.count(), 4);
//! assert_eq!(fit.min_len(), Some(2));
//! assert_eq!(fit.count_at_min_len(), 3);
//! ```

use crate::engine::{EngineBuilder, Predicate, PredicateResult, SearchState};
use crate::predicates::FailPredicate;
use crate::trail::Trail;
use tracing::debug;

/// One chosen item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick {
    /// Index of the chosen item.
    pub index: usize,
    /// Sum of the chosen items so far, this one included.
    pub total: u64,
}

/// Search context for subset enumeration.
#[derive(Debug)]
pub struct SubsetContext {
    items: Vec<u64>,
    capacity: u64,
    trail: Trail<Pick>,
    found: Vec<Vec<usize>>,
}

impl SubsetContext {
    /// Create a context over `items` with the given capacity.
    pub fn new(items: Vec<u64>, capacity: u64) -> Self {
        Self {
            items,
            capacity,
            trail: Trail::new(),
            found: Vec::new(),
        }
    }

    /// Combinations recorded so far, as ascending index sequences.
    pub fn found(&self) -> &[Vec<usize>] {
        &self.found
    }

    /// Take the recorded combinations out of the context.
    pub fn into_found(self) -> Vec<Vec<usize>> {
        self.found
    }

    /// Indices that may extend the current combination.
    fn candidates(&self) -> impl Iterator<Item = usize> + '_ {
        let (start, used) = self
            .trail
            .last()
            .map_or((0, 0), |pick| (pick.index + 1, pick.total));
        let remaining = self.capacity.saturating_sub(used);
        (start..self.items.len()).filter(move |&i| self.items[i] <= remaining)
    }
}

impl SearchState for SubsetContext {
    type Step = Pick;

    fn trail(&mut self) -> &mut Trail<Pick> {
        &mut self.trail
    }
}

/// Extends the current combination by one item per round.
#[derive(Debug)]
pub struct ExtendPredicate;

impl Predicate<SubsetContext> for ExtendPredicate {
    fn try_pred(&mut self, ctx: &mut SubsetContext, _round: usize) -> PredicateResult {
        match ctx.candidates().count() {
            0 => PredicateResult::Failure,
            n => PredicateResult::Choices(n),
        }
    }

    fn retry_pred(
        &mut self,
        ctx: &mut SubsetContext,
        _round: usize,
        choice: usize,
    ) -> PredicateResult {
        let Some(index) = ctx.candidates().nth(choice) else {
            return PredicateResult::Failure;
        };
        let total = ctx.trail.last().map_or(0, |pick| pick.total) + ctx.items[index];
        ctx.trail.push(Pick { index, total });

        let combination = ctx.trail.iter().map(|pick| pick.index).collect();
        ctx.found.push(combination);
        PredicateResult::SuccessSamePredicate
    }

    fn name(&self) -> &str {
        "Extend"
    }
}

/// Every non-empty index combination whose sum stays within `capacity`.
///
/// Combinations are ascending index sequences; callers map them back to item
/// values. With capacity 0 only zero-valued items can be chosen.
pub fn enumerate(items: &[u64], capacity: u64) -> Vec<Vec<usize>> {
    let mut ctx = SubsetContext::new(items.to_vec(), capacity);
    let engine = EngineBuilder::<SubsetContext>::new()
        .add(Box::new(ExtendPredicate))
        .terminal(Box::new(FailPredicate))
        .build();
    engine.search(&mut ctx);

    debug!(
        items = items.len(),
        capacity,
        combinations = ctx.found().len(),
        "subset enumeration complete"
    );
    ctx.into_found()
}

/// Sum of the items at `indices`.
pub fn total(items: &[u64], indices: &[usize]) -> u64 {
    indices.iter().map(|&i| items[i]).sum()
}

/// The combinations from an enumeration whose total equals a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactFit {
    matches: Vec<Vec<usize>>,
}

impl ExactFit {
    /// Filter `combinations` of `items` down to those summing to `target`.
    pub fn new(items: &[u64], combinations: &[Vec<usize>], target: u64) -> Self {
        let matches = combinations
            .iter()
            .filter(|c| total(items, c) == target)
            .cloned()
            .collect();
        Self { matches }
    }

    /// Enumerate with capacity `target` and keep the exact matches.
    pub fn search(items: &[u64], target: u64) -> Self {
        Self::new(items, &enumerate(items, target), target)
    }

    /// The matching combinations.
    pub fn matches(&self) -> &[Vec<usize>] {
        &self.matches
    }

    /// Number of matching combinations.
    pub fn count(&self) -> usize {
        self.matches.len()
    }

    /// Fewest items in any match.
    pub fn min_len(&self) -> Option<usize> {
        self.matches.iter().map(Vec::len).min()
    }

    /// Number of matches using the fewest items.
    pub fn count_at_min_len(&self) -> usize {
        match self.min_len() {
            Some(min) => self.matches.iter().filter(|c| c.len() == min).count(),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preorder_enumeration() {
        let found = enumerate(&[1, 2, 3], 6);
        assert_eq!(
            found,
            vec![
                vec![0],
                vec![0, 1],
                vec![0, 1, 2],
                vec![0, 2],
                vec![1],
                vec![1, 2],
                vec![2],
            ]
        );
    }

    #[test]
    fn test_nothing_fits() {
        assert!(enumerate(&[4, 5, 6], 3).is_empty());
        assert!(enumerate(&[], 10).is_empty());
    }

    #[test]
    fn test_zero_capacity_takes_only_zero_items() {
        assert!(enumerate(&[1, 2], 0).is_empty());
        assert_eq!(enumerate(&[3, 0, 0], 0), vec![vec![1], vec![1, 2], vec![2]]);
    }

    #[test]
    fn test_equal_values_are_distinct_items() {
        let fit = ExactFit::search(&[5, 5, 5], 10);
        assert_eq!(fit.matches(), &[vec![0, 1], vec![0, 2], vec![1, 2]]);
    }

    #[test]
    fn test_exact_fit_without_matches() {
        let fit = ExactFit::search(&[4, 4], 5);
        assert_eq!(fit.count(), 0);
        assert_eq!(fit.min_len(), None);
        assert_eq!(fit.count_at_min_len(), 0);
    }
}
