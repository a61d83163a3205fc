// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Built-in terminal predicates.
//!
//! Every program ends in one of these. Domain predicates live next to the
//! contexts they drive (`permutation`, `subset`).

use crate::engine::{Predicate, PredicateResult, TerminalPredicate};

/// Built-in fail predicate (Prolog's `fail.`).
///
/// This predicate always fails, forcing backtracking. Ending a program with
/// it makes the engine visit every leaf of the search space.
///
/// # Example
///
/// ```
/// use puzzle_search::engine::EngineBuilder;
/// use puzzle_search::predicates::FailPredicate;
/// use puzzle_search::subset::{ExtendPredicate, SubsetContext};
///
/// let mut ctx = SubsetContext::new(vec![5, 5], 10);
/// let engine = EngineBuilder::<SubsetContext>::new()
///     .add(Box::new(ExtendPredicate))
///     .terminal(Box::new(FailPredicate))
///     .build();
///
/// let result = engine.search(&mut ctx);
/// assert!(result.is_none()); // Exhausted - engine consumed
/// assert_eq!(ctx.found().len(), 3);
/// ```
#[derive(Debug)]
pub struct FailPredicate;

impl<C> Predicate<C> for FailPredicate {
    fn try_pred(&mut self, _ctx: &mut C, _round: usize) -> PredicateResult {
        PredicateResult::Failure
    }

    fn retry_pred(&mut self, _ctx: &mut C, _round: usize, _choice: usize) -> PredicateResult {
        PredicateResult::Failure
    }

    fn name(&self) -> &str {
        "Fail"
    }
}

impl<C> TerminalPredicate<C> for FailPredicate {}

/// Predicate that suspends execution.
///
/// The engine hands itself back to the caller, which can inspect the context
/// and resume the search for the next leaf.
#[derive(Debug)]
pub struct SuspendPredicate;

impl<C> Predicate<C> for SuspendPredicate {
    fn try_pred(&mut self, _ctx: &mut C, _round: usize) -> PredicateResult {
        PredicateResult::Suspend
    }

    fn retry_pred(&mut self, _ctx: &mut C, _round: usize, _choice: usize) -> PredicateResult {
        PredicateResult::Failure
    }

    fn name(&self) -> &str {
        "Suspend"
    }
}

impl<C> TerminalPredicate<C> for SuspendPredicate {}
