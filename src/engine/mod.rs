// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Non-deterministic search engine.
//!
//! This module implements a backtracking search engine that runs predicates
//! in sequence. The engine coordinates with the trail system to provide
//! automatic state restoration on backtracking.
//!
//! # Architecture
//!
//! The engine maintains a stack of predicate execution states. Each stack entry tracks:
//! - Which predicate is executing
//! - Current round number (for predicates that execute multiple times)
//! - Choice mode state (whether we're trying alternatives)
//! - Current choice index (when in choice mode)
//!
//! The engine follows a WAM-like execution model:
//! 1. Call try_pred(round) on each predicate
//! 2. If Success: advance to next predicate
//! 3. If SuccessSamePredicate: increment round, stay at same predicate
//! 4. If Choices(n): enter choice mode, call retry_pred(round, 0..n-1)
//! 5. If Failure: backtrack to previous stack entry
//! 6. If Suspend: pause and return control to caller
//!
//! Exhaustive searches end with [`FailPredicate`](crate::predicates::FailPredicate):
//! every leaf is recorded by a side effect on the context and then rejected,
//! so the engine keeps backtracking until the whole space has been visited.

pub mod predicate;

pub use predicate::{Predicate, PredicateResult, TerminalPredicate};

use crate::trail::Trail;
use tracing::debug;

/// A search context that owns a trail of steps.
pub trait SearchState {
    /// The step type recorded on the trail.
    type Step;

    /// The context's trail.
    fn trail(&mut self) -> &mut Trail<Self::Step>;
}

/// Stack entry tracking the state of one predicate execution.
#[derive(Debug)]
struct StackEntry {
    /// Index of the predicate in the predicates list.
    predicate_index: usize,

    /// Current round number (incremented by SuccessSamePredicate).
    round: usize,

    /// Whether we're in choice mode (exploring alternatives).
    in_choice_mode: bool,

    /// Current choice being tried (when in_choice_mode is true).
    current_choice: usize,

    /// Total number of choices (when in_choice_mode is true).
    num_choices: usize,

    /// Trail position for this stack entry.
    trail_checkpoint: usize,
}

impl StackEntry {
    fn new(predicate_index: usize, round: usize, trail_checkpoint: usize) -> Self {
        Self {
            predicate_index,
            round,
            in_choice_mode: false,
            current_choice: 0,
            num_choices: 0,
            trail_checkpoint,
        }
    }
}

/// Search engine that coordinates predicate execution and backtracking.
pub struct SearchEngine<C> {
    /// List of predicates to execute in sequence.
    predicates: Vec<Box<dyn Predicate<C>>>,

    /// Stack of predicate execution states.
    stack: Vec<StackEntry>,

    /// Statistics: number of try_pred calls.
    try_count: u64,

    /// Statistics: number of retry_pred calls.
    retry_count: u64,
}

impl<C: SearchState> SearchEngine<C> {
    /// Create a new search engine with the given predicates.
    ///
    /// Prefer [`EngineBuilder`], which guarantees the program ends with a
    /// terminal predicate.
    pub fn new(predicates: Vec<Box<dyn Predicate<C>>>) -> Self {
        Self {
            predicates,
            stack: Vec::new(),
            try_count: 0,
            retry_count: 0,
        }
    }

    /// Run the search until it suspends or is exhausted.
    ///
    /// Consumes the engine and returns:
    /// - `Some(engine)` if suspended - calling search() again resumes by
    ///   backtracking out of the suspension point
    /// - `None` if exhausted (backtracked past first predicate)
    ///
    /// Results are delivered through side effects on `ctx`.
    ///
    /// # Panics
    ///
    /// Panics if the predicate sequence reaches its end without FAIL or SUSPEND,
    /// or if retry_pred returns Choices or Suspend.
    pub fn search(mut self, ctx: &mut C) -> Option<Self> {
        if self.stack.is_empty() {
            if self.predicates.is_empty() {
                return None;
            }
            self.try_count = 0;
            self.retry_count = 0;
            let checkpoint = ctx.trail().len();
            self.stack.push(StackEntry::new(0, 0, checkpoint));
        } else {
            // Resuming: the suspending predicate behaves as a failure.
            self.stack.pop();
        }

        loop {
            let Some(entry) = self.stack.last_mut() else {
                debug!(
                    tries = self.try_count,
                    retries = self.retry_count,
                    "search exhausted"
                );
                return None;
            };

            ctx.trail().rewind_to(entry.trail_checkpoint);
            let pred_idx = entry.predicate_index;
            let round = entry.round;

            if !entry.in_choice_mode {
                self.try_count += 1;
                let result = self.predicates[pred_idx].try_pred(ctx, round);

                match result {
                    PredicateResult::Success => {
                        self.close_current_entry();
                        self.push_next_predicate(ctx);
                    }
                    PredicateResult::SuccessSamePredicate => {
                        self.close_current_entry();
                        self.push_same_predicate(ctx);
                    }
                    PredicateResult::Failure => {
                        self.stack.pop();
                    }
                    PredicateResult::Choices(n) => {
                        let checkpoint = ctx.trail().len();
                        if let Some(entry) = self.stack.last_mut() {
                            entry.in_choice_mode = true;
                            entry.current_choice = 0;
                            entry.num_choices = n;
                            entry.trail_checkpoint = checkpoint;
                        }
                    }
                    PredicateResult::Suspend => {
                        debug!(
                            predicate = self.predicates[pred_idx].name(),
                            "search suspended"
                        );
                        return Some(self);
                    }
                }
            } else {
                if entry.current_choice >= entry.num_choices {
                    self.stack.pop();
                    continue;
                }

                let choice = entry.current_choice;
                entry.current_choice += 1;
                self.retry_count += 1;
                let result = self.predicates[pred_idx].retry_pred(ctx, round, choice);

                match result {
                    PredicateResult::Success => self.push_next_predicate(ctx),
                    PredicateResult::SuccessSamePredicate => self.push_same_predicate(ctx),
                    PredicateResult::Failure => {
                        // Try next choice (loop continues)
                    }
                    PredicateResult::Choices(_) | PredicateResult::Suspend => {
                        panic!("retry_pred returned invalid result: {:?}", result);
                    }
                }
            }
        }
    }

    /// Mark the current entry as having no alternatives left.
    ///
    /// A deterministic success offers nothing to retry, so backtracking into
    /// the entry pops it instead of running try_pred a second time.
    fn close_current_entry(&mut self) {
        if let Some(entry) = self.stack.last_mut() {
            entry.in_choice_mode = true;
            entry.current_choice = 0;
            entry.num_choices = 0;
        }
    }

    /// Push a new stack entry for the next predicate in sequence.
    fn push_next_predicate(&mut self, ctx: &mut C) {
        let next_index = self.stack.last().map_or(0, |e| e.predicate_index + 1);

        if next_index >= self.predicates.len() {
            panic!(
                "Invalid predicate sequence: reached end without FAIL or SUSPEND. \
                 All programs must terminate with a FAIL or SUSPEND predicate."
            );
        }

        let checkpoint = ctx.trail().len();
        self.stack.push(StackEntry::new(next_index, 0, checkpoint));
    }

    /// Push a new stack entry for the same predicate with incremented round.
    fn push_same_predicate(&mut self, ctx: &mut C) {
        let (pred_index, next_round) = self
            .stack
            .last()
            .map_or((0, 0), |e| (e.predicate_index, e.round + 1));

        let checkpoint = ctx.trail().len();
        self.stack.push(StackEntry::new(pred_index, next_round, checkpoint));
    }

    /// Get statistics about the search.
    ///
    /// Returns (try_count, retry_count).
    pub fn statistics(&self) -> (u64, u64) {
        (self.try_count, self.retry_count)
    }
}

/// Builds a program: a sequence of predicates ending in a terminal predicate.
///
/// # Example
///
/// ```
/// use puzzle_search::engine::EngineBuilder;
/// use puzzle_search::predicates::FailPredicate;
/// use puzzle_search::subset::{SubsetContext, ExtendPredicate};
///
/// let mut ctx = SubsetContext::new(vec![1, 2, 3], 3);
/// let engine = EngineBuilder::<SubsetContext>::new()
///     .add(Box::new(ExtendPredicate))
///     .terminal(Box::new(FailPredicate))
///     .build();
///
/// assert!(engine.search(&mut ctx).is_none());
/// assert_eq!(ctx.found(), &[vec![0], vec![0, 1], vec![1], vec![2]]);
/// ```
pub struct EngineBuilder<C> {
    predicates: Vec<Box<dyn Predicate<C>>>,
}

impl<C: SearchState> EngineBuilder<C> {
    /// Start an empty program.
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// Append a predicate.
    pub fn add(mut self, predicate: Box<dyn Predicate<C>>) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Append the terminal predicate, closing the program.
    pub fn terminal<T>(mut self, predicate: Box<T>) -> TerminatedBuilder<C>
    where
        T: TerminalPredicate<C> + 'static,
    {
        self.predicates.push(predicate);
        TerminatedBuilder {
            predicates: self.predicates,
        }
    }
}

impl<C: SearchState> Default for EngineBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// A program whose last predicate is terminal.
pub struct TerminatedBuilder<C> {
    predicates: Vec<Box<dyn Predicate<C>>>,
}

impl<C: SearchState> TerminatedBuilder<C> {
    /// Build the engine.
    pub fn build(self) -> SearchEngine<C> {
        SearchEngine::new(self.predicates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates::{FailPredicate, SuspendPredicate};

    /// Context that records every completed path.
    #[derive(Debug, Default)]
    struct Paths {
        trail: Trail<usize>,
        complete: Vec<Vec<usize>>,
    }

    impl SearchState for Paths {
        type Step = usize;

        fn trail(&mut self) -> &mut Trail<usize> {
            &mut self.trail
        }
    }

    /// Chooses one of `width` values per round, for `depth` rounds.
    #[derive(Debug)]
    struct Digits {
        width: usize,
        depth: usize,
    }

    impl Predicate<Paths> for Digits {
        fn try_pred(&mut self, ctx: &mut Paths, _round: usize) -> PredicateResult {
            if ctx.trail.len() == self.depth {
                PredicateResult::Success
            } else {
                PredicateResult::Choices(self.width)
            }
        }

        fn retry_pred(&mut self, ctx: &mut Paths, _round: usize, choice: usize) -> PredicateResult {
            ctx.trail.push(choice);
            PredicateResult::SuccessSamePredicate
        }
    }

    #[derive(Debug)]
    struct Record;

    impl Predicate<Paths> for Record {
        fn try_pred(&mut self, ctx: &mut Paths, _round: usize) -> PredicateResult {
            let path = ctx.trail.iter().copied().collect();
            ctx.complete.push(path);
            PredicateResult::Success
        }
    }

    #[derive(Debug)]
    struct AlwaysSucceed;

    impl Predicate<Paths> for AlwaysSucceed {
        fn try_pred(&mut self, _ctx: &mut Paths, _round: usize) -> PredicateResult {
            PredicateResult::Success
        }
    }

    #[test]
    fn test_simple_success_with_suspend() {
        let mut ctx = Paths::default();
        let engine = EngineBuilder::<Paths>::new()
            .add(Box::new(AlwaysSucceed))
            .terminal(Box::new(SuspendPredicate))
            .build();

        let engine = engine.search(&mut ctx);
        assert!(engine.is_some());
        let engine = engine.unwrap();
        assert_eq!(engine.statistics(), (2, 0));
    }

    #[test]
    fn test_immediate_failure() {
        let mut ctx = Paths::default();
        let engine = EngineBuilder::<Paths>::new().terminal(Box::new(FailPredicate)).build();
        assert!(engine.search(&mut ctx).is_none());
    }

    #[test]
    fn test_empty_predicates() {
        let mut ctx = Paths::default();
        let engine: SearchEngine<Paths> = SearchEngine::new(vec![]);
        assert!(engine.search(&mut ctx).is_none());
    }

    #[test]
    fn test_exhaustive_enumeration_visits_every_leaf() {
        let mut ctx = Paths::default();
        let engine = EngineBuilder::<Paths>::new()
            .add(Box::new(Digits { width: 3, depth: 2 }))
            .add(Box::new(Record))
            .terminal(Box::new(FailPredicate))
            .build();

        assert!(engine.search(&mut ctx).is_none());
        assert_eq!(ctx.complete.len(), 9);
        assert_eq!(ctx.complete[0], vec![0, 0]);
        assert_eq!(ctx.complete[8], vec![2, 2]);
        assert!(ctx.trail.is_empty());
    }

    #[test]
    fn test_resume_after_suspend_continues_with_next_leaf() {
        let mut ctx = Paths::default();
        let engine = EngineBuilder::<Paths>::new()
            .add(Box::new(Digits { width: 2, depth: 1 }))
            .add(Box::new(Record))
            .terminal(Box::new(SuspendPredicate))
            .build();

        let engine = engine.search(&mut ctx).expect("first leaf suspends");
        assert_eq!(ctx.complete, vec![vec![0]]);

        let engine = engine.search(&mut ctx).expect("second leaf suspends");
        assert_eq!(ctx.complete, vec![vec![0], vec![1]]);

        assert!(engine.search(&mut ctx).is_none());
    }

    #[test]
    #[should_panic(expected = "Invalid predicate sequence")]
    fn test_invalid_program_without_terminal() {
        let mut ctx = Paths::default();
        let engine = SearchEngine::new(vec![Box::new(AlwaysSucceed) as Box<dyn Predicate<Paths>>]);
        let _ = engine.search(&mut ctx);
    }
}
