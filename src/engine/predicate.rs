// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Predicate trait for non-deterministic search.
//!
//! The search engine works by trying predicates in sequence. Each predicate
//! represents a choice point in the search space. Predicates can succeed,
//! fail, or offer a number of choices that the engine explores one by one.
//!
//! # Example
//!
//! ```
//! use puzzle_search::engine::{Predicate, PredicateResult};
//!
//! #[derive(Debug)]
//! struct CoinFlip;
//!
//! impl Predicate<Vec<bool>> for CoinFlip {
//!     fn try_pred(&mut self, _ctx: &mut Vec<bool>, _round: usize) -> PredicateResult {
//!         PredicateResult::Choices(2)
//!     }
//!
//!     fn retry_pred(&mut self, ctx: &mut Vec<bool>, _round: usize, choice: usize) -> PredicateResult {
//!         ctx.push(choice == 1);
//!         PredicateResult::Success
//!     }
//! }
//! ```

use std::fmt::Debug;

/// Result of attempting a predicate.
///
/// Predicates can return:
/// - `Success`: Move to next predicate in the sequence
/// - `SuccessSamePredicate`: Stay at same predicate, increment round (for iterative predicates)
/// - `Failure`: Backtrack to previous predicate
/// - `Choices(n)`: Predicate has n choices to explore via retry_pred
/// - `Suspend`: Pause execution and hand control back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateResult {
    /// Predicate succeeded. Move to next predicate in sequence.
    Success,

    /// Predicate succeeded but stay at same predicate with next round.
    /// Allows a single predicate to execute once per search depth.
    SuccessSamePredicate,

    /// Predicate has no (more) valid choices. Backtrack to previous predicate.
    Failure,

    /// Predicate has multiple choices to explore.
    /// Engine will call retry_pred(round, choice) for each choice in 0..n.
    Choices(usize),

    /// Suspend execution. Engine returns control with state preserved.
    Suspend,
}

/// Trait for search predicates in the non-deterministic engine.
///
/// `C` is the search context the predicate reads and writes. The engine
/// calls `try_pred` to attempt the predicate for the first time, and
/// `retry_pred` for each choice once `try_pred` has returned `Choices(n)`.
///
/// # Trail Integration
///
/// Before every `try_pred` or `retry_pred` the engine rewinds the context's
/// trail to the checkpoint of the current stack entry, so a predicate sees
/// exactly the state its caller left behind.
pub trait Predicate<C>: Debug {
    /// Try this predicate for a given round.
    ///
    /// The round starts at 0 and increments each time the predicate returns
    /// `SuccessSamePredicate`.
    fn try_pred(&mut self, ctx: &mut C, round: usize) -> PredicateResult;

    /// Retry this predicate with a specific choice.
    ///
    /// Called after try_pred returns Choices(n), for each choice in 0..n.
    /// retry_pred cannot return Choices or Suspend.
    #[allow(unused)]
    fn retry_pred(&mut self, ctx: &mut C, round: usize, choice: usize) -> PredicateResult {
        // Predicates that return Choices must implement this.
        panic!("{}::retry_pred should never be called", self.name());
    }

    /// Get a name for this predicate (for debugging).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A terminal predicate that ends a program.
///
/// Terminal predicates are FAIL or SUSPEND - they never return Success.
/// `EngineBuilder::terminal` only accepts these, so every program built
/// through the builder ends properly.
pub trait TerminalPredicate<C>: Predicate<C> {}
