// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Exhaustive combinatorial search kernels for small puzzle inputs.
//!
//! Each kernel is a pure function of its inputs: it is built once from parsed
//! facts, runs to completion, and returns a scalar or a structural result.
//!
//! # Kernels
//!
//! - [`permutation`]: minimum/maximum total pairwise cost over all orderings
//!   of an entity set, optionally cyclic, using a [`cost::CostTable`]
//! - [`subset`]: every index combination whose running sum stays within a
//!   capacity, plus exact-total aggregation
//! - [`rewrite`]: one-step forward expansion of a string under rewrite rules,
//!   and greedy backward reduction to a terminal symbol
//! - [`divisor`]: smallest integer whose weighted divisor sum meets a threshold
//!
//! # Search Engine
//!
//! The permutation and subset kernels run on a predicate-driven backtracking
//! engine ([`engine::SearchEngine`]). A program is a sequence of predicates;
//! each can succeed, fail, offer choices, or suspend. Search state is a
//! [`trail::Trail`] of steps, rewound automatically on backtracking.
//! Exhaustive searches record every leaf as a side effect and then fail, so
//! the engine visits the whole space.
//!
//! # Drivers
//!
//! [`input`] parses the puzzle text formats into kernel facts. The `puzzle`
//! binary reads a file, calls a kernel and prints the answers.

pub mod cost;
pub mod divisor;
pub mod engine;
pub mod error;
pub mod input;
pub mod logging;
pub mod permutation;
pub mod predicates;
pub mod rewrite;
pub mod subset;
pub mod trail;

// Re-export commonly used types
pub use cost::CostTable;
pub use engine::{EngineBuilder, Predicate, PredicateResult, SearchEngine};
pub use error::SearchError;
pub use permutation::Mode;
pub use rewrite::{Rule, RuleSet};
pub use trail::Trail;
