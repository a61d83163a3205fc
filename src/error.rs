// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for the search kernels.

use thiserror::Error;

/// Errors that end a search without a result.
///
/// None of these are retried: every search is a deterministic function of
/// its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A pairwise cost needed by the optimizer has no defined value.
    #[error("no cost defined from {from} to {to}")]
    MissingCostEntry { from: String, to: String },

    /// The permutation optimizer was given no entities.
    #[error("cannot order an empty entity set")]
    EmptyEntitySet,

    /// Too many entities for exhaustive permutation search.
    #[error("{count} entities exceed the permutation limit of {max}")]
    TooManyEntities { count: usize, max: usize },

    /// Backward reduction reached a string no rule applies to.
    #[error("reduction stuck after {steps} steps at {remaining:?}")]
    StuckReduction { steps: usize, remaining: String },

    /// Backward reduction ran past its step limit.
    #[error("reduction did not reach the terminal within {max_steps} steps")]
    StepLimitExceeded { max_steps: usize },

    /// Divisor-sum search passed its upper bound without meeting the threshold.
    #[error("no n up to {upper_bound} reaches the threshold {threshold}")]
    SearchExhausted { threshold: u64, upper_bound: u64 },
}
