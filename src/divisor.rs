// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Weighted divisor sums.
//!
//! For an integer n, sum its divisors, optionally keeping only divisors d
//! with `d * visit_limit >= n`, and scale by a multiplier. The search walks n
//! upward from 1 until the weighted sum meets a threshold.
//!
//! Divisors are found in pairs (d, n/d) for d up to the square root of n, so
//! each candidate costs O(√n). Reaching a threshold around T takes roughly
//! T/multiplier candidates, which is the dominant cost for large thresholds.
//!
//! ```
//! use puzzle_search::divisor::{smallest_n_meeting, weighted_divisor_sum};
//!
//! assert_eq!(weighted_divisor_sum(8, 10, None), 150);
//! assert_eq!(smallest_n_meeting(130, 10, None), 8);
//! ```

use crate::error::SearchError;
use tracing::debug;

/// Sum of the divisors of `n` admitted by `visit_limit`, times `multiplier`.
pub fn weighted_divisor_sum(n: u64, multiplier: u64, visit_limit: Option<u64>) -> u64 {
    let admits = |divisor: u64| visit_limit.map_or(true, |limit| divisor.saturating_mul(limit) >= n);

    let root = (n as f64).sqrt() as u64 + 1;
    let mut sum = 0;
    for d in (1..=root).take_while(|&d| d * d <= n) {
        if n % d != 0 {
            continue;
        }
        let complement = n / d;
        if admits(d) {
            sum += d;
        }
        if complement != d && admits(complement) {
            sum += complement;
        }
    }
    sum * multiplier
}

/// Smallest n whose weighted divisor sum reaches `threshold`.
///
/// This search has no upper bound: for a threshold that can never be met it
/// does not return. Use [`DivisorSearch`] with an upper bound when the
/// threshold is not known to be reachable.
pub fn smallest_n_meeting(threshold: u64, multiplier: u64, visit_limit: Option<u64>) -> u64 {
    let mut n = 1;
    while weighted_divisor_sum(n, multiplier, visit_limit) < threshold {
        n += 1;
    }
    n
}

/// Configurable divisor-sum search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DivisorSearch {
    /// Factor applied to every divisor sum.
    pub multiplier: u64,
    /// If set, divisor d only counts for n when `d * visit_limit >= n`.
    pub visit_limit: Option<u64>,
    /// If set, candidates above this bound are not tried.
    pub upper_bound: Option<u64>,
}

impl DivisorSearch {
    /// An unbounded search counting every divisor.
    pub fn new(multiplier: u64) -> Self {
        Self {
            multiplier,
            visit_limit: None,
            upper_bound: None,
        }
    }

    /// Only count divisors d with `d * visit_limit >= n`.
    pub fn with_visit_limit(mut self, visit_limit: u64) -> Self {
        self.visit_limit = Some(visit_limit);
        self
    }

    /// Stop with `SearchExhausted` after trying this many candidates.
    pub fn with_upper_bound(mut self, upper_bound: u64) -> Self {
        self.upper_bound = Some(upper_bound);
        self
    }

    /// Smallest n whose weighted divisor sum reaches `threshold`.
    ///
    /// Without an upper bound this behaves like [`smallest_n_meeting`].
    pub fn smallest_n_meeting(&self, threshold: u64) -> Result<u64, SearchError> {
        let Some(upper_bound) = self.upper_bound else {
            return Ok(smallest_n_meeting(threshold, self.multiplier, self.visit_limit));
        };

        let found = (1..=upper_bound)
            .find(|&n| weighted_divisor_sum(n, self.multiplier, self.visit_limit) >= threshold);
        debug!(threshold, upper_bound, ?found, "divisor search complete");
        found.ok_or(SearchError::SearchExhausted {
            threshold,
            upper_bound,
        })
    }
}
