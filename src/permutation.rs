// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Exhaustive permutation optimizer.
//!
//! Finds the minimum and maximum total cost over all N! orderings of an
//! entity set, where the total is the sum of pairwise costs between adjacent
//! entities, plus the (last, first) pair for cyclic arrangements.
//!
//! The search runs on the backtracking engine as a three-predicate program:
//!
//! ```text
//! PlacePredicate          - one round per position, Choices(unplaced entities)
//! RecordOrderingPredicate - fold the completed ordering into the extremes
//! FailPredicate           - reject, so every ordering is visited
//! ```
//!
//! Each [`Placement`] on the trail carries the running cost and the set of
//! placed entities, so backtracking restores both by truncation. Complexity is
//! O(N!·N) and no pruning is done; entity sets are small by construction.
//!
//! # Examples
//!
//! ```
//! use puzzle_search::cost::CostTable;
//! use puzzle_search::permutation::{optimize, Mode};
//!
//! let mut table = CostTable::new();
//! table.insert_symmetric("London", "Dublin", 464);
//! table.insert_symmetric("London", "Belfast", 518);
//! table.insert_symmetric("Dublin", "Belfast", 141);
//!
//! let cities = ["London", "Dublin", "Belfast"];
//! assert_eq!(optimize(&cities, &table, Mode::Min, false), Ok(605));
//! assert_eq!(optimize(&cities, &table, Mode::Max, false), Ok(982));
//! ```

use crate::cost::{CostMatrix, CostTable};
use crate::engine::{EngineBuilder, Predicate, PredicateResult, SearchState};
use crate::error::SearchError;
use crate::predicates::FailPredicate;
use crate::trail::Trail;
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use strum_macros::{Display as StrumDisplay, EnumIter};
use tracing::debug;

/// Largest entity set the optimizer accepts. The placed set is a u32 mask,
/// and 16! orderings is already far beyond a tractable search.
pub const MAX_ENTITIES: usize = 16;

/// Which extreme to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Min,
    Max,
}

/// Minimum and maximum total cost over all orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extremes {
    pub min: i64,
    pub max: i64,
}

impl Extremes {
    /// The extreme selected by `mode`.
    pub fn get(&self, mode: Mode) -> i64 {
        match mode {
            Mode::Min => self.min,
            Mode::Max => self.max,
        }
    }

    fn including(self, total: i64) -> Self {
        Self {
            min: self.min.min(total),
            max: self.max.max(total),
        }
    }
}

/// One placed entity, with the state reached after placing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Position of the entity in the resolved entity list.
    pub entity: usize,
    /// Mask of all entities placed so far, this one included.
    placed: u32,
    /// Sum of adjacent-pair costs so far.
    cost: i64,
}

/// Search context for one permutation search.
#[derive(Debug)]
pub struct PermutationContext {
    matrix: CostMatrix,
    cyclic: bool,
    trail: Trail<Placement>,
    extremes: Option<Extremes>,
    orderings: u64,
}

impl PermutationContext {
    /// Create a context over a resolved cost matrix.
    pub fn new(matrix: CostMatrix, cyclic: bool) -> Self {
        Self {
            matrix,
            cyclic,
            trail: Trail::new(),
            extremes: None,
            orderings: 0,
        }
    }

    /// Extremes over the orderings recorded so far.
    pub fn extremes(&self) -> Option<Extremes> {
        self.extremes
    }

    /// Number of complete orderings recorded.
    pub fn orderings(&self) -> u64 {
        self.orderings
    }
}

impl SearchState for PermutationContext {
    type Step = Placement;

    fn trail(&mut self) -> &mut Trail<Placement> {
        &mut self.trail
    }
}

/// Places one more entity per round.
#[derive(Debug)]
pub struct PlacePredicate;

impl Predicate<PermutationContext> for PlacePredicate {
    fn try_pred(&mut self, ctx: &mut PermutationContext, _round: usize) -> PredicateResult {
        let remaining = ctx.matrix.size() - ctx.trail.len();
        if remaining == 0 {
            PredicateResult::Success
        } else {
            PredicateResult::Choices(remaining)
        }
    }

    fn retry_pred(
        &mut self,
        ctx: &mut PermutationContext,
        _round: usize,
        choice: usize,
    ) -> PredicateResult {
        let size = ctx.matrix.size();
        let placed = ctx.trail.last().map_or(0, |p| p.placed);
        let Some(entity) = (0..size).filter(|&e| placed & (1 << e) == 0).nth(choice) else {
            return PredicateResult::Failure;
        };
        let cost = ctx
            .trail
            .last()
            .map_or(0, |p| p.cost + ctx.matrix.cost(p.entity, entity));

        ctx.trail.push(Placement {
            entity,
            placed: placed | (1 << entity),
            cost,
        });

        if ctx.trail.len() == size {
            PredicateResult::Success
        } else {
            PredicateResult::SuccessSamePredicate
        }
    }

    fn name(&self) -> &str {
        "Place"
    }
}

/// Folds a complete ordering into the running extremes.
#[derive(Debug)]
pub struct RecordOrderingPredicate;

impl Predicate<PermutationContext> for RecordOrderingPredicate {
    fn try_pred(&mut self, ctx: &mut PermutationContext, _round: usize) -> PredicateResult {
        let (Some(&first), Some(&last)) = (ctx.trail.first(), ctx.trail.last()) else {
            return PredicateResult::Failure;
        };
        let wrap = if ctx.cyclic && ctx.trail.len() > 1 {
            ctx.matrix.cost(last.entity, first.entity)
        } else {
            0
        };
        let total = last.cost + wrap;

        ctx.extremes = Some(match ctx.extremes {
            Some(extremes) => extremes.including(total),
            None => Extremes {
                min: total,
                max: total,
            },
        });
        ctx.orderings += 1;
        PredicateResult::Success
    }

    fn name(&self) -> &str {
        "RecordOrdering"
    }
}

/// Best total cost over every ordering of `entities`.
///
/// Duplicate entities are collapsed. Fails with `MissingCostEntry` if any
/// ordered pair of distinct entities has no cost in the table.
pub fn optimize<E>(
    entities: &[E],
    cost: &CostTable<E>,
    mode: Mode,
    cyclic: bool,
) -> Result<i64, SearchError>
where
    E: Eq + Hash + Clone + Display,
{
    Ok(optimize_both(entities, cost, cyclic)?.get(mode))
}

/// Both extremes from a single enumeration.
pub fn optimize_both<E>(
    entities: &[E],
    cost: &CostTable<E>,
    cyclic: bool,
) -> Result<Extremes, SearchError>
where
    E: Eq + Hash + Clone + Display,
{
    let entities = distinct(entities);
    if entities.is_empty() {
        return Err(SearchError::EmptyEntitySet);
    }
    if entities.len() > MAX_ENTITIES {
        return Err(SearchError::TooManyEntities {
            count: entities.len(),
            max: MAX_ENTITIES,
        });
    }

    let matrix = cost.resolve(&entities)?;
    let mut ctx = PermutationContext::new(matrix, cyclic);
    let engine = EngineBuilder::<PermutationContext>::new()
        .add(Box::new(PlacePredicate))
        .add(Box::new(RecordOrderingPredicate))
        .terminal(Box::new(FailPredicate))
        .build();
    engine.search(&mut ctx);

    debug!(
        entities = entities.len(),
        cyclic,
        orderings = ctx.orderings(),
        "permutation search complete"
    );
    ctx.extremes().ok_or(SearchError::EmptyEntitySet)
}

/// Entities in first-seen order, without repeats.
fn distinct<E: Eq + Hash + Clone>(entities: &[E]) -> Vec<E> {
    let mut seen = HashSet::with_capacity(entities.len());
    entities
        .iter()
        .filter(|e| seen.insert(*e))
        .cloned()
        .collect()
}
