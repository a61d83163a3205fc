// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pairwise cost model.
//!
//! A [`CostTable`] maps ordered pairs of entities to a signed cost (distance,
//! happiness, ...). Lookups of undefined pairs fail with
//! [`SearchError::MissingCostEntry`], except for the optional sentinel
//! entity, which costs zero against everything.
//!
//! Before a search the table is resolved into a dense [`CostMatrix`] indexed
//! by position in the entity list. Every ordered pair of distinct entities is
//! adjacent in some ordering, so resolving them all up front fails on the
//! same missing pair an on-demand lookup would eventually hit.
//!
//! # Examples
//!
//! ```
//! use puzzle_search::cost::CostTable;
//!
//! let mut table = CostTable::new();
//! table.insert_symmetric("London", "Dublin", 464);
//! assert_eq!(table.cost(&"Dublin", &"London"), Ok(464));
//! assert!(table.cost(&"Dublin", &"Belfast").is_err());
//! ```

use crate::error::SearchError;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

/// Mapping from ordered entity pairs to signed costs.
#[derive(Debug, Clone)]
pub struct CostTable<E> {
    costs: HashMap<(E, E), i64>,
    sentinel: Option<E>,
}

impl<E> CostTable<E>
where
    E: Eq + Hash + Clone + Display,
{
    /// Create an empty table with no sentinel.
    pub fn new() -> Self {
        Self {
            costs: HashMap::new(),
            sentinel: None,
        }
    }

    /// Designate an entity that costs zero against every other entity.
    pub fn with_sentinel(mut self, sentinel: E) -> Self {
        self.sentinel = Some(sentinel);
        self
    }

    /// Define the cost of the ordered pair (from, to).
    pub fn insert(&mut self, from: E, to: E, cost: i64) {
        self.costs.insert((from, to), cost);
    }

    /// Define the same cost for both orders of a pair.
    pub fn insert_symmetric(&mut self, a: E, b: E, cost: i64) {
        self.costs.insert((a.clone(), b.clone()), cost);
        self.costs.insert((b, a), cost);
    }

    /// Fold a directed table into a symmetric one.
    ///
    /// Each pair's cost becomes the sum of both directions, so that a single
    /// lookup per adjacency accounts for what each side contributes. A pair
    /// defined in one direction only fails with `MissingCostEntry` for the
    /// other direction.
    pub fn symmetrized_sum(&self) -> Result<Self, SearchError> {
        let mut costs = HashMap::with_capacity(self.costs.len());
        for ((from, to), &cost) in &self.costs {
            let reverse = if from == to { 0 } else { self.cost(to, from)? };
            costs.insert((from.clone(), to.clone()), cost + reverse);
        }
        Ok(Self {
            costs,
            sentinel: self.sentinel.clone(),
        })
    }

    /// Look up the cost of the ordered pair (from, to).
    pub fn cost(&self, from: &E, to: &E) -> Result<i64, SearchError> {
        if self.is_sentinel(from) || self.is_sentinel(to) {
            return Ok(0);
        }
        self.costs
            .get(&(from.clone(), to.clone()))
            .copied()
            .ok_or_else(|| SearchError::MissingCostEntry {
                from: from.to_string(),
                to: to.to_string(),
            })
    }

    /// Resolve every ordered pair of distinct entities into a dense matrix.
    pub fn resolve(&self, entities: &[E]) -> Result<CostMatrix, SearchError> {
        let size = entities.len();
        let mut costs = vec![0; size * size];
        for (i, from) in entities.iter().enumerate() {
            for (j, to) in entities.iter().enumerate() {
                if i != j {
                    costs[i * size + j] = self.cost(from, to)?;
                }
            }
        }
        Ok(CostMatrix { size, costs })
    }

    /// Number of defined pairs (the sentinel is not counted).
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// Check if no pair is defined.
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    fn is_sentinel(&self, entity: &E) -> bool {
        self.sentinel.as_ref() == Some(entity)
    }
}

impl<E> Default for CostTable<E>
where
    E: Eq + Hash + Clone + Display,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Dense pairwise costs over entity positions `0..size`.
///
/// The diagonal is zero and never queried by the optimizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostMatrix {
    size: usize,
    costs: Vec<i64>,
}

impl CostMatrix {
    /// Number of entities.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cost of moving from entity `from` to entity `to`.
    #[inline]
    pub fn cost(&self, from: usize, to: usize) -> i64 {
        self.costs[from * self.size + to]
    }
}
