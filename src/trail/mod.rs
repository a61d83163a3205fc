// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Trail-based backtracking for the search engine.
//!
//! A search records each decision as a step pushed onto the trail. Every step
//! carries the complete state reached after the decision (running cost, used
//! mask, running total), so restoring an earlier state is just a truncation.
//! The engine rewinds the trail to a stack entry's checkpoint before every
//! try and retry, which means predicates never undo their own changes.

/// The trail of search steps.
///
/// # Memory Model
///
/// - Each search context owns its own trail
/// - Steps are plain values; nothing points into the trail
#[derive(Debug, Clone)]
pub struct Trail<T> {
    /// All steps recorded so far, oldest first
    entries: Vec<T>,
}

impl<T> Trail<T> {
    /// Maximum trail depth. A search deeper than this is a bug in a predicate.
    pub const MAX_SIZE: usize = 16384;

    /// Create a new empty trail.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Rewind the trail to `position`, discarding later steps.
    pub fn rewind_to(&mut self, position: usize) {
        self.entries.truncate(position);
    }

    /// Push a step onto the trail.
    ///
    /// # Panics
    ///
    /// Panics if the trail exceeds MAX_SIZE.
    pub fn push(&mut self, step: T) {
        if self.entries.len() >= Self::MAX_SIZE {
            panic!("Trail overflow: exceeded {} entries", Self::MAX_SIZE);
        }
        self.entries.push(step);
    }

    /// The most recent step, if any.
    pub fn last(&self) -> Option<&T> {
        self.entries.last()
    }

    /// The first step, if any.
    pub fn first(&self) -> Option<&T> {
        self.entries.first()
    }

    /// Iterate over the steps, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// Get the current number of steps on the trail.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the trail is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Trail<T> {
    fn default() -> Self {
        Self::new()
    }
}
