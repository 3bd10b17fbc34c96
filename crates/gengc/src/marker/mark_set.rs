//! Mark Set - Tracking Marked Objects
//!
//! Marks are kept in a hash set keyed by `ObjectId`, so the cost of a cycle
//! follows the number of objects it reaches rather than the number of
//! identities ever issued.

use crate::object::ObjectId;
use rustc_hash::FxHashSet;

/// MarkSet - per-cycle mark bits
#[derive(Debug, Clone, Default)]
pub struct MarkSet {
    marked: FxHashSet<ObjectId>,
}

impl MarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id`
    ///
    /// Returns true if it was unmarked before, i.e. this call marked it.
    pub fn mark(&mut self, id: ObjectId) -> bool {
        self.marked.insert(id)
    }

    pub fn is_marked(&self, id: ObjectId) -> bool {
        self.marked.contains(&id)
    }

    pub fn count_marked(&self) -> usize {
        self.marked.len()
    }

    pub fn clear(&mut self) {
        self.marked.clear();
    }
}
