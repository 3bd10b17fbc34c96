//! Remembered Set - Older-to-Younger Edge Sources
//!
//! A partial collection (level 0 or 1) treats every object in an older,
//! uncollected generation as live. Rather than scanning those generations,
//! the collector remembers which older objects hold an edge into a younger
//! generation and seeds marking from them.
//!
//! Entries are added by the reference write path and after promotion. Stale
//! entries are harmless (they only cost a lookup) and are pruned after each
//! collection.

use crate::object::{ObjectId, ObjectRecord, ObjectTable};
use rustc_hash::FxHashSet;

/// RememberedSet - sources of older -> younger edges
#[derive(Debug, Default)]
pub struct RememberedSet {
    sources: FxHashSet<ObjectId>,
}

impl RememberedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write barrier for `from -> to`
    pub fn record_edge(&mut self, from: &ObjectRecord, to: &ObjectRecord) {
        if from.generation() > to.generation() {
            self.sources.insert(from.id());
        }
    }

    /// Re-check an object whose generation just increased
    pub fn record_promotion(&mut self, promoted: &ObjectRecord, objects: &ObjectTable) {
        if has_younger_edge(promoted, objects) {
            self.sources.insert(promoted.id());
        }
    }

    pub fn remove(&mut self, id: ObjectId) {
        self.sources.remove(&id);
    }

    /// Sources living in generations a collection at `level` does not cover,
    /// sorted for deterministic traversal
    pub fn sources_above(&self, level: u8, objects: &ObjectTable) -> Vec<ObjectId> {
        let mut sources: Vec<_> = self
            .sources
            .iter()
            .copied()
            .filter(|&id| {
                objects
                    .get(id)
                    .map_or(false, |record| !record.generation().is_collected_at(level))
            })
            .collect();
        sources.sort_unstable();
        sources
    }

    /// Drop entries that no longer hold a younger edge
    pub fn prune(&mut self, objects: &ObjectTable) -> usize {
        let before = self.sources.len();
        self.sources
            .retain(|&id| objects.get(id).map_or(false, |record| has_younger_edge(record, objects)));
        before - self.sources.len()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.sources.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

fn has_younger_edge(record: &ObjectRecord, objects: &ObjectTable) -> bool {
    record.edges().any(|target| {
        objects
            .get(target)
            .map_or(false, |target| target.generation() < record.generation())
    })
}
