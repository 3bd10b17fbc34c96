//! Heap Module - Object Graph Ownership
//!
//! The heap owns everything a mutator can observe about the object graph:
//!
//! - the object table (records and their outgoing edges)
//! - the root set
//! - the remembered set, kept in sync by the reference write path
//!
//! Graph mutation goes through the primitives here so that the collector's
//! public API and finalizer callbacks share one write barrier.

use crate::error::Result;
use crate::marker::{RememberedSet, RootSet};
use crate::object::{Generation, ObjectId, ObjectRecord, ObjectTable};

/// Heap - object table, roots and remembered set
#[derive(Debug, Default)]
pub struct Heap {
    pub(crate) objects: ObjectTable,
    pub(crate) roots: RootSet,
    pub(crate) remembered: RememberedSet,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an edge `from -> to`; adding an existing edge is a no-op
    pub fn add_reference(&mut self, from: ObjectId, to: ObjectId) -> Result<()> {
        self.objects.try_get(to)?;
        self.objects.try_get_mut(from)?.edges.insert(to);

        if let (Some(source), Some(target)) = (self.objects.get(from), self.objects.get(to)) {
            self.remembered.record_edge(source, target);
        }
        Ok(())
    }

    /// Remove an edge, returning whether it existed
    ///
    /// The remembered set is left alone; a stale entry is dropped by the
    /// next prune.
    pub fn remove_reference(&mut self, from: ObjectId, to: ObjectId) -> Result<bool> {
        self.objects.try_get(to)?;
        Ok(self.objects.try_get_mut(from)?.edges.shift_remove(&to))
    }

    /// Root an object; rooting twice is a no-op
    pub fn add_root(&mut self, id: ObjectId) -> Result<()> {
        self.objects.try_get(id)?;
        self.roots.insert(id);
        Ok(())
    }

    /// Unroot an object, returning whether it was rooted
    pub fn remove_root(&mut self, id: ObjectId) -> Result<bool> {
        self.objects.try_get(id)?;
        Ok(self.roots.remove(id))
    }

    pub fn is_root(&self, id: ObjectId) -> bool {
        self.roots.contains(id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains(id)
    }

    /// Outgoing edges of `id`, in insertion order
    pub fn references(&self, id: ObjectId) -> Result<Vec<ObjectId>> {
        Ok(self.objects.try_get(id)?.edges().collect())
    }

    pub fn generation_of(&self, id: ObjectId) -> Option<Generation> {
        self.objects.get(id).map(ObjectRecord::generation)
    }

    pub fn objects(&self) -> &ObjectTable {
        &self.objects
    }

    pub fn roots(&self) -> &RootSet {
        &self.roots
    }

    pub fn remembered(&self) -> &RememberedSet {
        &self.remembered
    }

    /// Remove a reclaimed object from every structure that can name it
    pub(crate) fn reclaim(&mut self, id: ObjectId) -> Option<ObjectRecord> {
        self.remembered.remove(id);
        self.roots.remove(id);
        self.objects.remove(id)
    }
}
