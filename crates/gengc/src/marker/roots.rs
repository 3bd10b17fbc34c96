//! Root Set - Externally Held Strong References
//!
//! Roots stand in for stack slots and statics: references that live outside
//! the object graph. Marking starts here. The collector only reads this set;
//! callers add and remove entries.

use crate::object::ObjectId;
use indexmap::IndexSet;

/// RootSet - set of rooted object identities
///
/// Insertion ordered so mark traversal order is deterministic.
#[derive(Debug, Default, Clone)]
pub struct RootSet {
    roots: IndexSet<ObjectId>,
}

impl RootSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root; adding an existing root is a no-op
    ///
    /// Returns true if the root was not present before.
    pub fn insert(&mut self, id: ObjectId) -> bool {
        self.roots.insert(id)
    }

    /// Remove a root
    ///
    /// Returns true if the root was present.
    pub fn remove(&mut self, id: ObjectId) -> bool {
        self.roots.shift_remove(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.roots.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.roots.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
