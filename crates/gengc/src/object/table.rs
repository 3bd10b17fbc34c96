//! Object Table - Id-Keyed Object Records
//!
//! Records are stored in a hash map keyed by `ObjectId`. Identities come
//! from a monotonically increasing counter, so a reclaimed identity is never
//! handed out again while the table itself only holds live records.
//! Generation moves and compaction only rewrite fields of the record.
//!
//! Map iteration order is unspecified; callers that need a deterministic
//! order go through `ids_in`/`ids_collected_at`, which return ids sorted
//! by allocation order.

use super::header::{Generation, ObjectId, ObjectRecord};
use crate::error::{GcError, Result};
use rustc_hash::FxHashMap;

/// ObjectTable - identity-stable storage for all managed objects
#[derive(Debug, Default)]
pub struct ObjectTable {
    records: FxHashMap<ObjectId, ObjectRecord>,
    /// Identities issued so far
    issued: usize,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity the next insertion will receive
    pub fn next_id(&self) -> ObjectId {
        ObjectId::from_usize(self.issued)
    }

    /// Insert a record built for `next_id()`
    pub fn insert(&mut self, record: ObjectRecord) -> ObjectId {
        let id = record.id;
        debug_assert_eq!(id, self.next_id());
        self.records.insert(id, record);
        self.issued += 1;
        id
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<ObjectRecord> {
        self.records.remove(&id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&ObjectRecord> {
        self.records.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut ObjectRecord> {
        self.records.get_mut(&id)
    }

    /// Lookup that fails with `DanglingReference`
    pub fn try_get(&self, id: ObjectId) -> Result<&ObjectRecord> {
        self.get(id).ok_or(GcError::DanglingReference { id })
    }

    pub fn try_get_mut(&mut self, id: ObjectId) -> Result<&mut ObjectRecord> {
        self.get_mut(id).ok_or(GcError::DanglingReference { id })
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.records.contains_key(&id)
    }

    /// Number of records currently stored (zombies included)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of identities ever issued
    pub fn issued(&self) -> usize {
        self.issued
    }

    /// Stored records, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &ObjectRecord> {
        self.records.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ObjectRecord> {
        self.records.values_mut()
    }

    /// Identities of records in one generation, in allocation order
    pub fn ids_in(&self, generation: Generation) -> Vec<ObjectId> {
        self.sorted_ids(|record| record.generation == generation)
    }

    /// Identities of records a collection at `level` covers, in allocation
    /// order
    pub fn ids_collected_at(&self, level: u8) -> Vec<ObjectId> {
        self.sorted_ids(|record| record.generation.is_collected_at(level))
    }

    /// Finalized records awaiting reclamation, in allocation order
    pub fn zombie_ids(&self) -> Vec<ObjectId> {
        self.sorted_ids(ObjectRecord::is_zombie)
    }

    fn sorted_ids<F>(&self, keep: F) -> Vec<ObjectId>
    where
        F: Fn(&ObjectRecord) -> bool,
    {
        let mut ids: Vec<ObjectId> = self
            .records
            .values()
            .filter(|record| keep(record))
            .map(|record| record.id)
            .collect();
        ids.sort_unstable();
        ids
    }
}
