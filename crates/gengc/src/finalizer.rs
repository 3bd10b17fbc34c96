//! Finalizer - Object Finalization
//!
//! Objects registered for finalization are not reclaimed the first time
//! they are found unreachable. The sweep moves them to `Pending` and queues
//! them here; the drain step at the end of the same collection runs each
//! finalizer once and marks the object `Finalized`. Right after the drain,
//! and at the end of every later collection, finalized objects reachable
//! from the roots are re-armed. The next collection that covers a finalized
//! object still unreachable reclaims it.
//!
//! Finalizers run synchronously on the collecting call. They receive a
//! `FinalizerContext` that can root objects and edit references, which is
//! how resurrection happens, but cannot allocate or start a collection.

use crate::error::Result;
use crate::heap::Heap;
use crate::object::{FinalizationState, Generation, ObjectId};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Finalizer callback
///
/// `FnMut` so a re-registered object can be finalized again.
pub type Finalizer = Box<dyn FnMut(&mut FinalizerContext<'_>)>;

/// View of the heap handed to a running finalizer
pub struct FinalizerContext<'a> {
    heap: &'a mut Heap,
    object: ObjectId,
}

impl<'a> FinalizerContext<'a> {
    pub(crate) fn new(heap: &'a mut Heap, object: ObjectId) -> Self {
        Self { heap, object }
    }

    /// Object being finalized
    pub fn object(&self) -> ObjectId {
        self.object
    }

    pub fn add_root(&mut self, id: ObjectId) -> Result<()> {
        self.heap.add_root(id)
    }

    pub fn remove_root(&mut self, id: ObjectId) -> Result<bool> {
        self.heap.remove_root(id)
    }

    pub fn add_reference(&mut self, from: ObjectId, to: ObjectId) -> Result<()> {
        self.heap.add_reference(from, to)
    }

    pub fn remove_reference(&mut self, from: ObjectId, to: ObjectId) -> Result<bool> {
        self.heap.remove_reference(from, to)
    }

    pub fn references(&self, id: ObjectId) -> Result<Vec<ObjectId>> {
        self.heap.references(id)
    }

    pub fn is_root(&self, id: ObjectId) -> bool {
        self.heap.is_root(id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.heap.contains(id)
    }

    pub fn generation_of(&self, id: ObjectId) -> Option<Generation> {
        self.heap.generation_of(id)
    }
}

/// FinalizationQueue - pending entries plus registered callbacks
#[derive(Default)]
pub struct FinalizationQueue {
    pending: VecDeque<ObjectId>,
    /// Objects allocated as finalizable and not yet reclaimed
    registered: FxHashSet<ObjectId>,
    callbacks: FxHashMap<ObjectId, Finalizer>,
    default_hook: Option<Finalizer>,
    total_run: u64,
}

impl FinalizationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a finalizable object, with its own callback or relying on
    /// the default hook
    pub fn register(&mut self, id: ObjectId, finalizer: Option<Finalizer>) {
        self.registered.insert(id);
        if let Some(finalizer) = finalizer {
            self.callbacks.insert(id, finalizer);
        }
    }

    /// Install the hook used by objects without their own callback
    pub fn set_default_hook(&mut self, hook: Option<Finalizer>) -> bool {
        let had_hook = self.default_hook.is_some();
        self.default_hook = hook;
        had_hook
    }

    /// Whether `id` was registered for finalization
    pub fn is_registered(&self, id: ObjectId) -> bool {
        self.registered.contains(&id)
    }

    /// Whether the drain step would call anything for `id`
    pub fn has_callback(&self, id: ObjectId) -> bool {
        self.callbacks.contains_key(&id) || self.default_hook.is_some()
    }

    pub fn enqueue(&mut self, id: ObjectId) {
        self.pending.push_back(id);
    }

    /// Drop a pending entry (finalization suppressed)
    pub fn cancel(&mut self, id: ObjectId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|&pending| pending != id);
        before != self.pending.len()
    }

    /// Forget a reclaimed object
    pub fn forget(&mut self, id: ObjectId) {
        self.registered.remove(&id);
        self.callbacks.remove(&id);
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn pending(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.pending.iter().copied()
    }

    /// Finalizers run over the collector's lifetime
    pub fn total_run(&self) -> u64 {
        self.total_run
    }

    /// Run every pending finalizer in queue order
    ///
    /// Each object moves to `Finalized` before its callback runs. Entries
    /// whose object is no longer `Pending` are skipped. Returns the ids
    /// finalized, in order.
    pub fn drain(&mut self, heap: &mut Heap) -> Vec<ObjectId> {
        let mut finalized = Vec::with_capacity(self.pending.len());

        while let Some(id) = self.pending.pop_front() {
            let Some(record) = heap.objects.get_mut(id) else {
                continue;
            };
            if record.finalization != FinalizationState::Pending {
                continue;
            }
            record.finalization = FinalizationState::Finalized;

            let mut ctx = FinalizerContext::new(heap, id);
            if let Some(callback) = self.callbacks.get_mut(&id) {
                callback(&mut ctx);
            } else if let Some(hook) = self.default_hook.as_mut() {
                hook(&mut ctx);
            }

            self.total_run += 1;
            finalized.push(id);
        }

        finalized
    }
}

impl std::fmt::Debug for FinalizationQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinalizationQueue")
            .field("pending", &self.pending)
            .field("registered", &self.registered.len())
            .field("callbacks", &self.callbacks.len())
            .field("default_hook", &self.default_hook.is_some())
            .field("total_run", &self.total_run)
            .finish()
    }
}
